//! Command handling — switch a device, or show the configuration.

mod config_cmd;
mod switch;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::Args;
pub(super) use switchctl_lib::config::Config;
pub(super) use switchctl_lib::dispatch::{Controller, DispatchRequest, Dispatcher, ProcessController};
pub(super) use switchctl_lib::error::Result;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {}", format_kv(key, value, w - 2));
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub problems: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct DryRunOutput<'a> {
    pub request: &'a DispatchRequest,
    pub program: &'a str,
    pub args: &'a [String],
    pub env: BTreeMap<String, String>,
}

/// Warn if `--json` was passed where it has no effect.
fn warn_json_unsupported() {
    log::warn!("--json only applies to --dry-run and --show-config (ignored)");
}

/// Load the explicit config file if one was named, else the default one.
fn load_config(custom_path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match custom_path {
        Some(path) => Ok((Config::load_explicit(path)?, Some(path.to_path_buf()))),
        None => Ok((Config::load(), Config::path())),
    }
}

pub(crate) fn run(args: &Args) -> Result<()> {
    if args.show_config {
        let (config, config_path) = load_config(args.config.as_deref())?;
        return config_cmd::cmd_config(&config, config_path.as_deref(), args.json);
    }

    // Argument errors are reported before any configuration error.
    let request = DispatchRequest::parse(args.device.as_deref(), args.state.as_deref())?;

    let (config, _) = load_config(args.config.as_deref())?;
    config.ensure_valid()?;
    if args.json && !args.dry_run {
        warn_json_unsupported();
    }

    switch::cmd_switch(&config, &request, args.dry_run, args.json)
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Short:", "Config file:"], &[]);
        // "Config file:" = 12 + PADDING = 14
        assert_eq!(w, 14);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["registry_path:"]);
        // "registry_path:" = 14 + PADDING + 2 = 18
        assert_eq!(w, 18);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Top:"], &["Indent:"]);
        let top = format_kv("Top:", "V", w);
        let indent = format!("  {}", format_kv("Indent:", "V", w - 2));
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_basic() {
        assert_eq!(format_kv("Key:", "value", 10), "Key:      value");
    }

    #[test]
    fn format_kv_exceeding_width() {
        // Key longer than width — no padding added
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
    }

    #[test]
    fn kv_width_empty_both() {
        assert_eq!(kv_width(&[], &[]), 0);
    }
}
