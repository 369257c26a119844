//! `--show-config` — show configuration file location and effective settings.

use std::io;
use std::path::Path;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width};

pub(super) fn cmd_config(config: &Config, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config_exists = config_path.is_some_and(|p| p.exists());
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        let output = ConfigOutput {
            config_file: config_path.map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config.clone(),
            problems,
        };
        let text = serde_json::to_string_pretty(&output).map_err(io::Error::other)?;
        println!("{text}");
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &[
            "program:",
            "args:",
            "device_flag:",
            "command_flag:",
            "state_tokens:",
            "device_key:",
            "registry_path:",
            "registry_env:",
            "hand_off:",
        ],
    );

    match config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("program:", &config.program, w);
    let args = if config.args.is_empty() {
        "(none)".to_string()
    } else {
        config.args.join(" ")
    };
    kv_indent("args:", args, w);
    kv_indent("device_flag:", &config.device_flag, w);
    kv_indent("command_flag:", &config.command_flag, w);
    kv_indent("state_tokens:", config.state_tokens, w);
    kv_indent("device_key:", config.device_key, w);
    match config.registry() {
        Some(path) => kv_indent("registry_path:", path.display(), w),
        None => kv_indent("registry_path:", "(controller default)", w),
    }
    kv_indent("registry_env:", &config.registry_env, w);
    kv_indent("hand_off:", config.hand_off, w);

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for p in &problems {
            println!("  - {p}");
        }
    }
    Ok(())
}
