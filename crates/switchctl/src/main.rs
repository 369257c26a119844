//! switchctl — turn Wemo/Tapo smart plugs on and off by name.
//!
//! Normalizes the device name and state, then hands control to the
//! configured device-control program. Its exit status becomes ours.

use std::path::{Path, PathBuf};

use clap::Parser;
use clap::error::ErrorKind;

use switchctl_lib::SwitchError;
use switchctl_lib::error::exit_codes;
use switchctl_lib::usage;

mod cli;

#[derive(Parser)]
#[command(
    name = "switchctl",
    version,
    about = "Turn Wemo/Tapo smart plugs on and off by name",
    after_help = usage::EXAMPLES
)]
pub(crate) struct Args {
    /// Device name (quote it, or use hyphens for spaces; case-insensitive)
    device: Option<String>,

    /// on, off, enable or disable (case-insensitive)
    state: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the device-controller command instead of running it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output as JSON (for --dry-run and --show-config)
    #[arg(long)]
    json: bool,

    /// Show configuration file location and effective settings
    #[arg(long)]
    show_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Name the binary was invoked as, for the usage block.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "switchctl".into())
}

/// Print the diagnostic for `e` and return the exit status to use.
fn report(e: &SwitchError, program: &str) -> i32 {
    match e {
        // The controller has already written its own diagnostics.
        SwitchError::CollaboratorFailure { .. } => {}
        _ if e.wants_usage() => {
            eprintln!("Error: {e}");
            eprintln!();
            eprint!("{}", usage::usage(program));
        }
        _ => eprintln!("Error: {e}"),
    }
    e.exit_code()
}

fn main() {
    let program = program_name();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let rendered = e.render().to_string();
            eprintln!("{}", rendered.lines().next().unwrap_or_default());
            eprintln!();
            eprint!("{}", usage::usage(&program));
            std::process::exit(exit_codes::USAGE);
        }
    };

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let code = match cli::run(&args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => report(&e, &program),
    };
    std::process::exit(code);
}
