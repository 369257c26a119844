//! Unified error type for the switchctl-lib crate.
//!
//! [`SwitchError`] covers argument validation (`Usage`, `InvalidArgument`),
//! collaborator hand-off (`CollaboratorUnavailable`, `CollaboratorFailure`),
//! configuration problems and plain I/O. Each variant maps to a documented
//! process exit status via [`SwitchError::exit_code`].

use std::fmt;

/// Process exit statuses (sysexits.h values where one applies).
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    /// EX_USAGE: the command was used incorrectly.
    pub const USAGE: i32 = 64;
    /// EX_UNAVAILABLE: the device controller could not be started.
    pub const UNAVAILABLE: i32 = 69;
    /// EX_CONFIG: the configuration file is missing or invalid.
    pub const CONFIG: i32 = 78;
}

/// Unified error type for switchctl-lib operations.
#[derive(Debug)]
pub enum SwitchError {
    /// A required argument is missing or blank.
    Usage(String),
    /// An argument is present but cannot be used (empty key, unknown state).
    InvalidArgument(String),
    /// The device controller program is missing or not executable.
    CollaboratorUnavailable {
        program: String,
        source: std::io::Error,
    },
    /// The device controller ran and exited with a non-zero status.
    CollaboratorFailure { status: i32 },
    /// Configuration could not be loaded or failed validation.
    Config(String),
    /// Standard I/O error (progress output, process spawn).
    Io(std::io::Error),
}

impl SwitchError {
    /// Exit status the binary should terminate with for this error.
    ///
    /// A collaborator failure propagates the collaborator's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            SwitchError::Usage(_) | SwitchError::InvalidArgument(_) => exit_codes::USAGE,
            SwitchError::CollaboratorUnavailable { .. } => exit_codes::UNAVAILABLE,
            SwitchError::CollaboratorFailure { status } => *status,
            SwitchError::Config(_) => exit_codes::CONFIG,
            SwitchError::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether the usage block should accompany this error.
    pub fn wants_usage(&self) -> bool {
        matches!(self, SwitchError::Usage(_) | SwitchError::InvalidArgument(_))
    }
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchError::Usage(e) => write!(f, "{e}"),
            SwitchError::InvalidArgument(e) => write!(f, "Invalid argument: {e}"),
            SwitchError::CollaboratorUnavailable { program, source } => {
                write!(f, "Device controller unavailable: {program}: {source}")
            }
            SwitchError::CollaboratorFailure { status } => {
                write!(f, "Device controller exited with status {status}")
            }
            SwitchError::Config(e) => write!(f, "Config error: {e}"),
            SwitchError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SwitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwitchError::CollaboratorUnavailable { source, .. } => Some(source),
            SwitchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SwitchError {
    fn from(e: std::io::Error) -> Self {
        SwitchError::Io(e)
    }
}

/// Crate-level Result alias using [`SwitchError`].
pub type Result<T> = std::result::Result<T, SwitchError>;
