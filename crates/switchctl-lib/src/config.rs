//! Controller configuration — TOML-based, platform-aware paths.
//!
//! Describes how to reach the external device controller: which program to
//! run, which flags carry the device key and state, and where the device
//! registry lives. The loaded [`Config`] is handed to the dispatcher at
//! construction; nothing else reads the environment for these settings.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwitchError};
use crate::name::KeyStyle;
use crate::state::StateTokens;

/// How control passes to the device controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandOff {
    /// Replace the current process image (Unix). Falls back to `Wait` elsewhere.
    #[default]
    Exec,
    /// Spawn the controller, wait, and mirror its exit status.
    Wait,
}

impl fmt::Display for HandOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandOff::Exec => write!(f, "exec"),
            HandOff::Wait => write!(f, "wait"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Device controller executable. Default: "wemo".
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the device/command flags
    /// (e.g. `["/opt/wemo/cli.py"]` when `program` is `python3`).
    #[serde(default)]
    pub args: Vec<String>,

    /// Flag preceding the device key. Default: "--device".
    #[serde(default = "default_device_flag")]
    pub device_flag: String,

    /// Flag preceding the state token. Default: "--command".
    #[serde(default = "default_command_flag")]
    pub command_flag: String,

    /// Send `on`/`off` ("canonical") or the token as typed ("verbatim").
    #[serde(default)]
    pub state_tokens: StateTokens,

    /// Render the device key with spaces ("spaced") or hyphens ("hyphenated").
    #[serde(default)]
    pub device_key: KeyStyle,

    /// Device registry file. Empty = let the controller use its own default.
    #[serde(default)]
    pub registry_path: String,

    /// Environment variable used to pass `registry_path` to the controller.
    #[serde(default = "default_registry_env")]
    pub registry_env: String,

    /// "exec" or "wait".
    #[serde(default)]
    pub hand_off: HandOff,
}

fn default_program() -> String {
    "wemo".into()
}
fn default_device_flag() -> String {
    "--device".into()
}
fn default_command_flag() -> String {
    "--command".into()
}
fn default_registry_env() -> String {
    "WEMO_REGISTRY".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            program: default_program(),
            args: Vec::new(),
            device_flag: default_device_flag(),
            command_flag: default_command_flag(),
            state_tokens: StateTokens::default(),
            device_key: KeyStyle::default(),
            registry_path: String::new(),
            registry_env: default_registry_env(),
            hand_off: HandOff::default(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `program` field is empty or whitespace-only.
    EmptyProgram,
    /// A flag field is empty (`field` is `"device_flag"` or `"command_flag"`).
    EmptyFlag { field: &'static str },
    /// `device_flag` and `command_flag` are the same string.
    DuplicateFlags(String),
    /// `registry_path` is set but `registry_env` is empty.
    EmptyRegistryEnv,
    /// `registry_env` contains `=` or NUL, which no environment variable name can hold.
    InvalidRegistryEnv(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyProgram => write!(f, "program cannot be empty"),
            ValidationError::EmptyFlag { field } => write!(f, "{field} cannot be empty"),
            ValidationError::DuplicateFlags(flag) => {
                write!(f, "device_flag and command_flag are both \"{flag}\"")
            }
            ValidationError::EmptyRegistryEnv => {
                write!(f, "registry_env cannot be empty when registry_path is set")
            }
            ValidationError::InvalidRegistryEnv(name) => {
                write!(f, "registry_env {name:?} cannot contain '=' or NUL")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("switchctl"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from the default path, or return defaults if not found.
    /// Parse problems are logged and fall back to defaults.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Load a config file the user named explicitly. Unlike [`Config::load_from`],
    /// a missing or malformed file is an error rather than a silent fallback.
    pub fn load_explicit(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SwitchError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| SwitchError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// The registry location, if one is configured.
    pub fn registry(&self) -> Option<PathBuf> {
        let path = self.registry_path.trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.program.trim().is_empty() {
            errors.push(ValidationError::EmptyProgram);
        }

        if self.device_flag.trim().is_empty() {
            errors.push(ValidationError::EmptyFlag {
                field: "device_flag",
            });
        }
        if self.command_flag.trim().is_empty() {
            errors.push(ValidationError::EmptyFlag {
                field: "command_flag",
            });
        }
        if !self.device_flag.trim().is_empty() && self.device_flag == self.command_flag {
            errors.push(ValidationError::DuplicateFlags(self.device_flag.clone()));
        }

        if self.registry().is_some() && self.registry_env.trim().is_empty() {
            errors.push(ValidationError::EmptyRegistryEnv);
        }
        if self.registry_env.contains(['=', '\0']) {
            errors.push(ValidationError::InvalidRegistryEnv(self.registry_env.clone()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// [`Config::validate`] folded into a single [`SwitchError::Config`].
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(|errors| {
            let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            SwitchError::Config(joined.join("; "))
        })
    }
}
