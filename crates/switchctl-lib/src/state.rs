//! Desired switch state parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SwitchError;

/// A requested state, as typed by the user.
///
/// `Enable` and `Disable` are aliases of `On` and `Off`; the distinction is
/// kept so the literal token can be forwarded when the controller wants it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateCommand {
    On,
    Off,
    Enable,
    Disable,
}

/// Which tokens are sent to the device controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateTokens {
    /// Always `on` / `off`.
    #[default]
    Canonical,
    /// The lower-cased token as typed (`enable`, `disable`, ...).
    Verbatim,
}

impl fmt::Display for StateTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateTokens::Canonical => write!(f, "canonical"),
            StateTokens::Verbatim => write!(f, "verbatim"),
        }
    }
}

impl StateCommand {
    /// Whether this command switches the device on.
    pub fn is_on(self) -> bool {
        matches!(self, StateCommand::On | StateCommand::Enable)
    }

    /// `"on"` or `"off"`.
    pub fn canonical(self) -> &'static str {
        if self.is_on() { "on" } else { "off" }
    }

    /// The lower-cased token this command was parsed from.
    pub fn token(self) -> &'static str {
        match self {
            StateCommand::On => "on",
            StateCommand::Off => "off",
            StateCommand::Enable => "enable",
            StateCommand::Disable => "disable",
        }
    }

    pub fn render(self, tokens: StateTokens) -> &'static str {
        match tokens {
            StateTokens::Canonical => self.canonical(),
            StateTokens::Verbatim => self.token(),
        }
    }
}

impl FromStr for StateCommand {
    type Err = SwitchError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" => Ok(StateCommand::On),
            "off" => Ok(StateCommand::Off),
            "enable" => Ok(StateCommand::Enable),
            "disable" => Ok(StateCommand::Disable),
            _ => Err(SwitchError::InvalidArgument(format!(
                "unknown state \"{}\" (expected one of: on, off, enable, disable)",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for StateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_tokens_case_insensitively() {
        let cases = [
            ("on", StateCommand::On),
            ("ON", StateCommand::On),
            ("Off", StateCommand::Off),
            ("enable", StateCommand::Enable),
            ("Enable", StateCommand::Enable),
            ("DISABLE", StateCommand::Disable),
            ("  off ", StateCommand::Off),
        ];
        for (raw, expected) in cases {
            assert_eq!(raw.parse::<StateCommand>().unwrap(), expected, "input: {raw:?}");
        }
    }

    #[test]
    fn turn_on_synonyms_agree() {
        for raw in ["ON", "on", "enable", "Enable"] {
            let cmd: StateCommand = raw.parse().unwrap();
            assert!(cmd.is_on());
            assert_eq!(cmd.canonical(), "on");
        }
    }

    #[test]
    fn turn_off_synonyms_agree() {
        for raw in ["OFF", "off", "disable", "Disable"] {
            let cmd: StateCommand = raw.parse().unwrap();
            assert!(!cmd.is_on());
            assert_eq!(cmd.canonical(), "off");
        }
    }

    #[test]
    fn rejects_unknown_tokens() {
        for raw in ["maybe", "", "1", "onn", "toggle"] {
            let err = raw.parse::<StateCommand>().unwrap_err();
            assert!(matches!(err, SwitchError::InvalidArgument(_)), "input: {raw:?}");
        }
    }

    #[test]
    fn error_lists_accepted_tokens() {
        let err = "maybe".parse::<StateCommand>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("maybe"));
        assert!(msg.contains("on, off, enable, disable"));
    }

    #[test]
    fn render_respects_token_style() {
        let cmd: StateCommand = "Enable".parse().unwrap();
        assert_eq!(cmd.render(StateTokens::Canonical), "on");
        assert_eq!(cmd.render(StateTokens::Verbatim), "enable");

        let cmd: StateCommand = "DISABLE".parse().unwrap();
        assert_eq!(cmd.render(StateTokens::Canonical), "off");
        assert_eq!(cmd.render(StateTokens::Verbatim), "disable");
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(StateCommand::Enable.to_string(), "on");
        assert_eq!(StateCommand::Off.to_string(), "off");
    }
}
