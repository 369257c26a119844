//! Device name normalization.
//!
//! Users type device names however they like: `"My  Desk Lamp"`,
//! `"my--desk-lamp"`, `"MY DESK-LAMP"`. All of these fold to one canonical
//! key, `"my desk lamp"`, which is what gets handed to the device controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwitchError};

/// Characters treated as word separators inside a device name.
fn is_separator(c: char) -> bool {
    c == '-' || c.is_whitespace()
}

/// Fold a raw device name into its canonical form.
///
/// Lower-cases the whole string and collapses every run of hyphens and/or
/// whitespace into a single space. Leading and trailing separators vanish.
/// The result may be empty; [`DeviceKey::parse`] rejects that case.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a [`DeviceKey`] is rendered on the controller's command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    /// Words separated by single spaces: `my desk lamp`.
    #[default]
    Spaced,
    /// Words separated by single hyphens: `my-desk-lamp`.
    Hyphenated,
}

impl fmt::Display for KeyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStyle::Spaced => write!(f, "spaced"),
            KeyStyle::Hyphenated => write!(f, "hyphenated"),
        }
    }
}

/// A canonical, non-empty device lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceKey(String);

impl DeviceKey {
    /// Normalize `raw` into a key.
    ///
    /// Fails with [`SwitchError::InvalidArgument`] when nothing but separators
    /// remains (e.g. `"  "`, `"--"`, `" - "`).
    pub fn parse(raw: &str) -> Result<Self> {
        let key = normalize(raw);
        if key.is_empty() {
            return Err(SwitchError::InvalidArgument(format!(
                "device name \"{raw}\" has no usable characters"
            )));
        }
        Ok(DeviceKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key with hyphens in place of spaces.
    pub fn hyphenated(&self) -> String {
        self.0.replace(' ', "-")
    }

    /// Render the key in the requested style.
    pub fn render(&self, style: KeyStyle) -> String {
        match style {
            KeyStyle::Spaced => self.0.clone(),
            KeyStyle::Hyphenated => self.hyphenated(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_is_folded() {
        assert_eq!(normalize("HUTCH LIGHTS"), "hutch lights");
        assert_eq!(normalize("hutch lights"), "hutch lights");
        assert_eq!(normalize("HuTcH LiGhTs"), "hutch lights");
    }

    #[test]
    fn hyphen_and_space_runs_are_equivalent() {
        for raw in ["Hutch-Lights", "Hutch  Lights", "hutch--lights", "hutch lights"] {
            assert_eq!(normalize(raw), "hutch lights", "input: {raw:?}");
        }
    }

    #[test]
    fn desk_lamp_variants_share_a_key() {
        for raw in ["My  Desk Lamp", "my--desk-Lamp", "My--Desk-lamp"] {
            assert_eq!(normalize(raw), "my desk lamp", "input: {raw:?}");
        }
    }

    #[test]
    fn mixed_separator_run_collapses() {
        assert_eq!(normalize("desk - lamp"), "desk lamp");
        assert_eq!(normalize("desk\t-\tlamp"), "desk lamp");
    }

    #[test]
    fn outer_separators_are_dropped() {
        assert_eq!(normalize("  lamp  "), "lamp");
        assert_eq!(normalize("-lamp-"), "lamp");
    }

    #[test]
    fn unicode_is_lowercased() {
        assert_eq!(normalize("KÜCHE Licht"), "küche licht");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["My  Desk Lamp", "a--B  c", "-x-", "already canonical"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn separators_only_normalize_to_empty() {
        assert_eq!(normalize("---"), "");
        assert_eq!(normalize(" - "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn parse_rejects_empty_key() {
        for raw in ["", "   ", "--", " - "] {
            let err = DeviceKey::parse(raw).unwrap_err();
            assert!(matches!(err, SwitchError::InvalidArgument(_)), "input: {raw:?}");
        }
    }

    #[test]
    fn parse_accepts_name() {
        let key = DeviceKey::parse("My  Desk Lamp").unwrap();
        assert_eq!(key.as_str(), "my desk lamp");
        assert_eq!(key.to_string(), "my desk lamp");
    }

    #[test]
    fn hyphenated_rendering() {
        let key = DeviceKey::parse("My Desk Lamp").unwrap();
        assert_eq!(key.hyphenated(), "my-desk-lamp");
        assert_eq!(key.render(KeyStyle::Hyphenated), "my-desk-lamp");
        assert_eq!(key.render(KeyStyle::Spaced), "my desk lamp");
    }

    #[test]
    fn key_style_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            style: KeyStyle,
        }
        let w: Wrapper = toml::from_str("style = \"hyphenated\"").unwrap();
        assert_eq!(w.style, KeyStyle::Hyphenated);
    }
}
