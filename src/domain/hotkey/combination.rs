//! Combination value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::modifier::{Modifier, ModifierState};
use crate::domain::error::CombinationParseError;

/// A normalized hotkey combination: zero or more modifiers plus exactly
/// one terminal key.
///
/// Parsed from strings like `"Ctrl+F1"` or `"ctrl+shift+k"`. Tokens are
/// lowercased and modifiers are ordered canonically (ctrl, alt, shift), so
/// `"Shift+Ctrl+F1"` and `"ctrl+shift+f1"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    ctrl: bool,
    alt: bool,
    shift: bool,
    terminal: String,
}

impl Combination {
    /// The terminal (non-modifier) key token
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// Whether the combination requires ctrl
    pub fn requires_ctrl(&self) -> bool {
        self.ctrl
    }

    /// Whether the combination requires alt
    pub fn requires_alt(&self) -> bool {
        self.alt
    }

    /// Whether the combination requires shift
    pub fn requires_shift(&self) -> bool {
        self.shift
    }

    /// Whether the combination is a bare key with no modifiers
    pub fn is_bare(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    /// Check this combination against a terminal key and the live modifier
    /// state.
    ///
    /// The terminal must match token-for-token (exact equality, so "f1"
    /// never matches "f10" and "1" never matches "f1"), and each required
    /// modifier must equal the live flag exactly: no extra modifiers
    /// tolerated, none missing. A bare combination therefore matches only
    /// while all three flags are false.
    pub fn matches(&self, terminal: &str, state: &ModifierState) -> bool {
        self.terminal == terminal
            && self.ctrl == state.ctrl
            && self.alt == state.alt
            && self.shift == state.shift
    }

    /// The canonical string form, e.g. `"ctrl+shift+f1"`
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Combination {
    type Err = CombinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CombinationParseError::Empty);
        }

        let mut ctrl = false;
        let mut alt = false;
        let mut shift = false;
        let mut terminal: Option<String> = None;

        for token in normalized.split('+') {
            let token = token.trim();
            if token.is_empty() {
                return Err(CombinationParseError::Empty);
            }

            match Modifier::from_token(token) {
                Some(Modifier::Ctrl) => ctrl = true,
                Some(Modifier::Alt) => alt = true,
                Some(Modifier::Shift) => shift = true,
                None => {
                    if terminal.is_some() {
                        return Err(CombinationParseError::MultipleTerminals {
                            input: s.to_string(),
                        });
                    }
                    terminal = Some(token.to_string());
                }
            }
        }

        // A combination made of modifiers alone has no terminal to fire on
        let terminal = terminal.ok_or_else(|| CombinationParseError::MissingTerminal {
            input: s.to_string(),
        })?;

        Ok(Self {
            ctrl,
            alt,
            shift,
            terminal,
        })
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        write!(f, "{}", self.terminal)
    }
}

impl Serialize for Combination {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for Combination {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
