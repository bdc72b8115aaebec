//! Modifier key state tracking
//!
//! Tracks the live ctrl/alt/shift state from a stream of raw key events.
//! Left and right variants of a modifier fold into the same flag.

use std::fmt;

/// The three modifiers a combination can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

impl Modifier {
    /// Classify a normalized key token as a modifier.
    ///
    /// Accepts both the physical variants ("ctrl_l", "ctrl_r") and the
    /// bare modifier name ("ctrl") used in combination strings.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ctrl" | "ctrl_l" | "ctrl_r" => Some(Self::Ctrl),
            "alt" | "alt_l" | "alt_r" => Some(Self::Alt),
            "shift" | "shift_l" | "shift_r" => Some(Self::Shift),
            _ => None,
        }
    }

    /// Get the canonical token used in combination strings
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the tracker decided about a key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key was a modifier; state updated, not a combination terminal
    Consumed,
    /// The key is a candidate terminal for combination matching
    Terminal,
}

/// Live state of the three modifier keys.
///
/// Owned exclusively by the listener task; the matcher reads it by
/// reference within the same serial context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ModifierState {
    /// Process a key-down event.
    ///
    /// Modifier tokens set their flag and are consumed; all other tokens
    /// (including unrecognized ones) pass through unchanged as candidate
    /// terminal keys.
    pub fn on_key_down(&mut self, token: &str) -> KeyDisposition {
        match Modifier::from_token(token) {
            Some(Modifier::Ctrl) => {
                self.ctrl = true;
                KeyDisposition::Consumed
            }
            Some(Modifier::Alt) => {
                self.alt = true;
                KeyDisposition::Consumed
            }
            Some(Modifier::Shift) => {
                self.shift = true;
                KeyDisposition::Consumed
            }
            None => KeyDisposition::Terminal,
        }
    }

    /// Process a key-up event.
    ///
    /// Releasing either variant of a modifier always clears its flag.
    pub fn on_key_up(&mut self, token: &str) -> KeyDisposition {
        match Modifier::from_token(token) {
            Some(Modifier::Ctrl) => {
                self.ctrl = false;
                KeyDisposition::Consumed
            }
            Some(Modifier::Alt) => {
                self.alt = false;
                KeyDisposition::Consumed
            }
            Some(Modifier::Shift) => {
                self.shift = false;
                KeyDisposition::Consumed
            }
            None => KeyDisposition::Terminal,
        }
    }

    /// Clear all three flags.
    ///
    /// Called after a successful match: the consuming chord is spent, so a
    /// held modifier cannot re-arm another combination without a physical
    /// release in between.
    pub fn clear(&mut self) {
        self.ctrl = false;
        self.alt = false;
        self.shift = false;
    }

    /// Check if any modifier is currently held
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift
    }
}
