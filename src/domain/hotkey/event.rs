//! Raw key event value object

/// Direction of a raw key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Down,
    Up,
}

/// A raw key event from the OS input source.
///
/// The token is a normalized lowercase identifier ("f1", "c", "ctrl_l");
/// tokens the adapter could not normalize are passed through raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub token: String,
    pub direction: KeyDirection,
}

impl KeyEvent {
    /// Create a key-down event
    pub fn down(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            direction: KeyDirection::Down,
        }
    }

    /// Create a key-up event
    pub fn up(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            direction: KeyDirection::Up,
        }
    }
}
