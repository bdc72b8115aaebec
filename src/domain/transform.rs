//! Transform source value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidOutputKindError;

/// What kind of clipboard content an action consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Copy the current selection and transform the clipboard text
    #[default]
    Text,
    /// Read the clipboard image directly (no copy simulation)
    Image,
}

impl OutputKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = InvalidOutputKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            _ => Err(InvalidOutputKindError {
                input: s.to_string(),
            }),
        }
    }
}

/// A raw RGBA image read from the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: usize,
    pub height: usize,
    /// Tightly packed RGBA8 pixel data, `width * height * 4` bytes
    pub rgba: Vec<u8>,
}

impl ClipboardImage {
    /// Create from raw RGBA pixel data
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// The source material handed to a transform provider
#[derive(Debug, Clone)]
pub enum TransformSource {
    Text(String),
    Image(ClipboardImage),
}

impl TransformSource {
    /// Get the source text, if this is a text source
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }
}
