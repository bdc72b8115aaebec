//! Hotkey entry value object

use serde::{Deserialize, Serialize};

use super::combination::Combination;
use crate::domain::transform::OutputKind;

/// A registered hotkey: a combination bound to a transform action.
///
/// The action name is the routing key; prompt, output kind, provider
/// override, and accent color are opaque payload carried through to the
/// execution pipeline and the observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyEntry {
    /// The key combination that triggers this action
    pub combination: Combination,
    /// Action name, used for routing and display
    pub name: String,
    /// Prompt text prefixed to the clipboard content for the provider
    pub prompt: String,
    /// Whether the source is clipboard text or a clipboard image
    #[serde(default)]
    pub output: OutputKind,
    /// Accent color for display (hex, e.g. "#A3BFFA"); opaque metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HotkeyEntry {
    /// Create a text-output entry with no accent color
    pub fn new(
        combination: Combination,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            combination,
            name: name.into(),
            prompt: prompt.into(),
            output: OutputKind::Text,
            color: None,
        }
    }

    /// Set the output kind
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    /// Set the accent color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
