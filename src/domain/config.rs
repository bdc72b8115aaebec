//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::hotkey::HotkeyEntry;
use crate::domain::transform::OutputKind;

/// Gemini provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Groq provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Ollama provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub host: Option<String>,
    pub model: Option<String>,
}

/// Per-provider credential and model settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub gemini: Option<GeminiConfig>,
    pub groq: Option<GroqConfig>,
    pub ollama: Option<OllamaConfig>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Active transform provider: "gemini", "groq", or "ollama"
    pub provider: Option<String>,
    /// Show desktop notifications on completion and failure
    pub notify: Option<bool>,
    /// Per-provider settings
    pub providers: Option<ProvidersConfig>,
    /// Registered hotkeys
    pub hotkeys: Option<Vec<HotkeyEntry>>,
}

impl AppConfig {
    /// Create config with default values, including the starter hotkey set
    pub fn defaults() -> Self {
        Self {
            provider: Some("gemini".to_string()),
            notify: Some(false),
            providers: Some(ProvidersConfig {
                gemini: Some(GeminiConfig {
                    api_key: None,
                    model: Some("gemini-2.0-flash".to_string()),
                }),
                groq: Some(GroqConfig {
                    api_key: None,
                    model: Some("llama-3.1-8b-instant".to_string()),
                }),
                ollama: Some(OllamaConfig {
                    host: Some("http://localhost:11434".to_string()),
                    model: Some("llama3".to_string()),
                }),
            }),
            hotkeys: Some(Self::default_hotkeys()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The starter hotkey table written by `config init`
    pub fn default_hotkeys() -> Vec<HotkeyEntry> {
        fn entry(combo: &str, name: &str, prompt: &str, color: &str) -> HotkeyEntry {
            HotkeyEntry::new(
                combo.parse().expect("default combination parses"),
                name,
                prompt,
            )
            .with_color(color)
        }

        vec![
            entry(
                "ctrl+f1",
                "Fix",
                "Correct the spelling and grammar of the following text. \
                 Reply with the corrected text only: ",
                "#FFFFFF",
            ),
            entry(
                "ctrl+f2",
                "Rewrite",
                "Rewrite the following text so it reads clearly and naturally. \
                 Reply with the rewritten text only: ",
                "#A3BFFA",
            ),
            entry(
                "ctrl+f3",
                "Translate",
                "Translate the following text to English. \
                 Reply with the translation only: ",
                "#FBB6CE",
            ),
            entry(
                "ctrl+f6",
                "Explain",
                "Explain the following text in simple words: ",
                "#FAF089",
            ),
            entry(
                "ctrl+f7",
                "Answer",
                "Answer the following question concisely: ",
                "#FBD38D",
            ),
            entry(
                "ctrl+f10",
                "Describe Image",
                "Describe the contents of this image: ",
                "#A1CFF9",
            )
            .with_output(OutputKind::Image),
        ]
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: other.provider.or(self.provider),
            notify: other.notify.or(self.notify),
            providers: Self::merge_providers(self.providers, other.providers),
            hotkeys: other.hotkeys.or(self.hotkeys),
        }
    }

    fn merge_providers(
        base: Option<ProvidersConfig>,
        other: Option<ProvidersConfig>,
    ) -> Option<ProvidersConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ProvidersConfig {
                gemini: o.gemini.or(b.gemini),
                groq: o.groq.or(b.groq),
                ollama: o.ollama.or(b.ollama),
            }),
        }
    }

    /// Get the active provider name, or the default
    pub fn provider_or_default(&self) -> &str {
        self.provider.as_deref().unwrap_or("gemini")
    }

    /// Get the notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get the hotkey list, or an empty one
    pub fn hotkeys_or_default(&self) -> Vec<HotkeyEntry> {
        self.hotkeys.clone().unwrap_or_default()
    }
}
