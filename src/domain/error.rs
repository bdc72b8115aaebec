//! Domain error types

use thiserror::Error;

/// Error when parsing a combination string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombinationParseError {
    #[error("Empty combination. Expected format: [modifier+]key (e.g. ctrl+f1, alt+shift+k, f5)")]
    Empty,

    #[error("Combination \"{input}\" has no terminal key. The last token must be a non-modifier key")]
    MissingTerminal { input: String },

    #[error("Combination \"{input}\" has more than one terminal key")]
    MultipleTerminals { input: String },
}

/// Error when mutating the hotkey registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Combination \"{combination}\" is already bound to another action")]
    DuplicateCombination { combination: String },

    #[error("No action named \"{name}\" is registered")]
    UnknownAction { name: String },
}

/// Error when an invalid output kind is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid output kind: \"{input}\". Valid kinds are: text, image")]
pub struct InvalidOutputKindError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
