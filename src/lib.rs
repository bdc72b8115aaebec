//! Clipforge - AI clipboard transformer driven by global hotkeys
//!
//! This crate listens for configurable global hotkeys, copies the current
//! selection, runs it through an AI transform provider, and pastes the
//! result back.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Hotkey combinations, modifier tracking, matching, the
//!   registry, and activation values
//! - **Application**: The listener/dispatcher/pipeline use cases and port
//!   interfaces (traits)
//! - **Infrastructure**: Adapter implementations (rdev, arboard, enigo,
//!   Gemini/Groq/Ollama, notify-rust, config store)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
