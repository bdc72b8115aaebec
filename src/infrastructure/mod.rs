//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the OS (keyboard hook, clipboard, key injection)
//! and the transform provider APIs.

pub mod clipboard;
pub mod config;
pub mod injector;
pub mod keyboard;
pub mod observer;
pub mod provider;

// Re-export adapters
pub use clipboard::ArboardClipboard;
pub use config::XdgConfigStore;
pub use injector::EnigoInjector;
pub use keyboard::RdevKeySource;
pub use observer::{NotifyRustObserver, ObserverSet, TerminalObserver};
pub use provider::{create_provider, GeminiProvider, GroqProvider, OllamaProvider, ProviderKind};
