//! Clipboard adapters

mod arboard;

pub use arboard::ArboardClipboard;
