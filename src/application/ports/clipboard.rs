//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transform::ClipboardImage;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Port for clipboard operations
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// # Returns
    /// `Ok(None)` when the clipboard holds no text content
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Read the current clipboard image.
    ///
    /// # Returns
    /// `Ok(None)` when the clipboard holds no image content
    async fn read_image(&self) -> Result<Option<ClipboardImage>, ClipboardError>;

    /// Write text to the system clipboard
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl Clipboard for Box<dyn Clipboard> {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }

    async fn read_image(&self) -> Result<Option<ClipboardImage>, ClipboardError> {
        self.as_ref().read_image().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }
}
