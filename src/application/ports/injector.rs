//! Input injector port interface

use async_trait::async_trait;
use thiserror::Error;

/// Input injection errors
#[derive(Debug, Clone, Error)]
pub enum InjectorError {
    #[error("Input injection unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to inject keystrokes: {0}")]
    SendFailed(String),
}

/// Port for synthesizing the platform copy/paste shortcuts.
///
/// Fire-and-forget from the pipeline's point of view: a failure is
/// reported but is not necessarily fatal to the surrounding activation.
#[async_trait]
pub trait InputInjector: Send + Sync {
    /// Simulate the platform copy shortcut (Ctrl+C / Cmd+C)
    async fn simulate_copy(&self) -> Result<(), InjectorError>;

    /// Simulate the platform paste shortcut (Ctrl+V / Cmd+V)
    async fn simulate_paste(&self) -> Result<(), InjectorError>;
}

/// Blanket implementation for boxed injector types
#[async_trait]
impl InputInjector for Box<dyn InputInjector> {
    async fn simulate_copy(&self) -> Result<(), InjectorError> {
        self.as_ref().simulate_copy().await
    }

    async fn simulate_paste(&self) -> Result<(), InjectorError> {
        self.as_ref().simulate_paste().await
    }
}
