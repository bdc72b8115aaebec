//! Cross-platform input injector using enigo
//!
//! Synthesizes the platform copy/paste chord: Cmd+C / Cmd+V on macOS,
//! Ctrl+C / Ctrl+V everywhere else.

use async_trait::async_trait;

use crate::application::ports::{InjectorError, InputInjector};

/// Cross-platform injector adapter using enigo
pub struct EnigoInjector;

impl EnigoInjector {
    /// Create a new enigo injector adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoInjector {
    fn default() -> Self {
        Self::new()
    }
}

/// Press the platform shortcut modifier, click `key`, release.
fn send_chord(key: char) -> Result<(), InjectorError> {
    use enigo::{Direction, Enigo, Key, Keyboard, Settings};

    #[cfg(target_os = "macos")]
    let modifier = Key::Meta;
    #[cfg(not(target_os = "macos"))]
    let modifier = Key::Control;

    let mut enigo = Enigo::new(&Settings::default())
        .map_err(|e| InjectorError::Unavailable(format!("Failed to create enigo: {}", e)))?;

    enigo
        .key(modifier, Direction::Press)
        .map_err(|e| InjectorError::SendFailed(e.to_string()))?;
    let clicked = enigo
        .key(Key::Unicode(key), Direction::Click)
        .map_err(|e| InjectorError::SendFailed(e.to_string()));
    // Always release the modifier, even when the click failed
    let released = enigo
        .key(modifier, Direction::Release)
        .map_err(|e| InjectorError::SendFailed(e.to_string()));

    clicked.and(released)
}

#[async_trait]
impl InputInjector for EnigoInjector {
    async fn simulate_copy(&self) -> Result<(), InjectorError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(|| send_chord('c'))
            .await
            .map_err(|e| InjectorError::SendFailed(format!("Task join error: {}", e)))?
    }

    async fn simulate_paste(&self) -> Result<(), InjectorError> {
        tokio::task::spawn_blocking(|| send_chord('v'))
            .await
            .map_err(|e| InjectorError::SendFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injector_creates_successfully() {
        let _injector = EnigoInjector::new();
    }

    #[test]
    fn injector_default_creates() {
        let _injector = EnigoInjector::default();
    }
}
