//! Desktop notification observer using notify-rust
//!
//! Raises a notification for completions and failures; start and warning
//! events stay in the terminal.

use async_trait::async_trait;

use crate::application::ports::{CompletionResult, Observer, ObserverEvent};

/// Desktop notification observer
pub struct NotifyRustObserver {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustObserver {
    /// Create a new notify-rust observer
    pub fn new() -> Self {
        Self {
            app_name: "Clipforge".to_string(),
        }
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    fn show(&self, summary: String, body: String) {
        let app_name = self.app_name.clone();

        // notify-rust operations can block, so run in spawn_blocking;
        // a failed notification is not worth reporting anywhere
        let _ = tokio::task::spawn_blocking(move || {
            let _ = notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&summary)
                .body(&body)
                .show();
        });
    }
}

impl Default for NotifyRustObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Observer for NotifyRustObserver {
    async fn notify(&self, event: ObserverEvent) {
        match event {
            ObserverEvent::Completed { action, result, .. } => {
                let body = match result {
                    CompletionResult::Text(text) => text,
                    CompletionResult::Redacted => "Image result pasted".to_string(),
                    CompletionResult::Empty => "Empty result, nothing pasted".to_string(),
                };
                self.show(format!("{action} complete"), body);
            }
            ObserverEvent::PhaseFailed {
                action, message, ..
            } => {
                self.show(format!("{action} failed"), message);
            }
            ObserverEvent::HotkeysDisabled { reason } => {
                self.show("Hotkeys disabled".to_string(), reason);
            }
            _ => {}
        }
    }
}
