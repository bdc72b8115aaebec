//! Terminal observer
//!
//! Renders pipeline events to the terminal: status lines on stderr,
//! result text on stdout. Each action's accent color comes from its
//! registry entry at render time, so a recolor takes effect immediately
//! without a listener restart.

use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;

use crate::application::ports::{CompletionResult, Observer, ObserverEvent};
use crate::domain::hotkey::HotkeyRegistry;

/// Colored terminal renderer for pipeline events
pub struct TerminalObserver {
    registry: Option<Arc<HotkeyRegistry>>,
}

impl TerminalObserver {
    /// Create an observer without accent colors
    pub fn new() -> Self {
        Self { registry: None }
    }

    /// Create an observer that looks up per-action accent colors
    pub fn with_registry(registry: Arc<HotkeyRegistry>) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Render an action name in its accent color, if it has one
    fn paint(&self, action: &str) -> colored::ColoredString {
        let accent = self
            .registry
            .as_ref()
            .and_then(|r| r.find(action))
            .and_then(|e| e.color)
            .and_then(|c| parse_hex(&c));

        match accent {
            Some((r, g, b)) => action.truecolor(r, g, b),
            None => action.cyan(),
        }
    }
}

impl Default for TerminalObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a "#RRGGBB" hex color
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[async_trait]
impl Observer for TerminalObserver {
    async fn notify(&self, event: ObserverEvent) {
        match event {
            ObserverEvent::ActivationStarted {
                action,
                combination,
            } => {
                eprintln!("{} [{}] {}", "▸".cyan(), combination, self.paint(&action));
            }
            ObserverEvent::PhaseWarning {
                action,
                phase,
                message,
            } => {
                eprintln!(
                    "{} {} {}: {}",
                    "⚠".yellow(),
                    self.paint(&action),
                    phase,
                    message
                );
            }
            ObserverEvent::PhaseFailed {
                action,
                phase,
                message,
            } => {
                eprintln!(
                    "{} {} failed at {}: {}",
                    "✗".red(),
                    self.paint(&action),
                    phase,
                    message
                );
            }
            ObserverEvent::Completed {
                action,
                result,
                elapsed,
            } => {
                eprintln!(
                    "{} {} completed in {:.2}s",
                    "✓".green(),
                    self.paint(&action),
                    elapsed.as_secs_f64()
                );
                match result {
                    CompletionResult::Text(text) => println!("{}", text),
                    CompletionResult::Redacted => {
                        eprintln!("{}", "(image result pasted)".dimmed());
                    }
                    CompletionResult::Empty => {
                        eprintln!("{}", "(empty result, nothing pasted)".dimmed());
                    }
                }
            }
            ObserverEvent::ActivationDropped { action, reason } => {
                eprintln!("{} {} dropped: {}", "⚠".yellow(), self.paint(&action), reason);
            }
            ObserverEvent::SubscriptionAbandoned => {
                eprintln!(
                    "{} {}",
                    "⚠".yellow(),
                    "old key subscription did not stop in time; abandoned"
                );
            }
            ObserverEvent::HotkeysDisabled { reason } => {
                eprintln!("{} hotkeys disabled: {}", "✗".red(), reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colors() {
        assert_eq!(parse_hex("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#a3bffa"), Some((0xa3, 0xbf, 0xfa)));
        assert_eq!(parse_hex("FFFFFF"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }

    #[tokio::test]
    async fn renders_without_panicking() {
        let observer = TerminalObserver::new();
        observer
            .notify(ObserverEvent::ActivationStarted {
                action: "Fix".to_string(),
                combination: "ctrl+f1".to_string(),
            })
            .await;
        observer
            .notify(ObserverEvent::Completed {
                action: "Fix".to_string(),
                result: CompletionResult::Empty,
                elapsed: std::time::Duration::from_millis(120),
            })
            .await;
    }
}
