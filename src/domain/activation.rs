//! Activation value objects

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::hotkey::HotkeyEntry;
use crate::domain::transform::OutputKind;

/// A successfully matched combination, queued for execution.
///
/// A self-contained value copied onto the dispatch queue; it carries the
/// payload the pipeline needs so later registry edits cannot affect an
/// activation already in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Action name, used for routing and display
    pub action: String,
    /// Prompt text for the transform provider
    pub prompt: String,
    /// Source kind for the pipeline
    pub output: OutputKind,
    /// Canonical combination string, for dedup and display
    pub combination: String,
}

impl Activation {
    /// Build an activation from a matched registry entry
    pub fn from_entry(entry: &HotkeyEntry) -> Self {
        Self {
            action: entry.name.clone(),
            prompt: entry.prompt.clone(),
            output: entry.output,
            combination: entry.combination.canonical(),
        }
    }

    /// The dedup record for this activation at the current wall-clock time
    pub fn record(&self) -> ActivationRecord {
        ActivationRecord {
            action: self.action.clone(),
            combination: self.combination.clone(),
            bucket: epoch_seconds(),
        }
    }
}

/// Dedup key for activations: the same chord observed twice within the
/// same wall-clock second (e.g. the raw event plus an echo) is treated as
/// one physical press. Suppression aid only, not a dispatch correctness
/// mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivationRecord {
    pub action: String,
    pub combination: String,
    pub bucket: u64,
}

/// Current wall-clock time as whole seconds since the epoch
pub fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
