//! Hotkey registry
//!
//! A mutable table of registered combinations, read continuously by the
//! listener while configuration operations mutate it. Readers take
//! copy-on-write snapshots, so an in-flight match never observes a torn
//! entry list.

use std::sync::{Arc, RwLock};

use super::combination::Combination;
use super::entry::HotkeyEntry;
use crate::domain::error::RegistryError;

/// Immutable point-in-time view of the registry, in insertion order
pub type Snapshot = Arc<Vec<HotkeyEntry>>;

/// Whether a registry mutation requires the OS key subscription to be
/// restarted before it takes effect for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the caller decides whether to restart the listener"]
pub enum ListenerImpact {
    /// The combination set changed; restart the listener
    RestartRequired,
    /// Only non-combination fields changed; no restart needed
    InPlace,
}

/// Concurrently-readable hotkey table.
///
/// Every mutation replaces the inner `Arc`, leaving snapshots already
/// handed to the matcher untouched.
#[derive(Debug, Default)]
pub struct HotkeyRegistry {
    entries: RwLock<Snapshot>,
}

impl HotkeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an immutable snapshot for matching
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.read())
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Look up an entry by action name (first match in insertion order)
    pub fn find(&self, name: &str) -> Option<HotkeyEntry> {
        self.read().iter().find(|e| e.name == name).cloned()
    }

    /// Register a new entry.
    ///
    /// Fails with `DuplicateCombination` when the normalized combination
    /// is already bound; the registry is left unchanged.
    pub fn register(&self, entry: HotkeyEntry) -> Result<ListenerImpact, RegistryError> {
        let mut guard = self.write();
        if guard.iter().any(|e| e.combination == entry.combination) {
            return Err(RegistryError::DuplicateCombination {
                combination: entry.combination.canonical(),
            });
        }
        let mut next = guard.as_ref().clone();
        next.push(entry);
        *guard = Arc::new(next);
        Ok(ListenerImpact::RestartRequired)
    }

    /// Remove an entry by action name. Removing an absent name is a no-op.
    pub fn unregister(&self, name: &str) -> ListenerImpact {
        let mut guard = self.write();
        if !guard.iter().any(|e| e.name == name) {
            return ListenerImpact::InPlace;
        }
        let next: Vec<HotkeyEntry> = guard
            .iter()
            .filter(|e| e.name != name)
            .cloned()
            .collect();
        *guard = Arc::new(next);
        ListenerImpact::RestartRequired
    }

    /// Edit an entry's non-combination fields in place.
    ///
    /// The mutator may change name, prompt, output kind, or color; the
    /// combination is preserved regardless of what the mutator does
    /// (rebinding goes through [`rebind`](Self::rebind) so it gets the
    /// duplicate check and the restart signal).
    pub fn update<F>(&self, name: &str, mutator: F) -> Result<ListenerImpact, RegistryError>
    where
        F: FnOnce(&mut HotkeyEntry),
    {
        let mut guard = self.write();
        let mut next = guard.as_ref().clone();
        let entry = next
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| RegistryError::UnknownAction {
                name: name.to_string(),
            })?;

        let combination = entry.combination.clone();
        mutator(entry);
        entry.combination = combination;

        *guard = Arc::new(next);
        Ok(ListenerImpact::InPlace)
    }

    /// Bind an existing action to a new combination.
    ///
    /// Goes through the same duplicate check as `register`.
    pub fn rebind(
        &self,
        name: &str,
        combination: Combination,
    ) -> Result<ListenerImpact, RegistryError> {
        let mut guard = self.write();
        if guard
            .iter()
            .any(|e| e.name != name && e.combination == combination)
        {
            return Err(RegistryError::DuplicateCombination {
                combination: combination.canonical(),
            });
        }

        let mut next = guard.as_ref().clone();
        let entry = next
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| RegistryError::UnknownAction {
                name: name.to_string(),
            })?;
        entry.combination = combination;

        *guard = Arc::new(next);
        Ok(ListenerImpact::RestartRequired)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Snapshot> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Snapshot> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
