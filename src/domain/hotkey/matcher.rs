//! Combo matcher
//!
//! Pure matching of a terminal key against a registry snapshot. All state
//! (modifiers, snapshot) is passed in, so the function is directly
//! testable against literal triples.

use super::entry::HotkeyEntry;
use super::modifier::ModifierState;

/// Find the entry matching a terminal key under the live modifier state.
///
/// The terminal token is lowercased before comparison; equality is exact
/// token-for-token (no prefix or range matching). Modifier requirements
/// must equal the live flags exactly, which also means a bare-key entry
/// only fires while no modifier is held.
///
/// If several entries match (which the registry's uniqueness invariant
/// should prevent), the first in snapshot order wins.
pub fn find_match<'a>(
    terminal: &str,
    state: &ModifierState,
    snapshot: &'a [HotkeyEntry],
) -> Option<&'a HotkeyEntry> {
    let terminal = terminal.trim().to_lowercase();
    snapshot
        .iter()
        .find(|entry| entry.combination.matches(&terminal, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(combo: &str, name: &str) -> HotkeyEntry {
        HotkeyEntry::new(combo.parse().unwrap(), name, format!("{name}: "))
    }

    fn ctrl() -> ModifierState {
        ModifierState {
            ctrl: true,
            ..Default::default()
        }
    }

    #[test]
    fn modified_and_bare_entries_disambiguate() {
        let snapshot = vec![entry("ctrl+f1", "Fix"), entry("f1", "Bare")];

        let hit = find_match("f1", &ctrl(), &snapshot).unwrap();
        assert_eq!(hit.name, "Fix");

        let hit = find_match("f1", &ModifierState::default(), &snapshot).unwrap();
        assert_eq!(hit.name, "Bare");
    }

    #[test]
    fn terminal_is_normalized() {
        let snapshot = vec![entry("ctrl+f1", "Fix")];
        assert!(find_match("F1", &ctrl(), &snapshot).is_some());
        assert!(find_match(" f1 ", &ctrl(), &snapshot).is_some());
    }

    #[test]
    fn f10_never_matches_f1() {
        let snapshot = vec![entry("ctrl+f1", "Fix")];
        assert!(find_match("f10", &ctrl(), &snapshot).is_none());
    }

    #[test]
    fn digit_never_matches_function_key() {
        let snapshot = vec![entry("ctrl+f1", "Fix")];
        assert!(find_match("1", &ctrl(), &snapshot).is_none());

        let snapshot = vec![entry("ctrl+1", "One")];
        assert!(find_match("f1", &ctrl(), &snapshot).is_none());
    }

    #[test]
    fn extra_modifier_disqualifies() {
        let snapshot = vec![entry("ctrl+f1", "Fix")];
        let ctrl_alt = ModifierState {
            ctrl: true,
            alt: true,
            ..Default::default()
        };
        assert!(find_match("f1", &ctrl_alt, &snapshot).is_none());
    }

    #[test]
    fn missing_modifier_disqualifies() {
        let snapshot = vec![entry("ctrl+shift+f1", "Fix")];
        assert!(find_match("f1", &ctrl(), &snapshot).is_none());
    }

    #[test]
    fn first_match_wins_on_defensive_tie() {
        // Duplicate combinations cannot be registered, but the tie-break
        // is still defined behavior
        let snapshot = vec![entry("ctrl+f1", "First"), entry("ctrl+f1", "Second")];
        let hit = find_match("f1", &ctrl(), &snapshot).unwrap();
        assert_eq!(hit.name, "First");
    }

    #[test]
    fn empty_snapshot_matches_nothing() {
        assert!(find_match("f1", &ctrl(), &[]).is_none());
    }
}
