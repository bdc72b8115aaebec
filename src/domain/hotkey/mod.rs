//! Hotkey domain: combinations, modifier tracking, matching, and the
//! registry the listener matches against.

pub mod combination;
pub mod entry;
pub mod event;
pub mod matcher;
pub mod modifier;
pub mod registry;

pub use combination::Combination;
pub use entry::HotkeyEntry;
pub use event::{KeyDirection, KeyEvent};
pub use matcher::find_match;
pub use modifier::{KeyDisposition, Modifier, ModifierState};
pub use registry::{HotkeyRegistry, ListenerImpact, Snapshot};
