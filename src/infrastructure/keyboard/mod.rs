//! Keyboard event source adapters

pub mod rdev;

pub use self::rdev::RdevKeySource;
