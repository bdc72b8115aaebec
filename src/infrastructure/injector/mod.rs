//! Input injector adapters

pub mod enigo;

pub use self::enigo::EnigoInjector;
