//! Lasercut Settings Crate
//!
//! Loads and saves the pricing constants and parser behaviour used to
//! produce quotes.

pub mod config;
pub mod error;

pub use config::{Config, ParserSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
