//! Configuration management module

pub mod loader;
pub mod validation;

pub use loader::Settings;
pub use validation::{SettingsError, validate_settings};
