//! Configuration management infrastructure
//!
//! Hierarchical settings using figment:
//! - Programmatic defaults
//! - Optional YAML file
//! - Environment variable overrides
//! - Validation of level names and paths

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, SettingsLoader};
pub use settings::LogSettings;
