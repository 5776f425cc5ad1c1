//! Infrastructure layer module
//!
//! Adapters satisfying the domain ports:
//! - Configuration management (figment)
//! - Sinks, formatting and file rotation
//!
//! Nothing here knows about logger names or the registry.

pub mod config;
pub mod logging;
