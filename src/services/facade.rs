//! Process-wide default registry and shortcut functions
//!
//! Library code should prefer an explicit `LoggerRegistry`. The façade
//! exists for binaries and scripts that want `logfan::info("...")`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::error;

use crate::domain::errors::{LogError, LogResult};
use crate::domain::level::Level;
use crate::domain::record::Fields;
use crate::infrastructure::config::LogSettings;

use super::context::{with_context, ContextLogger};
use super::logger::{Emit, Logger};
use super::registry::LoggerRegistry;
use super::timing::{with_timing, Timing};

/// Name of the logger behind the shortcut functions
pub const DEFAULT_LOGGER: &str = "default";

static GLOBAL: OnceLock<LogResult<LoggerRegistry>> = OnceLock::new();

/// Install the process registry explicitly
///
/// Must run before anything touches `global()`.
pub fn init(settings: LogSettings) -> LogResult<&'static LoggerRegistry> {
    let registry = LoggerRegistry::new(settings)?;
    let mut installed = false;
    let global = GLOBAL.get_or_init(|| {
        installed = true;
        Ok(registry)
    });

    match global {
        Ok(registry) if installed => Ok(registry),
        _ => Err(LogError::AlreadyInitialized),
    }
}

/// The process registry, built from environment settings on first use
///
/// Invalid environment settings stick: every later call reports the
/// same fault instead of falling back to defaults.
pub fn global() -> LogResult<&'static LoggerRegistry> {
    GLOBAL
        .get_or_init(LoggerRegistry::from_env)
        .as_ref()
        .map_err(replay)
}

fn replay(err: &LogError) -> LogError {
    match err {
        LogError::InvalidLevel(value) => LogError::InvalidLevel(value.clone()),
        other => LogError::Configuration(other.to_string()),
    }
}

/// Get or create a named logger from the process registry.
pub fn get_logger(name: &str) -> LogResult<Arc<Logger>> {
    global()?.get_logger(name)
}

pub fn default_logger() -> LogResult<Arc<Logger>> {
    get_logger(DEFAULT_LOGGER)
}

/// Execution-time instrumentation bound to the default logger.
pub fn default_timing() -> LogResult<Timing<Arc<Logger>>> {
    Ok(with_timing(default_logger()?))
}

/// Context view over the default logger.
pub fn default_context(fields: impl Into<Fields>) -> LogResult<ContextLogger<Arc<Logger>>> {
    Ok(with_context(default_logger()?, fields))
}

#[track_caller]
fn emit_default(level: Level, message: impl fmt::Display) {
    match default_logger() {
        Ok(logger) => logger.record(level, message).emit(),
        Err(err) => error!(error = %err, "default logger unavailable, record dropped"),
    }
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    emit_default(Level::Debug, message);
}

#[track_caller]
pub fn info(message: impl fmt::Display) {
    emit_default(Level::Info, message);
}

#[track_caller]
pub fn warning(message: impl fmt::Display) {
    emit_default(Level::Warning, message);
}

#[track_caller]
pub fn error(message: impl fmt::Display) {
    emit_default(Level::Error, message);
}

#[track_caller]
pub fn critical(message: impl fmt::Display) {
    emit_default(Level::Critical, message);
}
