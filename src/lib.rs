//! Logfan - structured logging façade
//!
//! Logfan configures named loggers that fan every record out to several
//! sinks: a colored console, a rotating plain-text file, a rotating JSON
//! lines file and a rotating error-only file.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): levels, records, sink configuration, errors
//! - **Infrastructure Layer** (`infrastructure`): settings, formats, rotation, sinks
//! - **Service Layer** (`services`): registry, logger handles, timing, context
//! - **CLI Layer** (`cli`): the `logfan` demo binary
//!
//! # Example
//!
//! ```no_run
//! use logfan::{with_context, with_timing, Emit, Fields, LogSettings, LoggerOptions, LoggerRegistry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = LoggerRegistry::new(LogSettings::in_dir("logs"))?;
//!     let logger = registry.get_logger_with("svc", &LoggerOptions::default().console(false))?;
//!
//!     logger.log(logfan::Level::Error, "disk full", Fields::new().with("volume", "/data"));
//!
//!     let rows: Result<usize, std::io::Error> = with_timing(&logger).run("load_rows", || Ok(3));
//!     let ctx = with_context(&logger, [("request_id", "r-1")]);
//!     ctx.info(format_args!("loaded {} rows", rows?));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    FailureDetail, Fields, Level, LogError, LogRecord, LogResult, RotationPolicy, Sink,
    SinkConfig, SinkKind, SinkTarget, SourceLocation,
};
pub use infrastructure::config::{ConfigError, LogSettings, SettingsLoader};
pub use services::facade::{
    critical, debug, default_context, default_logger, default_timing, error, get_logger, global,
    info, init, warning, DEFAULT_LOGGER,
};
pub use services::{
    scoped, with_context, with_timing, ContextLogger, Emit, Logger, LoggerOptions,
    LoggerRegistry, RecordBuilder, Timing,
};
