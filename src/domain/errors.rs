//! Domain errors for logfan.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by logger construction and configuration.
///
/// Per-record emission never returns these; sink faults are isolated
/// inside the logger that owns the sink.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log level: {0}. Must be one of: debug, info, warning, error, critical")]
    InvalidLevel(String),

    #[error("Failed to create log directory {}: {source}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open log file {}: {source}", path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Global logger registry is already initialized")]
    AlreadyInitialized,
}

/// Result alias used throughout the crate.
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_error_names_path() {
        let err = LogError::LogDirectory {
            path: PathBuf::from("/nowhere/logs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let message = err.to_string();
        assert!(message.contains("/nowhere/logs"));
        assert!(message.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_level_message() {
        let err = LogError::InvalidLevel("loud".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid log level: loud. Must be one of: debug, info, warning, error, critical"
        );
    }
}
