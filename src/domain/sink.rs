use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::level::Level;

/// Default size threshold before a log file is rotated (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups kept next to the live file
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// The kinds of sink a logger can fan out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    Console,
    PlainFile,
    JsonFile,
    ErrorFile,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Console => "console",
            Self::PlainFile => "plain_file",
            Self::JsonFile => "json_file",
            Self::ErrorFile => "error_file",
        };
        f.write_str(name)
    }
}

/// Where a sink writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    Stdout,
    File(PathBuf),
}

/// Size-based rotation policy for file-backed sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPolicy {
    /// Maximum file size in bytes before rotation (0 disables rotation)
    pub max_bytes: u64,
    /// Number of numbered backups to retain (0 disables rotation)
    pub backup_count: usize,
}

impl RotationPolicy {
    pub const fn new(max_bytes: u64, backup_count: usize) -> Self {
        Self {
            max_bytes,
            backup_count,
        }
    }

    /// Whether this policy ever rotates.
    pub const fn is_enabled(&self) -> bool {
        self.max_bytes > 0 && self.backup_count > 0
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES, DEFAULT_BACKUP_COUNT)
    }
}

/// Resolved description of one sink attached to a logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub kind: SinkKind,
    pub target: SinkTarget,
    pub level: Level,
    /// Present for file-backed sinks only
    pub rotation: Option<RotationPolicy>,
}

impl SinkConfig {
    pub const fn console(level: Level) -> Self {
        Self {
            kind: SinkKind::Console,
            target: SinkTarget::Stdout,
            level,
            rotation: None,
        }
    }

    pub fn plain_file(path: impl Into<PathBuf>, level: Level, rotation: RotationPolicy) -> Self {
        Self::file(SinkKind::PlainFile, path.into(), level, rotation)
    }

    pub fn json_file(path: impl Into<PathBuf>, level: Level, rotation: RotationPolicy) -> Self {
        Self::file(SinkKind::JsonFile, path.into(), level, rotation)
    }

    /// Error file sinks are always pinned to `Level::Error`.
    pub fn error_file(path: impl Into<PathBuf>, rotation: RotationPolicy) -> Self {
        Self::file(SinkKind::ErrorFile, path.into(), Level::Error, rotation)
    }

    fn file(kind: SinkKind, path: PathBuf, level: Level, rotation: RotationPolicy) -> Self {
        Self {
            kind,
            target: SinkTarget::File(path),
            level,
            rotation: Some(rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rotation_policy() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.max_bytes, 10 * 1024 * 1024);
        assert_eq!(policy.backup_count, 5);
        assert!(policy.is_enabled());
    }

    #[test]
    fn test_rotation_disabled_by_zero_values() {
        assert!(!RotationPolicy::new(0, 5).is_enabled());
        assert!(!RotationPolicy::new(1024, 0).is_enabled());
    }

    #[test]
    fn test_error_file_pinned_to_error_level() {
        let config = SinkConfig::error_file("logs/error.log", RotationPolicy::default());
        assert_eq!(config.kind, SinkKind::ErrorFile);
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.target, SinkTarget::File(PathBuf::from("logs/error.log")));
    }

    #[test]
    fn test_console_has_no_rotation() {
        let config = SinkConfig::console(Level::Info);
        assert_eq!(config.target, SinkTarget::Stdout);
        assert!(config.rotation.is_none());
    }
}
