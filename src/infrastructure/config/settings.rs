use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::sink::{RotationPolicy, DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};

/// Environment value that switches on production defaults
pub const PRODUCTION: &str = "production";

/// Process-level logging settings
///
/// Field names double as the recognized environment keys
/// (`LOG_LEVEL`, `FILE_LOG_LEVEL`, ...), matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogSettings {
    /// Overall minimum level for new loggers
    #[serde(default = "default_level", deserialize_with = "deserialize_level")]
    pub log_level: String,

    /// Minimum level for the plain and JSON file sinks
    #[serde(default = "default_level", deserialize_with = "deserialize_level")]
    pub file_log_level: String,

    /// Minimum level for the console sink
    #[serde(default = "default_level", deserialize_with = "deserialize_level")]
    pub console_log_level: String,

    /// Deployment environment name (`development`, `production`, ...)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Force JSON file output even when a logger disables it
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub use_json_format: bool,

    /// Directory holding `app.log`, `error.log` and `app.json.log`
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Rotation threshold in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Rotated backups kept per file
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
}

impl LogSettings {
    /// Settings rooted at a specific log directory, everything else default.
    pub fn in_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(PRODUCTION)
    }

    /// JSON file output is forced by the flag or by a production environment.
    pub fn json_forced(&self) -> bool {
        self.use_json_format || self.is_production()
    }

    pub const fn rotation(&self) -> RotationPolicy {
        RotationPolicy::new(self.max_bytes, self.backup_count)
    }

    pub fn plain_log_path(&self) -> PathBuf {
        self.log_dir.join("app.log")
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.log_dir.join("error.log")
    }

    pub fn json_log_path(&self) -> PathBuf {
        self.log_dir.join("app.json.log")
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_level: default_level(),
            file_log_level: default_level(),
            console_log_level: default_level(),
            environment: default_environment(),
            use_json_format: false,
            log_dir: default_log_dir(),
            max_bytes: default_max_bytes(),
            backup_count: default_backup_count(),
        }
    }
}

fn default_level() -> String {
    "DEBUG".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

const fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

const fn default_backup_count() -> usize {
    DEFAULT_BACKUP_COUNT
}

/// Accept level names as well as the numeric values `10`..`50`.
fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LevelValue {
        Number(i64),
        Text(String),
    }

    Ok(match LevelValue::deserialize(deserializer)? {
        LevelValue::Number(value) => value.to_string(),
        LevelValue::Text(text) => text,
    })
}

/// Accept booleans, numbers (non-zero is true) and `"true"`/`"1"`/`"yes"` text
///
/// Unrecognized text reads as false.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Number(value) => Ok(value != 0.0),
        Flag::Text(text) => Ok(matches!(
            text.trim().to_lowercase().as_str(),
            "true" | "1" | "yes"
        )),
    }
}
