use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use super::settings::LogSettings;
use crate::domain::errors::LogError;
use crate::domain::level::Level;

/// Optional project-local settings file, merged under the environment
pub const SETTINGS_FILE: &str = "logfan.yaml";

/// Environment keys recognized by the loader
pub const ENV_KEYS: [&str; 5] = [
    "LOG_LEVEL",
    "FILE_LOG_LEVEL",
    "CONSOLE_LOG_LEVEL",
    "ENVIRONMENT",
    "USE_JSON_FORMAT",
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {field}: {value}. Must be one of: debug, info, warning, error, critical")]
    InvalidLogLevel { field: &'static str, value: String },

    #[error("Log directory cannot be empty")]
    EmptyLogDir,

    #[error("Failed to extract settings: {0}")]
    Extract(#[from] Box<figment::Error>),
}

impl From<ConfigError> for LogError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidLogLevel { value, .. } => Self::InvalidLevel(value),
            other => Self::Configuration(other.to_string()),
        }
    }
}

/// Settings loader with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `logfan.yaml` in the working directory (optional)
    /// 3. Raw environment variables (`LOG_LEVEL`, `ENVIRONMENT`, ...)
    pub fn load() -> Result<LogSettings, ConfigError> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(LogSettings::default()))
                .merge(Yaml::file(SETTINGS_FILE))
                .merge(Env::raw().only(&ENV_KEYS)),
        )
    }

    /// Load settings from a specific YAML file, ignoring the environment
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<LogSettings, ConfigError> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(LogSettings::default()))
                .merge(Yaml::file(path.as_ref())),
        )
    }

    fn extract(figment: Figment) -> Result<LogSettings, ConfigError> {
        let settings: LogSettings = figment.extract().map_err(Box::new)?;
        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &LogSettings) -> Result<(), ConfigError> {
        let levels = [
            ("log_level", &settings.log_level),
            ("file_log_level", &settings.file_log_level),
            ("console_log_level", &settings.console_log_level),
        ];
        for (field, value) in levels {
            if value.parse::<Level>().is_err() {
                return Err(ConfigError::InvalidLogLevel {
                    field,
                    value: value.clone(),
                });
            }
        }

        if settings.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyLogDir);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::path::PathBuf;

    #[test]
    fn test_default_settings_are_valid() {
        SettingsLoader::validate(&LogSettings::default()).expect("Default settings should be valid");
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("LOG_LEVEL", "info");
            jail.set_env("CONSOLE_LOG_LEVEL", "WARNING");
            jail.set_env("ENVIRONMENT", "production");

            let settings = SettingsLoader::load().expect("settings should load");
            assert_eq!(settings.log_level, "info");
            assert_eq!(settings.console_log_level, "WARNING");
            assert_eq!(settings.file_log_level, "DEBUG");
            assert!(settings.is_production());
            assert!(settings.json_forced());
            Ok(())
        });
    }

    #[test]
    fn test_use_json_format_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("USE_JSON_FORMAT", "true");

            let settings = SettingsLoader::load().expect("settings should load");
            assert!(settings.use_json_format);
            assert!(!settings.is_production());
            assert!(settings.json_forced());
            Ok(())
        });
    }

    #[test]
    fn test_numeric_env_levels() {
        Jail::expect_with(|jail| {
            jail.set_env("LOG_LEVEL", "20");
            jail.set_env("FILE_LOG_LEVEL", "40");

            let settings = SettingsLoader::load().expect("settings should load");
            assert_eq!(settings.log_level, "20");
            assert_eq!(settings.log_level.parse::<Level>().unwrap(), Level::Info);
            assert_eq!(settings.file_log_level.parse::<Level>().unwrap(), Level::Error);
            Ok(())
        });
    }

    #[test]
    fn test_numeric_env_level_out_of_range_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("LOG_LEVEL", "25");

            assert!(matches!(
                SettingsLoader::load(),
                Err(ConfigError::InvalidLogLevel { field: "log_level", .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_use_json_format_flag_spellings_from_env() {
        for (raw, expected) in [
            ("1", true),
            ("0", false),
            ("TRUE", true),
            ("yes", true),
            ("no", false),
            ("whatever", false),
        ] {
            Jail::expect_with(|jail| {
                jail.set_env("USE_JSON_FORMAT", raw);

                let settings = SettingsLoader::load().expect("settings should load");
                assert_eq!(settings.use_json_format, expected, "USE_JSON_FORMAT={raw}");
                Ok(())
            });
        }
    }

    #[test]
    fn test_unrelated_env_keys_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("LOG_DIR", "/should/not/apply");
            jail.set_env("BACKUP_COUNT", "99");

            let settings = SettingsLoader::load().expect("settings should load");
            assert_eq!(settings.log_dir, PathBuf::from("logs"));
            assert_eq!(settings.backup_count, 5);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_level_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("FILE_LOG_LEVEL", "chatty");

            match SettingsLoader::load() {
                Err(ConfigError::InvalidLogLevel { field, value }) => {
                    assert_eq!(field, "file_log_level");
                    assert_eq!(value, "chatty");
                }
                other => panic!("Expected InvalidLogLevel, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn test_project_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                SETTINGS_FILE,
                "log_level: warning\nlog_dir: var/logs\nmax_bytes: 2048\nbackup_count: 2\n",
            )?;
            jail.set_env("LOG_LEVEL", "error");

            let settings = SettingsLoader::load().expect("settings should load");
            assert_eq!(settings.log_level, "error", "Environment should win");
            assert_eq!(settings.log_dir, PathBuf::from("var/logs"));
            assert_eq!(settings.max_bytes, 2048);
            assert_eq!(settings.backup_count, 2);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "environment: production\nconsole_log_level: info").unwrap();
        file.flush().unwrap();

        let settings = SettingsLoader::load_from_file(file.path()).unwrap();
        assert!(settings.is_production());
        assert_eq!(settings.console_log_level, "info");
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_validate_empty_log_dir() {
        let settings = LogSettings {
            log_dir: PathBuf::new(),
            ..LogSettings::default()
        };

        assert!(matches!(
            SettingsLoader::validate(&settings),
            Err(ConfigError::EmptyLogDir)
        ));
    }

    #[test]
    fn test_config_error_converts_to_log_error() {
        let err: LogError = ConfigError::InvalidLogLevel {
            field: "log_level",
            value: "nope".to_string(),
        }
        .into();
        assert!(matches!(err, LogError::InvalidLevel(ref v) if v == "nope"));

        let err: LogError = ConfigError::EmptyLogDir.into();
        assert!(matches!(err, LogError::Configuration(_)));
    }
}
