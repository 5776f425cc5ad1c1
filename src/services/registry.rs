//! Logger registry
//!
//! Maps logger names to configured `Logger` handles. A name is initialized
//! at most once: the check-then-create sequence runs under one lock, and a
//! second request for the same name returns the cached handle regardless
//! of the options it carries.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{LogError, LogResult};
use crate::domain::level::Level;
use crate::domain::ports::Sink;
use crate::domain::sink::{SinkConfig, SinkKind, SinkTarget};
use crate::infrastructure::config::{LogSettings, SettingsLoader};
use crate::infrastructure::logging::{ConsoleSink, FileSink, RotatingFile, SharedFile};

use super::logger::Logger;

/// Per-logger construction options
///
/// Unset levels fall back to the registry settings. Level names are
/// validated when the logger is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    pub level: Option<String>,
    pub console_level: Option<String>,
    pub file_level: Option<String>,
    pub enable_console: bool,
    pub enable_file: bool,
    pub enable_error_file: bool,
    pub enable_json_file: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: None,
            console_level: None,
            file_level: None,
            enable_console: true,
            enable_file: true,
            enable_error_file: true,
            enable_json_file: true,
        }
    }
}

impl LoggerOptions {
    #[must_use]
    pub fn level(mut self, level: impl ToString) -> Self {
        self.level = Some(level.to_string());
        self
    }

    #[must_use]
    pub fn console_level(mut self, level: impl ToString) -> Self {
        self.console_level = Some(level.to_string());
        self
    }

    #[must_use]
    pub fn file_level(mut self, level: impl ToString) -> Self {
        self.file_level = Some(level.to_string());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.enable_console = enabled;
        self
    }

    #[must_use]
    pub const fn file(mut self, enabled: bool) -> Self {
        self.enable_file = enabled;
        self
    }

    #[must_use]
    pub const fn error_file(mut self, enabled: bool) -> Self {
        self.enable_error_file = enabled;
        self
    }

    #[must_use]
    pub const fn json_file(mut self, enabled: bool) -> Self {
        self.enable_json_file = enabled;
        self
    }
}

/// Registry of named loggers sharing one settings snapshot
///
/// Loggers writing the same file path share a single rotating appender,
/// so rotation and writes stay serialized per file.
pub struct LoggerRegistry {
    settings: LogSettings,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    files: Mutex<HashMap<PathBuf, SharedFile>>,
}

impl LoggerRegistry {
    /// Build a registry, rejecting invalid settings up front.
    pub fn new(settings: LogSettings) -> LogResult<Self> {
        SettingsLoader::validate(&settings)?;
        Ok(Self::unchecked(settings))
    }

    /// Build a registry from environment (and optional `logfan.yaml`) settings.
    pub fn from_env() -> LogResult<Self> {
        let settings = SettingsLoader::load()?;
        Ok(Self::unchecked(settings))
    }

    fn unchecked(settings: LogSettings) -> Self {
        Self {
            settings,
            loggers: Mutex::new(HashMap::new()),
            files: Mutex::new(HashMap::new()),
        }
    }

    pub const fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Get or create a logger with default options.
    pub fn get_logger(&self, name: &str) -> LogResult<Arc<Logger>> {
        self.get_logger_with(name, &LoggerOptions::default())
    }

    /// Get or create a logger
    ///
    /// An existing handle is returned unchanged; `options` only apply to
    /// the first request for a name. Failures leave nothing cached.
    pub fn get_logger_with(&self, name: &str, options: &LoggerOptions) -> LogResult<Arc<Logger>> {
        let mut loggers = lock(&self.loggers);
        if let Some(existing) = loggers.get(name) {
            return Ok(Arc::clone(existing));
        }

        let level = resolve_level(options.level.as_deref(), &self.settings.log_level)?;
        let plan = self.plan_sinks(options)?;

        fs::create_dir_all(&self.settings.log_dir).map_err(|source| LogError::LogDirectory {
            path: self.settings.log_dir.clone(),
            source,
        })?;

        let sinks = plan
            .iter()
            .map(|config| self.build_sink(config))
            .collect::<LogResult<Vec<_>>>()?;

        let logger = Arc::new(Logger::new(name, level, sinks));
        loggers.insert(name.to_string(), Arc::clone(&logger));

        debug!(
            logger = name,
            level = %level,
            sinks = ?logger.sink_kinds(),
            "logger created"
        );

        Ok(logger)
    }

    /// Resolve options into the sinks a new logger would get
    ///
    /// Order: console, plain file, JSON file, error file.
    pub fn plan_sinks(&self, options: &LoggerOptions) -> LogResult<Vec<SinkConfig>> {
        let settings = &self.settings;
        let console_level =
            resolve_level(options.console_level.as_deref(), &settings.console_log_level)?;
        let file_level = resolve_level(options.file_level.as_deref(), &settings.file_log_level)?;
        let rotation = settings.rotation();

        let mut plan = Vec::with_capacity(4);
        if options.enable_console {
            plan.push(SinkConfig::console(console_level));
        }
        if options.enable_file {
            plan.push(SinkConfig::plain_file(
                settings.plain_log_path(),
                file_level,
                rotation,
            ));
        }
        if options.enable_json_file || settings.json_forced() {
            plan.push(SinkConfig::json_file(
                settings.json_log_path(),
                file_level,
                rotation,
            ));
        }
        if options.enable_error_file {
            plan.push(SinkConfig::error_file(settings.error_log_path(), rotation));
        }
        Ok(plan)
    }

    fn build_sink(&self, config: &SinkConfig) -> LogResult<Box<dyn Sink>> {
        let sink: Box<dyn Sink> = match &config.target {
            SinkTarget::Stdout => Box::new(ConsoleSink::stdout(config.level)),
            SinkTarget::File(path) => {
                let file = self.shared_file(path, config)?;
                match config.kind {
                    SinkKind::JsonFile => Box::new(FileSink::json(config.level, file)),
                    SinkKind::ErrorFile => Box::new(FileSink::errors(file)),
                    SinkKind::PlainFile | SinkKind::Console => {
                        Box::new(FileSink::plain(config.level, file))
                    }
                }
            }
        };
        Ok(sink)
    }

    fn shared_file(&self, path: &Path, config: &SinkConfig) -> LogResult<SharedFile> {
        let mut files = lock(&self.files);
        if let Some(existing) = files.get(path) {
            return Ok(Arc::clone(existing));
        }

        let policy = config.rotation.unwrap_or_else(|| self.settings.rotation());
        let file = RotatingFile::open(path, policy)
            .map_err(|source| LogError::OpenSink {
                path: path.to_path_buf(),
                source,
            })?
            .shared();
        files.insert(path.to_path_buf(), Arc::clone(&file));
        Ok(file)
    }

    pub fn contains(&self, name: &str) -> bool {
        lock(&self.loggers).contains_key(name)
    }

    /// Registered logger names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = lock(&self.loggers).keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        lock(&self.loggers).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.loggers).is_empty()
    }

    /// Flush every sink of every registered logger.
    pub fn flush_all(&self) {
        let loggers: Vec<_> = lock(&self.loggers).values().cloned().collect();
        for logger in loggers {
            logger.flush();
        }
    }
}

fn resolve_level(requested: Option<&str>, fallback: &str) -> LogResult<Level> {
    requested.unwrap_or(fallback).parse()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
