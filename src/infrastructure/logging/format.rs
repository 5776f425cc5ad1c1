//! Format catalog
//!
//! Templates for the three output shapes:
//! - Console: `{ts} [{LEVEL:<8}] {name}: {message}`, colored per level
//! - Text file: `{ts} [{LEVEL:<8}] {name} ({file}:{line}) - {message}`
//! - JSON lines: `timestamp`, `name`, `level`, `message` plus extra fields
//!
//! Timestamps are local time with millisecond precision.

use console::Style;
use serde_json::{Map, Value};

use crate::domain::level::Level;
use crate::domain::record::LogRecord;

/// Timestamp layout shared by every format
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Keys every JSON line carries; extra fields never replace them
pub const JSON_BASE_KEYS: [&str; 4] = ["timestamp", "name", "level", "message"];

/// Key holding the failure trace in JSON output
pub const JSON_FAILURE_KEY: &str = "exc_info";

/// Palette used by the console format.
pub fn level_style(level: Level) -> Style {
    match level {
        Level::Debug => Style::new().cyan(),
        Level::Info => Style::new().green(),
        Level::Warning => Style::new().yellow(),
        Level::Error => Style::new().red(),
        Level::Critical => Style::new().red().on_white(),
    }
}

/// Renders a record into one output entry (without trailing newline)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Console line; `colored` forces ANSI styling on or off
    Console { colored: bool },
    /// Human-readable file line with source location
    Text,
    /// One JSON object per line
    Json,
}

impl Formatter {
    pub fn render(&self, record: &LogRecord) -> serde_json::Result<String> {
        match self {
            Self::Console { colored } => Ok(render_console(record, *colored)),
            Self::Text => Ok(render_text(record)),
            Self::Json => render_json(record),
        }
    }
}

fn timestamp(record: &LogRecord) -> String {
    record.timestamp.format(DATE_FORMAT).to_string()
}

fn append_failure(line: &mut String, record: &LogRecord) {
    if let Some(failure) = &record.failure {
        line.push('\n');
        line.push_str(&failure.trace);
    }
}

pub fn render_console(record: &LogRecord, colored: bool) -> String {
    let mut line = format!(
        "{} [{:<8}] {}: {}",
        timestamp(record),
        record.level,
        record.logger,
        record.message
    );
    append_failure(&mut line, record);

    if colored {
        level_style(record.level).force_styling(true).apply_to(line).to_string()
    } else {
        line
    }
}

pub fn render_text(record: &LogRecord) -> String {
    let location = record
        .location
        .map_or_else(|| "unknown".to_string(), |loc| loc.to_string());
    let mut line = format!(
        "{} [{:<8}] {} ({}) - {}",
        timestamp(record),
        record.level,
        record.logger,
        location,
        record.message
    );
    append_failure(&mut line, record);
    line
}

pub fn render_json(record: &LogRecord) -> serde_json::Result<String> {
    let mut object = Map::new();
    object.insert("timestamp".into(), Value::String(timestamp(record)));
    object.insert("name".into(), Value::String(record.logger.clone()));
    object.insert("level".into(), Value::String(record.level.as_str().into()));
    object.insert("message".into(), Value::String(record.message.clone()));

    for (key, value) in record.fields.iter() {
        if JSON_BASE_KEYS.contains(&key.as_str()) {
            continue;
        }
        object.insert(key.clone(), value.clone());
    }

    if let Some(failure) = &record.failure {
        object.insert(JSON_FAILURE_KEY.into(), Value::String(failure.trace.clone()));
    }

    serde_json::to_string(&Value::Object(object))
}
