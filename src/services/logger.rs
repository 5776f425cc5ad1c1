//! Logger handle and the emission API shared by every logger-like value.

use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::domain::level::Level;
use crate::domain::ports::Sink;
use crate::domain::record::{FailureDetail, Fields, LogRecord, SourceLocation};
use crate::domain::sink::SinkKind;

/// Named logger fanning records out to its sinks
///
/// Handles are created by `LoggerRegistry` and shared as `Arc<Logger>`.
/// Configuration is fixed at construction.
pub struct Logger {
    name: String,
    level: Level,
    sinks: Vec<Box<dyn Sink>>,
    sink_failures: AtomicU64,
}

impl Logger {
    pub fn new(name: impl Into<String>, level: Level, sinks: Vec<Box<dyn Sink>>) -> Self {
        Self {
            name: name.into(),
            level,
            sinks,
            sink_failures: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overall minimum level, applied before any sink filter.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Records never bubble to a parent logger.
    pub const fn propagates(&self) -> bool {
        false
    }

    pub fn sinks(&self) -> &[Box<dyn Sink>] {
        &self.sinks
    }

    pub fn sink_kinds(&self) -> Vec<SinkKind> {
        self.sinks.iter().map(|sink| sink.kind()).collect()
    }

    /// Number of sink writes that failed since creation.
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    /// Offer a record to every sink; returns how many sinks persisted it
    ///
    /// A failing sink is counted and reported, the remaining sinks still
    /// receive the record.
    pub fn dispatch(&self, record: &LogRecord) -> usize {
        if record.level < self.level {
            return 0;
        }

        let mut delivered = 0;
        for sink in &self.sinks {
            if !sink.accepts(record.level) {
                continue;
            }
            match sink.write(record) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    self.sink_failures.fetch_add(1, Ordering::Relaxed);
                    error!(
                        logger = %self.name,
                        sink = %sink.kind(),
                        error = %err,
                        "sink failed to write record"
                    );
                }
            }
        }
        delivered
    }

    /// Flush every sink, reporting failures without stopping.
    pub fn flush(&self) {
        for sink in &self.sinks {
            if let Err(err) = sink.flush() {
                error!(logger = %self.name, sink = %sink.kind(), error = %err, "sink flush failed");
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("sinks", &self.sink_kinds())
            .field("sink_failures", &self.sink_failures())
            .finish()
    }
}

/// Emission API
///
/// Implemented by `Logger`, by references and `Arc`s to any emitter, and by
/// `ContextLogger`. Messages are any `Display` value, so templates are
/// written with `format!`/`format_args!` at the call site. The call site
/// is recorded as the source location.
pub trait Emit {
    /// Logger name stamped on records.
    fn name(&self) -> &str;

    /// Whether a record at `level` would pass the logger's own filter.
    fn enabled(&self, level: Level) -> bool;

    /// Hand a fully built record to the sinks.
    fn submit(&self, record: LogRecord);

    /// Start building a record at `level`.
    #[track_caller]
    fn record(&self, level: Level, message: impl fmt::Display) -> RecordBuilder<'_, Self>
    where
        Self: Sized,
    {
        let record = LogRecord::new(level, self.name(), message.to_string())
            .with_location(SourceLocation::from(Location::caller()));
        RecordBuilder {
            target: self,
            record,
        }
    }

    /// Emit with extra structured fields.
    #[track_caller]
    fn log(&self, level: Level, message: impl fmt::Display, fields: Fields)
    where
        Self: Sized,
    {
        self.record(level, message).fields(fields).emit();
    }

    #[track_caller]
    fn debug(&self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.record(Level::Debug, message).emit();
    }

    #[track_caller]
    fn info(&self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.record(Level::Info, message).emit();
    }

    #[track_caller]
    fn warning(&self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.record(Level::Warning, message).emit();
    }

    #[track_caller]
    fn error(&self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.record(Level::Error, message).emit();
    }

    #[track_caller]
    fn critical(&self, message: impl fmt::Display)
    where
        Self: Sized,
    {
        self.record(Level::Critical, message).emit();
    }

    /// Error-level record carrying the error's cause chain.
    #[track_caller]
    fn exception(&self, message: impl fmt::Display, failure: &(dyn StdError + 'static))
    where
        Self: Sized,
    {
        self.record(Level::Error, message).failure(failure).emit();
    }
}

impl Emit for Logger {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn submit(&self, record: LogRecord) {
        self.dispatch(&record);
    }
}

impl<T: Emit + ?Sized> Emit for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn submit(&self, record: LogRecord) {
        (**self).submit(record);
    }
}

impl<T: Emit + ?Sized> Emit for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn submit(&self, record: LogRecord) {
        (**self).submit(record);
    }
}

/// Record under construction, emitted with `emit()`
#[must_use = "records are only written when `emit` is called"]
pub struct RecordBuilder<'a, E: Emit + ?Sized> {
    target: &'a E,
    record: LogRecord,
}

impl<E: Emit + ?Sized> RecordBuilder<'_, E> {
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.fields.insert(key, value);
        self
    }

    /// Merge a set of fields; later keys win.
    pub fn fields(mut self, fields: Fields) -> Self {
        self.record.fields.merge(&fields);
        self
    }

    pub fn failure(self, failure: &(dyn StdError + 'static)) -> Self {
        self.failure_detail(FailureDetail::from_error(failure))
    }

    pub fn failure_detail(mut self, failure: FailureDetail) -> Self {
        self.record.failure = Some(failure);
        self
    }

    /// Override the recorded call site.
    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.record.location = location;
        self
    }

    pub fn emit(self) {
        if self.target.enabled(self.record.level) {
            self.target.submit(self.record);
        }
    }
}
