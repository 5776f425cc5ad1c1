//! Port traits implemented by the infrastructure layer.

use std::io;

use super::level::Level;
use super::record::LogRecord;
use super::sink::SinkKind;

/// A destination that renders and persists records
///
/// Implementations own their formatter and minimum level. They must be
/// safe to call from many threads; any serialization of the underlying
/// destination happens inside `write`.
pub trait Sink: Send + Sync {
    /// Kind of sink, used in diagnostics.
    fn kind(&self) -> SinkKind;

    /// Minimum level this sink persists.
    fn level(&self) -> Level;

    /// Render and persist one record.
    fn write(&self, record: &LogRecord) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&self) -> io::Result<()>;

    /// Whether a record at `level` passes this sink's filter.
    fn accepts(&self, level: Level) -> bool {
        level >= self.level()
    }
}
