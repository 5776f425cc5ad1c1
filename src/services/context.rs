//! Scoped context injection
//!
//! A `ContextLogger` is a derived view over a logger that merges a fixed
//! set of fields into every record it emits. The view is immutable, never
//! touches the underlying logger's configuration, and ends when dropped.

use crate::domain::level::Level;
use crate::domain::record::{Fields, LogRecord};

use super::logger::Emit;

/// Logger view carrying context fields
#[derive(Debug, Clone)]
pub struct ContextLogger<L> {
    inner: L,
    fields: Fields,
}

/// Derive a context-bound view of `logger`
///
/// Pass `&logger` to borrow it for a block, or an `Arc<Logger>` to own one.
pub fn with_context<L: Emit>(logger: L, fields: impl Into<Fields>) -> ContextLogger<L> {
    ContextLogger {
        inner: logger,
        fields: fields.into(),
    }
}

/// Run `body` with a context-bound view that is dropped on every exit path.
pub fn scoped<L, R, F>(logger: &L, fields: impl Into<Fields>, body: F) -> R
where
    L: Emit,
    F: FnOnce(&ContextLogger<&L>) -> R,
{
    let context = with_context(logger, fields);
    body(&context)
}

impl<L: Emit> ContextLogger<L> {
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    pub const fn inner(&self) -> &L {
        &self.inner
    }

    /// Nested scope over the same logger; `more` wins over this scope's fields.
    pub fn with_context(&self, more: impl Into<Fields>) -> ContextLogger<&L> {
        let mut fields = self.fields.clone();
        fields.merge(&more.into());
        ContextLogger {
            inner: &self.inner,
            fields,
        }
    }
}

impl<L: Emit> Emit for ContextLogger<L> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn submit(&self, mut record: LogRecord) {
        record.fields.merge(&self.fields);
        self.inner.submit(record);
    }
}
