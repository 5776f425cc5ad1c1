//! In-memory sinks for unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::level::Level;
use crate::domain::ports::Sink;
use crate::domain::record::LogRecord;
use crate::domain::sink::SinkKind;

pub type Captured = Arc<Mutex<Vec<LogRecord>>>;

/// Sink that keeps every accepted record in memory
pub struct MemorySink {
    level: Level,
    records: Captured,
}

impl MemorySink {
    pub fn new(level: Level) -> (Self, Captured) {
        let records = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                level,
                records: Arc::clone(&records),
            },
            records,
        )
    }
}

impl Sink for MemorySink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn level(&self) -> Level {
        self.level
    }

    fn write(&self, record: &LogRecord) -> io::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
