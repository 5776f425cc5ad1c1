//! Concrete sinks: colored console and rotating text/JSON files.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::domain::level::Level;
use crate::domain::ports::Sink;
use crate::domain::record::LogRecord;
use crate::domain::sink::SinkKind;

use super::format::Formatter;
use super::rotation::{self, SharedFile};

type BoxedWriter = Box<dyn Write + Send>;

/// Console sink writing colored lines to stdout
pub struct ConsoleSink {
    level: Level,
    formatter: Formatter,
    writer: Mutex<BoxedWriter>,
}

impl ConsoleSink {
    /// Stdout sink; colors follow terminal detection (and `NO_COLOR`).
    pub fn stdout(level: Level) -> Self {
        let colored = console::colors_enabled();
        Self::with_writer(level, Box::new(io::stdout()), colored)
    }

    /// Sink over an arbitrary writer, used for capture in tests and embedding.
    pub fn with_writer(level: Level, writer: BoxedWriter, colored: bool) -> Self {
        Self {
            level,
            formatter: Formatter::Console { colored },
            writer: Mutex::new(writer),
        }
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn level(&self) -> Level {
        self.level
    }

    fn write(&self, record: &LogRecord) -> io::Result<()> {
        let line = self.formatter.render(record).map_err(io::Error::other)?;
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

/// File sink over a rotating file shared with other sinks of the same path
pub struct FileSink {
    kind: SinkKind,
    level: Level,
    formatter: Formatter,
    file: SharedFile,
}

impl FileSink {
    /// Human-readable `app.log` style sink.
    pub const fn plain(level: Level, file: SharedFile) -> Self {
        Self {
            kind: SinkKind::PlainFile,
            level,
            formatter: Formatter::Text,
            file,
        }
    }

    /// `error.log` style sink, pinned to error and above.
    pub const fn errors(file: SharedFile) -> Self {
        Self {
            kind: SinkKind::ErrorFile,
            level: Level::Error,
            formatter: Formatter::Text,
            file,
        }
    }

    /// JSON lines sink.
    pub const fn json(level: Level, file: SharedFile) -> Self {
        Self {
            kind: SinkKind::JsonFile,
            level,
            formatter: Formatter::Json,
            file,
        }
    }

    pub const fn formatter(&self) -> Formatter {
        self.formatter
    }
}

impl Sink for FileSink {
    fn kind(&self) -> SinkKind {
        self.kind
    }

    fn level(&self) -> Level {
        self.level
    }

    fn write(&self, record: &LogRecord) -> io::Result<()> {
        let entry = self.formatter.render(record).map_err(io::Error::other)?;
        rotation::lock(&self.file).write_line(&entry)
    }

    fn flush(&self) -> io::Result<()> {
        rotation::lock(&self.file).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sink::RotationPolicy;
    use crate::infrastructure::logging::rotation::RotatingFile;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Writer that appends into a shared buffer
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_console_writes_plain_line() {
        let capture = Capture::default();
        let sink = ConsoleSink::with_writer(Level::Debug, Box::new(capture.clone()), false);

        sink.write(&LogRecord::new(Level::Info, "svc", "ready")).unwrap();

        let text = capture.text();
        assert!(text.ends_with("[INFO    ] svc: ready\n"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_console_colored_output() {
        let capture = Capture::default();
        let sink = ConsoleSink::with_writer(Level::Debug, Box::new(capture.clone()), true);

        sink.write(&LogRecord::new(Level::Warning, "svc", "slow")).unwrap();

        assert!(capture.text().contains('\u{1b}'));
    }

    #[test]
    fn test_sink_accepts_by_level() {
        let sink = ConsoleSink::with_writer(Level::Warning, Box::new(io::sink()), false);
        assert!(!sink.accepts(Level::Info));
        assert!(sink.accepts(Level::Warning));
        assert!(sink.accepts(Level::Critical));
    }

    #[test]
    fn test_error_sink_is_pinned() {
        let temp_dir = TempDir::new().unwrap();
        let file = RotatingFile::open(temp_dir.path().join("error.log"), RotationPolicy::default())
            .unwrap()
            .shared();

        let sink = FileSink::errors(file);
        assert_eq!(sink.kind(), SinkKind::ErrorFile);
        assert_eq!(sink.level(), Level::Error);
        assert!(!sink.accepts(Level::Warning));
    }

    #[test]
    fn test_plain_and_json_render_same_record() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("app.log");
        let json_path = temp_dir.path().join("app.json.log");

        let plain = FileSink::plain(
            Level::Debug,
            RotatingFile::open(&plain_path, RotationPolicy::default()).unwrap().shared(),
        );
        let json = FileSink::json(
            Level::Debug,
            RotatingFile::open(&json_path, RotationPolicy::default()).unwrap().shared(),
        );

        let record = LogRecord::new(Level::Info, "svc", "hello");
        plain.write(&record).unwrap();
        json.write(&record).unwrap();

        let plain_text = fs::read_to_string(&plain_path).unwrap();
        assert!(plain_text.contains("[INFO    ] svc (unknown) - hello"));

        let json_text = fs::read_to_string(&json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(json_text.trim()).unwrap();
        assert_eq!(value["message"], "hello");
    }

    #[test]
    fn test_two_sinks_on_one_file_interleave_whole_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let shared = RotatingFile::open(&path, RotationPolicy::default())
            .unwrap()
            .shared();

        let first = FileSink::plain(Level::Debug, Arc::clone(&shared));
        let second = FileSink::plain(Level::Debug, shared);

        first.write(&LogRecord::new(Level::Info, "a", "one")).unwrap();
        second.write(&LogRecord::new(Level::Info, "b", "two")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("a (unknown) - one"));
        assert!(lines[1].ends_with("b (unknown) - two"));
    }
}
