//! Logging infrastructure
//!
//! Sink implementations behind the `Sink` port:
//! - Format catalog (console, text, JSON lines)
//! - Size-based rotation with numbered backups
//! - Console and file sinks

pub mod format;
pub mod rotation;
pub mod sinks;

pub use format::{level_style, Formatter, DATE_FORMAT};
pub use rotation::{RotatingFile, SharedFile};
pub use sinks::{ConsoleSink, FileSink};
