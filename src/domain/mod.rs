//! Domain layer for logfan
//!
//! Pure types shared by every other layer:
//! - Severity levels and their parsing rules
//! - Log records, extra fields and failure details
//! - Sink configuration and the `Sink` port
//! - The error taxonomy

pub mod errors;
pub mod level;
pub mod ports;
pub mod record;
pub mod sink;

pub use errors::{LogError, LogResult};
pub use level::Level;
pub use ports::Sink;
pub use record::{FailureDetail, Fields, LogRecord, SourceLocation};
pub use sink::{RotationPolicy, SinkConfig, SinkKind, SinkTarget};
