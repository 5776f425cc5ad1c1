//! Service layer
//!
//! Coordinates the domain types and infrastructure sinks:
//! - `Logger` handles and the `Emit` emission trait
//! - `LoggerRegistry` with at-most-once initialization per name
//! - Execution-time instrumentation (`with_timing`)
//! - Scoped context injection (`with_context`, `scoped`)
//! - Process-default shortcuts

pub mod context;
pub mod facade;
pub mod logger;
pub mod registry;
pub mod timing;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{scoped, with_context, ContextLogger};
pub use logger::{Emit, Logger, RecordBuilder};
pub use registry::{LoggerOptions, LoggerRegistry};
pub use timing::{with_timing, Timing};
