//! Demonstration sequence exercising every emission path

use std::thread;
use std::time::Duration;

use crate::domain::level::Level;
use crate::domain::record::Fields;
use crate::services::context::with_context;
use crate::services::logger::Emit;
use crate::services::timing::with_timing;

/// Failure raised on purpose by the demo
#[derive(Debug, thiserror::Error)]
#[error("Test exception")]
struct DemoFailure;

/// Runs the demo against one logger
pub struct Demo<'a, L: Emit> {
    logger: &'a L,
}

impl<'a, L: Emit> Demo<'a, L> {
    pub const fn new(logger: &'a L) -> Self {
        Self { logger }
    }

    pub fn run(&self) {
        self.basic_levels();
        self.structured_fields();
        self.timed_operation();
        self.failure();
        self.context_scope();
    }

    fn basic_levels(&self) {
        self.logger.debug("This is a debug message");
        self.logger.info("This is an info message");
        self.logger.warning("This is a warning message");
        self.logger.error("This is an error message");
    }

    fn structured_fields(&self) {
        self.logger.log(
            Level::Info,
            "User action",
            Fields::new()
                .with("user_id", "123")
                .with("action", "login")
                .with("ip_address", "192.168.1.1"),
        );
    }

    fn timed_operation(&self) {
        let timing = with_timing(self.logger);
        let outcome: Result<&str, DemoFailure> = timing.run("example_function", || {
            thread::sleep(Duration::from_millis(100));
            Ok("Function completed")
        });
        if let Ok(message) = outcome {
            self.logger.debug(message);
        }
    }

    fn failure(&self) {
        self.logger.exception("An error occurred", &DemoFailure);
    }

    fn context_scope(&self) {
        let ctx = with_context(self.logger, [("request_id", "abc123"), ("user_id", "456")]);
        ctx.info("Processing request");
    }
}
