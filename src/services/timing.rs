//! Execution-time instrumentation
//!
//! `with_timing(logger)` yields a `Timing` that runs or wraps operations,
//! measuring wall-clock duration and emitting one record per invocation:
//! info with `status = "success"`, or error with `status = "error"` and the
//! failure attached. Errors are returned unchanged and panics resume with
//! their original payload.

use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe, Location};
use std::time::{Duration, Instant};

use futures::FutureExt;

use crate::domain::level::Level;
use crate::domain::record::{panic_message, FailureDetail, Fields, SourceLocation};

use super::logger::Emit;

/// Instruments operations against one logger
#[derive(Debug, Clone)]
pub struct Timing<L> {
    logger: L,
}

/// Bind execution-time instrumentation to `logger`.
pub const fn with_timing<L: Emit>(logger: L) -> Timing<L> {
    Timing { logger }
}

type Outcome<T, E> = Result<Result<T, E>, Box<dyn std::any::Any + Send>>;

impl<L: Emit> Timing<L> {
    pub const fn logger(&self) -> &L {
        &self.logger
    }

    /// Run `op` once, timed.
    #[track_caller]
    pub fn run<T, E, F>(&self, name: &str, op: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: fmt::Display + fmt::Debug,
    {
        self.run_at(SourceLocation::from(Location::caller()), name, op)
    }

    /// Turn `f` into an equivalent operation that is timed on every call
    ///
    /// Records point at the line that called `wrap`. Operations taking
    /// several arguments receive them as a tuple.
    #[track_caller]
    pub fn wrap<A, T, E, F>(self, name: impl Into<String>, f: F) -> impl Fn(A) -> Result<T, E>
    where
        F: Fn(A) -> Result<T, E>,
        E: fmt::Display + fmt::Debug,
    {
        let location = SourceLocation::from(Location::caller());
        let name = name.into();
        move |args| self.run_at(location, &name, || f(args))
    }

    /// Await `future`, timed.
    #[track_caller]
    pub fn run_async<'a, T, E, Fut>(
        &'a self,
        name: &'a str,
        future: Fut,
    ) -> impl Future<Output = Result<T, E>> + 'a
    where
        Fut: Future<Output = Result<T, E>> + 'a,
        T: 'a,
        E: fmt::Display + fmt::Debug + 'a,
    {
        let location = SourceLocation::from(Location::caller());
        async move {
            let start = Instant::now();
            let outcome = AssertUnwindSafe(future).catch_unwind().await;
            self.finish(name, start.elapsed(), Some(location), outcome)
        }
    }

    fn run_at<T, E, F>(&self, location: SourceLocation, name: &str, op: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: fmt::Display + fmt::Debug,
    {
        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(op));
        self.finish(name, start.elapsed(), Some(location), outcome)
    }

    fn finish<T, E>(
        &self,
        name: &str,
        elapsed: Duration,
        location: Option<SourceLocation>,
        outcome: Outcome<T, E>,
    ) -> Result<T, E>
    where
        E: fmt::Display + fmt::Debug,
    {
        let seconds = elapsed.as_secs_f64();
        let fields = Fields::new()
            .with("function", name)
            .with("execution_time", seconds);

        match outcome {
            Ok(Ok(value)) => {
                self.logger
                    .record(Level::Info, format_args!("{name} completed in {seconds:.4}s"))
                    .at(location)
                    .fields(fields.with("status", "success"))
                    .emit();
                Ok(value)
            }
            Ok(Err(error)) => {
                self.logger
                    .record(
                        Level::Error,
                        format_args!("{name} failed after {seconds:.4}s: {error}"),
                    )
                    .at(location)
                    .fields(
                        fields
                            .with("status", "error")
                            .with("error", error.to_string()),
                    )
                    .failure_detail(FailureDetail::from_display(&error))
                    .emit();
                Err(error)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.logger
                    .record(
                        Level::Error,
                        format_args!("{name} panicked after {seconds:.4}s: {message}"),
                    )
                    .at(location)
                    .fields(fields.with("status", "error").with("error", message.clone()))
                    .failure_detail(FailureDetail::from_panic(payload.as_ref()))
                    .emit();
                panic::resume_unwind(payload)
            }
        }
    }
}
