//! Process-default shortcuts
//!
//! Kept to a single test: the default registry is process-wide state.

mod common;

use logfan::{Emit, LogError, LogSettings};

#[test]
fn test_default_logger_shortcuts() {
    let dir = common::temp_dir();
    let registry = logfan::init(LogSettings::in_dir(dir.path())).unwrap();

    assert!(matches!(
        logfan::init(LogSettings::default()),
        Err(LogError::AlreadyInitialized)
    ));
    assert!(std::ptr::eq(registry, logfan::global().unwrap()));

    logfan::debug("starting");
    logfan::info("ready");
    logfan::warning("slow");
    logfan::error("boom");
    logfan::critical("halt");

    let timed: Result<(), std::fmt::Error> = logfan::default_timing()
        .unwrap()
        .run("noop", || Ok(()));
    assert!(timed.is_ok());

    logfan::default_context([("request_id", "r-9")])
        .unwrap()
        .info("scoped");

    let logger = logfan::default_logger().unwrap();
    assert_eq!(logger.name(), logfan::DEFAULT_LOGGER);
    assert!(std::sync::Arc::ptr_eq(
        &logger,
        &logfan::get_logger(logfan::DEFAULT_LOGGER).unwrap()
    ));

    let plain = common::read_lines(dir.path().join("app.log"));
    assert_eq!(plain.len(), 7);
    assert!(plain[1].contains("[INFO    ] default ("));
    assert!(plain[1].contains("facade_test.rs:"));

    let errors = common::read_lines(dir.path().join("error.log"));
    assert_eq!(errors.len(), 2);

    let json = common::read_json_lines(dir.path().join("app.json.log"));
    assert_eq!(json[6]["request_id"], "r-9");
    assert_eq!(json[5]["function"], "noop");
}
