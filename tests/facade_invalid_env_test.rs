//! Process-default registry built from invalid environment settings
//!
//! Separate binary: the default registry is process-wide state.

use logfan::{LogError, LogSettings};

#[test]
fn test_invalid_env_level_rejects_default_loggers() {
    let first = temp_env::with_var("LOG_LEVEL", Some("LOUD"), || logfan::get_logger("x"));
    match first {
        Err(LogError::InvalidLevel(value)) => assert_eq!(value, "LOUD"),
        other => panic!("Expected InvalidLevel, got {other:?}"),
    }

    // the failed load is kept, not retried with defaults
    assert!(matches!(
        logfan::default_logger(),
        Err(LogError::InvalidLevel(_))
    ));
    assert!(logfan::global().is_err());
    assert!(logfan::default_timing().is_err());
    assert!(logfan::default_context([("k", "v")]).is_err());

    // shortcuts drop the record without panicking
    logfan::info("dropped");
    logfan::error("dropped too");

    assert!(matches!(
        logfan::init(LogSettings::default()),
        Err(LogError::AlreadyInitialized)
    ));
}
