//! Global logging setup.

use shallow_store::error::LoggingError;
use shallow_store::logging::{init_logging, LoggingConfig};

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        ..LoggingConfig::default()
    };

    init_logging(Some(&config)).unwrap();
    super::test_utils::store(serde_json::json!({"a": 1}))
        .commit(|_| super::test_utils::state(serde_json::json!({"a": 2})));

    assert!(matches!(
        init_logging(Some(&config)),
        Err(LoggingError::AlreadyInitialized(_))
    ));
}

#[test]
fn test_init_logging_rejects_bad_output() {
    let config = LoggingConfig {
        output: "file".to_string(),
        ..LoggingConfig::default()
    };
    assert!(matches!(
        init_logging(Some(&config)),
        Err(LoggingError::InvalidOutput(_))
    ));
}
