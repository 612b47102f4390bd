//! Logging tests

use svd_infrastructure::LoggingConfig;
use svd_infrastructure::logging::{init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_invalid_log_level() {
    let err = parse_log_level("verbose").unwrap_err();
    assert!(err.to_string().contains("Invalid log level: verbose"));
}

#[test]
fn test_init_rejects_invalid_level_before_installing() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        json_format: false,
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_second_init_reports_error() {
    let config = LoggingConfig::default();

    // Only one global subscriber can exist per process
    let _ = init_logging(&config);

    assert!(init_logging(&config).is_err());
}
