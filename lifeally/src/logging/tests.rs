use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{create_non_blocking_file, init, level_filter, level_to_log_level, parse_log_level};
use std::sync::Once;
use tempfile::tempdir;

static INIT: Once = Once::new();

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            file: None,
            stdout: true,
        };

        let _ = init(&config);
    });

    // A second subscriber is refused rather than silently replacing the first
    let again = LoggingConfig::default();
    assert!(init(&again).is_err());
}

#[test]
fn test_file_writer_creates_parent_dirs() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("lifeally.log");

    let result = create_non_blocking_file(&log_path);
    assert!(result.is_ok());
    assert!(log_path.parent().unwrap().exists());
}

#[test]
fn test_file_writer_rejects_directory_path() {
    assert!(create_non_blocking_file("/").is_err());
}

#[test]
fn test_level_filter_quiets_storage_internals() {
    let verbose = level_filter(&LogLevel::Debug).to_string();
    assert!(verbose.contains("surrealdb_core=warn"));

    let quiet = level_filter(&LogLevel::Error).to_string();
    assert!(!quiet.contains("surrealdb"));
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("trace").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("DEBUG").unwrap(), LogLevel::Debug);
    assert_eq!(parse_log_level("info").unwrap(), LogLevel::Info);
    assert_eq!(parse_log_level("warn").unwrap(), LogLevel::Warn);
    assert_eq!(parse_log_level("error").unwrap(), LogLevel::Error);
    assert!(parse_log_level("invalid").is_err());

    assert_eq!(level_to_log_level(tracing::Level::TRACE), LogLevel::Trace);
    assert_eq!(level_to_log_level(tracing::Level::DEBUG), LogLevel::Debug);
    assert_eq!(level_to_log_level(tracing::Level::INFO), LogLevel::Info);
    assert_eq!(level_to_log_level(tracing::Level::WARN), LogLevel::Warn);
    assert_eq!(level_to_log_level(tracing::Level::ERROR), LogLevel::Error);
}
