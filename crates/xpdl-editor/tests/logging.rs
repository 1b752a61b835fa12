//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use std::str::FromStr;
use xpdl_editor::core::logging::{init_logging, resolve_format, resolve_level, LogFormat};

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    for name in LogFormat::variants() {
        assert!(LogFormat::from_str(name).is_ok());
    }
}

#[test]
fn test_resolution_prefers_arguments() {
    assert_eq!(resolve_level(Some("debug")), "debug");
    assert_eq!(resolve_format(Some("json")).unwrap(), LogFormat::Json);
}

#[test]
fn test_init_logging_with_levels() {
    // only the first call can install the global subscriber; the rest must fail cleanly
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
}

#[test]
fn test_init_logging_rejects_unknown_format() {
    assert!(init_logging(Some("info"), Some("xml")).is_err());
}
