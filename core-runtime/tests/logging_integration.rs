//! Integration tests for the logging system

use bridge_traits::log::LogLevel;
use core_runtime::logging::{init_logging, strip_path, LogFormat, LoggingConfig};

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LoggingConfig::default().format, LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LoggingConfig::default().format, LogFormat::Json);
}

#[test]
fn test_path_stripping() {
    assert_eq!(strip_path("/home/user/music/song.mp3"), "song.mp3");
    assert_eq!(strip_path("D:\\data\\jingle.ogg"), "jingle.ogg");
    assert_eq!(strip_path("filename.wav"), "filename.wav");
    assert_eq!(strip_path(""), "");
}

// Only one global subscriber per process, so this file initializes exactly once.
#[test]
fn test_init_logging_only_once() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);
    assert!(init_logging(config.clone()).is_ok());
    assert!(init_logging(config).is_err());
}
