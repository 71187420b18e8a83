use super::*;

#[test]
fn test_logger_global_state_consistent() {
    // Note: other tests in this binary may have initialized the logger
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}

#[test]
fn test_logger_rejects_second_initialization() {
    let config = LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    };

    // First call wins; a tracing subscriber installed elsewhere in this
    // process also counts as initialized.
    let _ = Logger::init(config.clone());

    assert!(matches!(
        Logger::init(config),
        Err(LoggerError::AlreadyInitialized | LoggerError::InitializationFailed { .. })
    ));
}
