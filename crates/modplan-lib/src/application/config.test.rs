use super::*;

#[test]
fn test_clap_defaults_match_default_impl() {
    let parsed = AppConfig::parse_from(["modplan"]);
    let defaults = AppConfig::default();

    assert_eq!(parsed.workdir, defaults.workdir);
    assert_eq!(parsed.log_level, defaults.log_level);
    assert_eq!(parsed.log_format, defaults.log_format);
    assert_eq!(parsed.log_output, defaults.log_output);
    assert_eq!(parsed.color, defaults.color);
}

#[test]
fn test_cli_arguments_override_defaults() {
    let parsed = AppConfig::parse_from([
        "modplan",
        "-C",
        "/some/where",
        "--log-level",
        "3",
        "--log-format",
        "json",
        "--log-output",
        "stdout",
        "--color",
        "never",
    ]);

    assert_eq!(parsed.workdir, PathBuf::from("/some/where"));
    assert_eq!(parsed.log_level, 3);
    assert_eq!(parsed.log_format, LogFormat::Json);
    assert_eq!(parsed.log_output, LogOutput::Stdout);
    assert_eq!(parsed.color, ColorChoice::Never);
}

#[test]
fn test_validate_accepts_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        workdir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");
    let config = AppConfig {
        workdir: missing.clone(),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains(&missing.display().to_string()));
}

#[test]
fn test_to_logger_config_maps_verbosity() {
    let config = AppConfig {
        log_level: 3,
        color: ColorChoice::Never,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Text);
    assert_eq!(logger_config.output, LogOutput::Stderr);
    assert!(!logger_config.ansi);
}

#[test]
fn test_color_always_forces_ansi() {
    let config = AppConfig {
        color: ColorChoice::Always,
        ..AppConfig::default()
    };

    assert!(config.to_logger_config().ansi);
}
