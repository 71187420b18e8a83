use super::*;
use crate::primitives::{BuildConfiguration, TargetPlatform};

#[test]
fn test_resolve_subcommand_parses() {
    let cli = Cli::try_parse_from(["modplan", "resolve", "--platform", "win64"]).unwrap();

    match cli.command {
        Some(Commands::Resolve {
            platform,
            configuration,
            editor,
            format,
        }) => {
            assert_eq!(platform, TargetPlatform::Win64);
            assert_eq!(configuration, BuildConfiguration::Development);
            assert!(!editor);
            assert_eq!(format, OutputFormat::Text);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_resolve_subcommand_accepts_overrides() {
    let cli = Cli::try_parse_from([
        "modplan", "resolve", "-p", "linux", "-c", "shipping", "-e", "-f", "json",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Resolve {
            platform,
            configuration,
            editor,
            format,
        }) => {
            assert_eq!(platform, TargetPlatform::Linux);
            assert_eq!(configuration, BuildConfiguration::Shipping);
            assert!(editor);
            assert_eq!(format, OutputFormat::Json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_resolve_requires_platform() {
    assert!(Cli::try_parse_from(["modplan", "resolve"]).is_err());
}

#[test]
fn test_global_flags_combine_with_subcommands() {
    let cli = Cli::try_parse_from(["modplan", "-C", "/tmp", "--log-level", "2", "check"]).unwrap();

    assert_eq!(cli.config.workdir, std::path::PathBuf::from("/tmp"));
    assert_eq!(cli.config.log_level, 2);
    assert!(matches!(cli.command, Some(Commands::Check)));
}

#[test]
fn test_no_subcommand_is_allowed() {
    let cli = Cli::try_parse_from(["modplan"]).unwrap();
    assert!(cli.command.is_none());
}
