//! Application configuration management
//!
//! Handles config loading and validation following the precedence:
//! defaults -> environment variables -> CLI args.

use crate::primitives::*;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const WORKDIR: &str = ".";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Application configuration structure
#[derive(Debug, Clone, Parser)]
pub struct AppConfig {
    /// Directory scanned for module descriptors
    #[arg(short = 'C', long, env = "MODPLAN_WORKDIR", default_value = defaults::WORKDIR)]
    pub workdir: PathBuf,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "MODPLAN_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    pub log_level: u8,

    /// Log format (text, json, pretty)
    #[arg(long, env = "MODPLAN_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "MODPLAN_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "MODPLAN_COLOR", default_value = defaults::COLOR)]
    pub color: ColorChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from(defaults::WORKDIR),
            log_level: 0,
            log_format: LogFormat::Text,
            log_output: LogOutput::Stderr,
            color: ColorChoice::Auto,
        }
    }
}

impl AppConfig {
    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.workdir.is_dir() {
            return Err(ConfigError::InvalidWorkDir {
                path: self.workdir.display().to_string(),
            });
        }
        Ok(())
    }

    /// Create LoggerConfig from AppConfig and ambient terminal state
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.resolve_ansi(),
        }
    }

    /// Resolve the color choice against NO_COLOR and the log stream
    fn resolve_ansi(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                // NO_COLOR with any non-empty value disables color
                let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
                !no_color
                    && match self.log_output {
                        LogOutput::Stderr => std::io::stderr().is_terminal(),
                        LogOutput::Stdout => std::io::stdout().is_terminal(),
                    }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
