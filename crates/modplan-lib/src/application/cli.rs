use crate::primitives::{BuildConfiguration, ConfigError, TargetPlatform};
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// modplan CLI - module dependency resolution
#[derive(Debug, Clone, Parser)]
#[command(name = "modplan")]
#[command(about = "Dependency resolution for declarative engine module graphs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// modplan commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Ok(Self {
            app_config: cli.config,
            command: cli.command,
        })
    }
}

/// Available modplan commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve a build plan for a single target
    Resolve {
        /// Target platform
        #[arg(short, long, value_enum)]
        platform: TargetPlatform,

        /// Build configuration
        #[arg(short, long, value_enum, default_value = "development")]
        configuration: BuildConfiguration,

        /// Resolve with editor support enabled
        #[arg(short, long)]
        editor: bool,

        /// Plan output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve every platform/configuration/editor combination and report failures
    Check,

    /// Print the dependency graph edges active for a single target
    Graph {
        /// Target platform
        #[arg(short, long, value_enum)]
        platform: TargetPlatform,

        /// Build configuration
        #[arg(short, long, value_enum, default_value = "development")]
        configuration: BuildConfiguration,

        /// Resolve with editor support enabled
        #[arg(short, long)]
        editor: bool,
    },

    /// List discovered module descriptors
    Modules,
}

/// Plan rendering format for the resolve command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON plan
    Json,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
