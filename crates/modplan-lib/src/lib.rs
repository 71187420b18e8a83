//! # modplan Library
//!
//! Module dependency resolution for declarative engine build graphs.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and the target vocabulary
//! - [`logger`] - Structured logging setup
//! - [`modplan`] - Descriptors, dependency graphs, and plan resolution
//! - [`loader`] - Descriptor discovery and TOML parsing
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! // Initialize and run modplan
//! modplan_lib::main().unwrap();
//! ```

pub mod application;
pub mod loader;
pub mod logger;
pub mod modplan;
pub mod primitives;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use loader::{LoaderError, load_registry};
pub use logger::Logger;
pub use modplan::{
    BuildPlan, DependencyGraph, ModuleDescriptor, ModuleRegistry, ResolveError, ResolvedModule,
    Visibility, resolve,
};
pub use primitives::{
    BuildConfiguration, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, TargetContext,
    TargetPlatform,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Logging is wired up before any command work happens
    Logger::init(config.app_config.to_logger_config())?;

    // Execute the command
    execute_command(config)
}
