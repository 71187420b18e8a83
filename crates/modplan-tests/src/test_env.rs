//! Test environment for CLI E2E testing
//!
//! Provides a TestEnvironment helper that stages descriptor trees in a
//! temporary directory and drives the modplan binary against them.

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated descriptor tree plus a preconfigured binary invocation
pub struct TestEnvironment {
    /// Temporary directory owning the whole environment
    pub temp_dir: TempDir,
    /// Descriptor root the binary is pointed at
    pub work_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with an empty descriptor root
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let work_path = temp_dir.path().join("modules");
        fs::create_dir_all(&work_path)?;

        Ok(Self {
            temp_dir,
            work_path,
        })
    }

    /// Write one descriptor file below the descriptor root
    ///
    /// `relative` is a path like `Engine/Engine.module.toml`; parent
    /// directories are created as needed.
    pub fn write_descriptor(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.work_path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Command for the modplan binary pointed at the descriptor root
    ///
    /// Ambient modplan and logging variables are stripped so test runs do
    /// not depend on the invoking shell.
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("modplan")?;
        cmd.arg("-C").arg(&self.work_path);
        for var in [
            "MODPLAN_WORKDIR",
            "MODPLAN_LOG_LEVEL",
            "MODPLAN_LOG_FORMAT",
            "MODPLAN_LOG_OUTPUT",
            "MODPLAN_COLOR",
            "RUST_LOG",
            "NO_COLOR",
        ] {
            cmd.env_remove(var);
        }
        Ok(cmd)
    }
}
