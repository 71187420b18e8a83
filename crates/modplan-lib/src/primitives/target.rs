use serde::{Deserialize, Serialize};
use std::fmt;

/// Platforms a build target can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// 64-bit Windows
    Win64,
    /// macOS
    Mac,
    /// Desktop Linux
    Linux,
    /// Android
    Android,
    /// iOS
    Ios,
}

impl TargetPlatform {
    pub const ALL: [TargetPlatform; 5] = [
        TargetPlatform::Win64,
        TargetPlatform::Mac,
        TargetPlatform::Linux,
        TargetPlatform::Android,
        TargetPlatform::Ios,
    ];
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetPlatform::Win64 => write!(f, "Win64"),
            TargetPlatform::Mac => write!(f, "Mac"),
            TargetPlatform::Linux => write!(f, "Linux"),
            TargetPlatform::Android => write!(f, "Android"),
            TargetPlatform::Ios => write!(f, "IOS"),
        }
    }
}

impl std::str::FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "win64" => Ok(TargetPlatform::Win64),
            "mac" => Ok(TargetPlatform::Mac),
            "linux" => Ok(TargetPlatform::Linux),
            "android" => Ok(TargetPlatform::Android),
            "ios" => Ok(TargetPlatform::Ios),
            _ => Err(format!("Invalid platform tag: {}", s)),
        }
    }
}

/// Build configurations a target can be resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    /// Unoptimized, full debug info
    Debug,
    /// Optimized with debug info, the day-to-day configuration
    Development,
    /// Fully optimized release builds
    Shipping,
    /// Shipping plus automation hooks
    Test,
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 4] = [
        BuildConfiguration::Debug,
        BuildConfiguration::Development,
        BuildConfiguration::Shipping,
        BuildConfiguration::Test,
    ];
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildConfiguration::Debug => write!(f, "Debug"),
            BuildConfiguration::Development => write!(f, "Development"),
            BuildConfiguration::Shipping => write!(f, "Shipping"),
            BuildConfiguration::Test => write!(f, "Test"),
        }
    }
}

impl std::str::FromStr for BuildConfiguration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildConfiguration::Debug),
            "development" => Ok(BuildConfiguration::Development),
            "shipping" => Ok(BuildConfiguration::Shipping),
            "test" => Ok(BuildConfiguration::Test),
            _ => Err(format!("Invalid configuration tag: {}", s)),
        }
    }
}

/// One concrete resolution target
///
/// Conditional dependency rules are evaluated against a target context, so
/// the same descriptor set can produce a different plan per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetContext {
    pub platform: TargetPlatform,
    pub configuration: BuildConfiguration,
    pub editor: bool,
}

impl TargetContext {
    pub fn new(platform: TargetPlatform, configuration: BuildConfiguration, editor: bool) -> Self {
        Self {
            platform,
            configuration,
            editor,
        }
    }

    /// Full platform x configuration x editor matrix, in a fixed order
    pub fn all() -> Vec<TargetContext> {
        let capacity = TargetPlatform::ALL.len() * BuildConfiguration::ALL.len() * 2;
        let mut contexts = Vec::with_capacity(capacity);
        for platform in TargetPlatform::ALL {
            for configuration in BuildConfiguration::ALL {
                for editor in [false, true] {
                    contexts.push(TargetContext::new(platform, configuration, editor));
                }
            }
        }
        contexts
    }
}

impl fmt::Display for TargetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.configuration)?;
        if self.editor {
            write!(f, "-Editor")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("target.test.rs");
}
