//! Descriptor discovery and TOML parsing
//!
//! Walks a directory tree for `*.module.toml` files, parses each into a
//! descriptor, and registers them all. Traversal is sorted by file name
//! so a registry loads in the same order on every platform.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::modplan::{
    Condition, ConditionalRule, DescriptorError, ModuleDescriptor, ModuleRegistry, Visibility,
};

/// File name suffix that marks a module descriptor
pub const DESCRIPTOR_SUFFIX: &str = ".module.toml";

/// Errors raised while loading descriptors from disk
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read descriptor: {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to scan descriptor root: {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to parse descriptor: {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid descriptor: {path}: {source}")]
    Descriptor {
        path: PathBuf,
        source: DescriptorError,
    },
}

/// On-disk shape of a descriptor file
///
/// Unknown keys are rejected so field typos fail the load instead of
/// silently dropping declarations.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescriptor {
    name: String,

    #[serde(default)]
    public_dependencies: Vec<String>,

    #[serde(default)]
    private_dependencies: Vec<String>,

    #[serde(default)]
    include_path_dependencies: Vec<String>,

    /// Overrides the `<Name>/Public` default when present
    public_include_paths: Option<Vec<String>>,

    /// Overrides the `<Name>/Private` default when present
    private_include_paths: Option<Vec<String>>,

    #[serde(default)]
    third_party: Vec<String>,

    #[serde(default, rename = "conditional")]
    conditionals: Vec<RawConditional>,
}

/// One `[[conditional]]` block
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConditional {
    #[serde(default)]
    platforms: Vec<String>,

    editor: Option<bool>,

    #[serde(default)]
    configurations: Vec<String>,

    visibility: Visibility,

    #[serde(default)]
    dependencies: Vec<String>,

    #[serde(default)]
    third_party: Vec<String>,
}

impl RawDescriptor {
    fn into_descriptor(self) -> Result<ModuleDescriptor, DescriptorError> {
        let mut descriptor = ModuleDescriptor::new(
            self.name,
            self.public_dependencies,
            self.private_dependencies,
            self.include_path_dependencies,
        )?;

        if let Some(paths) = self.public_include_paths {
            descriptor = descriptor.with_public_include_paths(paths);
        }
        if let Some(paths) = self.private_include_paths {
            descriptor = descriptor.with_private_include_paths(paths);
        }
        if !self.third_party.is_empty() {
            descriptor = descriptor.with_third_party(self.third_party);
        }

        for conditional in self.conditionals {
            let condition = Condition {
                platforms: conditional.platforms,
                editor: conditional.editor,
                configurations: conditional.configurations,
            };
            let rule =
                ConditionalRule::new(condition, conditional.visibility, conditional.dependencies)
                    .with_third_party(conditional.third_party);
            descriptor = descriptor.with_conditional_rule(rule);
        }

        Ok(descriptor)
    }
}

/// Parse one descriptor file
pub fn load_descriptor_file(path: &Path) -> Result<ModuleDescriptor, LoaderError> {
    trace!("Parsing module descriptor: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawDescriptor = toml::from_str(&content).map_err(|source| LoaderError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    raw.into_descriptor()
        .map_err(|source| LoaderError::Descriptor {
            path: path.to_path_buf(),
            source,
        })
}

/// Load every descriptor under a root directory into a registry
///
/// Only files named `*.module.toml` are considered; anything else in the
/// tree is ignored.
pub fn load_registry(root: &Path) -> Result<ModuleRegistry, LoaderError> {
    debug!("Loading module descriptors from: {}", root.display());

    let mut registry = ModuleRegistry::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| LoaderError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let is_descriptor = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(DESCRIPTOR_SUFFIX))
            .unwrap_or(false);
        if !is_descriptor {
            continue;
        }

        let descriptor = load_descriptor_file(entry.path())?;
        registry
            .insert(descriptor)
            .map_err(|source| LoaderError::Descriptor {
                path: entry.path().to_path_buf(),
                source,
            })?;
    }

    debug!("Loaded {} module descriptors", registry.len());
    Ok(registry)
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
