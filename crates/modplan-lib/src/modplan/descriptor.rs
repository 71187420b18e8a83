//! Module descriptors and the module registry
//!
//! A descriptor is the declarative build interface of one engine module:
//! unconditional dependency declarations split by visibility, the module's
//! include path surface, conditional dependency rules, and third-party
//! references. Descriptors are validated on construction and immutable
//! afterwards; the registry is the explicit descriptor set resolution
//! operates on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::trace;

use super::condition::ConditionalRule;

/// Errors raised while constructing or registering descriptors
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Module name must not be empty")]
    EmptyModuleName,

    #[error("Module '{module}' lists dependency '{dependency}' under more than one visibility")]
    DuplicateDependencyDeclaration { module: String, dependency: String },

    #[error("Duplicate module name: {module}")]
    DuplicateModuleName { module: String },
}

/// How a dependency's interface propagates to dependents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    // Variant order makes the most permissive visibility compare greatest.
    /// Header access only, no link obligation
    IncludeOnly,
    /// Linked, interface kept out of the dependent's exported surface
    Private,
    /// Linked and re-exported to dependents
    Public,
}

impl Visibility {
    /// Whether edges of this visibility carry a link obligation
    ///
    /// Link-carrying edges are also the ones that constrain build order
    /// and participate in cycle detection.
    pub fn links(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::Private)
    }

    /// Whether the dependency's exported surface flows through to dependents
    pub fn re_exports(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::IncludeOnly => write!(f, "include-only"),
            Visibility::Private => write!(f, "private"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

/// Declarative build interface of a single engine module
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    name: String,
    public_dependencies: Vec<String>,
    private_dependencies: Vec<String>,
    include_path_dependencies: Vec<String>,
    public_include_paths: Vec<String>,
    private_include_paths: Vec<String>,
    conditional_rules: Vec<ConditionalRule>,
    third_party: Vec<String>,
}

impl ModuleDescriptor {
    /// Create a descriptor from its unconditional dependency declarations
    ///
    /// A dependency name may appear in at most one of the three lists; a
    /// name showing up twice across lists fails with
    /// [`DescriptorError::DuplicateDependencyDeclaration`]. Include paths
    /// default to `<Name>/Public` and `<Name>/Private` until overridden.
    pub fn new(
        name: impl Into<String>,
        public_dependencies: Vec<String>,
        private_dependencies: Vec<String>,
        include_path_dependencies: Vec<String>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DescriptorError::EmptyModuleName);
        }

        let mut declared: HashSet<&str> = HashSet::new();
        for list in [
            &public_dependencies,
            &private_dependencies,
            &include_path_dependencies,
        ] {
            let mut in_this_list: HashSet<&str> = HashSet::new();
            for dependency in list {
                // Repetition inside one list is harmless (it collapses to a
                // single edge); the same name across two lists is ambiguous.
                if declared.contains(dependency.as_str()) {
                    return Err(DescriptorError::DuplicateDependencyDeclaration {
                        module: name,
                        dependency: dependency.clone(),
                    });
                }
                in_this_list.insert(dependency);
            }
            declared.extend(in_this_list);
        }

        let public_include_paths = vec![format!("{}/Public", name)];
        let private_include_paths = vec![format!("{}/Private", name)];

        Ok(Self {
            name,
            public_dependencies,
            private_dependencies,
            include_path_dependencies,
            public_include_paths,
            private_include_paths,
            conditional_rules: Vec::new(),
            third_party: Vec::new(),
        })
    }

    /// Replace the default public include paths
    pub fn with_public_include_paths(mut self, paths: Vec<String>) -> Self {
        self.public_include_paths = paths;
        self
    }

    /// Replace the default private include paths
    pub fn with_private_include_paths(mut self, paths: Vec<String>) -> Self {
        self.private_include_paths = paths;
        self
    }

    /// Append a conditional dependency rule
    ///
    /// Rules may re-declare names from the unconditional lists; conflicts
    /// are settled edge-by-edge when the graph is built.
    pub fn with_conditional_rule(mut self, rule: ConditionalRule) -> Self {
        self.conditional_rules.push(rule);
        self
    }

    /// Append unconditional third-party references
    pub fn with_third_party(mut self, tags: Vec<String>) -> Self {
        self.third_party.extend(tags);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn public_dependencies(&self) -> &[String] {
        &self.public_dependencies
    }

    pub fn private_dependencies(&self) -> &[String] {
        &self.private_dependencies
    }

    pub fn include_path_dependencies(&self) -> &[String] {
        &self.include_path_dependencies
    }

    pub fn public_include_paths(&self) -> &[String] {
        &self.public_include_paths
    }

    pub fn private_include_paths(&self) -> &[String] {
        &self.private_include_paths
    }

    pub fn conditional_rules(&self) -> &[ConditionalRule] {
        &self.conditional_rules
    }

    pub fn third_party(&self) -> &[String] {
        &self.third_party
    }

    /// Unconditional dependency declarations in declaration order
    pub fn static_dependencies(&self) -> impl Iterator<Item = (&str, Visibility)> {
        self.public_dependencies
            .iter()
            .map(|name| (name.as_str(), Visibility::Public))
            .chain(
                self.private_dependencies
                    .iter()
                    .map(|name| (name.as_str(), Visibility::Private)),
            )
            .chain(
                self.include_path_dependencies
                    .iter()
                    .map(|name| (name.as_str(), Visibility::IncludeOnly)),
            )
    }
}

/// The set of module descriptors known to one resolution run
///
/// Registries are plain values handed to [`resolve`](crate::modplan::resolve)
/// explicitly. Nothing in the crate keeps process-wide module state, so
/// independent registries can be resolved from different threads without
/// coordination.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: IndexMap<String, ModuleDescriptor>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            modules: IndexMap::new(),
        }
    }

    /// Build a registry from a descriptor sequence
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ModuleDescriptor>,
    ) -> Result<Self, DescriptorError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.insert(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor, rejecting repeated module names
    pub fn insert(&mut self, descriptor: ModuleDescriptor) -> Result<(), DescriptorError> {
        if self.modules.contains_key(descriptor.name()) {
            return Err(DescriptorError::DuplicateModuleName {
                module: descriptor.name().to_string(),
            });
        }

        trace!("Registered module descriptor: {}", descriptor.name());
        self.modules
            .insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.values()
    }

    /// Module names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(|name| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    include!("descriptor.test.rs");
}
