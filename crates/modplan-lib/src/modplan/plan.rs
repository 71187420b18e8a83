//! Resolved build plans
//!
//! The plan is the final product of resolution: the module sequence in
//! build order, each entry carrying its resolved include, link, and
//! third-party sets for one target context.

use serde::{Deserialize, Serialize};

use crate::primitives::TargetContext;

/// One module's resolved build interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    /// Module name
    pub name: String,
    /// Compile-visible include paths, in propagation order
    pub include_paths: Vec<String>,
    /// Include paths re-exported to dependents
    pub exported_include_paths: Vec<String>,
    /// Modules this module links against
    pub link_dependencies: Vec<String>,
    /// Active third-party references
    pub third_party: Vec<String>,
}

/// Build plan for one target context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// The target the plan was resolved for
    pub target: TargetContext,
    /// Modules in build order
    pub modules: Vec<ResolvedModule>,
}

impl BuildPlan {
    /// Look up one module's resolved entry
    pub fn module(&self, name: &str) -> Option<&ResolvedModule> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Module names in build order
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|module| module.name.as_str())
    }

    /// Serialize the plan as pretty-printed JSON
    ///
    /// Field and sequence order are fully determined by resolution, so the
    /// same registry and target always produce byte-identical output.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
