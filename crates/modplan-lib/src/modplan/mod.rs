//! Module dependency resolution
//!
//! The resolution pipeline over a module registry: evaluate conditional
//! rules into a per-target dependency graph, order it deterministically,
//! propagate visibility surfaces along that order, and emit a
//! [`BuildPlan`]. Resolution is all-or-nothing; no partial plan escapes a
//! failed run.

pub mod condition;
pub mod descriptor;
pub mod graph;
pub mod order;
pub mod plan;
pub mod visibility;

// Re-export main types for convenience
pub use condition::{Condition, ConditionError, ConditionalRule, TagDomain};
pub use descriptor::{DescriptorError, ModuleDescriptor, ModuleRegistry, Visibility};
pub use graph::{DependencyEdge, DependencyGraph};
pub use order::build_order;
pub use plan::{BuildPlan, ResolvedModule};

use thiserror::Error;
use tracing::debug;

use crate::primitives::TargetContext;

/// Errors raised while resolving a registry for one target
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Module '{module}': {source}")]
    Condition {
        module: String,
        source: ConditionError,
    },

    #[error("Module '{module}' depends on unknown module '{reference}'")]
    MissingModuleReference { module: String, reference: String },

    #[error("Circular module dependency: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<String> },
}

/// Render a cycle as a closed arrow path
fn format_cycle(cycle: &[String]) -> String {
    let mut path = cycle.join(" → ");
    if let Some(first) = cycle.first() {
        path.push_str(" → ");
        path.push_str(first);
    }
    path
}

/// Resolve a registry into a build plan for one target context
///
/// The registry is only read, so callers may resolve the same registry
/// for several targets concurrently.
pub fn resolve(
    registry: &ModuleRegistry,
    target: &TargetContext,
) -> Result<BuildPlan, ResolveError> {
    debug!(
        "Resolving build plan for {} ({} modules)",
        target,
        registry.len()
    );

    let graph = DependencyGraph::build(registry, target)?;
    let order = build_order(&graph)?;
    let modules = visibility::propagate(&graph, registry, &order);

    debug!("Resolved {} modules for {}", modules.len(), target);

    Ok(BuildPlan {
        target: *target,
        modules,
    })
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
