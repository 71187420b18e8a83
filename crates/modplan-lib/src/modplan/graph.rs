//! Per-target dependency graph construction
//!
//! Builds one directed, visibility-weighted graph from a registry and a
//! target context. Conditional rules are evaluated here, so the graph is
//! the target-specific view of the descriptor set: nodes are module names,
//! edges point from dependent to dependency and carry the winning
//! visibility for that pair.

use indexmap::{IndexMap, IndexSet};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, trace};

use super::ResolveError;
use super::descriptor::{ModuleRegistry, Visibility};
use crate::primitives::TargetContext;

/// One resolved dependency edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub visibility: Visibility,
}

/// Target-specific dependency graph over a module registry
#[derive(Debug)]
pub struct DependencyGraph {
    /// Directed graph: nodes = modules, edges = dependent -> dependency
    graph: DiGraph<String, Visibility>,
    /// Map from module name to node index for fast lookup
    node_map: IndexMap<String, NodeIndex>,
    /// Active third-party references per module, deduplicated
    third_party: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build the graph for one target context
    ///
    /// Every conditional rule is evaluated against `target`; duplicate
    /// (from, to) declarations merge by keeping the most visible edge.
    /// Fails if an active declaration references an unregistered module or
    /// a rule carries an unrecognized tag.
    pub fn build(registry: &ModuleRegistry, target: &TargetContext) -> Result<Self, ResolveError> {
        debug!(
            "Building dependency graph for {} over {} modules",
            target,
            registry.len()
        );

        let mut graph = DiGraph::new();
        let mut node_map = IndexMap::new();
        for name in registry.names() {
            let idx = graph.add_node(name.to_string());
            node_map.insert(name.to_string(), idx);
        }

        let mut result = Self {
            graph,
            node_map,
            third_party: IndexMap::new(),
        };

        for descriptor in registry.iter() {
            // Registered in the node loop above, same iteration source
            let from_idx = result.node_map[descriptor.name()];
            let mut tags: IndexSet<String> = descriptor.third_party().iter().cloned().collect();

            for (reference, visibility) in descriptor.static_dependencies() {
                result.merge_edge(from_idx, descriptor.name(), reference, visibility)?;
            }

            for rule in descriptor.conditional_rules() {
                let active =
                    rule.condition()
                        .evaluate(target)
                        .map_err(|source| ResolveError::Condition {
                            module: descriptor.name().to_string(),
                            source,
                        })?;
                if !active {
                    trace!(
                        "Module {}: conditional rule inactive for {}",
                        descriptor.name(),
                        target
                    );
                    continue;
                }

                for reference in rule.dependencies() {
                    result.merge_edge(from_idx, descriptor.name(), reference, rule.visibility())?;
                }
                tags.extend(rule.third_party().iter().cloned());
            }

            result
                .third_party
                .insert(descriptor.name().to_string(), tags.into_iter().collect());
        }

        debug!(
            "Dependency graph ready: {} modules, {} edges",
            result.module_count(),
            result.edge_count()
        );
        Ok(result)
    }

    /// Insert or upgrade one edge, keeping the most visible declaration
    fn merge_edge(
        &mut self,
        from_idx: NodeIndex,
        from: &str,
        to: &str,
        visibility: Visibility,
    ) -> Result<(), ResolveError> {
        let Some(&to_idx) = self.node_map.get(to) else {
            return Err(ResolveError::MissingModuleReference {
                module: from.to_string(),
                reference: to.to_string(),
            });
        };

        match self.graph.find_edge(from_idx, to_idx) {
            Some(edge) => {
                let current = self.graph[edge];
                if visibility > current {
                    trace!("Edge {} -> {} upgraded from {} to {}", from, to, current, visibility);
                    self.graph[edge] = visibility;
                }
            }
            None => {
                self.graph.add_edge(from_idx, to_idx, visibility);
            }
        }

        Ok(())
    }

    /// Get the number of modules in the graph
    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a module exists in the graph
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Module names in registration order
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.node_map.keys().map(|name| name.as_str())
    }

    /// Direct dependencies of a module with their edge visibility
    pub fn dependencies_of(&self, name: &str) -> Vec<(&str, Visibility)> {
        let Some(&idx) = self.node_map.get(name) else {
            return Vec::new();
        };

        // petgraph yields edges most-recent-first; reverse back to
        // declaration order
        let mut dependencies: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (self.graph[edge.target()].as_str(), *edge.weight()))
            .collect();
        dependencies.reverse();
        dependencies
    }

    /// Direct dependents of a module with their edge visibility
    pub fn dependents_of(&self, name: &str) -> Vec<(&str, Visibility)> {
        let Some(&idx) = self.node_map.get(name) else {
            return Vec::new();
        };

        let mut dependents: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| (self.graph[edge.source()].as_str(), *edge.weight()))
            .collect();
        dependents.reverse();
        dependents
    }

    /// Active third-party references of a module
    pub fn third_party_of(&self, name: &str) -> &[String] {
        self.third_party
            .get(name)
            .map(|tags| tags.as_slice())
            .unwrap_or(&[])
    }

    /// Every edge of the graph
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.graph
            .edge_references()
            .map(|edge| DependencyEdge {
                from: self.graph[edge.source()].clone(),
                to: self.graph[edge.target()].clone(),
                visibility: *edge.weight(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    include!("graph.test.rs");
}
