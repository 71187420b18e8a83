//! Include path and link surface propagation
//!
//! Single pass over the build order. A module's exported include surface
//! and link surface are finished before any dependent is visited, so each
//! dependent reads them directly instead of re-walking the transitive
//! graph. Include-only dependencies sit outside the ordering guarantee and
//! contribute their declared public paths straight from the registry.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::descriptor::{ModuleRegistry, Visibility};
use super::graph::DependencyGraph;
use super::plan::ResolvedModule;

/// Finished propagation state of one module
struct Surface {
    exported_includes: IndexSet<String>,
    link_surface: IndexSet<String>,
}

/// Resolve per-module include and link sets along the build order
///
/// `order` must come from [`build_order`](super::order::build_order) over
/// the same graph; every link dependency is then resolved before its
/// dependents.
pub fn propagate(
    graph: &DependencyGraph,
    registry: &ModuleRegistry,
    order: &[String],
) -> Vec<ResolvedModule> {
    let mut surfaces: IndexMap<&str, Surface> = IndexMap::with_capacity(order.len());
    let mut resolved = Vec::with_capacity(order.len());

    for name in order {
        let descriptor = registry
            .get(name)
            .expect("build order references a registered module");

        // Own paths first, inherited surfaces after, in declaration order
        let mut exported: IndexSet<String> =
            descriptor.public_include_paths().iter().cloned().collect();
        let mut includes: IndexSet<String> = descriptor
            .public_include_paths()
            .iter()
            .chain(descriptor.private_include_paths())
            .cloned()
            .collect();
        let mut links: IndexSet<String> = IndexSet::new();
        let mut link_surface: IndexSet<String> = IndexSet::new();
        link_surface.insert(name.clone());

        for (dependency, visibility) in graph.dependencies_of(name) {
            match visibility {
                Visibility::Public | Visibility::Private => {
                    // Link dependencies precede this module in the order
                    let dependency_surface = &surfaces[dependency];
                    includes.extend(dependency_surface.exported_includes.iter().cloned());
                    links.extend(dependency_surface.link_surface.iter().cloned());
                    if visibility.re_exports() {
                        exported.extend(dependency_surface.exported_includes.iter().cloned());
                        link_surface.extend(dependency_surface.link_surface.iter().cloned());
                    }
                }
                Visibility::IncludeOnly => {
                    let dependency_descriptor = registry
                        .get(dependency)
                        .expect("graph references a registered module");
                    includes.extend(
                        dependency_descriptor
                            .public_include_paths()
                            .iter()
                            .cloned(),
                    );
                }
            }
        }

        trace!(
            "Module {}: {} include paths, {} exported, {} link dependencies",
            name,
            includes.len(),
            exported.len(),
            links.len()
        );

        resolved.push(ResolvedModule {
            name: name.clone(),
            include_paths: includes.into_iter().collect(),
            exported_include_paths: exported.iter().cloned().collect(),
            link_dependencies: links.into_iter().collect(),
            third_party: graph.third_party_of(name).to_vec(),
        });

        surfaces.insert(
            name,
            Surface {
                exported_includes: exported,
                link_surface,
            },
        );
    }

    resolved
}

#[cfg(test)]
mod tests {
    include!("visibility.test.rs");
}
