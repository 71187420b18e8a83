// Tests for build ordering and cycle detection

use super::*;
use crate::modplan::descriptor::{ModuleDescriptor, ModuleRegistry};
use crate::primitives::{BuildConfiguration, TargetContext, TargetPlatform};

// ============================================================================
// Test Utilities
// ============================================================================

fn deps(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn module(
    name: &str,
    public: &[&str],
    private: &[&str],
    include_only: &[&str],
) -> ModuleDescriptor {
    ModuleDescriptor::new(name, deps(public), deps(private), deps(include_only)).unwrap()
}

fn graph_of(descriptors: impl IntoIterator<Item = ModuleDescriptor>) -> DependencyGraph {
    let registry = ModuleRegistry::from_descriptors(descriptors).unwrap();
    let target = TargetContext::new(TargetPlatform::Linux, BuildConfiguration::Development, false);
    DependencyGraph::build(&registry, &target).unwrap()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_linear_chain_orders_dependencies_first() {
    let graph = graph_of([
        module("Game", &["Engine"], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Core", &[], &[], &[]),
    ]);

    let order = build_order(&graph).unwrap();
    assert_eq!(order, deps(&["Core", "Engine", "Game"]));
}

#[test]
fn test_diamond_breaks_ties_by_ascending_name() {
    let graph = graph_of([
        module("Game", &["Renderer", "Engine"], &[], &[]),
        module("Renderer", &["Core"], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Core", &[], &[], &[]),
    ]);

    let order = build_order(&graph).unwrap();
    assert_eq!(order, deps(&["Core", "Engine", "Renderer", "Game"]));
}

#[test]
fn test_independent_modules_sort_by_name() {
    let graph = graph_of([
        module("Zen", &[], &[], &[]),
        module("Audio", &[], &[], &[]),
        module("Media", &[], &[], &[]),
    ]);

    let order = build_order(&graph).unwrap();
    assert_eq!(order, deps(&["Audio", "Media", "Zen"]));
}

#[test]
fn test_order_independent_of_registration_order() {
    let forward = graph_of([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Game", &["Engine"], &[], &[]),
    ]);
    let backward = graph_of([
        module("Game", &["Engine"], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Core", &[], &[], &[]),
    ]);

    assert_eq!(
        build_order(&forward).unwrap(),
        build_order(&backward).unwrap()
    );
}

#[test]
fn test_private_edges_constrain_order() {
    let graph = graph_of([
        module("Game", &[], &["Engine"], &[]),
        module("Engine", &[], &[], &[]),
    ]);

    let order = build_order(&graph).unwrap();
    assert_eq!(order, deps(&["Engine", "Game"]));
}

#[test]
fn test_empty_graph_orders_to_empty_sequence() {
    let graph = graph_of([]);
    assert!(build_order(&graph).unwrap().is_empty());
}

// ============================================================================
// Include-Only Edges
// ============================================================================

#[test]
fn test_include_only_edges_do_not_constrain_order() {
    // Engine grants itself header access to Editor while Editor links
    // Engine; only the link edge orders the pair
    let graph = graph_of([
        module("Engine", &[], &[], &["Editor"]),
        module("Editor", &["Engine"], &[], &[]),
    ]);

    let order = build_order(&graph).unwrap();
    assert_eq!(order, deps(&["Engine", "Editor"]));
}

#[test]
fn test_mutual_include_only_references_are_not_a_cycle() {
    let graph = graph_of([
        module("AIModule", &[], &[], &["NavigationSystem"]),
        module("NavigationSystem", &[], &[], &["AIModule"]),
    ]);

    let order = build_order(&graph).unwrap();
    assert_eq!(order, deps(&["AIModule", "NavigationSystem"]));
}

// ============================================================================
// Cycle Detection
// ============================================================================

#[test]
fn test_link_cycle_is_reported_with_path() {
    let graph = graph_of([
        module("Core", &["Engine"], &[], &[]),
        module("Engine", &["Game"], &[], &[]),
        module("Game", &["Core"], &[], &[]),
    ]);

    let result = build_order(&graph);
    assert!(matches!(
        result.unwrap_err(),
        ResolveError::CyclicDependency { cycle } if cycle == deps(&["Core", "Engine", "Game"])
    ));
}

#[test]
fn test_cycle_path_is_deterministic() {
    let build = |rotation: [&str; 3]| {
        graph_of([
            module(rotation[0], &[rotation[1]], &[], &[]),
            module(rotation[1], &[rotation[2]], &[], &[]),
            module(rotation[2], &[rotation[0]], &[], &[]),
        ])
    };

    // Same cycle declared starting from different modules
    for rotation in [
        ["Core", "Engine", "Game"],
        ["Engine", "Game", "Core"],
        ["Game", "Core", "Engine"],
    ] {
        let result = build_order(&build(rotation));
        assert!(matches!(
            result.unwrap_err(),
            ResolveError::CyclicDependency { cycle } if cycle == deps(&["Core", "Engine", "Game"])
        ));
    }
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let graph = graph_of([module("Ouroboros", &[], &["Ouroboros"], &[])]);

    let result = build_order(&graph);
    assert!(matches!(
        result.unwrap_err(),
        ResolveError::CyclicDependency { cycle } if cycle == deps(&["Ouroboros"])
    ));
}

#[test]
fn test_mixed_visibility_cycle_detected() {
    // Public one way, private the other; both carry links
    let graph = graph_of([
        module("Engine", &["Renderer"], &[], &[]),
        module("Renderer", &[], &["Engine"], &[]),
    ]);

    assert!(matches!(
        build_order(&graph).unwrap_err(),
        ResolveError::CyclicDependency { .. }
    ));
}
