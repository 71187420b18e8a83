// Tests for per-target graph construction

use super::*;
use crate::modplan::ResolveError;
use crate::modplan::condition::{Condition, ConditionalRule};
use crate::modplan::descriptor::{ModuleDescriptor, ModuleRegistry};
use crate::primitives::{BuildConfiguration, TargetPlatform};

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

fn dev_target(platform: TargetPlatform) -> TargetContext {
    TargetContext::new(platform, BuildConfiguration::Development, false)
}

// ============================================================================
// Static Edges
// ============================================================================

#[test]
fn test_static_edges_carry_declared_visibility() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Renderer", &[], &[], &[]),
        module("Settings", &[], &[], &[]),
        module("Engine", &["Core"], &["Renderer"], &["Settings"]),
    ])
    .unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();

    assert_eq!(graph.module_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(
        graph.dependencies_of("Engine"),
        vec![
            ("Core", Visibility::Public),
            ("Renderer", Visibility::Private),
            ("Settings", Visibility::IncludeOnly),
        ]
    );
}

#[test]
fn test_repeated_name_in_one_list_collapses() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core", "Core"], &[], &[]),
    ])
    .unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_self_reference_builds_as_self_loop() {
    // A self cycle is a graph-shape problem, reported by ordering
    let registry =
        ModuleRegistry::from_descriptors([module("Ouroboros", &[], &["Ouroboros"], &[])]).unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(
        graph.dependencies_of("Ouroboros"),
        vec![("Ouroboros", Visibility::Private)]
    );
}

#[test]
fn test_missing_reference_fails() {
    let registry =
        ModuleRegistry::from_descriptors([module("Engine", &["Core"], &[], &[])]).unwrap();

    let result = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux));
    assert!(matches!(
        result.unwrap_err(),
        ResolveError::MissingModuleReference { module, reference }
            if module == "Engine" && reference == "Core"
    ));
}

// ============================================================================
// Conditional Rules
// ============================================================================

#[test]
fn test_conditional_rule_applies_on_matching_platform() {
    let registry = ModuleRegistry::from_descriptors([
        module("Sockets", &[], &[], &[]),
        module("SourceControl", &[], &[], &[]).with_conditional_rule(ConditionalRule::new(
            Condition::always().with_platforms(["Win64", "Mac"]),
            Visibility::Private,
            deps(&["Sockets"]),
        )),
    ])
    .unwrap();

    let on_win64 = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Win64)).unwrap();
    assert_eq!(
        on_win64.dependencies_of("SourceControl"),
        vec![("Sockets", Visibility::Private)]
    );

    let on_linux = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert!(on_linux.dependencies_of("SourceControl").is_empty());
    assert_eq!(on_linux.edge_count(), 0);
}

#[test]
fn test_conditional_rule_applies_on_editor_flag() {
    let registry = ModuleRegistry::from_descriptors([
        module("UnrealEd", &[], &[], &[]),
        module("Annotations", &[], &[], &[]).with_conditional_rule(ConditionalRule::new(
            Condition::always().with_editor(true),
            Visibility::Private,
            deps(&["UnrealEd"]),
        )),
    ])
    .unwrap();

    let editor = TargetContext::new(TargetPlatform::Linux, BuildConfiguration::Development, true);
    let graph = DependencyGraph::build(&registry, &editor).unwrap();
    assert_eq!(graph.edge_count(), 1);

    let runtime = dev_target(TargetPlatform::Linux);
    let graph = DependencyGraph::build(&registry, &runtime).unwrap();
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_inactive_rule_reference_is_not_validated() {
    // The unknown module only matters on targets where the rule fires
    let registry = ModuleRegistry::from_descriptors([module("Renderer", &[], &[], &[])
        .with_conditional_rule(ConditionalRule::new(
            Condition::always().with_platforms(["Mac"]),
            Visibility::Private,
            deps(&["MetalRHI"]),
        ))])
    .unwrap();

    assert!(DependencyGraph::build(&registry, &dev_target(TargetPlatform::Win64)).is_ok());

    let result = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Mac));
    assert!(matches!(
        result.unwrap_err(),
        ResolveError::MissingModuleReference { module, reference }
            if module == "Renderer" && reference == "MetalRHI"
    ));
}

#[test]
fn test_unrecognized_tag_reports_declaring_module() {
    let registry = ModuleRegistry::from_descriptors([module("Engine", &[], &[], &[])
        .with_conditional_rule(ConditionalRule::new(
            Condition::always().with_platforms(["Winn64"]),
            Visibility::Private,
            vec![],
        ))])
    .unwrap();

    let result = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Win64));
    assert!(matches!(
        result.unwrap_err(),
        ResolveError::Condition { module, .. } if module == "Engine"
    ));
}

// ============================================================================
// Visibility Merge
// ============================================================================

#[test]
fn test_conditional_public_upgrades_static_private() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Engine", &[], &["Core"], &[]).with_conditional_rule(ConditionalRule::new(
            Condition::always(),
            Visibility::Public,
            deps(&["Core"]),
        )),
    ])
    .unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert_eq!(
        graph.dependencies_of("Engine"),
        vec![("Core", Visibility::Public)]
    );
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_conditional_private_does_not_downgrade_static_public() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core"], &[], &[]).with_conditional_rule(ConditionalRule::new(
            Condition::always(),
            Visibility::Private,
            deps(&["Core"]),
        )),
    ])
    .unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert_eq!(
        graph.dependencies_of("Engine"),
        vec![("Core", Visibility::Public)]
    );
}

#[test]
fn test_private_upgrades_static_include_only() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Engine", &[], &[], &["Core"]).with_conditional_rule(ConditionalRule::new(
            Condition::always(),
            Visibility::Private,
            deps(&["Core"]),
        )),
    ])
    .unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert_eq!(
        graph.dependencies_of("Engine"),
        vec![("Core", Visibility::Private)]
    );
}

// ============================================================================
// Third-Party References
// ============================================================================

#[test]
fn test_third_party_merges_static_and_active_rules() {
    let registry = ModuleRegistry::from_descriptors([module("SourceControl", &[], &[], &[])
        .with_third_party(deps(&["zlib"]))
        .with_conditional_rule(
            ConditionalRule::new(
                Condition::always().with_platforms(["Win64", "Mac"]),
                Visibility::Private,
                vec![],
            )
            .with_third_party(deps(&["OpenSSL", "zlib"])),
        )])
    .unwrap();

    let on_win64 = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Win64)).unwrap();
    assert_eq!(
        on_win64.third_party_of("SourceControl"),
        deps(&["zlib", "OpenSSL"])
    );

    let on_linux = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();
    assert_eq!(on_linux.third_party_of("SourceControl"), deps(&["zlib"]));
}

// ============================================================================
// Graph Queries
// ============================================================================

#[test]
fn test_dependents_and_edge_listing() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Game", &[], &["Core"], &[]),
    ])
    .unwrap();

    let graph = DependencyGraph::build(&registry, &dev_target(TargetPlatform::Linux)).unwrap();

    assert!(graph.contains("Game"));
    assert!(!graph.contains("Editor"));
    assert_eq!(
        graph.modules().collect::<Vec<_>>(),
        vec!["Core", "Engine", "Game"]
    );

    assert_eq!(
        graph.dependents_of("Core"),
        vec![
            ("Engine", Visibility::Public),
            ("Game", Visibility::Private)
        ]
    );

    let mut edges = graph.edges();
    edges.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
    assert_eq!(
        edges,
        vec![
            DependencyEdge {
                from: "Engine".to_string(),
                to: "Core".to_string(),
                visibility: Visibility::Public,
            },
            DependencyEdge {
                from: "Game".to_string(),
                to: "Core".to_string(),
                visibility: Visibility::Private,
            },
        ]
    );
}
