// Tests for include and link surface propagation

use super::*;
use crate::modplan::condition::{Condition, ConditionalRule};
use crate::modplan::descriptor::ModuleDescriptor;
use crate::modplan::order::build_order;
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

fn resolve_modules(descriptors: impl IntoIterator<Item = ModuleDescriptor>) -> Vec<ResolvedModule> {
    let registry = ModuleRegistry::from_descriptors(descriptors).unwrap();
    let target = TargetContext::new(TargetPlatform::Linux, BuildConfiguration::Development, false);
    let graph = DependencyGraph::build(&registry, &target).unwrap();
    let order = build_order(&graph).unwrap();
    propagate(&graph, &registry, &order)
}

fn entry<'a>(modules: &'a [ResolvedModule], name: &str) -> &'a ResolvedModule {
    modules
        .iter()
        .find(|module| module.name == name)
        .unwrap_or_else(|| panic!("module {} missing from plan", name))
}

// ============================================================================
// Basic Surfaces
// ============================================================================

#[test]
fn test_leaf_module_surfaces() {
    let modules = resolve_modules([module("Core", &[], &[], &[])]);

    let core = entry(&modules, "Core");
    assert_eq!(core.include_paths, deps(&["Core/Public", "Core/Private"]));
    assert_eq!(core.exported_include_paths, deps(&["Core/Public"]));
    assert!(core.link_dependencies.is_empty());
    assert!(core.third_party.is_empty());
}

#[test]
fn test_core_engine_game_scenario() {
    // Core <- Engine (public) <- Game (private)
    let modules = resolve_modules([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Game", &[], &["Engine"], &[]),
    ]);

    let engine = entry(&modules, "Engine");
    assert_eq!(
        engine.include_paths,
        deps(&["Engine/Public", "Engine/Private", "Core/Public"])
    );
    assert_eq!(
        engine.exported_include_paths,
        deps(&["Engine/Public", "Core/Public"])
    );
    assert_eq!(engine.link_dependencies, deps(&["Core"]));

    // Game sees Engine's exports (Core/Public included via re-export) but
    // never Engine's or Core's private paths
    let game = entry(&modules, "Game");
    assert_eq!(
        game.include_paths,
        deps(&["Game/Public", "Game/Private", "Engine/Public", "Core/Public"])
    );
    assert_eq!(game.exported_include_paths, deps(&["Game/Public"]));
    assert_eq!(game.link_dependencies, deps(&["Engine", "Core"]));
}

#[test]
fn test_public_dependency_reexports_transitively() {
    let modules = resolve_modules([
        module("Base", &[], &[], &[]),
        module("Mid", &["Base"], &[], &[]),
        module("Top", &["Mid"], &[], &[]),
    ]);

    let top = entry(&modules, "Top");
    assert_eq!(
        top.include_paths,
        deps(&["Top/Public", "Top/Private", "Mid/Public", "Base/Public"])
    );
    assert_eq!(
        top.exported_include_paths,
        deps(&["Top/Public", "Mid/Public", "Base/Public"])
    );
    assert_eq!(top.link_dependencies, deps(&["Mid", "Base"]));
}

#[test]
fn test_private_dependency_does_not_leak() {
    // Engine holds Core privately; Game must see and link neither
    let modules = resolve_modules([
        module("Core", &[], &[], &[]),
        module("Engine", &[], &["Core"], &[]),
        module("Game", &[], &["Engine"], &[]),
    ]);

    let engine = entry(&modules, "Engine");
    assert_eq!(engine.link_dependencies, deps(&["Core"]));
    assert_eq!(
        engine.exported_include_paths,
        deps(&["Engine/Public"])
    );

    let game = entry(&modules, "Game");
    assert_eq!(
        game.include_paths,
        deps(&["Game/Public", "Game/Private", "Engine/Public"])
    );
    assert_eq!(game.link_dependencies, deps(&["Engine"]));
}

// ============================================================================
// Include-Only Dependencies
// ============================================================================

#[test]
fn test_include_only_grants_headers_without_link() {
    let modules = resolve_modules([
        module("DeveloperSettings", &[], &[], &[]),
        module("Engine", &[], &[], &["DeveloperSettings"]),
        module("Game", &["Engine"], &[], &[]),
    ]);

    let engine = entry(&modules, "Engine");
    assert_eq!(
        engine.include_paths,
        deps(&["Engine/Public", "Engine/Private", "DeveloperSettings/Public"])
    );
    assert!(engine.link_dependencies.is_empty());
    assert_eq!(engine.exported_include_paths, deps(&["Engine/Public"]));

    // Header grants are not re-exported to dependents
    let game = entry(&modules, "Game");
    assert!(!game
        .include_paths
        .contains(&"DeveloperSettings/Public".to_string()));
    assert_eq!(game.link_dependencies, deps(&["Engine"]));
}

#[test]
fn test_include_only_uses_declared_paths_not_resolved_exports() {
    // Detail re-exports Inner publicly, but an include-only reference to
    // Detail grants only Detail's own declared public paths
    let modules = resolve_modules([
        module("Inner", &[], &[], &[]),
        module("Detail", &["Inner"], &[], &[]),
        module("Tool", &[], &[], &["Detail"]),
    ]);

    let tool = entry(&modules, "Tool");
    assert_eq!(
        tool.include_paths,
        deps(&["Tool/Public", "Tool/Private", "Detail/Public"])
    );
    assert!(!tool.include_paths.contains(&"Inner/Public".to_string()));
}

// ============================================================================
// Link Surfaces
// ============================================================================

#[test]
fn test_link_surface_stops_at_private_boundaries() {
    // Mid links Base privately, so Top inherits Mid alone
    let modules = resolve_modules([
        module("Base", &[], &[], &[]),
        module("Mid", &[], &["Base"], &[]),
        module("Top", &["Mid"], &[], &[]),
    ]);

    assert_eq!(
        entry(&modules, "Mid").link_dependencies,
        deps(&["Base"])
    );
    assert_eq!(entry(&modules, "Top").link_dependencies, deps(&["Mid"]));
}

#[test]
fn test_diamond_shares_surfaces_without_duplicates() {
    let modules = resolve_modules([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Renderer", &["Core"], &[], &[]),
        module("Game", &["Engine", "Renderer"], &[], &[]),
    ]);

    let game = entry(&modules, "Game");
    assert_eq!(
        game.include_paths,
        deps(&[
            "Game/Public",
            "Game/Private",
            "Engine/Public",
            "Core/Public",
            "Renderer/Public",
        ])
    );
    assert_eq!(game.link_dependencies, deps(&["Engine", "Core", "Renderer"]));
}

// ============================================================================
// Path Overrides and Third-Party
// ============================================================================

#[test]
fn test_custom_include_paths_propagate() {
    let modules = resolve_modules([
        module("Launch", &[], &[], &[])
            .with_public_include_paths(deps(&["Launch/Public", "Launch/Resources"])),
        module("Game", &["Launch"], &[], &[]),
    ]);

    let game = entry(&modules, "Game");
    assert!(game.include_paths.contains(&"Launch/Public".to_string()));
    assert!(game.include_paths.contains(&"Launch/Resources".to_string()));
}

#[test]
fn test_third_party_stays_with_its_module() {
    let modules = resolve_modules([
        module("Engine", &[], &[], &[]).with_third_party(deps(&["zlib"])),
        module("Game", &["Engine"], &[], &[]),
    ]);

    assert_eq!(entry(&modules, "Engine").third_party, deps(&["zlib"]));
    assert!(entry(&modules, "Game").third_party.is_empty());
}

#[test]
fn test_conditionally_upgraded_edge_propagates_as_public() {
    // Inactive on Linux the dependency stays private; active on Win64 the
    // rule upgrades it to public and Core's surface flows onward
    let descriptors = || {
        [
            module("Core", &[], &[], &[]),
            module("Engine", &[], &["Core"], &[]).with_conditional_rule(ConditionalRule::new(
                Condition::always().with_platforms(["Win64"]),
                Visibility::Public,
                deps(&["Core"]),
            )),
            module("Game", &["Engine"], &[], &[]),
        ]
    };

    let registry = ModuleRegistry::from_descriptors(descriptors()).unwrap();

    let on_linux =
        TargetContext::new(TargetPlatform::Linux, BuildConfiguration::Development, false);
    let graph = DependencyGraph::build(&registry, &on_linux).unwrap();
    let order = build_order(&graph).unwrap();
    let modules = propagate(&graph, &registry, &order);
    assert!(!entry(&modules, "Game")
        .include_paths
        .contains(&"Core/Public".to_string()));

    let on_win64 =
        TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Development, false);
    let graph = DependencyGraph::build(&registry, &on_win64).unwrap();
    let order = build_order(&graph).unwrap();
    let modules = propagate(&graph, &registry, &order);
    assert!(entry(&modules, "Game")
        .include_paths
        .contains(&"Core/Public".to_string()));
    assert_eq!(
        entry(&modules, "Game").link_dependencies,
        deps(&["Engine", "Core"])
    );
}
