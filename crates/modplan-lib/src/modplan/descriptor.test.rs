// Tests for module descriptors and the registry

use super::*;
use crate::modplan::condition::Condition;

// ============================================================================
// Test Utilities
// ============================================================================

fn deps(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn simple_module(name: &str) -> ModuleDescriptor {
    ModuleDescriptor::new(name, vec![], vec![], vec![]).unwrap()
}

// ============================================================================
// Descriptor Construction
// ============================================================================

#[test]
fn test_new_descriptor() {
    let descriptor = ModuleDescriptor::new(
        "Engine",
        deps(&["Core"]),
        deps(&["Renderer"]),
        deps(&["DeveloperSettings"]),
    )
    .unwrap();

    assert_eq!(descriptor.name(), "Engine");
    assert_eq!(descriptor.public_dependencies(), deps(&["Core"]));
    assert_eq!(descriptor.private_dependencies(), deps(&["Renderer"]));
    assert_eq!(
        descriptor.include_path_dependencies(),
        deps(&["DeveloperSettings"])
    );
    assert!(descriptor.conditional_rules().is_empty());
    assert!(descriptor.third_party().is_empty());
}

#[test]
fn test_empty_name_rejected() {
    let result = ModuleDescriptor::new("", vec![], vec![], vec![]);
    assert!(matches!(
        result.unwrap_err(),
        DescriptorError::EmptyModuleName
    ));
}

#[test]
fn test_name_in_two_lists_rejected() {
    for (public, private, include_only) in [
        (deps(&["Core"]), deps(&["Core"]), vec![]),
        (deps(&["Core"]), vec![], deps(&["Core"])),
        (vec![], deps(&["Core"]), deps(&["Core"])),
    ] {
        let result = ModuleDescriptor::new("Engine", public, private, include_only);
        assert!(matches!(
            result.unwrap_err(),
            DescriptorError::DuplicateDependencyDeclaration { module, dependency }
                if module == "Engine" && dependency == "Core"
        ));
    }
}

#[test]
fn test_repetition_inside_one_list_allowed() {
    let descriptor =
        ModuleDescriptor::new("Engine", deps(&["Core", "Core"]), vec![], vec![]).unwrap();
    assert_eq!(descriptor.public_dependencies().len(), 2);
}

#[test]
fn test_include_paths_default_from_name() {
    let descriptor = simple_module("WaveTable");
    assert_eq!(
        descriptor.public_include_paths(),
        deps(&["WaveTable/Public"])
    );
    assert_eq!(
        descriptor.private_include_paths(),
        deps(&["WaveTable/Private"])
    );
}

#[test]
fn test_include_path_overrides() {
    let descriptor = simple_module("Launch")
        .with_public_include_paths(deps(&["Launch/Public", "Launch/Resources"]))
        .with_private_include_paths(vec![]);

    assert_eq!(
        descriptor.public_include_paths(),
        deps(&["Launch/Public", "Launch/Resources"])
    );
    assert!(descriptor.private_include_paths().is_empty());
}

#[test]
fn test_conditional_rules_and_third_party_append() {
    let rule = ConditionalRule::new(
        Condition::always().with_editor(true),
        Visibility::Private,
        deps(&["UnrealEd"]),
    );
    let descriptor = simple_module("SourceControl")
        .with_conditional_rule(rule.clone())
        .with_third_party(deps(&["zlib"]));

    assert_eq!(descriptor.conditional_rules(), [rule]);
    assert_eq!(descriptor.third_party(), deps(&["zlib"]));
}

#[test]
fn test_conditional_rule_may_redeclare_static_dependency() {
    // Conflicts between static and conditional declarations are settled
    // during graph construction, not at descriptor validation.
    let rule = ConditionalRule::new(
        Condition::always().with_platforms(["Win64"]),
        Visibility::Public,
        deps(&["Core"]),
    );
    let descriptor = ModuleDescriptor::new("Engine", vec![], deps(&["Core"]), vec![])
        .unwrap()
        .with_conditional_rule(rule);

    assert_eq!(descriptor.conditional_rules().len(), 1);
}

#[test]
fn test_static_dependencies_iterate_in_declaration_order() {
    let descriptor = ModuleDescriptor::new(
        "Game",
        deps(&["Engine", "Core"]),
        deps(&["Slate"]),
        deps(&["AssetTools"]),
    )
    .unwrap();

    let declared: Vec<_> = descriptor.static_dependencies().collect();
    assert_eq!(
        declared,
        vec![
            ("Engine", Visibility::Public),
            ("Core", Visibility::Public),
            ("Slate", Visibility::Private),
            ("AssetTools", Visibility::IncludeOnly),
        ]
    );
}

// ============================================================================
// Visibility Semantics
// ============================================================================

#[test]
fn test_visibility_ordering_most_permissive_greatest() {
    assert!(Visibility::Public > Visibility::Private);
    assert!(Visibility::Private > Visibility::IncludeOnly);
    assert_eq!(
        Visibility::Private.max(Visibility::Public),
        Visibility::Public
    );
}

#[test]
fn test_visibility_link_and_reexport_flags() {
    assert!(Visibility::Public.links());
    assert!(Visibility::Private.links());
    assert!(!Visibility::IncludeOnly.links());

    assert!(Visibility::Public.re_exports());
    assert!(!Visibility::Private.re_exports());
    assert!(!Visibility::IncludeOnly.re_exports());
}

#[test]
fn test_visibility_display() {
    assert_eq!(Visibility::Public.to_string(), "public");
    assert_eq!(Visibility::Private.to_string(), "private");
    assert_eq!(Visibility::IncludeOnly.to_string(), "include-only");
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_insert_and_lookup() {
    let mut registry = ModuleRegistry::new();
    registry.insert(simple_module("Core")).unwrap();
    registry.insert(simple_module("Engine")).unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("Core"));
    assert!(!registry.contains("Renderer"));
    assert_eq!(registry.get("Engine").unwrap().name(), "Engine");
}

#[test]
fn test_registry_rejects_duplicate_module_name() {
    let mut registry = ModuleRegistry::new();
    registry.insert(simple_module("Core")).unwrap();

    let result = registry.insert(simple_module("Core"));
    assert!(matches!(
        result.unwrap_err(),
        DescriptorError::DuplicateModuleName { module } if module == "Core"
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_preserves_registration_order() {
    let registry = ModuleRegistry::from_descriptors([
        simple_module("Renderer"),
        simple_module("Core"),
        simple_module("Engine"),
    ])
    .unwrap();

    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, vec!["Renderer", "Core", "Engine"]);
}
