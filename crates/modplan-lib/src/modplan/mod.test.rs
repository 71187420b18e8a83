// Tests for end-to-end resolution

use super::*;
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

fn engine_registry() -> ModuleRegistry {
    ModuleRegistry::from_descriptors([
        module("Game", &[], &["Engine"], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Core", &[], &[], &[]),
    ])
    .unwrap()
}

fn dev_target(platform: TargetPlatform, editor: bool) -> TargetContext {
    TargetContext::new(platform, BuildConfiguration::Development, editor)
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_produces_ordered_plan() {
    let registry = engine_registry();
    let target = dev_target(TargetPlatform::Linux, false);

    let plan = resolve(&registry, &target).unwrap();

    assert_eq!(plan.target, target);
    assert_eq!(
        plan.module_names().collect::<Vec<_>>(),
        vec!["Core", "Engine", "Game"]
    );
    assert_eq!(
        plan.module("Game").unwrap().link_dependencies,
        deps(&["Engine", "Core"])
    );
    assert!(plan.module("Editor").is_none());
}

#[test]
fn test_resolve_empty_registry() {
    let registry = ModuleRegistry::new();
    let plan = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap();
    assert!(plan.modules.is_empty());
}

#[test]
fn test_resolution_is_byte_identical_across_runs() {
    let target = dev_target(TargetPlatform::Win64, true);

    let first = resolve(&engine_registry(), &target).unwrap();
    let second = resolve(&engine_registry(), &target).unwrap();

    // Same registry registered in a different order
    let reordered = ModuleRegistry::from_descriptors([
        module("Core", &[], &[], &[]),
        module("Engine", &["Core"], &[], &[]),
        module("Game", &[], &["Engine"], &[]),
    ])
    .unwrap();
    let third = resolve(&reordered, &target).unwrap();

    let reference = first.to_json().unwrap();
    assert_eq!(second.to_json().unwrap(), reference);
    assert_eq!(third.to_json().unwrap(), reference);
}

#[test]
fn test_cycle_aborts_resolution() {
    let registry = ModuleRegistry::from_descriptors([
        module("Core", &["Engine"], &[], &[]),
        module("Engine", &["Game"], &[], &[]),
        module("Game", &["Core"], &[], &[]),
    ])
    .unwrap();

    let error = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Circular module dependency: Core → Engine → Game → Core"
    );
}

#[test]
fn test_self_cycle_error_display() {
    let registry =
        ModuleRegistry::from_descriptors([module("Ouroboros", &["Ouroboros"], &[], &[])]).unwrap();

    let error = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Circular module dependency: Ouroboros → Ouroboros"
    );
}

#[test]
fn test_missing_reference_error_display() {
    let registry =
        ModuleRegistry::from_descriptors([module("Engine", &["Core"], &[], &[])]).unwrap();

    let error = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Module 'Engine' depends on unknown module 'Core'"
    );
}

#[test]
fn test_condition_error_aborts_resolution() {
    let registry = ModuleRegistry::from_descriptors([module("Engine", &[], &[], &[])
        .with_conditional_rule(ConditionalRule::new(
            Condition::always().with_configurations(["Profiling"]),
            Visibility::Private,
            vec![],
        ))])
    .unwrap();

    let error = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap_err();
    assert!(matches!(
        &error,
        ResolveError::Condition { module, .. } if module == "Engine"
    ));
    assert!(error.to_string().contains("Profiling"));
}

// ============================================================================
// Target-Dependent Plans
// ============================================================================

#[test]
fn test_platform_conditional_third_party_scenario() {
    let registry = ModuleRegistry::from_descriptors([
        module("Sockets", &[], &[], &[]),
        module("SourceControl", &[], &[], &[]).with_conditional_rule(
            ConditionalRule::new(
                Condition::always().with_platforms(["Win64", "Mac"]),
                Visibility::Private,
                deps(&["Sockets"]),
            )
            .with_third_party(deps(&["OpenSSL"])),
        ),
    ])
    .unwrap();

    let on_win64 = resolve(&registry, &dev_target(TargetPlatform::Win64, false)).unwrap();
    let source_control = on_win64.module("SourceControl").unwrap();
    assert_eq!(source_control.link_dependencies, deps(&["Sockets"]));
    assert_eq!(source_control.third_party, deps(&["OpenSSL"]));

    let on_linux = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap();
    let source_control = on_linux.module("SourceControl").unwrap();
    assert!(source_control.link_dependencies.is_empty());
    assert!(source_control.third_party.is_empty());
}

#[test]
fn test_editor_target_pulls_editor_modules() {
    let registry = ModuleRegistry::from_descriptors([
        module("UnrealEd", &[], &[], &[]),
        module("Annotations", &[], &[], &[]).with_conditional_rule(ConditionalRule::new(
            Condition::always().with_editor(true),
            Visibility::Private,
            deps(&["UnrealEd"]),
        )),
    ])
    .unwrap();

    let editor_plan = resolve(&registry, &dev_target(TargetPlatform::Linux, true)).unwrap();
    assert_eq!(
        editor_plan.module("Annotations").unwrap().link_dependencies,
        deps(&["UnrealEd"])
    );

    let runtime_plan = resolve(&registry, &dev_target(TargetPlatform::Linux, false)).unwrap();
    assert!(runtime_plan
        .module("Annotations")
        .unwrap()
        .link_dependencies
        .is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_parallel_resolution_over_shared_registry() {
    let registry = engine_registry();
    let targets = TargetContext::all();

    let sequential: Vec<_> = targets
        .iter()
        .map(|target| resolve(&registry, target).unwrap())
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let registry = &registry;
        let handles: Vec<_> = targets
            .iter()
            .map(|target| scope.spawn(move || resolve(registry, target).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(parallel.len(), sequential.len());
    for (left, right) in parallel.iter().zip(&sequential) {
        assert_eq!(left, right);
    }
}
