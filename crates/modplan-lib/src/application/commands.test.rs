use super::*;
use crate::modplan::{ModuleDescriptor, ModuleRegistry};
use crate::primitives::{BuildConfiguration, TargetPlatform};

fn deps(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn development_target() -> TargetContext {
    TargetContext::new(
        TargetPlatform::Win64,
        BuildConfiguration::Development,
        false,
    )
}

#[test]
fn test_render_plan_text_lists_modules_in_build_order() {
    let registry = ModuleRegistry::from_descriptors([
        ModuleDescriptor::new("Engine", deps(&["Core"]), vec![], vec![]).unwrap(),
        ModuleDescriptor::new("Core", vec![], vec![], vec![]).unwrap(),
    ])
    .unwrap();

    let plan = resolve(&registry, &development_target()).unwrap();
    let rendered = render_plan_text(&plan);

    let expected = "\
Build plan for Win64-Development (2 modules)

Core
  includes: Core/Public, Core/Private
  exports: Core/Public
  links: (none)
  third-party: (none)

Engine
  includes: Engine/Public, Engine/Private, Core/Public
  exports: Engine/Public, Core/Public
  links: Core
  third-party: (none)
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_render_plan_text_shows_third_party_tags() {
    let registry = ModuleRegistry::from_descriptors([ModuleDescriptor::new(
        "Sockets",
        vec![],
        vec![],
        vec![],
    )
    .unwrap()
    .with_third_party(deps(&["OpenSSL", "zlib"]))])
    .unwrap();

    let plan = resolve(&registry, &development_target()).unwrap();
    let rendered = render_plan_text(&plan);

    assert!(rendered.contains("  third-party: OpenSSL, zlib\n"));
}

#[test]
fn test_join_or_none() {
    assert_eq!(join_or_none(&[]), "(none)");
    assert_eq!(join_or_none(&deps(&["A", "B"])), "A, B");
}
