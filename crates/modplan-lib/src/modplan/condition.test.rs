// Tests for conditional rule evaluation

use super::*;
use crate::primitives::{BuildConfiguration, TargetContext, TargetPlatform};

// ============================================================================
// Test Utilities
// ============================================================================

fn target(platform: TargetPlatform, editor: bool) -> TargetContext {
    TargetContext::new(platform, BuildConfiguration::Development, editor)
}

// ============================================================================
// Basic Predicates
// ============================================================================

#[test]
fn test_always_condition_matches_every_target() {
    let condition = Condition::always();

    for context in TargetContext::all() {
        assert!(condition.evaluate(&context).unwrap());
    }
}

#[test]
fn test_platform_membership() {
    let condition = Condition::always().with_platforms(["Win64", "Mac"]);

    assert!(condition.evaluate(&target(TargetPlatform::Win64, false)).unwrap());
    assert!(condition.evaluate(&target(TargetPlatform::Mac, false)).unwrap());
    assert!(!condition.evaluate(&target(TargetPlatform::Linux, false)).unwrap());
    assert!(!condition.evaluate(&target(TargetPlatform::Android, false)).unwrap());
}

#[test]
fn test_editor_flag() {
    let editor_only = Condition::always().with_editor(true);
    let runtime_only = Condition::always().with_editor(false);

    assert!(editor_only.evaluate(&target(TargetPlatform::Linux, true)).unwrap());
    assert!(!editor_only.evaluate(&target(TargetPlatform::Linux, false)).unwrap());

    assert!(!runtime_only.evaluate(&target(TargetPlatform::Linux, true)).unwrap());
    assert!(runtime_only.evaluate(&target(TargetPlatform::Linux, false)).unwrap());
}

#[test]
fn test_configuration_membership() {
    let condition = Condition::always().with_configurations(["Debug", "Development"]);

    let debug = TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Debug, false);
    let shipping = TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Shipping, false);

    assert!(condition.evaluate(&debug).unwrap());
    assert!(!condition.evaluate(&shipping).unwrap());
}

#[test]
fn test_predicates_combine_by_conjunction() {
    let condition = Condition::always()
        .with_platforms(["Win64"])
        .with_editor(true)
        .with_configurations(["Development"]);

    let matching = TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Development, true);
    assert!(condition.evaluate(&matching).unwrap());

    // Any single mismatching predicate defeats the rule
    let wrong_platform =
        TargetContext::new(TargetPlatform::Mac, BuildConfiguration::Development, true);
    let wrong_editor =
        TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Development, false);
    let wrong_configuration =
        TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Shipping, true);

    assert!(!condition.evaluate(&wrong_platform).unwrap());
    assert!(!condition.evaluate(&wrong_editor).unwrap());
    assert!(!condition.evaluate(&wrong_configuration).unwrap());
}

#[test]
fn test_tags_parse_case_insensitively() {
    let condition = Condition::always().with_platforms(["win64", "MAC"]);

    assert!(condition.evaluate(&target(TargetPlatform::Win64, false)).unwrap());
    assert!(condition.evaluate(&target(TargetPlatform::Mac, false)).unwrap());
}

// ============================================================================
// Tag Validation
// ============================================================================

#[test]
fn test_unknown_platform_tag_is_an_error() {
    let condition = Condition::always().with_platforms(["Winn64"]);

    let result = condition.evaluate(&target(TargetPlatform::Win64, false));
    assert!(matches!(
        result.unwrap_err(),
        ConditionError::UnrecognizedTag {
            domain: TagDomain::Platform,
            ..
        }
    ));
}

#[test]
fn test_typo_reported_even_when_another_tag_matches() {
    // "Win64" alone would match, but the typo must still surface
    let condition = Condition::always().with_platforms(["Win64", "Maac"]);

    let result = condition.evaluate(&target(TargetPlatform::Win64, false));
    let err = result.unwrap_err();
    assert!(matches!(
        &err,
        ConditionError::UnrecognizedTag { tag, domain: TagDomain::Platform } if tag == "Maac"
    ));
}

#[test]
fn test_unknown_configuration_tag_is_an_error() {
    let condition = Condition::always().with_configurations(["Profiling"]);

    let result = condition.evaluate(&target(TargetPlatform::Win64, false));
    assert!(matches!(
        result.unwrap_err(),
        ConditionError::UnrecognizedTag {
            domain: TagDomain::Configuration,
            ..
        }
    ));
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_rule_carries_visibility_and_third_party() {
    let rule = ConditionalRule::new(
        Condition::always().with_platforms(["Win64"]),
        Visibility::Private,
        vec!["Sockets".to_string()],
    )
    .with_third_party(vec!["OpenSSL".to_string()]);

    assert_eq!(rule.visibility(), Visibility::Private);
    assert_eq!(rule.dependencies(), ["Sockets".to_string()]);
    assert_eq!(rule.third_party(), ["OpenSSL".to_string()]);
    assert!(rule
        .condition()
        .evaluate(&target(TargetPlatform::Win64, false))
        .unwrap());
}
