use super::*;

#[test]
fn test_platform_display() {
    assert_eq!(TargetPlatform::Win64.to_string(), "Win64");
    assert_eq!(TargetPlatform::Ios.to_string(), "IOS");
}

#[test]
fn test_platform_parse() {
    assert_eq!(
        "win64".parse::<TargetPlatform>().unwrap(),
        TargetPlatform::Win64
    );
    assert_eq!("Mac".parse::<TargetPlatform>().unwrap(), TargetPlatform::Mac);
    assert_eq!("IOS".parse::<TargetPlatform>().unwrap(), TargetPlatform::Ios);
    assert!("Amiga".parse::<TargetPlatform>().is_err());
}

#[test]
fn test_configuration_parse() {
    assert_eq!(
        "development".parse::<BuildConfiguration>().unwrap(),
        BuildConfiguration::Development
    );
    assert_eq!(
        "Shipping".parse::<BuildConfiguration>().unwrap(),
        BuildConfiguration::Shipping
    );
    assert!("profile".parse::<BuildConfiguration>().is_err());
}

#[test]
fn test_target_context_display() {
    let target = TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Development, false);
    assert_eq!(target.to_string(), "Win64-Development");

    let editor = TargetContext::new(TargetPlatform::Mac, BuildConfiguration::Debug, true);
    assert_eq!(editor.to_string(), "Mac-Debug-Editor");
}

#[test]
fn test_target_context_matrix() {
    let contexts = TargetContext::all();
    assert_eq!(contexts.len(), 5 * 4 * 2);

    // Fixed enumeration order, editor variant directly after its base target
    assert_eq!(
        contexts[0],
        TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Debug, false)
    );
    assert_eq!(
        contexts[1],
        TargetContext::new(TargetPlatform::Win64, BuildConfiguration::Debug, true)
    );

    let unique: std::collections::HashSet<_> = contexts.iter().collect();
    assert_eq!(unique.len(), contexts.len());
}
