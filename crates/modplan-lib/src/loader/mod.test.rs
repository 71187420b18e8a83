// Tests for descriptor loading

use super::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Write a descriptor file at a root-relative path, creating parents
fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn write_leaf_module(root: &Path, name: &str) -> PathBuf {
    write_file(
        root,
        &format!("{}.module.toml", name),
        &format!("name = \"{}\"\n", name),
    )
}

// ============================================================================
// Single File Parsing
// ============================================================================

#[test]
fn test_parse_full_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "SourceControl.module.toml",
        r#"
name = "SourceControl"
public_dependencies = ["Core"]
private_dependencies = ["InputCore", "Slate"]
include_path_dependencies = ["DesktopPlatform"]
third_party = ["zlib"]

[[conditional]]
platforms = ["Win64", "Mac"]
visibility = "private"
dependencies = ["Sockets"]
third_party = ["OpenSSL"]

[[conditional]]
editor = true
visibility = "private"
dependencies = ["UnrealEd"]
"#,
    );

    let descriptor = load_descriptor_file(&path).unwrap();

    assert_eq!(descriptor.name(), "SourceControl");
    assert_eq!(descriptor.public_dependencies(), ["Core".to_string()]);
    assert_eq!(
        descriptor.private_dependencies(),
        ["InputCore".to_string(), "Slate".to_string()]
    );
    assert_eq!(
        descriptor.include_path_dependencies(),
        ["DesktopPlatform".to_string()]
    );
    assert_eq!(descriptor.third_party(), ["zlib".to_string()]);

    let rules = descriptor.conditional_rules();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].visibility(), Visibility::Private);
    assert_eq!(rules[0].dependencies(), ["Sockets".to_string()]);
    assert_eq!(rules[0].third_party(), ["OpenSSL".to_string()]);
    assert_eq!(
        rules[0].condition().platforms,
        ["Win64".to_string(), "Mac".to_string()]
    );
    assert_eq!(rules[1].condition().editor, Some(true));
}

#[test]
fn test_minimal_descriptor_gets_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_leaf_module(temp_dir.path(), "Core");

    let descriptor = load_descriptor_file(&path).unwrap();

    assert_eq!(descriptor.name(), "Core");
    assert!(descriptor.public_dependencies().is_empty());
    assert_eq!(descriptor.public_include_paths(), ["Core/Public".to_string()]);
    assert_eq!(
        descriptor.private_include_paths(),
        ["Core/Private".to_string()]
    );
}

#[test]
fn test_explicit_empty_include_paths_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "Header.module.toml",
        r#"
name = "Header"
public_include_paths = ["Header"]
private_include_paths = []
"#,
    );

    let descriptor = load_descriptor_file(&path).unwrap();
    assert_eq!(descriptor.public_include_paths(), ["Header".to_string()]);
    assert!(descriptor.private_include_paths().is_empty());
}

#[test]
fn test_unknown_key_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "Engine.module.toml",
        "name = \"Engine\"\npublic_dependencys = [\"Core\"]\n",
    );

    let result = load_descriptor_file(&path);
    assert!(matches!(result.unwrap_err(), LoaderError::Parse { .. }));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "Broken.module.toml", "name = [unclosed\n");

    let result = load_descriptor_file(&path);
    assert!(matches!(
        result.unwrap_err(),
        LoaderError::Parse { path: reported, .. } if reported.ends_with("Broken.module.toml")
    ));
}

#[test]
fn test_cross_list_duplicate_is_a_descriptor_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "Engine.module.toml",
        r#"
name = "Engine"
public_dependencies = ["Core"]
private_dependencies = ["Core"]
"#,
    );

    let result = load_descriptor_file(&path);
    assert!(matches!(
        result.unwrap_err(),
        LoaderError::Descriptor {
            source: DescriptorError::DuplicateDependencyDeclaration { .. },
            ..
        }
    ));
}

// ============================================================================
// Directory Loading
// ============================================================================

#[test]
fn test_load_registry_walks_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    write_leaf_module(temp_dir.path(), "Launch");
    write_file(
        temp_dir.path(),
        "Runtime/Core/Core.module.toml",
        "name = \"Core\"\n",
    );
    write_file(
        temp_dir.path(),
        "Runtime/Engine/Engine.module.toml",
        "name = \"Engine\"\npublic_dependencies = [\"Core\"]\n",
    );

    // Unrelated files are skipped
    write_file(temp_dir.path(), "README.md", "# modules\n");
    write_file(temp_dir.path(), "Runtime/pack.toml", "name = \"pack\"\n");

    let registry = load_registry(temp_dir.path()).unwrap();

    assert_eq!(registry.len(), 3);
    assert!(registry.contains("Launch"));
    assert!(registry.contains("Core"));
    assert!(registry.contains("Engine"));
}

#[test]
fn test_load_registry_orders_by_file_name() {
    let temp_dir = TempDir::new().unwrap();
    write_leaf_module(temp_dir.path(), "Renderer");
    write_leaf_module(temp_dir.path(), "Audio");
    write_leaf_module(temp_dir.path(), "Media");

    let registry = load_registry(temp_dir.path()).unwrap();

    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, vec!["Audio", "Media", "Renderer"]);
}

#[test]
fn test_duplicate_module_name_across_files() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "A/Core.module.toml", "name = \"Core\"\n");
    write_file(temp_dir.path(), "B/Core.module.toml", "name = \"Core\"\n");

    let result = load_registry(temp_dir.path());
    assert!(matches!(
        result.unwrap_err(),
        LoaderError::Descriptor {
            source: DescriptorError::DuplicateModuleName { module },
            ..
        } if module == "Core"
    ));
}

#[test]
fn test_load_registry_of_empty_tree() {
    let temp_dir = TempDir::new().unwrap();
    let registry = load_registry(temp_dir.path()).unwrap();
    assert!(registry.is_empty());
}
