//! E2E tests for the modules command and loader failure surfaces

use anyhow::Result;
use assert_cmd::Command;
use modplan_tests::{TestEnvironment, fixtures};
use predicates::prelude::*;

#[test]
fn modules_lists_descriptors_with_declaration_counts() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_conditional_stack(&env)?;

    env.command()?
        .arg("modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 module descriptors"))
        .stdout(predicate::str::contains(
            "EditorTools  (public: 0, private: 1, include-only: 0, conditional rules: 1)",
        ))
        .stdout(predicate::str::contains(
            "UnrealEd  (public: 1, private: 0, include-only: 0, conditional rules: 0)",
        ));

    Ok(())
}

#[test]
fn modules_with_empty_tree_reports_zero() -> Result<()> {
    let env = TestEnvironment::new()?;

    env.command()?
        .arg("modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 module descriptors"));

    Ok(())
}

#[test]
fn no_subcommand_prints_usage_hint() -> Result<()> {
    let env = TestEnvironment::new()?;

    env.command()?
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Run 'modplan --help' for usage information",
        ));

    Ok(())
}

#[test]
fn malformed_descriptor_fails_with_file_path() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_descriptor(
        "Broken/Broken.module.toml",
        r#"
name = "Broken"
publik_dependencies = ["Core"]
"#,
    )?;

    env.command()?
        .arg("modules")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse descriptor"))
        .stderr(predicate::str::contains("Broken.module.toml"));

    Ok(())
}

#[test]
fn duplicate_module_name_across_files_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;
    env.write_descriptor(
        "Duplicate/Core.module.toml",
        r#"
name = "Core"
"#,
    )?;

    env.command()?
        .arg("modules")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate module name: Core"));

    Ok(())
}

#[test]
fn missing_workdir_fails_validation() -> Result<()> {
    let env = TestEnvironment::new()?;
    let missing = env.work_path.join("nope");

    let mut cmd = Command::cargo_bin("modplan")?;
    cmd.arg("-C").arg(&missing).arg("modules");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid working directory"));

    Ok(())
}
