//! E2E tests for the check command
//!
//! Check sweeps the full platform/configuration/editor matrix, so these
//! tests pin the matrix size and the pass/fail reporting shape.

use anyhow::Result;
use modplan_tests::{TestEnvironment, fixtures};
use predicates::prelude::*;

#[test]
fn check_reports_all_targets_resolved() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    env.command()?
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok   Win64-Debug (5 modules)"))
        .stdout(predicate::str::contains(
            "ok   Linux-Shipping-Editor (5 modules)",
        ))
        .stdout(predicate::str::contains("All 40 targets resolved"));

    Ok(())
}

#[test]
fn check_covers_conditional_targets() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_conditional_stack(&env)?;

    env.command()?
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 40 targets resolved"));

    Ok(())
}

#[test]
fn check_fails_when_every_target_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_cyclic_stack(&env)?;

    env.command()?
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "FAIL Win64-Development: Circular module dependency",
        ))
        .stderr(predicate::str::contains(
            "40 of 40 targets failed to resolve",
        ));

    Ok(())
}

#[test]
fn check_pinpoints_target_specific_failures() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_descriptor(
        "Core/Core.module.toml",
        r#"
name = "Core"
"#,
    )?;
    env.write_descriptor(
        "Media/Media.module.toml",
        r#"
name = "Media"
private_dependencies = ["Core"]

[[conditional]]
platforms = ["ios"]
visibility = "private"
dependencies = ["AVFoundationSupport"]
"#,
    )?;

    env.command()?
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ok   Win64-Development (2 modules)"))
        .stdout(predicate::str::contains(
            "FAIL IOS-Development: Module 'Media' depends on unknown module 'AVFoundationSupport'",
        ))
        .stderr(predicate::str::contains("8 of 40 targets failed to resolve"));

    Ok(())
}
