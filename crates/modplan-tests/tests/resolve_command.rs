//! E2E tests for the resolve command
//!
//! These drive the real binary against staged descriptor trees and check
//! the rendered plans, both text and JSON.

use anyhow::Result;
use modplan_lib::{
    BuildConfiguration, BuildPlan, TargetContext, TargetPlatform, load_registry, resolve,
};
use modplan_tests::{TestEnvironment, fixtures};
use predicates::prelude::*;

#[test]
fn resolve_renders_text_plan_in_build_order() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    env.command()?
        .args(["resolve", "--platform", "win64"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Build plan for Win64-Development (5 modules)",
        ))
        .stdout(predicate::str::contains(
            "Game\n  includes: Game/Public, Game/Private, Renderer/Public, Engine/Public, Core/Public\n",
        ))
        .stdout(predicate::str::contains(
            "ShaderTool\n  includes: ShaderTool/Public, ShaderTool/Private, Renderer/Public\n  exports: ShaderTool/Public\n  links: (none)\n",
        ));

    Ok(())
}

#[test]
fn resolve_json_plan_is_ordered_and_complete() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    let assert = env
        .command()?
        .args(["resolve", "--platform", "linux", "--format", "json"])
        .assert()
        .success();
    let plan: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;

    let names: Vec<&str> = plan["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|module| module["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Core", "Engine", "Renderer", "Game", "ShaderTool"]);

    assert_eq!(plan["target"]["platform"], "linux");
    assert_eq!(plan["target"]["editor"], false);
    assert_eq!(
        plan["modules"][3]["link_dependencies"],
        serde_json::json!(["Renderer", "Engine", "Core"])
    );
    assert_eq!(
        plan["modules"][2]["third_party"],
        serde_json::json!(["Vulkan"])
    );

    Ok(())
}

#[test]
fn resolve_json_matches_in_process_resolution() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    let assert = env
        .command()?
        .args(["resolve", "-p", "linux", "-f", "json"])
        .assert()
        .success();
    let emitted: BuildPlan = serde_json::from_slice(&assert.get_output().stdout)?;

    let registry = load_registry(&env.work_path)?;
    let target = TargetContext::new(TargetPlatform::Linux, BuildConfiguration::Development, false);
    assert_eq!(emitted, resolve(&registry, &target)?);

    Ok(())
}

#[test]
fn resolve_json_output_is_reproducible() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    let first = env
        .command()?
        .args(["resolve", "-p", "mac", "-f", "json"])
        .assert()
        .success();
    let second = env
        .command()?
        .args(["resolve", "-p", "mac", "-f", "json"])
        .assert()
        .success();

    assert_eq!(first.get_output().stdout, second.get_output().stdout);

    Ok(())
}

#[test]
fn resolve_editor_flag_activates_editor_rules() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_conditional_stack(&env)?;

    let links_of = |stdout: &[u8], name: &str| -> Result<serde_json::Value> {
        let plan: serde_json::Value = serde_json::from_slice(stdout)?;
        let module = plan["modules"]
            .as_array()
            .unwrap()
            .iter()
            .find(|module| module["name"] == name)
            .unwrap()
            .clone();
        Ok(module["link_dependencies"].clone())
    };

    let without = env
        .command()?
        .args(["resolve", "-p", "win64", "-f", "json"])
        .assert()
        .success();
    assert_eq!(
        links_of(&without.get_output().stdout, "EditorTools")?,
        serde_json::json!(["Core"])
    );

    let with = env
        .command()?
        .args(["resolve", "-p", "win64", "-e", "-f", "json"])
        .assert()
        .success();
    assert_eq!(
        links_of(&with.get_output().stdout, "EditorTools")?,
        serde_json::json!(["Core", "UnrealEd"])
    );

    Ok(())
}

#[test]
fn resolve_platform_gates_third_party_tags() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_conditional_stack(&env)?;

    let tags_of = |stdout: &[u8]| -> Result<serde_json::Value> {
        let plan: serde_json::Value = serde_json::from_slice(stdout)?;
        let module = plan["modules"]
            .as_array()
            .unwrap()
            .iter()
            .find(|module| module["name"] == "Sockets")
            .unwrap()
            .clone();
        Ok(module["third_party"].clone())
    };

    let win = env
        .command()?
        .args(["resolve", "-p", "win64", "-f", "json"])
        .assert()
        .success();
    assert_eq!(
        tags_of(&win.get_output().stdout)?,
        serde_json::json!(["zlib", "OpenSSL"])
    );

    let linux = env
        .command()?
        .args(["resolve", "-p", "linux", "-f", "json"])
        .assert()
        .success();
    assert_eq!(
        tags_of(&linux.get_output().stdout)?,
        serde_json::json!(["zlib"])
    );

    Ok(())
}

#[test]
fn resolve_missing_reference_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_descriptor(
        "Game/Game.module.toml",
        r#"
name = "Game"
public_dependencies = ["Engine"]
"#,
    )?;

    env.command()?
        .args(["resolve", "--platform", "win64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Module 'Game' depends on unknown module 'Engine'",
        ));

    Ok(())
}

#[test]
fn resolve_cycle_reports_closed_path() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_cyclic_stack(&env)?;

    env.command()?
        .args(["resolve", "--platform", "win64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Circular module dependency: Alpha → Beta → Gamma → Alpha",
        ));

    Ok(())
}

#[test]
fn resolve_rejects_unknown_platform() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    env.command()?
        .args(["resolve", "--platform", "amiga"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'amiga'"));

    Ok(())
}
