//! E2E tests for the graph command

use anyhow::Result;
use modplan_tests::{TestEnvironment, fixtures};
use predicates::prelude::*;

#[test]
fn graph_lists_sorted_edges_with_visibility() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_engine_stack(&env)?;

    env.command()?
        .args(["graph", "--platform", "win64"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dependency graph for Win64-Development (5 modules, 4 edges)",
        ))
        .stdout(predicate::str::contains(
            "Engine -> Core  [public]\n\
             Game -> Renderer  [private]\n\
             Renderer -> Engine  [public]\n\
             ShaderTool -> Renderer  [include-only]\n",
        ));

    Ok(())
}

#[test]
fn graph_edges_follow_the_target() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_conditional_stack(&env)?;

    env.command()?
        .args(["graph", "-p", "win64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EditorTools -> UnrealEd").not());

    env.command()?
        .args(["graph", "-p", "win64", "-e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EditorTools -> UnrealEd  [public]"));

    Ok(())
}

#[test]
fn graph_renders_even_when_ordering_would_fail() -> Result<()> {
    let env = TestEnvironment::new()?;
    fixtures::stage_cyclic_stack(&env)?;

    env.command()?
        .args(["graph", "-p", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha -> Beta  [public]"));

    Ok(())
}
