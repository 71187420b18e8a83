//! Canned descriptor trees for E2E tests
//!
//! Each stager writes a small, self-contained module tree into a
//! [`TestEnvironment`]. Trees are kept deliberately close to the engine
//! layouts the resolver is built for.

use crate::test_env::TestEnvironment;
use anyhow::Result;

/// Linear engine stack with one include-only consumer
///
/// Link chain: Game -> Renderer -> Engine -> Core. ShaderTool sees
/// Renderer's headers without linking it.
pub fn stage_engine_stack(env: &TestEnvironment) -> Result<()> {
    env.write_descriptor(
        "Core/Core.module.toml",
        r#"
name = "Core"
"#,
    )?;
    env.write_descriptor(
        "Engine/Engine.module.toml",
        r#"
name = "Engine"
public_dependencies = ["Core"]
"#,
    )?;
    env.write_descriptor(
        "Renderer/Renderer.module.toml",
        r#"
name = "Renderer"
public_dependencies = ["Engine"]
third_party = ["Vulkan"]
"#,
    )?;
    env.write_descriptor(
        "Game/Game.module.toml",
        r#"
name = "Game"
private_dependencies = ["Renderer"]
"#,
    )?;
    env.write_descriptor(
        "ShaderTool/ShaderTool.module.toml",
        r#"
name = "ShaderTool"
include_path_dependencies = ["Renderer"]
"#,
    )?;
    Ok(())
}

/// Stack whose edges and third-party tags depend on the target
///
/// Sockets pulls OpenSSL on Win64 only; EditorTools links UnrealEd only
/// when editor support is enabled.
pub fn stage_conditional_stack(env: &TestEnvironment) -> Result<()> {
    env.write_descriptor(
        "Core/Core.module.toml",
        r#"
name = "Core"
"#,
    )?;
    env.write_descriptor(
        "UnrealEd/UnrealEd.module.toml",
        r#"
name = "UnrealEd"
public_dependencies = ["Core"]
"#,
    )?;
    env.write_descriptor(
        "Sockets/Sockets.module.toml",
        r#"
name = "Sockets"
private_dependencies = ["Core"]
third_party = ["zlib"]

[[conditional]]
platforms = ["win64"]
visibility = "private"
third_party = ["OpenSSL"]
"#,
    )?;
    env.write_descriptor(
        "EditorTools/EditorTools.module.toml",
        r#"
name = "EditorTools"
private_dependencies = ["Core"]

[[conditional]]
editor = true
visibility = "public"
dependencies = ["UnrealEd"]
"#,
    )?;
    Ok(())
}

/// Three modules linked in a ring; resolution always fails
pub fn stage_cyclic_stack(env: &TestEnvironment) -> Result<()> {
    env.write_descriptor(
        "Alpha/Alpha.module.toml",
        r#"
name = "Alpha"
public_dependencies = ["Beta"]
"#,
    )?;
    env.write_descriptor(
        "Beta/Beta.module.toml",
        r#"
name = "Beta"
public_dependencies = ["Gamma"]
"#,
    )?;
    env.write_descriptor(
        "Gamma/Gamma.module.toml",
        r#"
name = "Gamma"
public_dependencies = ["Alpha"]
"#,
    )?;
    Ok(())
}
