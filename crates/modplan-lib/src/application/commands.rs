//! Command execution handlers
//!
//! Maps parsed CLI commands onto the descriptor loader and the resolution
//! pipeline. Handlers print to stdout; diagnostics go through tracing.

use crate::application::{CliConfig, Commands, OutputFormat};
use crate::loader::load_registry;
use crate::modplan::{BuildPlan, DependencyGraph, ModuleRegistry, resolve};
use crate::primitives::TargetContext;
use anyhow::{Context, Result};

/// Execute CLI commands against the configured descriptor tree
pub fn execute_command(config: CliConfig) -> Result<()> {
    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            println!("modplan - module dependency resolution");
            println!("Run 'modplan --help' for usage information");
            return Ok(());
        }
    };

    config.app_config.validate()?;
    let workdir = &config.app_config.workdir;
    let registry = load_registry(workdir).with_context(|| {
        format!(
            "Failed to load module descriptors from {}",
            workdir.display()
        )
    })?;

    match command {
        Commands::Resolve {
            platform,
            configuration,
            editor,
            format,
        } => handle_resolve(
            &registry,
            TargetContext::new(platform, configuration, editor),
            format,
        ),
        Commands::Check => handle_check(&registry),
        Commands::Graph {
            platform,
            configuration,
            editor,
        } => handle_graph(
            &registry,
            TargetContext::new(platform, configuration, editor),
        ),
        Commands::Modules => handle_modules(&registry),
    }
}

fn handle_resolve(
    registry: &ModuleRegistry,
    target: TargetContext,
    format: OutputFormat,
) -> Result<()> {
    let plan = resolve(registry, &target)?;

    match format {
        OutputFormat::Text => print!("{}", render_plan_text(&plan)),
        OutputFormat::Json => println!("{}", plan.to_json()?),
    }

    Ok(())
}

fn handle_check(registry: &ModuleRegistry) -> Result<()> {
    let targets = TargetContext::all();
    let mut failures = 0usize;

    for target in &targets {
        match resolve(registry, target) {
            Ok(plan) => println!("ok   {} ({} modules)", target, plan.modules.len()),
            Err(error) => {
                failures += 1;
                println!("FAIL {}: {}", target, error);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} targets failed to resolve", failures, targets.len());
    }

    println!("All {} targets resolved", targets.len());
    Ok(())
}

fn handle_graph(registry: &ModuleRegistry, target: TargetContext) -> Result<()> {
    let graph = DependencyGraph::build(registry, &target)?;

    println!(
        "Dependency graph for {} ({} modules, {} edges)",
        target,
        graph.module_count(),
        graph.edge_count()
    );

    let mut edges = graph.edges();
    edges.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
    for edge in edges {
        println!("{} -> {}  [{}]", edge.from, edge.to, edge.visibility);
    }

    Ok(())
}

fn handle_modules(registry: &ModuleRegistry) -> Result<()> {
    println!("{} module descriptors", registry.len());

    for descriptor in registry.iter() {
        println!(
            "{}  (public: {}, private: {}, include-only: {}, conditional rules: {})",
            descriptor.name(),
            descriptor.public_dependencies().len(),
            descriptor.private_dependencies().len(),
            descriptor.include_path_dependencies().len(),
            descriptor.conditional_rules().len(),
        );
    }

    Ok(())
}

/// Render a plan as an indented per-module summary
fn render_plan_text(plan: &BuildPlan) -> String {
    let mut out = format!(
        "Build plan for {} ({} modules)\n",
        plan.target,
        plan.modules.len()
    );

    for module in &plan.modules {
        out.push_str(&format!("\n{}\n", module.name));
        out.push_str(&format!(
            "  includes: {}\n",
            join_or_none(&module.include_paths)
        ));
        out.push_str(&format!(
            "  exports: {}\n",
            join_or_none(&module.exported_include_paths)
        ));
        out.push_str(&format!(
            "  links: {}\n",
            join_or_none(&module.link_dependencies)
        ));
        out.push_str(&format!(
            "  third-party: {}\n",
            join_or_none(&module.third_party)
        ));
    }

    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
