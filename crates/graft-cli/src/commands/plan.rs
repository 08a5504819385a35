//! `graft plan`: show what `apply` would change.

use tracing::instrument;

use graft_core::application::ApplyPlan;

use crate::{
    cli::ModuleArgs,
    commands::prepare,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(module = %args.module.display()))]
pub fn execute(args: ModuleArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let prepared = prepare(&args, &config)?;
    let plan = prepared.applier.plan(&prepared.module, &prepared.project)?;
    render(&plan, &output)
}

/// Print a plan; shared with `apply --dry-run`.
pub fn render(plan: &ApplyPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(plan);
    }

    output.header(&format!(
        "Plan for module '{}' on {}",
        plan.module,
        plan.project.display()
    ))?;

    if !plan.pre_actions.is_empty() {
        output.print("Pre-actions:")?;
        for (index, action) in plan.pre_actions.iter().enumerate() {
            output.print(&format!("  {}. {action}", index + 1))?;
        }
    }

    if !plan.dependencies.is_empty() {
        output.print("Dependencies:")?;
        for dependency in &plan.dependencies {
            output.print(&format!("  + {dependency}"))?;
        }
    }

    output.print("Files:")?;
    for file in &plan.files {
        let marker = if file.overwrites { "~" } else { "+" };
        let executable = if file.executable { " (executable)" } else { "" };
        output.print(&format!(
            "  {marker} {}{executable}  <- {}",
            file.destination.display(),
            file.source
        ))?;
    }

    let overwrites = plan.files.iter().filter(|f| f.overwrites).count();
    if overwrites > 0 {
        output.warning(&format!("{overwrites} existing file(s) would be overwritten"))?;
    }
    output.info("Dry run: nothing was changed")?;
    Ok(())
}
