//! `graft apply`: apply a module to a project.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use graft_core::application::ApplyReport;

use crate::{
    cli::ApplyArgs,
    commands::{plan, prepare},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape of a finished run.
#[derive(Serialize)]
struct AppliedOutput<'a> {
    applied_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a ApplyReport,
}

/// Execute `graft apply`.
///
/// 1. Load the module and wire the adapters
/// 2. `--dry-run`: print the plan and stop
/// 3. Apply and print the report
#[instrument(skip_all, fields(module = %args.module.module.display()))]
pub fn execute(args: ApplyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let prepared = prepare(&args.module, &config)?;

    if args.dry_run {
        let plan = prepared.applier.plan(&prepared.module, &prepared.project)?;
        return plan::render(&plan, &output);
    }

    output.header(&format!(
        "Applying module '{}' to {}",
        prepared.module.display_name(),
        prepared.project
    ))?;

    let report = prepared.applier.apply(&prepared.module, &prepared.project)?;
    info!(run_id = %report.run_id, files = report.files_written.len(), "Module applied");

    if output.is_json() {
        return output.json(&AppliedOutput {
            applied_at: Utc::now(),
            report: &report,
        });
    }

    for action in &report.pre_actions_run {
        output.print(&format!("  ran      {action}"))?;
    }
    for dependency in &report.dependencies {
        output.print(&format!("  declared {dependency}"))?;
    }
    for file in &report.files_written {
        output.print(&format!("  wrote    {}", file.display()))?;
    }

    output.success(&format!(
        "Module '{}' applied: {} file(s), {} dependenc{} (run {})",
        report.module,
        report.files_written.len(),
        report.dependencies.len(),
        if report.dependencies.len() == 1 { "y" } else { "ies" },
        report.run_id
    ))?;
    Ok(())
}
