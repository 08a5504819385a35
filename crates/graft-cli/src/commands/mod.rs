//! Command handlers. Each translates parsed arguments into engine calls and
//! renders the result; no module logic lives here.

pub mod apply;
pub mod completions;
pub mod config;
pub mod list;
pub mod plan;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use graft_adapters::{
    FileSystemTemplateRepository, InMemoryVersionRegistry, LocalFilesystem, MavenPomDescriptor,
    TomlVersionRegistry, load_module,
};
use graft_core::{
    application::{ModuleApplier, ports::VersionRegistry},
    domain::{Module, ProjectFolder},
    error::GraftError,
};

use crate::{
    cli::ModuleArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Everything `apply` and `plan` need: the loaded module, the resolved
/// project folder and an applier wired to the local adapters.
pub struct Prepared {
    pub module: Module,
    pub project: ProjectFolder,
    pub applier: ModuleApplier,
}

/// Validate paths, load the module and wire the adapters.
pub fn prepare(args: &ModuleArgs, config: &AppConfig) -> CliResult<Prepared> {
    if !args.module.is_file() {
        return Err(CliError::ModuleNotFound {
            path: args.module.clone(),
        });
    }
    if !args.project.is_dir() {
        return Err(CliError::ProjectNotFound {
            path: args.project.clone(),
        });
    }

    let project_path = std::path::absolute(&args.project)
        .with_cli_context(|| format!("Failed to resolve {}", args.project.display()))?;
    let project = ProjectFolder::new(project_path).map_err(GraftError::from)?;
    let module = load_module(&args.module, project.clone())?;

    let templates = config.templates_root(args.templates.as_deref(), &module_dir(&args.module));
    let versions = version_registry(config.versions_registry(args.versions.as_deref()))?;
    debug!(templates = %templates.display(), "Adapters resolved");

    let filesystem = Arc::new(LocalFilesystem::new());
    let applier = ModuleApplier::new(
        Box::new(FileSystemTemplateRepository::new(templates)),
        versions,
        Box::new(MavenPomDescriptor::new(filesystem.clone())),
        Box::new(filesystem),
    );

    Ok(Prepared {
        module,
        project,
        applier,
    })
}

/// Folder holding the module descriptor; the default template root.
fn module_dir(module: &Path) -> PathBuf {
    match module.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn version_registry(path: Option<PathBuf>) -> CliResult<Box<dyn VersionRegistry>> {
    Ok(match path {
        Some(path) => Box::new(TomlVersionRegistry::load(path)?),
        None => Box::new(InMemoryVersionRegistry::new()),
    })
}
