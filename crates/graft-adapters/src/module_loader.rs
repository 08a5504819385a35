//! Loads a module definition from a `module.toml` file.
//!
//! # Format
//!
//! ```toml
//! [module]
//! slug = "springdoc"
//!
//! # Optional: seeds baseName, packageName, packagePath, ...
//! [project]
//! base_package = "com.acme.shop"
//! base_name = "shop"
//!
//! [context]
//! apiTitle = "Shop API"
//!
//! [[files]]
//! source = "springdoc/SpringdocConfiguration.java"
//! destinations = ["src/main/java/{{packagePath}}/SpringdocConfiguration.java"]
//!
//! [[dependencies]]
//! group_id = "org.springdoc"
//! artifact_id = "springdoc-openapi-ui"
//! version_slug = "springdoc-openapi"
//!
//! [[pre_actions]]
//! create_directory = "src/main/resources/config"
//!
//! [[pre_actions]]
//! command = ["git", "init"]
//! ```
//!
//! Destinations go through the module context, so they may use the same
//! `{{key}}` tokens as templates.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, instrument};

use graft_core::{
    application::ApplicationError,
    domain::{
        Context, Dependency, DependencyScope, Module, ModuleProperties, PreAction, ProjectFolder,
        from, module_for_project, to,
    },
    error::{GraftError, GraftResult},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleFile {
    module: ModuleSection,
    project: Option<ProjectSection>,
    #[serde(default)]
    context: IndexMap<String, String>,
    #[serde(default)]
    files: Vec<FileEntry>,
    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
    #[serde(default)]
    pre_actions: Vec<PreActionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleSection {
    slug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectSection {
    base_package: Option<String>,
    base_name: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileEntry {
    source: String,
    destinations: Vec<String>,
    #[serde(default)]
    executable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyEntry {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    version_slug: Option<String>,
    scope: Option<String>,
    #[serde(rename = "type")]
    dependency_type: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    exclusions: Vec<ExclusionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExclusionEntry {
    group_id: String,
    artifact_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PreActionEntry {
    CreateDirectory(String),
    Command(Vec<String>),
}

/// Read and build the module at `path` for `project`.
///
/// # Errors
///
/// - `DescriptorLoad` if the file cannot be read or is malformed
/// - `Domain` if a value is rejected by the module builder
#[instrument(skip_all, fields(path = %path.as_ref().display(), project = %project))]
pub fn load_module(path: impl AsRef<Path>, project: ProjectFolder) -> GraftResult<Module> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| ApplicationError::DescriptorLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let module = parse_module(&raw, path, project)?;
    debug!(
        module = %module.display_name(),
        files = module.files().len(),
        dependencies = module.dependencies().len(),
        "loaded module definition"
    );
    Ok(module)
}

/// Build a module from `module.toml` content; `origin` is only used in
/// error messages.
pub fn parse_module(
    raw: &str,
    origin: impl Into<PathBuf>,
    project: ProjectFolder,
) -> GraftResult<Module> {
    let origin = origin.into();
    let malformed = |reason: String| ApplicationError::DescriptorLoad {
        path: origin.clone(),
        reason,
    };

    let file: ModuleFile = toml::from_str(raw).map_err(|e| malformed(e.to_string()))?;

    let mut context = Context::builder();
    if let Some(section) = &file.project {
        let properties = project_properties(&project, section)?;
        context.with_project_defaults(&properties);
    }
    context.put_all(file.context)?;
    let context = context.build();

    let mut builder = module_for_project(project);
    if let Some(slug) = file.module.slug {
        builder.slug(slug)?;
    }
    builder.context().put_all(context.iter())?;

    for entry in file.files {
        let source = from(&entry.source)?;
        for destination in &entry.destinations {
            let destination = to(context.render(destination))?;
            if entry.executable {
                builder.files().add_executable(source.clone(), destination);
            } else {
                builder.files().add(source.clone(), destination);
            }
        }
    }

    for entry in file.dependencies {
        let dependency = dependency_from(entry).map_err(|e| match e {
            EntryError::Domain(e) => GraftError::from(e),
            EntryError::Malformed(reason) => GraftError::from(malformed(reason)),
        })?;
        builder.dependencies().add(dependency);
    }

    for entry in file.pre_actions {
        let action = match entry {
            PreActionEntry::CreateDirectory(destination) => {
                PreAction::create_directory(to(destination)?)
            }
            PreActionEntry::Command(argv) => {
                if argv.is_empty() {
                    return Err(malformed("pre-action command must not be empty".into()).into());
                }
                command_action(argv)
            }
        };
        builder.pre_actions().add(action);
    }

    Ok(builder.build()?)
}

fn project_properties(
    project: &ProjectFolder,
    section: &ProjectSection,
) -> GraftResult<ModuleProperties> {
    let mut properties = ModuleProperties::builder(project.path())?;
    if let Some(package) = &section.base_package {
        properties = properties.base_package(package)?;
    }
    if let Some(base_name) = &section.base_name {
        properties = properties.project_base_name(base_name)?;
    }
    if let Some(name) = &section.name {
        properties = properties.project_name(name)?;
    }
    Ok(properties.build())
}

enum EntryError {
    Domain(graft_core::domain::DomainError),
    Malformed(String),
}

impl From<graft_core::domain::DomainError> for EntryError {
    fn from(e: graft_core::domain::DomainError) -> Self {
        Self::Domain(e)
    }
}

fn dependency_from(entry: DependencyEntry) -> Result<Dependency, EntryError> {
    let mut builder = Dependency::builder()
        .group_id(entry.group_id)?
        .artifact_id(entry.artifact_id)?;

    builder = match (entry.version, entry.version_slug) {
        (Some(_), Some(_)) => {
            return Err(EntryError::Malformed(
                "a dependency takes either `version` or `version_slug`, not both".into(),
            ));
        }
        (Some(version), None) => builder.version(version)?,
        (None, Some(slug)) => builder.version_slug(slug)?,
        (None, None) => builder,
    };

    if let Some(scope) = entry.scope {
        builder = builder.scope(scope.parse::<DependencyScope>()?);
    }
    if let Some(kind) = entry.dependency_type {
        builder = builder.dependency_type(kind)?;
    }
    if entry.optional {
        builder = builder.optional();
    }
    for exclusion in entry.exclusions {
        builder = builder.exclusion(exclusion.group_id, exclusion.artifact_id)?;
    }

    Ok(builder.build())
}

fn command_action(argv: Vec<String>) -> PreAction {
    let description = format!("run `{}`", argv.join(" "));

    PreAction::run(description, move |project| {
        let Some((program, args)) = argv.split_first() else {
            return Ok(());
        };
        let status = Command::new(program)
            .args(args)
            .current_dir(project.path())
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("`{program}` exited with {status}").into())
        }
    })
}
