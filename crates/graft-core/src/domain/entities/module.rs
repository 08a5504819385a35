//! The `Module` aggregate root and its builder.
//!
//! A module is one generator feature ("add springdoc", "add a Dockerfile")
//! expressed as data: files to place, a substitution context, dependencies
//! to declare, and pre-actions to run. Factories describe a module through
//! [`ModuleBuilder`]; the application engine consumes the built [`Module`].
//!
//! ```rust
//! use graft_core::domain::{module_for_project, from, to, Dependency, ProjectFolder};
//!
//! let mut builder = module_for_project(ProjectFolder::new("/tmp/app")?);
//! builder.context().put("name", "demo")?;
//! builder.files().add(from("foo.txt")?, to("out/bar.txt")?);
//! builder.dependencies().add(
//!     Dependency::builder()
//!         .group_id("org.acme")?
//!         .artifact_id("core")?
//!         .version_slug("acme")?
//!         .build(),
//! );
//! let module = builder.build()?;
//!
//! assert_eq!(module.templated_files().len(), 1);
//! # Ok::<(), graft_core::domain::DomainError>(())
//! ```

use std::fmt;

use crate::domain::{
    entities::{
        context::{Context, ContextBuilder},
        dependencies::{Dependencies, DependenciesBuilder},
        dependency::{Dependency, DependencyBuilder, NoGroupId},
        files::{FilesBuilder, ModuleFiles, TemplatedFile, TemplatedFiles},
        pre_action::{PreActions, PreActionsBuilder},
    },
    error::DomainError,
    value_objects::{Destination, ModuleSlug, ProjectFolder, Source},
};

// ── Factory helpers ──────────────────────────────────────────────────────────

/// Start describing a module for `folder`.
pub fn module_for_project(folder: ProjectFolder) -> ModuleBuilder {
    Module::for_project(folder)
}

/// Template source under the generator root.
pub fn from(source: impl AsRef<str>) -> Result<Source, DomainError> {
    Source::new(source)
}

/// Destination inside the project.
pub fn to(destination: impl AsRef<str>) -> Result<Destination, DomainError> {
    Destination::new(destination)
}

pub fn to_src_main_java() -> Destination {
    Destination::SRC_MAIN_JAVA
}

pub fn to_src_test_java() -> Destination {
    Destination::SRC_TEST_JAVA
}

pub fn dependency() -> DependencyBuilder<NoGroupId> {
    Dependency::builder()
}

// ── Aggregate root ───────────────────────────────────────────────────────────

/// A finalized, immutable module.
#[derive(Debug, Clone)]
pub struct Module {
    project_folder: ProjectFolder,
    slug: Option<ModuleSlug>,
    files: ModuleFiles,
    context: Context,
    dependencies: Dependencies,
    pre_actions: PreActions,
}

impl Module {
    pub fn for_project(folder: ProjectFolder) -> ModuleBuilder {
        ModuleBuilder::new(folder)
    }

    pub fn project_folder(&self) -> &ProjectFolder {
        &self.project_folder
    }

    pub fn slug(&self) -> Option<&ModuleSlug> {
        self.slug.as_ref()
    }

    /// Slug for logs and error messages; `<unnamed>` when none was given.
    pub fn display_name(&self) -> String {
        self.slug
            .as_ref()
            .map_or_else(|| "<unnamed>".to_string(), ToString::to_string)
    }

    pub fn files(&self) -> &ModuleFiles {
        &self.files
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    pub fn pre_actions(&self) -> &PreActions {
        &self.pre_actions
    }

    /// Every file bound to the module context. Pure: calling it again
    /// yields an equal collection.
    pub fn templated_files(&self) -> TemplatedFiles<'_> {
        TemplatedFiles::new(
            self.files
                .iter()
                .map(|file| TemplatedFile::new(file, &self.context))
                .collect(),
        )
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} files, {} dependencies, {} pre-actions)",
            self.display_name(),
            self.files.len(),
            self.dependencies.len(),
            self.pre_actions.len()
        )
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Single-use builder; `build` consumes it.
///
/// The four sub-builders are independent, so a factory may interleave
/// calls to them in any order.
#[derive(Debug)]
pub struct ModuleBuilder {
    project_folder: ProjectFolder,
    slug: Option<ModuleSlug>,
    context: ContextBuilder,
    files: FilesBuilder,
    dependencies: DependenciesBuilder,
    pre_actions: PreActionsBuilder,
}

impl ModuleBuilder {
    fn new(project_folder: ProjectFolder) -> Self {
        Self {
            project_folder,
            slug: None,
            context: Context::builder(),
            files: ModuleFiles::builder(),
            dependencies: Dependencies::builder(),
            pre_actions: PreActions::builder(),
        }
    }

    /// Name the module, e.g. `springdoc-mvc`.
    pub fn slug(&mut self, slug: impl Into<String>) -> Result<&mut Self, DomainError> {
        self.slug = Some(ModuleSlug::new(slug)?);
        Ok(self)
    }

    pub fn project_folder(&self) -> &ProjectFolder {
        &self.project_folder
    }

    pub fn context(&mut self) -> &mut ContextBuilder {
        &mut self.context
    }

    pub fn files(&mut self) -> &mut FilesBuilder {
        &mut self.files
    }

    pub fn dependencies(&mut self) -> &mut DependenciesBuilder {
        &mut self.dependencies
    }

    pub fn pre_actions(&mut self) -> &mut PreActionsBuilder {
        &mut self.pre_actions
    }

    /// Finalize all four sub-builders.
    ///
    /// # Errors
    ///
    /// `DuplicateDependencyConflict` if two dependency declarations clash.
    pub fn build(self) -> Result<Module, DomainError> {
        Ok(Module {
            project_folder: self.project_folder,
            slug: self.slug,
            files: self.files.build(),
            context: self.context.build(),
            dependencies: self.dependencies.build()?,
            pre_actions: self.pre_actions.build(),
        })
    }
}
