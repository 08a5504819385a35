//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the module applier needs from the outside
//! world. The `graft-adapters` crate provides implementations.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Dependency, DependencyId, ProjectFolder, Source, VersionSlug};
use crate::error::GraftResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `graft_adapters::filesystem::LocalFilesystem` (production)
/// - `graft_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths are absolute; the applier resolves them against the project
/// - `write_file_atomic` must never leave a partially written file behind
/// - `write_file_atomic` expects the parent directory to exist
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GraftResult<()>;

    /// Replace the content of `path` in one step (temp file + rename).
    fn write_file_atomic(&self, path: &Path, content: &str) -> GraftResult<()>;

    /// Mark a file executable.
    fn set_executable(&self, path: &Path) -> GraftResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file.
    fn read_to_string(&self, path: &Path) -> GraftResult<String>;
}

/// Lets the applier and a build descriptor share one filesystem adapter.
impl<F: Filesystem + ?Sized> Filesystem for Arc<F> {
    fn create_dir_all(&self, path: &Path) -> GraftResult<()> {
        (**self).create_dir_all(path)
    }

    fn write_file_atomic(&self, path: &Path, content: &str) -> GraftResult<()> {
        (**self).write_file_atomic(path, content)
    }

    fn set_executable(&self, path: &Path) -> GraftResult<()> {
        (**self).set_executable(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_to_string(&self, path: &Path) -> GraftResult<String> {
        (**self).read_to_string(path)
    }
}

/// Port for template lookup.
///
/// Implemented by:
/// - `graft_adapters::template_repository::FileSystemTemplateRepository`
/// - `graft_adapters::template_repository::InMemoryTemplateRepository`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRepository: Send + Sync {
    /// Raw content of `source`, or `None` when it does not exist.
    fn read(&self, source: &Source) -> GraftResult<Option<String>>;
}

/// Port for version slug resolution.
///
/// Implemented by:
/// - `graft_adapters::version_registry::TomlVersionRegistry`
/// - `graft_adapters::version_registry::InMemoryVersionRegistry`
#[cfg_attr(test, mockall::automock)]
pub trait VersionRegistry: Send + Sync {
    fn resolve(&self, slug: &VersionSlug) -> Option<String>;
}

/// Port for the project's dependency manifest.
///
/// Implemented by:
/// - `graft_adapters::build_descriptor::MavenPomDescriptor`
/// - `graft_adapters::build_descriptor::InMemoryBuildDescriptor`
///
/// Implementations must be idempotent: adding a dependency whose identity is
/// already declared leaves a single declaration.
#[cfg_attr(test, mockall::automock)]
pub trait BuildDescriptor: Send + Sync {
    /// Declare every dependency in one update.
    fn add_dependencies(
        &self,
        project: &ProjectFolder,
        dependencies: &[ResolvedDependency],
    ) -> GraftResult<()>;
}

/// A version after slug resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    /// Concrete version, e.g. `1.6.6`.
    pub value: String,
    /// The slug it came from; descriptors that support properties
    /// declare the version through it.
    pub slug: Option<VersionSlug>,
}

/// A dependency whose version reference has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub dependency: Dependency,
    pub version: Option<ResolvedVersion>,
}

impl ResolvedDependency {
    pub fn id(&self) -> &DependencyId {
        self.dependency.id()
    }
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dependency.id())?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version.value)?;
        }
        Ok(())
    }
}
