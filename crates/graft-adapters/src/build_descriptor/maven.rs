//! Maven `pom.xml` build descriptor.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use graft_core::{
    application::{
        ApplicationError,
        ports::{BuildDescriptor, Filesystem, ResolvedDependency},
    },
    domain::ProjectFolder,
    error::GraftResult,
};

use super::pom;

/// Declares dependencies in the project's `pom.xml`.
///
/// The file is read and written through the [`Filesystem`] port, so the
/// update is atomic on disk and testable in memory.
#[derive(Clone)]
pub struct MavenPomDescriptor {
    filesystem: Arc<dyn Filesystem>,
}

impl MavenPomDescriptor {
    pub const FILE_NAME: &'static str = "pom.xml";

    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl std::fmt::Debug for MavenPomDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MavenPomDescriptor").finish_non_exhaustive()
    }
}

impl BuildDescriptor for MavenPomDescriptor {
    #[instrument(skip_all, fields(project = %project, count = dependencies.len()))]
    fn add_dependencies(
        &self,
        project: &ProjectFolder,
        dependencies: &[ResolvedDependency],
    ) -> GraftResult<()> {
        let path = project.file_path(Self::FILE_NAME);
        let original = self.filesystem.read_to_string(&path)?;

        let (updated, added) = pom::add_dependencies(&original, dependencies).map_err(|e| {
            ApplicationError::DescriptorLoad {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        if updated == original {
            debug!("pom.xml already declares every dependency");
            return Ok(());
        }

        self.filesystem.write_file_atomic(&path, &updated)?;
        info!(added, "pom.xml updated");
        Ok(())
    }
}
