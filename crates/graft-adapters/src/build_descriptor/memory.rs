//! In-memory build descriptor for tests.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use graft_core::{
    application::{
        ApplicationError,
        ports::{BuildDescriptor, ResolvedDependency},
    },
    domain::{DependencyId, ProjectFolder},
    error::GraftResult,
};

type Entries = IndexMap<PathBuf, IndexMap<DependencyId, ResolvedDependency>>;

/// Records declared dependencies per project, one entry per identity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBuildDescriptor {
    entries: Arc<RwLock<Entries>>,
    calls: Arc<RwLock<usize>>,
}

impl InMemoryBuildDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dependencies declared for `project`, in first-declaration order.
    pub fn dependencies(&self, project: &ProjectFolder) -> Vec<ResolvedDependency> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| {
                entries
                    .get(project.path())
                    .map(|declared| declared.values().cloned().collect())
            })
            .unwrap_or_default()
    }

    /// How many times `add_dependencies` was called.
    pub fn calls(&self) -> usize {
        self.calls.read().map_or(0, |calls| *calls)
    }
}

impl BuildDescriptor for InMemoryBuildDescriptor {
    fn add_dependencies(
        &self,
        project: &ProjectFolder,
        dependencies: &[ResolvedDependency],
    ) -> GraftResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        let declared = entries.entry(project.path().to_path_buf()).or_default();
        for dependency in dependencies {
            declared.insert(dependency.id().clone(), dependency.clone());
        }

        *self
            .calls
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)? += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::domain::Dependency;

    fn dependency(version: &str) -> ResolvedDependency {
        ResolvedDependency {
            dependency: Dependency::builder()
                .group_id("org.acme")
                .unwrap()
                .artifact_id("core")
                .unwrap()
                .version(version)
                .unwrap()
                .build(),
            version: None,
        }
    }

    #[test]
    fn dedupes_by_identity_per_project() {
        let descriptor = InMemoryBuildDescriptor::new();
        let project = ProjectFolder::new("/p").unwrap();

        descriptor
            .add_dependencies(&project, &[dependency("1.0")])
            .unwrap();
        descriptor
            .add_dependencies(&project, &[dependency("1.1")])
            .unwrap();

        let declared = descriptor.dependencies(&project);
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0], dependency("1.1"));
        assert_eq!(descriptor.calls(), 2);
        assert!(
            descriptor
                .dependencies(&ProjectFolder::new("/other").unwrap())
                .is_empty()
        );
    }
}
