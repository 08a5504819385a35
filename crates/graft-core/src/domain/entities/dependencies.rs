//! The dependency collection of a module.
//!
//! # Conflict policy
//!
//! | Call      | Identity already present with…    | Outcome                          |
//! |-----------|-----------------------------------|----------------------------------|
//! | `add`     | nothing                           | appended                         |
//! | `add`     | an identical declaration          | no-op                            |
//! | `add`     | a different declaration           | `build()` fails with a conflict  |
//! | `replace` | anything                          | overwritten in place             |
//!
//! Identity is `(groupId, artifactId)`. Order is first-insertion order.

use indexmap::IndexMap;

use crate::domain::{
    entities::dependency::{Dependency, DependencyId},
    error::DomainError,
};

/// Immutable, ordered, identity-unique dependencies of a built module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies(Vec<Dependency>);

impl Dependencies {
    pub fn builder() -> DependenciesBuilder {
        DependenciesBuilder::default()
    }

    pub fn get(&self) -> &[Dependency] {
        &self.0
    }

    pub fn find(&self, id: &DependencyId) -> Option<&Dependency> {
        self.0.iter().find(|d| d.id() == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.0.iter()
    }
}

#[derive(Debug, Default)]
pub struct DependenciesBuilder {
    entries: IndexMap<DependencyId, Dependency>,
    conflicts: Vec<DomainError>,
}

impl DependenciesBuilder {
    /// Declare a dependency. See the module docs for duplicate handling.
    pub fn add(&mut self, dependency: Dependency) -> &mut Self {
        match self.entries.get(dependency.id()) {
            None => {
                self.entries.insert(dependency.id().clone(), dependency);
            }
            Some(existing) if *existing == dependency => {}
            Some(existing) => {
                self.conflicts.push(DomainError::DuplicateDependencyConflict {
                    dependency: dependency.id().to_string(),
                    existing: existing.to_string(),
                    incoming: dependency.to_string(),
                });
            }
        }
        self
    }

    /// Declare a dependency, overriding any earlier declaration of the same
    /// identity. Keeps the earlier position.
    pub fn replace(&mut self, dependency: Dependency) -> &mut Self {
        self.conflicts.retain(|conflict| {
            !matches!(
                conflict,
                DomainError::DuplicateDependencyConflict { dependency: id, .. }
                    if *id == dependency.id().to_string()
            )
        });
        self.entries.insert(dependency.id().clone(), dependency);
        self
    }

    /// # Errors
    ///
    /// The first `DuplicateDependencyConflict` recorded by `add`.
    pub fn build(self) -> Result<Dependencies, DomainError> {
        if let Some(conflict) = self.conflicts.into_iter().next() {
            return Err(conflict);
        }

        Ok(Dependencies(self.entries.into_values().collect()))
    }
}
