//! In-memory version registry.

use indexmap::IndexMap;

use graft_core::{application::ports::VersionRegistry, domain::VersionSlug};

/// Slug → version pairs held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVersionRegistry {
    versions: IndexMap<String, String>,
}

impl InMemoryVersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a later value for the same slug wins.
    pub fn with(mut self, slug: impl Into<String>, version: impl Into<String>) -> Self {
        self.versions.insert(slug.into(), version.into());
        self
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl FromIterator<(String, String)> for InMemoryVersionRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

impl VersionRegistry for InMemoryVersionRegistry {
    fn resolve(&self, slug: &VersionSlug) -> Option<String> {
        self.versions.get(slug.as_str()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_slugs_only() {
        let registry = InMemoryVersionRegistry::new()
            .with("springdoc-openapi", "1.6.5")
            .with("springdoc-openapi", "1.6.6");

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve(&VersionSlug::new("springdoc-openapi").unwrap()),
            Some("1.6.6".into())
        );
        assert_eq!(registry.resolve(&VersionSlug::new("jjwt").unwrap()), None);
    }
}
