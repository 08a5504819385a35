//! Version registry backed by a TOML file.
//!
//! # Format
//!
//! ```toml
//! [versions]
//! springdoc-openapi = "1.6.6"
//! jjwt = "0.11.5"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, instrument};

use graft_core::{
    application::{ApplicationError, ports::VersionRegistry},
    domain::VersionSlug,
    error::GraftResult,
};

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    versions: IndexMap<String, String>,
}

/// Slug → version pairs loaded once from a TOML file.
#[derive(Debug, Clone)]
pub struct TomlVersionRegistry {
    source: PathBuf,
    versions: IndexMap<String, String>,
}

impl TomlVersionRegistry {
    /// Load the registry at `path`.
    ///
    /// # Errors
    ///
    /// `DescriptorLoad` if the file cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> GraftResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::DescriptorLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let registry = Self::parse(path, &raw)?;
        debug!(count = registry.versions.len(), "loaded version registry");
        Ok(registry)
    }

    /// Parse registry content; `origin` is only used in error messages.
    pub fn parse(origin: impl Into<PathBuf>, raw: &str) -> GraftResult<Self> {
        let source = origin.into();
        let file: RegistryFile = toml::from_str(raw).map_err(|e| ApplicationError::DescriptorLoad {
            path: source.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source,
            versions: file.versions,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl VersionRegistry for TomlVersionRegistry {
    fn resolve(&self, slug: &VersionSlug) -> Option<String> {
        self.versions.get(slug.as_str()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versions_table_in_order() {
        let registry = TomlVersionRegistry::parse(
            "versions.toml",
            "[versions]\njjwt = \"0.11.5\"\nspringdoc-openapi = \"1.6.6\"\n",
        )
        .unwrap();

        let slugs: Vec<_> = registry.entries().map(|(k, _)| k).collect();
        assert_eq!(slugs, ["jjwt", "springdoc-openapi"]);
        assert_eq!(
            registry.resolve(&VersionSlug::new("jjwt").unwrap()).as_deref(),
            Some("0.11.5")
        );
    }

    #[test]
    fn empty_file_is_an_empty_registry() {
        let registry = TomlVersionRegistry::parse("versions.toml", "").unwrap();
        assert_eq!(registry.entries().count(), 0);
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let err = TomlVersionRegistry::parse("versions.toml", "[versions]\njjwt = 5\n").unwrap_err();
        assert!(err.to_string().contains("versions.toml"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.toml");
        std::fs::write(&path, "[versions]\njjwt = \"0.11.5\"\n").unwrap();

        let registry = TomlVersionRegistry::load(&path).unwrap();
        assert_eq!(registry.source(), path.as_path());
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(TomlVersionRegistry::load("/no/such/versions.toml").is_err());
    }
}
