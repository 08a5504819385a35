//! Build dependencies and their typestate builder.
//!
//! # Typestate builder
//!
//! Two phantom markers (`NoGroupId` / `HasGroupId`) plus `HasArtifactId`
//! enforce at *compile time* that a dependency always names its group and
//! artifact before anything else is configured.
//!
//! ```rust
//! use graft_core::domain::{Dependency, DependencyScope};
//!
//! let dependency = Dependency::builder()
//!     .group_id("org.springdoc")?
//!     .artifact_id("springdoc-openapi-ui")?
//!     .version_slug("springdoc-openapi")?
//!     .scope(DependencyScope::Compile)
//!     .build();
//! # Ok::<(), graft_core::domain::DomainError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{error::DomainError, validation::not_blank};

// ── Coordinates ──────────────────────────────────────────────────────────────

macro_rules! coordinate {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                not_blank($field, &value)?;
                if value.chars().any(char::is_whitespace) {
                    return Err(DomainError::invalid(
                        $field,
                        format!("'{value}' must not contain whitespace"),
                    ));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

coordinate!(
    /// Maven-style group, e.g. `org.springframework.boot`.
    GroupId,
    "groupId"
);
coordinate!(
    /// Maven-style artifact, e.g. `spring-boot-starter-web`.
    ArtifactId,
    "artifactId"
);
coordinate!(
    /// Key into the version registry, resolved when the module is applied.
    VersionSlug,
    "versionSlug"
);

impl VersionSlug {
    /// Build-descriptor property holding the resolved version,
    /// e.g. `springdoc-openapi.version`.
    pub fn property_name(&self) -> String {
        format!("{}.version", self.0)
    }
}

/// How a dependency names its version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Version {
    /// Concrete version string, used as-is.
    Literal(String),
    /// Indirect reference; looked up in the version registry at apply time.
    Slug(VersionSlug),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => f.write_str(v),
            Self::Slug(slug) => write!(f, "${{{}}}", slug.property_name()),
        }
    }
}

/// Dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Compile,
    Provided,
    Runtime,
    Test,
    Import,
    System,
}

impl DependencyScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::Import => "import",
            Self::System => "system",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "provided" => Ok(Self::Provided),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "import" => Ok(Self::Import),
            "system" => Ok(Self::System),
            other => Err(DomainError::invalid(
                "scope",
                format!("unknown dependency scope: {other}"),
            )),
        }
    }
}

/// Identity of a dependency: two declarations with the same id describe
/// the same artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DependencyId {
    pub group_id: GroupId,
    pub artifact_id: ArtifactId,
}

impl DependencyId {
    pub fn new(group_id: GroupId, artifact_id: ArtifactId) -> Self {
        Self {
            group_id,
            artifact_id,
        }
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

// ── Dependency ───────────────────────────────────────────────────────────────

/// A build dependency declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dependency {
    id: DependencyId,
    version: Option<Version>,
    scope: Option<DependencyScope>,
    dependency_type: Option<String>,
    optional: bool,
    exclusions: Vec<DependencyId>,
}

impl Dependency {
    pub fn builder() -> DependencyBuilder<NoGroupId> {
        DependencyBuilder::new()
    }

    pub fn id(&self) -> &DependencyId {
        &self.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.id.group_id
    }

    pub fn artifact_id(&self) -> &ArtifactId {
        &self.id.artifact_id
    }

    /// `None` when the version is managed elsewhere (BOM, parent).
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn scope(&self) -> Option<DependencyScope> {
        self.scope
    }

    pub fn dependency_type(&self) -> Option<&str> {
        self.dependency_type.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn exclusions(&self) -> &[DependencyId] {
        &self.exclusions
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        if let Some(scope) = self.scope {
            write!(f, " ({scope})")?;
        }
        if let Some(kind) = &self.dependency_type {
            write!(f, " [{kind}]")?;
        }
        if self.optional {
            f.write_str(" optional")?;
        }
        if !self.exclusions.is_empty() {
            write!(f, " excluding {}", self.exclusions.len())?;
        }
        Ok(())
    }
}

// ── Typestate markers ────────────────────────────────────────────────────────

/// Marker: group id has not been set.
pub struct NoGroupId;
/// Marker: group id set, artifact id missing.
pub struct HasGroupId;
/// Marker: coordinates complete; optional settings and `build()` available.
pub struct HasArtifactId;

// ── Builder ──────────────────────────────────────────────────────────────────

pub struct DependencyBuilder<S> {
    group_id: Option<GroupId>,
    artifact_id: Option<ArtifactId>,
    version: Option<Version>,
    scope: Option<DependencyScope>,
    dependency_type: Option<String>,
    optional: bool,
    exclusions: Vec<DependencyId>,
    _marker: PhantomData<S>,
}

impl<S> DependencyBuilder<S> {
    fn transition<T>(self) -> DependencyBuilder<T> {
        DependencyBuilder {
            group_id: self.group_id,
            artifact_id: self.artifact_id,
            version: self.version,
            scope: self.scope,
            dependency_type: self.dependency_type,
            optional: self.optional,
            exclusions: self.exclusions,
            _marker: PhantomData,
        }
    }
}

impl DependencyBuilder<NoGroupId> {
    pub fn new() -> Self {
        Self {
            group_id: None,
            artifact_id: None,
            version: None,
            scope: None,
            dependency_type: None,
            optional: false,
            exclusions: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn group_id(
        mut self,
        group_id: impl Into<String>,
    ) -> Result<DependencyBuilder<HasGroupId>, DomainError> {
        self.group_id = Some(GroupId::new(group_id)?);
        Ok(self.transition())
    }
}

impl Default for DependencyBuilder<NoGroupId> {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyBuilder<HasGroupId> {
    pub fn artifact_id(
        mut self,
        artifact_id: impl Into<String>,
    ) -> Result<DependencyBuilder<HasArtifactId>, DomainError> {
        self.artifact_id = Some(ArtifactId::new(artifact_id)?);
        Ok(self.transition())
    }
}

impl DependencyBuilder<HasArtifactId> {
    /// Pin a literal version.
    pub fn version(mut self, version: impl Into<String>) -> Result<Self, DomainError> {
        let version = version.into();
        not_blank("version", &version)?;
        self.version = Some(Version::Literal(version));
        Ok(self)
    }

    /// Defer the version to the registry entry named `slug`.
    pub fn version_slug(mut self, slug: impl Into<String>) -> Result<Self, DomainError> {
        self.version = Some(Version::Slug(VersionSlug::new(slug)?));
        Ok(self)
    }

    pub fn scope(mut self, scope: DependencyScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Packaging type, e.g. `pom` for imported BOMs.
    pub fn dependency_type(mut self, kind: impl Into<String>) -> Result<Self, DomainError> {
        let kind = kind.into();
        not_blank("type", &kind)?;
        self.dependency_type = Some(kind);
        Ok(self)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn exclusion(
        mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let exclusion = DependencyId::new(GroupId::new(group_id)?, ArtifactId::new(artifact_id)?);
        if !self.exclusions.contains(&exclusion) {
            self.exclusions.push(exclusion);
        }
        Ok(self)
    }

    pub fn build(self) -> Dependency {
        let (Some(group_id), Some(artifact_id)) = (self.group_id, self.artifact_id) else {
            unreachable!("typestate guarantees coordinates are set");
        };

        Dependency {
            id: DependencyId::new(group_id, artifact_id),
            version: self.version,
            scope: self.scope,
            dependency_type: self.dependency_type,
            optional: self.optional,
            exclusions: self.exclusions,
        }
    }
}
