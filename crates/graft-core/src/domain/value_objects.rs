//! Domain value objects: ProjectFolder, ModuleSlug, Source, Destination.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity, immutable.
//! Every constructor validates its input and returns `InvalidArgument`
//! instead of panicking, because a bad value here is a bug in the module
//! factory that called us and must surface at the call site.
//!
//! Paths are stored as `/`-separated strings so that equality does not
//! depend on the host platform.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    validation::{not_blank, relative_inside_root},
};

/// Logical root every [`Source`] lives under.
pub const TEMPLATE_ROOT: &str = "/generator";

// ── ProjectFolder ────────────────────────────────────────────────────────────

/// Root folder of the project a module is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectFolder(PathBuf);

impl ProjectFolder {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        not_blank("projectFolder", &path.to_string_lossy())?;
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Absolute location of `destination` inside this project.
    pub fn resolve(&self, destination: &Destination) -> PathBuf {
        self.0.join(destination.as_path())
    }

    /// Absolute location of an arbitrary project-relative file.
    pub fn file_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

impl fmt::Display for ProjectFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// ── ModuleSlug ───────────────────────────────────────────────────────────────

/// Kebab-case identity of a module, e.g. `springdoc-mvc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleSlug(String);

impl ModuleSlug {
    pub fn new(slug: impl Into<String>) -> Result<Self, DomainError> {
        let slug = slug.into();
        not_blank("slug", &slug)?;

        if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::invalid(
                "slug",
                format!("'{slug}' must only contain lowercase letters, digits and '-'"),
            ));
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleSlug {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ── Source ───────────────────────────────────────────────────────────────────

/// Logical location of a template asset under [`TEMPLATE_ROOT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Source {
    relative: String,
}

impl Source {
    pub fn new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let relative = normalize("source", path.as_ref())?;
        Ok(Self { relative })
    }

    /// Path below the template root; this is what repositories look up.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Full logical path, including the template root.
    pub fn path(&self) -> PathBuf {
        Path::new(TEMPLATE_ROOT).join(&self.relative)
    }

    /// A source nested below this one.
    pub fn append(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::new(format!("{}/{}", self.relative, segment.as_ref()))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TEMPLATE_ROOT}/{}", self.relative)
    }
}

// ── Destination ──────────────────────────────────────────────────────────────

/// Where a file lands, relative to the project folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Destination(Cow<'static, str>);

impl Destination {
    pub const SRC_MAIN_JAVA: Destination = Destination(Cow::Borrowed("src/main/java"));
    pub const SRC_TEST_JAVA: Destination = Destination(Cow::Borrowed("src/test/java"));
    pub const SRC_MAIN_RESOURCES: Destination = Destination(Cow::Borrowed("src/main/resources"));
    pub const SRC_TEST_RESOURCES: Destination = Destination(Cow::Borrowed("src/test/resources"));

    pub fn new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        Ok(Self(Cow::Owned(normalize("destination", path.as_ref())?)))
    }

    /// A destination nested below this one, e.g. a package folder under
    /// [`Destination::SRC_MAIN_JAVA`].
    pub fn append(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::new(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(self.0.as_ref())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate and canonicalise a logical path: no blanks, no escapes,
/// `/` separators, no empty or `.` segments.
fn normalize(field: &'static str, raw: &str) -> Result<String, DomainError> {
    not_blank(field, raw)?;

    let unified = raw.replace('\\', "/");
    relative_inside_root(field, Path::new(&unified))?;

    let joined = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return Err(DomainError::invalid(
            field,
            format!("'{raw}' does not name a file"),
        ));
    }

    Ok(joined)
}
