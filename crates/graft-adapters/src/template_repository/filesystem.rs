//! Templates read from a directory on disk.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/                      ← root, stands in for `/generator`
//! ├── springdoc/
//! │   └── SpringdocConfiguration.java
//! └── init/
//!     └── README.md
//! ```
//!
//! `Source::new("springdoc/SpringdocConfiguration.java")` resolves to
//! `templates/springdoc/SpringdocConfiguration.java`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use graft_core::{
    application::{ApplicationError, ports::TemplateRepository},
    domain::Source,
    error::GraftResult,
};

use crate::filesystem::map_io_error;

/// Reads templates below a root directory.
#[derive(Debug, Clone)]
pub struct FileSystemTemplateRepository {
    root: PathBuf,
}

impl FileSystemTemplateRepository {
    /// Create a repository rooted at `root`.
    ///
    /// The directory does not need to exist yet; lookups simply find nothing.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every template below the root, as sources, sorted.
    ///
    /// # Errors
    ///
    /// `FilesystemError` if the root is missing or cannot be walked.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn list(&self) -> GraftResult<Vec<Source>> {
        if !self.root.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: "templates root is not a directory".into(),
            }
            .into());
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            match Source::new(relative.to_string_lossy()) {
                Ok(source) => sources.push(source),
                Err(e) => warn!(path = %entry.path().display(), error = %e, "skipping unusable template path"),
            }
        }

        debug!(count = sources.len(), "listed templates");
        Ok(sources)
    }
}

impl TemplateRepository for FileSystemTemplateRepository {
    fn read(&self, source: &Source) -> GraftResult<Option<String>> {
        let path = self.root.join(source.relative());
        if !path.is_file() {
            debug!(path = %path.display(), "template not found");
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| map_io_error(&path, e, "read template"))
    }
}
