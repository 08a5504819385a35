//! Application layer errors.
//!
//! These errors represent failures while *applying* a module to a project,
//! not mistakes in the module definition itself. Definition errors are
//! `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::error::ErrorCategory;

/// One destination that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWriteFailure {
    pub destination: PathBuf,
    pub reason: String,
}

impl fmt::Display for FileWriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.destination.display(), self.reason)
    }
}

/// Errors that occur while a module is applied.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A dependency refers to a version slug the registry does not know.
    #[error("module {module}: version slug '{slug}' of {dependency} is not resolvable")]
    UnresolvedVersion {
        module: String,
        dependency: String,
        slug: String,
    },

    /// A template source does not exist in the repository.
    #[error("module {module}: template {template} not found")]
    TemplateNotFound { module: String, template: String },

    /// The build descriptor could not be updated.
    #[error("module {module}: failed to update build descriptor at {path}: {reason}")]
    BuildDescriptorUpdateFailed {
        module: String,
        path: PathBuf,
        reason: String,
    },

    /// At least one destination could not be written.
    #[error("module {module}: {} file write(s) failed", failures.len())]
    FileWriteFailed {
        module: String,
        failures: Vec<FileWriteFailure>,
    },

    /// A pre-action returned an error; nothing after it ran.
    #[error("module {module}: pre-action #{index} ({description}) failed: {reason}")]
    PreActionFailed {
        module: String,
        index: usize,
        description: String,
        reason: String,
    },

    /// The cancellation flag was raised between two steps.
    #[error("module {module}: application cancelled")]
    Cancelled { module: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An adapter's shared state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,

    /// A module descriptor or version registry file could not be loaded.
    #[error("Failed to load {path}: {reason}")]
    DescriptorLoad { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvedVersion { slug, .. } => vec![
                format!("Add '{slug}' to the version registry"),
                "Or declare a literal version on the dependency".into(),
            ],
            Self::TemplateNotFound { template, .. } => vec![
                format!("No template at {template}"),
                "Check the templates root (`graft config get templates.root`)".into(),
            ],
            Self::BuildDescriptorUpdateFailed { path, .. } => vec![
                format!("Check that {} exists and is writable", path.display()),
                "The descriptor was left as it was before the update".into(),
            ],
            Self::FileWriteFailed { failures, .. } => {
                let mut suggestions: Vec<String> =
                    failures.iter().map(ToString::to_string).collect();
                suggestions.push("Files that were written are complete; fix the causes and re-apply".into());
                suggestions
            }
            Self::PreActionFailed { description, .. } => vec![
                format!("Pre-action '{description}' must succeed before anything is written"),
                "Nothing was written to the project".into(),
            ],
            Self::Cancelled { .. } => vec![
                "Re-apply the module; applying is idempotent".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LockPoisoned => vec![
                "A previous operation panicked while holding a lock".into(),
                "Restart the process".into(),
            ],
            Self::DescriptorLoad { path, .. } => vec![
                format!("Check the syntax of {}", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedVersion { .. } | Self::TemplateNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::DescriptorLoad { .. } => ErrorCategory::Configuration,
            Self::Cancelled { .. } | Self::PreActionFailed { .. } => ErrorCategory::Validation,
            Self::BuildDescriptorUpdateFailed { .. }
            | Self::FileWriteFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
