// ============================================================================
// domain/error.rs - CONSTRUCTION-TIME ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Domain errors are raised while a module is being *built*. They always
/// indicate a programming error in a module factory and are never recovered
/// by the application engine.
///
/// All errors are:
/// - Cloneable (so reports can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    // ========================================================================
    // Conflicts (409-level equivalent)
    // ========================================================================
    #[error("dependency {dependency} declared twice with different settings: {existing} vs {incoming}")]
    DuplicateDependencyConflict {
        dependency: String,
        existing: String,
        incoming: String,
    },
}

impl DomainError {
    /// Shorthand used by the argument checks in `validation.rs`.
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidArgument { field, reason } => vec![
                format!("The module factory passed a bad '{field}': {reason}"),
                "Fix the module definition; this is not a runtime condition".into(),
            ],
            Self::DuplicateDependencyConflict { dependency, .. } => vec![
                format!("{dependency} is declared more than once"),
                "Remove the duplicate declaration".into(),
                "Or use `replace` to override the earlier declaration explicitly".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Validation,
            Self::DuplicateDependencyConflict { .. } => ErrorCategory::Conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
