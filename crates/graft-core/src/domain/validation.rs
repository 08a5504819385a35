//! Argument checks shared by every domain constructor.
//!
//! Each check returns `Ok(())` or an `InvalidArgument` naming the field, so
//! constructors can run them with `?` before storing the value.

use std::path::{Component, Path};

use crate::domain::error::DomainError;

/// Reject empty or whitespace-only strings.
pub(crate) fn not_blank(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(field, "must not be blank"));
    }
    Ok(())
}

/// Reject anything that is not a plain relative path inside its root.
///
/// Absolute paths and `..` components would let a module write outside the
/// project folder.
pub(crate) fn relative_inside_root(field: &'static str, path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() || path.has_root() {
        return Err(DomainError::invalid(
            field,
            format!("must be relative: {}", path.display()),
        ));
    }

    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(DomainError::invalid(
            field,
            format!("must stay inside its root: {}", path.display()),
        ));
    }

    Ok(())
}
