//! Application layer for Graft.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ModuleApplier)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All module rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ApplyPlan, ApplyReport, ModuleApplier, PlannedFile};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BuildDescriptor, Filesystem, ResolvedDependency, ResolvedVersion, TemplateRepository,
    VersionRegistry,
};

pub use error::{ApplicationError, FileWriteFailure};
