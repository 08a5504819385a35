//! Core domain layer for Graft.
//!
//! This module describes *what* a generator module contributes to a project.
//! Applying it to disk is the application layer's job.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **No logging**: Errors carry all context instead
//! - **Immutable aggregates**: `Module` is frozen once built
//! - **Fail fast**: Bad factory input is rejected at construction time
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod properties;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    ArtifactId, BoxError, Context, ContextBuilder, Dependencies, DependenciesBuilder, Dependency,
    DependencyBuilder, DependencyId, DependencyScope, FilesBuilder, GroupId, Module,
    ModuleBuilder, ModuleFile, ModuleFiles, PreAction, PreActions, PreActionsBuilder,
    TemplatedFile, TemplatedFiles, Version, VersionSlug,
    module::{dependency, from, module_for_project, to, to_src_main_java, to_src_test_java},
};

pub use error::{DomainError, ErrorCategory};

pub use properties::{ModuleProperties, ModulePropertiesBuilder};

pub use value_objects::{Destination, ModuleSlug, ProjectFolder, Source, TEMPLATE_ROOT};
