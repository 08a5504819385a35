//! Infrastructure adapters for Graft.
//!
//! This crate implements the ports defined in `graft_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod build_descriptor;
pub mod filesystem;
pub mod module_loader;
pub mod template_repository;
pub mod version_registry;

// Re-export commonly used adapters
pub use build_descriptor::{InMemoryBuildDescriptor, MavenPomDescriptor};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use module_loader::{load_module, parse_module};
pub use template_repository::{FileSystemTemplateRepository, InMemoryTemplateRepository};
pub use version_registry::{InMemoryVersionRegistry, TomlVersionRegistry};
