//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `graft-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRepository`: Template lookup
//!   - `VersionRegistry`: Version slug resolution
//!   - `BuildDescriptor`: Dependency manifest updates
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The CLI drives `ModuleApplier` directly)

pub mod output;

pub use output::{
    BuildDescriptor, Filesystem, ResolvedDependency, ResolvedVersion, TemplateRepository,
    VersionRegistry,
};

#[cfg(test)]
pub use output::{
    MockBuildDescriptor, MockFilesystem, MockTemplateRepository, MockVersionRegistry,
};
