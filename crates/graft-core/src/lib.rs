//! Graft Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Graft, a
//! module-composition engine that grafts generator modules (files,
//! dependencies, pre-actions) onto an existing project.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            graft-cli (CLI)              │
//! │   (Loads module.toml, drives applier)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ModuleApplier)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Filesystem, TemplateRepository,       │
//! │   VersionRegistry, BuildDescriptor)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     graft-adapters (Infrastructure)     │
//! │ (LocalFilesystem, MavenPomDescriptor)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Module, Context, Dependency, files)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use graft_core::prelude::*;
//!
//! // 1. Describe the module
//! let mut builder = module_for_project(ProjectFolder::new("./my-app")?);
//! builder.context().put("name", "demo")?;
//! builder.files().add(from("foo.txt")?, to("out/bar.txt")?);
//! let module = builder.build()?;
//!
//! // 2. Apply it with injected adapters
//! let applier = ModuleApplier::new(templates, versions, descriptor, filesystem);
//! let report = applier.apply(&module, module.project_folder())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyPlan, ApplyReport, ModuleApplier,
        ports::{
            BuildDescriptor, Filesystem, ResolvedDependency, ResolvedVersion, TemplateRepository,
            VersionRegistry,
        },
    };
    pub use crate::domain::{
        Context, Dependency, DependencyScope, Destination, Module, ModuleBuilder,
        ModuleProperties, PreAction, ProjectFolder, Source, Version, VersionSlug, dependency,
        from, module_for_project, to, to_src_main_java, to_src_test_java,
    };
    pub use crate::error::{GraftError, GraftResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
