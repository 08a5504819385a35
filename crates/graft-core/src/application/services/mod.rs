//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "apply this module to that project".

pub mod module_applier;

pub use module_applier::{ApplyPlan, ApplyReport, ModuleApplier, PlannedFile};
