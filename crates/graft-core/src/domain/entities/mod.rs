pub mod context;
pub mod dependencies;
pub mod dependency;
pub mod files;
pub mod module;
pub mod pre_action;

pub use context::{Context, ContextBuilder};
pub use dependencies::{Dependencies, DependenciesBuilder};
pub use dependency::{
    ArtifactId, Dependency, DependencyBuilder, DependencyId, DependencyScope, GroupId,
    HasArtifactId, HasGroupId, NoGroupId, Version, VersionSlug,
};
pub use files::{FilesBuilder, ModuleFile, ModuleFiles, TemplatedFile, TemplatedFiles};
pub use module::{Module, ModuleBuilder};
pub use pre_action::{BoxError, PreAction, PreActions, PreActionsBuilder};
