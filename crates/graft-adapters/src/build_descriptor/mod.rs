//! Build descriptor adapters.

mod maven;
mod memory;
pub mod pom;

pub use maven::MavenPomDescriptor;
pub use memory::InMemoryBuildDescriptor;
