//! Template repository adapters.

mod filesystem;
mod memory;

pub use filesystem::FileSystemTemplateRepository;
pub use memory::InMemoryTemplateRepository;
