//! Version registry adapters.

mod memory;
mod toml_file;

pub use memory::InMemoryVersionRegistry;
pub use toml_file::TomlVersionRegistry;
