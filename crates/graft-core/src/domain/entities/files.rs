//! File placements: which template source lands at which destinations.
//!
//! ```text
//! FilesBuilder ──build()──▶ ModuleFiles ──(+ Context)──▶ TemplatedFiles
//!   Source → {Destination}    Vec<ModuleFile>             Vec<TemplatedFile<'_>>
//! ```
//!
//! Files keep the order in which each source was *first* registered.
//! Registering a source again only unions its destination set.

use indexmap::{IndexMap, IndexSet};

use crate::domain::{
    entities::context::Context,
    error::DomainError,
    value_objects::{Destination, Source},
};

/// A template source and every destination it is copied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    source: Source,
    destinations: Vec<Destination>,
    executable: bool,
}

impl ModuleFile {
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Never empty.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn is_executable(&self) -> bool {
        self.executable
    }
}

/// Immutable, ordered file set of a built module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFiles(Vec<ModuleFile>);

impl ModuleFiles {
    pub fn builder() -> FilesBuilder {
        FilesBuilder::default()
    }

    pub fn get(&self) -> &[ModuleFile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleFile> {
        self.0.iter()
    }
}

#[derive(Debug, Default)]
struct PendingFile {
    destinations: IndexSet<Destination>,
    executable: bool,
}

/// Accumulates file placements while a module is being defined.
#[derive(Debug, Default)]
pub struct FilesBuilder {
    files: IndexMap<Source, PendingFile>,
}

impl FilesBuilder {
    /// Copy `source` to `destination`. Re-adding a known pair is a no-op.
    pub fn add(&mut self, source: Source, destination: Destination) -> &mut Self {
        self.files
            .entry(source)
            .or_default()
            .destinations
            .insert(destination);
        self
    }

    /// Copy `source` to every destination in `destinations`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `destinations` is empty: a file must land
    /// somewhere.
    pub fn add_all<I>(&mut self, source: Source, destinations: I) -> Result<&mut Self, DomainError>
    where
        I: IntoIterator<Item = Destination>,
    {
        let destinations: Vec<_> = destinations.into_iter().collect();
        if destinations.is_empty() {
            return Err(DomainError::invalid(
                "destinations",
                format!("{source} has no destination"),
            ));
        }

        let entry = self.files.entry(source).or_default();
        entry.destinations.extend(destinations);
        Ok(self)
    }

    /// Like [`add`](Self::add), and mark the written files executable
    /// (wrapper scripts such as `mvnw`).
    pub fn add_executable(&mut self, source: Source, destination: Destination) -> &mut Self {
        let entry = self.files.entry(source).or_default();
        entry.destinations.insert(destination);
        entry.executable = true;
        self
    }

    pub fn build(self) -> ModuleFiles {
        ModuleFiles(
            self.files
                .into_iter()
                .map(|(source, pending)| ModuleFile {
                    source,
                    destinations: pending.destinations.into_iter().collect(),
                    executable: pending.executable,
                })
                .collect(),
        )
    }
}

/// A module file bound to the module's frozen context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplatedFile<'a> {
    file: &'a ModuleFile,
    context: &'a Context,
}

impl<'a> TemplatedFile<'a> {
    pub(crate) fn new(file: &'a ModuleFile, context: &'a Context) -> Self {
        Self { file, context }
    }

    pub fn file(&self) -> &'a ModuleFile {
        self.file
    }

    pub fn source(&self) -> &'a Source {
        &self.file.source
    }

    pub fn destinations(&self) -> &'a [Destination] {
        &self.file.destinations
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// Substitute the context into raw template content.
    pub fn render(&self, template: &str) -> String {
        self.context.render(template)
    }
}

/// Templated view over a module's files, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedFiles<'a>(Vec<TemplatedFile<'a>>);

impl<'a> TemplatedFiles<'a> {
    pub(crate) fn new(files: Vec<TemplatedFile<'a>>) -> Self {
        Self(files)
    }

    pub fn get(&self) -> &[TemplatedFile<'a>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplatedFile<'a>> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for TemplatedFiles<'a> {
    type Item = TemplatedFile<'a>;
    type IntoIter = std::vec::IntoIter<TemplatedFile<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
