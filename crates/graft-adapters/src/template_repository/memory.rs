//! In-memory template repository for tests and embedded templates.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use graft_core::{
    application::{ApplicationError, ports::TemplateRepository},
    domain::Source,
    error::GraftResult,
};

/// Templates keyed by their path below the template root.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateRepository {
    templates: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, source: &Source, content: impl Into<String>) -> GraftResult<Self> {
        self.insert(source, content)?;
        Ok(self)
    }

    pub fn insert(&self, source: &Source, content: impl Into<String>) -> GraftResult<()> {
        let mut templates = self
            .templates
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        templates.insert(source.relative().to_string(), content.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.read().map_or(0, |t| t.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateRepository for InMemoryTemplateRepository {
    fn read(&self, source: &Source) -> GraftResult<Option<String>> {
        let templates = self
            .templates
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        Ok(templates.get(source.relative()).cloned())
    }
}
