//! Steps a module needs done before any of its files are written.
//!
//! Pre-actions run strictly in registration order. They are never
//! reordered or deduplicated; registering the same step twice runs it twice.

use std::fmt;
use std::sync::Arc;

use crate::domain::value_objects::{Destination, ProjectFolder};

/// Error type a custom pre-action may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type ActionFn = dyn Fn(&ProjectFolder) -> Result<(), BoxError> + Send + Sync;

/// One pre-generation step.
///
/// `CreateDirectory` is executed through the engine's filesystem port, so it
/// works the same against the in-memory filesystem. `Run` executes arbitrary
/// code against the project folder.
#[derive(Clone)]
pub enum PreAction {
    CreateDirectory(Destination),
    Run {
        description: String,
        action: Arc<ActionFn>,
    },
}

impl PreAction {
    pub fn create_directory(destination: Destination) -> Self {
        Self::CreateDirectory(destination)
    }

    pub fn run<F>(description: impl Into<String>, action: F) -> Self
    where
        F: Fn(&ProjectFolder) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::Run {
            description: description.into(),
            action: Arc::new(action),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::CreateDirectory(destination) => format!("create directory {destination}"),
            Self::Run { description, .. } => description.clone(),
        }
    }
}

impl fmt::Debug for PreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDirectory(destination) => {
                f.debug_tuple("CreateDirectory").field(destination).finish()
            }
            Self::Run { description, .. } => f
                .debug_struct("Run")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}

/// Immutable ordered pre-actions of a built module.
#[derive(Debug, Clone, Default)]
pub struct PreActions(Vec<PreAction>);

impl PreActions {
    pub fn builder() -> PreActionsBuilder {
        PreActionsBuilder::default()
    }

    pub fn get(&self) -> &[PreAction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreAction> {
        self.0.iter()
    }
}

#[derive(Debug, Default)]
pub struct PreActionsBuilder {
    actions: Vec<PreAction>,
}

impl PreActionsBuilder {
    pub fn add(&mut self, action: PreAction) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn build(self) -> PreActions {
        PreActions(self.actions)
    }
}
