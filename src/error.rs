use thiserror::Error;

use crate::docker::BackendError;

/// Errors raised while handling input or applying updates
#[derive(Debug, Error)]
pub enum AppError {
    /// A form field failed one of its validators. Shown inline on the form.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// A list/inspect/mutate call against the backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The action needs a selected row but the list has none.
    #[error("{0}")]
    Selection(String),

    /// An overlay or panel that must exist could not be found, or a task
    /// transition went backwards. Always fatal.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl AppError {
    pub fn selection(what: &str) -> Self {
        Self::Selection(format!("no {} selected", what))
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
