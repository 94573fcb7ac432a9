//! Highlight operation errors.

use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("Invalid highlight data: {0}")]
    Validation(String),

    #[error("Highlight ID not found: {0}")]
    NotFound(String),

    #[error("Duplicate highlight ID: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Transport error: {0}")]
    Transport(String),

    /// Failure reported by the service across the message boundary.
    #[error("{0}")]
    Service(String),
}

impl HighlightError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HighlightError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, HighlightError::Validation(_))
    }
}
