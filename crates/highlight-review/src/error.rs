//! Review panel errors.

use thiserror::Error;

use highlight_protocols::error::HighlightError;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Error loading highlights: {0}")]
    Load(HighlightError),

    #[error("No highlight ID provided")]
    MissingId,

    #[error("Failed to delete highlight: {0}")]
    Delete(HighlightError),

    #[error("Failed to clear highlights: {0}")]
    Clear(HighlightError),

    #[error("No highlights to summarize")]
    NothingToSummarize,
}
