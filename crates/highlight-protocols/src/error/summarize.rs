//! Summarization errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("No text provided for summarization")]
    EmptyInput,

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl SummarizeError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            SummarizeError::EmptyInput => "No text provided for summarization".to_string(),
            SummarizeError::MissingApiKey => {
                "API key not configured. Please add your Groq API key.".to_string()
            }
            SummarizeError::Timeout(_) => {
                "Request timed out. The server took too long to respond.".to_string()
            }
            SummarizeError::RateLimited(_) => {
                "API rate limit exceeded. Please try again in a few moments.".to_string()
            }
            SummarizeError::AuthenticationFailed(_) => {
                "API authentication failed. Please check your API key.".to_string()
            }
            SummarizeError::ApiError { .. }
            | SummarizeError::Network(_)
            | SummarizeError::UnexpectedResponse(_) => "Failed to generate summary.".to_string(),
        }
    }

    /// Whether the input was rejected before any network call.
    pub fn is_input_error(&self) -> bool {
        matches!(self, SummarizeError::EmptyInput | SummarizeError::MissingApiKey)
    }
}

#[cfg(test)]
#[path = "summarize_tests.rs"]
mod tests;
