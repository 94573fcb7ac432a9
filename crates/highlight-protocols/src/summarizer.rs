//! Summarization protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SummarizeError;

/// Raw summary text returned by a summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Summary text as produced by the model (markdown-like).
    pub text: String,
    /// Model that produced the summary.
    pub model: String,
}

/// Core trait for external summarization services.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Returns the model identifier used for requests.
    fn model(&self) -> &str;

    /// Summarize the given text.
    async fn summarize(&self, text: &str) -> Result<Summary, SummarizeError>;
}
