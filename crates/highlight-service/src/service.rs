//! Message dispatcher.

use std::sync::Arc;

use tracing::{error, info};

use highlight_protocols::error::{HighlightError, StoreError, SummarizeError};
use highlight_protocols::highlight::Highlight;
use highlight_protocols::message::{
    AckResponse, HighlightsResponse, Request, Response, SummaryResponse,
};
use highlight_protocols::summarizer::Summarizer;
use highlight_store::HighlightRepository;
use highlight_summarizer::markup;

const ACCESS_FAILED: &str = "Failed to access storage";
const INVALID_HIGHLIGHT: &str = "Invalid highlight data";
const SAVE_FAILED: &str = "Failed to save highlight";
const NO_ID: &str = "No highlight ID provided";
const ID_NOT_FOUND: &str = "Highlight ID not found";
const DELETE_FAILED: &str = "Failed to delete highlight";
const CLEAR_FAILED: &str = "Failed to clear highlights";

/// The persistence and summarization service.
///
/// Every request produces a [`Response`]; failures are reported in the
/// response's `error` field and logged here.
pub struct HighlightService {
    repository: Arc<HighlightRepository>,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl HighlightService {
    pub fn new(repository: Arc<HighlightRepository>) -> Self {
        Self {
            repository,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// ID of the store backend in use.
    pub fn backend_id(&self) -> &str {
        self.repository.backend_id()
    }

    /// Whether summarization requests can reach a model.
    pub fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    /// Ensure the highlight collection exists. Called once at start-up.
    pub async fn initialize(&self) -> Result<(), HighlightError> {
        self.repository.initialize().await?;
        info!(
            backend = self.backend_id(),
            summarizer = self.has_summarizer(),
            "Highlight service initialized"
        );
        Ok(())
    }

    /// Dispatch one request.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::SaveHighlight { highlight } => Response::Ack(self.save(highlight).await),
            Request::GetHighlights => Response::Highlights(self.list().await),
            Request::DeleteHighlight { highlight_id } => {
                Response::Ack(self.delete(&highlight_id).await)
            }
            Request::ClearHighlights => Response::Ack(self.clear().await),
            Request::SummarizeHighlights { highlights } => {
                Response::Summary(self.summarize(&highlights).await)
            }
        }
    }

    async fn save(&self, highlight: Option<Highlight>) -> AckResponse {
        let Some(highlight) = highlight else {
            error!("saveHighlight without a highlight");
            return AckResponse::failed(INVALID_HIGHLIGHT);
        };

        match self.repository.create(highlight).await {
            Ok(saved) => {
                info!(id = %saved.id, "Highlight saved");
                AckResponse::ok()
            }
            Err(e) => {
                error!("Failed to save highlight: {}", e);
                AckResponse::failed(match e {
                    HighlightError::Validation(_) | HighlightError::DuplicateId(_) => {
                        INVALID_HIGHLIGHT
                    }
                    HighlightError::Storage(StoreError::Write(_)) => SAVE_FAILED,
                    _ => ACCESS_FAILED,
                })
            }
        }
    }

    async fn list(&self) -> HighlightsResponse {
        match self.repository.list().await {
            Ok(highlights) => HighlightsResponse {
                highlights,
                error: None,
            },
            Err(e) => {
                error!("Failed to read highlights: {}", e);
                HighlightsResponse {
                    highlights: Vec::new(),
                    error: Some(ACCESS_FAILED.to_string()),
                }
            }
        }
    }

    async fn delete(&self, id: &str) -> AckResponse {
        match self.repository.delete_by_id(id).await {
            Ok(_) => {
                info!(id = %id, "Highlight deleted");
                AckResponse::ok()
            }
            Err(e) => {
                error!("Failed to delete highlight {:?}: {}", id, e);
                AckResponse::failed(match e {
                    HighlightError::Validation(_) => NO_ID,
                    HighlightError::NotFound(_) => ID_NOT_FOUND,
                    HighlightError::Storage(StoreError::Write(_)) => DELETE_FAILED,
                    _ => ACCESS_FAILED,
                })
            }
        }
    }

    async fn clear(&self) -> AckResponse {
        match self.repository.clear().await {
            Ok(()) => AckResponse::ok(),
            Err(e) => {
                error!("Failed to clear highlights: {}", e);
                AckResponse::failed(CLEAR_FAILED)
            }
        }
    }

    async fn summarize(&self, text: &str) -> SummaryResponse {
        match self.run_summarizer(text).await {
            Ok((summary, model)) => SummaryResponse::ok(markup::to_html(&summary), model),
            Err(e) => {
                error!("Summarization failed: {}", e);
                let details = (!e.is_input_error()).then(|| e.to_string());
                SummaryResponse::failed(e.user_message(), details)
            }
        }
    }

    async fn run_summarizer(&self, text: &str) -> Result<(String, String), SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let summarizer = self
            .summarizer
            .as_ref()
            .ok_or(SummarizeError::MissingApiKey)?;
        let summary = summarizer.summarize(text).await?;
        Ok((summary.text, summary.model))
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
