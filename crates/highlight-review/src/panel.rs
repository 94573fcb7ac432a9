//! The review panel.

use std::time::Duration;

use chrono::Local;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use highlight_protocols::client::ServiceClient;
use highlight_protocols::highlight::Highlight;
use highlight_protocols::message::Request;

use crate::error::ReviewError;
use crate::format::{display_source, format_date, summary_lines};
use crate::view::{HighlightRow, PanelState, PanelView, SummaryView};

pub const DEFAULT_SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(60);

pub const CLEAR_PROMPT: &str =
    "Are you sure you want to delete all highlights? This cannot be undone.";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

struct PanelInner {
    state: PanelState,
    rows: Vec<HighlightRow>,
    count: usize,
    status: String,
    summary: Option<SummaryView>,
}

/// View model of the saved-highlights panel.
pub struct ReviewPanel<C: ServiceClient> {
    client: C,
    summarize_timeout: Duration,
    inner: Mutex<PanelInner>,
}

impl<C: ServiceClient> ReviewPanel<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            summarize_timeout: DEFAULT_SUMMARIZE_TIMEOUT,
            inner: Mutex::new(PanelInner {
                state: PanelState::Idle,
                rows: Vec::new(),
                count: 0,
                status: "Loading...".to_string(),
                summary: None,
            }),
        }
    }

    pub fn with_summarize_timeout(mut self, timeout: Duration) -> Self {
        self.summarize_timeout = timeout;
        self
    }

    pub fn state(&self) -> PanelState {
        self.inner.lock().state
    }

    /// Number of saved highlights, as of the last read.
    pub fn count(&self) -> usize {
        self.inner.lock().count
    }

    pub fn status(&self) -> String {
        self.inner.lock().status.clone()
    }

    pub fn summary(&self) -> Option<SummaryView> {
        self.inner.lock().summary.clone()
    }

    pub fn dismiss_summary(&self) {
        self.inner.lock().summary = None;
    }

    pub fn view(&self) -> PanelView {
        let inner = self.inner.lock();
        if inner.rows.is_empty() {
            PanelView::Empty
        } else {
            PanelView::Rows(inner.rows.clone())
        }
    }

    /// Url to re-open for the row with `id`.
    pub fn source_url(&self, id: &str) -> Option<String> {
        self.inner
            .lock()
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.url.clone())
    }

    /// Load the collection, newest first.
    pub async fn open(&self) -> Result<PanelView, ReviewError> {
        self.inner.lock().state = PanelState::Loading;
        let result = self.fetch().await;

        let mut inner = self.inner.lock();
        inner.state = PanelState::Idle;
        let mut highlights = match result {
            Ok(highlights) => highlights,
            Err(e) => {
                inner.status = "Error occurred".to_string();
                return Err(e);
            }
        };

        highlights.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        inner.rows = highlights.iter().map(row).collect();
        inner.count = inner.rows.len();
        inner.status = if inner.rows.is_empty() {
            "No highlights saved".to_string()
        } else {
            format!("Last updated: {}", Local::now().format("%H:%M:%S"))
        };
        debug!(count = inner.count, "Review panel loaded");

        Ok(if inner.rows.is_empty() {
            PanelView::Empty
        } else {
            PanelView::Rows(inner.rows.clone())
        })
    }

    /// Delete one highlight.
    pub async fn delete(&self, id: &str) -> Result<(), ReviewError> {
        if id.is_empty() {
            warn!("No highlight ID provided for deletion");
            return Err(ReviewError::MissingId);
        }

        let acked = self
            .client
            .send(Request::delete(id))
            .await
            .and_then(|response| response.into_ack());
        if let Err(e) = acked {
            error!("Failed to delete highlight {}: {}", id, e);
            self.inner.lock().status = "Error occurred".to_string();
            return Err(ReviewError::Delete(e));
        }

        {
            let mut inner = self.inner.lock();
            inner.rows.retain(|row| row.id != id);
            inner.count = inner.rows.len();
        }

        match self.fetch().await {
            Ok(highlights) => {
                let mut inner = self.inner.lock();
                inner.count = highlights.len();
                inner.status = "Highlight deleted".to_string();
            }
            Err(e) => warn!("Could not refresh highlight count: {}", e),
        }
        Ok(())
    }

    /// Delete every highlight once `confirm` agrees. Returns whether anything
    /// was cleared.
    pub async fn clear_all(&self, confirm: &dyn Confirm) -> Result<bool, ReviewError> {
        if !confirm.confirm(CLEAR_PROMPT) {
            debug!("Clear all cancelled");
            return Ok(false);
        }

        self.client
            .send(Request::ClearHighlights)
            .await
            .and_then(|response| response.into_ack())
            .map_err(|e| {
                error!("Failed to clear highlights: {}", e);
                ReviewError::Clear(e)
            })?;

        info!("All highlights cleared");
        self.open().await?;
        self.inner.lock().status = "All highlights cleared".to_string();
        Ok(true)
    }

    /// Summarize the whole collection.
    ///
    /// Fails only when the collection cannot be read or is empty; a failed
    /// summarization is reported as [`SummaryView::Failed`].
    pub async fn summarize(&self) -> Result<SummaryView, ReviewError> {
        let highlights = self.fetch().await?;
        if highlights.is_empty() {
            return Err(ReviewError::NothingToSummarize);
        }

        {
            let mut inner = self.inner.lock();
            inner.state = PanelState::Summarizing;
            inner.summary = Some(SummaryView::Loading);
        }

        let request = Request::summarize(summary_lines(&highlights));
        let result = tokio::time::timeout(self.summarize_timeout, self.client.send(request)).await;

        let view = match result {
            Ok(Ok(response)) => match response.into_summary() {
                Ok((html, model)) => SummaryView::Ready { html, model },
                Err(e) => SummaryView::Failed {
                    message: e.to_string(),
                    timed_out: false,
                },
            },
            Ok(Err(e)) => SummaryView::Failed {
                message: format!("Error: {}", e),
                timed_out: false,
            },
            Err(_) => SummaryView::Failed {
                message: format!(
                    "Error: Request timed out after {} seconds",
                    self.summarize_timeout.as_secs()
                ),
                timed_out: true,
            },
        };

        let mut inner = self.inner.lock();
        inner.state = PanelState::Idle;
        match &view {
            SummaryView::Ready { model, .. } => {
                info!(model = %model, "Summary generated");
                inner.status = "Summary generated".to_string();
            }
            SummaryView::Failed { message, .. } => error!("Summarization failed: {}", message),
            SummaryView::Loading => {}
        }
        inner.summary = Some(view.clone());
        Ok(view)
    }

    async fn fetch(&self) -> Result<Vec<Highlight>, ReviewError> {
        self.client
            .send(Request::GetHighlights)
            .await
            .and_then(|response| response.into_highlights())
            .map_err(ReviewError::Load)
    }
}

fn row(highlight: &Highlight) -> HighlightRow {
    HighlightRow {
        id: highlight.id.clone(),
        quoted_text: format!("\"{}\"", highlight.text),
        source: display_source(&highlight.url),
        date: format_date(&highlight.timestamp),
        url: highlight.url.clone(),
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
