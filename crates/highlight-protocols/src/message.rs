//! Message protocol between the components and the service.
//!
//! Every request carries an `action` tag; each action has its own response
//! shape. Responses never signal failure out of band: an operation that
//! fails still produces a response, with its `error` field set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HighlightError;
use crate::highlight::Highlight;

/// A request to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Persist a new highlight.
    SaveHighlight {
        #[serde(default)]
        highlight: Option<Highlight>,
    },

    /// Read the full collection.
    GetHighlights,

    /// Remove one highlight by id.
    DeleteHighlight {
        #[serde(default, rename = "highlightId")]
        highlight_id: String,
    },

    /// Remove every highlight.
    ClearHighlights,

    /// Summarize pre-formatted highlight text.
    SummarizeHighlights {
        #[serde(default)]
        highlights: String,
    },
}

impl Request {
    pub fn save(highlight: Highlight) -> Self {
        Request::SaveHighlight {
            highlight: Some(highlight),
        }
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Request::DeleteHighlight {
            highlight_id: id.into(),
        }
    }

    pub fn summarize(text: impl Into<String>) -> Self {
        Request::SummarizeHighlights {
            highlights: text.into(),
        }
    }

    /// The wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            Request::SaveHighlight { .. } => "saveHighlight",
            Request::GetHighlights => "getHighlights",
            Request::DeleteHighlight { .. } => "deleteHighlight",
            Request::ClearHighlights => "clearHighlights",
            Request::SummarizeHighlights { .. } => "summarizeHighlights",
        }
    }

    /// Decode a JSON response body into the shape this request expects.
    pub fn decode_response(&self, value: Value) -> Result<Response, serde_json::Error> {
        Ok(match self {
            Request::SaveHighlight { .. }
            | Request::DeleteHighlight { .. }
            | Request::ClearHighlights => Response::Ack(serde_json::from_value(value)?),
            Request::GetHighlights => Response::Highlights(serde_json::from_value(value)?),
            Request::SummarizeHighlights { .. } => {
                Response::Summary(serde_json::from_value(value)?)
            }
        })
    }
}

/// Response to save, delete and clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Response to getHighlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightsResponse {
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to summarizeHighlights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_details: Option<String>,
}

impl SummaryResponse {
    pub fn ok(summary: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            model: Some(model.into()),
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>, technical_details: Option<String>) -> Self {
        Self {
            error: Some(error.into()),
            technical_details,
            ..Default::default()
        }
    }
}

/// A response from the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Ack(AckResponse),
    Highlights(HighlightsResponse),
    Summary(SummaryResponse),
}

impl Response {
    /// The error message carried by the response, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Ack(r) => r.error.as_deref(),
            Response::Highlights(r) => r.error.as_deref(),
            Response::Summary(r) => r.error.as_deref(),
        }
    }

    /// Interpret as an acknowledgement.
    pub fn into_ack(self) -> Result<(), HighlightError> {
        match self {
            Response::Ack(AckResponse { success: true, .. }) => Ok(()),
            Response::Ack(AckResponse { error, .. }) => Err(HighlightError::Service(
                error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
            other => Err(unexpected("acknowledgement", &other)),
        }
    }

    /// Interpret as a highlight list.
    pub fn into_highlights(self) -> Result<Vec<Highlight>, HighlightError> {
        match self {
            Response::Highlights(HighlightsResponse { error: Some(e), .. }) => {
                Err(HighlightError::Service(e))
            }
            Response::Highlights(HighlightsResponse { highlights, .. }) => Ok(highlights),
            other => Err(unexpected("highlight list", &other)),
        }
    }

    /// Interpret as a summary, returning `(summary, model)`.
    pub fn into_summary(self) -> Result<(String, String), HighlightError> {
        match self {
            Response::Summary(SummaryResponse { error: Some(e), .. }) => {
                Err(HighlightError::Service(e))
            }
            Response::Summary(SummaryResponse {
                summary: Some(summary),
                model,
                ..
            }) => Ok((summary, model.unwrap_or_default())),
            Response::Summary(_) => Err(HighlightError::Service(
                "Unexpected response from the server.".to_string(),
            )),
            other => Err(unexpected("summary", &other)),
        }
    }
}

fn unexpected(expected: &str, got: &Response) -> HighlightError {
    HighlightError::Transport(format!("expected {} response, got {:?}", expected, got))
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
