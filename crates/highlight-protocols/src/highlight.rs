//! The highlight record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HighlightError;

/// Maximum highlight length, in characters.
pub const MAX_HIGHLIGHT_CHARS: usize = 100_000;

/// Title used when the page does not provide one.
pub const UNKNOWN_TITLE: &str = "Unknown page";

/// A saved text selection.
///
/// Missing fields deserialize to empty values so that malformed records
/// reach validation instead of failing at the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Opaque unique id, the only lookup and delete key.
    #[serde(default)]
    pub id: String,

    /// The selected text, trimmed.
    #[serde(default)]
    pub text: String,

    /// Page address the text was selected on.
    #[serde(default)]
    pub url: String,

    /// Page title, or [`UNKNOWN_TITLE`].
    #[serde(default = "default_title")]
    pub title: String,

    /// Creation time.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

fn default_title() -> String {
    UNKNOWN_TITLE.to_string()
}

impl Highlight {
    /// Build a new highlight with a fresh id and the current time.
    pub fn new(text: impl AsRef<str>, url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: Self::generate_id(),
            text: text.as_ref().trim().to_string(),
            url: url.into(),
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(default_title),
            timestamp: Utc::now(),
        }
    }

    /// Generate a new highlight id.
    pub fn generate_id() -> String {
        format!("highlight_{}", uuid::Uuid::new_v4().simple())
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check the record constraints that must hold before it is stored.
    pub fn validate(&self) -> Result<(), HighlightError> {
        if self.text.trim().is_empty() {
            return Err(HighlightError::Validation("text is empty".to_string()));
        }
        if self.url.is_empty() {
            return Err(HighlightError::Validation("url is empty".to_string()));
        }
        let len = self.char_len();
        if len > MAX_HIGHLIGHT_CHARS {
            return Err(HighlightError::Validation(format!(
                "text is too long ({} characters, limit {})",
                len, MAX_HIGHLIGHT_CHARS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
