//! Chat-completions summarizer implementation.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use highlight_protocols::error::SummarizeError;
use highlight_protocols::summarizer::{Summarizer, Summary};

use crate::api::{ApiMessage, ApiRequest, ApiResponse, ErrorEnvelope};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_MAX_INPUT_CHARS: usize = 64_000;
pub const TRUNCATION_MARKER: &str = "... [truncated due to length]";

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes text in a clear, \
concise manner. Focus on extracting key points and insights.";

const USER_PROMPT: &str = "Please summarize the following highlights in a well-structured \
format, identifying main themes and key points:\n\n";

const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cut `text` to at most `max_chars` characters, appending [`TRUNCATION_MARKER`] when cut.
pub fn truncate_input(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}

/// Summarizer backed by an OpenAI-compatible chat-completions endpoint.
pub struct ChatSummarizer {
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    max_input_chars: usize,
    client: reqwest::Client,
}

impl ChatSummarizer {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create a summarizer with a custom API URL (for other OpenAI-compatible APIs).
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    fn build_request(&self, text: &str) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            messages: vec![
                ApiMessage::system(SYSTEM_PROMPT),
                ApiMessage::user(format!("{}{}", USER_PROMPT, text)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<String, SummarizeError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| SummarizeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::UnexpectedResponse(e.to_string()))?;

        if let Some(error) = api_response.error {
            return Err(SummarizeError::UnexpectedResponse(
                error
                    .message
                    .unwrap_or_else(|| "Unknown error from summarization API".to_string()),
            ));
        }

        api_response
            .first_content()
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                SummarizeError::UnexpectedResponse("response contained no completion".to_string())
            })
    }
}

fn status_error(status: StatusCode, body: &str) -> SummarizeError {
    let message = ErrorEnvelope::message_from(body)
        .unwrap_or_else(|| format!("API error: {}", status.as_u16()));

    match status {
        StatusCode::TOO_MANY_REQUESTS => SummarizeError::RateLimited(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SummarizeError::AuthenticationFailed(message)
        }
        _ => SummarizeError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    fn model(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, text: &str) -> Result<Summary, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        if self.api_key.trim().is_empty() {
            warn!("Summarization requested without an API key");
            return Err(SummarizeError::MissingApiKey);
        }

        let input = truncate_input(text, self.max_input_chars);
        info!("Sending {} chars to summarization API", input.chars().count());

        let api_request = self.build_request(&input);

        // Dropping the request future on timeout aborts the in-flight call.
        let content = tokio::time::timeout(self.timeout, self.send_request(&api_request))
            .await
            .map_err(|_| SummarizeError::Timeout(self.timeout.as_secs()))??;

        debug!("Summary received ({} chars)", content.len());
        Ok(Summary {
            text: content,
            model: self.model.clone(),
        })
    }
}

#[cfg(test)]
#[path = "summarizer_tests.rs"]
mod tests;
