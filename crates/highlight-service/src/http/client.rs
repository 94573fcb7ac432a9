//! HTTP transport client.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use highlight_protocols::client::ServiceClient;
use highlight_protocols::error::HighlightError;
use highlight_protocols::message::{Request, Response};

/// Client that talks to an [`HttpServer`](super::HttpServer).
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the server's health document.
    pub async fn health(&self) -> Result<Value, HighlightError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| HighlightError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HighlightError::Transport(format!(
                "health check returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| HighlightError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ServiceClient for HttpClient {
    async fn send(&self, request: Request) -> Result<Response, HighlightError> {
        debug!(action = request.action(), "Sending message to {}", self.base_url);

        let response = self
            .client
            .post(format!("{}/message", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| HighlightError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return Err(HighlightError::Transport(format!(
                    "invalid response (HTTP {}): {}",
                    status.as_u16(),
                    e
                )))
            }
        };

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(HighlightError::Transport(message));
        }

        request
            .decode_response(body)
            .map_err(|e| HighlightError::Transport(format!("malformed response: {}", e)))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
