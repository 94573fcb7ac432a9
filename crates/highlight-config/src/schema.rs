//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when `summarizer.api_key` is not set.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub summarizer: SummarizerConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub review: ReviewConfig,
}

/// HTTP message endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Base URL clients use to reach the server.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8731
}

/// Durable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type (file, memory).
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Path of the JSON store file. Defaults to `~/.highlight-saver/highlights.json`.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: None,
        }
    }
}

fn default_storage_backend() -> String {
    "file".to_string()
}

/// External summarization endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Falls back to the `GROQ_API_KEY` environment variable.
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_summarizer_timeout")]
    pub timeout_seconds: u64,

    /// Input longer than this is truncated before transmission.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_summarizer_timeout(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

impl SummarizerConfig {
    /// The configured API key, or the one from the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    500
}

fn default_summarizer_timeout() -> u64 {
    30
}

fn default_max_input_chars() -> usize {
    64_000
}

/// Capture component configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// How long a save may wait for acknowledgement before the guard is cleared.
    #[serde(default = "default_save_timeout_ms")]
    pub save_timeout_ms: u64,

    /// Quiet period after scrolling before the affordance is re-shown.
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            save_timeout_ms: default_save_timeout_ms(),
            scroll_debounce_ms: default_scroll_debounce_ms(),
        }
    }
}

fn default_save_timeout_ms() -> u64 {
    5_000
}

fn default_scroll_debounce_ms() -> u64 {
    200
}

/// Review panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Client-side limit on waiting for a summary.
    #[serde(default = "default_review_timeout")]
    pub summarize_timeout_seconds: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            summarize_timeout_seconds: default_review_timeout(),
        }
    }
}

fn default_review_timeout() -> u64 {
    60
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
