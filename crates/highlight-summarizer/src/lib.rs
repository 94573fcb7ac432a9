//! Summarization for Highlight Saver.
//!
//! [`ChatSummarizer`] calls an OpenAI-compatible chat-completions endpoint
//! (Groq by default). [`markup::to_html`] turns the model's markdown-like
//! reply into markup for display.

mod api;
pub mod markup;
mod summarizer;

pub use summarizer::{
    truncate_input, ChatSummarizer, DEFAULT_API_URL, DEFAULT_MAX_INPUT_CHARS, DEFAULT_MODEL,
    SYSTEM_PROMPT, TRUNCATION_MARKER,
};
