//! # Highlight Protocols
//!
//! Shared definitions for the Highlight Saver components.
//! Contains records, the message protocol and the trait seams - no
//! implementations.
//!
//! ## Core Traits
//!
//! - [`KeyValueStore`] - Durable key-value storage owned by the service
//! - [`Summarizer`] - External text summarization endpoint
//! - [`ServiceClient`] - Request/response transport to the service

pub mod client;
pub mod error;
pub mod highlight;
pub mod message;
pub mod store;
pub mod summarizer;

pub use client::ServiceClient;
pub use error::{HighlightError, StoreError, SummarizeError};
pub use highlight::{Highlight, MAX_HIGHLIGHT_CHARS, UNKNOWN_TITLE};
pub use message::{AckResponse, HighlightsResponse, Request, Response, SummaryResponse};
pub use store::KeyValueStore;
pub use summarizer::{Summary, Summarizer};
