//! The Highlight Saver service.
//!
//! [`HighlightService`] is the only component that touches the highlight
//! store or the summarizer. Components reach it through a
//! [`ServiceClient`](highlight_protocols::ServiceClient): [`LocalClient`]
//! in-process, or [`HttpClient`] against an [`HttpServer`].

pub mod http;
mod local;
mod service;

pub use http::{create_router, HttpClient, HttpServer};
pub use local::LocalClient;
pub use service::HighlightService;
