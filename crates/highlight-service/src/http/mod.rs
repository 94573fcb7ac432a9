//! HTTP transport.
//!
//! ```text
//! POST /message  - dispatch one Request, respond with its Response
//! GET  /health   - liveness and backend information
//! ```

mod client;
mod server;

pub use client::HttpClient;
pub use server::{create_router, HttpServer};
