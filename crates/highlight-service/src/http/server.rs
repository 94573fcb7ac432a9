//! HTTP server for the service.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use highlight_protocols::message::Request;

use crate::service::HighlightService;

/// Build the service router.
pub fn create_router(service: Arc<HighlightService>) -> Router {
    Router::new()
        .route("/message", post(handle_message))
        .route("/health", get(health))
        .with_state(service)
}

async fn handle_message(
    State(service): State<Arc<HighlightService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(value) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected message body: {}", rejection.body_text());
            return bad_request(format!("Invalid request body: {}", rejection.body_text()));
        }
    };

    let request: Request = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected message: {}", e);
            return bad_request(format!("Invalid request: {}", e));
        }
    };

    debug!(action = request.action(), "Handling message");
    let response = service.handle(request).await;
    (StatusCode::OK, Json(json!(response)))
}

fn bad_request(error: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": error })),
    )
}

async fn health(State(service): State<Arc<HighlightService>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": service.backend_id(),
        "summarizer": service.has_summarizer(),
    }))
}

/// The service's HTTP server.
pub struct HttpServer {
    host: String,
    port: u16,
    service: Arc<HighlightService>,
}

impl HttpServer {
    pub fn new(host: impl Into<String>, port: u16, service: Arc<HighlightService>) -> Self {
        Self {
            host: host.into(),
            port,
            service,
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn run(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        let app = create_router(self.service);
        info!("Highlight service listening on {}", listener.local_addr()?);
        axum::serve(listener, app).await
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
