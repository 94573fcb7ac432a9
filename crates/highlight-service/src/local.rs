//! In-process transport.

use std::sync::Arc;

use async_trait::async_trait;

use highlight_protocols::client::ServiceClient;
use highlight_protocols::error::HighlightError;
use highlight_protocols::message::{Request, Response};

use crate::service::HighlightService;

/// Client that dispatches directly into a [`HighlightService`].
#[derive(Clone)]
pub struct LocalClient {
    service: Arc<HighlightService>,
}

impl LocalClient {
    pub fn new(service: Arc<HighlightService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ServiceClient for LocalClient {
    async fn send(&self, request: Request) -> Result<Response, HighlightError> {
        Ok(self.service.handle(request).await)
    }
}
