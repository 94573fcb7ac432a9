//! Transport from the capture and review components to the service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HighlightError;
use crate::message::{Request, Response};

/// Sends requests to the persistence and summarization service.
///
/// Operation failures come back as error-bearing [`Response`]s;
/// `Err` is reserved for transport failures.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, HighlightError>;
}

#[async_trait]
impl<T: ServiceClient + ?Sized> ServiceClient for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, HighlightError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: ServiceClient + ?Sized> ServiceClient for Box<T> {
    async fn send(&self, request: Request) -> Result<Response, HighlightError> {
        (**self).send(request).await
    }
}
