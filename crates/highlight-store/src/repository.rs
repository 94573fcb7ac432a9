//! The highlight collection.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use highlight_protocols::error::{HighlightError, StoreError};
use highlight_protocols::highlight::Highlight;
use highlight_protocols::store::KeyValueStore;

/// Store key holding the highlight collection.
pub const HIGHLIGHTS_KEY: &str = "highlights";

/// Ordered, append-only collection of highlights kept in a [`KeyValueStore`].
///
/// Mutations are read-modify-write cycles on the whole collection. They are
/// serialized within one repository; writers in other processes sharing the
/// same store are not coordinated with.
pub struct HighlightRepository {
    store: Arc<dyn KeyValueStore>,
    mutation_lock: Mutex<()>,
}

impl HighlightRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            mutation_lock: Mutex::new(()),
        }
    }

    /// ID of the underlying store backend.
    pub fn backend_id(&self) -> &str {
        self.store.id()
    }

    /// Make sure the collection key exists. Idempotent.
    pub async fn initialize(&self) -> Result<(), HighlightError> {
        let _guard = self.mutation_lock.lock().await;
        if self.read().await?.is_none() {
            self.write(&[]).await?;
            info!("Initialized empty highlight collection in {} store", self.store.id());
        }
        Ok(())
    }

    /// All highlights in insertion order.
    pub async fn list(&self) -> Result<Vec<Highlight>, HighlightError> {
        match self.read().await? {
            Some(highlights) => Ok(highlights),
            None => {
                self.initialize().await?;
                Ok(Vec::new())
            }
        }
    }

    /// Trim, validate and append a highlight. An empty id is replaced with a fresh one.
    pub async fn create(&self, mut highlight: Highlight) -> Result<Highlight, HighlightError> {
        highlight.text = highlight.text.trim().to_string();
        highlight.validate()?;
        if highlight.id.trim().is_empty() {
            highlight.id = Highlight::generate_id();
        }

        let _guard = self.mutation_lock.lock().await;
        let mut highlights = self.read().await?.unwrap_or_default();

        if highlights.iter().any(|h| h.id == highlight.id) {
            return Err(HighlightError::DuplicateId(highlight.id));
        }

        highlights.push(highlight.clone());
        self.write(&highlights).await?;

        debug!(id = %highlight.id, total = highlights.len(), "Stored highlight");
        Ok(highlight)
    }

    /// Remove the highlight with `id`, returning it.
    pub async fn delete_by_id(&self, id: &str) -> Result<Highlight, HighlightError> {
        if id.trim().is_empty() {
            return Err(HighlightError::Validation("no highlight ID provided".to_string()));
        }

        let _guard = self.mutation_lock.lock().await;
        let highlights = self.read().await?.unwrap_or_default();

        let (removed, remaining): (Vec<Highlight>, Vec<Highlight>) =
            highlights.into_iter().partition(|h| h.id == id);

        let Some(removed) = removed.into_iter().next() else {
            return Err(HighlightError::NotFound(id.to_string()));
        };

        self.write(&remaining).await?;

        debug!(id = %id, remaining = remaining.len(), "Deleted highlight");
        Ok(removed)
    }

    /// Remove every highlight.
    pub async fn clear(&self) -> Result<(), HighlightError> {
        let _guard = self.mutation_lock.lock().await;
        self.write(&[]).await?;
        info!("Cleared all highlights");
        Ok(())
    }

    async fn read(&self) -> Result<Option<Vec<Highlight>>, StoreError> {
        match self.store.get(HIGHLIGHTS_KEY).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    async fn write(&self, highlights: &[Highlight]) -> Result<(), StoreError> {
        let value = serde_json::to_value(highlights)?;
        self.store.set(HIGHLIGHTS_KEY, value).await
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
