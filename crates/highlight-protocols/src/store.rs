//! Durable key-value store protocol.
//!
//! The service is the only component that reads or writes the store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Core trait for durable key-value stores.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the backend ID.
    fn id(&self) -> &str;

    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// A failed write must leave the previous value in place.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}
