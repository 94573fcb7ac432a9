//! In-memory store implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use highlight_protocols::error::StoreError;
use highlight_protocols::store::KeyValueStore;

/// Key-value store held in memory.
///
/// Reads and writes can be switched into a failing mode to exercise the
/// storage-failure paths of callers.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn id(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("memory store read failure".to_string()));
        }
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("memory store write failure".to_string()));
        }
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.set("k", json!([1])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!([1])));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failing_reads() {
        let store = MemoryStore::new();
        store.set_fail_reads(true);
        assert!(matches!(store.get("k").await, Err(StoreError::Read(_))));

        store.set_fail_reads(false);
        assert!(store.get("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_writes_keep_previous_value() {
        let store = MemoryStore::new();
        store.set("k", json!("old")).await.unwrap();

        store.set_fail_writes(true);
        assert!(matches!(store.set("k", json!("new")).await, Err(StoreError::Write(_))));
        assert_eq!(store.get("k").await.unwrap(), Some(json!("old")));
    }
}
