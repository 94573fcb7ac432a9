//! JSON file store implementation.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use highlight_protocols::error::StoreError;
use highlight_protocols::store::KeyValueStore;

/// Key-value store persisted as a single JSON object on disk.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// store file, so readers see either the old or the new document.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write of the document.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`, creating the parent directory if needed.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::Unavailable(format!(
                        "failed to create storage directory {:?}: {}",
                        parent, e
                    ))
                })?;
                info!("Created storage directory: {:?}", parent);
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Serialization(format!(
                "store document must be a JSON object, found {}",
                type_name(&other)
            ))),
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");

        fs::write(&tmp_path, content)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!("Wrote store document to {:?}", self.path);
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    fn id(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let document = self.read_document().await?;
        Ok(document.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        self.write_document(&document).await
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
