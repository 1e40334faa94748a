// File backed implementation of the KeyValueStore port.
//
// Purpose
// - Give the binary a durable store: one JSON object mapping keys to string values.
//
// Responsibilities
// - Treat a missing file as an empty store.
// - Replace the file atomically on every write (temp sibling, then rename).

use crate::shared::infrastructure::key_value_store::{KeyValueStore, KeyValueStoreError};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

type StoredValues = BTreeMap<String, String>;

pub struct JsonFileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_values(&self) -> Result<StoredValues, KeyValueStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(StoredValues::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(StoredValues::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_values(&self, values: &StoredValues) -> Result<(), KeyValueStoreError> {
        let contents = serde_json::to_string_pretty(values)?;
        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);
        tokio::fs::write(&temp_path, contents).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let values = self.read_values().await?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut values = match self.read_values().await {
            Ok(values) => values,
            Err(KeyValueStoreError::Corrupt(error)) => {
                tracing::warn!(path = %self.path.display(), %error, "overwriting corrupt store file");
                StoredValues::new()
            }
            Err(error) => return Err(error),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_values(&values).await
    }
}
