// Port for the external string-keyed store that holds persisted state.
//
// Boundaries
// - Values are opaque strings. Serialization belongs to the callers.
// - Single writer. A completed `set` is visible to the next `get` of the same key.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
}

pub mod in_memory;
pub mod json_file;
