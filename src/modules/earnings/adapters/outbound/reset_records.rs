use crate::modules::earnings::core::history::ResetRecord;
use crate::shared::infrastructure::key_value_store::{KeyValueStore, KeyValueStoreError};
use thiserror::Error;

/// Storage key holding the ledger as a JSON array of `{time, earning}` objects.
pub const RESET_RECORDS_KEY: &str = "wageAppResetRecords";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode reset records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
}

/// Reads the persisted ledger. An absent key, an unreachable store, or a value that
/// is not a record array all yield an empty ledger.
pub async fn load_reset_records(store: &dyn KeyValueStore) -> Vec<ResetRecord> {
    let raw = match store.get(RESET_RECORDS_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(%error, "could not read reset records, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!(%error, "stored reset records are malformed, starting empty");
            Vec::new()
        }
    }
}

pub async fn save_reset_records(
    store: &dyn KeyValueStore,
    records: &[ResetRecord],
) -> Result<(), PersistenceError> {
    let encoded = serde_json::to_string(records)?;
    store.set(RESET_RECORDS_KEY, &encoded).await?;
    Ok(())
}
