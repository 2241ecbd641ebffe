use async_trait::async_trait;
use prep_core::model::ProgressMap;
use serde_json::Value;
use tracing::warn;

use super::{JsonFileRepository, read_document, write_document};
use crate::repository::{ProgressRepository, StorageError};

/// Decode the progress document, keeping only boolean entries.
pub(crate) fn decode_progress(document: Value) -> ProgressMap {
    let Value::Object(entries) = document else {
        warn!("progress document is not an object; treating as empty");
        return ProgressMap::new();
    };

    let mut progress = ProgressMap::new();
    for (key, value) in entries {
        match value {
            Value::Bool(answered) => progress.insert_raw(key, answered),
            other => warn!(key = %key, value = %other, "skipping non-boolean progress entry"),
        }
    }
    progress
}

#[async_trait]
impl ProgressRepository for JsonFileRepository {
    async fn load_all(&self) -> Result<ProgressMap, StorageError> {
        Ok(read_document(self.progress_path())
            .await
            .map(decode_progress)
            .unwrap_or_default())
    }

    async fn save_all(&self, progress: &ProgressMap) -> Result<(), StorageError> {
        write_document(self.progress_path(), progress).await
    }
}
