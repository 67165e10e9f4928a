use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use talents_core::model::{ProgressRecord, ResultsRecord};
use talents_core::time::{parse_iso, to_iso_string};

use crate::repository::{KeyValueStore, QuizStateRepository, StorageError};

pub const PROGRESS_KEY: &str = "ksa-talents-progress";
pub const RESULTS_KEY: &str = "ksa-talents-results";
pub const LAST_COMPLETED_KEY: &str = "ksa-talents-last-completed";

/// Keys from earlier releases that a restart still cleans up.
pub const LEGACY_KEYS: &[&str] = &["ksa-talents-selected", "ksa-talents-rejected"];

/// Quiz records stored as JSON strings in a [`KeyValueStore`].
#[derive(Clone)]
pub struct LocalQuizStore {
    store: Arc<dyn KeyValueStore>,
}

impl LocalQuizStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get_item(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding malformed record");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set_item(key, &raw).await
    }
}

#[async_trait]
impl QuizStateRepository for LocalQuizStore {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        self.read_json(PROGRESS_KEY).await
    }

    async fn save_progress(&self, progress: &ProgressRecord) -> Result<(), StorageError> {
        self.write_json(PROGRESS_KEY, progress).await
    }

    async fn load_results(&self) -> Result<Option<ResultsRecord>, StorageError> {
        self.read_json(RESULTS_KEY).await
    }

    async fn save_results(&self, results: &ResultsRecord) -> Result<(), StorageError> {
        self.write_json(RESULTS_KEY, results).await
    }

    async fn load_last_completed(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let Some(raw) = self.store.get_item(LAST_COMPLETED_KEY).await? else {
            return Ok(None);
        };
        // Stored raw, but tolerate a JSON-quoted string too.
        let parsed = parse_iso(raw.trim_matches('"'));
        if parsed.is_none() {
            tracing::warn!(key = LAST_COMPLETED_KEY, "discarding malformed completion marker");
        }
        Ok(parsed)
    }

    async fn save_last_completed(&self, at: DateTime<Utc>) -> Result<(), StorageError> {
        self.store
            .set_item(LAST_COMPLETED_KEY, &to_iso_string(at))
            .await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        let keys = [PROGRESS_KEY, RESULTS_KEY, LAST_COMPLETED_KEY]
            .into_iter()
            .chain(LEGACY_KEYS.iter().copied());
        for key in keys {
            if let Err(err) = self.store.remove_item(key).await {
                tracing::warn!(key, error = %err, "failed to remove record");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
