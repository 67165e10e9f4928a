use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use talents_core::model::{ProgressRecord, ResultsRecord};

use crate::local::LocalQuizStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// String-keyed, string-valued store with the semantics of browser local storage.
///
/// Every write replaces the whole value for its key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to the three quiz records.
///
/// Loads return `Ok(None)` for absent *and* malformed records; only backend
/// failures surface as errors.
#[async_trait]
pub trait QuizStateRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save_progress(&self, progress: &ProgressRecord) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_results(&self) -> Result<Option<ResultsRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save_results(&self, results: &ResultsRecord) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_last_completed(&self) -> Result<Option<DateTime<Utc>>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the marker cannot be written.
    async fn save_last_completed(&self, at: DateTime<Utc>) -> Result<(), StorageError>;

    /// Removes every quiz record.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` hit; remaining keys are still attempted.
    async fn clear_all(&self) -> Result<(), StorageError>;
}

/// Process-local store for tests and ephemeral sessions.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().map_or(0, |guard| guard.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Raw store plus the typed quiz view over it, behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub local: Arc<dyn KeyValueStore>,
    pub quiz: Arc<dyn QuizStateRepository>,
}

impl Storage {
    #[must_use]
    pub fn from_store(local: Arc<dyn KeyValueStore>) -> Self {
        let quiz: Arc<dyn QuizStateRepository> = Arc::new(LocalQuizStore::new(Arc::clone(&local)));
        Self { local, quiz }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}
