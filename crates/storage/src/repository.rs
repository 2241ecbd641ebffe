use async_trait::async_trait;
use prep_core::model::{ProgressMap, Question};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
///
/// Unreadable or malformed documents are not errors: adapters recover them
/// as empty collections. Only failures with no safe fallback end up here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("write failed: {0}")]
    Write(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Whole-collection access to question records.
///
/// Every mutation is a full read-modify-write: callers load the complete set,
/// change it in memory and save it back.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load every question in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself is unreachable.
    /// Missing or malformed data loads as an empty set.
    async fn load_all(&self) -> Result<Vec<Question>, StorageError>;

    /// Replace the stored set with `questions`, keeping their order and ids.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the data cannot be persisted.
    async fn save_all(&self, questions: &[Question]) -> Result<(), StorageError>;
}

/// Whole-mapping access to answered flags.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the full progress mapping.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself is unreachable.
    /// Missing or malformed data loads as an empty mapping.
    async fn load_all(&self) -> Result<ProgressMap, StorageError>;

    /// Replace the stored mapping with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the data cannot be persisted.
    async fn save_all(&self, progress: &ProgressMap) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
    progress: Arc<Mutex<ProgressMap>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(Vec::new())),
            progress: Arc::new(Mutex::new(ProgressMap::new())),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn load_all(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_all(&self, questions: &[Question]) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        *guard = questions.to_vec();
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_all(&self) -> Result<ProgressMap, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_all(&self, progress: &ProgressMap) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        *guard = progress.clone();
        Ok(())
    }
}

/// Aggregates question and progress repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self {
            questions,
            progress,
        }
    }
}
