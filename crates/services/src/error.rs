//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::QuestionId;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error("question {0} not found")]
    NotFound(QuestionId),
    #[error("no question id left after {0}")]
    IdsExhausted(QuestionId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuestionServiceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QueryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by practice sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("no questions available to practice")]
    Empty,
    #[error("practice session already completed")]
    Completed,
    #[error(transparent)]
    Query(#[from] QueryServiceError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
