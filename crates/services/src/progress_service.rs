use std::sync::Arc;

use prep_core::model::{ProgressMap, QuestionId};
use storage::repository::ProgressRepository;
use tracing::info;

use crate::error::ProgressServiceError;

/// Owns the answered flags.
///
/// Ids are not checked against the question set: toggling an id with no
/// question simply records a flag nobody will see.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }

    /// Load the full mapping.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the backend is unreachable.
    pub async fn load_all(&self) -> Result<ProgressMap, ProgressServiceError> {
        Ok(self.progress.load_all().await?)
    }

    /// Replace the full mapping.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn save_all(&self, progress: &ProgressMap) -> Result<(), ProgressServiceError> {
        self.progress.save_all(progress).await?;
        Ok(())
    }

    /// Answered flag for `id`; `false` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the backend is unreachable.
    pub async fn get(&self, id: QuestionId) -> Result<bool, ProgressServiceError> {
        Ok(self.progress.load_all().await?.is_answered(id))
    }

    /// Flip the flag for `id` and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn toggle(&self, id: QuestionId) -> Result<bool, ProgressServiceError> {
        let mut progress = self.progress.load_all().await?;
        let answered = progress.toggle(id);
        self.progress.save_all(&progress).await?;

        info!(question_id = %id, answered, "progress toggled");
        Ok(answered)
    }

    /// Set the flag for `id` to answered.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn mark_answered(&self, id: QuestionId) -> Result<bool, ProgressServiceError> {
        let mut progress = self.progress.load_all().await?;
        progress.set(id, true);
        self.progress.save_all(&progress).await?;

        info!(question_id = %id, "question marked answered");
        Ok(true)
    }

    /// Discard all recorded progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn reset_all(&self) -> Result<(), ProgressServiceError> {
        self.progress.save_all(&ProgressMap::new()).await?;
        info!("progress reset");
        Ok(())
    }
}
