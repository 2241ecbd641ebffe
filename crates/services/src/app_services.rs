use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::practice::PracticeLoopService;
use crate::progress_service::ProgressService;
use crate::query_service::QueryService;
use crate::question_service::QuestionService;

/// Assembles the services the front-ends call, all sharing one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<QuestionService>,
    progress: Arc<ProgressService>,
    query: Arc<QueryService>,
    practice: Arc<PracticeLoopService>,
}

impl AppServices {
    /// Wire services over an existing storage backend.
    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        let questions = Arc::new(QuestionService::new(
            Arc::clone(&storage.questions),
            Arc::clone(&storage.progress),
        ));
        let progress = Arc::new(ProgressService::new(Arc::clone(&storage.progress)));
        let query = Arc::new(QueryService::new(
            Arc::clone(&storage.questions),
            Arc::clone(&storage.progress),
        ));
        let practice = Arc::new(PracticeLoopService::new(
            Arc::clone(&query),
            Arc::clone(&progress),
        ));

        Self {
            questions,
            progress,
            query,
            practice,
        }
    }

    /// Build services backed by the two JSON documents.
    #[must_use]
    pub fn json(
        questions_path: impl Into<std::path::PathBuf>,
        progress_path: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self::from_storage(&Storage::json(questions_path, progress_path))
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory())
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn query(&self) -> Arc<QueryService> {
        Arc::clone(&self.query)
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice)
    }
}
