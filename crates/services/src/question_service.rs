use std::sync::Arc;

use prep_core::model::{Question, QuestionDraft, QuestionId, QuestionPatch, next_question_id};
use storage::repository::{ProgressRepository, QuestionRepository};
use tracing::info;

use crate::error::QuestionServiceError;

/// Owns question records: add, update, delete, and whole-set load/save.
///
/// Every mutation reloads the full set, edits it and writes it back.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            questions,
            progress,
        }
    }

    /// Load every question in stored order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if the backend is unreachable.
    pub async fn load_all(&self) -> Result<Vec<Question>, QuestionServiceError> {
        Ok(self.questions.load_all().await?)
    }

    /// Replace the whole question set.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn save_all(&self, questions: &[Question]) -> Result<(), QuestionServiceError> {
        self.questions.save_all(questions).await?;
        Ok(())
    }

    /// Fetch a single question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if no question has this id.
    pub async fn get(&self, id: QuestionId) -> Result<Question, QuestionServiceError> {
        self.questions
            .load_all()
            .await?
            .into_iter()
            .find(|q| q.id() == id)
            .ok_or(QuestionServiceError::NotFound(id))
    }

    /// Append a new question with the next free id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::IdsExhausted` if the largest stored id is
    /// `u64::MAX`; nothing is written in that case.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn add(&self, draft: QuestionDraft) -> Result<Question, QuestionServiceError> {
        let mut questions = self.questions.load_all().await?;
        let Some(id) = next_question_id(&questions) else {
            return Err(QuestionServiceError::IdsExhausted(QuestionId::new(u64::MAX)));
        };
        let question = Question::new(id, draft);
        questions.push(question.clone());
        self.questions.save_all(&questions).await?;

        info!(
            question_id = %question.id(),
            category = %question.category(),
            "question added"
        );
        Ok(question)
    }

    /// Overwrite the fields supplied in `patch`, keeping the rest.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::NotFound` if no question has this id.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn update(
        &self,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, QuestionServiceError> {
        let mut questions = self.questions.load_all().await?;
        let question = questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(QuestionServiceError::NotFound(id))?;
        question.apply(patch);
        let updated = question.clone();
        self.questions.save_all(&questions).await?;

        info!(question_id = %id, "question updated");
        Ok(updated)
    }

    /// Remove a question and its progress entry.
    ///
    /// Deleting an unknown id is not an error. Returns whether a question was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn delete(&self, id: QuestionId) -> Result<bool, QuestionServiceError> {
        let mut questions = self.questions.load_all().await?;
        let before = questions.len();
        questions.retain(|q| q.id() != id);
        let removed = questions.len() != before;
        if removed {
            self.questions.save_all(&questions).await?;
        }

        let mut progress = self.progress.load_all().await?;
        if progress.remove(id).is_some() {
            self.progress.save_all(&progress).await?;
        }

        info!(question_id = %id, removed, "question deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use prep_core::model::ProgressMap;
    use storage::repository::InMemoryRepository;

    fn service(repo: &InMemoryRepository) -> QuestionService {
        QuestionService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn add_on_empty_store_assigns_one() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let question = service.add(QuestionDraft::new("Two sum")).await.unwrap();
        assert_eq!(question.id(), QuestionId::new(1));
        assert!(question.category().is_default());
        assert_eq!(question.hint(), "");
    }

    #[tokio::test]
    async fn add_uses_max_id_plus_one() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let existing: Vec<Question> = [1, 3, 5]
            .into_iter()
            .map(|id| Question::new(QuestionId::new(id), QuestionDraft::new(format!("Q{id}"))))
            .collect();
        service.save_all(&existing).await.unwrap();

        let question = service.add(QuestionDraft::new("Q6")).await.unwrap();
        assert_eq!(question.id(), QuestionId::new(6));

        let ids: Vec<u64> = service
            .load_all()
            .await
            .unwrap()
            .iter()
            .map(|q| q.id().value())
            .collect();
        assert_eq!(ids, vec![1, 3, 5, 6]);
    }

    #[tokio::test]
    async fn add_after_the_largest_id_fails_without_writing() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let last = Question::new(QuestionId::new(u64::MAX), QuestionDraft::new("last"));
        service.save_all(std::slice::from_ref(&last)).await.unwrap();

        let err = service.add(QuestionDraft::new("new")).await.unwrap_err();
        assert!(matches!(err, QuestionServiceError::IdsExhausted(_)));
        assert_eq!(service.load_all().await.unwrap(), vec![last]);
    }

    #[tokio::test]
    async fn update_overrides_only_supplied_fields() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let added = service
            .add(
                QuestionDraft::new("LRU cache")
                    .with_category("Design")
                    .with_hint("hash map + list"),
            )
            .await
            .unwrap();

        let updated = service
            .update(
                added.id(),
                QuestionPatch {
                    category: Some("Data Structures".into()),
                    ..QuestionPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id(), added.id());
        assert_eq!(updated.category().as_str(), "Data Structures");
        assert_eq!(updated.question(), "LRU cache");
        assert_eq!(updated.hint(), "hash map + list");
        assert_eq!(service.get(added.id()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);

        let err = service
            .update(QuestionId::new(42), QuestionPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(service.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_progress_and_tolerates_missing() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let first = service.add(QuestionDraft::new("A")).await.unwrap();
        let second = service.add(QuestionDraft::new("B")).await.unwrap();

        let mut progress = ProgressMap::new();
        progress.set(first.id(), true);
        progress.set(second.id(), true);
        ProgressRepository::save_all(&repo, &progress).await.unwrap();

        assert!(service.delete(first.id()).await.unwrap());
        assert!(!service.delete(first.id()).await.unwrap());
        assert!(!service.delete(QuestionId::new(99)).await.unwrap());

        let remaining = service.load_all().await.unwrap();
        assert_eq!(remaining, vec![second.clone()]);
        let progress = ProgressRepository::load_all(&repo).await.unwrap();
        assert!(!progress.is_answered(first.id()));
        assert!(progress.is_answered(second.id()));
        assert_eq!(progress.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_deleting_a_middle_record() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        for text in ["A", "B", "C"] {
            service.add(QuestionDraft::new(text)).await.unwrap();
        }
        service.delete(QuestionId::new(2)).await.unwrap();

        let next = service.add(QuestionDraft::new("D")).await.unwrap();
        assert_eq!(next.id(), QuestionId::new(4));
    }
}
