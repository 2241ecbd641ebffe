use std::collections::BTreeSet;
use std::sync::Arc;

use prep_core::model::{Question, QuestionFilter, Stats, TrackedQuestion};
use storage::repository::{ProgressRepository, QuestionRepository};

use crate::error::QueryServiceError;

/// Read-only views joining questions with their answered flags.
///
/// Holds no state: every call reloads both stores.
#[derive(Clone)]
pub struct QueryService {
    questions: Arc<dyn QuestionRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl QueryService {
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

    /// Attach the current answered flag to each question.
    ///
    /// # Errors
    ///
    /// Returns `QueryServiceError::Storage` if the progress store is unreachable.
    pub async fn merge(
        &self,
        questions: Vec<Question>,
    ) -> Result<Vec<TrackedQuestion>, QueryServiceError> {
        let progress = self.progress.load_all().await?;
        Ok(questions
            .into_iter()
            .map(|question| {
                let answered = progress.is_answered(question.id());
                TrackedQuestion::new(question, answered)
            })
            .collect())
    }

    /// Questions matching `filter`, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `QueryServiceError::Storage` if either store is unreachable.
    pub async fn list(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<TrackedQuestion>, QueryServiceError> {
        let merged = self.merge(self.questions.load_all().await?).await?;
        Ok(merged
            .into_iter()
            .filter(|entry| filter.matches(&entry.question, entry.answered))
            .collect())
    }

    /// Distinct categories, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns `QueryServiceError::Storage` if the question store is unreachable.
    pub async fn categories(&self) -> Result<Vec<String>, QueryServiceError> {
        let questions = self.questions.load_all().await?;
        let distinct: BTreeSet<&str> = questions.iter().map(|q| q.category().as_str()).collect();
        Ok(distinct.into_iter().map(str::to_owned).collect())
    }

    /// Overall and per-category completion counts.
    ///
    /// # Errors
    ///
    /// Returns `QueryServiceError::Storage` if either store is unreachable.
    pub async fn stats(&self) -> Result<Stats, QueryServiceError> {
        let merged = self.merge(self.questions.load_all().await?).await?;
        Ok(Stats::tally(
            merged.iter().map(|entry| (&entry.question, entry.answered)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use prep_core::model::{CategoryStats, ProgressMap, QuestionDraft, QuestionId};
    use storage::repository::InMemoryRepository;

    async fn seeded(entries: &[(u64, Option<&str>, bool)]) -> (InMemoryRepository, QueryService) {
        let repo = InMemoryRepository::new();
        let mut questions = Vec::new();
        let mut progress = ProgressMap::new();
        for (id, category, answered) in entries {
            let mut draft = QuestionDraft::new(format!("Q{id}"));
            draft.category = category.map(str::to_owned);
            questions.push(Question::new(QuestionId::new(*id), draft));
            if *answered {
                progress.set(QuestionId::new(*id), true);
            }
        }
        QuestionRepository::save_all(&repo, &questions).await.unwrap();
        ProgressRepository::save_all(&repo, &progress).await.unwrap();
        let service = QueryService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        (repo, service)
    }

    fn ids(entries: &[TrackedQuestion]) -> Vec<u64> {
        entries.iter().map(|e| e.question.id().value()).collect()
    }

    #[tokio::test]
    async fn list_filters_by_exact_category_and_keeps_order() {
        let (_repo, service) = seeded(&[
            (3, Some("Algorithms"), false),
            (1, Some("Behavioral"), false),
            (2, Some("Algorithms"), true),
            (4, Some("algorithms"), false),
        ])
        .await;

        let listed = service
            .list(&QuestionFilter::category("Algorithms"))
            .await
            .unwrap();
        assert_eq!(ids(&listed), vec![3, 2]);
        assert!(listed[1].answered);

        let all = service.list(&QuestionFilter::new(Some("all"), false)).await.unwrap();
        assert_eq!(ids(&all), vec![3, 1, 2, 4]);
    }

    #[tokio::test]
    async fn list_unanswered_excludes_answered() {
        let (_repo, service) = seeded(&[
            (1, Some("DP"), true),
            (2, Some("DP"), false),
            (3, None, false),
        ])
        .await;

        let listed = service.list(&QuestionFilter::unanswered()).await.unwrap();
        assert_eq!(ids(&listed), vec![2, 3]);
        assert!(listed.iter().all(|e| !e.answered));

        let combined = service
            .list(&QuestionFilter::new(Some("DP"), true))
            .await
            .unwrap();
        assert_eq!(ids(&combined), vec![2]);
    }

    #[tokio::test]
    async fn default_category_is_listable_and_counted() {
        let (_repo, service) = seeded(&[(1, None, false), (2, Some(""), true)]).await;

        let listed = service
            .list(&QuestionFilter::category("Uncategorized"))
            .await
            .unwrap();
        assert_eq!(ids(&listed), vec![1, 2]);
        assert_eq!(service.categories().await.unwrap(), vec!["Uncategorized"]);

        let stats = service.stats().await.unwrap();
        assert_eq!(
            stats.categories["Uncategorized"],
            CategoryStats {
                total: 2,
                answered: 1
            }
        );
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let (_repo, service) = seeded(&[
            (1, Some("System Design"), false),
            (2, Some("Behavioral"), false),
            (3, Some("System Design"), false),
            (4, Some("Arrays"), false),
        ])
        .await;

        assert_eq!(
            service.categories().await.unwrap(),
            vec!["Arrays", "Behavioral", "System Design"]
        );
    }

    #[tokio::test]
    async fn stats_on_empty_store_are_zero() {
        let (_repo, service) = seeded(&[]).await;
        let stats = service.stats().await.unwrap();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.answered, 0);
        assert_eq!(stats.unanswered, 0);
        assert!(stats.percentage.abs() < f64::EPSILON);
        assert!(stats.categories.is_empty());
    }

    #[tokio::test]
    async fn stale_progress_keys_are_ignored() {
        let (repo, service) = seeded(&[(1, Some("DP"), false)]).await;
        let mut progress = ProgressMap::new();
        progress.set(QuestionId::new(77), true);
        ProgressRepository::save_all(&repo, &progress).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.answered, 0);
    }
}
