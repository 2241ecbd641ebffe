use std::sync::Arc;

use prep_core::model::{QuestionFilter, TrackedQuestion};
use rand::Rng;
use rand::seq::SliceRandom;

use super::session::{PracticeAction, PracticeSession, PracticeSummary};
use crate::error::PracticeError;
use crate::progress_service::ProgressService;
use crate::query_service::QueryService;

/// Which questions a practice session draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeSelection {
    All,
    Category(String),
    Unanswered,
}

impl PracticeSelection {
    fn filter(&self) -> QuestionFilter {
        match self {
            Self::All => QuestionFilter::all(),
            Self::Category(category) => QuestionFilter::category(category.clone()),
            Self::Unanswered => QuestionFilter::unanswered(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PracticeOrder {
    #[default]
    AsStored,
    Shuffled,
}

fn arrange<R: Rng + ?Sized>(
    mut questions: Vec<TrackedQuestion>,
    order: PracticeOrder,
    rng: &mut R,
) -> Result<PracticeSession, PracticeError> {
    if order == PracticeOrder::Shuffled {
        questions.shuffle(rng);
    }
    PracticeSession::new(questions)
}

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeStep {
    pub action: PracticeAction,
    pub is_complete: bool,
    pub summary: PracticeSummary,
}

/// Orchestrates practice start and persisted answering.
#[derive(Clone)]
pub struct PracticeLoopService {
    query: Arc<QueryService>,
    progress: Arc<ProgressService>,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(query: Arc<QueryService>, progress: Arc<ProgressService>) -> Self {
        Self { query, progress }
    }

    /// Start a session over the selected questions.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Empty` if the selection matches nothing.
    /// Returns `PracticeError::Query` if the stores cannot be read.
    pub async fn start_session(
        &self,
        selection: &PracticeSelection,
        order: PracticeOrder,
    ) -> Result<PracticeSession, PracticeError> {
        let questions = self.query.list(&selection.filter()).await?;
        // The thread-local rng is created after the await so the future stays Send.
        arrange(questions, order, &mut rand::rng())
    }

    /// Like [`Self::start_session`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start_session`].
    pub async fn start_session_with_rng<R: Rng + Send>(
        &self,
        selection: &PracticeSelection,
        order: PracticeOrder,
        rng: &mut R,
    ) -> Result<PracticeSession, PracticeError> {
        let questions = self.query.list(&selection.filter()).await?;
        arrange(questions, order, rng)
    }

    /// Apply `action` to the current question, persisting a mark if requested.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Completed` if the session already ended.
    /// Returns `PracticeError::Progress` if the mark cannot be persisted; the
    /// session does not advance in that case.
    pub async fn answer_current(
        &self,
        session: &mut PracticeSession,
        action: PracticeAction,
    ) -> Result<PracticeStep, PracticeError> {
        let Some(current) = session.current() else {
            return Err(PracticeError::Completed);
        };

        if action == PracticeAction::MarkAnswered {
            let id = current.question.id();
            self.progress.mark_answered(id).await?;
        }
        session.record(action)?;

        Ok(PracticeStep {
            action,
            is_complete: session.is_complete(),
            summary: session.summary(),
        })
    }
}
