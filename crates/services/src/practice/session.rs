use prep_core::model::TrackedQuestion;

use crate::error::PracticeError;

//
// ─── ACTIONS ───────────────────────────────────────────────────────────────────
//

/// What the user chose to do with the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeAction {
    /// Move on without recording anything.
    Next,
    /// Move on, counting the question as skipped.
    Skip,
    /// Record the question as answered, then move on.
    MarkAnswered,
    /// Leave the session early.
    Quit,
}

impl PracticeAction {
    /// Parse the single-character commands of the terminal practice view.
    /// Anything unrecognised advances like Enter does.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "m" => Self::MarkAnswered,
            "s" => Self::Skip,
            "q" => Self::Quit,
            _ => Self::Next,
        }
    }
}

/// Counts reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeSummary {
    pub seen: usize,
    pub marked: usize,
    pub skipped: usize,
    pub quit_early: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory walk over a snapshot of questions.
///
/// The snapshot is taken when the session starts; answered flags recorded
/// during the session go straight to the progress store.
pub struct PracticeSession {
    questions: Vec<TrackedQuestion>,
    current: usize,
    summary: PracticeSummary,
    finished: bool,
}

impl PracticeSession {
    /// Create a session over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Empty` if no questions are provided.
    pub fn new(questions: Vec<TrackedQuestion>) -> Result<Self, PracticeError> {
        if questions.is_empty() {
            return Err(PracticeError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            summary: PracticeSummary::default(),
            finished: false,
        })
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current(&self) -> Option<&TrackedQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current)
    }

    /// One-based position of the current question and the total, e.g. `(2, 5)`.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.current + 1, self.total()))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finished || self.current >= self.questions.len()
    }

    #[must_use]
    pub fn summary(&self) -> PracticeSummary {
        self.summary
    }

    /// Apply `action` to the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Completed` if the session already ended.
    pub(crate) fn record(&mut self, action: PracticeAction) -> Result<(), PracticeError> {
        if self.is_complete() {
            return Err(PracticeError::Completed);
        }

        match action {
            PracticeAction::Quit => {
                self.finished = true;
                self.summary.quit_early = true;
                return Ok(());
            }
            PracticeAction::MarkAnswered => {
                self.summary.marked += 1;
                if let Some(entry) = self.questions.get_mut(self.current) {
                    entry.answered = true;
                }
            }
            PracticeAction::Skip => self.summary.skipped += 1,
            PracticeAction::Next => {}
        }

        self.summary.seen += 1;
        self.current += 1;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
