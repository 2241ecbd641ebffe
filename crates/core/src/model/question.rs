use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Category, QuestionId};

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Fields supplied when adding a question. Missing values take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, alias = "notes")]
    pub hint: Option<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Partial update. `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionPatch {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, alias = "notes")]
    pub hint: Option<String>,
}

impl QuestionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.question.is_none() && self.hint.is_none()
    }
}

/// A stored interview question.
///
/// The id is fixed at construction; [`Question::apply`] can only touch the
/// content fields. Fields the store does not model are carried in `extra` so
/// they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    id: QuestionId,
    category: Category,
    question: String,
    hint: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Question {
    /// Build a new question from a draft, applying defaults.
    #[must_use]
    pub fn new(id: QuestionId, draft: QuestionDraft) -> Self {
        Self {
            id,
            category: Category::normalize(draft.category.as_deref()),
            question: draft.question.unwrap_or_default(),
            hint: draft.hint.unwrap_or_default(),
            extra: Map::new(),
        }
    }

    /// Rebuild a question from persisted fields, normalizing on the way in.
    #[must_use]
    pub fn from_persisted(
        id: QuestionId,
        category: Option<String>,
        question: Option<String>,
        hint: Option<String>,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            category: Category::from(category),
            question: question.unwrap_or_default(),
            hint: hint.unwrap_or_default(),
            extra,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Overwrite each field the patch supplies.
    pub fn apply(&mut self, patch: QuestionPatch) {
        if let Some(category) = patch.category {
            self.category = Category::from(category);
        }
        if let Some(question) = patch.question {
            self.question = question;
        }
        if let Some(hint) = patch.hint {
            self.hint = hint;
        }
    }
}

/// A question joined with its answered flag at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub answered: bool,
}

impl TrackedQuestion {
    #[must_use]
    pub fn new(question: Question, answered: bool) -> Self {
        Self { question, answered }
    }
}

/// Next id to assign: one past the largest existing id, or 1 for an empty set.
/// `None` when the largest id is already `u64::MAX`.
#[must_use]
pub fn next_question_id(questions: &[Question]) -> Option<QuestionId> {
    match questions.iter().map(Question::id).max() {
        Some(max) => max.next(),
        None => Some(QuestionId::new(1)),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_CATEGORY;

    fn q(id: u64) -> Question {
        Question::new(QuestionId::new(id), QuestionDraft::new(format!("Q{id}")))
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_question_id(&[]), Some(QuestionId::new(1)));
    }

    #[test]
    fn next_id_follows_max_not_count() {
        let existing = vec![q(1), q(5), q(3)];
        assert_eq!(next_question_id(&existing), Some(QuestionId::new(6)));
    }

    #[test]
    fn next_id_is_none_past_the_largest_id() {
        assert_eq!(next_question_id(&[q(3), q(u64::MAX)]), None);
    }

    #[test]
    fn draft_defaults_are_applied() {
        let question = Question::new(QuestionId::new(1), QuestionDraft::default());
        assert_eq!(question.category().as_str(), DEFAULT_CATEGORY);
        assert_eq!(question.question(), "");
        assert_eq!(question.hint(), "");
    }

    #[test]
    fn patch_keeps_omitted_fields() {
        let mut question = Question::new(
            QuestionId::new(3),
            QuestionDraft::new("Reverse a list")
                .with_category("Lists")
                .with_hint("two pointers"),
        );
        question.apply(QuestionPatch {
            question: Some("Reverse a linked list".into()),
            ..QuestionPatch::default()
        });

        assert_eq!(question.id(), QuestionId::new(3));
        assert_eq!(question.category().as_str(), "Lists");
        assert_eq!(question.question(), "Reverse a linked list");
        assert_eq!(question.hint(), "two pointers");
    }

    #[test]
    fn patch_with_blank_category_falls_back_to_default() {
        let mut question = Question::new(
            QuestionId::new(1),
            QuestionDraft::new("Q").with_category("Graphs"),
        );
        question.apply(QuestionPatch {
            category: Some(String::new()),
            ..QuestionPatch::default()
        });
        assert!(question.category().is_default());
    }

    #[test]
    fn tracked_question_serializes_flat() {
        let mut extra = Map::new();
        extra.insert("difficulty".into(), Value::from("hard"));
        let question = Question::from_persisted(
            QuestionId::new(2),
            Some("DP".into()),
            Some("Knapsack".into()),
            None,
            extra,
        );
        let value = serde_json::to_value(TrackedQuestion::new(question, true)).unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["category"], "DP");
        assert_eq!(value["question"], "Knapsack");
        assert_eq!(value["hint"], "");
        assert_eq!(value["difficulty"], "hard");
        assert_eq!(value["answered"], true);
    }

    #[test]
    fn draft_accepts_notes_alias() {
        let draft: QuestionDraft =
            serde_json::from_str(r#"{"question":"Q","notes":"remember"}"#).unwrap();
        assert_eq!(draft.hint.as_deref(), Some("remember"));
        assert!(draft.category.is_none());
    }
}
