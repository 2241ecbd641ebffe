use crate::model::Question;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact match against the normalized category.
    Only(String),
}

impl CategoryFilter {
    /// Interpret a raw filter value. Missing, empty and `"all"` disable the filter.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL_CATEGORIES) => Self::All,
            Some(value) => Self::Only(value.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => question.category().as_str() == category,
        }
    }
}

/// Criteria for listing questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub category: CategoryFilter,
    pub unanswered_only: bool,
}

impl QuestionFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(category: Option<&str>, unanswered_only: bool) -> Self {
        Self {
            category: CategoryFilter::parse(category),
            unanswered_only,
        }
    }

    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: CategoryFilter::Only(category.into()),
            unanswered_only: false,
        }
    }

    #[must_use]
    pub fn unanswered() -> Self {
        Self {
            category: CategoryFilter::All,
            unanswered_only: true,
        }
    }

    #[must_use]
    pub fn matches(&self, question: &Question, answered: bool) -> bool {
        self.category.matches(question) && !(self.unanswered_only && answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionId};

    fn question(category: Option<&str>) -> Question {
        let mut draft = QuestionDraft::new("Q");
        draft.category = category.map(str::to_string);
        Question::new(QuestionId::new(1), draft)
    }

    #[test]
    fn sentinel_and_blank_disable_filter() {
        assert_eq!(CategoryFilter::parse(Some("all")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(Some("All")),
            CategoryFilter::Only("All".into())
        );
    }

    #[test]
    fn category_match_is_exact_on_normalized_value() {
        let filter = QuestionFilter::category("Uncategorized");
        assert!(filter.matches(&question(None), false));
        assert!(!QuestionFilter::category("dp").matches(&question(Some("DP")), false));
    }

    #[test]
    fn unanswered_only_drops_answered() {
        let filter = QuestionFilter::unanswered();
        assert!(filter.matches(&question(Some("DP")), false));
        assert!(!filter.matches(&question(Some("DP")), true));
    }
}
