use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Question;

/// Per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub total: u32,
    pub answered: u32,
}

/// Completion statistics over the whole question set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: u32,
    pub answered: u32,
    pub unanswered: u32,
    pub percentage: f64,
    pub categories: BTreeMap<String, CategoryStats>,
}

impl Stats {
    /// Count questions paired with their answered flags.
    #[must_use]
    pub fn tally<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a Question, bool)>,
    {
        let mut stats = Self::default();
        for (question, answered) in entries {
            stats.total += 1;
            let bucket = stats
                .categories
                .entry(question.category().as_str().to_string())
                .or_default();
            bucket.total += 1;
            if answered {
                stats.answered += 1;
                bucket.answered += 1;
            }
        }
        stats.unanswered = stats.total - stats.answered;
        stats.percentage = completion_percentage(stats.answered, stats.total);
        stats
    }
}

/// Share of answered questions in percent, rounded to one decimal with ties
/// to even (6.25 becomes 6.2); 0 when empty.
#[must_use]
pub fn completion_percentage(answered: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = f64::from(answered) / f64::from(total) * 100.0;
    (raw * 10.0).round_ties_even() / 10.0
}
