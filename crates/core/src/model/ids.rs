use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a Question
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Key under which this question's answered flag is stored.
    #[must_use]
    pub fn progress_key(&self) -> String {
        self.0.to_string()
    }

    /// The id following this one; `None` once the id space is used up.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Error type for parsing an id from a string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse question id from {raw:?}")]
pub struct ParseIdError {
    raw: String,
}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(QuestionId::new)
            .map_err(|_| ParseIdError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let id: QuestionId = "42".parse().unwrap();
        assert_eq!(id, QuestionId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.progress_key(), "42");
        assert_eq!(format!("{id:?}"), "QuestionId(42)");
    }

    #[test]
    fn rejects_negative_and_text() {
        assert!("-1".parse::<QuestionId>().is_err());
        let err = "abc".parse::<QuestionId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse question id from \"abc\"");
    }

    #[test]
    fn next_stops_at_the_last_id() {
        assert_eq!(QuestionId::new(6).next(), Some(QuestionId::new(7)));
        assert_eq!(QuestionId::new(u64::MAX).next(), None);
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&QuestionId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: QuestionId = serde_json::from_str("7").unwrap();
        assert_eq!(back.value(), 7);
    }
}
