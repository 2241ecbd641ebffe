use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Answered flags keyed by the question id rendered as a string.
///
/// A missing key reads as unanswered. Keys are not checked against the live
/// question set, so a flag may outlive its question without causing errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<String, bool>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.0.get(&id.progress_key()).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: QuestionId, answered: bool) {
        self.0.insert(id.progress_key(), answered);
    }

    /// Flip the flag for `id` and return the new value.
    pub fn toggle(&mut self, id: QuestionId) -> bool {
        let next = !self.is_answered(id);
        self.set(id, next);
        next
    }

    /// Drop the entry for `id`, returning the previous flag if one was stored.
    pub fn remove(&mut self, id: QuestionId) -> Option<bool> {
        self.0.remove(&id.progress_key())
    }

    /// Insert a raw entry as read from storage.
    pub fn insert_raw(&mut self, key: impl Into<String>, answered: bool) {
        self.0.insert(key.into(), answered);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, answered)| (key.as_str(), *answered))
    }
}

impl FromIterator<(String, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_unanswered() {
        let progress = ProgressMap::new();
        assert!(!progress.is_answered(QuestionId::new(9)));
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut progress = ProgressMap::new();
        let id = QuestionId::new(1);
        assert!(progress.toggle(id));
        assert!(!progress.toggle(id));
        assert!(!progress.is_answered(id));
    }

    #[test]
    fn serializes_with_string_keys() {
        let mut progress = ProgressMap::new();
        progress.set(QuestionId::new(2), true);
        progress.set(QuestionId::new(10), false);
        let json = serde_json::to_string(&progress).unwrap();
        assert_eq!(json, r#"{"10":false,"2":true}"#);
    }

    #[test]
    fn keeps_stale_keys() {
        let progress: ProgressMap = [("abc".to_string(), true), ("4".to_string(), true)]
            .into_iter()
            .collect();
        assert_eq!(progress.len(), 2);
        assert!(progress.is_answered(QuestionId::new(4)));
    }
}
