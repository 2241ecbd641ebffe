use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned when a question has none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Normalized category label.
///
/// Never empty: absent, empty and whitespace-only input all become
/// [`DEFAULT_CATEGORY`]. Any other value is kept verbatim so category filters
/// stay exact string matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "Option<String>")]
pub struct Category(String);

impl Category {
    /// Normalize a raw, possibly missing, category label.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if !value.trim().is_empty() => Self(value.to_string()),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CATEGORY
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY.to_string())
    }
}

impl From<Option<String>> for Category {
    fn from(value: Option<String>) -> Self {
        Self::normalize(value.as_deref())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::normalize(Some(value))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::normalize(Some(value.as_str()))
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
