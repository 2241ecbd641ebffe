use async_trait::async_trait;
use prep_core::model::{Question, QuestionId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::{JsonFileRepository, read_document, write_document};
use crate::repository::{QuestionRepository, StorageError};

/// Legacy key for an answered flag embedded in the question record.
/// Progress lives in its own document, so this key is discarded on load.
const EMBEDDED_ANSWERED_KEY: &str = "answered";

/// Legacy spelling of `hint`.
const NOTES_KEY: &str = "notes";

/// Top-level shape of the questions document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionsDocument {
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

/// Persisted shape of one question.
///
/// Mirrors the domain `Question` loosely so hand-edited files stay readable:
/// every content field may be missing, `notes` is accepted for `hint`, and
/// unknown keys ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub id: QuestionId,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default, skip_serializing)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionEntry {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id(),
            category: Some(question.category().as_str().to_owned()),
            question: Some(question.question().to_owned()),
            hint: Some(question.hint().to_owned()),
            notes: None,
            extra: question.extra().clone(),
        }
    }

    #[must_use]
    pub fn into_question(self) -> Question {
        let mut extra = self.extra;
        extra.remove(EMBEDDED_ANSWERED_KEY);
        let hint = match (self.hint, self.notes) {
            (Some(hint), Some(notes)) => {
                warn!(
                    id = %self.id,
                    "entry has both `hint` and `notes`; using `hint`, `notes` kept as an extra field"
                );
                extra.insert(NOTES_KEY.to_owned(), Value::String(notes));
                Some(hint)
            }
            (hint, notes) => hint.or(notes),
        };
        Question::from_persisted(self.id, self.category, self.question, hint, extra)
    }
}

/// Decode the questions document, skipping entries that cannot be used.
pub(crate) fn decode_questions(document: Value) -> Vec<Question> {
    let Value::Object(mut root) = document else {
        warn!("questions document is not an object; treating as empty");
        return Vec::new();
    };
    let entries = match root.remove("questions") {
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            warn!("`questions` is not an array; treating as empty");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut questions: Vec<Question> = Vec::with_capacity(entries.len());
    for (index, raw) in entries.into_iter().enumerate() {
        match serde_json::from_value::<QuestionEntry>(raw) {
            Ok(entry) if questions.iter().any(|q| q.id() == entry.id) => {
                warn!(index, id = %entry.id, "duplicate question id; keeping the first");
            }
            Ok(entry) => questions.push(entry.into_question()),
            Err(e) => warn!(
                index,
                error = %e,
                "skipping unreadable question entry; it will be dropped from the file on the next save"
            ),
        }
    }
    questions
}

#[async_trait]
impl QuestionRepository for JsonFileRepository {
    async fn load_all(&self) -> Result<Vec<Question>, StorageError> {
        Ok(read_document(self.questions_path())
            .await
            .map(decode_questions)
            .unwrap_or_default())
    }

    async fn save_all(&self, questions: &[Question]) -> Result<(), StorageError> {
        let document = QuestionsDocument {
            questions: questions.iter().map(QuestionEntry::from_question).collect(),
        };
        write_document(self.questions_path(), &document).await
    }
}
