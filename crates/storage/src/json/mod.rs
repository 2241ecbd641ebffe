//! JSON file backend.
//!
//! Questions and progress live in two independent documents. Either may be
//! missing or hold garbage; both cases read as empty and only log a warning.
//! Writes replace the whole document through a sibling temporary file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::repository::{ProgressRepository, QuestionRepository, Storage, StorageError};

mod progress_file;
mod questions_file;

pub use questions_file::{QuestionEntry, QuestionsDocument};

/// Default location of the questions document.
pub const DEFAULT_QUESTIONS_FILE: &str = "questions.json";

/// Default location of the progress document.
pub const DEFAULT_PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    questions_path: PathBuf,
    progress_path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(questions_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        Self {
            questions_path: questions_path.into(),
            progress_path: progress_path.into(),
        }
    }

    #[must_use]
    pub fn questions_path(&self) -> &Path {
        &self.questions_path
    }

    #[must_use]
    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }
}

impl Storage {
    /// Build a `Storage` backed by two JSON documents.
    #[must_use]
    pub fn json(questions_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        let repo = JsonFileRepository::new(questions_path, progress_path);
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self {
            questions,
            progress,
        }
    }
}

/// Read and parse a document, or `None` if it is absent or unusable.
async fn read_document(path: &Path) -> Option<Value> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "document missing; treating as empty");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document unreadable; treating as empty");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document is not valid JSON; treating as empty");
            None
        }
    }
}

/// Overwrite `path` with `document`, pretty-printed with two-space indentation.
async fn write_document<T: Serialize + ?Sized>(
    path: &Path,
    document: &T,
) -> Result<(), StorageError> {
    let mut body = serde_json::to_vec_pretty(document)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    body.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_error(parent, &e))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &body)
        .await
        .map_err(|e| write_error(&tmp, &e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| write_error(path, &e))?;

    debug!(path = %path.display(), bytes = body.len(), "document saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_error(path: &Path, e: &std::io::Error) -> StorageError {
    StorageError::Write(format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        let tmp = temp_path(Path::new("data/questions.json"));
        assert_eq!(tmp, PathBuf::from("data/questions.json.tmp"));
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("doc.json");
        write_document(&path, &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn garbage_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(read_document(&path).await.is_none());
        assert!(read_document(&dir.path().join("absent.json")).await.is_none());
    }

    #[tokio::test]
    async fn write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_document(&blocker.join("doc.json"), &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
    }
}
