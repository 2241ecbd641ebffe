use prep_core::model::{Question, QuestionId};
use serde_json::{Map, Value};
use sqlx::Row;
use tracing::warn;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u64::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization("question id sign overflow".into()))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("question id overflow".into()))
}

pub(crate) fn position_to_i64(position: usize) -> Result<i64, StorageError> {
    i64::try_from(position).map_err(|_| StorageError::Serialization("position overflow".into()))
}

/// Encode the extra fields, or `None` when there are none.
pub(crate) fn extra_to_text(extra: &Map<String, Value>) -> Result<Option<String>, StorageError> {
    if extra.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(extra).map(Some).map_err(ser)
}

fn extra_from_text(id: QuestionId, raw: Option<String>) -> Map<String, Value> {
    let Some(raw) = raw else {
        return Map::new();
    };
    match serde_json::from_str::<Map<String, Value>>(&raw) {
        Ok(extra) => extra,
        Err(e) => {
            warn!(question_id = %id, error = %e, "discarding unreadable extra fields");
            Map::new()
        }
    }
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let id = question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let extra = extra_from_text(id, row.try_get::<Option<String>, _>("extra").map_err(ser)?);

    Ok(Question::from_persisted(
        id,
        Some(row.try_get::<String, _>("category").map_err(ser)?),
        Some(row.try_get::<String, _>("question").map_err(ser)?),
        Some(row.try_get::<String, _>("hint").map_err(ser)?),
        extra,
    ))
}
