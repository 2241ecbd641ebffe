use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prep_core::model::{
    QuestionDraft, QuestionFilter, QuestionId, QuestionPatch, Stats, TrackedQuestion,
};
use serde::Deserialize;
use serde_json::{Value, json};
use services::{AppServices, ProgressServiceError, QueryServiceError, QuestionServiceError};
use tracing::error;

/// Failure body: `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Question not found".to_string()),
            Self::Internal(message) => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

impl From<QuestionServiceError> for ApiError {
    fn from(err: QuestionServiceError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<ProgressServiceError> for ApiError {
    fn from(err: ProgressServiceError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<QueryServiceError> for ApiError {
    fn from(err: QueryServiceError) -> Self {
        Self::Internal(err.to_string())
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    category: Option<String>,
    unanswered: Option<String>,
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn list_questions(
    State(services): State<AppServices>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<TrackedQuestion>>> {
    let unanswered_only = params.unanswered.as_deref() == Some("true");
    let filter = QuestionFilter::new(params.category.as_deref(), unanswered_only);
    Ok(Json(services.query().list(&filter).await?))
}

pub async fn get_question(
    State(services): State<AppServices>,
    Path(id): Path<u64>,
) -> ApiResult<Json<TrackedQuestion>> {
    let id = QuestionId::new(id);
    let question = services.questions().get(id).await?;
    let answered = services.progress().get(id).await?;
    Ok(Json(TrackedQuestion::new(question, answered)))
}

pub async fn list_categories(
    State(services): State<AppServices>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(services.query().categories().await?))
}

pub async fn toggle_question(
    State(services): State<AppServices>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Value>> {
    let answered = services.progress().toggle(QuestionId::new(id)).await?;
    Ok(Json(json!({ "success": true, "answered": answered })))
}

pub async fn create_question(
    State(services): State<AppServices>,
    Json(draft): Json<QuestionDraft>,
) -> ApiResult<(StatusCode, Json<TrackedQuestion>)> {
    let question = services.questions().add(draft).await?;
    let answered = services.progress().get(question.id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(TrackedQuestion::new(question, answered)),
    ))
}

pub async fn update_question(
    State(services): State<AppServices>,
    Path(id): Path<u64>,
    Json(patch): Json<QuestionPatch>,
) -> ApiResult<Json<TrackedQuestion>> {
    let id = QuestionId::new(id);
    let question = services.questions().update(id, patch).await?;
    let answered = services.progress().get(id).await?;
    Ok(Json(TrackedQuestion::new(question, answered)))
}

pub async fn delete_question(
    State(services): State<AppServices>,
    Path(id): Path<u64>,
) -> ApiResult<Json<Value>> {
    services.questions().delete(QuestionId::new(id)).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn stats(State(services): State<AppServices>) -> ApiResult<Json<Stats>> {
    Ok(Json(services.query().stats().await?))
}

pub async fn reset_progress(State(services): State<AppServices>) -> ApiResult<Json<Value>> {
    services.progress().reset_all().await?;
    Ok(Json(json!({ "success": true })))
}
