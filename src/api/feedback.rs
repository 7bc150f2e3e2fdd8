use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

use crate::api::{internal, not_found, ApiResult, AppState, PaginationQuery};
use crate::auth::UserSession;
use crate::models::{CreateFeedback, Feedback};
use crate::services::FeedbackService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route("/feedback/:id/read", put(mark_as_read))
}

#[tracing::instrument(skip(state, session))]
async fn list_feedback(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<Feedback>> {
    let rows = FeedbackService::new(state.db.clone())
        .get_user_feedback(session.user_id, pagination.get_limit())
        .await
        .map_err(|e| {
            error!("Failed to fetch feedback: {e}");
            internal("Failed to fetch feedback")
        })?;

    Ok(Json(rows))
}

#[tracing::instrument(skip(state, session, data))]
async fn create_feedback(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<CreateFeedback>,
) -> ApiResult<Feedback> {
    let row = FeedbackService::new(state.db.clone())
        .create(session.user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create feedback: {e}");
            internal("Failed to create feedback")
        })?;

    Ok(Json(row))
}

#[tracing::instrument(skip(state, session))]
async fn mark_as_read(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(feedback_id): Path<Uuid>,
) -> ApiResult<Value> {
    let marked = FeedbackService::new(state.db.clone())
        .mark_as_read(session.user_id, feedback_id)
        .await
        .map_err(|e| {
            error!("Failed to mark feedback as read: {e}");
            internal("Failed to mark feedback as read")
        })?;

    if !marked {
        return Err(not_found("FEEDBACK_NOT_FOUND", "Feedback not found"));
    }

    Ok(Json(json!({ "success": true })))
}
