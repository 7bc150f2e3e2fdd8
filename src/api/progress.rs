use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::api::{internal, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{ProgressTracking, UpsertProgress, UserStats};
use crate::services::ProgressService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/progress", get(latest_progress).post(upsert_progress))
        .route("/progress/history", get(progress_history))
}

#[tracing::instrument(skip(state, session))]
async fn stats(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<UserStats> {
    let stats = ProgressService::new(state.db.clone())
        .user_stats(session.user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch stats: {e}");
            internal("Failed to fetch stats")
        })?;

    Ok(Json(stats))
}

#[tracing::instrument(skip(state, session))]
async fn latest_progress(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<Option<ProgressTracking>> {
    let progress = ProgressService::new(state.db.clone())
        .get_latest(session.user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch progress: {e}");
            internal("Failed to fetch progress")
        })?;

    Ok(Json(progress))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    /// Window in days (default: 30, max: 365)
    days: Option<i32>,
}

impl HistoryQuery {
    fn get_days(&self) -> i32 {
        self.days.unwrap_or(30).clamp(1, 365)
    }
}

#[tracing::instrument(skip(state, session))]
async fn progress_history(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Vec<ProgressTracking>> {
    let history = ProgressService::new(state.db.clone())
        .get_history(session.user_id, query.get_days())
        .await
        .map_err(|e| {
            error!("Failed to fetch progress history: {e}");
            internal("Failed to fetch progress history")
        })?;

    Ok(Json(history))
}

#[tracing::instrument(skip(state, session, data))]
async fn upsert_progress(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<UpsertProgress>,
) -> ApiResult<ProgressTracking> {
    let progress = ProgressService::new(state.db.clone())
        .upsert(session.user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to update progress: {e}");
            internal("Failed to update progress")
        })?;

    Ok(Json(progress))
}
