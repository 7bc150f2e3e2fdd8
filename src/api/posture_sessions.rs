use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::api::{conflict, internal, not_found, ApiError, ApiResult, AppState, PaginationQuery};
use crate::auth::UserSession;
use crate::models::{CreatePostureSession, PostureSession, UpdatePostureSession};
use crate::services::{
    AnalysisError, AnalysisSnapshot, PostureSessionService, SessionOutcome,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posture-sessions",
            get(list_sessions).post(create_session),
        )
        .route("/posture-sessions/active", get(active_session))
        .route("/posture-sessions/:id", put(update_session))
        .route("/posture-sessions/:id/analysis", get(analysis_snapshot))
        .route("/posture-sessions/:id/analysis/start", post(start_analysis))
        .route("/posture-sessions/:id/analysis/stop", post(stop_analysis))
}

#[tracing::instrument(skip(state, session))]
async fn create_session(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<CreatePostureSession>,
) -> ApiResult<PostureSession> {
    let created = PostureSessionService::new(state.db.clone())
        .create_session(session.user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create posture session: {e}");
            internal("Failed to create posture session")
        })?;

    Ok(Json(created))
}

#[tracing::instrument(skip(state, session))]
async fn list_sessions(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<PostureSession>> {
    let sessions = PostureSessionService::new(state.db.clone())
        .get_user_sessions(session.user_id, pagination.get_limit())
        .await
        .map_err(|e| {
            error!("Failed to fetch posture sessions: {e}");
            internal("Failed to fetch posture sessions")
        })?;

    Ok(Json(sessions))
}

#[tracing::instrument(skip(state, session))]
async fn active_session(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<Option<PostureSession>> {
    let active = PostureSessionService::new(state.db.clone())
        .get_active_session(session.user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch active session: {e}");
            internal("Failed to fetch active session")
        })?;

    Ok(Json(active))
}

#[tracing::instrument(skip(state, session, data))]
async fn update_session(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
    Json(data): Json<UpdatePostureSession>,
) -> ApiResult<PostureSession> {
    let updated = PostureSessionService::new(state.db.clone())
        .update_session(session.user_id, session_id, data)
        .await
        .map_err(|e| {
            error!("Failed to update posture session: {e}");
            internal("Failed to update posture session")
        })?
        .ok_or_else(|| not_found("SESSION_NOT_FOUND", "Posture session not found"))?;

    Ok(Json(updated))
}

#[tracing::instrument(skip(state, session))]
async fn start_analysis(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<AnalysisSnapshot> {
    let row = PostureSessionService::new(state.db.clone())
        .get_session(session.user_id, session_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch posture session: {e}");
            internal("Failed to fetch posture session")
        })?
        .ok_or_else(|| not_found("SESSION_NOT_FOUND", "Posture session not found"))?;

    state
        .analysis_runner
        .start(session.user_id, &row)
        .map_err(analysis_error)?;

    let snapshot = state
        .analysis_runner
        .snapshot(session_id)
        .ok_or_else(|| not_found("NO_LIVE_ANALYSIS", "No live analysis for this session"))?;

    Ok(Json(snapshot))
}

#[tracing::instrument(skip(state, session))]
async fn analysis_snapshot(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<AnalysisSnapshot> {
    // Ownership check against the stored row, then the in-process registry.
    PostureSessionService::new(state.db.clone())
        .get_session(session.user_id, session_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch posture session: {e}");
            internal("Failed to fetch posture session")
        })?
        .ok_or_else(|| not_found("SESSION_NOT_FOUND", "Posture session not found"))?;

    let snapshot = state
        .analysis_runner
        .snapshot(session_id)
        .ok_or_else(|| not_found("NO_LIVE_ANALYSIS", "No live analysis for this session"))?;

    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
struct StopAnalysisRequest {
    outcome: SessionOutcome,
}

#[tracing::instrument(skip(state, session))]
async fn stop_analysis(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<StopAnalysisRequest>,
) -> ApiResult<PostureSession> {
    let finalized = state
        .analysis_runner
        .stop(session.user_id, session_id, request.outcome)
        .await
        .map_err(analysis_error)?;

    Ok(Json(finalized))
}

fn analysis_error(err: AnalysisError) -> (StatusCode, Json<ApiError>) {
    match err {
        AnalysisError::SessionNotActive => {
            conflict("SESSION_NOT_ACTIVE", "Session is not active")
        }
        AnalysisError::FeedBusy => conflict("FEED_BUSY", "Capture feed is busy"),
        AnalysisError::NoLiveSession => {
            not_found("NO_LIVE_ANALYSIS", "No live analysis for this session")
        }
        AnalysisError::SessionGone => {
            not_found("SESSION_NOT_FOUND", "Session row no longer exists")
        }
        AnalysisError::Internal(e) => {
            error!("Analysis engine failure: {e}");
            internal("Analysis engine failure")
        }
    }
}
