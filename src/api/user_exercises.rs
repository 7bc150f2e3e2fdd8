use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use tracing::error;
use uuid::Uuid;

use crate::api::{internal, not_found, ApiResult, AppState, PaginationQuery};
use crate::auth::UserSession;
use crate::models::{CreateUserExercise, UpdateUserExercise, UserExercise, UserExerciseWithDetails};
use crate::services::UserExerciseService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user-exercises", post(create_user_exercise))
        .route("/user-exercises/today", get(today))
        .route("/user-exercises/history", get(history))
        .route("/user-exercises/:id", put(update_user_exercise))
}

#[tracing::instrument(skip(state, session))]
async fn today(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<Vec<UserExerciseWithDetails>> {
    let rows = UserExerciseService::new(state.db.clone())
        .get_today(session.user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch today's exercises: {e}");
            internal("Failed to fetch today's exercises")
        })?;

    Ok(Json(rows))
}

#[tracing::instrument(skip(state, session))]
async fn history(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<UserExerciseWithDetails>> {
    let rows = UserExerciseService::new(state.db.clone())
        .get_history(session.user_id, pagination.get_limit())
        .await
        .map_err(|e| {
            error!("Failed to fetch exercise history: {e}");
            internal("Failed to fetch exercise history")
        })?;

    Ok(Json(rows))
}

#[tracing::instrument(skip(state, session, data))]
async fn create_user_exercise(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<CreateUserExercise>,
) -> ApiResult<UserExercise> {
    let row = UserExerciseService::new(state.db.clone())
        .create_user_exercise(session.user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create user exercise: {e}");
            internal("Failed to create user exercise")
        })?;

    Ok(Json(row))
}

#[tracing::instrument(skip(state, session, data))]
async fn update_user_exercise(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(user_exercise_id): Path<Uuid>,
    Json(data): Json<UpdateUserExercise>,
) -> ApiResult<UserExercise> {
    let row = UserExerciseService::new(state.db.clone())
        .update_user_exercise(session.user_id, user_exercise_id, data)
        .await
        .map_err(|e| {
            error!("Failed to update user exercise: {e}");
            internal("Failed to update user exercise")
        })?
        .ok_or_else(|| not_found("USER_EXERCISE_NOT_FOUND", "User exercise not found"))?;

    Ok(Json(row))
}
