use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::api::{internal, not_found, require_admin, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{CreateExercise, Exercise, ExerciseCategory, UpdateExercise};
use crate::services::ExerciseService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route("/exercises/:id", put(update_exercise))
}

#[derive(Debug, Deserialize)]
struct ExerciseQuery {
    category: Option<ExerciseCategory>,
}

#[tracing::instrument(skip(state))]
async fn list_exercises(
    State(state): State<AppState>,
    Query(query): Query<ExerciseQuery>,
) -> ApiResult<Vec<Exercise>> {
    let exercises = ExerciseService::new(state.db.clone())
        .list_active(query.category)
        .await
        .map_err(|e| {
            error!("Failed to fetch exercises: {e}");
            internal("Failed to fetch exercises")
        })?;

    Ok(Json(exercises))
}

/// Admin only.
#[tracing::instrument(skip(state, session, data))]
async fn create_exercise(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<CreateExercise>,
) -> ApiResult<Exercise> {
    require_admin(&session)?;

    let exercise = ExerciseService::new(state.db.clone())
        .create_exercise(data)
        .await
        .map_err(|e| {
            error!("Failed to create exercise: {e}");
            internal("Failed to create exercise")
        })?;

    Ok(Json(exercise))
}

/// Admin only.
#[tracing::instrument(skip(state, session, data))]
async fn update_exercise(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(exercise_id): Path<Uuid>,
    Json(data): Json<UpdateExercise>,
) -> ApiResult<Exercise> {
    require_admin(&session)?;

    let exercise = ExerciseService::new(state.db.clone())
        .update_exercise(exercise_id, data)
        .await
        .map_err(|e| {
            error!("Failed to update exercise: {e}");
            internal("Failed to update exercise")
        })?
        .ok_or_else(|| not_found("EXERCISE_NOT_FOUND", "Exercise not found"))?;

    Ok(Json(exercise))
}
