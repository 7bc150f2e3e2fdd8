use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use tracing::error;
use uuid::Uuid;

use crate::api::{internal, not_found, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{CreateReminder, Reminder, UpdateReminder};
use crate::services::ReminderService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route("/reminders/:id", put(update_reminder))
}

#[tracing::instrument(skip(state, session))]
async fn list_reminders(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<Vec<Reminder>> {
    let reminders = ReminderService::new(state.db.clone())
        .get_user_reminders(session.user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch reminders: {e}");
            internal("Failed to fetch reminders")
        })?;

    Ok(Json(reminders))
}

#[tracing::instrument(skip(state, session, data))]
async fn create_reminder(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<CreateReminder>,
) -> ApiResult<Reminder> {
    let reminder = ReminderService::new(state.db.clone())
        .create_reminder(session.user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create reminder: {e}");
            internal("Failed to create reminder")
        })?;

    Ok(Json(reminder))
}

#[tracing::instrument(skip(state, session, data))]
async fn update_reminder(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(reminder_id): Path<Uuid>,
    Json(data): Json<UpdateReminder>,
) -> ApiResult<Reminder> {
    let reminder = ReminderService::new(state.db.clone())
        .update_reminder(session.user_id, reminder_id, data)
        .await
        .map_err(|e| {
            error!("Failed to update reminder: {e}");
            internal("Failed to update reminder")
        })?
        .ok_or_else(|| not_found("REMINDER_NOT_FOUND", "Reminder not found"))?;

    Ok(Json(reminder))
}
