use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Exercise;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum UserExerciseStatus {
    Scheduled,
    InProgress,
    Completed,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserExercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_id: Uuid,
    pub status: UserExerciseStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserExercise {
    pub exercise_id: Uuid,
    pub status: Option<UserExerciseStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserExercise {
    pub status: Option<UserExerciseStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A scheduled entry joined with its catalog exercise, as the dashboard
/// renders it.
#[derive(Debug, Clone, Serialize)]
pub struct UserExerciseWithDetails {
    #[serde(flatten)]
    pub user_exercise: UserExercise,
    pub exercise: Exercise,
}
