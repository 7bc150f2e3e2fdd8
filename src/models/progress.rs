use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user per calendar day, upserted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProgressTracking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weekly_score: Option<f32>,
    pub sessions_completed: i32,
    pub total_corrections: i32,
    pub streak_days: i32,
    pub improvement_percentage: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertProgress {
    pub date: Option<NaiveDate>,
    pub weekly_score: Option<f32>,
    pub sessions_completed: Option<i32>,
    pub total_corrections: Option<i32>,
    pub streak_days: Option<i32>,
    pub improvement_percentage: Option<f32>,
}

/// Dashboard header numbers: one count, one sum, latest progress row.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserStats {
    pub weekly_progress: f32,
    pub sessions_today: i64,
    pub streak_days: i32,
    pub total_corrections: i64,
}
