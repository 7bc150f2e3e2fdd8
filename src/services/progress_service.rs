use anyhow::Result;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{ProgressTracking, UpsertProgress, UserStats};

pub struct ProgressService {
    db: PgPool,
}

impl ProgressService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The latest per-day progress row, if any.
    pub async fn get_latest(&self, user_id: Uuid) -> Result<Option<ProgressTracking>> {
        let row = sqlx::query_as::<_, ProgressTracking>(
            "SELECT * FROM progress_tracking WHERE user_id = $1
             ORDER BY date DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn get_history(&self, user_id: Uuid, days: i32) -> Result<Vec<ProgressTracking>> {
        let rows = sqlx::query_as::<_, ProgressTracking>(
            "SELECT * FROM progress_tracking
             WHERE user_id = $1 AND date >= CURRENT_DATE - $2::int
             ORDER BY date DESC",
        )
        .bind(user_id)
        .bind(days)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Upsert the row for the given day (today when unspecified). At most one
    /// row per user per calendar day.
    pub async fn upsert(&self, user_id: Uuid, data: UpsertProgress) -> Result<ProgressTracking> {
        let date = data.date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, ProgressTracking>(
            "INSERT INTO progress_tracking (id, user_id, date, weekly_score, sessions_completed, total_corrections, streak_days, improvement_percentage)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 0), COALESCE($7, 0), $8)
             ON CONFLICT (user_id, date) DO UPDATE SET
                 weekly_score = COALESCE($4, progress_tracking.weekly_score),
                 sessions_completed = COALESCE($5, progress_tracking.sessions_completed),
                 total_corrections = COALESCE($6, progress_tracking.total_corrections),
                 streak_days = COALESCE($7, progress_tracking.streak_days),
                 improvement_percentage = COALESCE($8, progress_tracking.improvement_percentage)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(data.weekly_score)
        .bind(data.sessions_completed)
        .bind(data.total_corrections)
        .bind(data.streak_days)
        .bind(data.improvement_percentage)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Fold a finished analysis session into today's row.
    pub async fn fold_session(
        &self,
        user_id: Uuid,
        completed: bool,
        corrections: i32,
    ) -> Result<ProgressTracking> {
        let sessions_increment = if completed { 1 } else { 0 };

        let row = sqlx::query_as::<_, ProgressTracking>(
            "INSERT INTO progress_tracking (id, user_id, date, sessions_completed, total_corrections, streak_days)
             VALUES ($1, $2, CURRENT_DATE, $3, $4, 1)
             ON CONFLICT (user_id, date) DO UPDATE SET
                 sessions_completed = progress_tracking.sessions_completed + $3,
                 total_corrections = progress_tracking.total_corrections + $4
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(sessions_increment)
        .bind(corrections)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Dashboard header stats: one count, one sum, latest progress row.
    pub async fn user_stats(&self, user_id: Uuid) -> Result<UserStats> {
        let sessions_today = sqlx::query(
            "SELECT COUNT(*) AS count FROM posture_sessions
             WHERE user_id = $1 AND created_at >= CURRENT_DATE AND created_at < CURRENT_DATE + INTERVAL '1 day'",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?
        .get::<i64, _>("count");

        let total_corrections = sqlx::query(
            "SELECT COALESCE(SUM(correction_count), 0) AS total FROM posture_sessions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?
        .get::<i64, _>("total");

        let latest = self.get_latest(user_id).await?;

        Ok(UserStats {
            weekly_progress: latest
                .as_ref()
                .and_then(|row| row.weekly_score)
                .unwrap_or(0.0),
            sessions_today,
            streak_days: latest.map(|row| row.streak_days).unwrap_or(0),
            total_corrections,
        })
    }
}
