use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateFeedback, Feedback, FeedbackSeverity};

pub struct FeedbackService {
    db: PgPool,
}

impl FeedbackService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_user_feedback(&self, user_id: Uuid, limit: i64) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback WHERE user_id = $1
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, user_id: Uuid, data: CreateFeedback) -> Result<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedback (id, user_id, session_id, type, title, message, severity, is_read, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(data.session_id)
        .bind(data.feedback_type)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.severity.unwrap_or(FeedbackSeverity::Info))
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Owner-scoped read marker. Returns false when the row is not the
    /// caller's (or does not exist).
    pub async fn mark_as_read(&self, user_id: Uuid, feedback_id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("UPDATE feedback SET is_read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(feedback_id)
                .bind(user_id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
