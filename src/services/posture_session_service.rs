use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    CreatePostureSession, PostureSession, SessionFinalization, SessionStatus,
    UpdatePostureSession,
};

pub struct PostureSessionService {
    db: PgPool,
}

impl PostureSessionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_session(
        &self,
        user_id: Uuid,
        data: CreatePostureSession,
    ) -> Result<PostureSession> {
        let now = Utc::now();
        let session = sqlx::query_as::<_, PostureSession>(
            "INSERT INTO posture_sessions (id, user_id, start_time, status, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(data.start_time.unwrap_or(now))
        .bind(SessionStatus::Active)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn get_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<Option<PostureSession>> {
        let session = sqlx::query_as::<_, PostureSession>(
            "SELECT * FROM posture_sessions WHERE id = $1 AND user_id = $2",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn get_user_sessions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PostureSession>> {
        let sessions = sqlx::query_as::<_, PostureSession>(
            "SELECT * FROM posture_sessions WHERE user_id = $1
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    /// The user's current `active` session, newest first when several exist.
    pub async fn get_active_session(&self, user_id: Uuid) -> Result<Option<PostureSession>> {
        let session = sqlx::query_as::<_, PostureSession>(
            "SELECT * FROM posture_sessions WHERE user_id = $1 AND status = $2
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(SessionStatus::Active)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    /// Owner-scoped partial update.
    pub async fn update_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        data: UpdatePostureSession,
    ) -> Result<Option<PostureSession>> {
        let session = sqlx::query_as::<_, PostureSession>(
            "UPDATE posture_sessions
             SET end_time = COALESCE($3, end_time),
                 duration = COALESCE($4, duration),
                 avg_posture_score = COALESCE($5, avg_posture_score),
                 shoulder_alignment = COALESCE($6, shoulder_alignment),
                 neck_position = COALESCE($7, neck_position),
                 spine_alignment = COALESCE($8, spine_alignment),
                 correction_count = COALESCE($9, correction_count),
                 status = COALESCE($10, status)
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(session_id)
        .bind(user_id)
        .bind(data.end_time)
        .bind(data.duration)
        .bind(data.avg_posture_score)
        .bind(data.shoulder_alignment)
        .bind(data.neck_position)
        .bind(data.spine_alignment)
        .bind(data.correction_count)
        .bind(data.status)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn exists(&self, session_id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM posture_sessions WHERE id = $1")
            .bind(session_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.is_some())
    }

    /// Write the final column values computed by a stopped analysis loop.
    pub async fn finalize(
        &self,
        session_id: Uuid,
        finalization: &SessionFinalization,
    ) -> Result<Option<PostureSession>> {
        let session = sqlx::query_as::<_, PostureSession>(
            "UPDATE posture_sessions
             SET end_time = $2,
                 duration = $3,
                 avg_posture_score = $4,
                 shoulder_alignment = $5,
                 neck_position = $6,
                 spine_alignment = $7,
                 correction_count = $8,
                 status = $9
             WHERE id = $1
             RETURNING *",
        )
        .bind(session_id)
        .bind(finalization.end_time)
        .bind(finalization.duration)
        .bind(finalization.avg_posture_score)
        .bind(finalization.shoulder_alignment)
        .bind(finalization.neck_position)
        .bind(finalization.spine_alignment)
        .bind(finalization.correction_count)
        .bind(finalization.status)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }
}
