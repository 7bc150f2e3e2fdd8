use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    CreateUserExercise, Exercise, UpdateUserExercise, UserExercise, UserExerciseStatus,
    UserExerciseWithDetails,
};

pub struct UserExerciseService {
    db: PgPool,
}

impl UserExerciseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Today's scheduled entries joined with their catalog exercises.
    pub async fn get_today(&self, user_id: Uuid) -> Result<Vec<UserExerciseWithDetails>> {
        let rows = sqlx::query_as::<_, UserExercise>(
            "SELECT * FROM user_exercises
             WHERE user_id = $1 AND created_at >= CURRENT_DATE AND created_at < CURRENT_DATE + INTERVAL '1 day'
             ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        self.join_details(rows).await
    }

    pub async fn get_history(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<UserExerciseWithDetails>> {
        let rows = sqlx::query_as::<_, UserExercise>(
            "SELECT * FROM user_exercises WHERE user_id = $1
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        self.join_details(rows).await
    }

    pub async fn create_user_exercise(
        &self,
        user_id: Uuid,
        data: CreateUserExercise,
    ) -> Result<UserExercise> {
        let row = sqlx::query_as::<_, UserExercise>(
            "INSERT INTO user_exercises (id, user_id, exercise_id, status, start_time, notes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(data.exercise_id)
        .bind(data.status.unwrap_or(UserExerciseStatus::Scheduled))
        .bind(data.start_time)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Owner-scoped status/notes/times update.
    pub async fn update_user_exercise(
        &self,
        user_id: Uuid,
        user_exercise_id: Uuid,
        data: UpdateUserExercise,
    ) -> Result<Option<UserExercise>> {
        let row = sqlx::query_as::<_, UserExercise>(
            "UPDATE user_exercises
             SET status = COALESCE($3, status),
                 start_time = COALESCE($4, start_time),
                 end_time = COALESCE($5, end_time),
                 notes = COALESCE($6, notes)
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(user_exercise_id)
        .bind(user_id)
        .bind(data.status)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.notes)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn join_details(
        &self,
        rows: Vec<UserExercise>,
    ) -> Result<Vec<UserExerciseWithDetails>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.exercise_id).collect();
        let exercises =
            sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(&self.db)
                .await?;

        let by_id: HashMap<Uuid, Exercise> =
            exercises.into_iter().map(|e| (e.id, e)).collect();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                by_id.get(&row.exercise_id).cloned().map(|exercise| {
                    UserExerciseWithDetails {
                        user_exercise: row,
                        exercise,
                    }
                })
            })
            .collect())
    }
}
