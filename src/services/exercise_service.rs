use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateExercise, Exercise, ExerciseCategory, UpdateExercise};

pub struct ExerciseService {
    db: PgPool,
}

impl ExerciseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Active catalog, optionally filtered by category, name order.
    pub async fn list_active(&self, category: Option<ExerciseCategory>) -> Result<Vec<Exercise>> {
        let exercises = match category {
            Some(category) => {
                sqlx::query_as::<_, Exercise>(
                    "SELECT * FROM exercises WHERE is_active AND category = $1 ORDER BY name",
                )
                .bind(category)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Exercise>(
                    "SELECT * FROM exercises WHERE is_active ORDER BY name",
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(exercises)
    }

    pub async fn get_exercise(&self, exercise_id: Uuid) -> Result<Option<Exercise>> {
        let exercise =
            sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = $1")
                .bind(exercise_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(exercise)
    }

    pub async fn get_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>> {
        let exercise =
            sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.db)
                .await?;

        Ok(exercise)
    }

    pub async fn create_exercise(&self, data: CreateExercise) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            "INSERT INTO exercises (id, name, description, duration, difficulty, category, instructions, video_url, image_url, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.duration)
        .bind(data.difficulty)
        .bind(data.category)
        .bind(&data.instructions)
        .bind(&data.video_url)
        .bind(&data.image_url)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn update_exercise(
        &self,
        exercise_id: Uuid,
        data: UpdateExercise,
    ) -> Result<Option<Exercise>> {
        let exercise = sqlx::query_as::<_, Exercise>(
            "UPDATE exercises
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 duration = COALESCE($4, duration),
                 difficulty = COALESCE($5, difficulty),
                 category = COALESCE($6, category),
                 instructions = COALESCE($7, instructions),
                 video_url = COALESCE($8, video_url),
                 image_url = COALESCE($9, image_url),
                 is_active = COALESCE($10, is_active)
             WHERE id = $1
             RETURNING *",
        )
        .bind(exercise_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.duration)
        .bind(data.difficulty)
        .bind(data.category)
        .bind(&data.instructions)
        .bind(&data.video_url)
        .bind(&data.image_url)
        .bind(data.is_active)
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise)
    }
}
