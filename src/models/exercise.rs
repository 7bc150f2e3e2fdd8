use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ExerciseCategory {
    Posture,
    Strength,
    Flexibility,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Minutes.
    pub duration: Option<i32>,
    pub difficulty: Difficulty,
    pub category: ExerciseCategory,
    pub instructions: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub difficulty: Difficulty,
    pub category: ExerciseCategory,
    pub instructions: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<ExerciseCategory>,
    pub instructions: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
