use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Video,
    Exercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ContentCategory {
    Posture,
    Ergonomics,
    Exercises,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationalContent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub content_type: ContentType,
    pub category: ContentCategory,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    /// Minutes.
    pub read_time: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEducationalContent {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub content_type: ContentType,
    pub category: ContentCategory,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub read_time: Option<i32>,
    pub is_published: Option<bool>,
}
