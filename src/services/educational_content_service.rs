use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ContentCategory, CreateEducationalContent, EducationalContent};

pub struct EducationalContentService {
    db: PgPool,
}

impl EducationalContentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Published content, optionally filtered by category, newest first.
    pub async fn list_published(
        &self,
        category: Option<ContentCategory>,
    ) -> Result<Vec<EducationalContent>> {
        let rows = match category {
            Some(category) => {
                sqlx::query_as::<_, EducationalContent>(
                    "SELECT * FROM educational_content
                     WHERE is_published AND category = $1
                     ORDER BY created_at DESC",
                )
                .bind(category)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, EducationalContent>(
                    "SELECT * FROM educational_content WHERE is_published
                     ORDER BY created_at DESC",
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows)
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Option<EducationalContent>> {
        let row = sqlx::query_as::<_, EducationalContent>(
            "SELECT * FROM educational_content WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn create(&self, data: CreateEducationalContent) -> Result<EducationalContent> {
        let row = sqlx::query_as::<_, EducationalContent>(
            "INSERT INTO educational_content (id, title, description, content, content_type, category, image_url, video_url, read_time, is_published, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.content)
        .bind(data.content_type)
        .bind(data.category)
        .bind(&data.image_url)
        .bind(&data.video_url)
        .bind(data.read_time)
        .bind(data.is_published.unwrap_or(true))
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }
}
