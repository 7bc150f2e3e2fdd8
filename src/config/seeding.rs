use anyhow::Result;
use sqlx::PgPool;

use crate::models::{
    ContentCategory, ContentType, CreateEducationalContent, CreateExercise, Difficulty,
    ExerciseCategory,
};
use crate::services::{EducationalContentService, ExerciseService};

pub struct DatabaseSeeder {
    pool: PgPool,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        self.seed_exercises().await?;
        self.seed_educational_content().await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_exercises(&self) -> Result<()> {
        let exercise_service = ExerciseService::new(self.pool.clone());

        let catalog = vec![
            CreateExercise {
                name: "Chin tucks".to_string(),
                description: Some("Counteract forward head posture at your desk.".to_string()),
                duration: Some(3),
                difficulty: Difficulty::Beginner,
                category: ExerciseCategory::Posture,
                instructions: Some(
                    "Sit tall, draw your chin straight back without tilting, hold for five \
                     seconds and release. Repeat ten times."
                        .to_string(),
                ),
                video_url: None,
                image_url: None,
            },
            CreateExercise {
                name: "Shoulder blade squeeze".to_string(),
                description: Some("Open the chest and reset rounded shoulders.".to_string()),
                duration: Some(5),
                difficulty: Difficulty::Beginner,
                category: ExerciseCategory::Posture,
                instructions: Some(
                    "Squeeze your shoulder blades together as if holding a pencil between \
                     them, hold for ten seconds, then relax. Repeat eight times."
                        .to_string(),
                ),
                video_url: None,
                image_url: None,
            },
            CreateExercise {
                name: "Wall angels".to_string(),
                description: Some("Mobilize the upper back and shoulders.".to_string()),
                duration: Some(5),
                difficulty: Difficulty::Intermediate,
                category: ExerciseCategory::Flexibility,
                instructions: Some(
                    "Stand with your back flat against a wall, arms in a goalpost position, \
                     and slide them slowly overhead while keeping contact with the wall."
                        .to_string(),
                ),
                video_url: None,
                image_url: None,
            },
            CreateExercise {
                name: "Plank".to_string(),
                description: Some("Core strength to support a neutral spine.".to_string()),
                duration: Some(2),
                difficulty: Difficulty::Intermediate,
                category: ExerciseCategory::Strength,
                instructions: Some(
                    "Hold a forearm plank with a straight line from head to heels. Start \
                     with 30 seconds and build up."
                        .to_string(),
                ),
                video_url: None,
                image_url: None,
            },
        ];

        for exercise in catalog {
            if exercise_service
                .get_exercise_by_name(&exercise.name)
                .await?
                .is_none()
            {
                exercise_service.create_exercise(exercise).await?;
                tracing::info!("Seeded catalog exercise");
            }
        }

        Ok(())
    }

    async fn seed_educational_content(&self) -> Result<()> {
        let content_service = EducationalContentService::new(self.pool.clone());

        let articles = vec![
            CreateEducationalContent {
                title: "Why posture matters".to_string(),
                description: Some(
                    "The long-term effects of sitting posture on neck and back health."
                        .to_string(),
                ),
                content: Some(
                    "Slouching for hours at a time loads the cervical spine far beyond its \
                     neutral position. Small, frequent corrections matter more than \
                     occasional stretching sessions."
                        .to_string(),
                ),
                content_type: ContentType::Article,
                category: ContentCategory::Posture,
                image_url: None,
                video_url: None,
                read_time: Some(4),
                is_published: Some(true),
            },
            CreateEducationalContent {
                title: "Setting up an ergonomic desk".to_string(),
                description: Some("Monitor height, chair depth and keyboard placement.".to_string()),
                content: Some(
                    "Place the top of your monitor at eye level, keep elbows at roughly 90 \
                     degrees, and sit with both feet flat on the floor."
                        .to_string(),
                ),
                content_type: ContentType::Article,
                category: ContentCategory::Ergonomics,
                image_url: None,
                video_url: None,
                read_time: Some(6),
                is_published: Some(true),
            },
            CreateEducationalContent {
                title: "Desk stretches that actually help".to_string(),
                description: Some("A five-minute routine between meetings.".to_string()),
                content: Some(
                    "Alternate chin tucks, shoulder rolls and a standing chest opener. One \
                     round every hour keeps stiffness from accumulating."
                        .to_string(),
                ),
                content_type: ContentType::Exercise,
                category: ContentCategory::Exercises,
                image_url: None,
                video_url: None,
                read_time: Some(5),
                is_published: Some(true),
            },
        ];

        for article in articles {
            if content_service.get_by_title(&article.title).await?.is_none() {
                content_service.create(article).await?;
                tracing::info!("Seeded educational content");
            }
        }

        Ok(())
    }
}
