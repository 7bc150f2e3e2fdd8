use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum ReminderFrequency {
    Once,
    Daily,
    Weekly,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: Option<String>,
    pub frequency: ReminderFrequency,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReminder {
    pub title: String,
    pub message: Option<String>,
    pub frequency: ReminderFrequency,
    pub scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateReminder {
    pub title: Option<String>,
    pub message: Option<String>,
    pub frequency: Option<ReminderFrequency>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}
