use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostureSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds between start and end once finalized.
    pub duration: Option<i32>,
    pub avg_posture_score: Option<f32>,
    pub shoulder_alignment: Option<f32>,
    pub neck_position: Option<f32>,
    pub spine_alignment: Option<f32>,
    pub correction_count: i32,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostureSession {
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePostureSession {
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub avg_posture_score: Option<f32>,
    pub shoulder_alignment: Option<f32>,
    pub neck_position: Option<f32>,
    pub spine_alignment: Option<f32>,
    pub correction_count: Option<i32>,
    pub status: Option<SessionStatus>,
}

/// Final column values written when a live analysis loop ends.
#[derive(Debug, Clone)]
pub struct SessionFinalization {
    pub end_time: DateTime<Utc>,
    pub duration: i32,
    pub avg_posture_score: f32,
    pub shoulder_alignment: f32,
    pub neck_position: f32,
    pub spine_alignment: f32,
    pub correction_count: i32,
    pub status: SessionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert_eq!(SessionStatus::Completed.as_str(), "completed");
    }
}
