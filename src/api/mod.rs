// API routes and handlers

pub mod auth;
pub mod educational_content;
pub mod exercises;
pub mod feedback;
pub mod health;
pub mod posture_sessions;
pub mod progress;
pub mod reminders;
pub mod routes;
pub mod user_exercises;

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::time::Duration;

use crate::auth::{AuthService, UserRole, UserSession};
use crate::services::AnalysisRunner;

/// Shared state for all API routers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: AuthService,
    pub analysis_runner: AnalysisRunner,
}

impl AppState {
    pub fn new(db: PgPool, auth_service: AuthService, analysis_tick: Duration) -> Self {
        let analysis_runner = AnalysisRunner::new(db.clone(), analysis_tick);
        Self {
            db,
            auth_service,
            analysis_runner,
        }
    }
}

/// Uniform JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details (optional)
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn internal(message: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("DATABASE_ERROR", message)),
    )
}

pub fn not_found(code: &str, message: &str) -> (StatusCode, Json<ApiError>) {
    (StatusCode::NOT_FOUND, Json(ApiError::new(code, message)))
}

pub fn bad_request(code: &str, message: &str) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(code, message)))
}

pub fn conflict(code: &str, message: &str) -> (StatusCode, Json<ApiError>) {
    (StatusCode::CONFLICT, Json(ApiError::new(code, message)))
}

/// Admin gate used by catalog management handlers.
pub fn require_admin(session: &UserSession) -> Result<(), (StatusCode, Json<ApiError>)> {
    if session.role != UserRole::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiError::new("ADMIN_REQUIRED", "Admin access required")),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Maximum number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn get_limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_limit_is_clamped() {
        assert_eq!(PaginationQuery { limit: None }.get_limit(), 20);
        assert_eq!(PaginationQuery { limit: Some(5) }.get_limit(), 5);
        assert_eq!(PaginationQuery { limit: Some(0) }.get_limit(), 1);
        assert_eq!(PaginationQuery { limit: Some(1000) }.get_limit(), 100);
    }
}
