use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::api::{internal, require_admin, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{ContentCategory, CreateEducationalContent, EducationalContent};
use crate::services::EducationalContentService;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/educational-content",
        get(list_content).post(create_content),
    )
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    category: Option<ContentCategory>,
}

#[tracing::instrument(skip(state))]
async fn list_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> ApiResult<Vec<EducationalContent>> {
    let content = EducationalContentService::new(state.db.clone())
        .list_published(query.category)
        .await
        .map_err(|e| {
            error!("Failed to fetch educational content: {e}");
            internal("Failed to fetch educational content")
        })?;

    Ok(Json(content))
}

/// Admin only.
#[tracing::instrument(skip(state, session, data))]
async fn create_content(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(data): Json<CreateEducationalContent>,
) -> ApiResult<EducationalContent> {
    require_admin(&session)?;

    let content = EducationalContentService::new(state.db.clone())
        .create(data)
        .await
        .map_err(|e| {
            error!("Failed to create educational content: {e}");
            internal("Failed to create educational content")
        })?;

    Ok(Json(content))
}
