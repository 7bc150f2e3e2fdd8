use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::{auth, educational_content, exercises, feedback, posture_sessions, progress, reminders, user_exercises, AppState};
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer};

pub fn create_routes(state: AppState) -> Router {
    let auth_service = state.auth_service.clone();

    // Everything under /api except the auth entry points requires a valid,
    // non-blacklisted bearer token.
    let protected = Router::new()
        .merge(posture_sessions::routes())
        .merge(exercises::routes())
        .merge(user_exercises::routes())
        .merge(progress::routes())
        .merge(feedback::routes())
        .merge(educational_content::routes())
        .merge(reminders::routes())
        .route_layer(middleware::from_fn_with_state(
            auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .merge(auth::auth_routes(auth_service))
        .nest("/api", protected)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}
