use axum::{
    extract::{Query, Request, State},
    middleware,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;

use crate::auth::{
    extract_bearer_token, jwt_auth_middleware, AuthError, AuthResponse, AuthService,
    MessageResponse, RefreshTokenRequest, TokenResponse, UserSession,
};
use crate::models::User;

/// Authentication routes: OIDC entry points plus first-party token endpoints
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/api/login", get(login))
        .route("/api/callback", get(callback))
        .route("/api/auth/refresh", post(refresh_token))
        .route("/api/logout", get(logout))
        .route(
            "/api/auth/user",
            get(current_user).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

/// Redirect to the provider authorization endpoint
#[tracing::instrument(skip(auth_service))]
async fn login(State(auth_service): State<AuthService>) -> Result<Redirect, AuthError> {
    let url = auth_service.begin_login().await?;
    Ok(Redirect::temporary(&url))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: String,
    state: String,
}

/// Exchange the authorization code and mint first-party tokens
#[tracing::instrument(skip(auth_service, query))]
async fn callback(
    State(auth_service): State<AuthService>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service
        .handle_callback(&query.code, &query.state)
        .await?;
    Ok(Json(response))
}

/// Refresh access token
#[tracing::instrument(skip(auth_service, request))]
async fn refresh_token(
    State(auth_service): State<AuthService>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let response = auth_service.refresh_token(request).await?;
    Ok(Json(response))
}

/// Blacklist the presented token and redirect to the provider logout
#[tracing::instrument(skip(auth_service, request))]
async fn logout(
    State(auth_service): State<AuthService>,
    request: Request,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;

    match auth_service.logout(token).await? {
        Some(end_session_url) => Ok(Redirect::temporary(&end_session_url).into_response()),
        None => Ok(Json(MessageResponse {
            message: "Successfully logged out".to_string(),
        })
        .into_response()),
    }
}

/// The authenticated user row
#[tracing::instrument(skip(auth_service, session))]
async fn current_user(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<User>, AuthError> {
    let user = auth_service.current_user(session.user_id).await?;
    Ok(Json(user))
}
