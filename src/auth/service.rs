use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::auth::{
    AuthError, AuthResponse, JwtService, OidcClaims, OidcClient, RefreshTokenRequest,
    TokenResponse, UserRole, UserSession,
};
use crate::models::{UpsertUser, User};

/// How long an issued login state nonce stays redeemable.
const LOGIN_STATE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    oidc: OidcClient,
    db: PgPool,
    pending_states: Arc<Mutex<HashMap<String, Instant>>>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_secret: &str, oidc: OidcClient) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret),
            oidc,
            db,
            pending_states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn oidc(&self) -> &OidcClient {
        &self.oidc
    }

    /// Issue a CSRF state nonce and build the provider authorization URL
    pub async fn begin_login(&self) -> Result<String, AuthError> {
        let state = Uuid::new_v4().to_string();
        {
            let mut states = self.pending_states.lock().unwrap();
            let now = Instant::now();
            states.retain(|_, issued| now.duration_since(*issued) < LOGIN_STATE_TTL);
            states.insert(state.clone(), now);
        }

        self.oidc.authorization_url(&state).await
    }

    /// Complete the authorization-code flow: consume the state nonce,
    /// exchange the code, upsert the local user and mint first-party tokens
    pub async fn handle_callback(&self, code: &str, state: &str) -> Result<AuthResponse, AuthError> {
        self.consume_state(state)?;

        let provider_tokens = self.oidc.exchange_code(code).await?;
        let claims = self.oidc.userinfo(&provider_tokens.access_token).await?;

        let user = self.upsert_user_from_claims(&claims).await?;
        let email = user.email.clone().unwrap_or_default();

        let (access_token, refresh_token) =
            self.jwt_service
                .create_token_pair(user.id, &email, user.role)?;

        self.store_refresh_token(user.id, &refresh_token).await?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user,
        })
    }

    /// Refresh access token
    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<TokenResponse, AuthError> {
        let claims = self.jwt_service.validate_token(&request.refresh_token)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        if !self
            .is_refresh_token_valid(user_id, &request.refresh_token)
            .await?
        {
            return Err(AuthError::InvalidToken);
        }

        let access_token =
            self.jwt_service
                .create_access_token(user_id, &claims.email, claims.role)?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
        })
    }

    /// Logout: blacklist the access token, revoke refresh tokens, and hand
    /// back the provider end-session URL when one is advertised
    pub async fn logout(&self, token: &str) -> Result<Option<String>, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        self.blacklist_token(&claims.jti, claims.exp as i64).await?;
        self.revoke_user_refresh_tokens(user_id).await?;

        self.oidc.end_session_url().await
    }

    /// Check if token is blacklisted
    pub async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, AuthError> {
        let result =
            sqlx::query("SELECT 1 FROM token_blacklist WHERE jti = $1 AND expires_at > NOW()")
                .bind(jti)
                .fetch_optional(&self.db)
                .await
                .map_err(AuthError::Database)?;

        Ok(result.is_some())
    }

    /// Validate user session from token
    pub async fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let session = self.jwt_service.extract_user_session(token)?;

        if self.is_token_blacklisted(&session.jti).await? {
            return Err(AuthError::InvalidToken);
        }

        Ok(session)
    }

    /// The authenticated user's row
    pub async fn current_user(&self, user_id: Uuid) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(AuthError::Database)?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user)
    }

    // Private helper methods

    fn consume_state(&self, state: &str) -> Result<(), AuthError> {
        let mut states = self.pending_states.lock().unwrap();
        let issued = states.remove(state).ok_or(AuthError::InvalidState)?;
        if issued.elapsed() >= LOGIN_STATE_TTL {
            return Err(AuthError::InvalidState);
        }
        Ok(())
    }

    async fn upsert_user_from_claims(&self, claims: &OidcClaims) -> Result<User, AuthError> {
        let upsert = UpsertUser {
            subject: claims.sub.clone(),
            email: claims.email.clone(),
            first_name: claims.given_name.clone(),
            last_name: claims.family_name.clone(),
            profile_image_url: claims.picture.clone(),
        };

        // Role is preserved on conflict so promoting an admin survives logins.
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, subject, email, first_name, last_name, profile_image_url, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             ON CONFLICT (subject) DO UPDATE SET
                 email = EXCLUDED.email,
                 first_name = EXCLUDED.first_name,
                 last_name = EXCLUDED.last_name,
                 profile_image_url = EXCLUDED.profile_image_url,
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&upsert.subject)
        .bind(&upsert.email)
        .bind(&upsert.first_name)
        .bind(&upsert.last_name)
        .bind(&upsert.profile_image_url)
        .bind(UserRole::User)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(user)
    }

    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        let claims = self.jwt_service.validate_token(refresh_token)?;
        let expires_at = chrono::DateTime::from_timestamp(claims.exp as i64, 0)
            .ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(format!("{:x}", md5::compute(refresh_token)))
        .bind(expires_at)
        .execute(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(())
    }

    async fn is_refresh_token_valid(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<bool, AuthError> {
        let token_hash = format!("{:x}", md5::compute(refresh_token));

        let result = sqlx::query(
            "SELECT 1 FROM refresh_tokens
             WHERE user_id = $1 AND token_hash = $2 AND expires_at > NOW() AND NOT revoked",
        )
        .bind(user_id)
        .bind(token_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(result.is_some())
    }

    async fn revoke_user_refresh_tokens(&self, user_id: Uuid) -> Result<(), AuthError> {
        sqlx::query("UPDATE refresh_tokens SET revoked = true WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(AuthError::Database)?;

        Ok(())
    }

    async fn blacklist_token(&self, jti: &str, exp: i64) -> Result<(), AuthError> {
        let expires_at =
            chrono::DateTime::from_timestamp(exp, 0).ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO token_blacklist (jti, expires_at) VALUES ($1, $2)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(())
    }
}
