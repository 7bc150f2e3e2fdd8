use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::error;

use crate::auth::AuthError;

/// OpenID Connect client for the configured identity provider.
///
/// Discovery is fetched lazily from `{issuer}/.well-known/openid-configuration`
/// and cached for the process lifetime.
#[derive(Clone)]
pub struct OidcClient {
    client: Client,
    issuer_url: String,
    client_id: String,
    client_secret: String,
    redirect_url: String,
    discovery: Arc<Mutex<Option<OidcDiscovery>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OidcDiscovery {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub end_session_endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OidcTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Userinfo claims we care about; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct OidcClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl OidcClient {
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_url: String,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            issuer_url: issuer_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            redirect_url,
            discovery: Arc::new(Mutex::new(None)),
        })
    }

    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    /// Fetch (or reuse) the provider's discovery document
    pub async fn discovery(&self) -> Result<OidcDiscovery, AuthError> {
        let mut cached = self.discovery.lock().await;
        if let Some(discovery) = cached.as_ref() {
            return Ok(discovery.clone());
        }

        let url = format!("{}/.well-known/openid-configuration", self.issuer_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AuthError::Discovery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Discovery(format!(
                "discovery returned {}",
                response.status()
            )));
        }

        let discovery = response
            .json::<OidcDiscovery>()
            .await
            .map_err(|e| AuthError::Discovery(e.to_string()))?;

        *cached = Some(discovery.clone());
        Ok(discovery)
    }

    /// Build the authorization redirect URL carrying the CSRF state nonce
    pub async fn authorization_url(&self, state: &str) -> Result<String, AuthError> {
        let discovery = self.discovery().await?;
        Ok(format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope=openid%20email%20profile&state={}",
            discovery.authorization_endpoint,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(state),
        ))
    }

    /// Exchange an authorization code for provider tokens
    pub async fn exchange_code(&self, code: &str) -> Result<OidcTokenResponse, AuthError> {
        let discovery = self.discovery().await?;

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_url),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];

        let response = self
            .client
            .post(&discovery.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("OIDC token exchange failed: {} - {}", status, error_text);
            return Err(AuthError::CodeExchange(format!(
                "token endpoint returned {}",
                status
            )));
        }

        response
            .json::<OidcTokenResponse>()
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))
    }

    /// Fetch userinfo claims with the provider access token
    pub async fn userinfo(&self, access_token: &str) -> Result<OidcClaims, AuthError> {
        let discovery = self.discovery().await?;

        let response = self
            .client
            .get(&discovery.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::CodeExchange(format!(
                "userinfo returned {}",
                response.status()
            )));
        }

        response
            .json::<OidcClaims>()
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))
    }

    /// Provider logout URL, when the provider advertises one
    pub async fn end_session_url(&self) -> Result<Option<String>, AuthError> {
        let discovery = self.discovery().await?;
        Ok(discovery.end_session_endpoint.map(|endpoint| {
            format!(
                "{}?client_id={}&post_logout_redirect_uri={}",
                endpoint,
                urlencoding::encode(&self.client_id),
                urlencoding::encode(&self.redirect_url),
            )
        }))
    }
}

impl std::fmt::Debug for OidcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcClient")
            .field("issuer_url", &self.issuer_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}
