use anyhow::Result;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub oidc_issuer_url: String,
    pub oidc_client_id: String,
    pub oidc_client_secret: String,
    pub oidc_redirect_url: String,
    pub analysis_tick: Duration,
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());

        let oidc_issuer_url = env::var("OIDC_ISSUER_URL")
            .unwrap_or_else(|_| "https://auth.example.com".to_string());
        let oidc_client_id = env::var("OIDC_CLIENT_ID").unwrap_or_else(|_| "posture-track".to_string());
        let oidc_client_secret = env::var("OIDC_CLIENT_SECRET").unwrap_or_default();
        let oidc_redirect_url = env::var("OIDC_REDIRECT_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/api/callback", port));

        let analysis_tick_ms = env::var("ANALYSIS_TICK_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let seed_on_startup = env::var("SEED_ON_STARTUP")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
            oidc_issuer_url,
            oidc_client_id,
            oidc_client_secret,
            oidc_redirect_url,
            analysis_tick: Duration::from_millis(analysis_tick_ms),
            seed_on_startup,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
