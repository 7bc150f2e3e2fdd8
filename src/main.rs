use posture_track::api::{routes::create_routes, AppState};
use posture_track::auth::{AuthService, OidcClient};
use posture_track::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};
use posture_track::services::ReminderScheduler;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let db_config = DatabaseConfig::from_env()?;
    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;

    if config.seed_on_startup {
        DatabaseSeeder::new(db.clone()).seed_all().await?;
    }

    let oidc = OidcClient::new(
        config.oidc_issuer_url.clone(),
        config.oidc_client_id.clone(),
        config.oidc_client_secret.clone(),
        config.oidc_redirect_url.clone(),
    )?;
    let auth_service = AuthService::new(db.clone(), &config.jwt_secret, oidc);

    ReminderScheduler::new(db.clone()).start();

    let state = AppState::new(db, auth_service, config.analysis_tick);
    let app = create_routes(state);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        "PostureTrack server starting on http://{}",
        config.server_address()
    );
    info!(
        "Health check available at http://{}/health",
        config.server_address()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
