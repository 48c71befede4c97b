use anyhow::Context;
use tracing_subscriber::EnvFilter;

use faculty_api::auth::JwtSettings;
use faculty_api::database::DatabaseManager;
use faculty_api::server;
use faculty_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("faculty_api=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = faculty_api::config::config();
    tracing::info!("Starting Faculty API in {:?} mode", config.environment);

    if faculty_api::is_development!() && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("Using the built-in development JWT secret; set JWT_SECRET outside local use");
    } else if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; logins will fail until it is configured");
    }

    let pool = DatabaseManager::connect(&config.database).context("Failed to configure database")?;
    let state = AppState::new(pool, JwtSettings::from_config(&config.security));
    let app = server::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Faculty API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
