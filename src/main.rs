use tracing_subscriber::EnvFilter;

use notes_api::config::config;
use notes_api::{router, AppState};

const DEFAULT_LOG_FILTER: &str = "notes_api=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!(
        "Starting Notes API in {:?} mode ({:?} store)",
        config.environment,
        config.database.backend
    );

    if config.security.jwt_secret.trim().is_empty() {
        anyhow::bail!("SECURITY_JWT_SECRET must be set outside development");
    }

    let state = AppState::from_config(config.clone()).await?;
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Notes API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
