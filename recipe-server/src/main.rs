//! recipe-server — Recipe management REST API
//!
//! Long-running service that:
//! - Registers users and exchanges credentials for opaque API tokens
//! - Stores per-user recipes and tags, scoped to their owner
//! - Accepts recipe image uploads and serves them back under /media

use recipe_server::api;
use recipe_server::config::Config;
use recipe_server::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!("Starting recipe-server");

    // Initialize application state (waits for the database, runs migrations)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("recipe-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
