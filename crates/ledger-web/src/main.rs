//! Tidyledger web server.
//!
//! Serves the dashboard as server-rendered HTML and a token-authenticated
//! JSON API for clients, workers, work entries, and payment status.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use database::Database;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

/// Create the configured bootstrap account unless its token already exists.
async fn bootstrap_account(db: &Database, config: &Config) -> database::Result<()> {
    let Some(token) = &config.bootstrap_token else {
        return Ok(());
    };

    if database::account::get_account_by_token(db.pool(), token)
        .await?
        .is_none()
    {
        let account =
            database::account::create_account(db.pool(), &config.bootstrap_account_name, token)
                .await?;
        info!(account = %account.id, "Created bootstrap account");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting web server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    bootstrap_account(&db, &config).await?;

    // Build application state
    let state = AppState::new(db);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
