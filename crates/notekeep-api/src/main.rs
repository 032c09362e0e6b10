//! notekeep-api - HTTP API server for notekeep

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notekeep_api::{app, AppState};
use notekeep_core::defaults;
use notekeep_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   RUST_LOG    - standard env filter (default: "notekeep_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notekeep_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/notekeep".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| defaults::BIND_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| defaults::PORT.to_string())
        .parse()
        .unwrap_or(defaults::PORT);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    notekeep_db::log_pool_metrics(db.pool());
    info!("Database connected");

    // Make sure the tables exist (implicit schema, no migration tooling)
    db.ensure_schema().await?;
    info!("Schema ensured");

    let state = AppState::from_database(&db);
    let router = app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
