//! libris-web - Book catalog service
//!
//! HTTP service behind the libris book-cataloguing UI: resolves scanned
//! ISBNs through a multi-source lookup chain and keeps per-user catalogs
//! (entries, quantities, folders) in SQLite.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use libris_web::services::LookupService;
use libris_web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting libris-web (book catalog service)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = libris_common::config::Config::load()?;
    info!("Database: {}", config.database_path.display());

    // Initialize database connection pool and schema
    let db_pool = libris_web::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    // Provider chain: Open Library -> Google Books -> Open Library search
    let lookup = Arc::new(
        LookupService::with_default_providers()
            .map_err(|e| anyhow::anyhow!("Failed to build provider chain: {}", e))?,
    );

    let state = AppState::new(db_pool, lookup);
    let app = libris_web::build_router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
