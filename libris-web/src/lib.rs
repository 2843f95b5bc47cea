//! libris-web library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::services::{CatalogService, LookupService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Provider fallback chain
    pub lookup: Arc<LookupService>,
    /// Catalog reconciler over the pool and the lookup chain
    pub catalog: CatalogService,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, lookup: Arc<LookupService>) -> Self {
        let catalog = CatalogService::new(db.clone(), lookup.clone());
        Self {
            db,
            lookup,
            catalog,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// CORS is wide open: the lookup endpoint is called straight from browser
/// clients on any origin, and the preflight OPTIONS gets answered by the
/// layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::lookup_routes())
        .merge(api::book_routes())
        .merge(api::folder_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
