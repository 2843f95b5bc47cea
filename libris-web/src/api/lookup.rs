//! ISBN lookup endpoint
//!
//! Network boundary to the lookup pipeline. Validates presence of the ISBN,
//! cleans it, and runs the provider fallback chain. Does not touch the
//! catalog; the scan endpoint owns find-or-create.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::BookMetadata;
use crate::services::LookupError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub isbn: Option<String>,
}

/// POST /api/lookup
pub async fn lookup_isbn(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> ApiResult<Json<BookMetadata>> {
    let raw = request
        .isbn
        .filter(|isbn| !isbn.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("ISBN is required".to_string()))?;

    let isbn = libris_common::isbn::normalize(&raw);
    tracing::info!(isbn = %isbn, "Looking up ISBN");

    match state.lookup.fetch(&isbn).await {
        Ok(metadata) => Ok(Json(metadata)),
        Err(LookupError::NotFound) => Err(ApiError::BookNotFound { isbn }),
    }
}

/// Build lookup routes
pub fn lookup_routes() -> Router<AppState> {
    Router::new().route("/api/lookup", post(lookup_isbn))
}
