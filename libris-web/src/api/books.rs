//! Catalog entry endpoints
//!
//! CRUD surface the UI layer drives: scan submission, quantity changes,
//! folder moves, and deletion. All routes require an authenticated user;
//! scan and list are scoped to that user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::CatalogEntry;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub isbn: Option<String>,
    pub folder_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// None = unfile the entry
    pub folder_id: Option<Uuid>,
}

/// POST /api/books/scan
///
/// Find-or-create for the scanned ISBN: an existing entry gets +1 quantity,
/// an unknown ISBN goes through the lookup chain and is inserted.
pub async fn scan(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> ApiResult<Json<CatalogEntry>> {
    let isbn = request
        .isbn
        .filter(|isbn| !isbn.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("ISBN is required".to_string()))?;

    let entry = state.catalog.scan(user_id, &isbn, request.folder_id).await?;
    Ok(Json(entry))
}

/// GET /api/books
pub async fn list_books(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CatalogEntry>>> {
    let entries = state.catalog.list_entries(user_id).await?;
    Ok(Json(entries))
}

/// POST /api/books/:id/increment
pub async fn increment_quantity(
    AuthUser(_user_id): AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<Json<CatalogEntry>> {
    let entry = state.catalog.increment_quantity(entry_id).await?;
    Ok(Json(entry))
}

/// POST /api/books/:id/decrement
///
/// No-op at quantity 1; the unchanged entry is returned.
pub async fn decrement_quantity(
    AuthUser(_user_id): AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<Json<CatalogEntry>> {
    let entry = state.catalog.decrement_quantity(entry_id).await?;
    Ok(Json(entry))
}

/// PUT /api/books/:id/folder
pub async fn move_to_folder(
    AuthUser(_user_id): AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<MoveRequest>,
) -> ApiResult<Json<CatalogEntry>> {
    let entry = state
        .catalog
        .move_to_folder(entry_id, request.folder_id)
        .await?;
    Ok(Json(entry))
}

/// DELETE /api/books/:id
pub async fn delete_book(
    AuthUser(_user_id): AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_entry(entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build catalog entry routes
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/api/books", get(list_books))
        .route("/api/books/scan", post(scan))
        .route("/api/books/:id/increment", post(increment_quantity))
        .route("/api/books/:id/decrement", post(decrement_quantity))
        .route("/api/books/:id/folder", put(move_to_folder))
        .route("/api/books/:id", delete(delete_book))
}
