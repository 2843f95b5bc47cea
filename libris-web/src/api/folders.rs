//! Folder endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::models::Folder;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// GET /api/folders
pub async fn list_folders(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Folder>>> {
    let folders = state.catalog.list_folders(user_id).await?;
    Ok(Json(folders))
}

/// POST /api/folders
pub async fn create_folder(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateFolderRequest>,
) -> ApiResult<Json<Folder>> {
    let name = request
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Folder name is required".to_string()))?;

    let folder = state
        .catalog
        .create_folder(
            user_id,
            name,
            request.description,
            request.color,
            request.icon,
        )
        .await?;
    Ok(Json(folder))
}

/// DELETE /api/folders/:id
///
/// Entries in the folder become unfiled as part of the same operation.
pub async fn delete_folder(
    AuthUser(_user_id): AuthUser,
    State(state): State<AppState>,
    Path(folder_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_folder(folder_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build folder routes
pub fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/api/folders", get(list_folders).post(create_folder))
        .route("/api/folders/:id", delete(delete_folder))
}
