//! Error types for libris-web
//!
//! `ApiError` is the HTTP boundary type. Response bodies use the flat
//! `{"error": ...}` shape the lookup wire contract specifies; the 404 for an
//! unresolvable ISBN additionally echoes the cleaned ISBN.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::CatalogError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or invalid user identity (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// No provider had data for the ISBN (404 with the cleaned ISBN echoed)
    #[error("Book not found in any database")]
    BookNotFound { isbn: String },

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// libris-common error
    #[error("Common error: {0}")]
    Common(#[from] libris_common::Error),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::BookNotFound { isbn } => ApiError::BookNotFound { isbn },
            CatalogError::EntryNotFound(id) => {
                ApiError::NotFound(format!("Catalog entry not found: {}", id))
            }
            CatalogError::FolderNotFound(id) => {
                ApiError::NotFound(format!("Folder not found: {}", id))
            }
            CatalogError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BookNotFound { isbn } => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Book not found in any database", "isbn": isbn }),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
