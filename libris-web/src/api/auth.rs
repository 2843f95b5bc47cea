//! User identity extraction
//!
//! Session management is an external collaborator; by the time a request
//! reaches this service the authenticated user id travels in the
//! `X-User-Id` header. The extractor is the seam: handlers take an
//! [`AuthUser`] and never look at headers themselves.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user identity for the current request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| ApiError::Unauthorized(format!("Invalid user id: {}", raw)))?;

        Ok(AuthUser(user_id))
    }
}
