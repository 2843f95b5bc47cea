//! Book metadata and catalog models
//!
//! `BookMetadata` is the canonical shape every provider response is
//! normalized into; nothing provider-specific crosses the adapter boundary
//! except the opaque `raw_data` payload kept for diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which bibliographic provider produced a metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// Open Library books API (queried first)
    #[serde(rename = "Open Library")]
    OpenLibrary,
    /// Google Books volumes API (second fallback)
    #[serde(rename = "Google Books")]
    GoogleBooks,
    /// Open Library full-text search endpoint (last resort)
    #[serde(rename = "Open Library Search")]
    OpenLibrarySearch,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Source::OpenLibrary => "Open Library",
            Source::GoogleBooks => "Google Books",
            Source::OpenLibrarySearch => "Open Library Search",
        };
        write!(f, "{}", name)
    }
}

/// Canonical, provider-agnostic book metadata
///
/// Field defaults when the provider omits data: `title` falls back to
/// "Unknown Title", list fields to empty, everything else stays `None`.
/// `categories` is capped at 5 entries by every adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookMetadata {
    /// Normalized (dash/space-stripped) ISBN used as the request key
    pub isbn: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    /// Cover URL, rewritten to https where the provider serves http
    pub cover_image: Option<String>,
    pub language: Option<String>,
    pub categories: Vec<String>,
    pub source: Source,
    /// Provider-native payload, retained for diagnostics and future enrichment
    pub raw_data: serde_json::Value,
}

/// Sentinel title when a provider has no title for the edition
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// A user's owned record of a book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub isbn: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub cover_image: Option<String>,
    pub language: Option<String>,
    pub categories: Vec<String>,
    pub source: Source,
    pub raw_data: serde_json::Value,
    /// None = unfiled
    pub folder_id: Option<Uuid>,
    /// Always >= 1; decrementing at 1 is a no-op
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogEntry {
    /// Build a fresh entry (quantity 1) from resolved metadata
    pub fn from_metadata(
        user_id: Uuid,
        metadata: BookMetadata,
        folder_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            isbn: metadata.isbn,
            title: metadata.title,
            authors: metadata.authors,
            publisher: metadata.publisher,
            published_date: metadata.published_date,
            description: metadata.description,
            page_count: metadata.page_count,
            cover_image: metadata.cover_image,
            language: metadata.language,
            categories: metadata.categories,
            source: metadata.source,
            raw_data: metadata.raw_data,
            folder_id,
            quantity: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Default folder color when the user picks none
pub const DEFAULT_FOLDER_COLOR: &str = "#8B4513";
/// Default folder icon
pub const DEFAULT_FOLDER_ICON: &str = "folder";

/// A user-created grouping of catalog entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(
        user_id: Uuid,
        name: String,
        description: Option<String>,
        color: Option<String>,
        icon: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description,
            color: color.unwrap_or_else(|| DEFAULT_FOLDER_COLOR.to_string()),
            icon: icon.unwrap_or_else(|| DEFAULT_FOLDER_ICON.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}
