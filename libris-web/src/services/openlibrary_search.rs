//! Open Library search endpoint client
//!
//! Last resort in the fallback chain. Hits the full-text search API, which
//! indexes editions the books API misses, and normalizes the first hit.
//! Covers are reconstructed from the numeric cover id.

use serde::Deserialize;
use serde_json::Value;

use super::openlibrary::MAX_CATEGORIES;
use super::provider::{build_http_client, BookProvider, Lookup, ProviderError};
use crate::models::{book::UNKNOWN_TITLE, BookMetadata, Source};
use async_trait::async_trait;

const OPENLIBRARY_SEARCH_URL: &str = "https://openlibrary.org/search.json";
const COVER_URL_TEMPLATE: &str = "https://covers.openlibrary.org/b/id/{id}-M.jpg";

#[derive(Debug, Deserialize)]
struct OlSearchDoc {
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    publisher: Vec<String>,
    first_publish_year: Option<i64>,
    #[serde(default)]
    first_sentence: Vec<String>,
    number_of_pages_median: Option<u32>,
    cover_i: Option<i64>,
    #[serde(default)]
    language: Vec<String>,
    #[serde(default)]
    subject: Vec<String>,
}

/// Open Library search API client
pub struct OpenLibrarySearchClient {
    http_client: reqwest::Client,
}

impl OpenLibrarySearchClient {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client()?,
        })
    }
}

/// Build a cover URL from the numeric cover id
fn cover_url(cover_id: i64) -> String {
    COVER_URL_TEMPLATE.replace("{id}", &cover_id.to_string())
}

/// Normalize one search doc into canonical metadata
fn normalize(isbn: &str, doc: Value) -> Result<BookMetadata, ProviderError> {
    let parsed: OlSearchDoc =
        serde_json::from_value(doc.clone()).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let description = if parsed.first_sentence.is_empty() {
        None
    } else {
        Some(parsed.first_sentence.join(" "))
    };

    Ok(BookMetadata {
        isbn: isbn.to_string(),
        title: parsed.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: parsed.author_name,
        publisher: parsed.publisher.into_iter().next(),
        published_date: parsed.first_publish_year.map(|y| y.to_string()),
        description,
        page_count: parsed.number_of_pages_median,
        cover_image: parsed.cover_i.map(cover_url),
        language: parsed.language.into_iter().next(),
        categories: parsed.subject.into_iter().take(MAX_CATEGORIES).collect(),
        source: Source::OpenLibrarySearch,
        raw_data: doc,
    })
}

#[async_trait]
impl BookProvider for OpenLibrarySearchClient {
    fn source(&self) -> Source {
        Source::OpenLibrarySearch
    }

    async fn lookup(&self, isbn: &str) -> Result<Lookup, ProviderError> {
        let url = format!("{}?isbn={}&limit=1", OPENLIBRARY_SEARCH_URL, isbn);

        tracing::debug!(isbn = %isbn, url = %url, "Querying Open Library search API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(isbn = %isbn, status = %status, "Open Library search returned non-success");
            return Ok(Lookup::NotFound);
        }

        let mut data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let doc = match data.get_mut("docs").and_then(|docs| docs.get_mut(0)) {
            Some(value) => value.take(),
            None => {
                tracing::debug!(isbn = %isbn, "No Open Library search results for ISBN");
                return Ok(Lookup::NotFound);
            }
        };

        let metadata = normalize(isbn, doc)?;
        tracing::info!(isbn = %isbn, title = %metadata.title, "Retrieved book from Open Library search");
        Ok(Lookup::Found(metadata))
    }
}
