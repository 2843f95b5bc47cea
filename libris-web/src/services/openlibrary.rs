//! Open Library books API client
//!
//! First provider in the fallback chain. Queries by ISBN bib key and
//! normalizes the keyed response into canonical metadata.

use serde::Deserialize;
use serde_json::Value;

use super::provider::{build_http_client, BookProvider, Lookup, ProviderError};
use crate::models::{book::UNKNOWN_TITLE, BookMetadata, Source};
use async_trait::async_trait;

const OPENLIBRARY_BOOKS_URL: &str = "https://openlibrary.org/api/books";

/// Language keys arrive namespaced, e.g. "/languages/eng"
const LANGUAGE_KEY_PREFIX: &str = "/languages/";

/// Canonical metadata carries at most this many categories
pub(crate) const MAX_CATEGORIES: usize = 5;

#[derive(Debug, Deserialize)]
struct OlBookData {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<OlNamed>,
    #[serde(default)]
    publishers: Vec<OlNamed>,
    publish_date: Option<String>,
    /// Free-form; Open Library serves this as a plain string on some
    /// editions and omits it on most
    notes: Option<Value>,
    #[serde(default)]
    excerpts: Vec<OlExcerpt>,
    number_of_pages: Option<u32>,
    cover: Option<OlCover>,
    #[serde(default)]
    languages: Vec<OlLanguage>,
    #[serde(default)]
    subjects: Vec<OlNamed>,
}

#[derive(Debug, Deserialize)]
struct OlNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OlExcerpt {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OlCover {
    small: Option<String>,
    medium: Option<String>,
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OlLanguage {
    key: Option<String>,
}

/// Open Library books API client
pub struct OpenLibraryClient {
    http_client: reqwest::Client,
}

impl OpenLibraryClient {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client()?,
        })
    }
}

/// Normalize one Open Library book record into canonical metadata
///
/// Missing fields substitute defaults; the record itself is kept verbatim in
/// `raw_data`.
fn normalize(isbn: &str, book_data: Value) -> Result<BookMetadata, ProviderError> {
    let parsed: OlBookData = serde_json::from_value(book_data.clone())
        .map_err(|e| ProviderError::Parse(e.to_string()))?;

    // Prefer medium cover, then large, then small
    let cover_image = parsed
        .cover
        .and_then(|c| c.medium.or(c.large).or(c.small));

    let description = parsed
        .notes
        .as_ref()
        .and_then(|n| n.as_str())
        .map(str::to_string)
        .or_else(|| parsed.excerpts.into_iter().find_map(|e| e.text));

    let language = parsed
        .languages
        .into_iter()
        .find_map(|l| l.key)
        .map(|key| key.trim_start_matches(LANGUAGE_KEY_PREFIX).to_string());

    Ok(BookMetadata {
        isbn: isbn.to_string(),
        title: parsed.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: parsed.authors.into_iter().map(|a| a.name).collect(),
        publisher: parsed.publishers.into_iter().next().map(|p| p.name),
        published_date: parsed.publish_date,
        description,
        page_count: parsed.number_of_pages,
        cover_image,
        language,
        categories: parsed
            .subjects
            .into_iter()
            .take(MAX_CATEGORIES)
            .map(|s| s.name)
            .collect(),
        source: Source::OpenLibrary,
        raw_data: book_data,
    })
}

#[async_trait]
impl BookProvider for OpenLibraryClient {
    fn source(&self) -> Source {
        Source::OpenLibrary
    }

    async fn lookup(&self, isbn: &str) -> Result<Lookup, ProviderError> {
        let bibkey = format!("ISBN:{}", isbn);
        let url = format!(
            "{}?bibkeys={}&format=json&jscmd=data",
            OPENLIBRARY_BOOKS_URL, bibkey
        );

        tracing::debug!(isbn = %isbn, url = %url, "Querying Open Library books API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(isbn = %isbn, status = %status, "Open Library returned non-success");
            return Ok(Lookup::NotFound);
        }

        let mut data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        // The response is keyed by the bib key; a miss is an empty object
        let book_data = match data.get_mut(&bibkey) {
            Some(value) => value.take(),
            None => {
                tracing::debug!(isbn = %isbn, "No Open Library data for ISBN");
                return Ok(Lookup::NotFound);
            }
        };

        let metadata = normalize(isbn, book_data)?;
        tracing::info!(isbn = %isbn, title = %metadata.title, "Retrieved book from Open Library");
        Ok(Lookup::Found(metadata))
    }
}
