//! Google Books volumes API client
//!
//! Second provider in the fallback chain. Queries by ISBN text search and
//! normalizes the first matching volume.

use serde::Deserialize;
use serde_json::Value;

use super::openlibrary::MAX_CATEGORIES;
use super::provider::{build_http_client, BookProvider, Lookup, ProviderError};
use crate::models::{book::UNKNOWN_TITLE, BookMetadata, Source};
use async_trait::async_trait;

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Debug, Deserialize)]
struct GbVolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    publisher: Option<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "pageCount")]
    page_count: Option<u32>,
    #[serde(rename = "imageLinks")]
    image_links: Option<GbImageLinks>,
    language: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GbImageLinks {
    thumbnail: Option<String>,
    #[serde(rename = "smallThumbnail")]
    small_thumbnail: Option<String>,
}

/// Google Books API client
pub struct GoogleBooksClient {
    http_client: reqwest::Client,
}

impl GoogleBooksClient {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_http_client()?,
        })
    }
}

/// Google serves some cover links over plain http
fn to_https(url: String) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url,
    }
}

/// Normalize one Google Books volumeInfo record into canonical metadata
fn normalize(isbn: &str, volume_info: Value) -> Result<BookMetadata, ProviderError> {
    let parsed: GbVolumeInfo = serde_json::from_value(volume_info.clone())
        .map_err(|e| ProviderError::Parse(e.to_string()))?;

    let cover_image = parsed
        .image_links
        .and_then(|links| links.thumbnail.or(links.small_thumbnail))
        .map(to_https);

    Ok(BookMetadata {
        isbn: isbn.to_string(),
        title: parsed.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: parsed.authors,
        publisher: parsed.publisher,
        published_date: parsed.published_date,
        description: parsed.description,
        page_count: parsed.page_count,
        cover_image,
        language: parsed.language,
        categories: parsed.categories.into_iter().take(MAX_CATEGORIES).collect(),
        source: Source::GoogleBooks,
        raw_data: volume_info,
    })
}

#[async_trait]
impl BookProvider for GoogleBooksClient {
    fn source(&self) -> Source {
        Source::GoogleBooks
    }

    async fn lookup(&self, isbn: &str) -> Result<Lookup, ProviderError> {
        let url = format!("{}?q=isbn:{}", GOOGLE_BOOKS_URL, isbn);

        tracing::debug!(isbn = %isbn, url = %url, "Querying Google Books API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(isbn = %isbn, status = %status, "Google Books returned non-success");
            return Ok(Lookup::NotFound);
        }

        let mut data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let volume_info = match data
            .get_mut("items")
            .and_then(|items| items.get_mut(0))
            .and_then(|item| item.get_mut("volumeInfo"))
        {
            Some(value) => value.take(),
            None => {
                tracing::debug!(isbn = %isbn, "No Google Books data for ISBN");
                return Ok(Lookup::NotFound);
            }
        };

        let metadata = normalize(isbn, volume_info)?;
        tracing::info!(isbn = %isbn, title = %metadata.title, "Retrieved book from Google Books");
        Ok(Lookup::Found(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_volume() -> Value {
        json!({
            "title": "Another Example",
            "authors": ["Alice Smith"],
            "publisher": "Sample House",
            "publishedDate": "2010-05-01",
            "description": "A sample description.",
            "pageCount": 250,
            "imageLinks": {
                "smallThumbnail": "http://books.google.com/small.jpg",
                "thumbnail": "http://books.google.com/thumb.jpg"
            },
            "language": "en",
            "categories": ["Computers"]
        })
    }

    #[test]
    fn normalizes_full_volume() {
        let metadata = normalize("9780306406157", sample_volume()).unwrap();

        assert_eq!(metadata.title, "Another Example");
        assert_eq!(metadata.authors, vec!["Alice Smith"]);
        assert_eq!(metadata.publisher.as_deref(), Some("Sample House"));
        assert_eq!(metadata.published_date.as_deref(), Some("2010-05-01"));
        assert_eq!(metadata.page_count, Some(250));
        assert_eq!(metadata.language.as_deref(), Some("en"));
        assert_eq!(metadata.categories, vec!["Computers"]);
        assert_eq!(metadata.source, Source::GoogleBooks);
    }

    #[test]
    fn rewrites_cover_to_https() {
        let metadata = normalize("9780306406157", sample_volume()).unwrap();
        assert_eq!(
            metadata.cover_image.as_deref(),
            Some("https://books.google.com/thumb.jpg")
        );
    }

    #[test]
    fn falls_back_to_small_thumbnail() {
        let volume = json!({
            "title": "T",
            "imageLinks": {"smallThumbnail": "http://books.google.com/small.jpg"}
        });
        let metadata = normalize("1", volume).unwrap();
        assert_eq!(
            metadata.cover_image.as_deref(),
            Some("https://books.google.com/small.jpg")
        );
    }

    #[test]
    fn https_cover_left_alone() {
        assert_eq!(
            to_https("https://already.secure/x.jpg".to_string()),
            "https://already.secure/x.jpg"
        );
    }

    #[test]
    fn empty_volume_gets_defaults() {
        let metadata = normalize("9780306406157", json!({})).unwrap();
        assert_eq!(metadata.title, UNKNOWN_TITLE);
        assert!(metadata.authors.is_empty());
        assert!(metadata.cover_image.is_none());
        assert!(metadata.description.is_none());
    }

    #[test]
    fn caps_categories_at_five() {
        let volume = json!({
            "title": "T",
            "categories": ["a", "b", "c", "d", "e", "f", "g"]
        });
        let metadata = normalize("1", volume).unwrap();
        assert_eq!(metadata.categories.len(), 5);
    }
}
