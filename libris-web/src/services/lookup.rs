//! Multi-source ISBN lookup
//!
//! Providers are tried strictly in registration order and the chain stops at
//! the first hit. The order (Open Library books API, then Google Books, then
//! Open Library search) trades metadata quality against coverage across
//! free-tier sources and must not be reordered. Calls are sequential on
//! purpose: a concurrent dispatch would spend quota on providers whose
//! results get discarded.

use thiserror::Error;

use super::googlebooks::GoogleBooksClient;
use super::openlibrary::OpenLibraryClient;
use super::openlibrary_search::OpenLibrarySearchClient;
use super::provider::{BookProvider, Lookup, ProviderError};
use crate::models::BookMetadata;

/// Lookup failure visible to callers
#[derive(Debug, Error)]
pub enum LookupError {
    /// Every provider reported no data for the ISBN
    #[error("Book not found in any database")]
    NotFound,
}

/// Ordered fallback chain over bibliographic providers
pub struct LookupService {
    providers: Vec<Box<dyn BookProvider>>,
}

impl LookupService {
    /// Build a chain from an explicit provider list (tests inject stubs here)
    pub fn new(providers: Vec<Box<dyn BookProvider>>) -> Self {
        Self { providers }
    }

    /// Build the production chain: Open Library → Google Books → Open
    /// Library search
    pub fn with_default_providers() -> Result<Self, ProviderError> {
        Ok(Self::new(vec![
            Box::new(OpenLibraryClient::new()?),
            Box::new(GoogleBooksClient::new()?),
            Box::new(OpenLibrarySearchClient::new()?),
        ]))
    }

    /// Resolve metadata for a normalized ISBN.
    ///
    /// Provider faults are logged and treated as misses so the chain keeps
    /// going; the caller only ever sees metadata or [`LookupError::NotFound`].
    pub async fn fetch(&self, isbn: &str) -> Result<BookMetadata, LookupError> {
        for provider in &self.providers {
            let source = provider.source();

            match provider.lookup(isbn).await {
                Ok(Lookup::Found(metadata)) => {
                    tracing::info!(isbn = %isbn, source = %source, title = %metadata.title,
                        "ISBN resolved");
                    return Ok(metadata);
                }
                Ok(Lookup::NotFound) => {
                    tracing::debug!(isbn = %isbn, source = %source,
                        "Provider has no data, trying next");
                }
                Err(e) => {
                    tracing::warn!(isbn = %isbn, source = %source, error = %e,
                        "Provider failed, trying next");
                }
            }
        }

        tracing::info!(isbn = %isbn, "No provider had data for ISBN");
        Err(LookupError::NotFound)
    }
}
