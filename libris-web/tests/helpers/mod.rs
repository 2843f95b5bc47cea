//! Shared test fixtures: stub providers and in-memory app state

// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use libris_web::models::{BookMetadata, Source};
use libris_web::services::{BookProvider, Lookup, LookupService, ProviderError};
use libris_web::AppState;

/// Metadata a stub provider hands out for a known ISBN
pub fn stub_metadata(isbn: &str, title: &str, source: Source) -> BookMetadata {
    BookMetadata {
        isbn: isbn.to_string(),
        title: title.to_string(),
        authors: vec!["Test Author".to_string()],
        publisher: None,
        published_date: None,
        description: None,
        page_count: None,
        cover_image: None,
        language: None,
        categories: vec![],
        source,
        raw_data: json!({}),
    }
}

/// Provider test double backed by a fixed ISBN -> metadata map
pub struct StubProvider {
    source: Source,
    books: HashMap<String, BookMetadata>,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            books: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_book(mut self, metadata: BookMetadata) -> Self {
        self.books.insert(metadata.isbn.clone(), metadata);
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl BookProvider for StubProvider {
    fn source(&self) -> Source {
        self.source
    }

    async fn lookup(&self, isbn: &str) -> Result<Lookup, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.books.get(isbn) {
            Some(metadata) => Ok(Lookup::Found(metadata.clone())),
            None => Ok(Lookup::NotFound),
        }
    }
}

/// App state over an in-memory database and the given provider chain
pub async fn test_state(providers: Vec<Box<dyn BookProvider>>) -> AppState {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    libris_common::db::init_tables(&pool)
        .await
        .expect("Failed to initialize schema");

    AppState::new(pool, Arc::new(LookupService::new(providers)))
}

/// State whose three providers all miss every ISBN
pub async fn state_with_empty_providers() -> AppState {
    test_state(vec![
        Box::new(StubProvider::new(Source::OpenLibrary)),
        Box::new(StubProvider::new(Source::GoogleBooks)),
        Box::new(StubProvider::new(Source::OpenLibrarySearch)),
    ])
    .await
}
