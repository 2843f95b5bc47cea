//! Data models for libris-web

pub mod book;

pub use book::{BookMetadata, CatalogEntry, Folder, Source};
