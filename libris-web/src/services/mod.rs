//! Core services for libris-web
//!
//! Provider adapters, the ordered lookup fallback chain, and the catalog
//! reconciler that keeps one entry per (user, ISBN).

pub mod catalog;
pub mod googlebooks;
pub mod lookup;
pub mod openlibrary;
pub mod openlibrary_search;
pub mod provider;

pub use catalog::{CatalogError, CatalogService};
pub use lookup::{LookupError, LookupService};
pub use provider::{BookProvider, Lookup, ProviderError};
