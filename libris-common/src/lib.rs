//! # libris Common Library
//!
//! Shared code for the libris book-catalog service:
//! - Error types
//! - Configuration loading
//! - Database pool initialization and schema
//! - ISBN normalization

pub mod config;
pub mod db;
pub mod error;
pub mod isbn;

pub use error::{Error, Result};
