//! Record-store access for libris-web
//!
//! Plain async functions over the shared SQLite pool. Uuids and timestamps
//! are stored as text (RFC 3339 for times), list and raw-payload columns as
//! JSON text.

pub mod books;
pub mod folders;

pub use libris_common::db::{init_database_pool, init_tables};
