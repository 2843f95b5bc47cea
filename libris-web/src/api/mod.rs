//! HTTP API handlers for libris-web

pub mod auth;
pub mod books;
pub mod folders;
pub mod health;
pub mod lookup;

pub use books::book_routes;
pub use folders::folder_routes;
pub use health::health_routes;
pub use lookup::lookup_routes;
