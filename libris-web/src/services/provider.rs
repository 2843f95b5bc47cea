//! Provider adapter contract
//!
//! Each bibliographic source is wrapped by one adapter that translates its
//! native response shape into [`BookMetadata`]. "No data for this ISBN" is a
//! normal outcome, not an error, so the fallback chain can continue without
//! inspecting error causes.

use crate::models::{BookMetadata, Source};
use async_trait::async_trait;
use thiserror::Error;

/// Unexpected adapter failure (not "no data")
///
/// These are recovered by the orchestrator as a miss and logged; they never
/// reach the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Outcome of a provider lookup
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(BookMetadata),
    NotFound,
}

/// One external bibliographic data source
#[async_trait]
pub trait BookProvider: Send + Sync {
    /// Tag identifying this provider in produced metadata and logs
    fn source(&self) -> Source;

    /// Resolve metadata for a normalized ISBN.
    ///
    /// Returns `Ok(Lookup::NotFound)` both when the provider has no data and
    /// on recoverable upstream conditions (non-2xx status, empty result set).
    /// Only transport faults and undecodable bodies surface as
    /// `Err(ProviderError)`.
    async fn lookup(&self, isbn: &str) -> Result<Lookup, ProviderError>;
}

pub(crate) const USER_AGENT: &str = "libris/0.1.0 (https://github.com/libris/libris)";
pub(crate) const HTTP_TIMEOUT_SECS: u64 = 30;

/// Shared reqwest client construction for all adapters
pub(crate) fn build_http_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}
