//! Fetch error types.

use std::sync::Arc;
use vidscout_core::Error;

use super::url::UrlError;

/// Errors from fetching a search results page.
///
/// Every variant means "no document"; callers report it as a service error.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The configured search URL cannot be used.
    #[error("invalid search URL: {0}")]
    InvalidUrl(#[from] UrlError),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Connection or protocol failure.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Non-success status code.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    /// Body exceeds the configured byte limit.
    #[error("response too large: {size} bytes exceeds {limit}")]
    TooLarge { size: usize, limit: usize },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { FetchError::Timeout } else { FetchError::Network(Arc::new(err)) }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => Error::FetchTimeout(err.to_string()),
            FetchError::TooLarge { .. } => Error::FetchTooLarge(err.to_string()),
            FetchError::InvalidUrl(e) => Error::InvalidInput(e.to_string()),
            other => Error::HttpError(other.to_string()),
        }
    }
}
