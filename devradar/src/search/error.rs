//! Error types for the search API.

use thiserror::Error;

/// Errors that can occur while searching for developers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The configured API base URL is not usable.
    #[error("Invalid search endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Transport-level failure (DNS, connection refused, TLS, ...).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The request did not complete within the configured timeout.
    #[error("Search request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body was not the expected `{"devs": [...]}` document.
    #[error("Failed to parse search response: {0}")]
    InvalidResponse(String),
}
