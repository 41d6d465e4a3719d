//! Error types for dispatch backend operations.

use thiserror::Error;

/// Errors that can occur when talking to the dispatch backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success status code.
    #[error("Backend returned HTTP {status} for {path}")]
    Backend { status: u16, path: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse response from {path}: {message}")]
    Json { path: String, message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.to_string())
    }
}
