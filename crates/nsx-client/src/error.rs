//! NSX client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NSX Manager API
#[derive(Debug, Error)]
pub enum NsxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NSX Manager returned an error status; the body is kept verbatim
    #[error("NSX API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, locked account, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A successful response that could not be interpreted (undecodable
    /// body, missing envelope or `Location` header)
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid request (e.g., missing URI parameter, unsupported operation)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
