//! vCenter client errors

use thiserror::Error;

/// Errors that can occur when walking the vCenter inventory
#[derive(Debug, Error)]
pub enum VCenterError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// vCenter returned an error status
    #[error("vCenter API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Login refused or session no longer valid
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Object not found
    #[error("Not found: {0}")]
    NotFound(String),
}
