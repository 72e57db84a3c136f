//! NsxClient trait for mocking
//!
//! This trait abstracts the NsxClient to enable mocking in unit tests.
//! The concrete NsxClient implements this trait, and tests can use `MockNsxClient`.

use crate::error::NsxError;
use crate::models::CreatedResource;
use crate::resource::{Operation, Resource};

/// Trait for generic NSX Manager API operations
///
/// Documents are exchanged as `serde_json::Value`; typed views live with the
/// callers that need them. All async methods must be `Send` to work with
/// Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NsxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Read a single document
    async fn read(&self, resource: Resource, uri_params: &[(&str, &str)]) -> Result<serde_json::Value, NsxError>;

    /// Read every page of a collection, flattened in listing order
    async fn read_all_pages(&self, resource: Resource) -> Result<Vec<serde_json::Value>, NsxError>;

    /// Write-shape skeleton for a resource/operation pair
    async fn schema_template(&self, resource: Resource, operation: Operation) -> Result<serde_json::Value, NsxError>;

    /// Create an object in a collection
    async fn create(&self, resource: Resource, body: &serde_json::Value) -> Result<CreatedResource, NsxError>;

    /// Replace a document
    async fn update(&self, resource: Resource, uri_params: &[(&str, &str)], body: &serde_json::Value) -> Result<(), NsxError>;

    /// Delete an object
    async fn delete(&self, resource: Resource, uri_params: &[(&str, &str)]) -> Result<(), NsxError>;
}
