//! NSX Manager API client
//!
//! Implements the generic NSX REST client over reqwest.
//! Based on the NSX for vSphere API structure: /api/4.0/edges and /api/2.0/vdn/.

use crate::common::{paging, HttpClient};
use crate::error::NsxError;
use crate::models::CreatedResource;
use crate::nsx_trait::NsxClientTrait;
use crate::resource::{Operation, Resource};
use crate::schema;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// NSX Manager API client
pub struct NsxClient {
    http: HttpClient,
}

impl NsxClient {
    /// Create a new NSX client
    ///
    /// # Arguments
    /// * `base_url` - NSX Manager base URL (e.g., "https://nsxmanager.lab.local")
    /// * `username` - API user
    /// * `password` - API password
    /// * `accept_invalid_certs` - Skip TLS verification (self-signed manager certificates)
    pub fn new(
        base_url: String,
        username: String,
        password: String,
        accept_invalid_certs: bool,
    ) -> Result<Self, NsxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(NsxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, username, password),
        })
    }
}

#[async_trait::async_trait]
impl NsxClientTrait for NsxClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn read(&self, resource: Resource, uri_params: &[(&str, &str)]) -> Result<serde_json::Value, NsxError> {
        let path = resource.expand_uri(uri_params)?;
        debug!("Reading {} from NSX", resource);
        self.http.get(&path).await
    }

    async fn read_all_pages(&self, resource: Resource) -> Result<Vec<serde_json::Value>, NsxError> {
        debug!("Reading all pages of {} from NSX", resource);
        paging::fetch_all_pages(&self.http, resource).await
    }

    async fn schema_template(&self, resource: Resource, operation: Operation) -> Result<serde_json::Value, NsxError> {
        schema::template(resource, operation)
    }

    async fn create(&self, resource: Resource, body: &serde_json::Value) -> Result<CreatedResource, NsxError> {
        let path = resource.expand_uri(&[])?;
        let location = self.http.post_for_location(&path, body).await?;
        debug!("Created {} at {}", resource, location);

        CreatedResource::from_location(&location).ok_or_else(|| {
            NsxError::UnexpectedResponse(format!("cannot derive object id from Location '{}'", location))
        })
    }

    async fn update(&self, resource: Resource, uri_params: &[(&str, &str)], body: &serde_json::Value) -> Result<(), NsxError> {
        let path = resource.expand_uri(uri_params)?;
        self.http.put(&path, body).await
    }

    async fn delete(&self, resource: Resource, uri_params: &[(&str, &str)]) -> Result<(), NsxError> {
        let path = resource.expand_uri(uri_params)?;
        self.http.delete(&path).await
    }
}
