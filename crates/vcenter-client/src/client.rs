//! vSphere Automation REST API client

use crate::error::VCenterError;
use crate::models::*;
use crate::session::{InventoryConnector, InventorySession};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const SESSION_HEADER: &str = "vmware-api-session-id";

/// Connection parameters for a vCenter Server
pub struct VCenterConnector {
    base_url: String,
    username: String,
    password: String,
    accept_invalid_certs: bool,
}

impl VCenterConnector {
    /// Create a new connector
    ///
    /// # Arguments
    /// * `host` - vCenter host name or address
    /// * `username` - SSO user (e.g. "administrator@vsphere.local")
    /// * `password` - SSO password
    /// * `port` - HTTPS port, usually 443
    /// * `accept_invalid_certs` - Skip TLS verification (self-signed vCenter certificates)
    pub fn new(host: &str, username: String, password: String, port: u16, accept_invalid_certs: bool) -> Self {
        Self {
            base_url: format!("https://{}:{}", host.trim_end_matches('/'), port),
            username,
            password,
            accept_invalid_certs,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl InventoryConnector for VCenterConnector {
    async fn connect(&self) -> Result<Box<dyn InventorySession>, VCenterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;

        let url = format!("{}/api/session", self.base_url);
        debug!("POST {}", url);

        let response = client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(VCenterError::Authentication(format!("{} - {}", status, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VCenterError::Api(format!(
                "Failed to create session: {} - {}",
                status, body
            )));
        }

        // The session id comes back as a bare JSON string
        let token: String = response.json().await?;
        debug!("vCenter session established");

        Ok(Box::new(VCenterSession {
            client,
            base_url: self.base_url.clone(),
            token,
        }))
    }
}

/// An authenticated vCenter session
pub struct VCenterSession {
    client: Client,
    base_url: String,
    token: String,
}

impl VCenterSession {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, VCenterError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .header(SESSION_HEADER, &self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(VCenterError::NotFound(format!("{} - {}", path, body)));
        }
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(VCenterError::Authentication(format!("{} - {}", path, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VCenterError::Api(format!(
                "GET {} failed: {} - {}",
                path, status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn list<S>(&self, path: &str, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError>
    where
        S: DeserializeOwned + Into<InventoryObject>,
    {
        let path = format!("{}?datacenters={}", path, urlencoding::encode(datacenter_id));
        let summaries: Vec<S> = self.get(&path).await?;
        Ok(summaries.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl InventorySession for VCenterSession {
    async fn datacenters(&self) -> Result<Vec<InventoryObject>, VCenterError> {
        let summaries: Vec<DatacenterSummary> = self.get("/api/vcenter/datacenter").await?;
        Ok(summaries.into_iter().map(Into::into).collect())
    }

    async fn datastores(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError> {
        self.list::<DatastoreSummary>("/api/vcenter/datastore", datacenter_id).await
    }

    async fn clusters(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError> {
        self.list::<ClusterSummary>("/api/vcenter/cluster", datacenter_id).await
    }

    async fn cluster_resource_pool(&self, cluster_id: &str) -> Result<String, VCenterError> {
        let path = format!("/api/vcenter/cluster/{}", urlencoding::encode(cluster_id));
        let info: ClusterInfo = self.get(&path).await?;
        Ok(info.resource_pool)
    }

    async fn networks(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError> {
        self.list::<NetworkSummary>("/api/vcenter/network", datacenter_id).await
    }

    async fn disconnect(&self) -> Result<(), VCenterError> {
        let url = format!("{}/api/session", self.base_url);
        debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .header(SESSION_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VCenterError::Api(format!(
                "Failed to delete session: {} - {}",
                status, body
            )));
        }

        Ok(())
    }
}
