//! Session traits for mocking
//!
//! `InventoryConnector` opens sessions, `InventorySession` walks the
//! inventory. Both are object safe so callers can hold `Arc<dyn InventoryConnector>`
//! and tests can substitute `MockInventory`.

use crate::error::VCenterError;
use crate::models::InventoryObject;

/// Opens authenticated inventory sessions
#[async_trait::async_trait]
pub trait InventoryConnector: Send + Sync {
    /// Log in and return a fresh session; the caller must disconnect it
    async fn connect(&self) -> Result<Box<dyn InventorySession>, VCenterError>;
}

/// An authenticated inventory session
///
/// Listings are returned in the order vCenter reports them.
#[async_trait::async_trait]
pub trait InventorySession: Send + Sync {
    /// All datacenters
    async fn datacenters(&self) -> Result<Vec<InventoryObject>, VCenterError>;
    /// Datastores of a datacenter
    async fn datastores(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError>;
    /// Clusters of a datacenter
    async fn clusters(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError>;
    /// Root resource pool id of a cluster
    async fn cluster_resource_pool(&self, cluster_id: &str) -> Result<String, VCenterError>;
    /// Networks (port groups) of a datacenter
    async fn networks(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError>;
    /// Log out; the session must not be used afterwards
    async fn disconnect(&self) -> Result<(), VCenterError>;
}
