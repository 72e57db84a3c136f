//! Mock inventory for unit testing
//!
//! `MockInventory` implements [`InventoryConnector`] over an in-memory
//! inventory tree and counts connects and disconnects so tests can verify that
//! every session opened is also released.

use crate::error::VCenterError;
use crate::models::InventoryObject;
use crate::session::{InventoryConnector, InventorySession};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct MockDatacenter {
    object: InventoryObject,
    datastores: Vec<InventoryObject>,
    clusters: Vec<(InventoryObject, String)>,
    networks: Vec<InventoryObject>,
}

/// Inventory call that can be made to fail
///
/// A failed call behaves like vCenter dropping the session mid-walk (401).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Login is refused
    Connect,
    /// Datacenter listing
    Datacenters,
    /// Datastore listing
    Datastores,
    /// Cluster listing
    Clusters,
    /// Cluster detail (resource pool)
    ResourcePool,
    /// Network listing
    Networks,
}

/// Mock vCenter for testing
#[derive(Debug, Clone, Default)]
pub struct MockInventory {
    datacenters: Arc<Mutex<Vec<MockDatacenter>>>,
    failure: Arc<Mutex<Option<MockFailure>>>,
    connects: Arc<AtomicUsize>,
    disconnects: Arc<AtomicUsize>,
    next_id: Arc<AtomicUsize>,
}

impl MockInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn with_datacenter<R>(&self, datacenter: &str, f: impl FnOnce(&mut MockDatacenter) -> R) -> R {
        let mut datacenters = self.datacenters.lock().unwrap();
        let dc = datacenters
            .iter_mut()
            .find(|dc| dc.object.name == datacenter)
            .unwrap_or_else(|| panic!("mock datacenter {} not registered", datacenter));
        f(dc)
    }

    /// Add a datacenter (for test setup); returns its id
    pub fn add_datacenter(&self, name: &str) -> String {
        let id = self.next_id("datacenter");
        self.datacenters.lock().unwrap().push(MockDatacenter {
            object: InventoryObject::new(id.clone(), name),
            datastores: Vec::new(),
            clusters: Vec::new(),
            networks: Vec::new(),
        });
        id
    }

    /// Add a datastore to the first datacenter named `datacenter`; returns its id
    pub fn add_datastore(&self, datacenter: &str, name: &str) -> String {
        let id = self.next_id("datastore");
        self.with_datacenter(datacenter, |dc| dc.datastores.push(InventoryObject::new(id.clone(), name)));
        id
    }

    /// Add a cluster; returns `(cluster id, root resource pool id)`
    pub fn add_cluster(&self, datacenter: &str, name: &str) -> (String, String) {
        let id = self.next_id("domain-c");
        let pool = self.next_id("resgroup");
        self.with_datacenter(datacenter, |dc| {
            dc.clusters.push((InventoryObject::new(id.clone(), name), pool.clone()))
        });
        (id, pool)
    }

    /// Add a network (port group); returns its id
    pub fn add_network(&self, datacenter: &str, name: &str) -> String {
        let id = self.next_id("dvportgroup");
        self.with_datacenter(datacenter, |dc| dc.networks.push(InventoryObject::new(id.clone(), name)));
        id
    }

    /// Report an empty root resource pool for a cluster (for test setup)
    pub fn clear_resource_pool(&self, cluster_id: &str) {
        for dc in self.datacenters.lock().unwrap().iter_mut() {
            for (cluster, pool) in dc.clusters.iter_mut() {
                if cluster.id == cluster_id {
                    pool.clear();
                }
            }
        }
    }

    /// Make the given call fail from now on
    pub fn fail(&self, failure: MockFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    /// Sessions opened so far
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Sessions released so far
    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    fn check(&self, call: MockFailure) -> Result<(), VCenterError> {
        if *self.failure.lock().unwrap() == Some(call) {
            return Err(VCenterError::Authentication(format!("injected failure on {:?}", call)));
        }
        Ok(())
    }

    fn datacenter_by_id(&self, id: &str) -> Result<MockDatacenter, VCenterError> {
        self.datacenters
            .lock()
            .unwrap()
            .iter()
            .find(|dc| dc.object.id == id)
            .cloned()
            .ok_or_else(|| VCenterError::NotFound(format!("datacenter {}", id)))
    }
}

#[async_trait::async_trait]
impl InventoryConnector for MockInventory {
    async fn connect(&self) -> Result<Box<dyn InventorySession>, VCenterError> {
        if *self.failure.lock().unwrap() == Some(MockFailure::Connect) {
            return Err(VCenterError::Authentication("injected failure on Connect".to_string()));
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession { inventory: self.clone() }))
    }
}

struct MockSession {
    inventory: MockInventory,
}

#[async_trait::async_trait]
impl InventorySession for MockSession {
    async fn datacenters(&self) -> Result<Vec<InventoryObject>, VCenterError> {
        self.inventory.check(MockFailure::Datacenters)?;
        Ok(self.inventory.datacenters.lock().unwrap().iter().map(|dc| dc.object.clone()).collect())
    }

    async fn datastores(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError> {
        self.inventory.check(MockFailure::Datastores)?;
        Ok(self.inventory.datacenter_by_id(datacenter_id)?.datastores)
    }

    async fn clusters(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError> {
        self.inventory.check(MockFailure::Clusters)?;
        let dc = self.inventory.datacenter_by_id(datacenter_id)?;
        Ok(dc.clusters.into_iter().map(|(cluster, _)| cluster).collect())
    }

    async fn cluster_resource_pool(&self, cluster_id: &str) -> Result<String, VCenterError> {
        self.inventory.check(MockFailure::ResourcePool)?;
        self.inventory
            .datacenters
            .lock()
            .unwrap()
            .iter()
            .flat_map(|dc| dc.clusters.iter())
            .find(|(cluster, _)| cluster.id == cluster_id)
            .map(|(_, pool)| pool.clone())
            .ok_or_else(|| VCenterError::NotFound(format!("cluster {}", cluster_id)))
    }

    async fn networks(&self, datacenter_id: &str) -> Result<Vec<InventoryObject>, VCenterError> {
        self.inventory.check(MockFailure::Networks)?;
        Ok(self.inventory.datacenter_by_id(datacenter_id)?.networks)
    }

    async fn disconnect(&self) -> Result<(), VCenterError> {
        self.inventory.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_inventory_walk() {
        let mock = MockInventory::new();
        let dc = mock.add_datacenter("DC1");
        let ds = mock.add_datastore("DC1", "ds-edge");
        let (cluster, pool) = mock.add_cluster("DC1", "edge-cluster");

        let session = mock.connect().await.unwrap();
        assert_eq!(session.datacenters().await.unwrap()[0].id, dc);
        assert_eq!(session.datastores(&dc).await.unwrap()[0].id, ds);
        assert_eq!(session.clusters(&dc).await.unwrap()[0].id, cluster);
        assert_eq!(session.cluster_resource_pool(&cluster).await.unwrap(), pool);
        session.disconnect().await.unwrap();

        assert_eq!(mock.connect_count(), 1);
        assert_eq!(mock.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_injected_failure() {
        let mock = MockInventory::new();
        mock.add_datacenter("DC1");
        mock.fail(MockFailure::Datacenters);

        let session = mock.connect().await.unwrap();
        assert!(matches!(session.datacenters().await, Err(VCenterError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_mock_cleared_resource_pool() {
        let mock = MockInventory::new();
        mock.add_datacenter("DC1");
        let (cluster, _) = mock.add_cluster("DC1", "edge-cluster");
        mock.clear_resource_pool(&cluster);

        let session = mock.connect().await.unwrap();
        assert_eq!(session.cluster_resource_pool(&cluster).await.unwrap(), "");
    }
}
