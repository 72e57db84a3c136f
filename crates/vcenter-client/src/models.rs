//! vSphere Automation API models
//!
//! Summaries returned by the `/api/vcenter` list endpoints. Every inventory
//! object carries an opaque managed object id and a display name; the rest of
//! the workspace only sees [`InventoryObject`].

use serde::{Deserialize, Serialize};

/// Opaque platform identifier paired with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryObject {
    /// Managed object id, e.g. `datacenter-2`
    pub id: String,
    /// Display name
    pub name: String,
}

impl InventoryObject {
    /// Pair an id with its display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Entry of `GET /api/vcenter/datacenter`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatacenterSummary {
    pub datacenter: String,
    pub name: String,
}

/// Entry of `GET /api/vcenter/datastore`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreSummary {
    pub datastore: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub datastore_type: Option<String>,
}

/// Entry of `GET /api/vcenter/cluster`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster: String,
    pub name: String,
}

/// Detail of a single cluster (`GET /api/vcenter/cluster/{cluster}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub name: String,
    pub resource_pool: String,
}

/// Entry of `GET /api/vcenter/network`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub network: String,
    pub name: String,
    /// `DISTRIBUTED_PORTGROUP`, `STANDARD_PORTGROUP` or `OPAQUE_NETWORK`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
}

impl From<DatacenterSummary> for InventoryObject {
    fn from(s: DatacenterSummary) -> Self {
        Self::new(s.datacenter, s.name)
    }
}

impl From<DatastoreSummary> for InventoryObject {
    fn from(s: DatastoreSummary) -> Self {
        Self::new(s.datastore, s.name)
    }
}

impl From<ClusterSummary> for InventoryObject {
    fn from(s: ClusterSummary) -> Self {
        Self::new(s.cluster, s.name)
    }
}

impl From<NetworkSummary> for InventoryObject {
    fn from(s: NetworkSummary) -> Self {
        Self::new(s.network, s.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_summary_decodes() {
        let value = serde_json::json!({
            "network": "dvportgroup-41",
            "name": "transit-ha",
            "type": "DISTRIBUTED_PORTGROUP"
        });
        let summary: NetworkSummary = serde_json::from_value(value).unwrap();
        assert_eq!(summary.network_type.as_deref(), Some("DISTRIBUTED_PORTGROUP"));
        assert_eq!(InventoryObject::from(summary), InventoryObject::new("dvportgroup-41", "transit-ha"));
    }

    #[test]
    fn test_cluster_info_decodes() {
        let value = serde_json::json!({"name": "edge-cluster", "resource_pool": "resgroup-9"});
        let info: ClusterInfo = serde_json::from_value(value).unwrap();
        assert_eq!(info.resource_pool, "resgroup-9");
    }
}
