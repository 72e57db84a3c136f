//! NSX API models
//!
//! These models match the JSON representation of the NSX for vSphere API.
//! Only the fields this workspace reads are modelled; full documents travel as
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};

/// Edge type reported for distributed logical routers
pub const EDGE_TYPE_DISTRIBUTED_ROUTER: &str = "distributedRouter";

/// Edge type reported for services gateways
pub const EDGE_TYPE_GATEWAY_SERVICES: &str = "gatewayServices";

/// Paging metadata returned with every collection page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    #[serde(default)]
    pub page_size: u64,
    #[serde(default)]
    pub start_index: u64,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order_ascending: Option<bool>,
}

/// One page of a collection (`edgePage` / `dataPage` envelope contents)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedData {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub paging_info: PagingInfo,
}

/// Result of a successful create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResource {
    /// Identifier assigned by NSX Manager (e.g. `edge-12`)
    pub object_id: String,
    /// Value of the `Location` response header
    pub location: String,
}

impl CreatedResource {
    /// Build from a `Location` header; the object id is its last path segment.
    pub fn from_location(location: &str) -> Option<Self> {
        let object_id = location.trim_end_matches('/').rsplit('/').next()?;
        if object_id.is_empty() {
            return None;
        }
        Some(Self {
            object_id: object_id.to_string(),
            location: location.to_string(),
        })
    }
}

/// Edge as it appears in the `nsxEdges` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSummary {
    pub object_id: String,
    pub name: String,
    /// `distributedRouter` or `gatewayServices`
    #[serde(default)]
    pub edge_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_moid: Option<String>,
}

impl EdgeSummary {
    pub fn is_distributed_router(&self) -> bool {
        self.edge_type == EDGE_TYPE_DISTRIBUTED_ROUTER
    }
}

/// Logical switch (virtual wire) as it appears in the global listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalSwitch {
    pub object_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdn_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}
