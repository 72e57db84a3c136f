//! Edge and routing documents.
//!
//! Every optional field is omitted from the serialized document when unset,
//! so pruning a section means setting it to `None`.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Edge document, in both its template (read) and create (write) shapes
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDocument {
    pub datacenter_moid: Option<String>,
    #[serde(rename = "type")]
    pub edge_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub enable_aesni: Option<bool>,
    pub enable_fips: Option<bool>,
    pub vse_log_level: Option<String>,
    pub appliances: Option<Appliances>,
    pub cli_settings: Option<CliSettings>,
    pub auto_configuration: Option<serde_json::Value>,
    pub mgmt_interface: Option<MgmtInterface>,
    pub interfaces: Option<Interfaces>,
    /// Read shape only
    pub vnics: Option<serde_json::Value>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliances {
    pub appliance_size: Option<String>,
    pub deploy_appliances: Option<bool>,
    #[serde(default)]
    pub appliances: Vec<Appliance>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliance {
    pub resource_pool_id: Option<String>,
    pub datastore_id: Option<String>,
    /// Read shape only
    pub host_id: Option<String>,
    /// Read shape only
    pub custom_field: Option<serde_json::Value>,
    pub cpu_reservation: Option<serde_json::Value>,
    pub memory_reservation: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliSettings {
    pub user_name: String,
    pub password: String,
    pub remote_access: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MgmtInterface {
    pub connected_to_id: Option<String>,
    pub address_groups: Option<AddressGroups>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interfaces {
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub interface_type: Option<String>,
    pub mtu: Option<u32>,
    pub is_connected: Option<bool>,
    pub connected_to_id: Option<String>,
    pub address_groups: Option<AddressGroups>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressGroups {
    #[serde(default)]
    pub address_groups: Vec<AddressGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressGroup {
    pub primary_address: String,
    pub subnet_mask: String,
}

/// Routing configuration of an edge.
///
/// NSX replaces the whole document on update, so any section left `Some`
/// overwrites what the edge currently has.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDocument {
    pub routing_global_config: Option<serde_json::Value>,
    pub static_routing: Option<StaticRouting>,
    pub ospf: Option<serde_json::Value>,
    pub isis: Option<serde_json::Value>,
    pub bgp: Option<serde_json::Value>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticRouting {
    pub static_routes: Option<serde_json::Value>,
    pub default_route: Option<DefaultRoute>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultRoute {
    pub gateway_address: String,
    pub vnic: Option<String>,
    pub mtu: Option<u32>,
    pub admin_distance: Option<u32>,
    pub description: Option<String>,
}

/// A routing document bound to the edge it is submitted to
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingUpdate {
    pub edge_id: String,
    pub document: RoutingDocument,
}
