//! Router inputs and resolved references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Control appliance size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplianceSize {
    /// Default size, enough for most routers
    #[default]
    Compact,
    /// Large appliance
    Large,
    /// Quad large appliance
    QuadLarge,
    /// Extra large appliance
    XLarge,
}

impl fmt::Display for ApplianceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApplianceSize::Compact => "compact",
            ApplianceSize::Large => "large",
            ApplianceSize::QuadLarge => "quadlarge",
            ApplianceSize::XLarge => "xlarge",
        };
        f.write_str(name)
    }
}

impl FromStr for ApplianceSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(ApplianceSize::Compact),
            "large" => Ok(ApplianceSize::Large),
            "quadlarge" => Ok(ApplianceSize::QuadLarge),
            "xlarge" => Ok(ApplianceSize::XLarge),
            other => Err(format!(
                "unknown appliance size '{}' (expected compact, large, quadlarge or xlarge)",
                other
            )),
        }
    }
}

/// Everything needed to create one distributed router
#[derive(Debug, Clone)]
pub struct RouterSpec {
    /// Router (edge) name, matched exactly on read and delete
    pub name: String,
    /// Password of the `admin` CLI user
    pub admin_password: String,
    /// Control appliance size
    pub size: ApplianceSize,
    /// Port group or logical switch carrying the HA / management interface
    pub ha_segment: String,
    /// Port group or logical switch for the uplink interface
    pub uplink_segment: String,
    /// Primary address of the uplink interface
    pub uplink_ip: Ipv4Addr,
    /// Subnet mask of the uplink interface
    pub uplink_subnet: Ipv4Addr,
    /// When set, a default route is configured after creation
    pub default_gateway: Option<Ipv4Addr>,
}

/// Names of the vCenter objects hosting the control appliance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementTarget {
    /// Datacenter name
    pub datacenter: String,
    /// Datastore name within the datacenter
    pub datastore: String,
    /// Cluster name; its root resource pool hosts the appliance
    pub cluster: String,
}

/// Resolved placement ids; never cached beyond one create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReference {
    /// Datacenter managed object id (`datacenterMoid`)
    pub datacenter_id: String,
    /// Datastore managed object id
    pub datastore_id: String,
    /// Root resource pool of the cluster
    pub resource_pool_id: String,
}

/// Where a segment name was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// vCenter network in the datacenter (distributed port group)
    PortGroup,
    /// NSX overlay logical switch
    LogicalSwitch,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::PortGroup => f.write_str("port group"),
            SegmentKind::LogicalSwitch => f.write_str("logical switch"),
        }
    }
}

/// A resolved segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentReference {
    /// Port group or virtual wire id, used as `connectedToId`
    pub id: String,
    /// Which lookup found it
    pub kind: SegmentKind,
}
