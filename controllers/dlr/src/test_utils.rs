//! Test utilities for unit testing the resolver and lifecycle manager
//!
//! Builds a small vCenter inventory and an empty NSX Manager:
//! datacenter `DC1` with datastore `ds-edge`, cluster `edge-cluster`, port
//! group `transit-ha`, and an NSX logical switch `transit-uplink`.

use crate::lifecycle::RouterLifecycleManager;
use crate::model::{ApplianceSize, PlacementTarget, RouterSpec};
use crate::resolver::InventoryResolver;
use nsx_client::MockNsxClient;
use std::sync::Arc;
use vcenter_client::MockInventory;

pub struct Fixture {
    pub nsx: MockNsxClient,
    pub inventory: MockInventory,
    pub datacenter_id: String,
    pub datastore_id: String,
    pub cluster_id: String,
    pub resource_pool_id: String,
    pub ha_port_group_id: String,
    pub uplink_switch_id: String,
}

impl Fixture {
    pub fn new() -> Self {
        let nsx = MockNsxClient::new("https://nsx.test");
        let inventory = MockInventory::new();

        let datacenter_id = inventory.add_datacenter("DC1");
        let datastore_id = inventory.add_datastore("DC1", "ds-edge");
        let (cluster_id, resource_pool_id) = inventory.add_cluster("DC1", "edge-cluster");
        let ha_port_group_id = inventory.add_network("DC1", "transit-ha");
        let uplink_switch_id = nsx.add_logical_switch("transit-uplink");

        Self {
            nsx,
            inventory,
            datacenter_id,
            datastore_id,
            cluster_id,
            resource_pool_id,
            ha_port_group_id,
            uplink_switch_id,
        }
    }

    pub fn resolver(&self) -> InventoryResolver {
        InventoryResolver::new(Arc::new(self.inventory.clone()), Arc::new(self.nsx.clone()))
    }

    pub fn manager(&self) -> RouterLifecycleManager {
        RouterLifecycleManager::new(
            Arc::new(self.nsx.clone()),
            Arc::new(self.inventory.clone()),
            placement_target(),
        )
    }
}

pub fn placement_target() -> PlacementTarget {
    PlacementTarget {
        datacenter: "DC1".to_string(),
        datastore: "ds-edge".to_string(),
        cluster: "edge-cluster".to_string(),
    }
}

/// Router spec using the fixture's segments
pub fn router_spec(name: &str, default_gateway: Option<&str>) -> RouterSpec {
    RouterSpec {
        name: name.to_string(),
        admin_password: "VMware1!VMware1!".to_string(),
        size: ApplianceSize::Compact,
        ha_segment: "transit-ha".to_string(),
        uplink_segment: "transit-uplink".to_string(),
        uplink_ip: "172.16.2.2".parse().unwrap(),
        uplink_subnet: "255.255.255.0".parse().unwrap(),
        default_gateway: default_gateway.map(|gw| gw.parse().unwrap()),
    }
}
