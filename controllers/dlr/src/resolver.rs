//! Name resolution against vCenter and NSX.
//!
//! Placement (datacenter, datastore, resource pool) is resolved in vCenter.
//! Segments are looked up with an ordered list of strategies: vCenter port
//! groups first, then NSX logical switches. On every level the first object
//! whose name matches exactly wins, in listing order; duplicates are neither
//! reported nor rejected.
//!
//! Each lookup opens its own vCenter session and releases it before
//! returning, whatever the outcome.

use crate::error::{DlrError, LookupKind};
use crate::model::{PlacementReference, SegmentKind, SegmentReference};
use nsx_client::{LogicalSwitch, NsxClientTrait, Resource};
use std::sync::Arc;
use tracing::{debug, warn};
use vcenter_client::{InventoryConnector, InventoryObject, InventorySession};

/// Segment lookup strategies, in the order they are tried.
///
/// A port group and a logical switch with the same name resolve to the port
/// group.
pub const SEGMENT_LOOKUP_ORDER: [SegmentKind; 2] = [SegmentKind::PortGroup, SegmentKind::LogicalSwitch];

/// First item whose name equals `name`, in iteration order.
pub fn first_named<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    name: &str,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T>
where
    T: 'a,
{
    items.into_iter().find(|item| name_of(item) == name)
}

fn object_named<'a>(objects: &'a [InventoryObject], name: &str) -> Option<&'a InventoryObject> {
    first_named(objects, name, |o| o.name.as_str())
}

/// Resolves names to vCenter and NSX identifiers
pub struct InventoryResolver {
    inventory: Arc<dyn InventoryConnector>,
    nsx: Arc<dyn NsxClientTrait>,
}

impl InventoryResolver {
    /// Create a resolver over a vCenter connector and an NSX client
    pub fn new(inventory: Arc<dyn InventoryConnector>, nsx: Arc<dyn NsxClientTrait>) -> Self {
        Self { inventory, nsx }
    }

    /// Resolve the datacenter, datastore and cluster resource pool ids.
    ///
    /// Fails with `NotFound` naming the first level that had no match.
    pub async fn resolve_placement(
        &self,
        datacenter: &str,
        datastore: &str,
        cluster: &str,
    ) -> Result<PlacementReference, DlrError> {
        let session = self.inventory.connect().await?;
        let outcome = walk_placement(session.as_ref(), datacenter, datastore, cluster).await;
        release(session).await;

        let placement = outcome?;
        debug!(
            "Resolved placement {}/{}/{} to {:?}",
            datacenter, datastore, cluster, placement
        );
        Ok(placement)
    }

    /// Resolve a segment name within `datacenter`, trying each strategy of
    /// [`SEGMENT_LOOKUP_ORDER`] in turn.
    pub async fn resolve_segment(&self, datacenter: &str, name: &str) -> Result<SegmentReference, DlrError> {
        for kind in SEGMENT_LOOKUP_ORDER {
            let found = match kind {
                SegmentKind::PortGroup => self.find_port_group(datacenter, name).await?,
                SegmentKind::LogicalSwitch => self.find_logical_switch(name).await?,
            };

            if let Some(id) = found {
                debug!("Resolved segment {} to {} {}", name, kind, id);
                return Ok(SegmentReference { id, kind });
            }
            debug!("Segment {} is not a {}", name, kind);
        }

        Err(DlrError::not_found(LookupKind::Segment, name))
    }

    async fn find_port_group(&self, datacenter: &str, name: &str) -> Result<Option<String>, DlrError> {
        let session = self.inventory.connect().await?;
        let outcome = walk_networks(session.as_ref(), datacenter, name).await;
        release(session).await;
        outcome
    }

    async fn find_logical_switch(&self, name: &str) -> Result<Option<String>, DlrError> {
        let records = self.nsx.read_all_pages(Resource::LogicalSwitchesGlobal).await?;
        let switches = records
            .into_iter()
            .map(serde_json::from_value::<LogicalSwitch>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(first_named(&switches, name, |s| s.name.as_str()).map(|s| s.object_id.clone()))
    }
}

async fn release(session: Box<dyn InventorySession>) {
    if let Err(e) = session.disconnect().await {
        warn!("Failed to release vCenter session: {}", e);
    }
}

async fn find_datacenter(session: &dyn InventorySession, datacenter: &str) -> Result<Option<InventoryObject>, DlrError> {
    let datacenters = session.datacenters().await?;
    Ok(object_named(&datacenters, datacenter).cloned())
}

async fn walk_placement(
    session: &dyn InventorySession,
    datacenter: &str,
    datastore: &str,
    cluster: &str,
) -> Result<PlacementReference, DlrError> {
    let dc = find_datacenter(session, datacenter)
        .await?
        .ok_or_else(|| DlrError::not_found(LookupKind::Datacenter, datacenter))?;

    let datastores = session.datastores(&dc.id).await?;
    let ds = object_named(&datastores, datastore)
        .ok_or_else(|| DlrError::not_found(LookupKind::Datastore, datastore))?;

    let clusters = session.clusters(&dc.id).await?;
    let cl = object_named(&clusters, cluster)
        .ok_or_else(|| DlrError::not_found(LookupKind::Cluster, cluster))?;

    let resource_pool_id = session.cluster_resource_pool(&cl.id).await?;
    if resource_pool_id.is_empty() {
        return Err(DlrError::not_found(LookupKind::ResourcePool, cluster));
    }

    Ok(PlacementReference {
        datacenter_id: dc.id,
        datastore_id: ds.id.clone(),
        resource_pool_id,
    })
}

async fn walk_networks(session: &dyn InventorySession, datacenter: &str, name: &str) -> Result<Option<String>, DlrError> {
    let Some(dc) = find_datacenter(session, datacenter).await? else {
        debug!("Datacenter {} not found while looking up port group {}", datacenter, name);
        return Ok(None);
    };

    let networks = session.networks(&dc.id).await?;
    Ok(object_named(&networks, name).map(|n| n.id.clone()))
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;
