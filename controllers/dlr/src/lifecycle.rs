//! Router lifecycle orchestration.
//!
//! Each operation is self-contained: nothing is cached between calls, and
//! every read or list fetches the edge listing from NSX Manager again.

use crate::error::{DlrError, LookupKind};
use crate::model::{PlacementTarget, RouterSpec};
use crate::resolver::{first_named, InventoryResolver};
use crate::template::TemplateBuilder;
use nsx_client::{EdgeSummary, NsxClientTrait, Resource};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vcenter_client::InventoryConnector;

/// Outcome of the default route step of a create
#[derive(Debug)]
pub enum DefaultRouteStatus {
    /// The spec had no default gateway; no routing call was made
    NotRequested,
    /// The routing update was accepted
    Applied,
    /// The router exists but its routing update was refused
    Failed(DlrError),
}

/// A router created by [`RouterLifecycleManager::create`]
#[derive(Debug)]
pub struct CreatedRouter {
    /// Edge id assigned by NSX Manager
    pub id: String,
    /// `Location` returned by the create call
    pub location: String,
    /// Outcome of the default route step
    pub default_route: DefaultRouteStatus,
}

impl CreatedRouter {
    /// The router exists but its default route could not be applied
    pub fn is_partial(&self) -> bool {
        matches!(self.default_route, DefaultRouteStatus::Failed(_))
    }
}

/// A router found by name, with its full edge document
#[derive(Debug, Clone)]
pub struct RouterRecord {
    /// Edge id
    pub id: String,
    /// Full edge document, routing features included
    pub detail: serde_json::Value,
}

/// Distributed routers in NSX listing order
#[derive(Debug, Clone, Default)]
pub struct RouterListing {
    /// `(name, id)` pairs
    pub routers: Vec<(String, String)>,
    /// Listing records, in the same order as `routers`
    pub details: Vec<serde_json::Value>,
}

/// Creates, reads, deletes and lists distributed logical routers
pub struct RouterLifecycleManager {
    nsx: Arc<dyn NsxClientTrait>,
    resolver: InventoryResolver,
    templates: TemplateBuilder,
    placement: PlacementTarget,
}

impl RouterLifecycleManager {
    /// Create a manager deploying control appliances to `placement`
    pub fn new(
        nsx: Arc<dyn NsxClientTrait>,
        inventory: Arc<dyn InventoryConnector>,
        placement: PlacementTarget,
    ) -> Self {
        Self {
            resolver: InventoryResolver::new(inventory, nsx.clone()),
            templates: TemplateBuilder::new(nsx.clone()),
            nsx,
            placement,
        }
    }

    /// Create a router, then apply its default route if one was requested.
    ///
    /// Lookups and the create call are fatal. A refused routing update is not:
    /// the router is returned with [`DefaultRouteStatus::Failed`].
    pub async fn create(&self, spec: &RouterSpec) -> Result<CreatedRouter, DlrError> {
        info!("Creating distributed router {}", spec.name);

        let target = &self.placement;
        let placement = self
            .resolver
            .resolve_placement(&target.datacenter, &target.datastore, &target.cluster)
            .await?;
        let ha_segment = self
            .resolver
            .resolve_segment(&target.datacenter, &spec.ha_segment)
            .await
            .map_err(|e| e.for_segment_role(LookupKind::HaSegment))?;
        let uplink_segment = self
            .resolver
            .resolve_segment(&target.datacenter, &spec.uplink_segment)
            .await
            .map_err(|e| e.for_segment_role(LookupKind::UplinkSegment))?;

        let template = self.templates.new_creation_template(Resource::NsxEdges).await?;
        let payload = TemplateBuilder::apply_router_spec(template, spec, &placement, &ha_segment, &uplink_segment);
        let body = serde_json::to_value(&payload)?;

        let created = self.nsx.create(Resource::NsxEdges, &body).await?;
        info!("Created distributed router {} as {}", spec.name, created.object_id);

        let default_route = match spec.default_gateway {
            None => DefaultRouteStatus::NotRequested,
            Some(gateway) => match self.apply_default_route(&created.object_id, gateway).await {
                Ok(()) => {
                    info!("Applied default route {} to {}", gateway, created.object_id);
                    DefaultRouteStatus::Applied
                }
                Err(e) => {
                    warn!(
                        "Router {} was created but its default route was not applied: {}",
                        created.object_id, e
                    );
                    DefaultRouteStatus::Failed(e)
                }
            },
        };

        Ok(CreatedRouter {
            id: created.object_id,
            location: created.location,
            default_route,
        })
    }

    /// Find a router by name and fetch its full edge document.
    ///
    /// `Ok(None)` means no distributed router has that name.
    pub async fn read(&self, name: &str) -> Result<Option<RouterRecord>, DlrError> {
        let Some(summary) = self.find(name).await? else {
            debug!("Distributed router {} not found", name);
            return Ok(None);
        };

        let detail = self
            .nsx
            .read(Resource::NsxEdge, &[("edgeId", summary.object_id.as_str())])
            .await?;

        Ok(Some(RouterRecord {
            id: summary.object_id,
            detail,
        }))
    }

    /// Delete a router by name, returning its id.
    ///
    /// An absent router is not an error: `Ok(None)` is returned and no
    /// delete request is sent.
    pub async fn delete(&self, name: &str) -> Result<Option<String>, DlrError> {
        let Some(summary) = self.find(name).await? else {
            info!("Distributed router {} does not exist, nothing to delete", name);
            return Ok(None);
        };

        self.nsx
            .delete(Resource::NsxEdge, &[("edgeId", summary.object_id.as_str())])
            .await?;
        info!("Deleted distributed router {} ({})", name, summary.object_id);

        Ok(Some(summary.object_id))
    }

    /// All distributed routers; other edge types are left out.
    pub async fn list(&self) -> Result<RouterListing, DlrError> {
        let mut listing = RouterListing::default();

        for record in self.nsx.read_all_pages(Resource::NsxEdges).await? {
            let summary: EdgeSummary = serde_json::from_value(record.clone())?;
            if !summary.is_distributed_router() {
                continue;
            }
            listing.routers.push((summary.name, summary.object_id));
            listing.details.push(record);
        }

        debug!("Listed {} distributed routers", listing.routers.len());
        Ok(listing)
    }

    async fn find(&self, name: &str) -> Result<Option<EdgeSummary>, DlrError> {
        let summaries = self
            .nsx
            .read_all_pages(Resource::NsxEdges)
            .await?
            .into_iter()
            .map(serde_json::from_value::<EdgeSummary>)
            .collect::<Result<Vec<_>, _>>()?;

        let routers = summaries.iter().filter(|s| s.is_distributed_router());
        Ok(first_named(routers, name, |s| s.name.as_str()).cloned())
    }

    async fn apply_default_route(&self, edge_id: &str, gateway: Ipv4Addr) -> Result<(), DlrError> {
        let template = self.templates.new_routing_template().await?;
        let Some(update) = TemplateBuilder::build_routing_payload(template, edge_id, Some(gateway)) else {
            return Ok(());
        };

        let body = serde_json::to_value(&update.document)?;
        self.nsx
            .update(Resource::RoutingConfig, &[("edgeId", update.edge_id.as_str())], &body)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;
