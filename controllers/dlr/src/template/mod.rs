//! Payload construction from NSX schema templates.
//!
//! The create template is the edge read shape with every field present.
//! Building a router payload fills in the router's values and drops the
//! fields NSX refuses on create (`vnics`, appliance `hostId` and
//! `customField`). The routing template is cut down to the default gateway.

pub mod payload;

use crate::error::DlrError;
use crate::model::{PlacementReference, RouterSpec, SegmentReference};
use nsx_client::{NsxClientTrait, Operation, Resource, EDGE_TYPE_DISTRIBUTED_ROUTER};
use payload::*;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

/// CLI user of every router control appliance
pub const ADMIN_USER: &str = "admin";

const UPLINK_INTERFACE_TYPE: &str = "uplink";

/// Builds create and routing payloads
pub struct TemplateBuilder {
    nsx: Arc<dyn NsxClientTrait>,
}

impl TemplateBuilder {
    /// Create a builder fetching templates through `nsx`
    pub fn new(nsx: Arc<dyn NsxClientTrait>) -> Self {
        Self { nsx }
    }

    /// Fetch the write-shape skeleton for creating `resource`.
    pub async fn new_creation_template(&self, resource: Resource) -> Result<EdgeDocument, DlrError> {
        let template = self.nsx.schema_template(resource, Operation::Create).await?;
        debug!("Loaded {} create template", resource);
        Ok(serde_json::from_value(template)?)
    }

    /// Turn a create template into a distributed router payload.
    pub fn apply_router_spec(
        template: EdgeDocument,
        spec: &RouterSpec,
        placement: &PlacementReference,
        ha_segment: &SegmentReference,
        uplink_segment: &SegmentReference,
    ) -> EdgeDocument {
        let mut edge = template;

        edge.edge_type = Some(EDGE_TYPE_DISTRIBUTED_ROUTER.to_string());
        edge.name = Some(spec.name.clone());
        edge.datacenter_moid = Some(placement.datacenter_id.clone());
        edge.cli_settings = Some(CliSettings {
            user_name: ADMIN_USER.to_string(),
            password: spec.admin_password.clone(),
            remote_access: true,
        });

        let mut appliances = edge.appliances.take().unwrap_or_default();
        appliances.appliance_size = Some(spec.size.to_string());
        // A DLR runs exactly one control appliance
        let mut appliance = appliances.appliances.into_iter().next().unwrap_or_default();
        appliance.datastore_id = Some(placement.datastore_id.clone());
        appliance.resource_pool_id = Some(placement.resource_pool_id.clone());
        appliance.host_id = None;
        appliance.custom_field = None;
        appliances.appliances = vec![appliance];
        edge.appliances = Some(appliances);

        edge.mgmt_interface = Some(MgmtInterface {
            connected_to_id: Some(ha_segment.id.clone()),
            address_groups: None,
        });
        edge.interfaces = Some(Interfaces {
            interfaces: vec![Interface {
                interface_type: Some(UPLINK_INTERFACE_TYPE.to_string()),
                is_connected: Some(true),
                connected_to_id: Some(uplink_segment.id.clone()),
                address_groups: Some(AddressGroups {
                    address_groups: vec![AddressGroup {
                        primary_address: spec.uplink_ip.to_string(),
                        subnet_mask: spec.uplink_subnet.to_string(),
                    }],
                }),
                ..Default::default()
            }],
        });
        edge.vnics = None;

        edge
    }

    /// Fetch the write-shape skeleton of an edge routing document.
    pub async fn new_routing_template(&self) -> Result<RoutingDocument, DlrError> {
        let template = self
            .nsx
            .schema_template(Resource::RoutingConfig, Operation::Update)
            .await?;
        debug!("Loaded {} update template", Resource::RoutingConfig);
        Ok(serde_json::from_value(template)?)
    }

    /// Turn a routing template into a document setting only the default
    /// gateway, or `None` when no gateway was requested.
    ///
    /// NSX replaces the whole routing document on update, so every other
    /// section of the template is dropped rather than sent at its defaults.
    pub fn build_routing_payload(
        template: RoutingDocument,
        edge_id: &str,
        gateway: Option<Ipv4Addr>,
    ) -> Option<RoutingUpdate> {
        let gateway = gateway?;
        let mut document = template;

        document.routing_global_config = None;
        document.ospf = None;
        document.isis = None;
        document.bgp = None;
        document.static_routing = Some(StaticRouting {
            static_routes: None,
            default_route: Some(DefaultRoute {
                gateway_address: gateway.to_string(),
                ..Default::default()
            }),
        });

        Some(RoutingUpdate {
            edge_id: edge_id.to_string(),
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SegmentKind;
    use crate::test_utils::router_spec;
    use nsx_client::MockNsxClient;
    use serde_json::json;

    fn placement() -> PlacementReference {
        PlacementReference {
            datacenter_id: "datacenter-2".to_string(),
            datastore_id: "datastore-11".to_string(),
            resource_pool_id: "resgroup-9".to_string(),
        }
    }

    fn segments() -> (SegmentReference, SegmentReference) {
        (
            SegmentReference { id: "dvportgroup-41".to_string(), kind: SegmentKind::PortGroup },
            SegmentReference { id: "virtualwire-3".to_string(), kind: SegmentKind::LogicalSwitch },
        )
    }

    async fn router_payload() -> (EdgeDocument, serde_json::Value) {
        let builder = TemplateBuilder::new(Arc::new(MockNsxClient::new("https://nsx.test")));
        let template = builder.new_creation_template(Resource::NsxEdges).await.unwrap();
        let (ha, uplink) = segments();
        let payload = TemplateBuilder::apply_router_spec(
            template.clone(),
            &router_spec("dlr1", None),
            &placement(),
            &ha,
            &uplink,
        );
        (template, serde_json::to_value(&payload).unwrap())
    }

    #[tokio::test]
    async fn test_router_payload_fields() {
        let (_, body) = router_payload().await;

        assert_eq!(body["type"], "distributedRouter");
        assert_eq!(body["name"], "dlr1");
        assert_eq!(body["datacenterMoid"], "datacenter-2");
        assert_eq!(body["cliSettings"], json!({
            "userName": "admin",
            "password": "VMware1!VMware1!",
            "remoteAccess": true
        }));
        assert_eq!(body["appliances"]["applianceSize"], "compact");
        assert_eq!(body["mgmtInterface"], json!({"connectedToId": "dvportgroup-41"}));
    }

    #[tokio::test]
    async fn test_router_payload_single_connected_uplink() {
        let (_, body) = router_payload().await;

        assert_eq!(body["interfaces"], json!({
            "interfaces": [{
                "type": "uplink",
                "isConnected": true,
                "connectedToId": "virtualwire-3",
                "addressGroups": {
                    "addressGroups": [{"primaryAddress": "172.16.2.2", "subnetMask": "255.255.255.0"}]
                }
            }]
        }));
    }

    #[tokio::test]
    async fn test_router_payload_prunes_read_only_fields() {
        let (template, body) = router_payload().await;

        // Present in the template...
        assert!(template.vnics.is_some());
        assert!(template.appliances.as_ref().unwrap().appliances[0].host_id.is_some());
        assert!(template.appliances.as_ref().unwrap().appliances[0].custom_field.is_some());

        // ...and gone from the payload
        assert!(body.get("vnics").is_none());
        let appliances = body["appliances"]["appliances"].as_array().unwrap();
        assert_eq!(appliances.len(), 1);
        assert!(appliances[0].get("hostId").is_none());
        assert!(appliances[0].get("customField").is_none());
        assert_eq!(appliances[0]["datastoreId"], "datastore-11");
        assert_eq!(appliances[0]["resourcePoolId"], "resgroup-9");
        // Untouched template defaults survive
        assert_eq!(appliances[0]["cpuReservation"], json!({"limit": -1, "reservation": 0}));
    }

    #[test]
    fn test_apply_router_spec_without_template_appliance() {
        let (ha, uplink) = segments();
        let payload = TemplateBuilder::apply_router_spec(
            EdgeDocument::default(),
            &router_spec("dlr1", None),
            &placement(),
            &ha,
            &uplink,
        );

        let appliances = payload.appliances.unwrap();
        assert_eq!(appliances.appliances.len(), 1);
        assert_eq!(appliances.appliances[0].datastore_id.as_deref(), Some("datastore-11"));
    }

    async fn routing_template() -> RoutingDocument {
        let builder = TemplateBuilder::new(Arc::new(MockNsxClient::new("https://nsx.test")));
        builder.new_routing_template().await.unwrap()
    }

    #[tokio::test]
    async fn test_routing_template_has_every_section() {
        let template = routing_template().await;

        assert!(template.routing_global_config.is_some());
        assert!(template.ospf.is_some());
        assert!(template.isis.is_some());
        assert!(template.bgp.is_some());
        let static_routing = template.static_routing.unwrap();
        assert!(static_routing.static_routes.is_some());
        assert_eq!(static_routing.default_route.unwrap().mtu, Some(1500));
    }

    #[tokio::test]
    async fn test_routing_payload_absent_without_gateway() {
        assert!(TemplateBuilder::build_routing_payload(routing_template().await, "edge-1", None).is_none());
    }

    #[tokio::test]
    async fn test_routing_payload_drops_every_template_section() {
        let update = TemplateBuilder::build_routing_payload(
            routing_template().await,
            "edge-1",
            Some("172.16.2.1".parse().unwrap()),
        )
        .unwrap();

        assert_eq!(update.edge_id, "edge-1");
        assert_eq!(
            serde_json::to_value(&update.document).unwrap(),
            json!({"staticRouting": {"defaultRoute": {"gatewayAddress": "172.16.2.1"}}})
        );
    }
}
