//! DLR error types.
//!
//! Client errors from NSX and vCenter are folded into three categories the
//! caller can act on: a named lookup that found nothing, a request the
//! controller refused, and a backing system that could not be reached.

use nsx_client::NsxError;
use std::fmt;
use thiserror::Error;
use vcenter_client::VCenterError;

/// Which name-based lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// vCenter datacenter
    Datacenter,
    /// vCenter datastore
    Datastore,
    /// vCenter cluster
    Cluster,
    /// Root resource pool of a cluster
    ResourcePool,
    /// Segment lookup before a role is attached
    Segment,
    /// Segment of the HA / management interface
    HaSegment,
    /// Segment of the uplink interface
    UplinkSegment,
    /// Distributed router looked up by name
    Router,
}

impl LookupKind {
    fn is_segment(&self) -> bool {
        matches!(self, LookupKind::Segment | LookupKind::HaSegment | LookupKind::UplinkSegment)
    }

    fn detail(&self) -> &'static str {
        if self.is_segment() {
            " as port group or logical switch"
        } else {
            ""
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::Datacenter => "datacenter",
            LookupKind::Datastore => "datastore",
            LookupKind::Cluster => "cluster",
            LookupKind::ResourcePool => "resource pool",
            LookupKind::Segment => "segment",
            LookupKind::HaSegment => "HA segment",
            LookupKind::UplinkSegment => "uplink segment",
            LookupKind::Router => "router",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while managing distributed routers.
#[derive(Debug, Error)]
pub enum DlrError {
    /// A name did not match any inventory object
    #[error("{kind} {name} not found{}", .kind.detail())]
    NotFound {
        /// Which lookup failed
        kind: LookupKind,
        /// The name that was looked up
        name: String,
    },

    /// NSX Manager refused a request; diagnostics are passed through unmodified
    #[error("Controller rejected request: {0}")]
    ControllerRejected(String),

    /// Transport or authentication failure against NSX or vCenter
    #[error("Connection error: {0}")]
    Connection(String),

    /// A backing system answered with something we could not interpret
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration or arguments
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DlrError {
    /// Build a `NotFound` error
    pub fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        DlrError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Whether this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, DlrError::NotFound { .. })
    }

    /// Attach a role to a segment lookup failure; other errors pass through.
    pub fn for_segment_role(self, role: LookupKind) -> Self {
        match self {
            DlrError::NotFound { kind: LookupKind::Segment, name } => DlrError::NotFound { kind: role, name },
            other => other,
        }
    }
}

impl From<NsxError> for DlrError {
    fn from(e: NsxError) -> Self {
        match e {
            NsxError::Http(e) => DlrError::Connection(format!("NSX Manager: {}", e)),
            NsxError::Authentication(msg) => DlrError::Connection(format!("NSX Manager: {}", msg)),
            NsxError::Api(body) => DlrError::ControllerRejected(body),
            NsxError::NotFound(msg) => DlrError::UnexpectedResponse(msg),
            NsxError::Serialization(e) => DlrError::UnexpectedResponse(e.to_string()),
            NsxError::UnexpectedResponse(msg) => DlrError::UnexpectedResponse(msg),
            NsxError::InvalidRequest(msg) => DlrError::InvalidConfig(msg),
        }
    }
}

impl From<VCenterError> for DlrError {
    fn from(e: VCenterError) -> Self {
        match e {
            VCenterError::Http(e) => DlrError::Connection(format!("vCenter: {}", e)),
            VCenterError::Authentication(msg) => DlrError::Connection(format!("vCenter: {}", msg)),
            VCenterError::Api(msg) => DlrError::UnexpectedResponse(format!("vCenter: {}", msg)),
            VCenterError::NotFound(msg) => DlrError::UnexpectedResponse(msg),
            VCenterError::Serialization(e) => DlrError::UnexpectedResponse(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_message_names_role() {
        let err = DlrError::not_found(LookupKind::Segment, "transit-ha").for_segment_role(LookupKind::HaSegment);
        assert_eq!(err.to_string(), "HA segment transit-ha not found as port group or logical switch");
    }

    #[test]
    fn test_placement_message() {
        let err = DlrError::not_found(LookupKind::Datastore, "ds-missing");
        assert_eq!(err.to_string(), "datastore ds-missing not found");
    }

    #[test]
    fn test_role_only_applies_to_segments() {
        let err = DlrError::not_found(LookupKind::Cluster, "c1").for_segment_role(LookupKind::UplinkSegment);
        assert!(matches!(err, DlrError::NotFound { kind: LookupKind::Cluster, .. }));
    }

    #[test]
    fn test_api_body_passes_through_unmodified() {
        let body = "POST /api/4.0/edges failed: 400 Bad Request - {\"errorCode\":10001}";
        let err = DlrError::from(NsxError::Api(body.to_string()));
        assert!(matches!(err, DlrError::ControllerRejected(ref b) if b == body));
    }

    #[test]
    fn test_undecodable_nsx_response_is_not_a_rejection() {
        let err = DlrError::from(NsxError::UnexpectedResponse("POST /api/4.0/edges returned no Location header".to_string()));
        assert!(matches!(err, DlrError::UnexpectedResponse(ref msg) if msg.contains("Location")));
    }

    #[test]
    fn test_vcenter_error_status_is_unexpected_response() {
        let err = DlrError::from(VCenterError::Api("GET /api/vcenter/datastore failed: 500".to_string()));
        assert!(matches!(err, DlrError::UnexpectedResponse(ref msg) if msg.starts_with("vCenter: ")));
    }

    #[test]
    fn test_authentication_is_connection_error() {
        let err = DlrError::from(VCenterError::Authentication("401".to_string()));
        assert!(matches!(err, DlrError::Connection(_)));
    }
}
