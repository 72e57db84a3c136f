//! NSX resource addressing
//!
//! Maps the resource names used by the NSX RAML specification onto URI
//! templates and pagination conventions.

use crate::error::NsxError;
use std::fmt;

/// An addressable NSX Manager resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Edge collection (`/api/4.0/edges`)
    NsxEdges,
    /// A single edge (`/api/4.0/edges/{edgeId}`)
    NsxEdge,
    /// Routing configuration of an edge
    RoutingConfig,
    /// Logical switches across all transport zones
    LogicalSwitchesGlobal,
}

/// Operation performed against a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

/// Query parameter names and response envelope of a paged collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub start_param: &'static str,
    pub size_param: &'static str,
    pub envelope: &'static str,
}

impl Resource {
    /// Name as it appears in the NSX RAML specification
    pub fn name(&self) -> &'static str {
        match self {
            Resource::NsxEdges => "nsxEdges",
            Resource::NsxEdge => "nsxEdge",
            Resource::RoutingConfig => "routingConfig",
            Resource::LogicalSwitchesGlobal => "logicalSwitchesGlobal",
        }
    }

    /// URI template relative to the manager base URL
    pub fn uri_template(&self) -> &'static str {
        match self {
            Resource::NsxEdges => "/api/4.0/edges",
            Resource::NsxEdge => "/api/4.0/edges/{edgeId}",
            Resource::RoutingConfig => "/api/4.0/edges/{edgeId}/routing/config",
            Resource::LogicalSwitchesGlobal => "/api/2.0/vdn/virtualwires",
        }
    }

    /// Pagination convention, `None` for non-collection resources
    pub fn paging(&self) -> Option<Paging> {
        match self {
            Resource::NsxEdges => Some(Paging {
                start_param: "startIndex",
                size_param: "pageSize",
                envelope: "edgePage",
            }),
            // The virtualwires endpoint spells its paging parameters in lowercase
            Resource::LogicalSwitchesGlobal => Some(Paging {
                start_param: "startindex",
                size_param: "pagesize",
                envelope: "dataPage",
            }),
            Resource::NsxEdge | Resource::RoutingConfig => None,
        }
    }

    /// Expand the URI template with the given parameters.
    ///
    /// Every `{name}` placeholder must be supplied; extra parameters are ignored.
    pub fn expand_uri(&self, uri_params: &[(&str, &str)]) -> Result<String, NsxError> {
        let mut uri = self.uri_template().to_string();
        for (key, value) in uri_params {
            uri = uri.replace(&format!("{{{}}}", key), &urlencoding::encode(value));
        }

        if uri.contains('{') {
            return Err(NsxError::InvalidRequest(format!(
                "missing URI parameter for {}: {}",
                self.name(),
                uri
            )));
        }

        Ok(uri)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}
