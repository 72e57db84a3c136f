//! Write-shape schema templates
//!
//! NSX does not serve request schemas over the API, so the skeletons for the
//! supported resource/operation pairs ship with the crate. They are the
//! read-shape documents with every field present, so callers must prune
//! fields that are invalid on the write path.

use crate::error::NsxError;
use crate::resource::{Operation, Resource};

const EDGES_CREATE: &str = include_str!("../schemas/edges_create.json");
const ROUTING_UPDATE: &str = include_str!("../schemas/routing_update.json");

/// Return the schema skeleton for a resource/operation pair.
pub fn template(resource: Resource, operation: Operation) -> Result<serde_json::Value, NsxError> {
    let raw = match (resource, operation) {
        (Resource::NsxEdges, Operation::Create) => EDGES_CREATE,
        (Resource::RoutingConfig, Operation::Update) => ROUTING_UPDATE,
        _ => {
            return Err(NsxError::InvalidRequest(format!(
                "no schema template for {} {}",
                resource, operation
            )));
        }
    };

    Ok(serde_json::from_str(raw)?)
}
