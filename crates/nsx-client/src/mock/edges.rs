//! Edge operations for MockNsxClient
//!
//! Handles the edge collection, single edges and their routing configuration.
//! Create requests are validated the way NSX Manager validates them: fields
//! that only exist in the read shape are refused.

use super::MockNsxClient;
use crate::error::NsxError;
use crate::models::CreatedResource;

/// Fields NSX Manager refuses on edge creation
fn read_only_violation(body: &serde_json::Value) -> Option<&'static str> {
    if body.get("vnics").is_some() {
        return Some("vnics");
    }

    let appliances = body
        .pointer("/appliances/appliances")
        .and_then(|a| a.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    for appliance in appliances {
        if appliance.get("hostId").is_some() {
            return Some("hostId");
        }
        if appliance.get("customField").is_some() {
            return Some("customField");
        }
    }

    None
}

pub fn create_edge(client: &MockNsxClient, body: &serde_json::Value) -> Result<CreatedResource, NsxError> {
    if let Some(field) = read_only_violation(body) {
        return Err(NsxError::Api(format!(
            "POST /api/4.0/edges failed: 400 Bad Request - {{\"errorCode\":10001,\"details\":\"Invalid field '{}' in request\"}}",
            field
        )));
    }

    let id = format!("edge-{}", client.next_id());
    let mut record = body.clone();
    if let Some(map) = record.as_object_mut() {
        let edge_type = map.remove("type").unwrap_or(serde_json::Value::Null);
        map.insert("objectId".to_string(), serde_json::Value::String(id.clone()));
        map.insert("edgeType".to_string(), edge_type);
        map.insert("edgeStatus".to_string(), serde_json::json!("GREEN"));
        map.insert("features".to_string(), serde_json::json!({}));
    }
    client.edges.lock().unwrap().push(record);

    Ok(CreatedResource {
        location: format!("/api/4.0/edges/{}", id),
        object_id: id,
    })
}

pub fn read_edge(client: &MockNsxClient, edge_id: &str) -> Result<serde_json::Value, NsxError> {
    client.edges
        .lock()
        .unwrap()
        .iter()
        .find(|e| e["objectId"] == edge_id)
        .cloned()
        .ok_or_else(|| NsxError::NotFound(format!("Edge {} not found", edge_id)))
}

pub fn read_routing(client: &MockNsxClient, edge_id: &str) -> Result<serde_json::Value, NsxError> {
    let edge = read_edge(client, edge_id)?;
    edge.pointer("/features/routing")
        .cloned()
        .ok_or_else(|| NsxError::NotFound(format!("Routing config for edge {} not found", edge_id)))
}

/// Routing updates replace the whole routing document, as NSX does
pub fn update_routing(client: &MockNsxClient, edge_id: &str, body: &serde_json::Value) -> Result<(), NsxError> {
    let mut edges = client.edges.lock().unwrap();
    let edge = edges
        .iter_mut()
        .find(|e| e["objectId"] == edge_id)
        .ok_or_else(|| NsxError::NotFound(format!("Edge {} not found", edge_id)))?;

    edge["features"]["routing"] = body.clone();
    Ok(())
}

pub fn delete_edge(client: &MockNsxClient, edge_id: &str) -> Result<(), NsxError> {
    let mut edges = client.edges.lock().unwrap();
    let before = edges.len();
    edges.retain(|e| e["objectId"] != edge_id);
    if edges.len() == before {
        return Err(NsxError::NotFound(format!("Edge {} not found", edge_id)));
    }
    Ok(())
}
