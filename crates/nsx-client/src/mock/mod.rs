//! Mock NsxClient for unit testing
//!
//! This module provides a mock implementation of NsxClientTrait that can be used
//! in unit tests without requiring a running NSX Manager.
//!
//! The mock is organized into resource-specific modules:
//! - `edges.rs` - edge collection, single edges, routing configuration
//! - `switches.rs` - logical switches
//!
//! Every call is recorded so tests can assert on exactly which requests a
//! workflow issued.

mod edges;
mod switches;

use crate::error::NsxError;
use crate::models::CreatedResource;
use crate::nsx_trait::NsxClientTrait;
use crate::resource::{Operation, Resource};
use crate::schema;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request observed by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub resource: Resource,
    pub operation: Operation,
    pub uri_params: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Mock NsxClient for testing
///
/// This mock stores edges and logical switches in memory, in insertion order,
/// and can be configured to reject specific resource/operation pairs.
#[derive(Debug, Clone)]
pub struct MockNsxClient {
    pub(crate) base_url: String,
    // In-memory storage, kept in listing order
    pub(crate) edges: Arc<Mutex<Vec<serde_json::Value>>>,
    pub(crate) logical_switches: Arc<Mutex<Vec<serde_json::Value>>>,
    pub(crate) calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub(crate) rejections: Arc<Mutex<HashMap<(Resource, Operation), String>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockNsxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            edges: Arc::new(Mutex::new(Vec::new())),
            logical_switches: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            rejections: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add an edge of the given type to the mock store (for test setup)
    ///
    /// Returns the generated object id.
    pub fn add_edge(&self, name: &str, edge_type: &str) -> String {
        let id = format!("edge-{}", self.next_id());
        self.edges.lock().unwrap().push(serde_json::json!({
            "objectId": id,
            "name": name,
            "edgeType": edge_type,
            "edgeStatus": "GREEN",
            "features": {},
        }));
        id
    }

    /// Add a logical switch to the mock store (for test setup)
    ///
    /// Returns the generated object id.
    pub fn add_logical_switch(&self, name: &str) -> String {
        let id = format!("virtualwire-{}", self.next_id());
        let mut switches = self.logical_switches.lock().unwrap();
        let vdn_id = (5000 + switches.len()).to_string();
        switches.push(serde_json::json!({
            "objectId": id,
            "name": name,
            "vdnId": vdn_id,
        }));
        id
    }

    /// Make every future `operation` on `resource` fail with an API error
    pub fn reject(&self, resource: Resource, operation: Operation, message: impl Into<String>) {
        self.rejections.lock().unwrap().insert((resource, operation), message.into());
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received for a resource/operation pair
    pub fn call_count(&self, resource: Resource, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.resource == resource && c.operation == operation)
            .count()
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    fn record(
        &self,
        resource: Resource,
        operation: Operation,
        uri_params: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<(), NsxError> {
        self.calls.lock().unwrap().push(RecordedCall {
            resource,
            operation,
            uri_params: uri_params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.cloned(),
        });

        match self.rejections.lock().unwrap().get(&(resource, operation)) {
            Some(message) => Err(NsxError::Api(message.clone())),
            None => Ok(()),
        }
    }
}

/// Look up a required URI parameter
pub(crate) fn uri_param<'a>(uri_params: &[(&'a str, &'a str)], key: &str) -> Result<&'a str, NsxError> {
    uri_params
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| NsxError::InvalidRequest(format!("missing URI parameter {}", key)))
}

fn unsupported(resource: Resource, operation: Operation) -> NsxError {
    NsxError::InvalidRequest(format!("mock does not support {} {}", resource, operation))
}

#[async_trait::async_trait]
impl NsxClientTrait for MockNsxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read(&self, resource: Resource, uri_params: &[(&str, &str)]) -> Result<serde_json::Value, NsxError> {
        self.record(resource, Operation::Read, uri_params, None)?;
        match resource {
            Resource::NsxEdge => edges::read_edge(self, uri_param(uri_params, "edgeId")?),
            Resource::RoutingConfig => edges::read_routing(self, uri_param(uri_params, "edgeId")?),
            _ => Err(unsupported(resource, Operation::Read)),
        }
    }

    async fn read_all_pages(&self, resource: Resource) -> Result<Vec<serde_json::Value>, NsxError> {
        self.record(resource, Operation::Read, &[], None)?;
        match resource {
            Resource::NsxEdges => Ok(self.edges.lock().unwrap().clone()),
            Resource::LogicalSwitchesGlobal => Ok(switches::list(self)),
            _ => Err(unsupported(resource, Operation::Read)),
        }
    }

    async fn schema_template(&self, resource: Resource, operation: Operation) -> Result<serde_json::Value, NsxError> {
        schema::template(resource, operation)
    }

    async fn create(&self, resource: Resource, body: &serde_json::Value) -> Result<CreatedResource, NsxError> {
        self.record(resource, Operation::Create, &[], Some(body))?;
        match resource {
            Resource::NsxEdges => edges::create_edge(self, body),
            _ => Err(unsupported(resource, Operation::Create)),
        }
    }

    async fn update(&self, resource: Resource, uri_params: &[(&str, &str)], body: &serde_json::Value) -> Result<(), NsxError> {
        self.record(resource, Operation::Update, uri_params, Some(body))?;
        match resource {
            Resource::RoutingConfig => edges::update_routing(self, uri_param(uri_params, "edgeId")?, body),
            _ => Err(unsupported(resource, Operation::Update)),
        }
    }

    async fn delete(&self, resource: Resource, uri_params: &[(&str, &str)]) -> Result<(), NsxError> {
        self.record(resource, Operation::Delete, uri_params, None)?;
        match resource {
            Resource::NsxEdge => edges::delete_edge(self, uri_param(uri_params, "edgeId")?),
            _ => Err(unsupported(resource, Operation::Delete)),
        }
    }
}
