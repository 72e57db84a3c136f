//! Logical switch operations for MockNsxClient

use super::MockNsxClient;

pub fn list(client: &MockNsxClient) -> Vec<serde_json::Value> {
    client.logical_switches.lock().unwrap().clone()
}
