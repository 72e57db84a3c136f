//! Integration tests for NSX client
//!
//! These tests require a reachable NSX Manager.
//! Set NSX_MANAGER, NSX_USERNAME and NSX_PASSWORD environment variables to run.

use nsx_client::{EdgeSummary, LogicalSwitch, NsxClient, NsxClientTrait, Operation, Resource};

fn client() -> NsxClient {
    let url = std::env::var("NSX_MANAGER")
        .unwrap_or_else(|_| "https://localhost".to_string());
    let username = std::env::var("NSX_USERNAME")
        .unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("NSX_PASSWORD")
        .expect("NSX_PASSWORD environment variable must be set");

    NsxClient::new(url, username, password, true).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running NSX Manager
async fn test_list_edges() {
    let edges = client().read_all_pages(Resource::NsxEdges).await
        .expect("Failed to list edges");

    for edge in edges {
        let summary: EdgeSummary = serde_json::from_value(edge).expect("Unexpected edge shape");
        println!("{} {} {}", summary.object_id, summary.name, summary.edge_type);
    }
}

#[tokio::test]
#[ignore]
async fn test_list_logical_switches() {
    let switches = client().read_all_pages(Resource::LogicalSwitchesGlobal).await
        .expect("Failed to list logical switches");

    for switch in switches {
        let switch: LogicalSwitch = serde_json::from_value(switch).expect("Unexpected switch shape");
        println!("{} {}", switch.object_id, switch.name);
    }
}

#[tokio::test]
#[ignore]
async fn test_schema_template_available() {
    let template = client().schema_template(Resource::NsxEdges, Operation::Create).await
        .expect("Failed to load template");
    assert!(template.get("appliances").is_some());
}
