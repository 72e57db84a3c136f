//! vCenter Inventory Client
//!
//! Client for walking the vCenter inventory through the vSphere Automation
//! REST API (`/api/vcenter/...`).
//!
//! Access is session scoped: an [`InventoryConnector`] opens an
//! [`InventorySession`], the caller walks datacenters, datastores, clusters and
//! networks, then disconnects.

pub mod client;
pub mod error;
pub mod models;
pub mod session;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{VCenterConnector, VCenterSession};
pub use error::VCenterError;
pub use models::*;
pub use session::{InventoryConnector, InventorySession};
#[cfg(feature = "test-util")]
pub use mock::{MockFailure, MockInventory};
