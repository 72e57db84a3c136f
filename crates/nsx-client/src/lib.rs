//! NSX Manager REST API Client
//!
//! A Rust client library for the NSX for vSphere Manager REST API.
//! The client is deliberately generic: callers address a [`Resource`] and an
//! [`Operation`] and exchange JSON documents, the way the NSX RAML tooling does.
//!
//! # Example
//!
//! ```no_run
//! use nsx_client::{NsxClient, NsxClientTrait, Resource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NsxClient::new(
//!     "https://nsxmanager.lab.local".to_string(),
//!     "admin".to_string(),
//!     "secret".to_string(),
//!     true,
//! )?;
//!
//! // Every edge known to the manager, across all pages
//! let edges = client.read_all_pages(Resource::NsxEdges).await?;
//!
//! // One edge in full detail
//! let edge = client.read(Resource::NsxEdge, &[("edgeId", "edge-1")]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Generic resource access**: read, read all pages, create, update, delete
//! - **Schema templates**: write-shape skeletons for create requests
//! - **Pagination**: transparent `startIndex`/`pageSize` walking
//! - **Mocking**: `MockNsxClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
pub mod resource;
pub mod schema;
#[path = "trait.rs"]
pub mod nsx_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::NsxClient;
pub use common::HttpClient;
pub use error::NsxError;
pub use models::*;
pub use nsx_trait::NsxClientTrait;
pub use resource::{Operation, Resource};
#[cfg(feature = "test-util")]
pub use mock::{MockNsxClient, RecordedCall};
