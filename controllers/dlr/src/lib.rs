//! Distributed Logical Router lifecycle
//!
//! Creates, reads, deletes and lists NSX distributed logical routers (DLRs).
//! Creation resolves the control appliance placement and the HA / uplink
//! segments by name against vCenter and NSX, builds the edge payload from the
//! NSX write-shape template, submits it, and optionally applies a default route.
//!
//! - `resolver`: name to identifier resolution (placement, segments)
//! - `template`: payload construction and pruning
//! - `lifecycle`: create / read / delete / list orchestration

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod resolver;
pub mod template;

#[cfg(test)]
mod test_utils;

pub use config::{DlrConfig, NsxSettings, VCenterSettings};
pub use error::{DlrError, LookupKind};
pub use lifecycle::{CreatedRouter, DefaultRouteStatus, RouterLifecycleManager, RouterListing, RouterRecord};
pub use model::*;
pub use resolver::{InventoryResolver, SEGMENT_LOOKUP_ORDER};
pub use template::TemplateBuilder;
