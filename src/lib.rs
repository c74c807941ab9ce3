//! chart-grid-sync: in-process coordination between data grids and charts.
//!
//! A [`ChartRegistry`] keeps chart configurations, data bridges and
//! grid-to-chart links, and notifies listeners about every change. A
//! [`bridge::DataBridge`] carries grid rows and selections toward charts and
//! chart interactions back toward the grid, so neither side needs a reference
//! to the other.

pub mod bridge;
pub mod core;
pub mod error;
pub mod events;
pub mod registry;
pub mod telemetry;

pub use crate::core::{
    BridgeId, ChartConfiguration, ChartId, ChartType, DataPoint, FieldMapping, GridId,
};
pub use bridge::{DataBridge, GridDataBridge};
pub use error::{SyncError, SyncResult};
pub use registry::{ChartRegistry, RegistryConfig};
