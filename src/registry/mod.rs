//! Chart/grid coordination registry.
//!
//! `ChartRegistry` is a directory plus event fan-out: it stores chart
//! configurations, data bridges and grid-to-chart links, and tells listeners
//! about every mutation. It never transforms row data.
//!
//! Each directory sits behind its own lock and the three are allowed to drift
//! apart: links may name charts that are not registered, and configurations
//! may reference bridges that are gone. Lookups on such dangling ids return
//! `None` or an empty `Vec`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::bridge::DataBridge;
use crate::core::{BridgeId, ChartConfiguration, ChartId, GridId, GridRow};
use crate::events::{DispatchReport, ListenerSet, RegistryEvent, RegistryListener};

mod bridge_directory;
mod chart_directory;
mod grid_links;
pub mod json_contract;
mod listener_registry;
pub mod registry_config;
pub mod registry_snapshot;

pub use json_contract::{
    CHART_CONFIGURATION_JSON_SCHEMA_V1, ChartConfigurationJsonContractV1,
    REGISTRY_SNAPSHOT_JSON_SCHEMA_V1, RegistrySnapshotJsonContractV1,
};
pub use registry_config::{LinkDuplicatePolicy, RegistryConfig, UnlinkEventPolicy};
pub use registry_snapshot::RegistrySnapshot;

/// Explicitly constructed coordinator shared by grid and chart adapters.
///
/// Build one per composition root and hand it out as `Arc<ChartRegistry<T>>`.
/// `T` is the grid row type served by the registered bridges.
pub struct ChartRegistry<T = GridRow> {
    config: RegistryConfig,
    charts: RwLock<IndexMap<ChartId, Arc<ChartConfiguration>>>,
    bridges: RwLock<IndexMap<BridgeId, Arc<dyn DataBridge<T>>>>,
    grid_chart_links: RwLock<IndexMap<GridId, Vec<ChartId>>>,
    listeners: ListenerSet<dyn RegistryListener>,
}

impl<T> Default for ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            charts: RwLock::new(IndexMap::new()),
            bridges: RwLock::new(IndexMap::new()),
            grid_chart_links: RwLock::new(IndexMap::new()),
            listeners: ListenerSet::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Fans `event` out to subscribed listeners on the calling thread.
    ///
    /// Callers must have released every directory lock before emitting.
    fn emit(&self, event: RegistryEvent) -> DispatchReport {
        let topic = event.topic();
        self.listeners.dispatch(
            topic.as_str(),
            self.config.catch_listener_panics,
            |listener| listener.topics().contains_topic(topic),
            |listener| listener.on_event(&event),
        )
    }
}

impl<T> fmt::Debug for ChartRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartRegistry")
            .field("config", &self.config)
            .field("charts", &self.charts.read().len())
            .field("bridges", &self.bridges.read().len())
            .field("linked_grids", &self.grid_chart_links.read().len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
