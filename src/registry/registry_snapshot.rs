use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{BridgeId, ChartConfiguration, ChartId, GridId};

use super::{ChartRegistry, RegistryConfig};

/// Serializable view of registry state for diagnostics and front-end bootstrapping.
///
/// Each directory is copied under its own lock, so a snapshot taken during
/// concurrent writes is consistent per directory, not across directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub config: RegistryConfig,
    /// Keyed by the directory key, which may differ from the embedded id.
    pub charts: IndexMap<ChartId, ChartConfiguration>,
    pub bridge_ids: Vec<BridgeId>,
    pub grid_links: IndexMap<GridId, Vec<ChartId>>,
    pub listener_count: usize,
    pub listener_failures: u64,
}

impl RegistrySnapshot {
    /// Chart ids referenced by links but not registered.
    #[must_use]
    pub fn dangling_chart_links(&self) -> Vec<(GridId, ChartId)> {
        self.grid_links
            .iter()
            .flat_map(|(grid_id, chart_ids)| {
                chart_ids
                    .iter()
                    .filter(|chart_id| !self.charts.contains_key(*chart_id))
                    .map(move |chart_id| (grid_id.clone(), chart_id.clone()))
            })
            .collect()
    }
}

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let charts = self
            .charts
            .read()
            .iter()
            .map(|(chart_id, configuration)| (chart_id.clone(), configuration.as_ref().clone()))
            .collect();
        RegistrySnapshot {
            config: self.config,
            charts,
            bridge_ids: self.bridge_ids(),
            grid_links: self.grid_chart_links.read().clone(),
            listener_count: self.listener_count(),
            listener_failures: self.listener_failure_count(),
        }
    }
}
