use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{ChartConfiguration, ChartId};
use crate::events::RegistryEvent;

use super::ChartRegistry;

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    /// Stores `configuration` under `chart_id`, replacing any previous entry.
    ///
    /// Emits exactly one `ChartRegistered` per call once the entry is visible.
    /// A configuration whose own id differs from `chart_id` is still stored
    /// under `chart_id`.
    pub fn register_chart(&self, chart_id: ChartId, configuration: ChartConfiguration) {
        if configuration.chart_id != chart_id {
            warn!(
                chart_id = %chart_id,
                configuration_chart_id = %configuration.chart_id,
                "chart registered under a key that differs from its configuration id"
            );
        }
        let configuration = Arc::new(configuration);
        let replaced = self
            .charts
            .write()
            .insert(chart_id.clone(), Arc::clone(&configuration))
            .is_some();
        debug!(chart_id = %chart_id, replaced, "chart registered");
        self.emit(RegistryEvent::ChartRegistered {
            chart_id,
            configuration,
        });
    }

    /// Registers `configuration` under its own `chart_id`.
    pub fn register_configuration(&self, configuration: ChartConfiguration) {
        let chart_id = configuration.chart_id.clone();
        self.register_chart(chart_id, configuration);
    }

    /// Removes the chart. Emits `ChartUnregistered` only when an entry existed.
    pub fn unregister_chart(&self, chart_id: &ChartId) -> bool {
        let removed = self.charts.write().shift_remove(chart_id).is_some();
        if !removed {
            trace!(chart_id = %chart_id, "unregister of unknown chart ignored");
            return false;
        }
        debug!(chart_id = %chart_id, "chart unregistered");
        self.emit(RegistryEvent::ChartUnregistered {
            chart_id: chart_id.clone(),
        });
        true
    }

    #[must_use]
    pub fn chart(&self, chart_id: &ChartId) -> Option<Arc<ChartConfiguration>> {
        self.charts.read().get(chart_id).cloned()
    }

    /// Copy of every configuration in registration order.
    ///
    /// Later registrations never show up in an already returned vector.
    #[must_use]
    pub fn all_charts(&self) -> Vec<Arc<ChartConfiguration>> {
        self.charts.read().values().cloned().collect()
    }

    #[must_use]
    pub fn chart_ids(&self) -> Vec<ChartId> {
        self.charts.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn contains_chart(&self, chart_id: &ChartId) -> bool {
        self.charts.read().contains_key(chart_id)
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.read().len()
    }
}
