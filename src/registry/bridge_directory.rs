use std::sync::Arc;

use tracing::{debug, trace};

use crate::bridge::DataBridge;
use crate::core::{BridgeId, ChartId};
use crate::events::RegistryEvent;

use super::ChartRegistry;

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    /// Stores `bridge` under `bridge_id`, replacing any previous bridge.
    ///
    /// Listeners receive only the id.
    pub fn register_data_bridge(&self, bridge_id: BridgeId, bridge: Arc<dyn DataBridge<T>>) {
        let replaced = self
            .bridges
            .write()
            .insert(bridge_id.clone(), bridge)
            .is_some();
        debug!(bridge_id = %bridge_id, replaced, "data bridge registered");
        self.emit(RegistryEvent::BridgeRegistered { bridge_id });
    }

    /// Removes the bridge. Emits `BridgeUnregistered` only when one existed.
    pub fn unregister_data_bridge(&self, bridge_id: &BridgeId) -> bool {
        let removed = self.bridges.write().shift_remove(bridge_id).is_some();
        if !removed {
            trace!(bridge_id = %bridge_id, "unregister of unknown data bridge ignored");
            return false;
        }
        debug!(bridge_id = %bridge_id, "data bridge unregistered");
        self.emit(RegistryEvent::BridgeUnregistered {
            bridge_id: bridge_id.clone(),
        });
        true
    }

    #[must_use]
    pub fn data_bridge(&self, bridge_id: &BridgeId) -> Option<Arc<dyn DataBridge<T>>> {
        self.bridges.read().get(bridge_id).cloned()
    }

    /// Resolves the bridge referenced by a chart's configuration.
    ///
    /// `None` when the chart is unknown, has no bridge reference, or
    /// references a bridge that is not registered.
    #[must_use]
    pub fn bridge_for_chart(&self, chart_id: &ChartId) -> Option<Arc<dyn DataBridge<T>>> {
        let bridge_id = self
            .charts
            .read()
            .get(chart_id)
            .and_then(|configuration| configuration.data_bridge_id.clone())?;
        self.data_bridge(&bridge_id)
    }

    /// Installs the chart's configured field mapping as its per-chart overlay
    /// on the referenced bridge. An empty mapping clears the overlay.
    ///
    /// Returns `false` when the chart or its bridge cannot be resolved.
    pub fn apply_chart_mapping(&self, chart_id: &ChartId) -> bool {
        let Some(configuration) = self.chart(chart_id) else {
            trace!(chart_id = %chart_id, "mapping sync for unknown chart ignored");
            return false;
        };
        let Some(bridge) = self.bridge_for_chart(chart_id) else {
            trace!(chart_id = %chart_id, "mapping sync skipped; chart has no registered bridge");
            return false;
        };
        if configuration.field_mapping.is_empty() {
            bridge.clear_chart_mapping(chart_id);
        } else {
            bridge.set_chart_mapping(chart_id.clone(), configuration.field_mapping.clone());
        }
        debug!(
            chart_id = %chart_id,
            entries = configuration.field_mapping.len(),
            "chart field mapping applied to bridge"
        );
        true
    }

    #[must_use]
    pub fn bridge_ids(&self) -> Vec<BridgeId> {
        self.bridges.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn bridge_count(&self) -> usize {
        self.bridges.read().len()
    }
}
