use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ChartId, DataPoint, FieldMapping, GridRecord};
use crate::events::{DispatchReport, ListenerId, ListenerSet};

use super::projection::{project_rows, select_matching_rows};
use super::{ChartInteractionListener, ChartUpdate, ChartUpdateListener, DataBridge};

/// Behaviour switches for [`GridDataBridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeOptions {
    /// Resolve chart interactions into the grid selection cache.
    pub cross_filtering: bool,
    /// Skip the chart-update fan-out when the replacement equals the cache.
    pub skip_unchanged_updates: bool,
    pub catch_listener_panics: bool,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            cross_filtering: true,
            skip_unchanged_updates: true,
            catch_listener_panics: true,
        }
    }
}

impl BridgeOptions {
    #[must_use]
    pub fn with_cross_filtering(mut self, enabled: bool) -> Self {
        self.cross_filtering = enabled;
        self
    }

    #[must_use]
    pub fn with_skip_unchanged_updates(mut self, enabled: bool) -> Self {
        self.skip_unchanged_updates = enabled;
        self
    }

    #[must_use]
    pub fn with_catch_listener_panics(mut self, enabled: bool) -> Self {
        self.catch_listener_panics = enabled;
        self
    }
}

struct BridgeState<T> {
    rows: Vec<T>,
    selection: Vec<T>,
    mapping: FieldMapping,
    chart_mappings: HashMap<ChartId, FieldMapping>,
}

impl<T> BridgeState<T> {
    fn effective_mapping(&self, chart_id: &ChartId) -> FieldMapping {
        match self.chart_mappings.get(chart_id) {
            Some(overlay) => self.mapping.layered(overlay),
            None => self.mapping.clone(),
        }
    }
}

#[derive(Clone, Copy)]
enum CacheSlot {
    Rows,
    Selection,
}

/// Default in-memory [`DataBridge`].
///
/// Grid-side replacements are projected through the bridge mapping and
/// pushed to [`ChartUpdateListener`]s. Chart interactions first update the
/// selection cache (when cross-filtering is on), publish the new selection as
/// a [`ChartUpdate::SelectionReplaced`] carrying the originating chart, and
/// then reach every [`ChartInteractionListener`], so listeners observe the
/// new selection. A grid that later reports the same selection back is
/// recognised as unchanged and does not fan out twice.
pub struct GridDataBridge<T> {
    options: BridgeOptions,
    state: RwLock<BridgeState<T>>,
    interaction_listeners: ListenerSet<dyn ChartInteractionListener>,
    update_listeners: ListenerSet<dyn ChartUpdateListener>,
}

impl<T> GridDataBridge<T>
where
    T: GridRecord + Clone + PartialEq + Send + Sync,
{
    #[must_use]
    pub fn new(mapping: FieldMapping) -> Self {
        Self::with_options(mapping, BridgeOptions::default())
    }

    #[must_use]
    pub fn with_options(mapping: FieldMapping, options: BridgeOptions) -> Self {
        Self {
            options,
            state: RwLock::new(BridgeState {
                rows: Vec::new(),
                selection: Vec::new(),
                mapping,
                chart_mappings: HashMap::new(),
            }),
            interaction_listeners: ListenerSet::new(),
            update_listeners: ListenerSet::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> BridgeOptions {
        self.options
    }

    #[must_use]
    pub fn chart_mapping(&self, chart_id: &ChartId) -> Option<FieldMapping> {
        self.state.read().chart_mappings.get(chart_id).cloned()
    }

    /// Bridge mapping with the chart's own mapping applied on top.
    #[must_use]
    pub fn effective_mapping(&self, chart_id: &ChartId) -> FieldMapping {
        self.state.read().effective_mapping(chart_id)
    }

    #[must_use]
    pub fn chart_projection(&self) -> Vec<DataPoint> {
        let state = self.state.read();
        project_rows(&state.rows, &state.mapping)
    }

    #[must_use]
    pub fn selection_projection(&self) -> Vec<DataPoint> {
        let state = self.state.read();
        project_rows(&state.selection, &state.mapping)
    }

    #[must_use]
    pub fn project_for_chart(&self, chart_id: &ChartId) -> Vec<DataPoint> {
        let state = self.state.read();
        project_rows(&state.rows, &state.effective_mapping(chart_id))
    }

    pub fn subscribe_chart_updates(&self, listener: Arc<dyn ChartUpdateListener>) -> ListenerId {
        self.update_listeners.add(listener)
    }

    pub fn unsubscribe_chart_updates(&self, listener: &Arc<dyn ChartUpdateListener>) -> bool {
        self.update_listeners.remove(listener)
    }

    #[must_use]
    pub fn interaction_listener_count(&self) -> usize {
        self.interaction_listeners.len()
    }

    /// Failed deliveries across interaction and chart-update listeners.
    #[must_use]
    pub fn listener_failure_count(&self) -> u64 {
        self.interaction_listeners.failure_count() + self.update_listeners.failure_count()
    }

    fn replace_cache(&self, slot: CacheSlot, replacement: Vec<T>) {
        let mut state = self.state.write();
        let cached = match slot {
            CacheSlot::Rows => &mut state.rows,
            CacheSlot::Selection => &mut state.selection,
        };
        if self.options.skip_unchanged_updates && *cached == replacement {
            trace!(rows = replacement.len(), "grid state unchanged; skipping chart update");
            return;
        }
        *cached = replacement;

        if self.update_listeners.is_empty() {
            return;
        }
        let state = RwLockWriteGuard::downgrade(state);
        let update = match slot {
            CacheSlot::Rows => ChartUpdate::DataReplaced {
                points: project_rows(&state.rows, &state.mapping),
            },
            CacheSlot::Selection => ChartUpdate::SelectionReplaced {
                origin: None,
                points: project_rows(&state.selection, &state.mapping),
            },
        };
        drop(state);
        self.notify_chart_update(&update);
    }

    /// Replaces the selection with the rows matched by a chart interaction
    /// and tells chart-update listeners, tagged with the originating chart.
    fn cross_filter(&self, chart_id: &ChartId, data_points: &[DataPoint]) {
        let mut state = self.state.write();
        let mapping = state.effective_mapping(chart_id);
        let selection = select_matching_rows(&state.rows, data_points, &mapping);
        debug!(
            chart_id = %chart_id,
            points = data_points.len(),
            selected = selection.len(),
            "chart interaction resolved to grid selection"
        );
        if self.options.skip_unchanged_updates && state.selection == selection {
            trace!(chart_id = %chart_id, "cross-filter selection unchanged; skipping chart update");
            return;
        }
        state.selection = selection;

        if self.update_listeners.is_empty() {
            return;
        }
        let state = RwLockWriteGuard::downgrade(state);
        let update = ChartUpdate::SelectionReplaced {
            origin: Some(chart_id.clone()),
            points: project_rows(&state.selection, &state.mapping),
        };
        drop(state);
        self.notify_chart_update(&update);
    }

    fn notify_chart_update(&self, update: &ChartUpdate) -> DispatchReport {
        self.update_listeners.dispatch(
            update.kind(),
            self.options.catch_listener_panics,
            |_| true,
            |listener| listener.on_chart_update(update),
        )
    }
}

impl<T> DataBridge<T> for GridDataBridge<T>
where
    T: GridRecord + Clone + PartialEq + Send + Sync,
{
    fn grid_row_data(&self) -> Vec<T> {
        self.state.read().rows.clone()
    }

    fn grid_selection(&self) -> Vec<T> {
        self.state.read().selection.clone()
    }

    fn on_grid_data_changed(&self, updated_rows: Vec<T>) {
        debug!(rows = updated_rows.len(), "grid data changed");
        self.replace_cache(CacheSlot::Rows, updated_rows);
    }

    fn on_grid_selection_changed(&self, selected_rows: Vec<T>) {
        debug!(rows = selected_rows.len(), "grid selection changed");
        self.replace_cache(CacheSlot::Selection, selected_rows);
    }

    fn on_chart_interaction(&self, chart_id: &ChartId, data_points: &[DataPoint]) {
        if self.options.cross_filtering {
            self.cross_filter(chart_id, data_points);
        }
        self.interaction_listeners.dispatch(
            "chart_interaction",
            self.options.catch_listener_panics,
            |_| true,
            |listener| listener.on_chart_interaction(chart_id, data_points),
        );
    }

    fn field_mapping(&self) -> FieldMapping {
        self.state.read().mapping.clone()
    }

    fn set_field_mapping(&self, mapping: FieldMapping) {
        debug!(entries = mapping.len(), "bridge field mapping replaced");
        self.state.write().mapping = mapping;
    }

    fn set_chart_mapping(&self, chart_id: ChartId, mapping: FieldMapping) -> Option<FieldMapping> {
        self.state.write().chart_mappings.insert(chart_id, mapping)
    }

    fn clear_chart_mapping(&self, chart_id: &ChartId) -> Option<FieldMapping> {
        self.state.write().chart_mappings.remove(chart_id)
    }

    fn add_interaction_listener(&self, listener: Arc<dyn ChartInteractionListener>) {
        self.interaction_listeners.add(listener);
    }

    fn remove_interaction_listener(&self, listener: &Arc<dyn ChartInteractionListener>) -> bool {
        self.interaction_listeners.remove(listener)
    }
}
