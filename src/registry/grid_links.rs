use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{ChartConfiguration, ChartId, GridId};
use crate::events::RegistryEvent;

use super::{ChartRegistry, LinkDuplicatePolicy, UnlinkEventPolicy};

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    /// Replaces the chart sequence linked to `grid_id`.
    ///
    /// The registry keeps its own copy; listeners receive the stored sequence.
    pub fn link_charts_to_grid(&self, grid_id: GridId, chart_ids: &[ChartId]) {
        let stored = match self.config.link_duplicate_policy {
            LinkDuplicatePolicy::Preserve => chart_ids.to_vec(),
            LinkDuplicatePolicy::Dedupe => {
                let mut seen = HashSet::with_capacity(chart_ids.len());
                chart_ids
                    .iter()
                    .filter(|chart_id| seen.insert(*chart_id))
                    .cloned()
                    .collect()
            }
        };
        self.grid_chart_links
            .write()
            .insert(grid_id.clone(), stored.clone());
        debug!(grid_id = %grid_id, charts = stored.len(), "charts linked to grid");
        self.emit(RegistryEvent::ChartsLinkedToGrid {
            grid_id,
            chart_ids: stored,
        });
    }

    /// Chart ids linked to `grid_id`; empty when the grid has no links.
    #[must_use]
    pub fn linked_charts(&self, grid_id: &GridId) -> Vec<ChartId> {
        self.grid_chart_links
            .read()
            .get(grid_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drops the links of `grid_id` and returns whether any existed.
    ///
    /// With [`UnlinkEventPolicy::Always`] `ChartsUnlinkedFromGrid` is emitted
    /// even when nothing was linked.
    pub fn unlink_charts_from_grid(&self, grid_id: &GridId) -> bool {
        let removed = self.grid_chart_links.write().shift_remove(grid_id).is_some();
        debug!(grid_id = %grid_id, removed, "charts unlinked from grid");
        match self.config.unlink_event_policy {
            UnlinkEventPolicy::Always => {}
            UnlinkEventPolicy::WhenPresent if removed => {}
            UnlinkEventPolicy::WhenPresent => {
                trace!(grid_id = %grid_id, "no links present; unlink event suppressed");
                return false;
            }
        }
        self.emit(RegistryEvent::ChartsUnlinkedFromGrid {
            grid_id: grid_id.clone(),
        });
        removed
    }

    #[must_use]
    pub fn linked_grids(&self) -> Vec<GridId> {
        self.grid_chart_links.read().keys().cloned().collect()
    }

    /// Registered configurations of the charts linked to `grid_id`, in link
    /// order. Dangling ids are skipped.
    #[must_use]
    pub fn charts_for_grid(&self, grid_id: &GridId) -> Vec<Arc<ChartConfiguration>> {
        let chart_ids = self.linked_charts(grid_id);
        let charts = self.charts.read();
        chart_ids
            .iter()
            .filter_map(|chart_id| charts.get(chart_id).cloned())
            .collect()
    }

    /// Grids whose link sequence contains `chart_id`.
    #[must_use]
    pub fn grids_for_chart(&self, chart_id: &ChartId) -> Vec<GridId> {
        self.grid_chart_links
            .read()
            .iter()
            .filter(|(_, chart_ids)| chart_ids.contains(chart_id))
            .map(|(grid_id, _)| grid_id.clone())
            .collect()
    }
}
