//! Grid/chart data contract.
//!
//! A [`DataBridge`] mediates between one grid and the charts drawn from it.
//! The grid adapter pushes full row and selection state in; charts push
//! interactions back. The bridge, not the registry, owns the caches and
//! decides how an interaction maps onto grid state.

use std::sync::Arc;

use crate::core::{ChartId, DataPoint, FieldMapping};
use crate::error::SyncResult;

pub mod grid_data_bridge;
pub mod projection;

pub use grid_data_bridge::{BridgeOptions, GridDataBridge};
pub use projection::{project_rows, select_matching_rows};

/// Capability exposed by a per-grid adapter.
///
/// Methods take `&self`; implementations own their interior mutability so a
/// bridge can be shared through the registry. Implementations may assume a
/// single writer per bridge; concurrent writers from several grid adapters
/// must be serialized by the embedding application.
pub trait DataBridge<T>: Send + Sync {
    /// Current cached view of the grid rows.
    fn grid_row_data(&self) -> Vec<T>;

    /// Current cached selection.
    fn grid_selection(&self) -> Vec<T>;

    /// Replaces the cached rows. The new rows are visible to
    /// [`DataBridge::grid_row_data`] once this returns.
    fn on_grid_data_changed(&self, updated_rows: Vec<T>);

    /// Replaces the cached selection.
    fn on_grid_selection_changed(&self, selected_rows: Vec<T>);

    /// Entry point for a chart reporting selected or hovered points.
    ///
    /// Every registered [`ChartInteractionListener`] receives the same
    /// `(chart_id, data_points)` pair before this returns.
    fn on_chart_interaction(&self, chart_id: &ChartId, data_points: &[DataPoint]);

    fn field_mapping(&self) -> FieldMapping;

    /// Replaces the mapping. Already delivered projections are not redone.
    fn set_field_mapping(&self, mapping: FieldMapping);

    /// Layers `mapping` over the bridge mapping for `chart_id`, returning the
    /// replaced overlay. Bridges without per-chart mappings ignore it.
    fn set_chart_mapping(
        &self,
        _chart_id: ChartId,
        _mapping: FieldMapping,
    ) -> Option<FieldMapping> {
        None
    }

    fn clear_chart_mapping(&self, _chart_id: &ChartId) -> Option<FieldMapping> {
        None
    }

    fn add_interaction_listener(&self, listener: Arc<dyn ChartInteractionListener>);

    /// Removes a listener by identity. Returns `true` when removed.
    fn remove_interaction_listener(&self, listener: &Arc<dyn ChartInteractionListener>) -> bool;
}

/// Receives chart interactions forwarded by a bridge.
pub trait ChartInteractionListener: Send + Sync {
    fn on_chart_interaction(&self, chart_id: &ChartId, data_points: &[DataPoint])
    -> SyncResult<()>;
}

impl<F> ChartInteractionListener for F
where
    F: Fn(&ChartId, &[DataPoint]) -> SyncResult<()> + Send + Sync,
{
    fn on_chart_interaction(
        &self,
        chart_id: &ChartId,
        data_points: &[DataPoint],
    ) -> SyncResult<()> {
        self(chart_id, data_points)
    }
}

/// Grid-side change projected into chart space.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    DataReplaced {
        points: Vec<DataPoint>,
    },
    /// `origin` names the chart whose interaction produced the selection;
    /// `None` when the grid reported it.
    SelectionReplaced {
        origin: Option<ChartId>,
        points: Vec<DataPoint>,
    },
}

impl ChartUpdate {
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        match self {
            Self::DataReplaced { points } | Self::SelectionReplaced { points, .. } => points,
        }
    }

    /// Chart that caused this update, if any. Charts skip updates they originated.
    #[must_use]
    pub fn origin(&self) -> Option<&ChartId> {
        match self {
            Self::DataReplaced { .. } => None,
            Self::SelectionReplaced { origin, .. } => origin.as_ref(),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::DataReplaced { .. } => "grid_data_replaced",
            Self::SelectionReplaced { .. } => "grid_selection_replaced",
        }
    }
}

/// Chart-side consumer of grid data and selection changes.
pub trait ChartUpdateListener: Send + Sync {
    fn on_chart_update(&self, update: &ChartUpdate) -> SyncResult<()>;
}

impl<F> ChartUpdateListener for F
where
    F: Fn(&ChartUpdate) -> SyncResult<()> + Send + Sync,
{
    fn on_chart_update(&self, update: &ChartUpdate) -> SyncResult<()> {
        self(update)
    }
}
