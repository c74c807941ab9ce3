//! Value types shared by the registry and the data bridges.

pub mod chart_type;
pub mod configuration;
pub mod data_point;
pub mod field_mapping;
pub mod grid_record;
pub mod ids;

pub use chart_type::ChartType;
pub use configuration::{ChartConfiguration, RawPassthrough, SidebarMode, SidebarPanel};
pub use data_point::DataPoint;
pub use field_mapping::FieldMapping;
pub use grid_record::{GridRecord, GridRow, project_row, row_matches_point};
pub use ids::{BridgeId, ChartId, GridId};
