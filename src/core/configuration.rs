use serde::{Deserialize, Serialize};

use super::{BridgeId, ChartId, ChartType, FieldMapping, GridId};

/// Declarative description of one chart known to the registry.
///
/// The registry stores and forwards this record; none of the display
/// attributes change registry behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfiguration {
    pub chart_id: ChartId,
    pub chart_type: ChartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_bridge_id: Option<BridgeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_grid_id: Option<GridId>,
    /// Per-chart overlay over the bridge mapping. Installed on the bridge by
    /// `ChartRegistry::apply_chart_mapping`.
    #[serde(default)]
    pub field_mapping: FieldMapping,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(default)]
    pub cross_filtering_enabled: bool,
    #[serde(default)]
    pub selection_sync_enabled: bool,
    #[serde(default)]
    pub toolbar_enabled: bool,
    #[serde(default)]
    pub sidebar: SidebarMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_options: Option<RawPassthrough>,
}

impl ChartConfiguration {
    #[must_use]
    pub fn new(chart_id: ChartId, chart_type: ChartType) -> Self {
        Self {
            chart_id,
            chart_type,
            data_bridge_id: None,
            linked_grid_id: None,
            field_mapping: FieldMapping::new(),
            themes: Vec::new(),
            title: None,
            container_id: None,
            cross_filtering_enabled: false,
            selection_sync_enabled: false,
            toolbar_enabled: false,
            sidebar: SidebarMode::Hidden,
            raw_options: None,
        }
    }

    #[must_use]
    pub fn with_data_bridge(mut self, bridge_id: BridgeId) -> Self {
        self.data_bridge_id = Some(bridge_id);
        self
    }

    #[must_use]
    pub fn with_linked_grid(mut self, grid_id: GridId) -> Self {
        self.linked_grid_id = Some(grid_id);
        self
    }

    #[must_use]
    pub fn with_field_mapping(mut self, mapping: FieldMapping) -> Self {
        self.field_mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.themes.push(theme.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    #[must_use]
    pub fn with_cross_filtering(mut self, enabled: bool) -> Self {
        self.cross_filtering_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_selection_sync(mut self, enabled: bool) -> Self {
        self.selection_sync_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_toolbar(mut self, enabled: bool) -> Self {
        self.toolbar_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_sidebar(mut self, sidebar: SidebarMode) -> Self {
        self.sidebar = sidebar;
        self
    }

    #[must_use]
    pub fn with_raw_options(mut self, raw: RawPassthrough) -> Self {
        self.raw_options = Some(raw);
        self
    }
}

/// Tool panel shown in a chart sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarPanel {
    Settings,
    Data,
    Format,
}

/// Chart sidebar mode.
///
/// In JSON a boolean toggles `Hidden`/`Visible`, a string names a preset and
/// an array lists explicit panels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SidebarRepr", into = "SidebarRepr")]
pub enum SidebarMode {
    #[default]
    Hidden,
    Visible,
    Preset(String),
    Panels(Vec<SidebarPanel>),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SidebarRepr {
    Toggle(bool),
    Preset(String),
    Panels(Vec<SidebarPanel>),
}

impl From<SidebarRepr> for SidebarMode {
    fn from(repr: SidebarRepr) -> Self {
        match repr {
            SidebarRepr::Toggle(false) => Self::Hidden,
            SidebarRepr::Toggle(true) => Self::Visible,
            SidebarRepr::Preset(name) => Self::Preset(name),
            SidebarRepr::Panels(panels) => Self::Panels(panels),
        }
    }
}

impl From<SidebarMode> for SidebarRepr {
    fn from(mode: SidebarMode) -> Self {
        match mode {
            SidebarMode::Hidden => Self::Toggle(false),
            SidebarMode::Visible => Self::Toggle(true),
            SidebarMode::Preset(name) => Self::Preset(name),
            SidebarMode::Panels(panels) => Self::Panels(panels),
        }
    }
}

/// Opaque option or callback text owned by the rendering front end.
///
/// Stored and forwarded verbatim; this crate never parses or evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPassthrough(String);

impl RawPassthrough {
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
