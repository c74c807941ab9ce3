use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Event policy for [`super::ChartRegistry::unlink_charts_from_grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnlinkEventPolicy {
    /// Always emit `ChartsUnlinkedFromGrid`, even when the grid had no links.
    #[default]
    Always,
    /// Emit only when a mapping was removed, matching chart unregistration.
    WhenPresent,
}

/// How repeated chart ids inside one link call are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkDuplicatePolicy {
    /// Store the sequence exactly as given.
    #[default]
    Preserve,
    /// Keep the first occurrence of each id.
    Dedupe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub unlink_event_policy: UnlinkEventPolicy,
    pub link_duplicate_policy: LinkDuplicatePolicy,
    /// Convert listener panics into isolated delivery failures.
    pub catch_listener_panics: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            unlink_event_policy: UnlinkEventPolicy::Always,
            link_duplicate_policy: LinkDuplicatePolicy::Preserve,
            catch_listener_panics: true,
        }
    }
}

impl RegistryConfig {
    #[must_use]
    pub fn with_unlink_event_policy(mut self, policy: UnlinkEventPolicy) -> Self {
        self.unlink_event_policy = policy;
        self
    }

    #[must_use]
    pub fn with_link_duplicate_policy(mut self, policy: LinkDuplicatePolicy) -> Self {
        self.link_duplicate_policy = policy;
        self
    }

    #[must_use]
    pub fn with_catch_listener_panics(mut self, enabled: bool) -> Self {
        self.catch_listener_panics = enabled;
        self
    }

    /// Parses a config document; missing keys take their defaults.
    pub fn from_json_str(input: &str) -> SyncResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidData(format!("failed to parse registry config: {e}")))
    }
}
