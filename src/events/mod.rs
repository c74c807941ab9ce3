//! Registry notifications and the listener fan-out machinery.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{BridgeId, ChartConfiguration, ChartId, GridId};

pub mod dispatch;
pub mod listener;

pub use dispatch::{DispatchReport, ListenerId, ListenerSet};
pub use listener::{RegistryListener, TopicListener};

/// Notification emitted by the registry after a directory mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    ChartRegistered {
        chart_id: ChartId,
        configuration: Arc<ChartConfiguration>,
    },
    ChartUnregistered {
        chart_id: ChartId,
    },
    /// Only the id is broadcast; listeners needing the bridge look it up.
    BridgeRegistered {
        bridge_id: BridgeId,
    },
    BridgeUnregistered {
        bridge_id: BridgeId,
    },
    ChartsLinkedToGrid {
        grid_id: GridId,
        chart_ids: Vec<ChartId>,
    },
    ChartsUnlinkedFromGrid {
        grid_id: GridId,
    },
    RegistryCleared,
}

impl RegistryEvent {
    #[must_use]
    pub const fn topic(&self) -> RegistryTopic {
        match self {
            Self::ChartRegistered { .. } => RegistryTopic::ChartRegistered,
            Self::ChartUnregistered { .. } => RegistryTopic::ChartUnregistered,
            Self::BridgeRegistered { .. } => RegistryTopic::BridgeRegistered,
            Self::BridgeUnregistered { .. } => RegistryTopic::BridgeUnregistered,
            Self::ChartsLinkedToGrid { .. } => RegistryTopic::ChartsLinked,
            Self::ChartsUnlinkedFromGrid { .. } => RegistryTopic::ChartsUnlinked,
            Self::RegistryCleared => RegistryTopic::Cleared,
        }
    }
}

/// Event kind a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryTopic {
    ChartRegistered,
    ChartUnregistered,
    BridgeRegistered,
    BridgeUnregistered,
    ChartsLinked,
    ChartsUnlinked,
    Cleared,
}

impl RegistryTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::ChartRegistered => 1 << 0,
            Self::ChartUnregistered => 1 << 1,
            Self::BridgeRegistered => 1 << 2,
            Self::BridgeUnregistered => 1 << 3,
            Self::ChartsLinked => 1 << 4,
            Self::ChartsUnlinked => 1 << 5,
            Self::Cleared => 1 << 6,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChartRegistered => "chart_registered",
            Self::ChartUnregistered => "chart_unregistered",
            Self::BridgeRegistered => "bridge_registered",
            Self::BridgeUnregistered => "bridge_unregistered",
            Self::ChartsLinked => "charts_linked",
            Self::ChartsUnlinked => "charts_unlinked",
            Self::Cleared => "registry_cleared",
        }
    }
}

/// Bitmask of topics a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegistryTopics {
    bits: u8,
}

impl RegistryTopics {
    const ALL_BITS: u8 = RegistryTopic::ChartRegistered.bit()
        | RegistryTopic::ChartUnregistered.bit()
        | RegistryTopic::BridgeRegistered.bit()
        | RegistryTopic::BridgeUnregistered.bit()
        | RegistryTopic::ChartsLinked.bit()
        | RegistryTopic::ChartsUnlinked.bit()
        | RegistryTopic::Cleared.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: RegistryTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: RegistryTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: RegistryTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<RegistryTopic> for RegistryTopics {
    fn from_iter<I: IntoIterator<Item = RegistryTopic>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::none(), |topics, topic| topics.with_topic(topic))
    }
}
