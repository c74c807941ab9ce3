use std::sync::Arc;

use tracing::debug;

use crate::error::SyncResult;
use crate::events::{
    ListenerId, RegistryEvent, RegistryListener, RegistryTopic, RegistryTopics, TopicListener,
};

use super::ChartRegistry;

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    /// Appends a listener. Delivery follows registration order.
    pub fn add_listener(&self, listener: Arc<dyn RegistryListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Removes a listener by identity. Returns `true` when removed.
    pub fn remove_listener(&self, listener: &Arc<dyn RegistryListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn remove_listener_by_id(&self, id: ListenerId) -> bool {
        self.listeners.remove_id(id)
    }

    /// Subscribes a closure to a single topic.
    pub fn subscribe<F>(&self, topic: RegistryTopic, handler: F) -> ListenerId
    where
        F: Fn(&RegistryEvent) -> SyncResult<()> + Send + Sync + 'static,
    {
        self.subscribe_topics(RegistryTopics::from_topic(topic), handler)
    }

    pub fn subscribe_topics<F>(&self, topics: RegistryTopics, handler: F) -> ListenerId
    where
        F: Fn(&RegistryEvent) -> SyncResult<()> + Send + Sync + 'static,
    {
        self.listeners
            .add(Arc::new(TopicListener::new(topics, handler)))
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Cumulative number of isolated listener failures.
    #[must_use]
    pub fn listener_failure_count(&self) -> u64 {
        self.listeners.failure_count()
    }

    /// Empties charts, bridges and links, then emits one `RegistryCleared`.
    ///
    /// Listeners stay registered. Intended for teardown and tests.
    pub fn clear(&self) {
        {
            let mut charts = self.charts.write();
            let mut bridges = self.bridges.write();
            let mut links = self.grid_chart_links.write();
            debug!(
                charts = charts.len(),
                bridges = bridges.len(),
                linked_grids = links.len(),
                "clearing registry"
            );
            charts.clear();
            bridges.clear();
            links.clear();
        }
        self.emit(RegistryEvent::RegistryCleared);
    }
}
