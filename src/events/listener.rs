use crate::error::SyncResult;

use super::{RegistryEvent, RegistryTopic, RegistryTopics};

/// Observer of registry mutations.
///
/// Callbacks run synchronously on the thread that mutated the registry, after
/// the mutation is visible. Keep them short; slow work belongs on the
/// listener's own executor. Returning `Err` (or panicking) is logged and
/// isolated from other listeners.
pub trait RegistryListener: Send + Sync {
    fn on_event(&self, event: &RegistryEvent) -> SyncResult<()>;

    /// Topics delivered to this listener. Defaults to every topic.
    fn topics(&self) -> RegistryTopics {
        RegistryTopics::all()
    }
}

impl<F> RegistryListener for F
where
    F: Fn(&RegistryEvent) -> SyncResult<()> + Send + Sync,
{
    fn on_event(&self, event: &RegistryEvent) -> SyncResult<()> {
        self(event)
    }
}

/// Closure listener restricted to a topic set.
pub struct TopicListener<F> {
    topics: RegistryTopics,
    handler: F,
}

impl<F> TopicListener<F>
where
    F: Fn(&RegistryEvent) -> SyncResult<()> + Send + Sync,
{
    #[must_use]
    pub fn new(topics: RegistryTopics, handler: F) -> Self {
        Self { topics, handler }
    }

    #[must_use]
    pub fn for_topic(topic: RegistryTopic, handler: F) -> Self {
        Self::new(RegistryTopics::from_topic(topic), handler)
    }
}

impl<F> RegistryListener for TopicListener<F>
where
    F: Fn(&RegistryEvent) -> SyncResult<()> + Send + Sync,
{
    fn on_event(&self, event: &RegistryEvent) -> SyncResult<()> {
        (self.handler)(event)
    }

    fn topics(&self) -> RegistryTopics {
        self.topics
    }
}
