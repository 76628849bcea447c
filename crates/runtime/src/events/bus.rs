//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tokio::sync::broadcast;

use combat_core::EventKind;

use super::types::Event;

/// Topics for event routing, one per engine event kind.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Topic {
    /// Tick completion, with a state snapshot
    Tick,
    Damage,
    Heal,
    CombatStart,
    CombatPause,
    CombatResume,
    /// Terminal outcome, published once
    CombatEnd,
    /// Combat log lines
    Log,
}

impl From<EventKind> for Topic {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Tick => Topic::Tick,
            EventKind::Damage => Topic::Damage,
            EventKind::Heal => Topic::Heal,
            EventKind::CombatStart => Topic::CombatStart,
            EventKind::CombatPause => Topic::CombatPause,
            EventKind::CombatResume => Topic::CombatResume,
            EventKind::CombatEnd => Topic::CombatEnd,
            EventKind::Log => Topic::Log,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created once up front, so the bus
/// never needs a lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        // every topic is inserted by `with_capacity`
        &self.channels[&topic]
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {}", topic);
        }
    }

    /// True if anyone currently listens on `topic`.
    pub fn has_subscribers(&self, topic: Topic) -> bool {
        self.sender(topic).receiver_count() > 0
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
