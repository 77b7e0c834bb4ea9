//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::Event;

/// Topics for event routing
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
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Requests entering, leaving or failing the queue
    Action,
    /// State machine transitions and walks
    Navigation,
    /// Clears, pauses, resumes and the interrupts behind them
    Interrupt,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Action, Topic::Navigation, Topic::Interrupt];
}

/// Topic-based event bus
///
/// Publishing never blocks; events sent to a topic with no subscribers are
/// discarded.
#[derive(Clone)]
pub struct EventBus {
    action: broadcast::Sender<Event>,
    navigation: broadcast::Sender<Event>,
    interrupt: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            action: broadcast::channel(capacity).0,
            navigation: broadcast::channel(capacity).0,
            interrupt: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Action => &self.action,
            Topic::Navigation => &self.navigation,
            Topic::Interrupt => &self.interrupt,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
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
