//! Event payloads for each topic.

use farm_core::{FieldEvent, Interrupt, Tick};
use serde::Serialize;

use super::bus::Topic;

/// An orchestrator event and the tick it was drained on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEventRecord {
    pub tick: Tick,
    pub event: FieldEvent,
}

/// An interrupt routed through the interrupt controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterruptRecord {
    pub tick: Tick,
    pub interrupt: Interrupt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    Field(FieldEventRecord),
    Interrupt(InterruptRecord),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Field(record) => match record.event {
                FieldEvent::StateChanged { .. } | FieldEvent::NavigationStarted { .. } => {
                    Topic::Navigation
                }
                FieldEvent::QueueCleared { .. } | FieldEvent::Paused | FieldEvent::Resumed => {
                    Topic::Interrupt
                }
                FieldEvent::Enqueued { .. }
                | FieldEvent::DuplicateIgnored { .. }
                | FieldEvent::Dispatched { .. }
                | FieldEvent::Completed { .. }
                | FieldEvent::Dropped { .. }
                | FieldEvent::Failed { .. } => Topic::Action,
            },
            Event::Interrupt(_) => Topic::Interrupt,
        }
    }

    pub fn tick(&self) -> Tick {
        match self {
            Event::Field(record) => record.tick,
            Event::Interrupt(record) => record.tick,
        }
    }

    pub fn field_event(&self) -> Option<&FieldEvent> {
        match self {
            Event::Field(record) => Some(&record.event),
            Event::Interrupt(_) => None,
        }
    }
}
