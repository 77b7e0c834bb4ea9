//! Topic-based event bus for field events.
//!
//! The worker republishes every [`farm_core::FieldEvent`] it drains from the
//! orchestrator, stamped with the tick it happened on, plus the interrupts
//! it routed. Consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{Event, FieldEventRecord, InterruptRecord};
