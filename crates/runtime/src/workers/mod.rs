//! Worker tasks that back the runtime.
//!
//! A single field worker owns the orchestrator and the world, so every
//! mutation flows through one command channel.

mod field;

pub use field::{Command, FieldWorker};
