//! Host runtime for the field action orchestrator.
//!
//! This crate embeds [`farm_core::Orchestrator`] in a tick-driven worker
//! together with an in-memory farm world. Consumers build a [`Runtime`],
//! feed it player input through [`RuntimeHandle`], and subscribe to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`world`] implements every collaborator trait in memory
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod world;

mod workers;

pub use api::{
    FieldView, InputAck, PlayerInput, Result, RuntimeError, RuntimeHandle, SettleReport,
    WorldEdit,
};
pub use events::{Event, EventBus, FieldEventRecord, InterruptRecord, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use world::{AnimationTimings, FarmWorld, LayoutError, WalkMode, WorldLayout, WorldView};
