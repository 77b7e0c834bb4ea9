//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on the worker and the world.

pub mod errors;
pub mod handle;
pub mod input;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use input::{FieldView, InputAck, PlayerInput, SettleReport, WorldEdit};
