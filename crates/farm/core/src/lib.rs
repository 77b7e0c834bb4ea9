//! Click-to-act field interaction for a top-down farming game.
//!
//! `farm-core` turns player clicks into queued field actions (till, water,
//! plant, harvest), walks the player into range of each target and applies
//! the action once it is reachable. The crate is pure and single-threaded:
//! movement, rendering, tiles, inventory and animation live behind the traits
//! in [`env`], and the host drives [`orchestrator::Orchestrator`] once per
//! simulation tick and from its completion callbacks.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod executor;
pub mod interrupt;
pub mod orchestrator;
pub mod queue;
pub mod resolver;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_support;

pub use action::{ActionKind, ActionRequest, ActionTarget, PendingAction, ReservationKey};
pub use config::FarmConfig;
pub use env::{
    AnimationDriver, AnimationKind, CompletionKind, CompletionTicket, FieldEnv, FieldMutator,
    Interactable, InteractableOracle, InventoryOracle, Navigator, OracleError, PlayerOracle,
    PreviewOracle, PreviewTarget,
};
pub use error::{ErrorSeverity, FieldError};
pub use executor::{ActionExecutor, Completion, ExecuteError};
pub use interrupt::{Interrupt, InterruptController, InterruptOutcome};
pub use orchestrator::{DropReason, FieldEvent, NavigationState, Orchestrator, OrchestratorView};
pub use queue::ActionQueue;
pub use resolver::{TargetContext, TargetResolver};
pub use snapshot::{ActionSnapshot, SnapshotMismatch};
pub use state::{
    CellCoord, EntityHandle, HeldItem, ItemId, LayerIndex, SlotIndex, SlotView, Tick, ToolKind,
    WorldPos,
};
