//! Traits describing the out-of-scope collaborators.
//!
//! The orchestrator commands movement, rendering-side previews, tile/crop
//! mutation, inventory and animation through these narrow interfaces. The
//! [`FieldEnv`] aggregate bundles them for a single call so the host can hand
//! over disjoint borrows of its own subsystems.
mod animation;
mod error;
mod field;
mod interactables;
mod inventory;
mod navigator;
mod player;
mod preview;

pub use animation::{AnimationDriver, AnimationKind, CompletionKind, CompletionTicket};
pub use error::OracleError;
pub use field::FieldMutator;
pub use interactables::{Interactable, InteractableOracle};
pub use inventory::InventoryOracle;
pub use navigator::Navigator;
pub use player::PlayerOracle;
pub use preview::{PreviewOracle, PreviewTarget};

/// Borrowed collaborators for one orchestrator call.
///
/// Built fresh by the host for every call (input event, tick, completion
/// hook); the orchestrator keeps no reference to it between calls.
pub struct FieldEnv<'a> {
    pub player: &'a dyn PlayerOracle,
    pub preview: &'a mut dyn PreviewOracle,
    pub navigator: &'a mut dyn Navigator,
    pub field: &'a mut dyn FieldMutator,
    pub inventory: &'a mut dyn InventoryOracle,
    pub interactables: &'a mut dyn InteractableOracle,
    pub animation: &'a mut dyn AnimationDriver,
}

impl<'a> FieldEnv<'a> {
    pub fn new(
        player: &'a dyn PlayerOracle,
        preview: &'a mut dyn PreviewOracle,
        navigator: &'a mut dyn Navigator,
        field: &'a mut dyn FieldMutator,
        inventory: &'a mut dyn InventoryOracle,
        interactables: &'a mut dyn InteractableOracle,
        animation: &'a mut dyn AnimationDriver,
    ) -> Self {
        Self {
            player,
            preview,
            navigator,
            field,
            inventory,
            interactables,
            animation,
        }
    }
}
