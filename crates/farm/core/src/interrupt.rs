//! Player-initiated interrupts.
//!
//! Interrupts come from the input layer, never from collaborators:
//!
//! | Interrupt      | Effect                                                   |
//! |----------------|----------------------------------------------------------|
//! | Movement       | clear queue, cancel walk, release preview lock           |
//! | Hotbar switch  | clear queue, cancel walk, then adopt the new held item   |
//! | Cancel         | clear queue, cancel walk, release preview lock           |
//! | Panel opened   | pause (walk is suspended, queue kept)                    |
//! | Panel closed   | resume                                                   |
//!
//! Manual movement always wins: the controller reports that the movement
//! input should still be applied after the queue was discarded.

use tracing::debug;

use crate::env::FieldEnv;
use crate::orchestrator::Orchestrator;
use crate::state::HeldItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interrupt {
    /// Manual movement input (WASD, stick).
    Movement,
    /// Active hotbar slot changed to a different item.
    HotbarSwitch(HeldItem),
    /// Explicit cancel key.
    Cancel,
    /// Inventory, menu or dialogue opened.
    PanelOpened,
    PanelClosed,
}

/// What the input layer should do with the input that caused the interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// Apply the movement input this tick.
    ProceedWithMovement,
    Handled,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InterruptController;

impl InterruptController {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        interrupt: Interrupt,
        orchestrator: &mut Orchestrator,
        env: &mut FieldEnv<'_>,
    ) -> InterruptOutcome {
        debug!(?interrupt, state = %orchestrator.state(), "interrupt");
        match interrupt {
            Interrupt::Movement => {
                if orchestrator.is_busy() || !orchestrator.queue().is_empty() {
                    orchestrator.clear_all(env);
                    orchestrator.cancel_navigation(env);
                    orchestrator.release_preview_lock(env);
                }
                InterruptOutcome::ProceedWithMovement
            }
            Interrupt::HotbarSwitch(held) => {
                if held != orchestrator.held_item() {
                    orchestrator.clear_all(env);
                    orchestrator.cancel_navigation(env);
                }
                orchestrator.set_held_item(held, env);
                InterruptOutcome::Handled
            }
            Interrupt::Cancel => {
                orchestrator.clear_all(env);
                orchestrator.cancel_navigation(env);
                orchestrator.release_preview_lock(env);
                InterruptOutcome::Handled
            }
            Interrupt::PanelOpened => {
                orchestrator.pause(env);
                InterruptOutcome::Handled
            }
            Interrupt::PanelClosed => {
                orchestrator.resume(env);
                InterruptOutcome::Handled
            }
        }
    }
}
