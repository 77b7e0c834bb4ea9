use super::OracleError;
use crate::state::{SlotIndex, SlotView};

/// Inventory shared with the rest of the game.
///
/// The orchestrator never locks a slot; it re-reads it right before
/// consuming (see `snapshot`).
pub trait InventoryOracle {
    /// Returns `None` for empty or unknown slots.
    fn slot(&self, index: SlotIndex) -> Option<SlotView>;

    fn consume(&mut self, index: SlotIndex, quantity: u16) -> Result<(), OracleError>;
}
