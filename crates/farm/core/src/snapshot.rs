//! Tamper detection for inventory-backed actions.
//!
//! Walking to a far tile spans many ticks, and the inventory is shared with
//! the UI and every other system during that window. Instead of locking the
//! slot, a snapshot of it is taken when the request is resolved and compared
//! against the live slot right before the executor consumes anything. A
//! mismatch (the player swapped seeds mid-walk, the stack ran out) drops the
//! action.

use crate::action::ActionKind;
use crate::env::InventoryOracle;
use crate::state::{ItemId, SlotIndex};

/// Slot contents captured when a request was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSnapshot {
    pub item: ItemId,
    pub slot: SlotIndex,
    pub quantity_at_capture: u16,
}

/// Why a snapshot no longer matches its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotMismatch {
    #[error("{0} was emptied")]
    SlotEmptied(SlotIndex),

    #[error("{slot} now holds {found}, expected {expected}")]
    ItemChanged {
        slot: SlotIndex,
        expected: ItemId,
        found: ItemId,
    },

    #[error("{slot} holds {available}, {required} required")]
    InsufficientQuantity {
        slot: SlotIndex,
        available: u16,
        required: u16,
    },
}

/// Records item identity and quantity of `slot`. Returns `None` for an empty slot.
pub fn capture(slot: SlotIndex, inventory: &dyn InventoryOracle) -> Option<ActionSnapshot> {
    let view = inventory.slot(slot)?;
    Some(ActionSnapshot {
        item: view.item,
        slot,
        quantity_at_capture: view.quantity,
    })
}

/// Re-reads the snapshot's slot and checks it still justifies `kind`.
///
/// Tools are not consumed, so Till/Water only require the same item to be in
/// the slot. PlantSeed additionally requires `required_quantity` items.
pub fn check(
    snapshot: &ActionSnapshot,
    kind: ActionKind,
    required_quantity: u16,
    inventory: &dyn InventoryOracle,
) -> Result<(), SnapshotMismatch> {
    let view = inventory
        .slot(snapshot.slot)
        .ok_or(SnapshotMismatch::SlotEmptied(snapshot.slot))?;

    if view.quantity == 0 {
        return Err(SnapshotMismatch::SlotEmptied(snapshot.slot));
    }

    if view.item != snapshot.item {
        return Err(SnapshotMismatch::ItemChanged {
            slot: snapshot.slot,
            expected: snapshot.item,
            found: view.item,
        });
    }

    if kind.consumes_item() && view.quantity < required_quantity {
        return Err(SnapshotMismatch::InsufficientQuantity {
            slot: snapshot.slot,
            available: view.quantity,
            required: required_quantity,
        });
    }

    Ok(())
}

/// Boolean form of [`check`].
pub fn validate(
    snapshot: &ActionSnapshot,
    kind: ActionKind,
    required_quantity: u16,
    inventory: &dyn InventoryOracle,
) -> bool {
    check(snapshot, kind, required_quantity, inventory).is_ok()
}
