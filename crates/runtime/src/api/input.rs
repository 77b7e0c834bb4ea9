//! Player inputs, world edits and query results exchanged with the worker.

use farm_core::{EntityHandle, ItemId, OrchestratorView, SlotIndex, Tick, WorldPos};
use serde::{Deserialize, Serialize};

use crate::world::{WalkMode, WorldView};

/// Raw input from the player, already mapped to world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Cursor moved over a world position.
    Hover(WorldPos),
    /// Primary click at a world position.
    Click(WorldPos),
    /// Manual movement by a world-space delta.
    Move(WorldPos),
    /// Hotbar selection.
    SelectSlot(SlotIndex),
    Cancel,
    OpenPanel,
    ClosePanel,
}

/// Changes to the world that happen outside the player's field actions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum WorldEdit {
    /// Another system rewrote an inventory slot (UI drag, chest transfer).
    SetSlot {
        slot: SlotIndex,
        item: ItemId,
        quantity: u16,
    },
    RemoveCrop(EntityHandle),
    SetRipe { handle: EntityHandle, ripe: bool },
    SetWalkMode(WalkMode),
}

/// Worker acknowledgement for one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAck {
    /// A click produced a new queued request.
    Enqueued,
    /// A click resolved nothing or hit an already reserved target.
    Ignored,
    /// Any other input was applied.
    Applied,
}

/// Result of running the worker until the queue drains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleReport {
    pub tick: Tick,
    /// `false` when the tick budget ran out first (stalled walk, paused queue
    /// with work left).
    pub settled: bool,
}

/// Read-only snapshot returned by queries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    pub tick: Tick,
    pub active_slot: Option<SlotIndex>,
    pub orchestrator: OrchestratorView,
    pub world: WorldView,
}
