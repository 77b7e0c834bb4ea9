//! Held-item classification.
//!
//! The input layer classifies the active hotbar slot exactly once into a
//! [`HeldItem`]; every downstream decision matches on this closed set instead
//! of inspecting item types dynamically.

use std::fmt;

/// Identity of an item definition (hoe, parsnip seeds, copper sword, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// Index of an inventory slot (hotbar slots come first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotIndex(pub u16);

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot:{}", self.0)
    }
}

/// Read-only view of an occupied inventory slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotView {
    pub item: ItemId,
    pub quantity: u16,
}

impl SlotView {
    pub const fn new(item: ItemId, quantity: u16) -> Self {
        Self { item, quantity }
    }
}

/// Field tools that produce tile actions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ToolKind {
    Hoe,
    WateringCan,
}

/// What the player is currently holding, resolved once per input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeldItem {
    Tool {
        slot: SlotIndex,
        item: ItemId,
        tool: ToolKind,
    },
    Seed {
        slot: SlotIndex,
        item: ItemId,
    },
    Weapon {
        slot: SlotIndex,
        item: ItemId,
    },
    /// Empty hand or an item with no field interaction.
    #[default]
    Other,
}

impl HeldItem {
    /// Tools and seeds show a target preview while the orchestrator is quiescent.
    pub const fn shows_preview(&self) -> bool {
        matches!(self, HeldItem::Tool { .. } | HeldItem::Seed { .. })
    }

    /// Inventory slot backing this item, if any.
    pub const fn slot(&self) -> Option<SlotIndex> {
        match self {
            HeldItem::Tool { slot, .. } | HeldItem::Seed { slot, .. } | HeldItem::Weapon { slot, .. } => {
                Some(*slot)
            }
            HeldItem::Other => None,
        }
    }
}
