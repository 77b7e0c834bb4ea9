//! Hotbar inventory and item catalog.

use std::collections::HashMap;

use arrayvec::ArrayVec;
use farm_core::{HeldItem, InventoryOracle, ItemId, OracleError, SlotIndex, SlotView, ToolKind};
use serde::{Deserialize, Serialize};

/// Number of inventory slots.
pub const SLOT_COUNT: usize = 12;

/// What an item definition is, for held-item classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Tool(ToolKind),
    Seed,
    Weapon,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
}

/// Static item definitions.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            items: definitions.into_iter().map(|def| (def.id, def)).collect(),
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    /// Classifies the contents of `slot` into a [`HeldItem`].
    pub fn classify(&self, slot: SlotIndex, view: Option<SlotView>) -> HeldItem {
        let Some(view) = view else {
            return HeldItem::Other;
        };
        match self.get(view.item).map(|def| def.category) {
            Some(ItemCategory::Tool(tool)) => HeldItem::Tool {
                slot,
                item: view.item,
                tool,
            },
            Some(ItemCategory::Seed) => HeldItem::Seed {
                slot,
                item: view.item,
            },
            Some(ItemCategory::Weapon) => HeldItem::Weapon {
                slot,
                item: view.item,
            },
            Some(ItemCategory::Other) | None => HeldItem::Other,
        }
    }
}

/// Fixed-size slot inventory. Slots whose quantity reaches zero become empty.
#[derive(Clone, Debug)]
pub struct SlotInventory {
    slots: ArrayVec<Option<SlotView>, SLOT_COUNT>,
}

impl SlotInventory {
    pub fn new() -> Self {
        let mut slots = ArrayVec::new();
        while !slots.is_full() {
            slots.push(None);
        }
        Self { slots }
    }

    /// Replaces the contents of `slot`. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: SlotIndex, item: ItemId, quantity: u16) {
        if let Some(entry) = self.slots.get_mut(usize::from(slot.0)) {
            *entry = (quantity > 0).then_some(SlotView::new(item, quantity));
        }
    }

    pub fn clear(&mut self, slot: SlotIndex) {
        if let Some(entry) = self.slots.get_mut(usize::from(slot.0)) {
            *entry = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, SlotView)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, view)| view.map(|view| (SlotIndex(index as u16), view)))
    }
}

impl Default for SlotInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryOracle for SlotInventory {
    fn slot(&self, index: SlotIndex) -> Option<SlotView> {
        self.slots.get(usize::from(index.0)).copied().flatten()
    }

    fn consume(&mut self, index: SlotIndex, quantity: u16) -> Result<(), OracleError> {
        let entry = self
            .slots
            .get_mut(usize::from(index.0))
            .ok_or(OracleError::SlotEmpty(index))?;
        let view = entry.as_mut().ok_or(OracleError::SlotEmpty(index))?;
        if view.quantity < quantity {
            return Err(OracleError::InsufficientQuantity {
                slot: index,
                available: view.quantity,
                requested: quantity,
            });
        }
        view.quantity -= quantity;
        if view.quantity == 0 {
            *entry = None;
        }
        Ok(())
    }
}
