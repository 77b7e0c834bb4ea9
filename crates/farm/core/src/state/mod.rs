//! Value types shared by every component: coordinates, handles and held items.
mod common;
mod item;

pub use common::{CellCoord, EntityHandle, LayerIndex, Tick, WorldPos};
pub use item::{HeldItem, ItemId, SlotIndex, SlotView, ToolKind};
