//! Declarative world description loaded from RON.

use std::path::Path;

use farm_core::{CellCoord, ItemId, LayerIndex, SlotIndex, ToolKind, WorldPos};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::inventory::{ItemCategory, ItemDefinition};
use super::navigator::WalkMode;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file")]
    Io(#[from] std::io::Error),

    #[error("invalid layout: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub feet: WorldPos,
    pub collider_offset: WorldPos,
    pub layer: LayerIndex,
}

/// Rectangle of farmable soil, inclusive on both corners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldPatch {
    pub layer: LayerIndex,
    pub min: CellCoord,
    pub max: CellCoord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRef {
    pub layer: LayerIndex,
    pub cell: CellCoord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotStack {
    pub slot: SlotIndex,
    pub item: ItemId,
    pub quantity: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropSpawn {
    pub layer: LayerIndex,
    pub cell: CellCoord,
    pub produce: ItemId,
    pub ripe: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub cell_size: f32,
    pub player: PlayerSpawn,
    pub patches: Vec<FieldPatch>,
    pub blocked: Vec<TileRef>,
    pub items: Vec<ItemDefinition>,
    pub inventory: Vec<SlotStack>,
    pub crops: Vec<CropSpawn>,
    pub walk_mode: WalkMode,
}

impl WorldLayout {
    pub fn from_ron(text: &str) -> Result<Self, LayoutError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// An 8x8 ground patch, a stocked hotbar and two crops in the far corner.
    pub fn demo() -> Self {
        const HOE: ItemId = ItemId(1);
        const WATERING_CAN: ItemId = ItemId(2);
        const PARSNIP_SEEDS: ItemId = ItemId(10);
        const PARSNIP: ItemId = ItemId(20);
        const SWORD: ItemId = ItemId(30);

        let item = |id, name: &str, category| ItemDefinition {
            id,
            name: name.to_string(),
            category,
        };
        let stack = |slot, item, quantity| SlotStack {
            slot: SlotIndex(slot),
            item,
            quantity,
        };
        let crop = |x, y, ripe| CropSpawn {
            layer: LayerIndex::GROUND,
            cell: CellCoord::new(x, y),
            produce: PARSNIP,
            ripe,
        };

        Self {
            cell_size: 1.0,
            player: PlayerSpawn {
                feet: WorldPos::new(0.5, 0.25),
                collider_offset: WorldPos::new(0.0, 0.25),
                layer: LayerIndex::GROUND,
            },
            patches: vec![FieldPatch {
                layer: LayerIndex::GROUND,
                min: CellCoord::new(0, 0),
                max: CellCoord::new(7, 7),
            }],
            blocked: vec![TileRef {
                layer: LayerIndex::GROUND,
                cell: CellCoord::new(3, 3),
            }],
            items: vec![
                item(HOE, "hoe", ItemCategory::Tool(ToolKind::Hoe)),
                item(WATERING_CAN, "watering can", ItemCategory::Tool(ToolKind::WateringCan)),
                item(PARSNIP_SEEDS, "parsnip seeds", ItemCategory::Seed),
                item(PARSNIP, "parsnip", ItemCategory::Other),
                item(SWORD, "rusty sword", ItemCategory::Weapon),
            ],
            inventory: vec![
                stack(0, HOE, 1),
                stack(1, WATERING_CAN, 1),
                stack(2, PARSNIP_SEEDS, 5),
                stack(3, SWORD, 1),
            ],
            crops: vec![crop(6, 6, true), crop(6, 5, false)],
            walk_mode: WalkMode::Free,
        }
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            player: PlayerSpawn {
                feet: WorldPos::ORIGIN,
                collider_offset: WorldPos::ORIGIN,
                layer: LayerIndex::GROUND,
            },
            patches: Vec::new(),
            blocked: Vec::new(),
            items: Vec::new(),
            inventory: Vec::new(),
            crops: Vec::new(),
            walk_mode: WalkMode::Free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_layout_fills_defaults() {
        let layout = WorldLayout::from_ron(
            "(patches: [(layer: (0), min: (x: 0, y: 0), max: (x: 1, y: 1))], walk_mode: Blocked)",
        )
        .unwrap();

        assert_eq!(layout.cell_size, 1.0);
        assert_eq!(layout.patches.len(), 1);
        assert_eq!(layout.walk_mode, WalkMode::Blocked);
        assert!(layout.inventory.is_empty());
    }

    #[test]
    fn demo_layout_survives_a_file_round_trip() {
        let text = ron::ser::to_string_pretty(&WorldLayout::demo(), Default::default()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = WorldLayout::load(file.path()).unwrap();

        assert_eq!(loaded, WorldLayout::demo());
    }

    #[test]
    fn malformed_layout_reports_parse_error() {
        assert!(matches!(
            WorldLayout::from_ron("(cell_size: \"wide\")"),
            Err(LayoutError::Parse(_))
        ));
    }
}
