//! In-memory farm world implementing every collaborator trait.
//!
//! [`FarmWorld`] owns one instance of each collaborator and lends them to the
//! orchestrator through [`FarmWorld::env`]. Time only moves when the worker
//! calls [`FarmWorld::advance_navigation`] and
//! [`FarmWorld::advance_animations`].
mod animator;
mod entities;
mod inventory;
mod layout;
mod navigator;
mod player;
mod preview;
mod tiles;

use farm_core::{
    CellCoord, CompletionKind, CompletionTicket, EntityHandle, FieldEnv, HeldItem, InventoryOracle,
    ItemId, LayerIndex, Navigator, PlayerOracle, PreviewTarget, SlotIndex, SlotView, TargetContext,
    WorldPos,
};
use serde::Serialize;

pub use animator::{AnimationTimings, TimedAnimator};
pub use entities::{Crop, EntityTable};
pub use inventory::{ItemCatalog, ItemCategory, ItemDefinition, SLOT_COUNT, SlotInventory};
pub use layout::{
    CropSpawn, FieldPatch, LayoutError, PlayerSpawn, SlotStack, TileRef, WorldLayout,
};
pub use navigator::{WalkMode, WalkingNavigator};
pub use player::PlayerBody;
pub use preview::CursorPreview;
pub use tiles::{SoilTile, TileGrid};

pub struct FarmWorld {
    cell_size: f32,
    interaction_range: f32,
    cursor: WorldPos,
    player: PlayerBody,
    preview: CursorPreview,
    navigator: WalkingNavigator,
    tiles: TileGrid,
    inventory: SlotInventory,
    catalog: ItemCatalog,
    entities: EntityTable,
    animator: TimedAnimator,
}

impl FarmWorld {
    pub fn from_layout(
        layout: WorldLayout,
        walk_speed: f32,
        timings: AnimationTimings,
        interaction_range: f32,
    ) -> Self {
        let mut tiles = TileGrid::new();
        for patch in &layout.patches {
            tiles.add_patch(patch.layer, patch.min, patch.max);
        }
        for tile in &layout.blocked {
            tiles.block(tile.layer, tile.cell);
        }

        let mut inventory = SlotInventory::new();
        for stack in &layout.inventory {
            inventory.set(stack.slot, stack.item, stack.quantity);
        }

        let mut entities = EntityTable::new();
        for spawn in &layout.crops {
            entities.spawn(Crop {
                layer: spawn.layer,
                position: spawn.cell.center(layout.cell_size),
                produce: spawn.produce,
                ripe: spawn.ripe,
            });
        }

        let mut navigator = WalkingNavigator::new(walk_speed);
        navigator.set_mode(layout.walk_mode);

        let player = PlayerBody::new(
            layout.player.feet,
            layout.player.collider_offset,
            layout.player.layer,
        );

        Self {
            cell_size: layout.cell_size,
            interaction_range,
            cursor: player.collider_center(),
            player,
            preview: CursorPreview::new(),
            navigator,
            tiles,
            inventory,
            catalog: ItemCatalog::new(layout.items),
            entities,
            animator: TimedAnimator::new(timings),
        }
    }

    /// Borrows every collaborator for one orchestrator call.
    pub fn env(&mut self) -> FieldEnv<'_> {
        FieldEnv::new(
            &self.player,
            &mut self.preview,
            &mut self.navigator,
            &mut self.tiles,
            &mut self.inventory,
            &mut self.entities,
            &mut self.animator,
        )
    }

    /// Moves the cursor and refreshes the preview target under it.
    pub fn hover(&mut self, cursor: WorldPos) {
        self.cursor = cursor;
        let layer = self.player.current_layer();
        let cell = cursor.to_cell(self.cell_size);
        let world_pos = cell.center(self.cell_size);
        self.preview.set_hovered(Some(PreviewTarget {
            layer,
            cell,
            world_pos,
            is_valid: self.tiles.contains(layer, cell),
            is_in_range: self.player.collider_center().distance(world_pos) <= self.interaction_range,
        }));
    }

    pub fn target_context(&self) -> TargetContext {
        TargetContext::new(self.cursor)
    }

    /// Held item for the given hotbar slot.
    pub fn classify_slot(&self, slot: SlotIndex) -> HeldItem {
        self.catalog.classify(slot, self.inventory.slot(slot))
    }

    /// Manual movement.
    pub fn move_player(&mut self, delta: WorldPos) {
        self.player.translate(delta);
    }

    pub fn set_walk_mode(&mut self, mode: WalkMode) {
        self.navigator.set_mode(mode);
    }

    pub fn advance_navigation(&mut self) {
        self.navigator.advance(&mut self.player);
    }

    pub fn advance_animations(&mut self) -> Vec<(CompletionKind, CompletionTicket)> {
        self.animator.advance()
    }

    pub fn navigator_active(&self) -> bool {
        self.navigator.is_active()
    }

    pub fn animating(&self) -> bool {
        self.animator.is_playing()
    }

    pub fn set_crop_ripe(&mut self, handle: EntityHandle, ripe: bool) -> bool {
        self.entities.set_ripe(handle, ripe)
    }

    /// Removes a crop outside of the field action flow (eaten by crows).
    pub fn remove_crop(&mut self, handle: EntityHandle) -> bool {
        self.entities.despawn(handle).is_some()
    }

    pub fn set_slot(&mut self, slot: SlotIndex, item: ItemId, quantity: u16) {
        self.inventory.set(slot, item, quantity);
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn inventory(&self) -> &SlotInventory {
        &self.inventory
    }

    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    pub fn navigator(&self) -> &WalkingNavigator {
        &self.navigator
    }

    pub fn preview(&self) -> &CursorPreview {
        &self.preview
    }

    pub fn view(&self) -> WorldView {
        WorldView {
            player: self.player.collider_center(),
            layer: self.player.current_layer(),
            walking: self.navigator.destination().is_some(),
            locked_cell: self.preview.locked().map(|target| target.cell),
            tiles: self
                .tiles
                .iter()
                .filter(|(_, _, tile)| tile.tilled || tile.watered || tile.crop.is_some())
                .map(|(layer, cell, tile)| TileView {
                    layer,
                    cell,
                    tile: *tile,
                })
                .collect(),
            inventory: self
                .inventory
                .iter()
                .map(|(slot, view)| SlotEntry { slot, view })
                .collect(),
            crops: self
                .entities
                .iter()
                .map(|(handle, crop)| CropView {
                    handle,
                    crop: *crop,
                })
                .collect(),
            harvested: self.entities.harvested().to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileView {
    pub layer: LayerIndex,
    pub cell: CellCoord,
    #[serde(flatten)]
    pub tile: SoilTile,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotEntry {
    pub slot: SlotIndex,
    #[serde(flatten)]
    pub view: SlotView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CropView {
    pub handle: EntityHandle,
    #[serde(flatten)]
    pub crop: Crop,
}

/// Serializable snapshot of the world for queries and summaries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldView {
    pub player: WorldPos,
    pub layer: LayerIndex,
    pub walking: bool,
    pub locked_cell: Option<CellCoord>,
    /// Cells that have been worked (tilled, watered or planted).
    pub tiles: Vec<TileView>,
    pub inventory: Vec<SlotEntry>,
    pub crops: Vec<CropView>,
    pub harvested: Vec<ItemId>,
}
