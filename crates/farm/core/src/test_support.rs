//! In-memory collaborators for unit tests.
//!
//! Grid cells are one world unit wide; crops sit on cell centres.

use std::collections::{HashMap, HashSet};

use crate::env::{
    AnimationDriver, AnimationKind, CompletionTicket, FieldEnv, FieldMutator, Interactable,
    InteractableOracle, InventoryOracle, Navigator, OracleError, PlayerOracle, PreviewOracle,
    PreviewTarget,
};
use crate::resolver::TargetContext;
use crate::state::{
    CellCoord, EntityHandle, HeldItem, ItemId, LayerIndex, SlotIndex, SlotView, ToolKind, WorldPos,
};

pub const HOE: ItemId = ItemId(1);
pub const WATERING_CAN: ItemId = ItemId(2);
pub const SEEDS: ItemId = ItemId(10);
pub const OTHER_SEEDS: ItemId = ItemId(11);

pub const HOE_SLOT: SlotIndex = SlotIndex(0);
pub const CAN_SLOT: SlotIndex = SlotIndex(1);
pub const SEED_SLOT: SlotIndex = SlotIndex(2);

pub struct MockPlayer {
    pub center: WorldPos,
    pub layer: LayerIndex,
}

impl PlayerOracle for MockPlayer {
    fn collider_center(&self) -> WorldPos {
        self.center
    }

    fn current_layer(&self) -> LayerIndex {
        self.layer
    }
}

#[derive(Default)]
pub struct MockPreview {
    pub hovered: Option<(LayerIndex, CellCoord)>,
    pub valid: bool,
    pub locked: Option<(WorldPos, CellCoord, LayerIndex)>,
    pub unlocks: usize,
}

impl PreviewOracle for MockPreview {
    fn current_target(&self) -> Option<PreviewTarget> {
        let (layer, cell) = self.hovered?;
        Some(PreviewTarget {
            layer,
            cell,
            world_pos: cell.center(1.0),
            is_valid: self.valid,
            is_in_range: true,
        })
    }

    fn lock(&mut self, world_pos: WorldPos, cell: CellCoord, layer: LayerIndex) {
        self.locked = Some((world_pos, cell, layer));
    }

    fn unlock(&mut self) {
        self.locked = None;
        self.unlocks += 1;
    }
}

#[derive(Default)]
pub struct MockNavigator {
    pub destination: Option<(WorldPos, f32)>,
    pub active: bool,
    pub requests: usize,
    pub cancels: usize,
}

impl Navigator for MockNavigator {
    fn move_to(&mut self, target: WorldPos, stop_distance: f32) {
        self.destination = Some((target, stop_distance));
        self.active = true;
        self.requests += 1;
    }

    fn force_cancel(&mut self) {
        self.active = false;
        self.cancels += 1;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

type Tile = (LayerIndex, CellCoord);

#[derive(Default)]
pub struct MockField {
    tilled: HashSet<Tile>,
    watered: HashSet<Tile>,
    blocked: HashSet<Tile>,
    crops: HashMap<Tile, ItemId>,
    /// Fail every `plant` call even where `can_plant_at` agrees.
    pub reject_plants: bool,
}

impl MockField {
    pub fn block(&mut self, layer: LayerIndex, cell: CellCoord) {
        self.blocked.insert((layer, cell));
    }

    pub fn is_tilled(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.tilled.contains(&(layer, cell))
    }

    pub fn is_watered(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.watered.contains(&(layer, cell))
    }

    pub fn crop_at(&self, layer: LayerIndex, cell: CellCoord) -> Option<ItemId> {
        self.crops.get(&(layer, cell)).copied()
    }
}

impl FieldMutator for MockField {
    fn can_till_at(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        !self.blocked.contains(&(layer, cell)) && !self.is_tilled(layer, cell)
    }

    fn till(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<(), OracleError> {
        if self.blocked.contains(&(layer, cell)) {
            return Err(OracleError::NotTillable { layer, cell });
        }
        self.tilled.insert((layer, cell));
        Ok(())
    }

    fn set_watered(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<(), OracleError> {
        if !self.is_tilled(layer, cell) {
            return Err(OracleError::NotTilled { layer, cell });
        }
        self.watered.insert((layer, cell));
        Ok(())
    }

    fn can_plant_at(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.is_tilled(layer, cell) && !self.crops.contains_key(&(layer, cell))
    }

    fn plant(&mut self, layer: LayerIndex, cell: CellCoord, seed: ItemId) -> Result<(), OracleError> {
        if !self.is_tilled(layer, cell) {
            return Err(OracleError::NotTilled { layer, cell });
        }
        if self.reject_plants || self.crops.contains_key(&(layer, cell)) {
            return Err(OracleError::AlreadyPlanted { layer, cell });
        }
        self.crops.insert((layer, cell), seed);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockInventory {
    slots: HashMap<SlotIndex, SlotView>,
}

impl MockInventory {
    pub fn set(&mut self, slot: SlotIndex, item: ItemId, quantity: u16) {
        self.slots.insert(slot, SlotView::new(item, quantity));
    }

    pub fn clear(&mut self, slot: SlotIndex) {
        self.slots.remove(&slot);
    }

    pub fn quantity(&self, slot: SlotIndex) -> u16 {
        self.slots.get(&slot).map_or(0, |view| view.quantity)
    }
}

impl InventoryOracle for MockInventory {
    fn slot(&self, index: SlotIndex) -> Option<SlotView> {
        self.slots.get(&index).copied()
    }

    fn consume(&mut self, index: SlotIndex, quantity: u16) -> Result<(), OracleError> {
        let view = self
            .slots
            .get_mut(&index)
            .ok_or(OracleError::SlotEmpty(index))?;
        if view.quantity < quantity {
            return Err(OracleError::InsufficientQuantity {
                slot: index,
                available: view.quantity,
                requested: quantity,
            });
        }
        view.quantity -= quantity;
        Ok(())
    }
}

struct MockEntity {
    handle: EntityHandle,
    layer: LayerIndex,
    position: WorldPos,
    ripe: bool,
}

#[derive(Default)]
pub struct MockEntities {
    entities: Vec<MockEntity>,
    next_index: u32,
    pub harvested: Vec<EntityHandle>,
}

impl MockEntities {
    pub fn spawn(&mut self, layer: LayerIndex, position: WorldPos, ripe: bool) -> EntityHandle {
        let handle = EntityHandle::new(self.next_index, 1);
        self.next_index += 1;
        self.entities.push(MockEntity {
            handle,
            layer,
            position,
            ripe,
        });
        handle
    }

    pub fn remove(&mut self, handle: EntityHandle) {
        self.entities.retain(|entity| entity.handle != handle);
    }

    pub fn set_ripe(&mut self, handle: EntityHandle, ripe: bool) {
        if let Some(entity) = self.entities.iter_mut().find(|entity| entity.handle == handle) {
            entity.ripe = ripe;
        }
    }

    fn find(&self, handle: EntityHandle) -> Option<&MockEntity> {
        self.entities.iter().find(|entity| entity.handle == handle)
    }
}

impl InteractableOracle for MockEntities {
    fn nearby(&self, center: WorldPos, radius: f32) -> Vec<Interactable> {
        let mut found: Vec<_> = self
            .entities
            .iter()
            .filter(|entity| entity.position.distance(center) <= radius)
            .map(|entity| Interactable {
                handle: entity.handle,
                layer: entity.layer,
                position: entity.position,
            })
            .collect();
        found.sort_by(|a, b| a.position.distance(center).total_cmp(&b.position.distance(center)));
        found
    }

    fn get(&self, handle: EntityHandle) -> Option<Interactable> {
        self.find(handle).map(|entity| Interactable {
            handle: entity.handle,
            layer: entity.layer,
            position: entity.position,
        })
    }

    fn can_interact(&self, handle: EntityHandle) -> bool {
        self.find(handle).is_some_and(|entity| entity.ripe)
    }

    fn interact(&mut self, handle: EntityHandle) -> Result<(), OracleError> {
        let entity = self.find(handle).ok_or(OracleError::EntityNotFound(handle))?;
        if !entity.ripe {
            return Err(OracleError::InteractRejected(handle));
        }
        self.remove(handle);
        self.harvested.push(handle);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockAnimator {
    pub played: Vec<(AnimationKind, CompletionTicket)>,
}

impl MockAnimator {
    pub fn last_ticket(&self) -> CompletionTicket {
        self.played.last().map(|(_, ticket)| *ticket).unwrap()
    }
}

impl AnimationDriver for MockAnimator {
    fn play(&mut self, kind: AnimationKind, ticket: CompletionTicket) {
        self.played.push((kind, ticket));
    }
}

/// Player standing at the centre of cell (0, 0) holding a stocked hotbar.
pub struct MockWorld {
    pub player: MockPlayer,
    pub preview: MockPreview,
    pub navigator: MockNavigator,
    pub field: MockField,
    pub inventory: MockInventory,
    pub entities: MockEntities,
    pub animator: MockAnimator,
}

impl MockWorld {
    pub fn new() -> Self {
        let mut inventory = MockInventory::default();
        inventory.set(HOE_SLOT, HOE, 1);
        inventory.set(CAN_SLOT, WATERING_CAN, 1);
        inventory.set(SEED_SLOT, SEEDS, 5);

        Self {
            player: MockPlayer {
                center: CellCoord::ORIGIN.center(1.0),
                layer: LayerIndex::GROUND,
            },
            preview: MockPreview {
                valid: true,
                ..MockPreview::default()
            },
            navigator: MockNavigator::default(),
            field: MockField::default(),
            inventory,
            entities: MockEntities::default(),
            animator: MockAnimator::default(),
        }
    }

    pub fn env(&mut self) -> FieldEnv<'_> {
        FieldEnv::new(
            &self.player,
            &mut self.preview,
            &mut self.navigator,
            &mut self.field,
            &mut self.inventory,
            &mut self.entities,
            &mut self.animator,
        )
    }

    pub fn hover(&mut self, layer: LayerIndex, cell: CellCoord) {
        self.preview.hovered = Some((layer, cell));
    }

    /// Cursor over the hovered cell, or over the player when nothing is hovered.
    pub fn cursor_context(&self) -> TargetContext {
        let cursor = self
            .preview
            .hovered
            .map_or(self.player.center, |(_, cell)| cell.center(1.0));
        TargetContext::new(cursor)
    }

    pub fn hold_hoe(&self) -> HeldItem {
        HeldItem::Tool {
            slot: HOE_SLOT,
            item: HOE,
            tool: ToolKind::Hoe,
        }
    }

    pub fn hold_watering_can(&self) -> HeldItem {
        HeldItem::Tool {
            slot: CAN_SLOT,
            item: WATERING_CAN,
            tool: ToolKind::WateringCan,
        }
    }

    pub fn hold_seeds(&self) -> HeldItem {
        HeldItem::Seed {
            slot: SEED_SLOT,
            item: SEEDS,
        }
    }

    pub fn spawn_crop(&mut self, layer: LayerIndex, cell: CellCoord, ripe: bool) -> EntityHandle {
        self.entities.spawn(layer, cell.center(1.0), ripe)
    }

    /// Places the player `offset` units left of the navigator destination and
    /// ends the walk.
    pub fn stop_walking_at(&mut self, offset: f32) {
        let (target, _) = self.navigator.destination.unwrap();
        self.player.center = WorldPos::new(target.x - offset, target.y);
        self.navigator.active = false;
    }

    /// Places the player just inside the stop distance while the walk continues.
    pub fn reach_stop_distance(&mut self) {
        let (target, stop_distance) = self.navigator.destination.unwrap();
        self.player.center = WorldPos::new(target.x - stop_distance * 0.95, target.y);
    }
}
