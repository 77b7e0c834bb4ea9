//! Generational table of harvestable crops.
//!
//! Removing an entity bumps its slot generation, so handles held by queued
//! requests go stale instead of dangling or aliasing a newer crop.

use farm_core::{EntityHandle, Interactable, InteractableOracle, ItemId, LayerIndex, OracleError, WorldPos};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Crop {
    pub layer: LayerIndex,
    pub position: WorldPos,
    pub produce: ItemId,
    pub ripe: bool,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    crop: Option<Crop>,
}

#[derive(Clone, Debug, Default)]
pub struct EntityTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    harvested: Vec<ItemId>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, crop: Crop) -> EntityHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.crop = Some(crop);
            return EntityHandle::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            crop: Some(crop),
        });
        EntityHandle::new(index, 0)
    }

    /// Removes the entity; returns `None` for stale handles.
    pub fn despawn(&mut self, handle: EntityHandle) -> Option<Crop> {
        let slot = self.slot_mut(handle)?;
        let crop = slot.crop.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(crop)
    }

    pub fn crop(&self, handle: EntityHandle) -> Option<&Crop> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.crop.as_ref())
    }

    pub fn set_ripe(&mut self, handle: EntityHandle, ripe: bool) -> bool {
        match self.slot_mut(handle).and_then(|slot| slot.crop.as_mut()) {
            Some(crop) => {
                crop.ripe = ripe;
                true
            }
            None => false,
        }
    }

    /// Produce collected so far, in harvest order.
    pub fn harvested(&self) -> &[ItemId] {
        &self.harvested
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Crop)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.crop
                .as_ref()
                .map(|crop| (EntityHandle::new(index as u32, slot.generation), crop))
        })
    }

    fn slot_mut(&mut self, handle: EntityHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }
}

fn describe(handle: EntityHandle, crop: &Crop) -> Interactable {
    Interactable {
        handle,
        layer: crop.layer,
        position: crop.position,
    }
}

impl InteractableOracle for EntityTable {
    fn nearby(&self, center: WorldPos, radius: f32) -> Vec<Interactable> {
        let mut found: Vec<_> = self
            .iter()
            .filter(|(_, crop)| crop.position.distance(center) <= radius)
            .map(|(handle, crop)| describe(handle, crop))
            .collect();
        found.sort_by(|a, b| {
            a.position
                .distance(center)
                .total_cmp(&b.position.distance(center))
        });
        found
    }

    fn get(&self, handle: EntityHandle) -> Option<Interactable> {
        self.crop(handle).map(|crop| describe(handle, crop))
    }

    fn can_interact(&self, handle: EntityHandle) -> bool {
        self.crop(handle).is_some_and(|crop| crop.ripe)
    }

    fn interact(&mut self, handle: EntityHandle) -> Result<(), OracleError> {
        let crop = self.crop(handle).ok_or(OracleError::EntityNotFound(handle))?;
        if !crop.ripe {
            return Err(OracleError::InteractRejected(handle));
        }
        if let Some(crop) = self.despawn(handle) {
            self.harvested.push(crop.produce);
        }
        Ok(())
    }
}
