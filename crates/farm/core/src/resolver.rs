//! Turns a raw click into a candidate field action.
//!
//! Resolution order is fixed: harvestable entities under the cursor win over
//! whatever the player holds, so a click on a ripe crop always harvests even
//! with a hoe in hand. Only when no entity qualifies does the held item
//! decide between Till, Water and PlantSeed.

use tracing::trace;

use crate::action::{ActionRequest, PendingAction};
use crate::env::{FieldEnv, PreviewTarget};
use crate::snapshot;
use crate::state::{HeldItem, ItemId, SlotIndex, ToolKind, WorldPos};

/// Cursor (or gamepad target) position for one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetContext {
    pub cursor: WorldPos,
}

impl TargetContext {
    pub const fn new(cursor: WorldPos) -> Self {
        Self { cursor }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TargetResolver {
    harvest_scan_radius: f32,
}

impl TargetResolver {
    pub fn new(harvest_scan_radius: f32) -> Self {
        Self {
            harvest_scan_radius,
        }
    }

    /// Produces a candidate action, or `None` if nothing valid is targeted.
    ///
    /// Pure query: never mutates any collaborator.
    pub fn try_resolve(
        &self,
        held: &HeldItem,
        context: &TargetContext,
        env: &FieldEnv<'_>,
    ) -> Option<PendingAction> {
        if let Some(harvest) = self.resolve_harvest(context, env) {
            return Some(harvest);
        }

        match *held {
            HeldItem::Tool { slot, tool, .. } => self.resolve_tool(slot, tool, env),
            HeldItem::Seed { slot, item } => self.resolve_seed(slot, item, env),
            HeldItem::Weapon { .. } | HeldItem::Other => None,
        }
    }

    /// First interactable on the player's layer whose capability check passes.
    fn resolve_harvest(&self, context: &TargetContext, env: &FieldEnv<'_>) -> Option<PendingAction> {
        let layer = env.player.current_layer();

        env.interactables
            .nearby(context.cursor, self.harvest_scan_radius)
            .into_iter()
            .filter(|candidate| candidate.layer == layer)
            .find(|candidate| env.interactables.can_interact(candidate.handle))
            .map(|candidate| {
                trace!(entity = %candidate.handle, "resolved harvest target");
                PendingAction::new(ActionRequest::harvest(candidate.handle, candidate.position), None)
            })
    }

    fn resolve_tool(&self, slot: SlotIndex, tool: ToolKind, env: &FieldEnv<'_>) -> Option<PendingAction> {
        let target = valid_preview(env)?;
        let snapshot = snapshot::capture(slot, &*env.inventory)?;

        let request = match tool {
            ToolKind::Hoe => ActionRequest::till(target.layer, target.cell, target.world_pos),
            ToolKind::WateringCan => ActionRequest::water(target.layer, target.cell, target.world_pos),
        };
        Some(PendingAction::new(request, Some(snapshot)))
    }

    fn resolve_seed(&self, slot: SlotIndex, item: ItemId, env: &FieldEnv<'_>) -> Option<PendingAction> {
        let target = valid_preview(env)?;
        let snapshot = snapshot::capture(slot, &*env.inventory)?;
        if snapshot.item != item || snapshot.quantity_at_capture == 0 {
            return None;
        }

        let request = ActionRequest::plant_seed(target.layer, target.cell, target.world_pos);
        Some(PendingAction::new(request, Some(snapshot)))
    }
}

fn valid_preview(env: &FieldEnv<'_>) -> Option<PreviewTarget> {
    env.preview.current_target().filter(|target| target.is_valid)
}
