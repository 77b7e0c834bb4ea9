//! Field action requests.
//!
//! An [`ActionRequest`] is the unit of work flowing through the queue: what
//! to do ([`ActionKind`]), where to do it ([`ActionTarget`]) and the world
//! position the player has to reach. The target enum makes the tile/entity
//! split explicit: tile kinds always carry a cell, Harvest always carries an
//! entity handle, and the constructors are the only way to pair them.

use crate::snapshot::ActionSnapshot;
use crate::state::{CellCoord, EntityHandle, LayerIndex, WorldPos};

/// The four field actions.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Till,
    Water,
    PlantSeed,
    Harvest,
}

impl ActionKind {
    /// Tile actions address a `(layer, cell)` pair.
    pub const fn is_tile_action(self) -> bool {
        !matches!(self, ActionKind::Harvest)
    }

    /// Actions that justify themselves with an inventory snapshot.
    pub const fn requires_snapshot(self) -> bool {
        self.is_tile_action()
    }

    /// Actions that consume the item they were issued with.
    pub const fn consumes_item(self) -> bool {
        matches!(self, ActionKind::PlantSeed)
    }
}

/// What an action is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionTarget {
    Tile { layer: LayerIndex, cell: CellCoord },
    Entity(EntityHandle),
}

/// Key used to reject duplicate submissions while a target is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReservationKey {
    Tile { layer: LayerIndex, cell: CellCoord },
    Entity(EntityHandle),
}

impl From<ActionTarget> for ReservationKey {
    fn from(target: ActionTarget) -> Self {
        match target {
            ActionTarget::Tile { layer, cell } => ReservationKey::Tile { layer, cell },
            ActionTarget::Entity(handle) => ReservationKey::Entity(handle),
        }
    }
}

impl std::fmt::Display for ReservationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationKey::Tile { layer, cell } => write!(f, "{layer}{cell}"),
            ReservationKey::Entity(handle) => write!(f, "entity{handle}"),
        }
    }
}

/// One pending field action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    kind: ActionKind,
    target: ActionTarget,
    target_world_position: WorldPos,
}

impl ActionRequest {
    pub fn till(layer: LayerIndex, cell: CellCoord, world: WorldPos) -> Self {
        Self::tile_action(ActionKind::Till, layer, cell, world)
    }

    pub fn water(layer: LayerIndex, cell: CellCoord, world: WorldPos) -> Self {
        Self::tile_action(ActionKind::Water, layer, cell, world)
    }

    pub fn plant_seed(layer: LayerIndex, cell: CellCoord, world: WorldPos) -> Self {
        Self::tile_action(ActionKind::PlantSeed, layer, cell, world)
    }

    pub fn harvest(entity: EntityHandle, world: WorldPos) -> Self {
        Self {
            kind: ActionKind::Harvest,
            target: ActionTarget::Entity(entity),
            target_world_position: world,
        }
    }

    fn tile_action(kind: ActionKind, layer: LayerIndex, cell: CellCoord, world: WorldPos) -> Self {
        debug_assert!(kind.is_tile_action());
        Self {
            kind,
            target: ActionTarget::Tile { layer, cell },
            target_world_position: world,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn target(&self) -> ActionTarget {
        self.target
    }

    /// Position frozen when the request was resolved. Distance checks always
    /// use this value, never a re-sampled cursor.
    pub fn target_world_position(&self) -> WorldPos {
        self.target_world_position
    }

    pub fn reservation_key(&self) -> ReservationKey {
        self.target.into()
    }

    pub fn tile(&self) -> Option<(LayerIndex, CellCoord)> {
        match self.target {
            ActionTarget::Tile { layer, cell } => Some((layer, cell)),
            ActionTarget::Entity(_) => None,
        }
    }

    pub fn entity(&self) -> Option<EntityHandle> {
        match self.target {
            ActionTarget::Entity(handle) => Some(handle),
            ActionTarget::Tile { .. } => None,
        }
    }
}

/// A request together with the inventory snapshot that justified it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAction {
    pub request: ActionRequest,
    pub snapshot: Option<ActionSnapshot>,
}

impl PendingAction {
    pub fn new(request: ActionRequest, snapshot: Option<ActionSnapshot>) -> Self {
        Self { request, snapshot }
    }

    pub fn key(&self) -> ReservationKey {
        self.request.reservation_key()
    }

    pub fn kind(&self) -> ActionKind {
        self.request.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn tile_and_entity_targets_never_mix() {
        for kind in ActionKind::iter() {
            let request = match kind {
                ActionKind::Till => ActionRequest::till(LayerIndex(1), CellCoord::new(2, 3), WorldPos::ORIGIN),
                ActionKind::Water => ActionRequest::water(LayerIndex(1), CellCoord::new(2, 3), WorldPos::ORIGIN),
                ActionKind::PlantSeed => {
                    ActionRequest::plant_seed(LayerIndex(1), CellCoord::new(2, 3), WorldPos::ORIGIN)
                }
                ActionKind::Harvest => ActionRequest::harvest(EntityHandle::new(4, 2), WorldPos::ORIGIN),
            };

            assert_eq!(request.kind(), kind);
            assert_eq!(request.tile().is_some(), kind.is_tile_action());
            assert_eq!(request.entity().is_some(), !kind.is_tile_action());
        }
    }

    #[test]
    fn same_cell_shares_a_reservation_key_across_kinds() {
        let till = ActionRequest::till(LayerIndex(0), CellCoord::new(2, 3), WorldPos::ORIGIN);
        let water = ActionRequest::water(LayerIndex(0), CellCoord::new(2, 3), WorldPos::new(9.0, 9.0));
        let other_layer = ActionRequest::till(LayerIndex(1), CellCoord::new(2, 3), WorldPos::ORIGIN);

        assert_eq!(till.reservation_key(), water.reservation_key());
        assert_ne!(till.reservation_key(), other_layer.reservation_key());
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ActionKind::PlantSeed.to_string(), "plant_seed");
        assert_eq!(ActionKind::from_str("HARVEST").unwrap(), ActionKind::Harvest);
    }
}
