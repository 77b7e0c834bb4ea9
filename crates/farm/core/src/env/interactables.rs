use super::OracleError;
use crate::state::{EntityHandle, LayerIndex, WorldPos};

/// A harvestable entity as reported by the entity table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interactable {
    pub handle: EntityHandle,
    pub layer: LayerIndex,
    pub position: WorldPos,
}

/// Entity table of interactable objects (crops, forage).
pub trait InteractableOracle {
    /// Entities within `radius` of `center`, on any layer, nearest first.
    fn nearby(&self, center: WorldPos, radius: f32) -> Vec<Interactable>;

    /// Resolves a handle; `None` once the entity has been removed.
    fn get(&self, handle: EntityHandle) -> Option<Interactable>;

    /// Capability check ("is this crop ready").
    fn can_interact(&self, handle: EntityHandle) -> bool;

    fn interact(&mut self, handle: EntityHandle) -> Result<(), OracleError>;
}
