use crate::state::{CellCoord, LayerIndex, WorldPos};

/// Cell currently hovered or targeted by the tool preview.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewTarget {
    pub layer: LayerIndex,
    pub cell: CellCoord,
    pub world_pos: WorldPos,
    pub is_valid: bool,
    pub is_in_range: bool,
}

/// Target preview shown while a tool or seed is held.
///
/// Locking freezes the displayed target so that cursor movement during a
/// walk does not visually retarget the committed request.
pub trait PreviewOracle {
    fn current_target(&self) -> Option<PreviewTarget>;

    fn lock(&mut self, world_pos: WorldPos, cell: CellCoord, layer: LayerIndex);

    fn unlock(&mut self);
}
