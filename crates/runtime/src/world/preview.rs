//! Cursor-driven target preview.

use farm_core::{CellCoord, LayerIndex, PreviewOracle, PreviewTarget, WorldPos};

/// Tracks the hovered cell and the cell frozen by a committed request.
///
/// Clicks always resolve against the hovered cell; the lock only changes what
/// is displayed.
#[derive(Clone, Debug, Default)]
pub struct CursorPreview {
    hovered: Option<PreviewTarget>,
    locked: Option<PreviewTarget>,
}

impl CursorPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hovered(&mut self, target: Option<PreviewTarget>) {
        self.hovered = target;
    }

    pub fn locked(&self) -> Option<PreviewTarget> {
        self.locked
    }

    /// Cell the UI should highlight.
    pub fn displayed(&self) -> Option<PreviewTarget> {
        self.locked.or(self.hovered)
    }
}

impl PreviewOracle for CursorPreview {
    fn current_target(&self) -> Option<PreviewTarget> {
        self.hovered
    }

    fn lock(&mut self, world_pos: WorldPos, cell: CellCoord, layer: LayerIndex) {
        self.locked = Some(PreviewTarget {
            layer,
            cell,
            world_pos,
            is_valid: true,
            is_in_range: false,
        });
    }

    fn unlock(&mut self) {
        self.locked = None;
    }
}
