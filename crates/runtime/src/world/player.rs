//! Player body: feet position plus collider offset.

use farm_core::{LayerIndex, PlayerOracle, WorldPos};

/// The avatar as the field sees it.
///
/// The transform origin sits at the feet; the collider centre is offset
/// upward. Range checks always use [`PlayerOracle::collider_center`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerBody {
    feet: WorldPos,
    collider_offset: WorldPos,
    layer: LayerIndex,
}

impl PlayerBody {
    pub fn new(feet: WorldPos, collider_offset: WorldPos, layer: LayerIndex) -> Self {
        Self {
            feet,
            collider_offset,
            layer,
        }
    }

    pub fn feet(&self) -> WorldPos {
        self.feet
    }

    /// Moves the feet by `delta` (manual movement).
    pub fn translate(&mut self, delta: WorldPos) {
        self.feet = self.feet + delta;
    }

    /// Moves the body so that its collider centre advances toward `target`
    /// by at most `step`.
    pub fn step_center_toward(&mut self, target: WorldPos, step: f32) {
        let center = self.collider_center().step_toward(target, step);
        self.feet = WorldPos::new(
            center.x - self.collider_offset.x,
            center.y - self.collider_offset.y,
        );
    }

    pub fn set_layer(&mut self, layer: LayerIndex) {
        self.layer = layer;
    }
}

impl PlayerOracle for PlayerBody {
    fn collider_center(&self) -> WorldPos {
        self.feet + self.collider_offset
    }

    fn current_layer(&self) -> LayerIndex {
        self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_center_is_offset_from_feet() {
        let mut body = PlayerBody::new(
            WorldPos::new(1.0, 1.0),
            WorldPos::new(0.0, 0.5),
            LayerIndex::GROUND,
        );
        assert_eq!(body.collider_center(), WorldPos::new(1.0, 1.5));

        body.step_center_toward(WorldPos::new(1.0, 5.5), 1.0);
        assert_eq!(body.collider_center(), WorldPos::new(1.0, 2.5));
        assert_eq!(body.feet(), WorldPos::new(1.0, 2.0));
    }
}
