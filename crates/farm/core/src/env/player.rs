use crate::state::{LayerIndex, WorldPos};

/// Read access to the player avatar.
pub trait PlayerOracle {
    /// Centre of the player's collider. Every distance computed by the
    /// orchestrator starts here; the transform origin sits at the feet and
    /// must never be used for range checks.
    fn collider_center(&self) -> WorldPos;

    /// Layer the player currently stands on.
    fn current_layer(&self) -> LayerIndex;
}
