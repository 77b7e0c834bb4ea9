//! Walk-to-target movement for the in-memory world.

use farm_core::{Navigator, PlayerOracle, WorldPos};
use tracing::trace;

use super::player::PlayerBody;

/// How the terrain reacts to walk requests.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum WalkMode {
    /// Walk in a straight line at full speed.
    #[default]
    Free,
    /// Path is blocked: the walk ends immediately where the player stands.
    Blocked,
    /// Walk stays active but the player never moves.
    Stalled,
}

const ARRIVAL_EPSILON: f32 = 1e-4;

#[derive(Clone, Debug)]
pub struct WalkingNavigator {
    speed: f32,
    mode: WalkMode,
    destination: Option<(WorldPos, f32)>,
}

impl WalkingNavigator {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            mode: WalkMode::Free,
            destination: None,
        }
    }

    pub fn set_mode(&mut self, mode: WalkMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    pub fn destination(&self) -> Option<WorldPos> {
        self.destination.map(|(target, _)| target)
    }

    /// Advances an active walk by one tick.
    pub fn advance(&mut self, body: &mut PlayerBody) {
        let Some((target, stop_distance)) = self.destination else {
            return;
        };
        match self.mode {
            WalkMode::Stalled => {}
            WalkMode::Blocked => {
                trace!(%target, "walk blocked");
                self.destination = None;
            }
            WalkMode::Free => {
                let remaining = body.collider_center().distance(target) - stop_distance;
                body.step_center_toward(target, self.speed.min(remaining.max(0.0)));
                if body.collider_center().distance(target) <= stop_distance + ARRIVAL_EPSILON {
                    self.destination = None;
                }
            }
        }
    }
}

impl Navigator for WalkingNavigator {
    fn move_to(&mut self, target: WorldPos, stop_distance: f32) {
        self.destination = Some((target, stop_distance));
    }

    fn force_cancel(&mut self) {
        self.destination = None;
    }

    fn is_active(&self) -> bool {
        self.destination.is_some()
    }
}
