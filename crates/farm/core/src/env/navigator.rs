use crate::state::WorldPos;

/// Walk-to-target movement.
///
/// The orchestrator never receives arrival events from the navigator; it
/// polls the player's distance to the locked target every tick and uses
/// [`Navigator::is_active`] only to notice that the walk ended on its own.
pub trait Navigator {
    /// Starts walking toward `target`, stopping once within `stop_distance`.
    fn move_to(&mut self, target: WorldPos, stop_distance: f32);

    /// Stops any walk immediately. No-op when idle.
    fn force_cancel(&mut self);

    fn is_active(&self) -> bool;
}
