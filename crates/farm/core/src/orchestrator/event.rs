//! Records of what the orchestrator decided, drained by the host each call.

use crate::action::{ActionKind, ReservationKey};
use crate::state::WorldPos;

use super::NavigationState;

/// Why a request was discarded without mutating anything.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    /// PlantSeed dequeued with no seeds left in the slot.
    SeedsExhausted,
    /// Harvest target removed or no longer interactable.
    TargetUnavailable,
    /// Inventory slot changed between resolve and execute.
    StaleSnapshot,
    /// Player ended up outside interaction range of the locked target.
    DriftedOutOfRange,
    /// Navigator stopped outside arrival tolerance.
    NavigationFailed,
    /// Walk interrupted by the player.
    NavigationCancelled,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldEvent {
    StateChanged {
        from: NavigationState,
        to: NavigationState,
    },
    Enqueued {
        kind: ActionKind,
        key: ReservationKey,
    },
    DuplicateIgnored {
        key: ReservationKey,
    },
    NavigationStarted {
        key: ReservationKey,
        target: WorldPos,
        stop_distance: f32,
    },
    /// Mutation applied; awaited kinds complete later.
    Dispatched {
        kind: ActionKind,
        key: ReservationKey,
    },
    Completed {
        kind: ActionKind,
        key: ReservationKey,
    },
    Dropped {
        kind: ActionKind,
        key: ReservationKey,
        reason: DropReason,
    },
    /// Executor reported a domain failure; the request was consumed.
    Failed {
        kind: ActionKind,
        key: ReservationKey,
        code: String,
        message: String,
    },
    QueueCleared {
        dropped: usize,
    },
    Paused,
    Resumed,
}
