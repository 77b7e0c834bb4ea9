/// What the orchestrator is doing right now.
///
/// One instance per orchestrator, created `Idle`. `Idle` and `Preview` are
/// both quiescent; they only differ in whether the player holds a tool or
/// seed and therefore sees a target preview.
///
/// ```text
/// Idle ⇄ Preview ─► Locked ─┬─► Executing ─► Preview/Idle
///                           │       ▲   └──► Locked (next queued request)
///                           └─► Navigating ─► Preview/Idle (cancelled, failed)
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NavigationState {
    #[default]
    Idle,
    /// Tool or seed held, nothing committed.
    Preview,
    /// A request is committed and its target frozen.
    Locked,
    /// Walking toward the locked target.
    Navigating,
    /// Mutation dispatched; possibly waiting on an animation.
    Executing,
}

impl NavigationState {
    pub const fn is_quiescent(self) -> bool {
        matches!(self, NavigationState::Idle | NavigationState::Preview)
    }

    /// States in which a request is being worked on.
    pub const fn is_active(self) -> bool {
        matches!(self, NavigationState::Navigating | NavigationState::Executing)
    }
}
