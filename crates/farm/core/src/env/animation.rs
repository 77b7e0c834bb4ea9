use std::fmt;

/// Player animations that gate queue progress.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AnimationKind {
    Till,
    Water,
    Harvest,
}

impl AnimationKind {
    /// Which completion hook the animation reports back on.
    pub const fn completion(self) -> CompletionKind {
        match self {
            AnimationKind::Till | AnimationKind::Water => CompletionKind::ToolActionDone,
            AnimationKind::Harvest => CompletionKind::HarvestDone,
        }
    }
}

/// The two external completion signals the state machine waits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CompletionKind {
    ToolActionDone,
    HarvestDone,
}

/// Identifies one dispatched animation. Completions carrying a ticket that
/// no longer matches the executing request are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionTicket(pub u64);

impl fmt::Display for CompletionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticket:{}", self.0)
    }
}

/// Plays player animations and later reports completion through
/// `Orchestrator::on_tool_action_done` / `Orchestrator::on_harvest_done`.
pub trait AnimationDriver {
    fn play(&mut self, kind: AnimationKind, ticket: CompletionTicket);
}
