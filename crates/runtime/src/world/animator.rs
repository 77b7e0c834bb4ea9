//! Tick-counted player animations.

use farm_core::{AnimationDriver, AnimationKind, CompletionKind, CompletionTicket};
use serde::{Deserialize, Serialize};

/// Animation lengths in simulation ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTimings {
    pub till: u32,
    pub water: u32,
    pub harvest: u32,
}

impl AnimationTimings {
    pub const fn duration(&self, kind: AnimationKind) -> u32 {
        match kind {
            AnimationKind::Till => self.till,
            AnimationKind::Water => self.water,
            AnimationKind::Harvest => self.harvest,
        }
    }
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            till: 3,
            water: 2,
            harvest: 2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Playing {
    kind: AnimationKind,
    ticket: CompletionTicket,
    remaining: u32,
}

/// Plays animations and reports which ones finished on each tick.
#[derive(Clone, Debug)]
pub struct TimedAnimator {
    timings: AnimationTimings,
    playing: Vec<Playing>,
}

impl TimedAnimator {
    pub fn new(timings: AnimationTimings) -> Self {
        Self {
            timings,
            playing: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.playing.is_empty()
    }

    /// Advances every animation by one tick and returns the completions that
    /// fired, oldest first.
    pub fn advance(&mut self) -> Vec<(CompletionKind, CompletionTicket)> {
        let mut finished = Vec::new();
        self.playing.retain_mut(|playing| {
            playing.remaining = playing.remaining.saturating_sub(1);
            if playing.remaining == 0 {
                finished.push((playing.kind.completion(), playing.ticket));
                false
            } else {
                true
            }
        });
        finished
    }
}

impl AnimationDriver for TimedAnimator {
    fn play(&mut self, kind: AnimationKind, ticket: CompletionTicket) {
        self.playing.push(Playing {
            kind,
            ticket,
            remaining: self.timings.duration(kind).max(1),
        });
    }
}
