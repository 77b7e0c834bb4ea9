//! Navigation orchestrator: the action queue driver.
//!
//! The [`Orchestrator`] owns the queue, the single [`NavigationState`] and at
//! most one in-flight request. Hosts call it from one logical thread:
//!
//! - [`Orchestrator::submit`] / [`Orchestrator::enqueue`] on player clicks
//! - [`Orchestrator::tick`] once per simulation tick (polls walking distance)
//! - [`Orchestrator::on_tool_action_done`] / [`Orchestrator::on_harvest_done`]
//!   when the animation driver finishes
//! - the interrupt entry points (`clear_all`, `cancel_navigation`, `pause`,
//!   `resume`), normally through [`crate::interrupt::InterruptController`]
//!
//! Every entry point leaves the machine in a valid, progressing state: failed
//! or stale requests are dropped and the queue moves on within the same call.
//!
//! All distances are measured from the player's collider center to the target
//! position frozen at resolve time.

mod event;
mod state;

pub use event::{DropReason, FieldEvent};
pub use state::NavigationState;

use tracing::{debug, info, trace, warn};

use crate::action::{ActionKind, ActionRequest, PendingAction, ReservationKey};
use crate::config::FarmConfig;
use crate::env::{CompletionKind, CompletionTicket, FieldEnv};
use crate::error::FieldError;
use crate::executor::{ActionExecutor, Completion};
use crate::queue::ActionQueue;
use crate::resolver::{TargetContext, TargetResolver};
use crate::snapshot;
use crate::state::HeldItem;

/// The request currently being walked to or executed.
#[derive(Clone, Copy, Debug)]
struct InFlight {
    action: PendingAction,
    phase: Phase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Navigating,
    Executing {
        kind: CompletionKind,
        ticket: CompletionTicket,
    },
}

/// Read-only summary for hosts and UIs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrchestratorView {
    pub state: NavigationState,
    pub paused: bool,
    pub held: HeldItem,
    pub current: Option<ActionRequest>,
    pub queued: Vec<ActionRequest>,
}

impl OrchestratorView {
    /// In-flight key (if any) followed by queued keys, in execution order.
    pub fn pending_keys(&self) -> Vec<ReservationKey> {
        self.current
            .iter()
            .chain(self.queued.iter())
            .map(ActionRequest::reservation_key)
            .collect()
    }
}

pub struct Orchestrator {
    config: FarmConfig,
    resolver: TargetResolver,
    executor: ActionExecutor,
    queue: ActionQueue,
    state: NavigationState,
    paused: bool,
    held: HeldItem,
    current: Option<InFlight>,
    preview_locked: bool,
    next_ticket: u64,
    events: Vec<FieldEvent>,
}

impl Orchestrator {
    pub fn new(config: FarmConfig) -> Self {
        Self {
            resolver: TargetResolver::new(config.harvest_scan_radius),
            executor: ActionExecutor::new(config.seeds_per_plant),
            config,
            queue: ActionQueue::new(),
            state: NavigationState::Idle,
            paused: false,
            held: HeldItem::Other,
            current: None,
            preview_locked: false,
            next_ticket: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &FarmConfig {
        &self.config
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn held_item(&self) -> HeldItem {
        self.held
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// Request being walked to or executed.
    pub fn current(&self) -> Option<&ActionRequest> {
        self.current.as_ref().map(|in_flight| &in_flight.action.request)
    }

    /// True while a request is navigating or awaiting its completion signal.
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn view(&self) -> OrchestratorView {
        OrchestratorView {
            state: self.state,
            paused: self.paused,
            held: self.held,
            current: self.current().copied(),
            queued: self.queue.iter().map(|action| action.request).collect(),
        }
    }

    /// Drains events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Updates the held item. While quiescent this switches between Idle and
    /// Preview; during work the new item takes effect when the queue settles.
    pub fn set_held_item(&mut self, held: HeldItem, env: &mut FieldEnv<'_>) {
        self.held = held;
        if self.current.is_none() && self.queue.is_empty() {
            self.settle(env);
        }
    }

    /// Resolves a click against the held item and enqueues the result.
    ///
    /// Returns `true` if a new request entered the queue.
    pub fn submit(&mut self, context: &TargetContext, env: &mut FieldEnv<'_>) -> bool {
        match self.resolver.try_resolve(&self.held, context, env) {
            Some(action) => self.enqueue(action, env),
            None => {
                trace!(cursor = %context.cursor, "click resolved no field action");
                false
            }
        }
    }

    /// Appends `action` unless its target is already reserved, then starts
    /// processing if nothing is active.
    ///
    /// Returns `false` for duplicates.
    pub fn enqueue(&mut self, action: PendingAction, env: &mut FieldEnv<'_>) -> bool {
        let key = action.key();
        let kind = action.kind();
        if !self.queue.enqueue(action) {
            debug!(%key, %kind, "duplicate submission ignored");
            self.events.push(FieldEvent::DuplicateIgnored { key });
            return false;
        }

        debug!(%key, %kind, queued = self.queue.len(), "action enqueued");
        self.events.push(FieldEvent::Enqueued { kind, key });

        if self.current.is_none() && !self.paused {
            self.process_next(env);
        }
        true
    }

    // ========================================================================
    // Processing
    // ========================================================================

    /// Starts the head-of-queue request.
    ///
    /// Requests that fail validation are dropped and the next one is tried in
    /// the same call. Returns once a request is navigating or awaiting an
    /// animation, or once the queue is empty or paused.
    pub fn process_next(&mut self, env: &mut FieldEnv<'_>) {
        loop {
            if self.current.is_some() {
                return;
            }
            if self.paused {
                self.settle(env);
                return;
            }
            let Some(action) = self.queue.dequeue() else {
                self.settle(env);
                return;
            };

            if let Err(reason) = self.revalidate(&action, env) {
                self.drop_in_flight(&action, reason);
                continue;
            }

            self.lock(&action, env);

            let target = action.request.target_world_position();
            let distance = env.player.collider_center().distance(target);
            if distance <= self.config.interaction_range {
                if self.dispatch(action, env) {
                    return;
                }
                continue;
            }

            let stop_distance = self.config.stop_distance();
            env.navigator.move_to(target, stop_distance);
            debug!(key = %action.key(), %target, distance, stop_distance, "navigating to target");
            self.events.push(FieldEvent::NavigationStarted {
                key: action.key(),
                target,
                stop_distance,
            });
            self.current = Some(InFlight {
                action,
                phase: Phase::Navigating,
            });
            self.transition(NavigationState::Navigating);
            return;
        }
    }

    /// Per-tick poll of an in-progress walk.
    ///
    /// Arrival is either reaching the stop distance, or the navigator
    /// stopping on its own within the arrival tolerance. A navigator that
    /// stops farther away failed; one that keeps walking is left alone.
    pub fn tick(&mut self, env: &mut FieldEnv<'_>) {
        let Some(InFlight {
            action,
            phase: Phase::Navigating,
        }) = self.current
        else {
            return;
        };

        let distance = env
            .player
            .collider_center()
            .distance(action.request.target_world_position());

        if distance <= self.config.stop_distance() {
            self.on_arrival(env);
        } else if !env.navigator.is_active() {
            if distance <= self.config.arrival_tolerance() {
                self.on_arrival(env);
            } else {
                warn!(key = %action.key(), distance, "navigation ended outside arrival tolerance");
                self.current = None;
                self.drop_in_flight(&action, DropReason::NavigationFailed);
                self.process_next(env);
            }
        }
    }

    /// Completion hook for the till/water animation.
    pub fn on_tool_action_done(&mut self, ticket: CompletionTicket, env: &mut FieldEnv<'_>) {
        self.complete(CompletionKind::ToolActionDone, ticket, env);
    }

    /// Completion hook for the harvest animation.
    pub fn on_harvest_done(&mut self, ticket: CompletionTicket, env: &mut FieldEnv<'_>) {
        self.complete(CompletionKind::HarvestDone, ticket, env);
    }

    // ========================================================================
    // Interrupts
    // ========================================================================

    /// Drops every queued and in-flight request.
    ///
    /// An awaited animation keeps playing, but its completion ticket no longer
    /// matches anything and is ignored.
    pub fn clear_all(&mut self, env: &mut FieldEnv<'_>) {
        let pending = self.queue.clear_all();
        let in_flight = usize::from(self.current.take().is_some());
        let dropped = pending + in_flight;
        if dropped > 0 {
            info!(dropped, "action queue cleared");
            self.events.push(FieldEvent::QueueCleared { dropped });
        }
        self.settle(env);
    }

    /// Stops the current walk. The walking request, if any, is discarded
    /// together with its snapshot.
    pub fn cancel_navigation(&mut self, env: &mut FieldEnv<'_>) {
        env.navigator.force_cancel();
        if let Some(InFlight {
            action,
            phase: Phase::Navigating,
        }) = self.current
        {
            self.current = None;
            self.drop_in_flight(&action, DropReason::NavigationCancelled);
        }
        if self.current.is_none() {
            self.settle(env);
        }
    }

    /// Releases the preview lock regardless of what the orchestrator
    /// believes its state to be.
    pub fn release_preview_lock(&mut self, env: &mut FieldEnv<'_>) {
        env.preview.unlock();
        self.preview_locked = false;
    }

    /// Suspends processing without discarding intent.
    ///
    /// A walk in progress is cancelled and its request returns to the head of
    /// the queue. An awaited animation finishes normally; the queue then
    /// stays put until [`Orchestrator::resume`].
    pub fn pause(&mut self, env: &mut FieldEnv<'_>) {
        if self.paused {
            return;
        }
        self.paused = true;
        info!(queued = self.queue.len(), "action queue paused");
        self.events.push(FieldEvent::Paused);

        if let Some(InFlight {
            action,
            phase: Phase::Navigating,
        }) = self.current
        {
            env.navigator.force_cancel();
            self.current = None;
            self.queue.requeue_front(action);
        }
        if self.current.is_none() {
            self.settle(env);
        }
    }

    pub fn resume(&mut self, env: &mut FieldEnv<'_>) {
        if !self.paused {
            return;
        }
        self.paused = false;
        info!(queued = self.queue.len(), "action queue resumed");
        self.events.push(FieldEvent::Resumed);

        if !self.queue.is_empty() && self.current.is_none() {
            self.process_next(env);
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Type-specific checks re-run at dequeue time.
    fn revalidate(&self, action: &PendingAction, env: &FieldEnv<'_>) -> Result<(), DropReason> {
        match action.kind() {
            ActionKind::PlantSeed => {
                let required = self.config.seeds_per_plant;
                let remaining = action
                    .snapshot
                    .and_then(|snapshot| env.inventory.slot(snapshot.slot))
                    .map_or(0, |slot| slot.quantity);
                if remaining < required {
                    return Err(DropReason::SeedsExhausted);
                }
            }
            ActionKind::Harvest => {
                let ready = action.request.entity().is_some_and(|handle| {
                    env.interactables.get(handle).is_some() && env.interactables.can_interact(handle)
                });
                if !ready {
                    return Err(DropReason::TargetUnavailable);
                }
            }
            ActionKind::Till | ActionKind::Water => {}
        }
        Ok(())
    }

    /// Commits to `action`: enters Locked and freezes the tile preview.
    fn lock(&mut self, action: &PendingAction, env: &mut FieldEnv<'_>) {
        self.transition(NavigationState::Locked);
        if let Some((layer, cell)) = action.request.tile() {
            env.preview
                .lock(action.request.target_world_position(), cell, layer);
            self.preview_locked = true;
        } else if self.preview_locked {
            env.preview.unlock();
            self.preview_locked = false;
        }
    }

    fn on_arrival(&mut self, env: &mut FieldEnv<'_>) {
        let Some(in_flight) = self.current.take() else {
            return;
        };
        let action = in_flight.action;
        // Arriving inside stop distance leaves the walker running.
        if env.navigator.is_active() {
            env.navigator.force_cancel();
        }

        // Re-check against the locked position with no extra slack.
        let distance = env
            .player
            .collider_center()
            .distance(action.request.target_world_position());
        if distance > self.config.interaction_range {
            self.drop_in_flight(&action, DropReason::DriftedOutOfRange);
            self.process_next(env);
            return;
        }

        trace!(key = %action.key(), distance, "arrived at target");
        if !self.dispatch(action, env) {
            self.process_next(env);
        }
    }

    /// Validates the snapshot and runs the executor.
    ///
    /// Returns `true` when the request now awaits a completion hook.
    fn dispatch(&mut self, action: PendingAction, env: &mut FieldEnv<'_>) -> bool {
        let key = action.key();
        let kind = action.kind();

        if let Some(snapshot) = &action.snapshot
            && let Err(mismatch) =
                snapshot::check(snapshot, kind, self.config.seeds_per_plant, &*env.inventory)
        {
            debug!(%key, %kind, %mismatch, "inventory changed since enqueue");
            self.drop_in_flight(&action, DropReason::StaleSnapshot);
            return false;
        }

        self.transition(NavigationState::Executing);
        let ticket = self.issue_ticket();

        match self.executor.execute(&action, ticket, env) {
            Ok(Completion::Immediate) => {
                self.events.push(FieldEvent::Dispatched { kind, key });
                self.finish(&action);
                false
            }
            Ok(Completion::Await { kind: awaited, ticket }) => {
                debug!(%key, %kind, %ticket, completion = %awaited, "awaiting animation");
                self.events.push(FieldEvent::Dispatched { kind, key });
                self.current = Some(InFlight {
                    action,
                    phase: Phase::Executing {
                        kind: awaited,
                        ticket,
                    },
                });
                true
            }
            Err(err) => {
                warn!(
                    %key,
                    %kind,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "field action failed: {err}"
                );
                self.queue.release_in_flight();
                self.events.push(FieldEvent::Failed {
                    kind,
                    key,
                    code: err.error_code().to_string(),
                    message: err.to_string(),
                });
                false
            }
        }
    }

    fn complete(&mut self, kind: CompletionKind, ticket: CompletionTicket, env: &mut FieldEnv<'_>) {
        let matches = matches!(
            self.current,
            Some(InFlight {
                phase: Phase::Executing { kind: expected, ticket: active },
                ..
            }) if expected == kind && active == ticket
        );
        if !matches {
            debug!(%ticket, completion = %kind, "ignoring stale completion");
            return;
        }

        if let Some(in_flight) = self.current.take() {
            self.finish(&in_flight.action);
        }
        self.process_next(env);
    }

    fn finish(&mut self, action: &PendingAction) {
        self.queue.release_in_flight();
        info!(key = %action.key(), kind = %action.kind(), "field action completed");
        self.events.push(FieldEvent::Completed {
            kind: action.kind(),
            key: action.key(),
        });
    }

    fn drop_in_flight(&mut self, action: &PendingAction, reason: DropReason) {
        self.queue.release_in_flight();
        debug!(key = %action.key(), kind = %action.kind(), %reason, "action dropped");
        self.events.push(FieldEvent::Dropped {
            kind: action.kind(),
            key: action.key(),
            reason,
        });
    }

    /// Returns to the quiescent state matching the held item.
    fn settle(&mut self, env: &mut FieldEnv<'_>) {
        if self.preview_locked {
            env.preview.unlock();
            self.preview_locked = false;
        }
        let quiescent = if self.held.shows_preview() {
            NavigationState::Preview
        } else {
            NavigationState::Idle
        };
        self.transition(quiescent);
    }

    fn transition(&mut self, to: NavigationState) {
        let from = self.state;
        if from == to {
            return;
        }
        trace!(%from, %to, "navigation state");
        self.state = to;
        self.events.push(FieldEvent::StateChanged { from, to });
    }

    fn issue_ticket(&mut self) -> CompletionTicket {
        self.next_ticket += 1;
        CompletionTicket(self.next_ticket)
    }
}
