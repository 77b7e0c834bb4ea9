//! Field worker that owns the [`farm_core::Orchestrator`] and the
//! [`FarmWorld`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the orchestrator
//! tick by tick and republishes its events on the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use farm_core::{
    CompletionKind, HeldItem, Interrupt, InterruptController, InterruptOutcome, Orchestrator,
    SlotIndex, Tick,
};

use crate::api::{FieldView, InputAck, PlayerInput, SettleReport, WorldEdit};
use crate::events::{Event, EventBus, FieldEventRecord, InterruptRecord};
use crate::world::FarmWorld;

/// Commands that can be sent to the field worker
pub enum Command {
    /// Apply one player input.
    Input {
        input: PlayerInput,
        reply: oneshot::Sender<InputAck>,
    },
    /// Apply a change from outside the field action flow.
    Edit {
        edit: WorldEdit,
        reply: oneshot::Sender<()>,
    },
    /// Advance `count` ticks; replies with the new tick.
    Tick {
        count: u32,
        reply: oneshot::Sender<Tick>,
    },
    /// Tick until idle or until `max_ticks` elapsed.
    Settle {
        max_ticks: u32,
        reply: oneshot::Sender<SettleReport>,
    },
    /// Query the current state (read-only).
    Query { reply: oneshot::Sender<FieldView> },
    /// Stop the worker loop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes field commands.
pub struct FieldWorker {
    orchestrator: Orchestrator,
    interrupts: InterruptController,
    world: FarmWorld,
    active_slot: Option<SlotIndex>,
    tick: Tick,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl FieldWorker {
    pub fn new(
        orchestrator: Orchestrator,
        world: FarmWorld,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            orchestrator,
            interrupts: InterruptController::new(),
            world,
            active_slot: None,
            tick: Tick::ZERO,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if let Some(reply) = self.handle_command(cmd) {
                info!(tick = %self.tick, "field worker stopping");
                let _ = reply.send(());
                break;
            }
        }
    }

    /// Returns the shutdown reply when the loop should stop.
    fn handle_command(&mut self, cmd: Command) -> Option<oneshot::Sender<()>> {
        match cmd {
            Command::Input { input, reply } => {
                let ack = self.apply_input(input);
                self.publish_field_events();
                let _ = reply.send(ack);
            }
            Command::Edit { edit, reply } => {
                self.apply_edit(edit);
                self.publish_field_events();
                let _ = reply.send(());
            }
            Command::Tick { count, reply } => {
                for _ in 0..count {
                    self.step();
                }
                let _ = reply.send(self.tick);
            }
            Command::Settle { max_ticks, reply } => {
                let report = self.settle(max_ticks);
                let _ = reply.send(report);
            }
            Command::Query { reply } => {
                let _ = reply.send(self.view());
            }
            Command::Shutdown { reply } => return Some(reply),
        }
        None
    }

    fn apply_input(&mut self, input: PlayerInput) -> InputAck {
        match input {
            PlayerInput::Hover(cursor) => {
                self.world.hover(cursor);
                InputAck::Applied
            }
            PlayerInput::Click(cursor) => {
                self.world.hover(cursor);
                let context = self.world.target_context();
                if self.orchestrator.submit(&context, &mut self.world.env()) {
                    InputAck::Enqueued
                } else {
                    InputAck::Ignored
                }
            }
            PlayerInput::Move(delta) => {
                let engaged = self.orchestrator.is_busy() || !self.orchestrator.queue().is_empty();
                if self.interrupt(Interrupt::Movement, engaged)
                    == InterruptOutcome::ProceedWithMovement
                {
                    self.world.move_player(delta);
                }
                InputAck::Applied
            }
            PlayerInput::SelectSlot(slot) => {
                self.active_slot = Some(slot);
                let held = self.world.classify_slot(slot);
                let changed = held != self.orchestrator.held_item();
                self.interrupt(Interrupt::HotbarSwitch(held), changed);
                InputAck::Applied
            }
            PlayerInput::Cancel => {
                self.interrupt(Interrupt::Cancel, true);
                InputAck::Applied
            }
            PlayerInput::OpenPanel => {
                self.interrupt(Interrupt::PanelOpened, true);
                InputAck::Applied
            }
            PlayerInput::ClosePanel => {
                self.interrupt(Interrupt::PanelClosed, true);
                InputAck::Applied
            }
        }
    }

    fn interrupt(&mut self, interrupt: Interrupt, publish: bool) -> InterruptOutcome {
        if publish {
            info!(tick = %self.tick, ?interrupt, "interrupt");
            self.event_bus.publish(Event::Interrupt(InterruptRecord {
                tick: self.tick,
                interrupt,
            }));
        }
        self.interrupts
            .handle(interrupt, &mut self.orchestrator, &mut self.world.env())
    }

    fn apply_edit(&mut self, edit: WorldEdit) {
        debug!(tick = %self.tick, ?edit, "world edit");
        match edit {
            WorldEdit::SetSlot {
                slot,
                item,
                quantity,
            } => self.world.set_slot(slot, item, quantity),
            WorldEdit::RemoveCrop(handle) => {
                self.world.remove_crop(handle);
            }
            WorldEdit::SetRipe { handle, ripe } => {
                self.world.set_crop_ripe(handle, ripe);
            }
            WorldEdit::SetWalkMode(mode) => self.world.set_walk_mode(mode),
        }
        self.refresh_held_item();
    }

    /// One simulation tick: walk, poll arrival, fire finished animations.
    fn step(&mut self) {
        self.tick = self.tick + 1;

        self.world.advance_navigation();
        self.orchestrator.tick(&mut self.world.env());

        for (kind, ticket) in self.world.advance_animations() {
            let mut env = self.world.env();
            match kind {
                CompletionKind::ToolActionDone => {
                    self.orchestrator.on_tool_action_done(ticket, &mut env)
                }
                CompletionKind::HarvestDone => self.orchestrator.on_harvest_done(ticket, &mut env),
            }
        }

        self.refresh_held_item();
        self.publish_field_events();
    }

    fn settle(&mut self, max_ticks: u32) -> SettleReport {
        let mut elapsed = 0;
        while !self.is_idle() && elapsed < max_ticks {
            self.step();
            elapsed += 1;
        }
        SettleReport {
            tick: self.tick,
            settled: self.is_idle(),
        }
    }

    fn is_idle(&self) -> bool {
        !self.orchestrator.is_busy()
            && !self.world.navigator_active()
            && !self.world.animating()
            && (self.orchestrator.queue().is_empty() || self.orchestrator.is_paused())
    }

    /// Re-reads the active slot; an emptied seed stack stops being a seed.
    fn refresh_held_item(&mut self) {
        let held = self
            .active_slot
            .map_or(HeldItem::Other, |slot| self.world.classify_slot(slot));
        if held != self.orchestrator.held_item() {
            self.orchestrator.set_held_item(held, &mut self.world.env());
        }
    }

    fn publish_field_events(&mut self) {
        for event in self.orchestrator.take_events() {
            self.event_bus.publish(Event::Field(FieldEventRecord {
                tick: self.tick,
                event,
            }));
        }
    }

    fn view(&self) -> FieldView {
        FieldView {
            tick: self.tick,
            active_slot: self.active_slot,
            orchestrator: self.orchestrator.view(),
            world: self.world.view(),
        }
    }
}
