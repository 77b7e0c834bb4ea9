//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding input, advancing ticks or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use farm_core::Tick;

use super::errors::{Result, RuntimeError};
use super::input::{FieldView, InputAck, PlayerInput, SettleReport, WorldEdit};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Feed one player input to the orchestrator
    pub async fn send_input(&self, input: PlayerInput) -> Result<InputAck> {
        self.request(|reply| Command::Input { input, reply }).await
    }

    /// Apply a change made by some other game system
    pub async fn edit(&self, edit: WorldEdit) -> Result<()> {
        self.request(|reply| Command::Edit { edit, reply }).await
    }

    /// Advance the simulation by one tick
    pub async fn tick(&self) -> Result<Tick> {
        self.tick_n(1).await
    }

    /// Advance the simulation by `count` ticks and return the new tick
    pub async fn tick_n(&self, count: u32) -> Result<Tick> {
        self.request(|reply| Command::Tick { count, reply }).await
    }

    /// Tick until nothing is queued, walking or animating, or until
    /// `max_ticks` elapsed.
    pub async fn run_until_idle(&self, max_ticks: u32) -> Result<SettleReport> {
        self.request(|reply| Command::Settle { max_ticks, reply })
            .await
    }

    /// Query the orchestrator and world (read-only snapshot)
    pub async fn query(&self) -> Result<FieldView> {
        self.request(|reply| Command::Query { reply }).await
    }

    /// Ask the worker to stop after the commands already queued
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Action` - enqueues, duplicates, completions, drops, failures
    /// - `Topic::Navigation` - state transitions and walks
    /// - `Topic::Interrupt` - routed interrupts, clears, pauses, resumes
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
