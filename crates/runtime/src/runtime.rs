//! High-level runtime orchestrator.
//!
//! The runtime owns the field worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::path::Path;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use farm_core::{FarmConfig, Orchestrator};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, FieldWorker};
use crate::world::{AnimationTimings, FarmWorld, WorldLayout};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub farm: FarmConfig,
    /// World units the player walks per tick.
    pub walk_speed: f32,
    pub animations: AnimationTimings,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    fn validate(&self) -> Result<()> {
        let farm = &self.farm;
        let reason = if farm.interaction_range <= 0.0 {
            "interaction range must be positive"
        } else if !(farm.stop_distance_factor > 0.0 && farm.stop_distance_factor <= 1.0) {
            "stop distance factor must be in (0, 1]"
        } else if farm.arrival_tolerance_factor < farm.stop_distance_factor {
            "arrival tolerance must not be tighter than the stop distance"
        } else if self.walk_speed <= 0.0 {
            "walk speed must be positive"
        } else if self.event_buffer_size == 0 || self.command_buffer_size == 0 {
            "channel buffers must not be empty"
        } else {
            return Ok(());
        };
        Err(RuntimeError::InvalidConfig { reason })
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            farm: FarmConfig::default(),
            walk_speed: 0.25,
            animations: AnimationTimings::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that owns the field worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for it to exit
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    layout: Option<WorldLayout>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            layout: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the world layout (defaults to [`WorldLayout::demo`])
    pub fn layout(mut self, layout: WorldLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Load the world layout from a RON file
    pub fn layout_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.layout = Some(WorldLayout::load(path)?);
        Ok(self)
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        self.config.validate()?;

        let layout = self.layout.unwrap_or_else(WorldLayout::demo);
        let world = FarmWorld::from_layout(
            layout,
            self.config.walk_speed,
            self.config.animations,
            self.config.farm.interaction_range,
        );
        let orchestrator = Orchestrator::new(self.config.farm.clone());

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = FieldWorker::new(orchestrator, world, command_rx, event_bus);
        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        info!(
            range = self.config.farm.interaction_range,
            walk_speed = self.config.walk_speed,
            "field runtime started"
        );

        Ok(Runtime { handle, worker })
    }
}
