//! Scripted input sequences loaded from RON.
//!
//! A scenario optionally carries its own world layout followed by the steps
//! to replay against the runtime:
//!
//! ```ron
//! (
//!     steps: [
//!         Input(SelectSlot((0))),
//!         Input(Click((x: 5.5, y: 0.5))),
//!         Settle(200),
//!     ],
//! )
//! ```
use std::path::Path;

use farm_runtime::{Event, PlayerInput, RuntimeHandle, Topic, WorldEdit, WorldLayout};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Runtime(#[from] farm_runtime::RuntimeError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Step {
    Input(PlayerInput),
    Edit(WorldEdit),
    /// Advance a fixed number of ticks.
    Tick(u32),
    /// Tick until idle, bounded by the given number of ticks.
    Settle(u32),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub layout: Option<WorldLayout>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_ron(text: &str) -> Result<Self, ScenarioError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Replays every step and returns the events published along the way.
    pub async fn play(&self, handle: &RuntimeHandle) -> Result<Vec<Event>, ScenarioError> {
        let mut receivers = handle.subscribe_multiple(&Topic::ALL);
        let mut events = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            debug!(index, ?step, "scenario step");
            match step {
                Step::Input(input) => {
                    let ack = handle.send_input(*input).await?;
                    debug!(index, ?ack, "input applied");
                }
                Step::Edit(edit) => handle.edit(*edit).await?,
                Step::Tick(count) => {
                    handle.tick_n(*count).await?;
                }
                Step::Settle(max_ticks) => {
                    let report = handle.run_until_idle(*max_ticks).await?;
                    if !report.settled {
                        warn!(index, tick = %report.tick, "settle budget exhausted");
                    }
                }
            }
            for receiver in receivers.values_mut() {
                drain(receiver, &mut events);
            }
        }

        events.sort_by_key(Event::tick);
        Ok(events)
    }
}

fn drain(receiver: &mut broadcast::Receiver<Event>, events: &mut Vec<Event>) {
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "event receiver lagged");
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use farm_core::{SlotIndex, WorldPos};

    #[test]
    fn parses_steps_without_layout() {
        let scenario = Scenario::from_ron(
            "(steps: [Input(SelectSlot((0))), Input(Click((x: 5.5, y: 0.5))), Tick(3), Settle(50)])",
        )
        .unwrap();

        assert!(scenario.layout.is_none());
        assert_eq!(
            scenario.steps,
            vec![
                Step::Input(PlayerInput::SelectSlot(SlotIndex(0))),
                Step::Input(PlayerInput::Click(WorldPos::new(5.5, 0.5))),
                Step::Tick(3),
                Step::Settle(50),
            ]
        );
    }

    #[test]
    fn loads_scenario_with_inline_layout() {
        let scenario = Scenario {
            layout: Some(WorldLayout::demo()),
            steps: vec![Step::Input(PlayerInput::Cancel)],
        };
        let text = ron::ser::to_string_pretty(&scenario, Default::default()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        assert_eq!(Scenario::load(file.path()).unwrap(), scenario);
    }

    #[test]
    fn unknown_step_is_a_parse_error() {
        assert!(matches!(
            Scenario::from_ron("(steps: [Teleport(3)])"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn play_collects_events_in_tick_order() {
        let runtime = farm_runtime::Runtime::builder().build().await.unwrap();
        let handle = runtime.handle();
        let scenario = Scenario::from_ron(
            "(steps: [Input(SelectSlot((0))), Input(Click((x: 1.5, y: 0.5))), Settle(20)])",
        )
        .unwrap();

        let events = scenario.play(&handle).await.unwrap();

        assert!(!events.is_empty());
        assert!(events.windows(2).all(|pair| pair[0].tick() <= pair[1].tick()));
        runtime.shutdown().await.unwrap();
    }
}
