//! CLI configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use farm_runtime::RuntimeConfig;

/// Configuration required to run a scenario.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// Layout file overriding the scenario's inline layout.
    pub layout_path: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Print every published event next to the final view.
    pub print_events: bool,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FARM_INTERACTION_RANGE` - Interaction range in world units (default: 1.5)
    /// - `FARM_WALK_SPEED` - World units walked per tick (default: 0.25)
    /// - `FARM_LAYOUT` - RON world layout replacing the scenario layout
    /// - `FARM_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `FARM_LOG_DIR` - Directory for log files (default: platform-specific)
    /// - `FARM_PRINT_EVENTS` - Include the event log in the output (default: false)
    /// - `CLI_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `CLI_EVENT_CAPACITY` - Event bus capacity per topic (default: 256)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(range) = read_env::<f32>("FARM_INTERACTION_RANGE") {
            config.runtime.farm.interaction_range = range;
        }
        if let Some(speed) = read_env::<f32>("FARM_WALK_SPEED") {
            config.runtime.walk_speed = speed;
        }

        if let Some(capacity) = read_env::<usize>("CLI_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("CLI_EVENT_CAPACITY") {
            config.runtime.event_buffer_size = capacity.max(1);
        }

        config.layout_path = env::var("FARM_LAYOUT").ok().map(PathBuf::from);
        config.session_id = env::var("FARM_SESSION_ID").ok();
        config.log_dir = env::var("FARM_LOG_DIR").ok().map(PathBuf::from);

        if let Some(enable) = read_env::<bool>("FARM_PRINT_EVENTS") {
            config.print_events = enable;
        } else if env::var("FARM_PRINT_EVENTS").is_ok() {
            // Bare variable counts as "true"
            config.print_events = true;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
