//! Headless scenario runner for the field runtime.
//!
//! Replays a RON scenario (player inputs, world edits, tick budgets) against
//! a fresh runtime and prints the final field view as JSON.
mod config;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::CliConfig;
use farm_runtime::{Runtime, WorldLayout};
use scenario::Scenario;
use serde_json::json;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let scenario = match std::env::args_os().nth(1) {
        Some(path) => Scenario::load(&path)
            .with_context(|| format!("loading scenario {}", PathBuf::from(&path).display()))?,
        None => Scenario::default(),
    };

    let builder = Runtime::builder().config(config.runtime.clone());
    let builder = match &config.layout_path {
        Some(path) => builder
            .layout_file(path)
            .with_context(|| format!("loading layout {}", path.display()))?,
        None => builder.layout(scenario.layout.clone().unwrap_or_else(WorldLayout::demo)),
    };
    let runtime = builder.build().await?;
    let handle = runtime.handle();

    tracing::info!(steps = scenario.steps.len(), "replaying scenario");
    let events = scenario.play(&handle).await?;
    let view = handle.query().await?;
    runtime.shutdown().await?;

    let output = if config.print_events {
        json!({ "events": events, "view": view })
    } else {
        json!({ "view": view })
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Setup logging to both stderr and a session log file
fn setup_logging(config: &CliConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let log_dir = config.log_dir.clone().unwrap_or_else(default_log_directory);

    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("creating log directory {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "farm.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/farm.log", session_log_dir.display());

    Ok(guard)
}

/// Platform cache directory for logs
fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "farm")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("farm").join("logs"))
}
