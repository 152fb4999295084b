//! Console host for the Farm Navigator simulation.
//!
//! Loads configuration, builds a [`SimulationService`], and runs it
//! against commands typed on stdin until the player quits, input ends or
//! the day limit is reached.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$FARMNAV_CONFIG` or `farmnav-config.yaml`
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Build the session: reference data, progress store, farm
//! 4. Create operator state from the configured speed and day limit
//! 5. Spawn the console reader
//! 6. Run the session loop
//! 7. Log the result

mod commands;
mod console;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use farmnav_core::config::GameConfig;
use farmnav_core::runner::{self, log_session_end};
use farmnav_core::{OperatorState, SimulationService, SimulationSpeed};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleCallback;
use crate::error::EngineError;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "FARMNAV_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset.
const DEFAULT_CONFIG_PATH: &str = "farmnav-config.yaml";

/// Pending console commands.
const COMMAND_BUFFER: usize = 32;

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    let config_path = std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = GameConfig::load_or_default(&config_path)?;

    init_logging(&config.logging.level, config.logging.json);
    info!(
        path = %config_path.display(),
        mode = %config.session.mode,
        grid_size = config.session.grid_size,
        max_days = config.session.max_days,
        "farmnav-engine starting"
    );

    let speed = SimulationSpeed::from_multiplier(config.time.speed).unwrap_or_else(|| {
        warn!(speed = config.time.speed, "Unsupported speed, using 1x");
        SimulationSpeed::X1
    });
    let operator = Arc::new(OperatorState::new(speed, u64::from(config.session.max_days)));

    let mut service = SimulationService::from_config(config)?;
    console::print_welcome(&service);

    let (tx, mut rx) = mpsc::channel(COMMAND_BUFFER);
    let console_operator = Arc::clone(&operator);
    std::thread::spawn(move || console::read_console(&tx, &console_operator));

    let mut callback = ConsoleCallback;
    let result = runner::run_session(&mut service, &mut rx, &operator, &mut callback).await?;

    log_session_end(&result);
    info!(
        end_reason = ?result.end_reason,
        days_run = result.days_run,
        elapsed_seconds = operator.elapsed_seconds(),
        "farmnav-engine shutdown complete"
    );
    Ok(())
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
