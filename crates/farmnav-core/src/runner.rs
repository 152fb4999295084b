//! Session loop runner with operator controls.
//!
//! [`run_session`] owns the [`SimulationService`] for the life of the
//! session and waits on three sources at once:
//!
//! - **Operator changes**: pause, resume, speed and stop wake the loop.
//! - **Commands**: console commands are applied between ticks, never
//!   during one.
//! - **Tick timer**: fires every `base_tick_interval_ms / speed` while the
//!   session is ticking and not paused.
//!
//! Because one task does all three, a tick and a player action can never
//! overlap.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::operator::{OperatorState, SessionEndReason};
use crate::session::{CommandReply, SessionCommand, SessionError, SimulationService};
use crate::tick::TickSummary;

/// Errors that can occur during the session run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick or command failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },
}

/// Result of the session run.
#[derive(Debug)]
pub struct SessionResult {
    /// The reason the session ended.
    pub end_reason: SessionEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Days simulated by this run.
    pub days_run: u64,
}

/// Callback invoked after each tick and each command.
pub trait SessionCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, service: &SimulationService);

    /// Called after a command has been applied.
    fn on_reply(&mut self, command: &SessionCommand, reply: &CommandReply, service: &SimulationService);
}

/// A no-op callback for testing.
pub struct NoOpCallback;

impl SessionCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _service: &SimulationService) {}

    fn on_reply(&mut self, _command: &SessionCommand, _reply: &CommandReply, _service: &SimulationService) {}
}

async fn finish(
    operator: &OperatorState,
    reason: SessionEndReason,
    final_summary: Option<TickSummary>,
    days_run: u64,
) -> SessionResult {
    operator.set_end_reason(reason).await;
    SessionResult {
        end_reason: reason,
        final_summary,
        days_run,
    }
}

/// Run the session until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick or command fails unrecoverably.
pub async fn run_session(
    service: &mut SimulationService,
    commands: &mut mpsc::Receiver<SessionCommand>,
    operator: &Arc<OperatorState>,
    callback: &mut dyn SessionCallback,
) -> Result<SessionResult, RunnerError> {
    let base_ms = service.config().time.base_tick_interval_ms;
    let mut last_summary: Option<TickSummary> = None;
    let mut days_run: u64 = 0;
    let mut was_ticking = false;
    let mut was_paused = false;
    let mut next_tick = Instant::now();

    info!(
        max_days = operator.max_days(),
        base_tick_interval_ms = base_ms,
        speed = %operator.speed(),
        "Session starting"
    );

    loop {
        // --- Check stop request ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            return Ok(finish(operator, SessionEndReason::OperatorStop, last_summary, days_run).await);
        }

        // --- Check day limit ---
        if operator.day_limit_reached(days_run) {
            info!(days_run, max_days = operator.max_days(), "Day limit reached");
            return Ok(finish(operator, SessionEndReason::MaxDaysReached, last_summary, days_run).await);
        }

        // --- Apply operator changes ---
        let speed = operator.speed();
        if speed != service.state().clock().speed() {
            info!(%speed, "Speed changed");
            service.set_speed(speed);
            next_tick = Instant::now() + speed.tick_interval(base_ms);
        }
        let paused = operator.is_paused();
        if paused != was_paused {
            info!(paused, "Session {}", if paused { "paused" } else { "resumed" });
            was_paused = paused;
        }
        let ticking = !paused && service.ticks_enabled();
        if ticking && !was_ticking {
            next_tick = Instant::now() + speed.tick_interval(base_ms);
        }
        was_ticking = ticking;

        tokio::select! {
            biased;

            () = operator.changed() => {}

            command = commands.recv() => {
                let Some(command) = command else {
                    info!("Command channel closed");
                    return Ok(finish(operator, SessionEndReason::CommandsClosed, last_summary, days_run).await);
                };
                let reply = service.handle(command)?;
                callback.on_reply(&command, &reply, service);
            }

            () = tokio::time::sleep_until(next_tick), if ticking => {
                let summary = service.tick()?;
                days_run = days_run.saturating_add(1);
                callback.on_tick(&summary, service);
                last_summary = Some(summary);
                next_tick = Instant::now() + speed.tick_interval(base_ms);
            }
        }
    }
}

/// Log the session end.
pub fn log_session_end(result: &SessionResult) {
    info!(
        reason = ?result.end_reason,
        days_run = result.days_run,
        final_day = result.final_summary.as_ref().map(|s| s.day),
        "Session ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            day = summary.day,
            condition = %summary.weather.condition,
            crops = summary.crops_updated,
            livestock = summary.herd.updated,
            "Final tick summary"
        );
    } else {
        warn!("Session ended with no days simulated");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::{GameMode, SoilType};

    use super::*;
    use crate::clock::SimulationSpeed;
    use crate::config::GameConfig;

    fn service(mode: GameMode) -> SimulationService {
        let mut config = GameConfig::default();
        config.session.mode = mode;
        config.session.seed = Some(42);
        config.storage.enabled = false;
        config.time.base_tick_interval_ms = 1;
        SimulationService::from_config(config).unwrap()
    }

    #[derive(Default)]
    struct Counter {
        ticks: u64,
        replies: u64,
    }

    impl SessionCallback for Counter {
        fn on_tick(&mut self, _summary: &TickSummary, _service: &SimulationService) {
            self.ticks = self.ticks.saturating_add(1);
        }

        fn on_reply(&mut self, _command: &SessionCommand, _reply: &CommandReply, _service: &SimulationService) {
            self.replies = self.replies.saturating_add(1);
        }
    }

    #[tokio::test]
    async fn bounded_by_max_days() {
        let mut service = service(GameMode::Sandbox);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = Arc::new(OperatorState::new(SimulationSpeed::X1, 5));
        let start = service.state().day();

        let result = run_session(&mut service, &mut rx, &operator, &mut NoOpCallback).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::MaxDaysReached);
        assert_eq!(result.days_run, 5);
        assert_eq!(service.state().day(), start + 5);
        assert_eq!(result.final_summary.unwrap().day, start + 5);
        assert_eq!(operator.end_reason().await, Some(SessionEndReason::MaxDaysReached));
    }

    #[tokio::test]
    async fn operator_stop() {
        let mut service = service(GameMode::Sandbox);
        let (_tx, mut rx) = mpsc::channel(8);
        let operator = Arc::new(OperatorState::new(SimulationSpeed::X1, 0));
        operator.request_stop();

        let result = run_session(&mut service, &mut rx, &operator, &mut NoOpCallback).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::OperatorStop);
        assert_eq!(result.days_run, 0);
    }

    #[tokio::test]
    async fn closed_channel_ends_session() {
        let mut service = service(GameMode::Story);
        let (tx, mut rx) = mpsc::channel::<SessionCommand>(8);
        drop(tx);
        let operator = Arc::new(OperatorState::new(SimulationSpeed::X1, 0));

        let result = run_session(&mut service, &mut rx, &operator, &mut NoOpCallback).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::CommandsClosed);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn story_ticks_start_after_soil_selection() {
        let mut service = service(GameMode::Story);
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(SessionCommand::StartChapter).await.unwrap();
        tx.send(SessionCommand::SelectSoil(SoilType::Sandy)).await.unwrap();
        let operator = Arc::new(OperatorState::new(SimulationSpeed::X4, 3));
        let mut counter = Counter::default();

        let result = run_session(&mut service, &mut rx, &operator, &mut counter).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::MaxDaysReached);
        assert_eq!(counter.replies, 2);
        assert_eq!(counter.ticks, 3);
        assert_eq!(service.state().clock().speed(), SimulationSpeed::X4);
    }

    #[tokio::test]
    async fn paused_session_applies_commands_without_ticking() {
        let mut service = service(GameMode::Sandbox);
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(SessionCommand::Status).await.unwrap();
        drop(tx);
        let operator = Arc::new(OperatorState::new(SimulationSpeed::X1, 0));
        operator.pause();
        let mut counter = Counter::default();

        let result = run_session(&mut service, &mut rx, &operator, &mut counter).await.unwrap();

        assert_eq!(result.end_reason, SessionEndReason::CommandsClosed);
        assert_eq!(result.days_run, 0);
        assert_eq!(counter.replies, 1);
        assert_eq!(counter.ticks, 0);
    }
}
