//! Operator control state for a running session.
//!
//! Shared by [`Arc`](std::sync::Arc) between the session runner and the
//! console. The console can pause, resume, change speed and request a
//! clean stop without touching the farm itself; every change wakes the
//! runner through a [`Notify`] so it is seen before the next tick.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::clock::SimulationSpeed;

/// Reason why the session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEndReason {
    /// Simulated the configured `max_days`.
    MaxDaysReached,
    /// An operator issued a stop command.
    OperatorStop,
    /// Every command sender was dropped.
    CommandsClosed,
}

/// Shared operator control state.
#[derive(Debug)]
pub struct OperatorState {
    /// Whether ticking is paused.
    paused: AtomicBool,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Current speed multiplier (1, 2 or 4).
    speed: AtomicU32,

    /// Wakes the runner after any control change.
    changed: Notify,

    /// Wall-clock time when the session started.
    started_at: DateTime<Utc>,

    /// Days to simulate before stopping (0 = unlimited).
    max_days: u64,

    /// Reason the session ended, if it has.
    end_reason: Mutex<Option<SessionEndReason>>,
}

impl OperatorState {
    /// Create a new operator state.
    pub fn new(speed: SimulationSpeed, max_days: u64) -> Self {
        Self {
            paused: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            speed: AtomicU32::new(speed.multiplier()),
            changed: Notify::new(),
            started_at: Utc::now(),
            max_days,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Check whether ticking is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause ticking. Commands are still applied while paused.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
        self.changed.notify_one();
    }

    /// Resume ticking and wake the runner.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.changed.notify_one();
    }

    /// Wait for the next control change.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.changed.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record the reason the session ended.
    pub async fn set_end_reason(&self, reason: SessionEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the session ended, if it has.
    pub async fn end_reason(&self) -> Option<SessionEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Speed
    // -----------------------------------------------------------------------

    /// Current speed.
    pub fn speed(&self) -> SimulationSpeed {
        SimulationSpeed::from_multiplier(self.speed.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Change the speed. Returns the previous speed.
    pub fn set_speed(&self, speed: SimulationSpeed) -> SimulationSpeed {
        let prev = self.speed.swap(speed.multiplier(), Ordering::AcqRel);
        self.changed.notify_one();
        SimulationSpeed::from_multiplier(prev).unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Check whether the day limit has been reached.
    ///
    /// Returns `true` if `max_days > 0` and `days_run >= max_days`.
    pub const fn day_limit_reached(&self, days_run: u64) -> bool {
        self.max_days > 0 && days_run >= self.max_days
    }

    /// Get the configured max days.
    pub const fn max_days(&self) -> u64 {
        self.max_days
    }

    /// Return the wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Return elapsed seconds since the session started.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now().signed_duration_since(self.started_at).num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }
}
