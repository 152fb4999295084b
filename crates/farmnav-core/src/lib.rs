//! Farm state, tick cycle and chapter progression for the Farm Navigator
//! simulation.
//!
//! This crate owns the session: the farm grid and roster, the daily tick
//! that drives the weather, crop and livestock engines, the player
//! actions, the story chapters and the async loop that serializes them.
//!
//! # Modules
//!
//! - [`clock`] -- Farm calendar and the 1x/2x/4x speed multiplier.
//! - [`config`] -- Configuration loading from `farmnav-config.yaml` into
//!   strongly-typed structs.
//! - [`farm`] -- [`FarmState`], the grid, roster, weather slot and balances.
//! - [`actions`] -- Validated player actions and their outcomes.
//! - [`tick`] -- The daily tick: calendar, weather, crops, livestock.
//! - [`chapter`] -- Chapter progression state machine and objectives.
//! - [`story`] -- The five built-in chapters.
//! - [`quiz`] -- Chapter quizzes and their Bharat Points.
//! - [`progress`] -- Best-effort chapter progress and badge persistence.
//! - [`session`] -- [`SimulationService`], one owner for a whole session.
//! - [`operator`] -- Pause, resume, speed and stop controls.
//! - [`runner`] -- The async session loop.
//!
//! [`FarmState`]: farm::FarmState
//! [`SimulationService`]: session::SimulationService

pub mod actions;
pub mod chapter;
pub mod clock;
pub mod config;
pub mod farm;
pub mod operator;
pub mod progress;
pub mod quiz;
pub mod runner;
pub mod session;
pub mod story;
pub mod tick;

pub use actions::{ActionOutcome, ActionReport, PlayerAction, RejectionReason};
pub use chapter::{ChapterCompletion, ChapterError, ChapterPhase, ChapterProgression, ObjectiveTrigger};
pub use clock::{FarmClock, SimulationSpeed};
pub use config::GameConfig;
pub use farm::FarmState;
pub use operator::{OperatorState, SessionEndReason};
pub use progress::{JsonFileStore, MemoryStore, ProgressStore};
pub use quiz::{Quiz, QuizError, QuizOutcome};
pub use runner::{NoOpCallback, SessionCallback, SessionResult, run_session};
pub use session::{CommandReply, SessionCommand, SessionError, SimulationService};
pub use tick::{TickSummary, run_tick};
