//! One play session: the farm, its engines, the chapter state machine and
//! the progress store, behind a single owner.
//!
//! [`SimulationService`] is the only writer of its [`FarmState`]. Ticks and
//! player commands both go through `&mut self`, so they are serialized by
//! construction; the async runner owns the service and interleaves the two.
//!
//! In story mode, player actions are refused until the chapter is active,
//! and ticks only run once a soil has been chosen. Sandbox mode ticks from
//! the start and has no objectives.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use farmnav_types::{GameMode, Location, SoilType, WeatherSample};
use farmnav_world::{ReferenceData, RegionCompatibility, WeatherEngine, WorldError, region_soil_compatibility};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::actions::{self, ActionContext, ActionError, ActionOutcome, PlayerAction, RejectionReason};
use crate::chapter::{ChapterCompletion, ChapterError, ChapterObjective, ChapterPhase, ChapterProgression};
use crate::clock::{ClockError, FarmClock, SimulationSpeed};
use crate::config::{ConfigError, GameConfig};
use crate::farm::FarmState;
use crate::progress::{JsonFileStore, MemoryStore, ProgressStore, record_completion};
use crate::quiz::{Quiz, QuizBook, QuizError, QuizOutcome};
use crate::story;
use crate::tick::{self, TickContext, TickError, TickSummary};

/// Offset between the weather seed and the action seed.
const ACTION_SEED_OFFSET: u64 = 0x9E37_79B9;

/// Errors that stop a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A configuration value is out of range, or a quiz file is unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The clock configuration is invalid.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The configured starting chapter does not exist.
    #[error("chapter error: {source}")]
    Chapter {
        /// The underlying chapter error.
        #[from]
        source: ChapterError,
    },

    /// Reference data could not be loaded.
    #[error("reference data error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An action needed reference data that is missing.
    #[error("action error: {source}")]
    Action {
        /// The underlying action error.
        #[from]
        source: ActionError,
    },

    /// A tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Something the console asked the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// A player action on the farm.
    Act(PlayerAction),
    /// Leave the chapter intro.
    StartChapter,
    /// Choose the farm soil.
    SelectSoil(SoilType),
    /// Move on after completing a chapter.
    NextChapter,
    /// Replay the current chapter.
    RestartChapter,
    /// Preview the coming days' weather.
    Forecast(u32),
    /// Report the session status.
    Status,
    /// Answer the chapter quiz with a zero-based option.
    AnswerQuiz {
        /// Chapter the answer is for.
        chapter: u32,
        /// Zero-based option index.
        choice: usize,
    },
}

/// Result of an action, with the chapter completion it caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// What the action did.
    pub outcome: ActionOutcome,
    /// Set when this action completed the chapter.
    pub completion: Option<ChapterCompletion>,
}

/// Reply to a [`SessionCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandReply {
    /// Reply to [`SessionCommand::Act`].
    Action(ActionResponse),
    /// The chapter moved to this phase.
    Phase(ChapterPhase),
    /// A soil was chosen; how well it suits the region.
    SoilSelected(RegionCompatibility),
    /// The chapter request does not apply right now.
    Refused(ChapterError),
    /// Upcoming weather, starting tomorrow.
    Forecast(Vec<WeatherSample>),
    /// Session snapshot.
    Status(Box<SessionStatus>),
    /// The quiz was graded.
    QuizAnswered(QuizOutcome),
    /// The quiz answer was not accepted.
    QuizRefused(QuizError),
}

/// Chapter part of a [`SessionStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterStatus {
    /// Chapter id.
    pub id: u32,
    /// Title.
    pub title: String,
    /// Region name.
    pub region: String,
    /// Phase.
    pub phase: ChapterPhase,
    /// Objectives with progress.
    pub objectives: Vec<ChapterObjective>,
}

/// Snapshot of a session for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    /// Current day.
    pub day: u32,
    /// Tick speed.
    pub speed: SimulationSpeed,
    /// Story or sandbox.
    pub mode: GameMode,
    /// Farm location.
    pub location: Location,
    /// Farm soil.
    pub soil: SoilType,
    /// Today's weather.
    pub weather: WeatherSample,
    /// Spendable credits.
    pub credits: u64,
    /// Cumulative reward points.
    pub bharat_points: u64,
    /// Earned badges.
    pub badges: Vec<String>,
    /// Planted tiles.
    pub planted: usize,
    /// Tiles ready to harvest.
    pub harvestable: usize,
    /// Animals on the farm.
    pub livestock: usize,
    /// Story chapter, absent in sandbox mode.
    pub chapter: Option<ChapterStatus>,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Day {} ({}, {} mode) | {} on {} soil",
            self.day, self.speed, self.mode, self.location, self.soil
        )?;
        writeln!(
            f,
            "Weather: {} {:.0}C, {:.0}mm rain, {:.0}% humidity",
            self.weather.condition, self.weather.temperature, self.weather.precipitation, self.weather.humidity
        )?;
        writeln!(
            f,
            "Credits: {} | Bharat Points: {} | Crops: {} ({} ready) | Livestock: {}",
            self.credits, self.bharat_points, self.planted, self.harvestable, self.livestock
        )?;
        if !self.badges.is_empty() {
            writeln!(f, "Badges: {}", self.badges.join(", "))?;
        }
        if let Some(chapter) = &self.chapter {
            writeln!(f, "Chapter {}: {} ({}) [{:?}]", chapter.id, chapter.title, chapter.region, chapter.phase)?;
            for objective in &chapter.objectives {
                let mark = if objective.completed { "x" } else { " " };
                match objective.target {
                    Some(target) => writeln!(
                        f,
                        "  [{mark}] {} ({}/{target})",
                        objective.description, objective.current
                    )?,
                    None => writeln!(f, "  [{mark}] {}", objective.description)?,
                }
            }
        }
        Ok(())
    }
}

/// A running game.
pub struct SimulationService {
    config: GameConfig,
    data: Arc<ReferenceData>,
    state: FarmState,
    weather: WeatherEngine,
    progression: ChapterProgression,
    store: Box<dyn ProgressStore>,
    quizzes: QuizBook,
    rng: SmallRng,
}

impl fmt::Debug for SimulationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationService")
            .field("mode", &self.config.session.mode)
            .field("day", &self.state.day())
            .field("phase", &self.progression.phase())
            .finish_non_exhaustive()
    }
}

impl SimulationService {
    /// Build a session from loaded parts.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for an out-of-range setting,
    /// [`SessionError::Clock`] for an invalid time configuration and
    /// [`SessionError::Chapter`] if the starting chapter does not exist.
    pub fn new(
        config: GameConfig,
        data: Arc<ReferenceData>,
        store: Box<dyn ProgressStore>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let clock = FarmClock::new(&config.time)?;
        let progression = ChapterProgression::new(story::builtin_chapters(), config.session.starting_chapter)?;
        let chapter = progression.current().ok_or(ChapterError::NoChapters)?;
        let (location, starting_day) = (chapter.location, chapter.starting_day);

        let soil = data
            .region(location)
            .and_then(|region| region.ideal_soils.first().copied())
            .unwrap_or(SoilType::Loamy);
        let mut state = FarmState::new(
            config.session.grid_size,
            soil,
            location,
            config.session.starting_credits,
            clock,
        );
        if config.session.mode.is_story() {
            state.clock_mut().reset_to(starting_day);
        }

        let capacity = config.weather.history_capacity;
        let (weather, rng) = match config.session.seed {
            Some(seed) => (
                WeatherEngine::seeded(Arc::clone(&data), location, capacity, seed),
                SmallRng::seed_from_u64(seed.wrapping_add(ACTION_SEED_OFFSET)),
            ),
            None => (
                WeatherEngine::new(Arc::clone(&data), location, capacity),
                SmallRng::from_os_rng(),
            ),
        };

        let mut service = Self {
            config,
            data,
            state,
            weather,
            progression,
            store,
            quizzes: QuizBook::builtin(),
            rng,
        };
        service.refresh_weather();
        service.check_unlocked();

        info!(
            mode = %service.config.session.mode,
            chapter = service.chapter_id(),
            %location,
            grid_size = service.config.session.grid_size,
            credits = service.state.credits,
            seeded = service.config.session.seed.is_some(),
            "Session created"
        );
        Ok(service)
    }

    /// Build a session from configuration alone.
    ///
    /// Reference data comes from `reference_data_path` when set, the
    /// built-in tables otherwise. Progress goes to JSON files when storage
    /// is enabled, to memory otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::World`] if the reference data file cannot
    /// be loaded, [`SessionError::Config`] if the quiz file cannot, and
    /// anything [`new`](Self::new) returns.
    pub fn from_config(config: GameConfig) -> Result<Self, SessionError> {
        let data = match &config.reference_data_path {
            Some(path) => ReferenceData::from_file(path)?,
            None => ReferenceData::builtin(),
        };
        let quizzes = match &config.quiz_path {
            Some(path) => Some(QuizBook::from_file(path)?),
            None => None,
        };
        let store: Box<dyn ProgressStore> = if config.storage.enabled {
            Box::new(JsonFileStore::new(
                config.storage.progress_path.clone(),
                config.storage.badges_path.clone(),
            ))
        } else {
            Box::new(MemoryStore::new())
        };
        let mut service = Self::new(config, Arc::new(data), store)?;
        if let Some(quizzes) = quizzes {
            service.quizzes = quizzes;
        }
        Ok(service)
    }

    fn check_unlocked(&self) {
        if !self.config.session.mode.is_story() {
            return;
        }
        let id = self.chapter_id();
        match self.store.load_progress() {
            Ok(progress) if !progress.is_unlocked(id) => {
                warn!(chapter = id, "Starting chapter has not been unlocked yet");
            }
            Ok(_) => {}
            Err(error) => warn!(error = %error, "Failed to read chapter progress"),
        }
    }

    fn chapter_id(&self) -> u32 {
        self.progression.current().map_or(0, |c| c.id)
    }

    fn refresh_weather(&mut self) {
        self.weather.set_location(self.state.location);
        self.state.weather = self.weather.sample_for_day(self.state.day());
    }

    /// The farm.
    pub const fn state(&self) -> &FarmState {
        &self.state
    }

    /// The chapter state machine.
    pub const fn progression(&self) -> &ChapterProgression {
        &self.progression
    }

    /// Session configuration.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reference tables.
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// The last `days` days of weather, oldest first.
    pub fn weather_history(&self, days: usize) -> Vec<WeatherSample> {
        self.weather.history(days)
    }

    /// Whether the calendar should be running.
    pub fn ticks_enabled(&self) -> bool {
        match self.config.session.mode {
            GameMode::Sandbox => true,
            GameMode::Story => matches!(self.progression.phase(), ChapterPhase::Active | ChapterPhase::Complete),
        }
    }

    /// Set the tick speed.
    pub const fn set_speed(&mut self, speed: SimulationSpeed) {
        self.state.clock_mut().set_speed(speed);
    }

    /// Run one day.
    ///
    /// # Errors
    ///
    /// Propagates [`TickError`].
    pub fn tick(&mut self) -> Result<TickSummary, SessionError> {
        let ctx = TickContext {
            data: &self.data,
            growth: &self.config.growth,
            livestock: &self.config.livestock,
            mode: self.config.session.mode,
        };
        Ok(tick::run_tick(&mut self.state, &mut self.weather, &ctx)?)
    }

    /// Apply a player action and update chapter progress.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Action`] when the action needs reference
    /// data that is missing. Gameplay refusals are
    /// [`ActionOutcome::Rejected`].
    pub fn apply(&mut self, action: PlayerAction) -> Result<ActionResponse, SessionError> {
        let mode = self.config.session.mode;
        if mode.is_story() && self.progression.phase() != ChapterPhase::Active {
            warn!(?action, phase = ?self.progression.phase(), "Action refused before chapter start");
            return Ok(ActionResponse {
                outcome: ActionOutcome::Rejected(RejectionReason::ChapterNotActive),
                completion: None,
            });
        }

        let ctx = ActionContext {
            data: &self.data,
            livestock: &self.config.livestock,
            mode,
        };
        let outcome = actions::apply_action(&mut self.state, action, &ctx, &mut self.rng)?;

        let completion = match &outcome {
            ActionOutcome::Applied(report) => {
                for trigger in &report.triggers {
                    self.progression.record_event(*trigger);
                }
                self.observe()
            }
            ActionOutcome::Rejected(reason) => {
                warn!(?action, reason = %reason, "Action rejected");
                None
            }
        };
        Ok(ActionResponse { outcome, completion })
    }

    fn observe(&mut self) -> Option<ChapterCompletion> {
        let completion = self.progression.observe(&self.state)?;
        record_completion(self.store.as_mut(), &completion, Utc::now());
        Some(completion)
    }

    /// Leave the chapter intro.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::InvalidTransition`] outside the intro.
    pub fn start_chapter(&mut self) -> Result<ChapterPhase, ChapterError> {
        self.progression.start()?;
        Ok(self.progression.phase())
    }

    /// Choose the farm soil.
    ///
    /// In story mode this begins the chapter. In sandbox mode it replaces
    /// the grid at any time, keeping the herd.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::InvalidTransition`] in story mode unless a
    /// soil is awaited.
    pub fn select_soil(&mut self, soil: SoilType) -> Result<RegionCompatibility, ChapterError> {
        if self.config.session.mode.is_story() {
            self.progression.select_soil(soil, &mut self.state)?;
            self.refresh_weather();
        } else {
            self.state.regenerate_grid(soil);
            let placed: Vec<_> = self.state.livestock.iter().filter(|u| u.position.is_some()).cloned().collect();
            for unit in &placed {
                self.state.place_livestock(unit);
            }
        }
        Ok(region_soil_compatibility(self.state.location, soil, &self.data))
    }

    /// Move on to the next chapter.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError`] unless the chapter is complete and not the
    /// last one.
    pub fn next_chapter(&mut self) -> Result<ChapterPhase, ChapterError> {
        self.progression.advance(&mut self.state)?;
        self.refresh_weather();
        Ok(self.progression.phase())
    }

    /// Replay the current chapter.
    pub fn restart_chapter(&mut self) -> ChapterPhase {
        self.progression.restart(&mut self.state, self.config.session.starting_credits);
        self.refresh_weather();
        self.progression.phase()
    }

    /// The quiz for the chapter in play, if it is still open.
    pub fn open_quiz(&self) -> Option<&Quiz> {
        let id = self.chapter_id();
        if self.quizzes.is_answered(id) {
            return None;
        }
        self.quizzes.quiz(id)
    }

    /// Answer the current chapter's quiz with a zero-based `choice`.
    ///
    /// Only a completed chapter can be quizzed, once per session; a
    /// correct answer adds the quiz's points to the farm.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NotComplete`] outside the complete phase,
    /// [`QuizError::WrongChapter`] for any chapter but the current one,
    /// and whatever [`QuizBook::answer`] refuses.
    pub fn answer_quiz(&mut self, chapter: u32, choice: usize) -> Result<QuizOutcome, QuizError> {
        let phase = self.progression.phase();
        if !self.config.session.mode.is_story() || phase != ChapterPhase::Complete {
            return Err(QuizError::NotComplete(phase));
        }
        let current = self.chapter_id();
        if chapter != current {
            return Err(QuizError::WrongChapter {
                requested: chapter,
                current,
            });
        }
        let outcome = self.quizzes.answer(chapter, choice)?;
        self.state.add_points(outcome.points_earned);
        info!(
            chapter,
            correct = outcome.correct,
            points = outcome.points_earned,
            "Quiz answered"
        );
        Ok(outcome)
    }

    /// Preview the coming `days` days of weather.
    pub fn forecast(&mut self, days: u32) -> Vec<WeatherSample> {
        self.weather.forecast(days)
    }

    /// Snapshot for display.
    pub fn status(&self) -> SessionStatus {
        let chapter = self
            .progression
            .current()
            .filter(|_| self.config.session.mode.is_story())
            .map(|c| ChapterStatus {
                id: c.id,
                title: c.title.clone(),
                region: c.region.clone(),
                phase: self.progression.phase(),
                objectives: self.progression.objectives().to_vec(),
            });
        SessionStatus {
            day: self.state.day(),
            speed: self.state.clock().speed(),
            mode: self.config.session.mode,
            location: self.state.location,
            soil: self.state.soil_type(),
            weather: self.state.weather,
            credits: self.state.credits,
            bharat_points: self.state.bharat_points,
            badges: self.state.badges.clone(),
            planted: self.state.planted_count(),
            harvestable: self.state.harvestable_count(),
            livestock: self.state.livestock_count(),
            chapter,
        }
    }

    /// Dispatch a console command.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] from [`apply`](Self::apply). Chapter
    /// requests that do not fit the current phase come back as
    /// [`CommandReply::Refused`].
    pub fn handle(&mut self, command: SessionCommand) -> Result<CommandReply, SessionError> {
        let reply = match command {
            SessionCommand::Act(action) => CommandReply::Action(self.apply(action)?),
            SessionCommand::StartChapter => phase_reply(self.start_chapter()),
            SessionCommand::SelectSoil(soil) => match self.select_soil(soil) {
                Ok(compatibility) => CommandReply::SoilSelected(compatibility),
                Err(error) => CommandReply::Refused(error),
            },
            SessionCommand::NextChapter => phase_reply(self.next_chapter()),
            SessionCommand::RestartChapter => CommandReply::Phase(self.restart_chapter()),
            SessionCommand::Forecast(days) => CommandReply::Forecast(self.forecast(days)),
            SessionCommand::Status => CommandReply::Status(Box::new(self.status())),
            SessionCommand::AnswerQuiz { chapter, choice } => match self.answer_quiz(chapter, choice) {
                Ok(outcome) => CommandReply::QuizAnswered(outcome),
                Err(error) => {
                    warn!(error = %error, "Quiz answer refused");
                    CommandReply::QuizRefused(error)
                }
            },
        };
        Ok(reply)
    }
}

fn phase_reply(result: Result<ChapterPhase, ChapterError>) -> CommandReply {
    match result {
        Ok(phase) => CommandReply::Phase(phase),
        Err(error) => {
            warn!(error = %error, "Chapter request refused");
            CommandReply::Refused(error)
        }
    }
}
