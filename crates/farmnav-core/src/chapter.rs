//! Chapter progression state machine.
//!
//! ```text
//!   Intro --start--> SoilSelection --select_soil--> Active --all objectives--> Complete
//!     ^                                                                         |
//!     +------------------------- advance (next chapter) ------------------------+
//!   restart: any phase --> Intro (same chapter)
//! ```
//!
//! Objectives come in two classes. State-derived objectives
//! ([`ObjectiveKind::PlantCount`], [`ObjectiveKind::HarvestPoints`],
//! [`ObjectiveKind::LivestockCount`]) recompute `current` from the farm on
//! every [`observe`](ChapterProgression::observe). Event-triggered objectives
//! only change through [`record_event`](ChapterProgression::record_event).
//! In both classes a completed objective stays completed until the chapter
//! is reset.

use farmnav_types::SoilType;
use serde::{Deserialize, Serialize};

use crate::farm::FarmState;
use crate::story::ChapterDefinition;

/// Errors from invalid progression requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChapterError {
    /// No chapter with this id.
    #[error("unknown chapter {0}")]
    UnknownChapter(u32),

    /// The chapter list is empty.
    #[error("no chapters defined")]
    NoChapters,

    /// The request does not apply in the current phase.
    #[error("cannot {action} while the chapter is in the {phase:?} phase")]
    InvalidTransition {
        /// Current phase.
        phase: ChapterPhase,
        /// What was attempted.
        action: &'static str,
    },

    /// There is no chapter after the last one.
    #[error("already on the final chapter")]
    FinalChapter,
}

/// Player actions that satisfy event-triggered objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveTrigger {
    /// Watered a tile or used irrigate-all.
    Irrigation,
    /// Fertilized a tile or used fertilize-all.
    Fertilization,
    /// Treated a pest or gave emergency care.
    PestControl,
    /// Used irrigate-all, fertilize-all and harvest-all in one chapter.
    FarmBalance,
    /// Used harvest-all.
    BulkActions,
}

/// How an objective's progress is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "trigger", rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// Number of planted tiles.
    PlantCount,
    /// Cumulative reward points.
    HarvestPoints,
    /// Animals in the roster.
    LivestockCount,
    /// Completed by a player action.
    EventTriggered(ObjectiveTrigger),
}

/// One objective of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterObjective {
    /// Stable identifier, e.g. `plant-millet`.
    pub id: String,
    /// Player-facing text.
    pub description: String,
    /// Tracking rule.
    pub kind: ObjectiveKind,
    /// Threshold for state-derived objectives.
    #[serde(default)]
    pub target: Option<u64>,
    /// Latest measured progress.
    #[serde(default)]
    pub current: u64,
    /// Whether the objective has been met.
    #[serde(default)]
    pub completed: bool,
}

impl ChapterObjective {
    /// A fresh, incomplete objective.
    pub fn new(id: &str, description: &str, kind: ObjectiveKind, target: Option<u64>) -> Self {
        Self {
            id: id.to_owned(),
            description: description.to_owned(),
            kind,
            target,
            current: 0,
            completed: false,
        }
    }

    /// Copy with progress cleared.
    pub fn reset(&self) -> Self {
        Self {
            current: 0,
            completed: false,
            ..self.clone()
        }
    }

    /// Re-measure against the farm. Completion is sticky.
    fn evaluate(&mut self, state: &FarmState) {
        let measured = match self.kind {
            ObjectiveKind::PlantCount => state.planted_count() as u64,
            ObjectiveKind::HarvestPoints => state.bharat_points,
            ObjectiveKind::LivestockCount => state.livestock_count() as u64,
            ObjectiveKind::EventTriggered(_) => return,
        };
        self.current = measured;
        let met = match (self.kind, self.target) {
            (_, Some(target)) => measured >= target,
            (ObjectiveKind::HarvestPoints, None) => measured > 0,
            (_, None) => false,
        };
        self.completed = self.completed || met;
    }
}

/// Where the player is within a chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterPhase {
    /// Story introduction shown.
    #[default]
    Intro,
    /// Waiting for the player to choose a soil.
    SoilSelection,
    /// In play; objectives are tracked.
    Active,
    /// Every objective met.
    Complete,
}

/// Emitted once when a chapter completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCompletion {
    /// Completed chapter id.
    pub chapter_id: u32,
    /// Id of the chapter this unlocks, if any.
    pub next_chapter_id: Option<u32>,
    /// Badge awarded.
    pub badge: String,
    /// Reward points awarded.
    pub reward_points: u64,
}

/// Progress through the chapter list.
#[derive(Debug, Clone)]
pub struct ChapterProgression {
    chapters: Vec<ChapterDefinition>,
    index: usize,
    phase: ChapterPhase,
    objectives: Vec<ChapterObjective>,
}

impl ChapterProgression {
    /// Open chapter `chapter_id` in the intro phase.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::NoChapters`] for an empty list and
    /// [`ChapterError::UnknownChapter`] if the id is not in it.
    pub fn new(chapters: Vec<ChapterDefinition>, chapter_id: u32) -> Result<Self, ChapterError> {
        if chapters.is_empty() {
            return Err(ChapterError::NoChapters);
        }
        let index = chapters
            .iter()
            .position(|c| c.id == chapter_id)
            .ok_or(ChapterError::UnknownChapter(chapter_id))?;
        let mut progression = Self {
            chapters,
            index,
            phase: ChapterPhase::Intro,
            objectives: Vec::new(),
        };
        progression.reset_objectives();
        Ok(progression)
    }

    /// The chapter being played.
    pub fn current(&self) -> Option<&ChapterDefinition> {
        self.chapters.get(self.index)
    }

    /// Every chapter, in order.
    pub fn chapters(&self) -> &[ChapterDefinition] {
        &self.chapters
    }

    /// Current phase.
    pub const fn phase(&self) -> ChapterPhase {
        self.phase
    }

    /// Objectives with their latest progress.
    pub fn objectives(&self) -> &[ChapterObjective] {
        &self.objectives
    }

    fn reset_objectives(&mut self) {
        self.objectives = self
            .chapters
            .get(self.index)
            .map(|c| c.objectives.iter().map(ChapterObjective::reset).collect())
            .unwrap_or_default();
    }

    fn require(&self, phase: ChapterPhase, action: &'static str) -> Result<(), ChapterError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(ChapterError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    /// Leave the intro and ask for a soil.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::InvalidTransition`] outside the intro.
    pub fn start(&mut self) -> Result<(), ChapterError> {
        self.require(ChapterPhase::Intro, "start")?;
        self.phase = ChapterPhase::SoilSelection;
        Ok(())
    }

    /// Choose the farm soil and begin play.
    ///
    /// Objectives are reset, the grid is rebuilt with `soil`, the farm moves
    /// to the chapter's region and the calendar restarts.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::InvalidTransition`] unless a soil is awaited.
    pub fn select_soil(&mut self, soil: SoilType, state: &mut FarmState) -> Result<(), ChapterError> {
        self.require(ChapterPhase::SoilSelection, "select a soil")?;
        let chapter = self.current().ok_or(ChapterError::NoChapters)?;
        let (location, day) = (chapter.location, chapter.starting_day);

        self.reset_objectives();
        state.regenerate_grid(soil);
        state.location = location;
        state.clock_mut().reset_to(day);
        let placed: Vec<_> = state.livestock.iter().filter(|u| u.position.is_some()).cloned().collect();
        for unit in &placed {
            state.place_livestock(unit);
        }

        self.phase = ChapterPhase::Active;
        tracing::info!(chapter = self.index_id(), soil = %soil, %location, "Chapter started");
        Ok(())
    }

    fn index_id(&self) -> u32 {
        self.current().map_or(0, |c| c.id)
    }

    /// Mark event-triggered objectives for `trigger` as completed.
    ///
    /// Ignored outside the active phase.
    pub fn record_event(&mut self, trigger: ObjectiveTrigger) {
        if self.phase != ChapterPhase::Active {
            return;
        }
        for objective in &mut self.objectives {
            if objective.kind == ObjectiveKind::EventTriggered(trigger) && !objective.completed {
                objective.completed = true;
                tracing::debug!(objective = %objective.id, ?trigger, "Objective completed by event");
            }
        }
    }

    /// Re-evaluate objectives against the farm.
    ///
    /// Returns the completion record the first time every objective is met.
    pub fn observe(&mut self, state: &FarmState) -> Option<ChapterCompletion> {
        if self.phase != ChapterPhase::Active {
            return None;
        }
        for objective in &mut self.objectives {
            objective.evaluate(state);
        }
        if !self.objectives.iter().all(|o| o.completed) {
            return None;
        }

        self.phase = ChapterPhase::Complete;
        let chapter = self.current()?;
        let completion = ChapterCompletion {
            chapter_id: chapter.id,
            next_chapter_id: self.chapters.get(self.index.saturating_add(1)).map(|c| c.id),
            badge: chapter.reward.badge.clone(),
            reward_points: chapter.reward.bharat_points,
        };
        tracing::info!(
            chapter = completion.chapter_id,
            badge = %completion.badge,
            reward_points = completion.reward_points,
            "Chapter complete"
        );
        Some(completion)
    }

    /// Move to the next chapter after completion.
    ///
    /// Cumulative points gain the chapter reward and the badge is added.
    /// Credits carry over. The grid and roster are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::InvalidTransition`] unless complete and
    /// [`ChapterError::FinalChapter`] on the last chapter.
    pub fn advance(&mut self, state: &mut FarmState) -> Result<(), ChapterError> {
        self.require(ChapterPhase::Complete, "advance")?;
        let next_index = self.index.saturating_add(1);
        let next = self.chapters.get(next_index).ok_or(ChapterError::FinalChapter)?;
        let (next_location, next_day) = (next.location, next.starting_day);
        let finished = self.current().ok_or(ChapterError::NoChapters)?;

        state.add_points(finished.reward.bharat_points);
        state.badges.push(finished.reward.badge.clone());
        state.reset_field(next_location, next_day);

        self.index = next_index;
        self.phase = ChapterPhase::Intro;
        self.reset_objectives();
        tracing::info!(chapter = self.index_id(), "Advanced to next chapter");
        Ok(())
    }

    /// Replay the current chapter from its intro.
    ///
    /// Points and badges are kept; credits return to `starting_credits`.
    pub fn restart(&mut self, state: &mut FarmState, starting_credits: u64) {
        if let Some(chapter) = self.current() {
            state.reset_field(chapter.location, chapter.starting_day);
        }
        state.credits = starting_credits;
        self.phase = ChapterPhase::Intro;
        self.reset_objectives();
        tracing::info!(chapter = self.index_id(), "Chapter restarted");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::{CropType, Location, LivestockUnit, Occupant, Position, Species};

    use super::*;
    use crate::clock::FarmClock;
    use crate::config::TimeConfig;
    use crate::story;

    fn farm() -> FarmState {
        let clock = FarmClock::new(&TimeConfig::default()).unwrap();
        FarmState::new(5, SoilType::Sandy, Location::Rajasthan, 1000, clock)
    }

    fn active(chapter_id: u32, state: &mut FarmState) -> ChapterProgression {
        let mut progression = ChapterProgression::new(story::builtin_chapters(), chapter_id).unwrap();
        progression.start().unwrap();
        progression.select_soil(SoilType::Sandy, state).unwrap();
        progression
    }

    fn plant(state: &mut FarmState, count: u32) {
        for x in 0..count {
            let tile = state.tile_mut(Position::new(x % 5, x / 5)).unwrap();
            tile.occupant = Occupant::Crop(CropType::Ragi);
            tile.crop_stage = 1.0;
        }
    }

    fn objective<'a>(progression: &'a ChapterProgression, id: &str) -> &'a ChapterObjective {
        progression.objectives().iter().find(|o| o.id == id).unwrap()
    }

    #[test]
    fn phases_follow_the_happy_path() {
        let mut state = farm();
        let mut progression = ChapterProgression::new(story::builtin_chapters(), 1).unwrap();
        assert_eq!(progression.phase(), ChapterPhase::Intro);
        assert!(matches!(
            progression.select_soil(SoilType::Sandy, &mut state),
            Err(ChapterError::InvalidTransition { .. })
        ));
        progression.start().unwrap();
        assert_eq!(progression.phase(), ChapterPhase::SoilSelection);
        assert!(progression.start().is_err());
        progression.select_soil(SoilType::Loamy, &mut state).unwrap();
        assert_eq!(progression.phase(), ChapterPhase::Active);
        assert_eq!(state.soil_type(), SoilType::Loamy);
        assert_eq!(state.location, Location::Rajasthan);
    }

    #[test]
    fn unknown_chapter_is_rejected() {
        assert_eq!(
            ChapterProgression::new(story::builtin_chapters(), 9).err(),
            Some(ChapterError::UnknownChapter(9))
        );
        assert_eq!(ChapterProgression::new(Vec::new(), 1).err(), Some(ChapterError::NoChapters));
    }

    #[test]
    fn plant_objective_tracks_count_and_sticks() {
        let mut state = farm();
        let mut progression = active(1, &mut state);

        plant(&mut state, 2);
        progression.observe(&state);
        let plant_obj = objective(&progression, "plant-millet");
        assert_eq!(plant_obj.current, 2);
        assert!(!plant_obj.completed);

        plant(&mut state, 3);
        progression.observe(&state);
        assert!(objective(&progression, "plant-millet").completed);

        state.tile_mut(Position::new(0, 0)).unwrap().clear_crop();
        state.tile_mut(Position::new(1, 0)).unwrap().clear_crop();
        progression.observe(&state);
        let plant_obj = objective(&progression, "plant-millet");
        assert_eq!(plant_obj.current, 1);
        assert!(plant_obj.completed);
    }

    #[test]
    fn event_objectives_ignore_state() {
        let mut state = farm();
        let mut progression = active(1, &mut state);
        plant(&mut state, 5);
        progression.observe(&state);
        assert!(!objective(&progression, "water-crops").completed);

        progression.record_event(ObjectiveTrigger::Fertilization);
        assert!(!objective(&progression, "water-crops").completed);
        progression.record_event(ObjectiveTrigger::Irrigation);
        progression.observe(&state);
        assert!(objective(&progression, "water-crops").completed);
    }

    #[test]
    fn harvest_without_target_completes_on_any_points() {
        let mut state = farm();
        let mut objective = ChapterObjective::new("harvest-any", "Harvest anything", ObjectiveKind::HarvestPoints, None);
        objective.evaluate(&state);
        assert!(!objective.completed);
        state.add_points(1);
        objective.evaluate(&state);
        assert!(objective.completed);
        assert_eq!(objective.current, 1);
    }

    #[test]
    fn completing_every_objective_completes_the_chapter() {
        let mut state = farm();
        let mut progression = active(1, &mut state);

        plant(&mut state, 3);
        progression.record_event(ObjectiveTrigger::Irrigation);
        state.livestock.push(LivestockUnit::new(Species::Cow, 12.0, None));
        state.livestock.push(LivestockUnit::new(Species::Cow, 12.0, None));
        assert!(progression.observe(&state).is_none());

        state.add_points(100);
        let completion = progression.observe(&state).unwrap();
        assert_eq!(completion.chapter_id, 1);
        assert_eq!(completion.next_chapter_id, Some(2));
        assert_eq!(completion.badge, "Soil Sentinel");
        assert_eq!(completion.reward_points, 100);
        assert_eq!(progression.phase(), ChapterPhase::Complete);

        // Complete is terminal: no second completion record.
        assert!(progression.observe(&state).is_none());
        progression.record_event(ObjectiveTrigger::Irrigation);
        assert_eq!(progression.phase(), ChapterPhase::Complete);
    }

    #[test]
    fn advance_carries_rewards_and_resets_objectives() {
        let mut state = farm();
        let mut progression = active(1, &mut state);
        assert!(matches!(
            progression.advance(&mut state),
            Err(ChapterError::InvalidTransition { .. })
        ));

        plant(&mut state, 3);
        progression.record_event(ObjectiveTrigger::Irrigation);
        state.livestock.push(LivestockUnit::new(Species::Cow, 12.0, None));
        state.livestock.push(LivestockUnit::new(Species::Cow, 12.0, None));
        state.add_points(150);
        state.credits = 420;
        progression.observe(&state).unwrap();

        progression.advance(&mut state).unwrap();
        assert_eq!(progression.current().unwrap().id, 2);
        assert_eq!(progression.phase(), ChapterPhase::Intro);
        assert_eq!(state.bharat_points, 250);
        assert_eq!(state.credits, 420);
        assert_eq!(state.badges, vec!["Soil Sentinel".to_owned()]);
        assert_eq!(state.location, Location::Punjab);
        assert!(state.livestock.is_empty());
        assert_eq!(state.planted_count(), 0);
        assert!(progression.objectives().iter().all(|o| o.current == 0 && !o.completed));
    }

    #[test]
    fn final_chapter_cannot_advance() {
        let mut state = farm();
        let mut progression = active(5, &mut state);
        plant(&mut state, 6);
        for _ in 0..10 {
            state.livestock.push(LivestockUnit::new(Species::Cow, 12.0, None));
        }
        progression.record_event(ObjectiveTrigger::FarmBalance);
        state.add_points(300);
        let completion = progression.observe(&state).unwrap();
        assert_eq!(completion.next_chapter_id, None);
        assert_eq!(progression.advance(&mut state), Err(ChapterError::FinalChapter));
    }

    #[test]
    fn restart_keeps_points_and_badges_but_resets_credits() {
        let mut state = farm();
        let mut progression = active(2, &mut state);
        plant(&mut state, 6);
        state.add_points(80);
        state.credits = 10;
        state.badges.push("Soil Sentinel".to_owned());
        progression.record_event(ObjectiveTrigger::Irrigation);
        progression.observe(&state);

        progression.restart(&mut state, 1000);
        assert_eq!(progression.phase(), ChapterPhase::Intro);
        assert_eq!(progression.current().unwrap().id, 2);
        assert_eq!(state.bharat_points, 80);
        assert_eq!(state.credits, 1000);
        assert_eq!(state.badges.len(), 1);
        assert_eq!(state.planted_count(), 0);
        assert!(progression.objectives().iter().all(|o| o.current == 0 && !o.completed));
    }
}
