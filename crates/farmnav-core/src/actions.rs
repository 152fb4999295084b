//! Player actions against the farm.
//!
//! Every action is validated first and applied second. Validation failures
//! are not errors: they come back as [`ActionOutcome::Rejected`] with a
//! [`RejectionReason`] the UI can show. Only missing reference data is an
//! [`ActionError`].
//!
//! Actions that drive event-triggered chapter objectives report the
//! matching [`ObjectiveTrigger`]s in their [`ActionReport`].

use farmnav_livestock::{LivestockConfig, LivestockError, apply_feeding, calculate_daily_yield};
use farmnav_types::{
    Amendment, CropType, GameMode, LivestockId, LivestockUnit, Occupant, Position, Species, Tile, clamp_percent,
};
use farmnav_world::{
    ReferenceData, apply_amendment, apply_emergency_care, apply_treatment, calculate_yield, check_pests_and_diseases,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chapter::ObjectiveTrigger;
use crate::farm::{BulkUsage, FarmState};

/// Moisture added by watering.
const WATER_AMOUNT: f64 = 20.0;

/// Nutrients added by fertilizing.
const FERTILIZER_AMOUNT: f64 = 30.0;

/// Errors from actions that need reference data which is missing.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A livestock lookup failed.
    #[error("livestock error: {source}")]
    Livestock {
        /// The underlying livestock error.
        #[from]
        source: LivestockError,
    },
}

/// Something the player asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    /// Plant a crop on an empty tile.
    Plant {
        /// Target tile.
        position: Position,
        /// Crop to plant.
        crop: CropType,
    },
    /// Water one tile.
    Water {
        /// Target tile.
        position: Position,
    },
    /// Fertilize one tile.
    Fertilize {
        /// Target tile.
        position: Position,
    },
    /// Harvest one mature crop.
    Harvest {
        /// Target tile.
        position: Position,
    },
    /// Water every planted tile.
    IrrigateAll,
    /// Fertilize every planted tile.
    FertilizeAll,
    /// Harvest every mature crop.
    HarvestAll,
    /// Apply a soil amendment to one tile.
    Amend {
        /// Target tile.
        position: Position,
        /// Amendment to apply.
        amendment: Amendment,
    },
    /// Diagnose and treat a pest or disease.
    TreatPest {
        /// Target tile.
        position: Position,
    },
    /// Catch-all rescue for a struggling crop.
    EmergencyCare {
        /// Target tile.
        position: Position,
    },
    /// Buy an animal, optionally placing it on a free tile.
    BuyLivestock {
        /// Species to buy.
        species: Species,
        /// Tile to place it on.
        position: Option<Position>,
    },
    /// Feed an animal.
    FeedLivestock {
        /// Animal to feed.
        id: LivestockId,
    },
    /// Water an animal.
    WaterLivestock {
        /// Animal to water.
        id: LivestockId,
    },
    /// Collect today's produce from an animal.
    CollectProduce {
        /// Animal to collect from.
        id: LivestockId,
    },
}

/// Why an action was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// Position is outside the grid.
    OutOfBounds(Position),
    /// Tile already holds a crop or an animal.
    TileOccupied(Position),
    /// Tile has no crop.
    NoCrop(Position),
    /// Crop has not reached maturity.
    CropNotReady(Position),
    /// A bulk action found nothing to act on.
    NothingToDo,
    /// The crop has no pest or disease to treat.
    NoTreatmentNeeded(Position),
    /// Not enough credits.
    InsufficientCredits {
        /// Credits required.
        needed: u64,
        /// Credits available.
        available: u64,
    },
    /// No animal with this id.
    UnknownLivestock(LivestockId),
    /// Every tile is taken.
    NoFreeTile,
    /// The chapter is not in play yet.
    ChapterNotActive,
}

impl core::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "{p} is outside the farm"),
            Self::TileOccupied(p) => write!(f, "tile {p} is already occupied"),
            Self::NoCrop(p) => write!(f, "no crop planted at {p}"),
            Self::CropNotReady(p) => write!(f, "crop at {p} is not ready for harvest"),
            Self::NothingToDo => f.write_str("nothing to do: plant some crops first"),
            Self::NoTreatmentNeeded(p) => write!(f, "crop at {p} is healthy and needs no treatment"),
            Self::InsufficientCredits { needed, available } => {
                write!(f, "need {needed} credits, have {available}")
            }
            Self::UnknownLivestock(id) => write!(f, "no animal with id {id}"),
            Self::NoFreeTile => f.write_str("no free tile left for the animal"),
            Self::ChapterNotActive => f.write_str("start the chapter and choose a soil first"),
        }
    }
}

/// Effects of an applied action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    /// What happened, for the player.
    pub message: String,
    /// Reward points earned.
    pub points_earned: u64,
    /// Credits spent.
    pub credits_spent: u64,
    /// Event-triggered objectives this action satisfies.
    pub triggers: Vec<ObjectiveTrigger>,
}

impl ActionReport {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    fn with_trigger(mut self, trigger: ObjectiveTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }
}

/// Result of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The action changed the farm.
    Applied(ActionReport),
    /// The action was refused; the farm is unchanged.
    Rejected(RejectionReason),
}

impl ActionOutcome {
    /// Whether the action was applied.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Read-only inputs an action may consult.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Reference tables.
    pub data: &'a ReferenceData,
    /// Livestock tunables.
    pub livestock: &'a LivestockConfig,
    /// Story or sandbox.
    pub mode: GameMode,
}

/// Validate and apply one action.
pub fn apply_action<R: Rng + ?Sized>(
    state: &mut FarmState,
    action: PlayerAction,
    ctx: &ActionContext<'_>,
    rng: &mut R,
) -> Result<ActionOutcome, ActionError> {
    let outcome = match action {
        PlayerAction::Plant { position, crop } => plant(state, position, crop),
        PlayerAction::Water { position } => water(state, position),
        PlayerAction::Fertilize { position } => fertilize(state, position),
        PlayerAction::Harvest { position } => harvest(state, position, ctx.data),
        PlayerAction::IrrigateAll => irrigate_all(state),
        PlayerAction::FertilizeAll => fertilize_all(state),
        PlayerAction::HarvestAll => harvest_all(state, ctx.data),
        PlayerAction::Amend { position, amendment } => amend(state, position, amendment),
        PlayerAction::TreatPest { position } => treat_pest(state, position, ctx.mode, rng),
        PlayerAction::EmergencyCare { position } => emergency_care(state, position),
        PlayerAction::BuyLivestock { species, position } => buy_livestock(state, species, position, ctx.data)?,
        PlayerAction::FeedLivestock { id } => feed(state, id, ctx.livestock),
        PlayerAction::WaterLivestock { id } => water_animal(state, id),
        PlayerAction::CollectProduce { id } => collect(state, id, ctx.data)?,
    };
    Ok(outcome)
}

fn tile_at(state: &mut FarmState, position: Position) -> Result<&mut Tile, RejectionReason> {
    state.tile_mut(position).ok_or(RejectionReason::OutOfBounds(position))
}

fn planted_tile(state: &mut FarmState, position: Position) -> Result<&mut Tile, RejectionReason> {
    let tile = tile_at(state, position)?;
    if tile.crop().is_none() {
        return Err(RejectionReason::NoCrop(position));
    }
    Ok(tile)
}

fn finish(result: Result<ActionReport, RejectionReason>) -> ActionOutcome {
    match result {
        Ok(report) => ActionOutcome::Applied(report),
        Err(reason) => ActionOutcome::Rejected(reason),
    }
}

fn plant(state: &mut FarmState, position: Position, crop: CropType) -> ActionOutcome {
    finish(tile_at(state, position).and_then(|tile| {
        if !tile.is_empty() {
            return Err(RejectionReason::TileOccupied(position));
        }
        tile.occupant = Occupant::Crop(crop);
        tile.crop_stage = 1.0;
        Ok(ActionReport::new(format!("{crop} planted at {position}")))
    }))
}

fn water(state: &mut FarmState, position: Position) -> ActionOutcome {
    finish(tile_at(state, position).map(|tile| {
        tile.moisture = clamp_percent(tile.moisture + WATER_AMOUNT);
        ActionReport::new("Moisture increased by 20%").with_trigger(ObjectiveTrigger::Irrigation)
    }))
}

fn fertilize(state: &mut FarmState, position: Position) -> ActionOutcome {
    finish(tile_at(state, position).map(|tile| {
        tile.nutrients = clamp_percent(tile.nutrients + FERTILIZER_AMOUNT);
        ActionReport::new("Nutrients increased by 30%").with_trigger(ObjectiveTrigger::Fertilization)
    }))
}

fn harvest(state: &mut FarmState, position: Position, data: &ReferenceData) -> ActionOutcome {
    let soil = state.soil_type();
    let result = planted_tile(state, position).and_then(|tile| {
        if !tile.is_harvestable() {
            return Err(RejectionReason::CropNotReady(position));
        }
        let harvest = calculate_yield(tile, soil, data);
        tile.clear_crop();
        Ok(harvest)
    });
    finish(result.map(|harvest| {
        state.add_points(harvest.bharat_points);
        ActionReport {
            points_earned: harvest.bharat_points,
            ..ActionReport::new(format!("{} +{} Bharat Points", harvest.message, harvest.bharat_points))
        }
    }))
}

/// Record a bulk action and report whether all three have now been used.
fn mark_bulk(state: &mut FarmState, report: ActionReport, set: impl FnOnce(&mut BulkUsage)) -> ActionReport {
    set(&mut state.bulk_usage);
    if state.bulk_usage.all() {
        report.with_trigger(ObjectiveTrigger::FarmBalance)
    } else {
        report
    }
}

fn irrigate_all(state: &mut FarmState) -> ActionOutcome {
    let mut count = 0_usize;
    for tile in state.tiles_mut().iter_mut().filter(|t| t.crop().is_some()) {
        tile.moisture = clamp_percent(tile.moisture + WATER_AMOUNT);
        count = count.saturating_add(1);
    }
    if count == 0 {
        return ActionOutcome::Rejected(RejectionReason::NothingToDo);
    }
    let report = ActionReport::new(format!("Watered {count} crops. Moisture increased by 20%"))
        .with_trigger(ObjectiveTrigger::Irrigation);
    ActionOutcome::Applied(mark_bulk(state, report, |bulk| bulk.irrigate = true))
}

fn fertilize_all(state: &mut FarmState) -> ActionOutcome {
    let mut count = 0_usize;
    for tile in state.tiles_mut().iter_mut().filter(|t| t.crop().is_some()) {
        tile.nutrients = clamp_percent(tile.nutrients + FERTILIZER_AMOUNT);
        count = count.saturating_add(1);
    }
    if count == 0 {
        return ActionOutcome::Rejected(RejectionReason::NothingToDo);
    }
    let report = ActionReport::new(format!("Applied fertilizer to {count} crops. Nutrients increased by 30%"))
        .with_trigger(ObjectiveTrigger::Fertilization);
    ActionOutcome::Applied(mark_bulk(state, report, |bulk| bulk.fertilize = true))
}

fn harvest_all(state: &mut FarmState, data: &ReferenceData) -> ActionOutcome {
    let soil = state.soil_type();
    let mut count = 0_usize;
    let mut points = 0_u64;
    for tile in state.tiles_mut().iter_mut().filter(|t| t.is_harvestable()) {
        let harvest = calculate_yield(tile, soil, data);
        points = points.saturating_add(harvest.bharat_points);
        tile.clear_crop();
        count = count.saturating_add(1);
    }
    if count == 0 {
        return ActionOutcome::Rejected(RejectionReason::NothingToDo);
    }
    state.add_points(points);
    let report = ActionReport {
        points_earned: points,
        ..ActionReport::new(format!("Harvested {count} crops. Earned {points} Bharat Points"))
    }
    .with_trigger(ObjectiveTrigger::BulkActions);
    ActionOutcome::Applied(mark_bulk(state, report, |bulk| bulk.harvest = true))
}

fn amend(state: &mut FarmState, position: Position, amendment: Amendment) -> ActionOutcome {
    finish(tile_at(state, position).map(|tile| {
        *tile = apply_amendment(tile, amendment);
        ActionReport::new(format!("Applied {amendment} at {position}"))
    }))
}

fn treat_pest<R: Rng + ?Sized>(state: &mut FarmState, position: Position, mode: GameMode, rng: &mut R) -> ActionOutcome {
    let condition = state.weather.condition;
    let available = state.credits;
    let diagnosis = planted_tile(state, position).and_then(|tile| {
        let pest = check_pests_and_diseases(tile, condition, mode, rng)
            .ok_or(RejectionReason::NoTreatmentNeeded(position))?;
        if available < pest.treatment_cost() {
            return Err(RejectionReason::InsufficientCredits {
                needed: pest.treatment_cost(),
                available,
            });
        }
        *tile = apply_treatment(tile, pest);
        Ok(pest)
    });
    finish(diagnosis.map(|pest| {
        let cost = pest.treatment_cost();
        state.credits = state.credits.saturating_sub(cost);
        tracing::info!(%position, pest = %pest, cost, "Pest treated");
        ActionReport {
            credits_spent: cost,
            ..ActionReport::new(format!(
                "{pest} treated ({}). Health improved by {}%",
                pest.treatment(),
                pest.health_boost()
            ))
        }
        .with_trigger(ObjectiveTrigger::PestControl)
    }))
}

fn emergency_care(state: &mut FarmState, position: Position) -> ActionOutcome {
    let available = state.credits;
    let result = planted_tile(state, position).and_then(|tile| {
        let care = apply_emergency_care(tile);
        if available < care.cost {
            return Err(RejectionReason::InsufficientCredits {
                needed: care.cost,
                available,
            });
        }
        *tile = care.tile;
        Ok(care.cost)
    });
    finish(result.map(|cost| {
        state.credits = state.credits.saturating_sub(cost);
        ActionReport {
            credits_spent: cost,
            ..ActionReport::new("Emergency care applied. Crop health significantly improved")
        }
        .with_trigger(ObjectiveTrigger::PestControl)
    }))
}

fn buy_livestock(
    state: &mut FarmState,
    species: Species,
    position: Option<Position>,
    data: &ReferenceData,
) -> Result<ActionOutcome, ActionError> {
    let profile = data.livestock(species).ok_or(LivestockError::UnknownSpecies(species))?;

    let position = match position {
        Some(position) => match state.tile(position) {
            None => return Ok(ActionOutcome::Rejected(RejectionReason::OutOfBounds(position))),
            Some(tile) if !tile.is_empty() => {
                return Ok(ActionOutcome::Rejected(RejectionReason::TileOccupied(position)));
            }
            Some(_) => position,
        },
        None => match state.first_free_tile() {
            Some(position) => position,
            None => return Ok(ActionOutcome::Rejected(RejectionReason::NoFreeTile)),
        },
    };

    if !state.try_spend(profile.cost) {
        return Ok(ActionOutcome::Rejected(RejectionReason::InsufficientCredits {
            needed: profile.cost,
            available: state.credits,
        }));
    }

    let unit = LivestockUnit::new(species, profile.product_amount, Some(position));
    state.place_livestock(&unit);
    tracing::info!(
        livestock_id = %unit.id,
        %species,
        cost = profile.cost,
        credits = state.credits,
        "Livestock purchased"
    );
    let report = ActionReport {
        credits_spent: profile.cost,
        ..ActionReport::new(format!("{} added to your farm (-{} Credits)", profile.name, profile.cost))
    };
    state.livestock.push(unit);
    Ok(ActionOutcome::Applied(report))
}

fn feed(state: &mut FarmState, id: LivestockId, config: &LivestockConfig) -> ActionOutcome {
    let Some(unit) = state.animal_mut(id) else {
        return ActionOutcome::Rejected(RejectionReason::UnknownLivestock(id));
    };
    *unit = apply_feeding(unit, config);
    state.care_log.mark_fed(id);
    ActionOutcome::Applied(ActionReport::new("Livestock fed"))
}

fn water_animal(state: &mut FarmState, id: LivestockId) -> ActionOutcome {
    if state.animal(id).is_none() {
        return ActionOutcome::Rejected(RejectionReason::UnknownLivestock(id));
    }
    state.care_log.mark_watered(id);
    ActionOutcome::Applied(ActionReport::new("Livestock watered"))
}

fn collect(state: &mut FarmState, id: LivestockId, data: &ReferenceData) -> Result<ActionOutcome, ActionError> {
    let Some(unit) = state.animal(id) else {
        return Ok(ActionOutcome::Rejected(RejectionReason::UnknownLivestock(id)));
    };
    let produce = calculate_daily_yield(unit, data)?;
    state.add_points(produce.bharat_points);
    Ok(ActionOutcome::Applied(ActionReport {
        points_earned: produce.bharat_points,
        ..ActionReport::new(format!(
            "Collected {:.1} (+{} BP)",
            produce.amount, produce.bharat_points
        ))
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::{Location, SoilType, WeatherCondition};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::clock::FarmClock;
    use crate::config::TimeConfig;

    struct Fixture {
        data: ReferenceData,
        livestock: LivestockConfig,
        rng: SmallRng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                data: ReferenceData::builtin(),
                livestock: LivestockConfig::default(),
                rng: SmallRng::seed_from_u64(17),
            }
        }

        fn apply(&mut self, state: &mut FarmState, action: PlayerAction) -> ActionOutcome {
            let ctx = ActionContext {
                data: &self.data,
                livestock: &self.livestock,
                mode: GameMode::Sandbox,
            };
            apply_action(state, action, &ctx, &mut self.rng).unwrap()
        }
    }

    fn farm(credits: u64) -> FarmState {
        let clock = FarmClock::new(&TimeConfig::default()).unwrap();
        FarmState::new(5, SoilType::Sandy, Location::Rajasthan, credits, clock)
    }

    fn applied(outcome: ActionOutcome) -> ActionReport {
        let report = match outcome {
            ActionOutcome::Applied(report) => Some(report),
            ActionOutcome::Rejected(_) => None,
        };
        report.unwrap()
    }

    const ORIGIN: Position = Position::new(0, 0);

    #[test]
    fn plant_requires_free_tile() {
        let mut fx = Fixture::new();
        let mut state = farm(1000);
        let plant = PlayerAction::Plant {
            position: ORIGIN,
            crop: CropType::Bajra,
        };
        assert!(fx.apply(&mut state, plant).is_applied());
        let tile = state.tile(ORIGIN).unwrap();
        assert_eq!(tile.crop(), Some(CropType::Bajra));
        assert_eq!(tile.crop_stage, 1.0);
        assert_eq!(fx.apply(&mut state, plant), ActionOutcome::Rejected(RejectionReason::TileOccupied(ORIGIN)));

        let off_grid = PlayerAction::Plant {
            position: Position::new(7, 0),
            crop: CropType::Ragi,
        };
        assert_eq!(
            fx.apply(&mut state, off_grid),
            ActionOutcome::Rejected(RejectionReason::OutOfBounds(Position::new(7, 0)))
        );
    }

    #[test]
    fn water_and_fertilize_fire_triggers_and_cap() {
        let mut fx = Fixture::new();
        let mut state = farm(1000);
        state.tile_mut(ORIGIN).unwrap().moisture = 90.0;
        let report = applied(fx.apply(&mut state, PlayerAction::Water { position: ORIGIN }));
        assert_eq!(report.triggers, vec![ObjectiveTrigger::Irrigation]);
        assert_eq!(state.tile(ORIGIN).unwrap().moisture, 100.0);

        let report = applied(fx.apply(&mut state, PlayerAction::Fertilize { position: ORIGIN }));
        assert_eq!(report.triggers, vec![ObjectiveTrigger::Fertilization]);
        assert_eq!(state.tile(ORIGIN).unwrap().nutrients, 80.0);
    }

    #[test]
    fn harvest_needs_mature_crop_and_clears_tile() {
        let mut fx = Fixture::new();
        let mut state = farm(1000);
        fx.apply(
            &mut state,
            PlayerAction::Plant {
                position: ORIGIN,
                crop: CropType::Bajra,
            },
        );
        assert_eq!(
            fx.apply(&mut state, PlayerAction::Harvest { position: ORIGIN }),
            ActionOutcome::Rejected(RejectionReason::CropNotReady(ORIGIN))
        );
        state.tile_mut(ORIGIN).unwrap().crop_stage = 4.0;
        let report = applied(fx.apply(&mut state, PlayerAction::Harvest { position: ORIGIN }));
        // Bajra on sandy soil at full health: 2.0 kg * 100 * 10 + 50 + 30.
        assert_eq!(report.points_earned, 2080);
        assert_eq!(state.bharat_points, 2080);
        let tile = state.tile(ORIGIN).unwrap();
        assert!(tile.is_empty());
        assert_eq!(tile.crop_stage, 0.0);
    }

    #[test]
    fn bulk_actions_need_crops_and_build_to_farm_balance() {
        let mut fx = Fixture::new();
        let mut state = farm(1000);
        assert_eq!(
            fx.apply(&mut state, PlayerAction::IrrigateAll),
            ActionOutcome::Rejected(RejectionReason::NothingToDo)
        );
        for x in 0..2 {
            fx.apply(
                &mut state,
                PlayerAction::Plant {
                    position: Position::new(x, 0),
                    crop: CropType::Bajra,
                },
            );
        }
        assert_eq!(
            fx.apply(&mut state, PlayerAction::HarvestAll),
            ActionOutcome::Rejected(RejectionReason::NothingToDo)
        );

        let irrigate = applied(fx.apply(&mut state, PlayerAction::IrrigateAll));
        assert_eq!(irrigate.triggers, vec![ObjectiveTrigger::Irrigation]);
        assert_eq!(state.tile(ORIGIN).unwrap().moisture, 70.0);

        let fertilize = applied(fx.apply(&mut state, PlayerAction::FertilizeAll));
        assert_eq!(fertilize.triggers, vec![ObjectiveTrigger::Fertilization]);

        for tile in state.tiles_mut() {
            if tile.crop().is_some() {
                tile.crop_stage = 4.0;
            }
        }
        let harvest = applied(fx.apply(&mut state, PlayerAction::HarvestAll));
        assert_eq!(
            harvest.triggers,
            vec![ObjectiveTrigger::BulkActions, ObjectiveTrigger::FarmBalance]
        );
        assert!(harvest.points_earned > 0);
        assert_eq!(state.planted_count(), 0);
        assert!(state.bulk_usage.all());
    }

    #[test]
    fn healthy_crop_needs_no_treatment() {
        let mut fx = Fixture::new();
        let mut state = farm(1000);
        fx.apply(
            &mut state,
            PlayerAction::Plant {
                position: ORIGIN,
                crop: CropType::Ragi,
            },
        );
        assert_eq!(
            fx.apply(&mut state, PlayerAction::TreatPest { position: ORIGIN }),
            ActionOutcome::Rejected(RejectionReason::NoTreatmentNeeded(ORIGIN))
        );
        assert_eq!(
            fx.apply(
                &mut state,
                PlayerAction::TreatPest {
                    position: Position::new(1, 1)
                }
            ),
            ActionOutcome::Rejected(RejectionReason::NoCrop(Position::new(1, 1)))
        );
    }

    #[test]
    fn sick_crop_gets_treated_eventually() {
        let mut fx = Fixture::new();
        let mut state = farm(100_000);
        state.weather.condition = WeatherCondition::Cloudy;
        fx.apply(
            &mut state,
            PlayerAction::Plant {
                position: ORIGIN,
                crop: CropType::Ragi,
            },
        );
        let mut treated = None;
        for _ in 0..200 {
            state.tile_mut(ORIGIN).unwrap().health = 0.0;
            if let ActionOutcome::Applied(report) = fx.apply(&mut state, PlayerAction::TreatPest { position: ORIGIN }) {
                treated = Some(report);
                break;
            }
        }
        let report = treated.unwrap();
        // Cloudy, moisture 50: only stem borer can fire.
        assert_eq!(report.credits_spent, 90);
        assert_eq!(report.triggers, vec![ObjectiveTrigger::PestControl]);
        assert_eq!(state.credits, 100_000 - 90);
        assert_eq!(state.tile(ORIGIN).unwrap().health, 25.0);
    }

    #[test]
    fn emergency_care_costs_150() {
        let mut fx = Fixture::new();
        let mut state = farm(149);
        fx.apply(
            &mut state,
            PlayerAction::Plant {
                position: ORIGIN,
                crop: CropType::Wheat,
            },
        );
        assert_eq!(
            fx.apply(&mut state, PlayerAction::EmergencyCare { position: ORIGIN }),
            ActionOutcome::Rejected(RejectionReason::InsufficientCredits {
                needed: 150,
                available: 149
            })
        );
        state.credits = 200;
        state.tile_mut(ORIGIN).unwrap().health = 30.0;
        let report = applied(fx.apply(&mut state, PlayerAction::EmergencyCare { position: ORIGIN }));
        assert_eq!(report.credits_spent, 150);
        assert_eq!(state.credits, 50);
        let tile = state.tile(ORIGIN).unwrap();
        assert_eq!(tile.health, 70.0);
        assert_eq!(tile.moisture, 80.0);
        assert_eq!(tile.nutrients, 75.0);
    }

    #[test]
    fn buying_livestock_checks_credits_and_tile() {
        let mut fx = Fixture::new();
        let data = ReferenceData::builtin();
        let cow_cost = data.livestock(Species::Cow).unwrap().cost;
        let mut state = farm(cow_cost);

        fx.apply(
            &mut state,
            PlayerAction::Plant {
                position: ORIGIN,
                crop: CropType::Ragi,
            },
        );
        let onto_crop = PlayerAction::BuyLivestock {
            species: Species::Cow,
            position: Some(ORIGIN),
        };
        assert_eq!(fx.apply(&mut state, onto_crop), ActionOutcome::Rejected(RejectionReason::TileOccupied(ORIGIN)));

        let placed = PlayerAction::BuyLivestock {
            species: Species::Cow,
            position: Some(Position::new(2, 2)),
        };
        let report = applied(fx.apply(&mut state, placed));
        assert_eq!(report.credits_spent, cow_cost);
        assert_eq!(state.credits, 0);
        assert_eq!(state.livestock_count(), 1);
        assert_eq!(state.tile(Position::new(2, 2)).unwrap().livestock(), Some(Species::Cow));
        let cow = state.livestock.first().unwrap();
        assert_eq!(cow.health, 100.0);
        assert_eq!(cow.hunger, 0.0);
        assert_eq!(cow.age, 0);

        let broke = PlayerAction::BuyLivestock {
            species: Species::Chicken,
            position: None,
        };
        assert!(matches!(
            fx.apply(&mut state, broke),
            ActionOutcome::Rejected(RejectionReason::InsufficientCredits { available: 0, .. })
        ));
    }

    #[test]
    fn unplaced_purchase_takes_the_first_free_tile() {
        let mut fx = Fixture::new();
        let mut state = farm(100_000);
        let plant = PlayerAction::Plant {
            position: ORIGIN,
            crop: CropType::Bajra,
        };
        assert!(fx.apply(&mut state, plant).is_applied());

        let goat = PlayerAction::BuyLivestock {
            species: Species::Goat,
            position: None,
        };
        assert!(fx.apply(&mut state, goat).is_applied());
        let next = Position::new(1, 0);
        assert_eq!(state.livestock.first().unwrap().position, Some(next));
        assert_eq!(state.tile(next).unwrap().livestock(), Some(Species::Goat));
    }

    #[test]
    fn full_farm_refuses_unplaced_purchase() {
        let mut fx = Fixture::new();
        let mut state = farm(100_000);
        for tile in state.tiles_mut() {
            tile.occupant = Occupant::Crop(CropType::Ragi);
            tile.crop_stage = 1.0;
        }
        let credits = state.credits;
        let hen = PlayerAction::BuyLivestock {
            species: Species::Chicken,
            position: None,
        };
        assert_eq!(
            fx.apply(&mut state, hen),
            ActionOutcome::Rejected(RejectionReason::NoFreeTile)
        );
        assert_eq!(state.credits, credits);
        assert_eq!(state.livestock_count(), 0);
    }

    #[test]
    fn care_actions_fill_the_log() {
        let mut fx = Fixture::new();
        let mut state = farm(100_000);
        fx.apply(
            &mut state,
            PlayerAction::BuyLivestock {
                species: Species::Goat,
                position: None,
            },
        );
        let id = state.livestock.first().unwrap().id;
        state.animal_mut(id).unwrap().hunger = 40.0;

        assert!(fx.apply(&mut state, PlayerAction::FeedLivestock { id }).is_applied());
        assert_eq!(state.animal(id).unwrap().hunger, 10.0);
        assert!(fx.apply(&mut state, PlayerAction::WaterLivestock { id }).is_applied());
        let care = state.care_log.record(id);
        assert!(care.fed && care.watered);

        let stranger = LivestockId::new();
        assert_eq!(
            fx.apply(&mut state, PlayerAction::FeedLivestock { id: stranger }),
            ActionOutcome::Rejected(RejectionReason::UnknownLivestock(stranger))
        );
    }

    #[test]
    fn collecting_milk_earns_points() {
        let mut fx = Fixture::new();
        let mut state = farm(100_000);
        fx.apply(
            &mut state,
            PlayerAction::BuyLivestock {
                species: Species::Cow,
                position: None,
            },
        );
        let id = state.livestock.first().unwrap().id;
        let report = applied(fx.apply(&mut state, PlayerAction::CollectProduce { id }));
        // 12 liters at full health, 0.5 points per unit of quality.
        assert_eq!(report.points_earned, 600);
        assert_eq!(state.bharat_points, 600);
    }
}
