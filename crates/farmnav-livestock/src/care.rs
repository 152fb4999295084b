//! Player care actions and husbandry advisories.

use farmnav_types::{LivestockUnit, clamp_percent};
use farmnav_world::{FeedPlan, ReferenceData};
use serde::{Deserialize, Serialize};

use crate::config::LivestockConfig;
use crate::error::LivestockError;

/// Health above which an animal of breeding age may breed.
const BREEDING_HEALTH: f64 = 70.0;

/// Feed an animal now. Hunger drops immediately; the health benefit is
/// applied by the next daily update.
pub fn apply_feeding(unit: &LivestockUnit, config: &LivestockConfig) -> LivestockUnit {
    LivestockUnit {
        hunger: clamp_percent(unit.hunger - config.feed_hunger_relief),
        ..unit.clone()
    }
}

/// Recommended feeding plan for the animal's species.
pub fn feed_recommendations<'a>(unit: &LivestockUnit, data: &'a ReferenceData) -> Result<&'a FeedPlan, LivestockError> {
    data.livestock(unit.species)
        .map(|profile| &profile.feed_plan)
        .ok_or(LivestockError::UnknownSpecies(unit.species))
}

/// Breeding readiness of an animal. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreedingInfo {
    /// Old and healthy enough to breed.
    pub can_breed: bool,
    /// Minimum breeding age in days.
    pub breeding_age_days: u32,
    /// Gestation or incubation in days.
    pub gestation_days: u32,
    /// Value of one offspring in credits.
    pub offspring_value: u64,
}

/// Report whether an animal could breed.
pub fn breeding_info(unit: &LivestockUnit, data: &ReferenceData) -> Result<BreedingInfo, LivestockError> {
    let profile = data
        .livestock(unit.species)
        .ok_or(LivestockError::UnknownSpecies(unit.species))?;
    let breeding = profile.breeding;
    Ok(BreedingInfo {
        can_breed: unit.age >= breeding.breeding_age_days && unit.health > BREEDING_HEALTH,
        breeding_age_days: breeding.breeding_age_days,
        gestation_days: breeding.gestation_days,
        offspring_value: breeding.offspring_value,
    })
}
