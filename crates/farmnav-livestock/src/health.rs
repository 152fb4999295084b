//! Daily condition update for one animal.
//!
//! Applied once per tick, after the day's care has been recorded:
//!
//! 1. Fed: hunger -30 and health +2. Unfed: hunger +15 and health -5.
//! 2. Unwatered: health -8. Watering only prevents the loss.
//! 3. Outside the species' ideal temperature: health -3.
//! 4. Drought hurts every species but goats (-4). Monsoon hurts chickens (-3).
//! 5. Past 80% of lifespan: health -1.
//! 6. Health is clamped, productivity recomputed, age incremented.
//!
//! Every loss is scaled by the mode's penalty multiplier. Gains are not.

use farmnav_types::{
    GameMode, LivestockUnit, Species, WeatherCondition, WeatherSample, clamp_percent,
};
use farmnav_world::{LivestockProfile, ReferenceData};

use crate::config::LivestockConfig;
use crate::error::LivestockError;

/// Care the animal received today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CareRecord {
    /// Fed at least once today.
    pub fed: bool,
    /// Watered at least once today.
    pub watered: bool,
}

/// Daily productivity for a given health.
///
/// Full base rate at or above the threshold, scaled by `health / 100`
/// below it.
pub fn productivity_for(profile: &LivestockProfile, health: f64, config: &LivestockConfig) -> f64 {
    if health < config.productivity_health_threshold {
        profile.product_amount * (health / 100.0)
    } else {
        profile.product_amount
    }
}

/// Apply one day of condition changes to an animal.
pub fn update_livestock_health(
    unit: &LivestockUnit,
    weather: &WeatherSample,
    care: CareRecord,
    mode: GameMode,
    data: &ReferenceData,
    config: &LivestockConfig,
) -> Result<LivestockUnit, LivestockError> {
    let profile = data
        .livestock(unit.species)
        .ok_or(LivestockError::UnknownSpecies(unit.species))?;
    let multiplier = config.penalty_multiplier(mode);

    let mut health = unit.health;
    let mut hunger = unit.hunger;

    if care.fed {
        hunger -= config.feed_hunger_relief;
        health = (health + config.fed_health_gain).min(100.0);
    } else {
        hunger += config.hunger_rise;
        health -= config.unfed_penalty * multiplier;
    }

    if !care.watered {
        health -= config.thirst_penalty * multiplier;
    }

    if !profile.ideal_temperature.contains(weather.temperature) {
        health -= config.temperature_penalty * multiplier;
    }

    match weather.condition {
        WeatherCondition::Drought if unit.species != Species::Goat => {
            health -= config.drought_penalty * multiplier;
        }
        WeatherCondition::Monsoon if unit.species == Species::Chicken => {
            health -= config.monsoon_chicken_penalty * multiplier;
        }
        _ => {}
    }

    if f64::from(unit.age) > f64::from(profile.lifespan_days) * config.old_age_fraction {
        health -= config.old_age_penalty * multiplier;
    }

    let health = clamp_percent(health);
    let next = LivestockUnit {
        health,
        hunger: clamp_percent(hunger),
        age: unit.age.saturating_add(1),
        productivity: productivity_for(profile, health, config),
        ..unit.clone()
    };

    tracing::debug!(
        livestock_id = %unit.id,
        species = %unit.species,
        fed = care.fed,
        watered = care.watered,
        health = next.health,
        hunger = next.hunger,
        "Livestock condition updated"
    );

    Ok(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit(species: Species) -> LivestockUnit {
        let data = ReferenceData::builtin();
        let base = data.livestock(species).unwrap().product_amount;
        LivestockUnit::new(species, base, None)
    }

    fn mild() -> WeatherSample {
        WeatherSample {
            condition: WeatherCondition::Cloudy,
            temperature: 25.0,
            ..WeatherSample::default()
        }
    }

    const FULL_CARE: CareRecord = CareRecord {
        fed: true,
        watered: true,
    };

    #[test]
    fn neglect_costs_health_and_raises_hunger() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let cow = unit(Species::Cow);
        let next = update_livestock_health(&cow, &mild(), CareRecord::default(), GameMode::Sandbox, &data, &config)
            .unwrap();
        // (5 + 8) * 0.4
        assert!((next.health - 94.8).abs() < 1e-9);
        assert_eq!(next.hunger, 15.0);
        assert_eq!(next.age, 1);
        assert_eq!(next.productivity, 12.0);
    }

    #[test]
    fn story_mode_is_gentler() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let cow = unit(Species::Cow);
        let next = update_livestock_health(&cow, &mild(), CareRecord::default(), GameMode::Story, &data, &config)
            .unwrap();
        assert!((next.health - 97.4).abs() < 1e-9);
    }

    #[test]
    fn feeding_relieves_hunger_and_heals() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let mut goat = unit(Species::Goat);
        goat.health = 50.0;
        goat.hunger = 20.0;
        let next = update_livestock_health(&goat, &mild(), FULL_CARE, GameMode::Sandbox, &data, &config).unwrap();
        assert_eq!(next.hunger, 0.0);
        assert_eq!(next.health, 52.0);
        // Below 70 health, productivity scales: 2.0 * 0.52.
        assert!((next.productivity - 1.04).abs() < 1e-9);
    }

    #[test]
    fn neglect_is_monotonic_until_floor() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let mut buffalo = unit(Species::Buffalo);
        let weather = WeatherSample {
            condition: WeatherCondition::Drought,
            temperature: 40.0,
            ..WeatherSample::default()
        };
        for _ in 0..200 {
            let next =
                update_livestock_health(&buffalo, &weather, CareRecord::default(), GameMode::Sandbox, &data, &config)
                    .unwrap();
            assert!(next.health <= buffalo.health);
            assert!(next.hunger >= buffalo.hunger);
            assert!(next.health >= 0.0 && next.hunger <= 100.0);
            buffalo = next;
        }
        assert_eq!(buffalo.health, 0.0);
        assert_eq!(buffalo.hunger, 100.0);
        assert_eq!(buffalo.productivity, 0.0);
    }

    #[test]
    fn weather_penalties_are_species_specific() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let drought = WeatherSample {
            condition: WeatherCondition::Drought,
            temperature: 25.0,
            ..WeatherSample::default()
        };
        let goat = update_livestock_health(&unit(Species::Goat), &drought, FULL_CARE, GameMode::Sandbox, &data, &config)
            .unwrap();
        assert_eq!(goat.health, 100.0);
        let cow = update_livestock_health(&unit(Species::Cow), &drought, FULL_CARE, GameMode::Sandbox, &data, &config)
            .unwrap();
        assert!((cow.health - 98.4).abs() < 1e-9);

        let monsoon = WeatherSample {
            condition: WeatherCondition::Monsoon,
            temperature: 25.0,
            ..WeatherSample::default()
        };
        let chicken =
            update_livestock_health(&unit(Species::Chicken), &monsoon, FULL_CARE, GameMode::Sandbox, &data, &config)
                .unwrap();
        assert!((chicken.health - 98.8).abs() < 1e-9);
    }

    #[test]
    fn old_animals_decline() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let mut hen = unit(Species::Chicken);
        // 80% of 730 is 584.
        hen.age = 585;
        let next = update_livestock_health(&hen, &mild(), FULL_CARE, GameMode::Sandbox, &data, &config).unwrap();
        assert!((next.health - 99.6).abs() < 1e-9);
    }

    #[test]
    fn cold_snap_hurts_chickens() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let cold = WeatherSample {
            condition: WeatherCondition::Sunny,
            temperature: 10.0,
            ..WeatherSample::default()
        };
        let next =
            update_livestock_health(&unit(Species::Chicken), &cold, FULL_CARE, GameMode::Story, &data, &config).unwrap();
        assert!((next.health - 99.4).abs() < 1e-9);
    }
}
