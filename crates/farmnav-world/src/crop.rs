//! Crop growth, harvest yield, and crop advisories.
//!
//! A planted crop moves through four growth stages on a continuous scale:
//! a tile at stage `2.4` is 40% through the vegetative stage. Each tick adds
//!
//! ```text
//! base_increment * temp * water * nutrient * soil * weather
//! ```
//!
//! where every factor is roughly in `[0, 1.2]`. Reaching stage 4 makes the
//! crop harvestable and growth stops.
//!
//! All functions are pure. They return a new [`Tile`] and the caller decides
//! whether to commit it.

use farmnav_types::{
    Companion, CropType, MATURE_STAGE, SoilType, Tile, WeatherCondition, WeatherSample,
};
use serde::{Deserialize, Serialize};

use crate::data::{CropProfile, ReferenceData};

/// Credits charged for emergency care.
pub const EMERGENCY_CARE_COST: u64 = 150;

/// Tunables for the daily growth update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Stage progress per tick under perfect conditions (default: 1.0).
    #[serde(default = "default_base_increment")]
    pub base_increment: f64,

    /// Nutrients consumed per tick by a growing crop (default: 1.0).
    #[serde(default = "default_nutrient_consumption")]
    pub nutrient_consumption: f64,

    /// Temperature factor below which health is lost (default: 0.5).
    #[serde(default = "default_half")]
    pub temperature_threshold: f64,

    /// Health lost to temperature stress per tick (default: 1.0).
    #[serde(default = "default_one")]
    pub temperature_penalty: f64,

    /// Water factor below which health is lost (default: 0.5).
    #[serde(default = "default_half")]
    pub water_threshold: f64,

    /// Health lost to water stress per tick (default: 2.0).
    #[serde(default = "default_water_penalty")]
    pub water_penalty: f64,

    /// Nutrient factor below which health is lost (default: 0.3).
    #[serde(default = "default_nutrient_threshold")]
    pub nutrient_threshold: f64,

    /// Health lost to nutrient stress per tick (default: 1.0).
    #[serde(default = "default_one")]
    pub nutrient_penalty: f64,
}

const fn default_base_increment() -> f64 {
    1.0
}
const fn default_nutrient_consumption() -> f64 {
    1.0
}
const fn default_half() -> f64 {
    0.5
}
const fn default_one() -> f64 {
    1.0
}
const fn default_water_penalty() -> f64 {
    2.0
}
const fn default_nutrient_threshold() -> f64 {
    0.3
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            base_increment: default_base_increment(),
            nutrient_consumption: default_nutrient_consumption(),
            temperature_threshold: default_half(),
            temperature_penalty: default_one(),
            water_threshold: default_half(),
            water_penalty: default_water_penalty(),
            nutrient_threshold: default_nutrient_threshold(),
            nutrient_penalty: default_one(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Descriptor of one growth stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropStage {
    /// Stage index, 0 to 4.
    pub stage: u8,
    /// Stage name.
    pub name: String,
    /// What happens during the stage.
    pub description: String,
    /// Nominal length in days.
    pub days_in_stage: u32,
    /// Target moisture during the stage.
    pub water_need: f64,
    /// Nutrient demand during the stage.
    pub nutrient_need: f64,
}

fn stage(
    stage: u8,
    name: &str,
    description: &str,
    days_in_stage: u32,
    water_need: f64,
    nutrient_need: f64,
) -> CropStage {
    CropStage {
        stage,
        name: name.to_owned(),
        description: description.to_owned(),
        days_in_stage,
        water_need,
        nutrient_need,
    }
}

/// Fraction of the harvest period, floored to whole days.
fn share_of(days: u32, fraction: f64) -> u32 {
    (f64::from(days) * fraction).floor() as u32
}

/// The five stage descriptors of a crop profile.
pub fn stages_for(profile: &CropProfile) -> Vec<CropStage> {
    let water = profile.water_need;
    let harvest = profile.harvest_days;
    vec![
        stage(0, "Empty", "No crop planted", 0, 0.0, 0.0),
        stage(
            1,
            "Germination",
            "Seeds sprouting, establishing roots",
            profile.germination_days,
            water * 1.2,
            20.0,
        ),
        stage(
            2,
            "Vegetative Growth",
            "Rapid leaf and stem development",
            share_of(harvest, 0.3),
            water * 1.5,
            40.0,
        ),
        stage(
            3,
            "Flowering/Fruiting",
            "Reproductive stage, flowers and fruits forming",
            share_of(harvest, 0.3),
            water,
            60.0,
        ),
        stage(
            4,
            "Maturation",
            "Crop ready for harvest",
            share_of(harvest, 0.2),
            water * 0.8,
            30.0,
        ),
    ]
}

/// The five stage descriptors of a crop. Empty if the crop has no profile.
pub fn crop_stages(crop: CropType, data: &ReferenceData) -> Vec<CropStage> {
    data.crop(crop).map(stages_for).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// The five multiplicative growth factors for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthFactors {
    /// Distance from the crop's optimal temperature.
    pub temperature: f64,
    /// Distance from the current stage's water need.
    pub water: f64,
    /// Tile nutrients over 100.
    pub nutrient: f64,
    /// 1.2 on an ideal soil, 0.7 otherwise.
    pub soil: f64,
    /// Weather condition modifier.
    pub weather: f64,
}

impl GrowthFactors {
    /// Product of all five factors.
    pub fn product(&self) -> f64 {
        self.temperature * self.water * self.nutrient * self.soil * self.weather
    }
}

/// Weather condition modifier. Drought is checked before monsoon, so at
/// most one branch applies.
pub fn weather_factor(condition: WeatherCondition, crop: CropType) -> f64 {
    match condition {
        WeatherCondition::Drought => 0.5,
        WeatherCondition::Monsoon if crop != CropType::Rice => 0.8,
        WeatherCondition::Sunny => 1.1,
        WeatherCondition::Monsoon | WeatherCondition::Rainy | WeatherCondition::Cloudy => 1.0,
    }
}

/// Compute the growth factors for a cropped tile.
pub fn growth_factors(
    tile: &Tile,
    crop: CropType,
    profile: &CropProfile,
    weather: &WeatherSample,
    soil: SoilType,
) -> GrowthFactors {
    let stages = stages_for(profile);
    let index = tile.crop_stage.floor().clamp(0.0, MATURE_STAGE) as usize;
    let water_need = stages.get(index).map_or(profile.water_need, |s| s.water_need);

    let temperature = (1.0 - (weather.temperature - profile.temperature.midpoint()).abs() / 20.0).max(0.0);
    let water = (1.0 - (tile.moisture - water_need).abs() / 50.0).max(0.0);
    let nutrient = tile.nutrients / 100.0;
    let soil = if profile.suits(soil) { 1.2 } else { 0.7 };
    let weather = weather_factor(weather.condition, crop);

    GrowthFactors {
        temperature,
        water,
        nutrient,
        soil,
        weather,
    }
}

/// Advance a crop by one day.
///
/// Returns the tile unchanged when no crop is planted, the crop is already
/// mature, or the crop has no profile.
pub fn update_crop_growth(
    tile: &Tile,
    weather: &WeatherSample,
    soil: SoilType,
    data: &ReferenceData,
    config: &GrowthConfig,
) -> Tile {
    let Some(crop) = tile.crop() else {
        return tile.clone();
    };
    if tile.crop_stage >= MATURE_STAGE {
        return tile.clone();
    }
    let Some(profile) = data.crop(crop) else {
        return tile.clone();
    };

    let factors = growth_factors(tile, crop, profile, weather, soil);
    let rate = config.base_increment * factors.product();

    let mut next = tile.clone();
    next.crop_stage += rate;

    if factors.temperature < config.temperature_threshold {
        next.health -= config.temperature_penalty;
    }
    if factors.water < config.water_threshold {
        next.health -= config.water_penalty;
    }
    if factors.nutrient < config.nutrient_threshold {
        next.health -= config.nutrient_penalty;
    }
    next.nutrients -= config.nutrient_consumption;

    tracing::debug!(
        position = %tile.position,
        crop = %crop,
        rate,
        stage = next.crop_stage,
        "Crop growth applied"
    );

    next.clamped()
}

// ---------------------------------------------------------------------------
// Yield
// ---------------------------------------------------------------------------

/// Message returned when a harvest is attempted too early.
pub const NOT_READY_MESSAGE: &str = "Crop not ready for harvest";

/// Outcome of harvesting one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestYield {
    /// Harvested kg, rounded to one decimal.
    pub quantity: f64,
    /// Quality percentage, rounded.
    pub quality: f64,
    /// Reward points earned.
    pub bharat_points: u64,
    /// Summary for the player.
    pub message: String,
}

impl HarvestYield {
    fn not_ready() -> Self {
        Self {
            quantity: 0.0,
            quality: 0.0,
            bharat_points: 0,
            message: NOT_READY_MESSAGE.to_owned(),
        }
    }
}

/// Compute the harvest of a tile.
///
/// Quality starts at 100 and scales with health. A non-ideal soil costs 30%
/// of both quantity and quality; nutrients below 30 cost 10% quantity and
/// 20% quality. Points are `floor(quantity * quality * 10)`, plus 50 on an
/// ideal soil and 30 when health is above 80.
pub fn calculate_yield(tile: &Tile, soil: SoilType, data: &ReferenceData) -> HarvestYield {
    let Some(crop) = tile.crop() else {
        return HarvestYield::not_ready();
    };
    if tile.crop_stage < MATURE_STAGE {
        return HarvestYield::not_ready();
    }
    let Some(profile) = data.crop(crop) else {
        return HarvestYield::not_ready();
    };

    let ideal = profile.suits(soil);
    let mut quantity = profile.base_yield_kg;
    let mut quality = 100.0 * (tile.health / 100.0);

    if !ideal {
        quality *= 0.7;
        quantity *= 0.7;
    }
    if tile.nutrients < 30.0 {
        quality *= 0.8;
        quantity *= 0.9;
    }

    let mut points = (quantity * quality * 10.0).floor().max(0.0) as u64;
    if ideal {
        points = points.saturating_add(50);
    }
    if tile.health > 80.0 {
        points = points.saturating_add(30);
    }

    let message = if quality > 90.0 {
        format!("Excellent harvest! Premium quality {}.", profile.name)
    } else if quality > 70.0 {
        format!("Good harvest of {}.", profile.name)
    } else if quality > 50.0 {
        "Average harvest. Consider improving soil conditions.".to_owned()
    } else {
        "Poor harvest. Review farming practices.".to_owned()
    };

    HarvestYield {
        quantity: (quantity * 10.0).round() / 10.0,
        quality: quality.round(),
        bharat_points: points,
        message,
    }
}

// ---------------------------------------------------------------------------
// Care and advice
// ---------------------------------------------------------------------------

/// Result of [`apply_emergency_care`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyCare {
    /// The treated tile.
    pub tile: Tile,
    /// Credits to charge.
    pub cost: u64,
}

/// Rescue a struggling crop: health +40, moisture +30, nutrients +25.
pub fn apply_emergency_care(tile: &Tile) -> EmergencyCare {
    let mut next = tile.clone();
    next.health += 40.0;
    next.moisture += 30.0;
    next.nutrients += 25.0;
    EmergencyCare {
        tile: next.clamped(),
        cost: EMERGENCY_CARE_COST,
    }
}

/// Crops that suit the soil, tolerate `temperature`, and get enough rain.
pub fn crop_recommendations(
    soil: SoilType,
    temperature: f64,
    precipitation: f64,
    data: &ReferenceData,
) -> Vec<CropType> {
    data.crops
        .iter()
        .filter(|(_, profile)| profile.suits(soil))
        .filter(|(_, profile)| profile.temperature.contains(temperature))
        .filter(|(_, profile)| precipitation >= profile.water_need - 10.0)
        .map(|(crop, _)| *crop)
        .collect()
}

/// Advice for growing a companion alongside a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntercropBenefits {
    /// Whether the pair is a recognised combination.
    pub compatible: bool,
    /// Agronomic benefits.
    pub benefits: Vec<String>,
    /// Yield bonus in percent.
    pub yield_bonus_pct: f64,
}

/// Look up an intercropping pair. Unlisted pairs are incompatible.
pub fn intercropping_benefits(crop: CropType, companion: Companion, data: &ReferenceData) -> IntercropBenefits {
    data.intercrop(crop, companion).map_or_else(
        || IntercropBenefits {
            compatible: false,
            benefits: Vec::new(),
            yield_bonus_pct: 0.0,
        },
        |pair| IntercropBenefits {
            compatible: true,
            benefits: pair.benefits.clone(),
            yield_bonus_pct: pair.yield_bonus_pct,
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::{Occupant, Position};

    use super::*;

    fn planted(crop: CropType, soil: SoilType) -> Tile {
        let mut tile = Tile::new(Position::new(0, 0), soil);
        tile.occupant = Occupant::Crop(crop);
        tile.crop_stage = 1.0;
        tile
    }

    fn weather(condition: WeatherCondition, temperature: f64) -> WeatherSample {
        WeatherSample {
            condition,
            temperature,
            ..WeatherSample::default()
        }
    }

    #[test]
    fn stage_table_follows_harvest_days() {
        let data = ReferenceData::builtin();
        let stages = crop_stages(CropType::Rice, &data);
        assert_eq!(stages.len(), 5);
        let days: Vec<u32> = stages.iter().map(|s| s.days_in_stage).collect();
        assert_eq!(days, vec![0, 10, 40, 40, 27]);
        let water: Vec<f64> = stages.iter().map(|s| s.water_need).collect();
        assert_eq!(water, vec![0.0, 48.0, 60.0, 40.0, 32.0]);
        let nutrients: Vec<f64> = stages.iter().map(|s| s.nutrient_need).collect();
        assert_eq!(nutrients, vec![0.0, 20.0, 40.0, 60.0, 30.0]);
    }

    #[test]
    fn empty_and_mature_tiles_do_not_grow() {
        let data = ReferenceData::builtin();
        let config = GrowthConfig::default();
        let sunny = weather(WeatherCondition::Sunny, 30.0);

        let empty = Tile::new(Position::new(1, 1), SoilType::Sandy);
        assert_eq!(update_crop_growth(&empty, &sunny, SoilType::Sandy, &data, &config), empty);

        let mut mature = planted(CropType::Bajra, SoilType::Sandy);
        mature.crop_stage = 4.0;
        mature.nutrients = 3.0;
        assert_eq!(update_crop_growth(&mature, &sunny, SoilType::Sandy, &data, &config), mature);
    }

    #[test]
    fn bajra_on_sand_grows_every_day() {
        let data = ReferenceData::builtin();
        let config = GrowthConfig::default();
        let mut tile = planted(CropType::Bajra, SoilType::Sandy);
        // Stage 1 water need is 12 * 1.2.
        tile.moisture = 14.4;
        let sunny = weather(WeatherCondition::Sunny, 32.0);

        let next = update_crop_growth(&tile, &sunny, SoilType::Sandy, &data, &config);
        assert!(next.crop_stage > tile.crop_stage);
        assert_eq!(next.nutrients, 49.0);
        assert_eq!(next.health, 100.0);

        let again = update_crop_growth(&next, &sunny, SoilType::Sandy, &data, &config);
        assert!(again.crop_stage > next.crop_stage);
    }

    #[test]
    fn drought_beats_monsoon_branch() {
        assert_eq!(weather_factor(WeatherCondition::Drought, CropType::Wheat), 0.5);
        assert_eq!(weather_factor(WeatherCondition::Drought, CropType::Rice), 0.5);
        assert_eq!(weather_factor(WeatherCondition::Monsoon, CropType::Wheat), 0.8);
        assert_eq!(weather_factor(WeatherCondition::Monsoon, CropType::Rice), 1.0);
        assert_eq!(weather_factor(WeatherCondition::Sunny, CropType::Rice), 1.1);
        assert_eq!(weather_factor(WeatherCondition::Cloudy, CropType::Apple), 1.0);
    }

    #[test]
    fn stress_costs_health() {
        let data = ReferenceData::builtin();
        let config = GrowthConfig::default();
        let mut tile = planted(CropType::Apple, SoilType::Loamy);
        tile.moisture = 100.0;
        tile.nutrients = 10.0;
        // Optimal 15, so 50 degrees gives a zero temperature factor.
        let hot = weather(WeatherCondition::Sunny, 50.0);
        let next = update_crop_growth(&tile, &hot, SoilType::Loamy, &data, &config);
        assert_eq!(next.health, 96.0);
        assert_eq!(next.crop_stage, 1.0);
        assert_eq!(next.nutrients, 9.0);
    }

    #[test]
    fn gauges_stay_in_range_after_growth() {
        let data = ReferenceData::builtin();
        let config = GrowthConfig::default();
        let mut tile = planted(CropType::Coffee, SoilType::Clay);
        tile.health = 1.0;
        tile.nutrients = 0.5;
        tile.crop_stage = 3.99;
        let next = update_crop_growth(&tile, &weather(WeatherCondition::Rainy, 23.0), SoilType::Clay, &data, &config);
        assert!(next.health >= 0.0 && next.health <= 100.0);
        assert!(next.nutrients >= 0.0);
        assert!(next.crop_stage <= 4.0);
    }

    #[test]
    fn immature_crop_yields_nothing() {
        let data = ReferenceData::builtin();
        let mut tile = planted(CropType::Wheat, SoilType::Alluvial);
        tile.crop_stage = 3.9;
        let result = calculate_yield(&tile, SoilType::Alluvial, &data);
        assert_eq!(result.quantity, 0.0);
        assert_eq!(result.quality, 0.0);
        assert_eq!(result.bharat_points, 0);
        assert_eq!(result.message, "Crop not ready for harvest");
    }

    #[test]
    fn ideal_healthy_harvest_earns_both_bonuses() {
        let data = ReferenceData::builtin();
        let mut tile = planted(CropType::Bajra, SoilType::Sandy);
        tile.crop_stage = 4.0;
        let result = calculate_yield(&tile, SoilType::Sandy, &data);
        assert_eq!(result.quality, 100.0);
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.bharat_points, 2000 + 50 + 30);
        assert_eq!(result.message, "Excellent harvest! Premium quality Bajra (Pearl Millet).");
    }

    #[test]
    fn poor_soil_and_depletion_scale_yield() {
        let data = ReferenceData::builtin();
        let mut tile = planted(CropType::Rice, SoilType::Sandy);
        tile.crop_stage = 4.0;
        tile.health = 80.0;
        tile.nutrients = 20.0;
        let result = calculate_yield(&tile, SoilType::Sandy, &data);
        // quantity 4.0 * 0.7 * 0.9 = 2.52, quality 80 * 0.7 * 0.8 = 44.8
        assert_eq!(result.quantity, 2.5);
        assert_eq!(result.quality, 45.0);
        assert_eq!(result.bharat_points, 1128);
        assert_eq!(result.message, "Poor harvest. Review farming practices.");
    }

    #[test]
    fn emergency_care_is_fixed_price() {
        let mut tile = planted(CropType::Ragi, SoilType::Sandy);
        tile.health = 70.0;
        tile.moisture = 50.0;
        tile.nutrients = 80.0;
        let care = apply_emergency_care(&tile);
        assert_eq!(care.cost, 150);
        assert_eq!(care.tile.health, 100.0);
        assert_eq!(care.tile.moisture, 80.0);
        assert_eq!(care.tile.nutrients, 100.0);
    }

    #[test]
    fn recommendations_filter_on_soil_temperature_and_rain() {
        let data = ReferenceData::builtin();
        let picks = crop_recommendations(SoilType::Sandy, 30.0, 20.0, &data);
        assert_eq!(picks, vec![CropType::Ragi, CropType::Bajra]);
        let dry = crop_recommendations(SoilType::Sandy, 30.0, 3.0, &data);
        assert_eq!(dry, vec![CropType::Bajra]);
        assert!(crop_recommendations(SoilType::Clay, 30.0, 100.0, &data).is_empty());
    }

    #[test]
    fn intercropping_pairs() {
        let data = ReferenceData::builtin();
        let fish = intercropping_benefits(CropType::Rice, Companion::Fish, &data);
        assert!(fish.compatible);
        assert_eq!(fish.yield_bonus_pct, 20.0);
        assert_eq!(fish.benefits.len(), 3);
        let none = intercropping_benefits(CropType::Apple, Companion::Legume, &data);
        assert!(!none.compatible);
        assert_eq!(none.yield_bonus_pct, 0.0);
    }
}
