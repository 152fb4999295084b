//! Core entity structs for the Farm Navigator simulation.
//!
//! Covers the grid [`Tile`] and its [`Occupant`], the [`LivestockUnit`]
//! roster entry, and the daily [`WeatherSample`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CropType, SoilType, Species, WeatherCondition};
use crate::ids::LivestockId;

/// Upper bound shared by moisture, nutrients, health and hunger.
pub const PERCENT_MAX: f64 = 100.0;

/// Final growth stage. A crop at this stage is harvestable.
pub const MATURE_STAGE: f64 = 4.0;

/// Clamp a gauge value to `[0, 100]`. `NaN` collapses to zero.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, PERCENT_MAX)
}

/// Clamp a crop stage to `[0, 4]`. `NaN` collapses to zero.
pub fn clamp_stage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MATURE_STAGE)
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Integer grid coordinates. Unique per tile within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What a tile holds. A tile carries at most one crop or one animal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Occupant {
    /// Nothing planted or placed.
    #[default]
    Empty,
    /// A planted crop.
    Crop(CropType),
    /// A placed livestock unit of this species.
    Livestock(Species),
}

/// One cell of the farm grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tile {
    /// Grid coordinates.
    pub position: Position,
    /// Soil family, copied from the farm-wide setting at grid creation.
    pub soil_type: SoilType,
    /// Crop or livestock on this tile.
    pub occupant: Occupant,
    /// Growth stage in `[0, 4]`. Zero when no crop is planted.
    pub crop_stage: f64,
    /// Soil moisture, `[0, 100]`.
    pub moisture: f64,
    /// Available nutrients, `[0, 100]`.
    pub nutrients: f64,
    /// Crop health, `[0, 100]`.
    pub health: f64,
}

impl Tile {
    /// Starting moisture of a fresh tile.
    pub const INITIAL_MOISTURE: f64 = 50.0;
    /// Starting nutrients of a fresh tile.
    pub const INITIAL_NUTRIENTS: f64 = 50.0;

    /// A fresh, empty tile.
    pub const fn new(position: Position, soil_type: SoilType) -> Self {
        Self {
            position,
            soil_type,
            occupant: Occupant::Empty,
            crop_stage: 0.0,
            moisture: Self::INITIAL_MOISTURE,
            nutrients: Self::INITIAL_NUTRIENTS,
            health: PERCENT_MAX,
        }
    }

    /// The planted crop, if any.
    pub const fn crop(&self) -> Option<CropType> {
        match self.occupant {
            Occupant::Crop(crop) => Some(crop),
            Occupant::Empty | Occupant::Livestock(_) => None,
        }
    }

    /// The species of the animal placed here, if any.
    pub const fn livestock(&self) -> Option<Species> {
        match self.occupant {
            Occupant::Livestock(species) => Some(species),
            Occupant::Empty | Occupant::Crop(_) => None,
        }
    }

    /// Whether neither a crop nor an animal occupies the tile.
    pub const fn is_empty(&self) -> bool {
        matches!(self.occupant, Occupant::Empty)
    }

    /// Whether a crop is planted and fully mature.
    pub fn is_harvestable(&self) -> bool {
        self.crop().is_some() && self.crop_stage >= MATURE_STAGE
    }

    /// Re-clamp every gauge to its legal range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.crop_stage = clamp_stage(self.crop_stage);
        self.moisture = clamp_percent(self.moisture);
        self.nutrients = clamp_percent(self.nutrients);
        self.health = clamp_percent(self.health);
        self
    }

    /// Remove the crop after harvest. Gauges are left as they are.
    pub const fn clear_crop(&mut self) {
        if matches!(self.occupant, Occupant::Crop(_)) {
            self.occupant = Occupant::Empty;
        }
        self.crop_stage = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Livestock
// ---------------------------------------------------------------------------

/// One animal in the farm roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LivestockUnit {
    /// Unique identity, generated at purchase.
    pub id: LivestockId,
    /// Species.
    pub species: Species,
    /// Health, `[0, 100]`.
    pub health: f64,
    /// Hunger, `[0, 100]`. Higher is hungrier.
    pub hunger: f64,
    /// Days since purchase.
    pub age: u32,
    /// Current daily product amount.
    pub productivity: f64,
    /// Tile the animal stands on, if placed.
    pub position: Option<Position>,
}

impl LivestockUnit {
    /// A freshly purchased animal: full health, not hungry, age zero.
    pub fn new(species: Species, base_productivity: f64, position: Option<Position>) -> Self {
        Self {
            id: LivestockId::new(),
            species,
            health: PERCENT_MAX,
            hunger: 0.0,
            age: 0,
            productivity: base_productivity,
            position,
        }
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// One day of weather.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeatherSample {
    /// Classification.
    pub condition: WeatherCondition,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Precipitation in millimetres.
    pub precipitation: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
}

impl Default for WeatherSample {
    /// Neutral fallback used when a location has no climate profile.
    fn default() -> Self {
        Self {
            condition: WeatherCondition::Sunny,
            temperature: 25.0,
            precipitation: 10.0,
            humidity: 50.0,
            wind_speed: 10.0,
        }
    }
}
