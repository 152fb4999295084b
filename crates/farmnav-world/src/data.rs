//! Static reference tables for crops, soils, regions and livestock.
//!
//! [`ReferenceData`] is loaded once at session start, either from the
//! built-in tables ([`ReferenceData::builtin`]) or from a YAML override file
//! ([`ReferenceData::from_file`]), and is never mutated afterwards. Engines
//! receive it behind an `Arc`.
//!
//! An override file only needs the tables it changes. Any table it omits
//! keeps its built-in contents:
//!
//! ```yaml
//! crops:
//!   ragi:
//!     name: "Ragi (Finger Millet)"
//!     germination_days: 7
//!     harvest_days: 120
//!     ideal_soils: [sandy, loamy]
//!     water_need: 15.0
//!     temperature: { min: 25.0, max: 35.0 }
//!     base_yield_kg: 2.5
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use farmnav_types::{Companion, CropType, Location, ProductKind, SoilType, Species};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Bounds {
    /// Create an interval.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the interval, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn check(&self, context: impl FnOnce() -> String) -> Result<(), WorldError> {
        if self.min > self.max {
            return Err(WorldError::InvalidRange {
                context: context(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Growth properties of one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Display name.
    pub name: String,
    /// Days spent in germination.
    pub germination_days: u32,
    /// Days from sowing to harvest.
    pub harvest_days: u32,
    /// Soil families the crop thrives in.
    pub ideal_soils: Vec<SoilType>,
    /// Base moisture need, as a percentage of tile moisture.
    pub water_need: f64,
    /// Tolerated temperature range in degrees Celsius.
    pub temperature: Bounds,
    /// Harvest quantity per tile in kg under ideal conditions.
    pub base_yield_kg: f64,
}

impl CropProfile {
    /// Whether `soil` is one of this crop's ideal soils.
    pub fn suits(&self, soil: SoilType) -> bool {
        self.ideal_soils.contains(&soil)
    }
}

/// Physical and chemical properties of a soil family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    /// Display name.
    pub name: String,
    /// Water retention in percent.
    pub water_retention: f64,
    /// Drainage rating in percent.
    pub drainage: f64,
    /// Fertility rating in percent.
    pub fertility: f64,
    /// Baseline pH.
    pub ph: f64,
    /// Short description.
    pub description: String,
}

/// What a crop needs from the soil to reach full yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilRequirement {
    /// Acceptable soil families.
    pub ideal_soils: Vec<SoilType>,
    /// Minimum water retention in percent.
    pub min_water_retention: f64,
    /// Acceptable pH range.
    pub ph: Bounds,
}

/// Climate profile used by the weather generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    /// Display name.
    pub name: String,
    /// Average temperature range in degrees Celsius.
    pub temperature: Bounds,
    /// Average annual precipitation range in millimetres.
    pub precipitation: Bounds,
    /// Months (1 to 12) that fall in the monsoon.
    pub monsoon_months: Vec<u32>,
    /// Short description.
    pub description: String,
}

/// Soil preferences and input multipliers of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSoilProfile {
    /// Display name.
    pub name: String,
    /// Soil families that suit the region.
    pub ideal_soils: Vec<SoilType>,
    /// Relative water availability. Below 1 is arid.
    pub moisture_multiplier: f64,
    /// Relative fertilizer demand. Above 1 means poorer soils.
    pub fertilization_multiplier: f64,
    /// Short description.
    pub description: String,
}

/// Reproduction metadata. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreedingProfile {
    /// Minimum age in days before breeding.
    pub breeding_age_days: u32,
    /// Gestation or incubation in days.
    pub gestation_days: u32,
    /// Value of one offspring in credits.
    pub offspring_value: u64,
}

/// Advisory feeding plan for a species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPlan {
    /// Daily feed items.
    pub feed: Vec<String>,
    /// Supplements.
    pub supplements: Vec<String>,
    /// Feeding schedule.
    pub schedule: String,
}

/// Husbandry properties of a livestock species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestockProfile {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Daily feed in kg.
    pub daily_feed_kg: f64,
    /// Daily water in liters.
    pub water_need_liters: f64,
    /// Tiles of space required.
    pub space_required: u32,
    /// What the animal produces.
    pub product: ProductKind,
    /// Base daily product amount at full health.
    pub product_amount: f64,
    /// Unit label for the product amount.
    pub product_unit: String,
    /// Comfortable temperature range in degrees Celsius.
    pub ideal_temperature: Bounds,
    /// Expected lifespan in days.
    pub lifespan_days: u32,
    /// Purchase price in credits.
    pub cost: u64,
    /// Breeding metadata.
    pub breeding: BreedingProfile,
    /// Recommended feeding plan.
    pub feed_plan: FeedPlan,
}

/// A recognised intercropping combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntercropPair {
    /// Main crop.
    pub crop: CropType,
    /// Companion grown alongside.
    pub companion: Companion,
    /// Yield bonus in percent.
    pub yield_bonus_pct: f64,
    /// Agronomic benefits.
    pub benefits: Vec<String>,
}

// ---------------------------------------------------------------------------
// ReferenceData
// ---------------------------------------------------------------------------

/// Every static lookup table consumed by the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// Crop growth profiles.
    pub crops: BTreeMap<CropType, CropProfile>,
    /// Soil properties.
    pub soils: BTreeMap<SoilType, SoilProfile>,
    /// Per-crop soil requirements. A crop without an entry is treated as
    /// compatible with every soil.
    pub soil_requirements: BTreeMap<CropType, SoilRequirement>,
    /// Climate profiles. A location without an entry gets neutral weather.
    pub climates: BTreeMap<Location, ClimateProfile>,
    /// Region soil profiles.
    pub regions: BTreeMap<Location, RegionSoilProfile>,
    /// Livestock profiles.
    pub livestock: BTreeMap<Species, LivestockProfile>,
    /// Recognised intercropping pairs.
    pub intercropping: Vec<IntercropPair>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    /// Parse a YAML override document. Omitted tables keep built-in data.
    pub fn from_yaml(contents: &str) -> Result<Self, WorldError> {
        let data: Self = serde_yml::from_str(contents)?;
        data.validate()?;
        Ok(data)
    }

    /// Load a YAML override file from disk.
    pub fn from_file(path: &Path) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let data = Self::from_yaml(&contents)?;
        tracing::info!(
            path = %path.display(),
            crops = data.crops.len(),
            soils = data.soils.len(),
            species = data.livestock.len(),
            "Loaded reference data override"
        );
        Ok(data)
    }

    /// Check that every crop, soil and species has a profile and that
    /// every range is well formed.
    pub fn validate(&self) -> Result<(), WorldError> {
        for crop in CropType::ALL {
            let profile = self.crops.get(crop).ok_or(WorldError::MissingCrop(*crop))?;
            profile.temperature.check(|| format!("crop {crop} temperature"))?;
        }
        for soil in SoilType::ALL {
            if !self.soils.contains_key(soil) {
                return Err(WorldError::MissingSoil(*soil));
            }
        }
        for species in Species::ALL {
            let profile = self
                .livestock
                .get(species)
                .ok_or(WorldError::MissingSpecies(*species))?;
            profile
                .ideal_temperature
                .check(|| format!("species {species} ideal temperature"))?;
        }
        for (crop, requirement) in &self.soil_requirements {
            requirement.ph.check(|| format!("crop {crop} pH"))?;
        }
        for (location, climate) in &self.climates {
            climate
                .temperature
                .check(|| format!("location {location} temperature"))?;
        }
        Ok(())
    }

    /// Growth profile of a crop.
    pub fn crop(&self, crop: CropType) -> Option<&CropProfile> {
        self.crops.get(&crop)
    }

    /// Properties of a soil family.
    pub fn soil(&self, soil: SoilType) -> Option<&SoilProfile> {
        self.soils.get(&soil)
    }

    /// Soil requirement of a crop.
    pub fn soil_requirement(&self, crop: CropType) -> Option<&SoilRequirement> {
        self.soil_requirements.get(&crop)
    }

    /// Climate profile of a location.
    pub fn climate(&self, location: Location) -> Option<&ClimateProfile> {
        self.climates.get(&location)
    }

    /// Soil profile of a region.
    pub fn region(&self, location: Location) -> Option<&RegionSoilProfile> {
        self.regions.get(&location)
    }

    /// Husbandry profile of a species.
    pub fn livestock(&self, species: Species) -> Option<&LivestockProfile> {
        self.livestock.get(&species)
    }

    /// Intercropping entry for a crop and companion, if recognised.
    pub fn intercrop(&self, crop: CropType, companion: Companion) -> Option<&IntercropPair> {
        self.intercropping
            .iter()
            .find(|pair| pair.crop == crop && pair.companion == companion)
    }

    /// The built-in tables.
    pub fn builtin() -> Self {
        Self {
            crops: builtin_crops(),
            soils: builtin_soils(),
            soil_requirements: builtin_soil_requirements(),
            climates: builtin_climates(),
            regions: builtin_regions(),
            livestock: builtin_livestock(),
            intercropping: builtin_intercropping(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn crop(
    name: &str,
    germination_days: u32,
    harvest_days: u32,
    ideal_soils: &[SoilType],
    water_need: f64,
    temperature: (f64, f64),
    base_yield_kg: f64,
) -> CropProfile {
    CropProfile {
        name: name.to_owned(),
        germination_days,
        harvest_days,
        ideal_soils: ideal_soils.to_vec(),
        water_need,
        temperature: Bounds::new(temperature.0, temperature.1),
        base_yield_kg,
    }
}

fn builtin_crops() -> BTreeMap<CropType, CropProfile> {
    use SoilType::{Alluvial, Laterite, Loamy, Sandy};
    BTreeMap::from([
        (CropType::Ragi, crop("Ragi (Finger Millet)", 7, 120, &[Sandy, Loamy], 15.0, (25.0, 35.0), 2.5)),
        (CropType::Rice, crop("Rice (Paddy)", 10, 135, &[Alluvial], 40.0, (20.0, 30.0), 4.0)),
        (CropType::Wheat, crop("Wheat", 7, 120, &[Alluvial, Loamy], 25.0, (15.0, 25.0), 3.5)),
        (CropType::Coffee, crop("Coffee", 14, 240, &[Laterite], 35.0, (18.0, 28.0), 1.5)),
        (CropType::Apple, crop("Apple", 21, 180, &[Loamy], 20.0, (5.0, 25.0), 5.0)),
        (CropType::Bajra, crop("Bajra (Pearl Millet)", 5, 90, &[Sandy], 12.0, (25.0, 40.0), 2.0)),
    ])
}

fn soil(name: &str, water_retention: f64, drainage: f64, fertility: f64, ph: f64, description: &str) -> SoilProfile {
    SoilProfile {
        name: name.to_owned(),
        water_retention,
        drainage,
        fertility,
        ph,
        description: description.to_owned(),
    }
}

fn builtin_soils() -> BTreeMap<SoilType, SoilProfile> {
    BTreeMap::from([
        (
            SoilType::Sandy,
            soil("Sandy Soil", 12.5, 90.0, 40.0, 5.2, "Low water retention, drains fast, ideal for millets"),
        ),
        (
            SoilType::Alluvial,
            soil("Alluvial Soil", 30.0, 60.0, 85.0, 6.8, "High retention and fertile, perfect for rice and wheat"),
        ),
        (
            SoilType::Loamy,
            soil("Loamy Soil", 25.0, 70.0, 80.0, 6.5, "Balanced nutrients, suits fruits and livestock"),
        ),
        (
            SoilType::Laterite,
            soil("Laterite Soil", 18.0, 75.0, 50.0, 5.5, "Acidic and well drained, good for coffee"),
        ),
        (
            SoilType::Clay,
            soil("Clay Soil", 45.0, 30.0, 70.0, 7.2, "High water retention with poor drainage, needs careful management"),
        ),
        (
            SoilType::Black,
            soil("Black Soil", 35.0, 50.0, 90.0, 7.5, "Rich in nutrients, excellent for cotton and sugarcane"),
        ),
        (
            SoilType::Red,
            soil("Red Soil", 20.0, 80.0, 60.0, 6.0, "Iron-rich with good drainage, suitable for groundnuts and pulses"),
        ),
    ])
}

fn requirement(ideal_soils: &[SoilType], min_water_retention: f64, ph: (f64, f64)) -> SoilRequirement {
    SoilRequirement {
        ideal_soils: ideal_soils.to_vec(),
        min_water_retention,
        ph: Bounds::new(ph.0, ph.1),
    }
}

fn builtin_soil_requirements() -> BTreeMap<CropType, SoilRequirement> {
    use SoilType::{Alluvial, Laterite, Loamy, Sandy};
    BTreeMap::from([
        (CropType::Ragi, requirement(&[Sandy, Loamy], 10.0, (5.5, 7.0))),
        (CropType::Bajra, requirement(&[Sandy], 8.0, (6.0, 7.5))),
        (CropType::Rice, requirement(&[Alluvial], 25.0, (6.0, 7.5))),
        (CropType::Wheat, requirement(&[Alluvial, Loamy], 20.0, (6.0, 7.0))),
        (CropType::Coffee, requirement(&[Laterite], 15.0, (5.0, 6.5))),
        (CropType::Apple, requirement(&[Loamy], 20.0, (6.0, 7.0))),
    ])
}

fn climate(
    name: &str,
    temperature: (f64, f64),
    precipitation: (f64, f64),
    monsoon_months: &[u32],
    description: &str,
) -> ClimateProfile {
    ClimateProfile {
        name: name.to_owned(),
        temperature: Bounds::new(temperature.0, temperature.1),
        precipitation: Bounds::new(precipitation.0, precipitation.1),
        monsoon_months: monsoon_months.to_vec(),
        description: description.to_owned(),
    }
}

fn builtin_climates() -> BTreeMap<Location, ClimateProfile> {
    BTreeMap::from([
        (
            Location::Rajasthan,
            climate(
                "Rajasthan (Jodhpur)",
                (25.0, 45.0),
                (0.0, 200.0),
                &[7, 8, 9],
                "Arid desert climate with extreme heat and minimal rainfall",
            ),
        ),
        (
            Location::Punjab,
            climate(
                "Punjab (Doabs)",
                (15.0, 35.0),
                (600.0, 1200.0),
                &[6, 7, 8, 9],
                "Monsoon-influenced with hot summers and moderate winters",
            ),
        ),
        (
            Location::Bihar,
            climate(
                "Bihar (Gangetic Plains)",
                (15.0, 35.0),
                (800.0, 1200.0),
                &[6, 7, 8, 9],
                "Temperate with distinct monsoon season",
            ),
        ),
        (
            Location::Karnataka,
            climate(
                "Karnataka (Coorg)",
                (18.0, 32.0),
                (1500.0, 3000.0),
                &[6, 7, 8, 9, 10],
                "Humid tropical with heavy monsoon rainfall",
            ),
        ),
        (
            Location::Himachal,
            climate(
                "Himachal Pradesh (Kinnaur)",
                (5.0, 30.0),
                (600.0, 1000.0),
                &[7, 8],
                "Cool mountain climate with winter snow",
            ),
        ),
        (
            Location::TamilNadu,
            climate(
                "Tamil Nadu (Coimbatore)",
                (22.0, 38.0),
                (600.0, 900.0),
                &[10, 11, 12],
                "Tropical wet and dry with hot summers",
            ),
        ),
        (
            Location::Gujarat,
            climate(
                "Gujarat (Saurashtra)",
                (20.0, 42.0),
                (400.0, 800.0),
                &[6, 7, 8, 9],
                "Semi-arid with hot dry summers",
            ),
        ),
        (
            Location::WestBengal,
            climate(
                "West Bengal (Darjeeling)",
                (10.0, 25.0),
                (2000.0, 4000.0),
                &[6, 7, 8, 9],
                "Subtropical highland with heavy monsoon",
            ),
        ),
    ])
}

fn region(
    name: &str,
    ideal_soils: &[SoilType],
    moisture_multiplier: f64,
    fertilization_multiplier: f64,
    description: &str,
) -> RegionSoilProfile {
    RegionSoilProfile {
        name: name.to_owned(),
        ideal_soils: ideal_soils.to_vec(),
        moisture_multiplier,
        fertilization_multiplier,
        description: description.to_owned(),
    }
}

fn builtin_regions() -> BTreeMap<Location, RegionSoilProfile> {
    use SoilType::{Alluvial, Black, Laterite, Loamy, Red, Sandy};
    BTreeMap::from([
        (
            Location::Rajasthan,
            region("Rajasthan", &[Sandy, Loamy], 0.7, 1.2, "Arid desert region, water conservation critical"),
        ),
        (
            Location::Punjab,
            region("Punjab", &[Alluvial, Loamy], 1.3, 0.9, "Fertile plains, excellent for intensive farming"),
        ),
        (
            Location::Bihar,
            region("Bihar", &[Alluvial], 1.2, 0.8, "Gangetic plains with naturally fertile soil"),
        ),
        (
            Location::Karnataka,
            region("Karnataka", &[Laterite, Red], 1.4, 1.1, "Tropical highlands, ideal for coffee and spices"),
        ),
        (
            Location::Himachal,
            region("Himachal Pradesh", &[Loamy], 1.0, 1.0, "Mountain region with cool climate farming"),
        ),
        (
            Location::TamilNadu,
            region("Tamil Nadu", &[Alluvial, Black], 1.1, 0.9, "Tropical region, good for sugarcane and rice"),
        ),
        (
            Location::Gujarat,
            region("Gujarat", &[Black, Alluvial], 0.8, 0.85, "Semi-arid with black soil, perfect for cotton"),
        ),
        (
            Location::WestBengal,
            region("West Bengal", &[Alluvial, Loamy], 1.5, 0.9, "High rainfall region for tea and rice cultivation"),
        ),
    ])
}

fn builtin_livestock() -> BTreeMap<Species, LivestockProfile> {
    BTreeMap::from([
        (
            Species::Cow,
            LivestockProfile {
                name: "Dairy Cow (Gir/Sahiwal)".to_owned(),
                description: "Indigenous Indian breed, heat-tolerant, produces A2 milk".to_owned(),
                daily_feed_kg: 25.0,
                water_need_liters: 60.0,
                space_required: 2,
                product: ProductKind::Milk,
                product_amount: 12.0,
                product_unit: "liters/day".to_owned(),
                ideal_temperature: Bounds::new(15.0, 35.0),
                lifespan_days: 3650,
                cost: 200,
                breeding: BreedingProfile {
                    breeding_age_days: 730,
                    gestation_days: 283,
                    offspring_value: 150,
                },
                feed_plan: FeedPlan {
                    feed: strings(&[
                        "Green fodder: 15-20 kg (Berseem, Lucerne, Maize)",
                        "Dry fodder: 5-7 kg (Wheat/Rice straw)",
                        "Concentrate: 3-4 kg (Cattle feed mix)",
                    ]),
                    supplements: strings(&["Mineral mixture: 50g", "Salt: 30g", "Calcium: 100g for lactating cows"]),
                    schedule: "Feed 3 times daily: Morning (6 AM), Afternoon (2 PM), Evening (6 PM)".to_owned(),
                },
            },
        ),
        (
            Species::Buffalo,
            LivestockProfile {
                name: "Water Buffalo (Murrah)".to_owned(),
                description: "High-fat milk producer, prefers wet conditions".to_owned(),
                daily_feed_kg: 30.0,
                water_need_liters: 80.0,
                space_required: 2,
                product: ProductKind::Milk,
                product_amount: 15.0,
                product_unit: "liters/day".to_owned(),
                ideal_temperature: Bounds::new(10.0, 30.0),
                lifespan_days: 3650,
                cost: 250,
                breeding: BreedingProfile {
                    breeding_age_days: 912,
                    gestation_days: 310,
                    offspring_value: 180,
                },
                feed_plan: FeedPlan {
                    feed: strings(&[
                        "Green fodder: 20-25 kg",
                        "Dry fodder: 6-8 kg",
                        "Concentrate: 4-5 kg",
                        "Water plants (if available)",
                    ]),
                    supplements: strings(&["Mineral mixture: 60g", "Salt: 40g", "Vitamin A & D supplements"]),
                    schedule: "Feed 3 times daily with access to wallowing water".to_owned(),
                },
            },
        ),
        (
            Species::Goat,
            LivestockProfile {
                name: "Goat (Jamunapari/Beetal)".to_owned(),
                description: "Hardy, adaptable, good for small farms".to_owned(),
                daily_feed_kg: 5.0,
                water_need_liters: 8.0,
                space_required: 1,
                product: ProductKind::Milk,
                product_amount: 2.0,
                product_unit: "liters/day".to_owned(),
                ideal_temperature: Bounds::new(15.0, 40.0),
                lifespan_days: 2190,
                cost: 100,
                breeding: BreedingProfile {
                    breeding_age_days: 273,
                    gestation_days: 150,
                    offspring_value: 80,
                },
                feed_plan: FeedPlan {
                    feed: strings(&["Green fodder: 3-4 kg", "Dry fodder: 1 kg", "Concentrate: 200-300g", "Browse leaves"]),
                    supplements: strings(&["Mineral mixture: 10g", "Salt: 5g"]),
                    schedule: "Feed 2 times daily: Morning and Evening, allow grazing".to_owned(),
                },
            },
        ),
        (
            Species::Chicken,
            LivestockProfile {
                name: "Desi Chicken (Kadaknath)".to_owned(),
                description: "Free-range, disease-resistant, nutritious eggs".to_owned(),
                daily_feed_kg: 0.12,
                water_need_liters: 0.25,
                space_required: 1,
                product: ProductKind::Eggs,
                product_amount: 5.0,
                product_unit: "eggs/week".to_owned(),
                ideal_temperature: Bounds::new(18.0, 35.0),
                lifespan_days: 730,
                cost: 50,
                breeding: BreedingProfile {
                    breeding_age_days: 150,
                    gestation_days: 21,
                    offspring_value: 30,
                },
                feed_plan: FeedPlan {
                    feed: strings(&[
                        "Layer feed: 100-120g per bird",
                        "Grains: Maize, Bajra, Wheat",
                        "Kitchen scraps (vegetables)",
                    ]),
                    supplements: strings(&["Grit for digestion", "Calcium (crushed shells)", "Green vegetables"]),
                    schedule: "Feed 2-3 times daily, constant access to water".to_owned(),
                },
            },
        ),
    ])
}

fn builtin_intercropping() -> Vec<IntercropPair> {
    vec![
        IntercropPair {
            crop: CropType::Ragi,
            companion: Companion::Legume,
            yield_bonus_pct: 15.0,
            benefits: strings(&["Nitrogen fixation improves soil", "Reduced pest pressure", "Better land use"]),
        },
        IntercropPair {
            crop: CropType::Wheat,
            companion: Companion::Mustard,
            yield_bonus_pct: 10.0,
            benefits: strings(&["Complementary root systems", "Pest deterrent", "Increased biodiversity"]),
        },
        IntercropPair {
            crop: CropType::Rice,
            companion: Companion::Fish,
            yield_bonus_pct: 20.0,
            benefits: strings(&["Fish control pests", "Fish waste fertilizes rice", "Additional protein source"]),
        },
    ]
}
