//! Reference data and the crop, soil and weather engines for the Farm
//! Navigator simulation.
//!
//! Everything in this crate operates on the shared model from
//! `farmnav-types`. The engines are pure functions over a tile and the
//! immutable [`ReferenceData`], except for the [`WeatherEngine`], which owns
//! its random source and a bounded history.
//!
//! # Modules
//!
//! - [`data`] -- Immutable reference tables (crops, soils, regions, livestock)
//!   with built-in values and YAML overrides.
//! - [`weather`] -- Seasonal weather generation per location.
//! - [`soil`] -- Soil analysis, crop and region compatibility, amendments.
//! - [`crop`] -- Crop growth stages, daily growth, harvest yield, advisories.
//! - [`pest`] -- Pest and disease incidence and treatment.
//! - [`error`] -- Error types for reference data loading.

pub mod crop;
pub mod data;
pub mod error;
pub mod pest;
pub mod soil;
pub mod weather;

// Re-export primary types at crate root.
pub use crop::{
    CropStage, EMERGENCY_CARE_COST, EmergencyCare, GrowthConfig, GrowthFactors, HarvestYield,
    IntercropBenefits, NOT_READY_MESSAGE, apply_emergency_care, calculate_yield, crop_recommendations,
    crop_stages, intercropping_benefits, update_crop_growth,
};
pub use data::{
    Bounds, BreedingProfile, ClimateProfile, CropProfile, FeedPlan, IntercropPair, LivestockProfile,
    ReferenceData, RegionSoilProfile, SoilProfile, SoilRequirement,
};
pub use error::WorldError;
pub use pest::{PestKind, apply_treatment, check_pests_and_diseases, difficulty_multiplier};
pub use soil::{
    RegionCompatibility, SoilAnalysis, SoilCompatibility, analyze_soil, apply_amendment,
    region_soil_compatibility, soil_compatibility,
};
pub use weather::{WeatherEngine, generate_sample, month_of_day};
