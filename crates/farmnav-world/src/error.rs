//! Error types for the `farmnav-world` crate.
//!
//! Gameplay outcomes never surface here. These errors cover loading and
//! validating the reference tables, which happens once at session start.

use farmnav_types::{CropType, SoilType, Species};

/// Errors that can occur while loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The reference data file could not be read.
    #[error("failed to read reference data from {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The reference data file is not valid YAML for the expected schema.
    #[error("failed to parse reference data: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// A crop has no growth profile.
    #[error("reference data has no profile for crop {0}")]
    MissingCrop(CropType),

    /// A soil type has no property profile.
    #[error("reference data has no profile for soil {0}")]
    MissingSoil(SoilType),

    /// A livestock species has no profile.
    #[error("reference data has no profile for species {0}")]
    MissingSpecies(Species),

    /// A numeric range has its bounds reversed.
    #[error("invalid range in {context}: min {min} is greater than max {max}")]
    InvalidRange {
        /// Which table entry holds the range.
        context: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}
