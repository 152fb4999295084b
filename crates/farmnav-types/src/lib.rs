//! Shared type definitions for the Farm Navigator simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the Farm Navigator workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the grid UI.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (soils, crops, regions, weather, species)
//! - [`structs`] -- Core entity structs (tiles, livestock, weather samples)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Amendment, Companion, CropType, GameMode, Location, ParseEnumError, ProductKind, SoilType,
    Species, WeatherCondition,
};
pub use ids::LivestockId;
pub use structs::{
    LivestockUnit, MATURE_STAGE, Occupant, PERCENT_MAX, Position, Tile, WeatherSample,
    clamp_percent, clamp_stage,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the shared model.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::LivestockId::export_all();

        let _ = crate::enums::SoilType::export_all();
        let _ = crate::enums::CropType::export_all();
        let _ = crate::enums::Companion::export_all();
        let _ = crate::enums::Amendment::export_all();
        let _ = crate::enums::Location::export_all();
        let _ = crate::enums::WeatherCondition::export_all();
        let _ = crate::enums::Species::export_all();
        let _ = crate::enums::ProductKind::export_all();
        let _ = crate::enums::GameMode::export_all();

        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::Occupant::export_all();
        let _ = crate::structs::Tile::export_all();
        let _ = crate::structs::LivestockUnit::export_all();
        let _ = crate::structs::WeatherSample::export_all();
    }
}
