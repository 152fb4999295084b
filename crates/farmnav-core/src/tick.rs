//! The daily tick: one simulated day for the whole farm.
//!
//! Each tick runs these phases in order, against the same weather sample:
//!
//! 1. **Calendar**: advance the farm clock by one day.
//! 2. **Weather**: generate the new day's weather for the farm's location.
//! 3. **Crops**: apply the growth update to every cropped tile.
//! 4. **Livestock**: apply the condition update to every animal, consuming
//!    and clearing the day's care log.
//!
//! Pest incidence is not rolled here; it is diagnosed when the player
//! treats a tile.

use farmnav_livestock::{HerdSummary, LivestockConfig, LivestockError, update_herd};
use farmnav_types::{GameMode, WeatherSample};
use farmnav_world::{GrowthConfig, ReferenceData, WeatherEngine, update_crop_growth};
use tracing::{debug, info};

use crate::clock::ClockError;
use crate::farm::FarmState;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The herd update failed.
    #[error("livestock error: {source}")]
    Livestock {
        /// The underlying livestock error.
        #[from]
        source: LivestockError,
    },
}

/// Read-only inputs to a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Reference tables.
    pub data: &'a ReferenceData,
    /// Crop growth tunables.
    pub growth: &'a GrowthConfig,
    /// Livestock tunables.
    pub livestock: &'a LivestockConfig,
    /// Story or sandbox.
    pub mode: GameMode,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The day that was simulated.
    pub day: u32,
    /// The day's weather.
    pub weather: WeatherSample,
    /// Tiles whose crop was updated.
    pub crops_updated: usize,
    /// Crops that reached maturity this tick.
    pub newly_harvestable: usize,
    /// Herd update aggregate.
    pub herd: HerdSummary,
}

/// Execute one complete tick.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the day counter would overflow and
/// [`TickError::Livestock`] if an animal's species has no reference
/// profile. The farm is unchanged in the first case; in the second the
/// clock, weather and crops have advanced but the herd has not.
pub fn run_tick(
    state: &mut FarmState,
    weather: &mut WeatherEngine,
    ctx: &TickContext<'_>,
) -> Result<TickSummary, TickError> {
    let day = state.clock_mut().advance()?;

    weather.set_location(state.location);
    let sample = weather.sample_for_day(day);
    state.weather = sample;

    let soil = state.soil_type();
    let mut crops_updated = 0_usize;
    let mut newly_harvestable = 0_usize;
    for tile in state.tiles_mut().iter_mut().filter(|t| t.crop().is_some()) {
        let was_ready = tile.is_harvestable();
        *tile = update_crop_growth(tile, &sample, soil, ctx.data, ctx.growth);
        crops_updated = crops_updated.saturating_add(1);
        if !was_ready && tile.is_harvestable() {
            newly_harvestable = newly_harvestable.saturating_add(1);
            debug!(position = %tile.position, "Crop ready for harvest");
        }
    }

    let herd = update_herd(
        &mut state.livestock,
        &sample,
        &mut state.care_log,
        ctx.mode,
        ctx.data,
        ctx.livestock,
    )?;

    info!(
        day,
        condition = %sample.condition,
        temperature = sample.temperature,
        crops = crops_updated,
        newly_harvestable,
        livestock = herd.updated,
        "Tick complete"
    );

    Ok(TickSummary {
        day,
        weather: sample,
        crops_updated,
        newly_harvestable,
        herd,
    })
}
