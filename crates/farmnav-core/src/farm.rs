//! The farm aggregate: grid, roster, weather slot and balances.
//!
//! [`FarmState`] is owned exclusively by one session. Engines never hold a
//! reference to it; the tick cycle and player actions read tiles out,
//! run a pure transform, and write the result back.
//!
//! Tiles are stored row-major (`y * size + x`). Every lookup goes through
//! [`FarmState::tile`] / [`FarmState::tile_mut`], which return `None`
//! outside the grid.

use farmnav_livestock::DailyCareLog;
use farmnav_types::{LivestockId, LivestockUnit, Location, Occupant, Position, SoilType, Tile, WeatherSample};
use serde::{Deserialize, Serialize};

use crate::clock::FarmClock;

/// Which bulk actions have been used since the chapter started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUsage {
    /// Irrigate-all used.
    pub irrigate: bool,
    /// Fertilize-all used.
    pub fertilize: bool,
    /// Harvest-all used.
    pub harvest: bool,
}

impl BulkUsage {
    /// All three bulk actions have been used.
    pub const fn all(self) -> bool {
        self.irrigate && self.fertilize && self.harvest
    }
}

/// The mutable world of one session.
#[derive(Debug, Clone)]
pub struct FarmState {
    /// Side length of the square grid.
    grid_size: u32,
    /// Row-major tiles.
    tiles: Vec<Tile>,
    /// Region whose climate drives the weather.
    pub location: Location,
    /// Farm-wide soil type, copied into every tile.
    soil_type: SoilType,
    /// Today's weather.
    pub weather: WeatherSample,
    /// Calendar and speed.
    clock: FarmClock,
    /// Cumulative reward points.
    pub bharat_points: u64,
    /// Spendable credits.
    pub credits: u64,
    /// Earned badge names, in the order they were earned.
    pub badges: Vec<String>,
    /// Livestock roster, in purchase order.
    pub livestock: Vec<LivestockUnit>,
    /// Care given since the last tick.
    pub care_log: DailyCareLog,
    /// Bulk actions used this chapter.
    pub bulk_usage: BulkUsage,
}

impl FarmState {
    /// A fresh farm with an empty grid of `soil_type` tiles.
    pub fn new(grid_size: u32, soil_type: SoilType, location: Location, credits: u64, clock: FarmClock) -> Self {
        Self {
            grid_size,
            tiles: build_grid(grid_size, soil_type),
            location,
            soil_type,
            weather: WeatherSample::default(),
            clock,
            bharat_points: 0,
            credits,
            badges: Vec::new(),
            livestock: Vec::new(),
            care_log: DailyCareLog::new(),
            bulk_usage: BulkUsage::default(),
        }
    }

    /// Side length of the grid.
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Current day.
    pub const fn day(&self) -> u32 {
        self.clock.day()
    }

    /// The farm calendar.
    pub const fn clock(&self) -> &FarmClock {
        &self.clock
    }

    /// The farm calendar, mutable.
    pub const fn clock_mut(&mut self) -> &mut FarmClock {
        &mut self.clock
    }

    /// Farm-wide soil type.
    pub const fn soil_type(&self) -> SoilType {
        self.soil_type
    }

    /// Replace every tile with an empty tile of `soil_type`.
    pub fn regenerate_grid(&mut self, soil_type: SoilType) {
        self.soil_type = soil_type;
        self.tiles = build_grid(self.grid_size, soil_type);
        tracing::debug!(soil = %soil_type, size = self.grid_size, "Grid regenerated");
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x >= self.grid_size || position.y >= self.grid_size {
            return None;
        }
        let index = u64::from(position.y) * u64::from(self.grid_size) + u64::from(position.x);
        usize::try_from(index).ok()
    }

    /// Tile at `position`, if inside the grid.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|i| self.tiles.get(i))
    }

    /// Mutable tile at `position`, if inside the grid.
    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).and_then(|i| self.tiles.get_mut(i))
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All tiles, mutable, row-major.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Tiles with a crop planted.
    pub fn planted_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.crop().is_some()).count()
    }

    /// Tiles whose crop is ready to harvest.
    pub fn harvestable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_harvestable()).count()
    }

    /// Animals in the roster.
    pub fn livestock_count(&self) -> usize {
        self.livestock.len()
    }

    /// Look up an animal.
    pub fn animal(&self, id: LivestockId) -> Option<&LivestockUnit> {
        self.livestock.iter().find(|u| u.id == id)
    }

    /// Look up an animal mutably.
    pub fn animal_mut(&mut self, id: LivestockId) -> Option<&mut LivestockUnit> {
        self.livestock.iter_mut().find(|u| u.id == id)
    }

    /// First tile with nothing on it, scanning row by row.
    pub fn first_free_tile(&self) -> Option<Position> {
        self.tiles.iter().find(|t| t.is_empty()).map(|t| t.position)
    }

    /// Add reward points.
    pub const fn add_points(&mut self, points: u64) {
        self.bharat_points = self.bharat_points.saturating_add(points);
    }

    /// Deduct `cost` credits if affordable. Returns whether it was.
    pub const fn try_spend(&mut self, cost: u64) -> bool {
        match self.credits.checked_sub(cost) {
            Some(remaining) => {
                self.credits = remaining;
                true
            }
            None => false,
        }
    }

    /// Clear the grid, roster, care log and bulk flags for a new chapter
    /// attempt. Points, credits and badges are untouched.
    pub fn reset_field(&mut self, location: Location, day: u32) {
        self.location = location;
        self.clock.reset_to(day);
        self.tiles = build_grid(self.grid_size, self.soil_type);
        self.livestock.clear();
        self.care_log.clear();
        self.bulk_usage = BulkUsage::default();
        self.weather = WeatherSample::default();
    }

    /// Place an animal's marker on a tile.
    pub(crate) fn place_livestock(&mut self, unit: &LivestockUnit) {
        if let Some(tile) = unit.position.and_then(|position| self.tile_mut(position)) {
            tile.occupant = Occupant::Livestock(unit.species);
        }
    }
}

fn build_grid(size: u32, soil_type: SoilType) -> Vec<Tile> {
    (0..size)
        .flat_map(|y| (0..size).map(move |x| Tile::new(Position::new(x, y), soil_type)))
        .collect()
}
