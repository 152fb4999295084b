//! Tunables for the daily livestock update.
//!
//! Every penalty is scaled by a mode multiplier: story mode is forgiving
//! (0.2) and sandbox mode is harsher (0.4). The [`LivestockConfig`] struct
//! is read from the `livestock` section of `farmnav-config.yaml`.

use farmnav_types::GameMode;
use serde::{Deserialize, Serialize};

/// Configuration for livestock condition mechanics applied each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivestockConfig {
    /// Penalty multiplier in story mode (default: 0.2).
    pub story_penalty_multiplier: f64,

    /// Penalty multiplier in sandbox mode (default: 0.4).
    pub sandbox_penalty_multiplier: f64,

    /// Hunger added on a day without feed (default: 15).
    pub hunger_rise: f64,

    /// Hunger removed by feeding (default: 30).
    pub feed_hunger_relief: f64,

    /// Health gained on a fed day (default: 2).
    pub fed_health_gain: f64,

    /// Health lost on an unfed day, before scaling (default: 5).
    pub unfed_penalty: f64,

    /// Health lost on a day without water, before scaling (default: 8).
    pub thirst_penalty: f64,

    /// Health lost outside the ideal temperature range (default: 3).
    pub temperature_penalty: f64,

    /// Health lost by non-goats in drought (default: 4).
    pub drought_penalty: f64,

    /// Health lost by chickens in monsoon (default: 3).
    pub monsoon_chicken_penalty: f64,

    /// Health lost by animals past the old-age fraction (default: 1).
    pub old_age_penalty: f64,

    /// Fraction of lifespan after which old age applies (default: 0.8).
    pub old_age_fraction: f64,

    /// Health below which productivity scales with health (default: 70).
    pub productivity_health_threshold: f64,
}

impl Default for LivestockConfig {
    fn default() -> Self {
        Self {
            story_penalty_multiplier: 0.2,
            sandbox_penalty_multiplier: 0.4,
            hunger_rise: 15.0,
            feed_hunger_relief: 30.0,
            fed_health_gain: 2.0,
            unfed_penalty: 5.0,
            thirst_penalty: 8.0,
            temperature_penalty: 3.0,
            drought_penalty: 4.0,
            monsoon_chicken_penalty: 3.0,
            old_age_penalty: 1.0,
            old_age_fraction: 0.8,
            productivity_health_threshold: 70.0,
        }
    }
}

impl LivestockConfig {
    /// Penalty multiplier for the given mode.
    pub const fn penalty_multiplier(&self, mode: GameMode) -> f64 {
        match mode {
            GameMode::Story => self.story_penalty_multiplier,
            GameMode::Sandbox => self.sandbox_penalty_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_is_harsher() {
        let config = LivestockConfig::default();
        assert_eq!(config.penalty_multiplier(GameMode::Story), 0.2);
        assert_eq!(config.penalty_multiplier(GameMode::Sandbox), 0.4);
    }
}
