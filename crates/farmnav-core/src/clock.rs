//! Farm calendar and simulation speed.
//!
//! The clock is the single source of truth for the simulated day. One tick
//! is one day. The real-time interval between ticks is the configured base
//! interval divided by the player-selected [`SimulationSpeed`].
//!
//! All advancement uses checked arithmetic.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::TimeConfig;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u32::MAX")]
    DayOverflow,

    /// Invalid time configuration (e.g. zero base interval).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Player-selectable speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationSpeed {
    /// One day per base interval.
    #[default]
    X1,
    /// Two days per base interval.
    X2,
    /// Four days per base interval.
    X4,
}

impl SimulationSpeed {
    /// Speed for a multiplier of 1, 2 or 4.
    pub const fn from_multiplier(multiplier: u32) -> Option<Self> {
        match multiplier {
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            _ => None,
        }
    }

    /// Numeric multiplier.
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }

    /// Real time between ticks at this speed.
    pub fn tick_interval(self, base_ms: u64) -> Duration {
        Duration::from_millis(base_ms / u64::from(self.multiplier()))
    }
}

impl core::fmt::Display for SimulationSpeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

/// The farm calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmClock {
    /// Current day. Chapters start on day 1.
    day: u32,

    /// Real milliseconds per day at 1x.
    base_interval_ms: u64,

    /// Current speed.
    speed: SimulationSpeed,
}

impl FarmClock {
    /// Create a clock on day 1 from a time configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the base interval is zero or
    /// the speed is not one of 1, 2, 4.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        if config.base_tick_interval_ms == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "base_tick_interval_ms must be at least 1".to_owned(),
            });
        }
        let speed = SimulationSpeed::from_multiplier(config.speed).ok_or_else(|| ClockError::InvalidConfig {
            reason: format!("speed must be 1, 2 or 4, got {}", config.speed),
        })?;
        Ok(Self {
            day: 1,
            base_interval_ms: config.base_tick_interval_ms,
            speed,
        })
    }

    /// Advance by one day and return the new day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the counter would overflow.
    pub fn advance(&mut self) -> Result<u32, ClockError> {
        self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        Ok(self.day)
    }

    /// Jump to a specific day (chapter start or restart).
    pub const fn reset_to(&mut self, day: u32) {
        self.day = day;
    }

    /// Current day.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Current speed.
    pub const fn speed(&self) -> SimulationSpeed {
        self.speed
    }

    /// Change the speed.
    pub const fn set_speed(&mut self, speed: SimulationSpeed) {
        self.speed = speed;
    }

    /// Real time between ticks at the current speed.
    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval(self.base_interval_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_day_one() {
        let clock = FarmClock::new(&TimeConfig::default()).unwrap();
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.speed(), SimulationSpeed::X1);
        assert_eq!(clock.tick_interval(), Duration::from_millis(5000));
    }

    #[test]
    fn advance_increments_day() {
        let mut clock = FarmClock::new(&TimeConfig::default()).unwrap();
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.advance().unwrap(), 3);
        clock.reset_to(1);
        assert_eq!(clock.day(), 1);
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = FarmClock::new(&TimeConfig::default()).unwrap();
        clock.reset_to(u32::MAX);
        assert!(matches!(clock.advance(), Err(ClockError::DayOverflow)));
        assert_eq!(clock.day(), u32::MAX);
    }

    #[test]
    fn speed_divides_interval() {
        let mut clock = FarmClock::new(&TimeConfig::default()).unwrap();
        clock.set_speed(SimulationSpeed::X2);
        assert_eq!(clock.tick_interval(), Duration::from_millis(2500));
        clock.set_speed(SimulationSpeed::X4);
        assert_eq!(clock.tick_interval(), Duration::from_millis(1250));
        assert_eq!(clock.speed().to_string(), "4x");
    }

    #[test]
    fn rejects_invalid_config() {
        let zero = TimeConfig {
            base_tick_interval_ms: 0,
            speed: 1,
        };
        assert!(matches!(FarmClock::new(&zero), Err(ClockError::InvalidConfig { .. })));
        let odd = TimeConfig {
            base_tick_interval_ms: 5000,
            speed: 3,
        };
        assert!(matches!(FarmClock::new(&odd), Err(ClockError::InvalidConfig { .. })));
        assert_eq!(SimulationSpeed::from_multiplier(3), None);
    }
}
