//! Daily weather generation from regional climate profiles.
//!
//! Each day is mapped onto a 12-month cycle (`day mod 365`). Monsoon months
//! draw heavy precipitation; the rest of the year follows a dry-season
//! branch in which only Rajasthan can fall into drought.
//!
//! | Season  | Draw                    | Condition                          |
//! |---------|-------------------------|------------------------------------|
//! | Monsoon | precip in `[50, 150)`   | `> 100` monsoon, `> 50` rainy, else cloudy |
//! | Dry     | roll `> 0.8` (Rajasthan)| drought, no precipitation          |
//! | Dry     | roll `> 0.7`            | cloudy, precip in `[0, 20)`        |
//! | Dry     | otherwise               | sunny, precip in `[0, 10)`         |
//!
//! Temperature follows a sine over the location's average range with
//! `±5 °C` of daily noise. Humidity is `30 + precip / 2`, plus 20 in the
//! monsoon, capped at 100. Wind is uniform in `[5, 25)`.
//!
//! # Determinism
//!
//! The engine owns a [`SmallRng`]. Seeding it with [`WeatherEngine::seeded`]
//! makes a run reproducible.

use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::sync::Arc;

use farmnav_types::{Location, WeatherCondition, WeatherSample};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::data::{ClimateProfile, ReferenceData};

/// Days in the simulated year.
pub const DAYS_PER_YEAR: u32 = 365;

/// The only location whose dry season can turn into drought.
const DROUGHT_PRONE: Location = Location::Rajasthan;

/// Map a day number onto a month in `1..=12`.
pub fn month_of_day(day: u32) -> u32 {
    let fraction = f64::from(day % DAYS_PER_YEAR) / f64::from(DAYS_PER_YEAR);
    (fraction * 12.0).floor() as u32 + 1
}

/// Generate one day of weather for a location.
///
/// A missing climate profile yields [`WeatherSample::default`].
pub fn generate_sample<R: Rng + ?Sized>(
    climate: Option<&ClimateProfile>,
    location: Location,
    day: u32,
    rng: &mut R,
) -> WeatherSample {
    let Some(climate) = climate else {
        return WeatherSample::default();
    };

    let month = month_of_day(day);
    let is_monsoon = climate.monsoon_months.contains(&month);

    let phase = f64::from(day) / f64::from(DAYS_PER_YEAR) * TAU;
    let seasonal = climate.temperature.min + (phase.sin() + 1.0) * (climate.temperature.span() / 4.0);
    let noise = (rng.random::<f64>() - 0.5) * 10.0;
    let temperature = (seasonal + noise).round();

    let (condition, precipitation) = if is_monsoon {
        let precipitation = rng.random::<f64>() * 100.0 + 50.0;
        let condition = if precipitation > 100.0 {
            WeatherCondition::Monsoon
        } else if precipitation > 50.0 {
            WeatherCondition::Rainy
        } else {
            WeatherCondition::Cloudy
        };
        (condition, precipitation)
    } else {
        let roll = rng.random::<f64>();
        if location == DROUGHT_PRONE && roll > 0.8 {
            (WeatherCondition::Drought, 0.0)
        } else if roll > 0.7 {
            (WeatherCondition::Cloudy, rng.random::<f64>() * 20.0)
        } else {
            (WeatherCondition::Sunny, rng.random::<f64>() * 10.0)
        }
    };

    let monsoon_bonus = if is_monsoon { 20.0 } else { 0.0 };
    let humidity = (30.0 + precipitation * 0.5 + monsoon_bonus).min(100.0);
    let wind_speed = rng.random::<f64>() * 20.0 + 5.0;

    WeatherSample {
        condition,
        temperature,
        precipitation,
        humidity,
        wind_speed,
    }
}

/// Stateful weather generator for one session.
#[derive(Debug, Clone)]
pub struct WeatherEngine {
    /// Shared reference tables.
    data: Arc<ReferenceData>,
    /// Location whose climate drives generation.
    location: Location,
    /// Day of the most recent [`sample_for_day`](Self::sample_for_day) call.
    current_day: u32,
    /// Most recent samples, oldest first.
    history: VecDeque<WeatherSample>,
    /// Maximum retained samples. Zero keeps everything.
    history_capacity: usize,
    /// Randomness source.
    rng: SmallRng,
}

impl WeatherEngine {
    /// Create an engine seeded from OS entropy.
    pub fn new(data: Arc<ReferenceData>, location: Location, history_capacity: usize) -> Self {
        Self::with_rng(data, location, history_capacity, SmallRng::from_os_rng())
    }

    /// Create an engine with a fixed seed.
    pub fn seeded(data: Arc<ReferenceData>, location: Location, history_capacity: usize, seed: u64) -> Self {
        Self::with_rng(data, location, history_capacity, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(data: Arc<ReferenceData>, location: Location, history_capacity: usize, rng: SmallRng) -> Self {
        Self {
            data,
            location,
            current_day: 1,
            history: VecDeque::new(),
            history_capacity,
            rng,
        }
    }

    /// Change the location without resetting history.
    pub fn set_location(&mut self, location: Location) {
        if self.location != location {
            tracing::debug!(from = %self.location, to = %location, "Weather location changed");
        }
        self.location = location;
    }

    /// Current location.
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Day of the last generated sample.
    pub const fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Generate the weather for `day`, record it in history and make `day`
    /// the current day.
    pub fn sample_for_day(&mut self, day: u32) -> WeatherSample {
        self.current_day = day;
        let climate = self.data.climate(self.location);
        let sample = generate_sample(climate, self.location, day, &mut self.rng);

        if self.history_capacity > 0 {
            while self.history.len() >= self.history_capacity {
                self.history.pop_front();
            }
        }
        self.history.push_back(sample);

        tracing::debug!(
            day,
            location = %self.location,
            condition = %sample.condition,
            temperature = sample.temperature,
            precipitation = sample.precipitation,
            "Weather generated"
        );
        sample
    }

    /// Generate samples for the `days` days after the current day.
    ///
    /// The draws come from the same generator as real days, so a forecast
    /// is an illustration rather than a prediction. History and the
    /// current day are left untouched.
    pub fn forecast(&mut self, days: u32) -> Vec<WeatherSample> {
        let climate = self.data.climate(self.location);
        (1..=days)
            .map(|offset| {
                let day = self.current_day.saturating_add(offset);
                generate_sample(climate, self.location, day, &mut self.rng)
            })
            .collect()
    }

    /// The last `days` recorded samples, oldest first.
    pub fn history(&self, days: usize) -> Vec<WeatherSample> {
        let skip = self.history.len().saturating_sub(days);
        self.history.iter().skip(skip).copied().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn engine(location: Location, seed: u64) -> WeatherEngine {
        WeatherEngine::seeded(Arc::new(ReferenceData::builtin()), location, 5, seed)
    }

    #[test]
    fn months_cover_the_year() {
        assert_eq!(month_of_day(0), 1);
        assert_eq!(month_of_day(30), 1);
        assert_eq!(month_of_day(31), 2);
        assert_eq!(month_of_day(364), 12);
        assert_eq!(month_of_day(365), 1);
    }

    #[test]
    fn missing_climate_falls_back_to_default() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sample = generate_sample(None, Location::Punjab, 200, &mut rng);
        assert_eq!(sample, WeatherSample::default());
    }

    #[test]
    fn monsoon_month_is_wet() {
        let data = ReferenceData::builtin();
        let climate = data.climate(Location::Karnataka);
        let mut rng = SmallRng::seed_from_u64(7);
        // Day 200 falls in July.
        for _ in 0..50 {
            let sample = generate_sample(climate, Location::Karnataka, 200, &mut rng);
            assert!(sample.precipitation >= 50.0 && sample.precipitation < 150.0);
            assert!(matches!(
                sample.condition,
                WeatherCondition::Monsoon | WeatherCondition::Rainy
            ));
            assert!(sample.humidity >= 75.0 && sample.humidity <= 100.0);
        }
    }

    #[test]
    fn dry_season_bounds_hold() {
        let data = ReferenceData::builtin();
        let climate = data.climate(Location::Punjab);
        let mut rng = SmallRng::seed_from_u64(11);
        for day in 0..120 {
            let sample = generate_sample(climate, Location::Punjab, day, &mut rng);
            assert_ne!(sample.condition, WeatherCondition::Drought);
            assert!(sample.precipitation < 20.0);
            assert!(sample.wind_speed >= 5.0 && sample.wind_speed < 25.0);
            assert_eq!(sample.temperature, sample.temperature.round());
        }
    }

    #[test]
    fn only_rajasthan_sees_drought() {
        let data = ReferenceData::builtin();
        let climate = data.climate(Location::Rajasthan);
        let mut rng = SmallRng::seed_from_u64(3);
        let droughts = (0..500)
            .map(|_| generate_sample(climate, Location::Rajasthan, 10, &mut rng))
            .filter(|s| s.condition == WeatherCondition::Drought)
            .inspect(|s| assert_eq!(s.precipitation, 0.0))
            .count();
        assert!(droughts > 0);
    }

    #[test]
    fn temperature_stays_near_climate_range() {
        let data = ReferenceData::builtin();
        let climate = data.climate(Location::Himachal).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        for day in 0..365 {
            let sample = generate_sample(Some(climate), Location::Himachal, day, &mut rng);
            assert!(sample.temperature >= climate.temperature.min - 5.0);
            assert!(sample.temperature <= climate.temperature.midpoint() + 5.0);
        }
    }

    #[test]
    fn history_is_bounded_and_ordered() {
        let mut weather = engine(Location::Bihar, 42);
        let generated: Vec<_> = (1..=8).map(|day| weather.sample_for_day(day)).collect();
        let history = weather.history(10);
        assert_eq!(history.len(), 5);
        assert_eq!(history.as_slice(), generated.get(3..).unwrap());
        assert_eq!(weather.history(2).as_slice(), generated.get(6..).unwrap());
        assert_eq!(weather.current_day(), 8);
    }

    #[test]
    fn forecast_leaves_history_alone() {
        let mut weather = engine(Location::Gujarat, 9);
        weather.sample_for_day(4);
        let forecast = weather.forecast(3);
        assert_eq!(forecast.len(), 3);
        assert_eq!(weather.history(10).len(), 1);
        assert_eq!(weather.current_day(), 4);
    }

    #[test]
    fn same_seed_same_weather() {
        let mut a = engine(Location::TamilNadu, 99);
        let mut b = engine(Location::TamilNadu, 99);
        for day in 1..30 {
            assert_eq!(a.sample_for_day(day), b.sample_for_day(day));
        }
    }

    #[test]
    fn set_location_switches_climate() {
        let mut weather = engine(Location::Rajasthan, 1);
        weather.set_location(Location::WestBengal);
        assert_eq!(weather.location(), Location::WestBengal);
        // West Bengal averages 10..25, so day 0 cannot exceed 25.
        let sample = weather.sample_for_day(0);
        assert!(sample.temperature <= 25.0);
    }
}
