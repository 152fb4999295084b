//! Per-day care log and the herd-wide daily update.
//!
//! Feed and water actions are recorded in a [`DailyCareLog`] as they
//! happen. At the next tick [`update_herd`] consumes the log, applies the
//! daily condition update to every animal, and leaves the log empty for
//! the new day.

use std::collections::BTreeMap;

use farmnav_types::{GameMode, LivestockId, LivestockUnit, WeatherSample};
use farmnav_world::ReferenceData;

use crate::config::LivestockConfig;
use crate::error::LivestockError;
use crate::health::{CareRecord, update_livestock_health};

/// Care given to each animal since the last tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyCareLog {
    records: BTreeMap<LivestockId, CareRecord>,
}

impl DailyCareLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a feeding.
    pub fn mark_fed(&mut self, id: LivestockId) {
        self.records.entry(id).or_default().fed = true;
    }

    /// Record a watering.
    pub fn mark_watered(&mut self, id: LivestockId) {
        self.records.entry(id).or_default().watered = true;
    }

    /// Care recorded for an animal today.
    pub fn record(&self, id: LivestockId) -> CareRecord {
        self.records.get(&id).copied().unwrap_or_default()
    }

    /// Whether nothing has been recorded today.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget everything recorded today.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Aggregate of one herd update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HerdSummary {
    /// Animals updated.
    pub updated: usize,
    /// Animals that were fed today.
    pub fed: usize,
    /// Animals that were watered today.
    pub watered: usize,
    /// Mean health after the update. Zero for an empty herd.
    pub mean_health: f64,
}

/// Apply the daily condition update to every animal, then clear the log.
///
/// The herd is left untouched if any animal's species is missing from the
/// reference tables.
pub fn update_herd(
    herd: &mut [LivestockUnit],
    weather: &WeatherSample,
    log: &mut DailyCareLog,
    mode: GameMode,
    data: &ReferenceData,
    config: &LivestockConfig,
) -> Result<HerdSummary, LivestockError> {
    let mut updated = Vec::with_capacity(herd.len());
    let mut summary = HerdSummary::default();

    for unit in herd.iter() {
        let care = log.record(unit.id);
        if care.fed {
            summary.fed = summary.fed.saturating_add(1);
        }
        if care.watered {
            summary.watered = summary.watered.saturating_add(1);
        }
        updated.push(update_livestock_health(unit, weather, care, mode, data, config)?);
    }

    for (slot, next) in herd.iter_mut().zip(updated) {
        *slot = next;
    }
    log.clear();

    summary.updated = herd.len();
    if !herd.is_empty() {
        let total: f64 = herd.iter().map(|u| u.health).sum();
        summary.mean_health = total / herd.len() as f64;
    }
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::{Species, WeatherCondition};

    use super::*;

    #[test]
    fn care_flags_accumulate_per_animal() {
        let a = LivestockId::new();
        let b = LivestockId::new();
        let mut log = DailyCareLog::new();
        log.mark_fed(a);
        log.mark_watered(a);
        log.mark_watered(b);
        assert_eq!(log.record(a), CareRecord { fed: true, watered: true });
        assert_eq!(log.record(b), CareRecord { fed: false, watered: true });
        assert_eq!(log.record(LivestockId::new()), CareRecord::default());
    }

    #[test]
    fn herd_update_consumes_log() {
        let data = ReferenceData::builtin();
        let config = LivestockConfig::default();
        let mut herd = vec![
            LivestockUnit::new(Species::Cow, 12.0, None),
            LivestockUnit::new(Species::Goat, 2.0, None),
        ];
        let mut log = DailyCareLog::new();
        let cow = herd.first().unwrap().id;
        log.mark_fed(cow);
        log.mark_watered(cow);

        let weather = WeatherSample {
            condition: WeatherCondition::Sunny,
            temperature: 25.0,
            ..WeatherSample::default()
        };
        let summary = update_herd(&mut herd, &weather, &mut log, GameMode::Sandbox, &data, &config).unwrap();

        assert!(log.is_empty());
        assert_eq!(summary.updated, 2);
        assert_eq!(summary.fed, 1);
        assert_eq!(summary.watered, 1);
        assert_eq!(herd.first().unwrap().health, 100.0);
        assert!(herd.get(1).unwrap().health < 100.0);
        assert!(herd.iter().all(|u| u.age == 1));
    }

    #[test]
    fn empty_herd_is_fine() {
        let data = ReferenceData::builtin();
        let mut herd: Vec<LivestockUnit> = Vec::new();
        let mut log = DailyCareLog::new();
        let summary = update_herd(
            &mut herd,
            &WeatherSample::default(),
            &mut log,
            GameMode::Story,
            &data,
            &LivestockConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.mean_health, 0.0);
    }
}
