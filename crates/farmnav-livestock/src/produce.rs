//! Daily produce collected from an animal.

use farmnav_types::{LivestockUnit, ProductKind};
use farmnav_world::ReferenceData;
use serde::{Deserialize, Serialize};

use crate::error::LivestockError;

/// Points per unit of `amount * quality` for milk.
const MILK_POINT_RATE: f64 = 0.5;
/// Points per unit of `amount * quality` for eggs.
const EGG_POINT_RATE: f64 = 0.3;

/// Produce collected from one animal on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyYield {
    /// What was collected.
    pub product: ProductKind,
    /// Amount, rounded to one decimal.
    pub amount: f64,
    /// Quality percentage, equal to the animal's rounded health.
    pub quality: f64,
    /// Reward points earned.
    pub bharat_points: u64,
}

/// Compute today's produce from the animal's current productivity and health.
pub fn calculate_daily_yield(unit: &LivestockUnit, data: &ReferenceData) -> Result<DailyYield, LivestockError> {
    let profile = data
        .livestock(unit.species)
        .ok_or(LivestockError::UnknownSpecies(unit.species))?;

    let amount = unit.productivity;
    let quality = unit.health;
    let rate = match profile.product {
        ProductKind::Milk => MILK_POINT_RATE,
        ProductKind::Eggs => EGG_POINT_RATE,
        ProductKind::Meat => 0.0,
    };
    let bharat_points = (amount * quality * rate).floor().max(0.0) as u64;

    Ok(DailyYield {
        product: profile.product,
        amount: (amount * 10.0).round() / 10.0,
        quality: quality.round(),
        bharat_points,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::Species;

    use super::*;

    #[test]
    fn healthy_cow_gives_full_milk_points() {
        let data = ReferenceData::builtin();
        let cow = LivestockUnit::new(Species::Cow, 12.0, None);
        let produce = calculate_daily_yield(&cow, &data).unwrap();
        assert_eq!(produce.product, ProductKind::Milk);
        assert_eq!(produce.amount, 12.0);
        assert_eq!(produce.quality, 100.0);
        assert_eq!(produce.bharat_points, 600);
    }

    #[test]
    fn eggs_earn_at_a_lower_rate() {
        let data = ReferenceData::builtin();
        let mut hen = LivestockUnit::new(Species::Chicken, 5.0, None);
        hen.health = 60.0;
        hen.productivity = 3.0;
        let produce = calculate_daily_yield(&hen, &data).unwrap();
        assert_eq!(produce.product, ProductKind::Eggs);
        assert_eq!(produce.bharat_points, 54);
    }

    #[test]
    fn zero_health_yields_nothing() {
        let data = ReferenceData::builtin();
        let mut goat = LivestockUnit::new(Species::Goat, 2.0, None);
        goat.health = 0.0;
        goat.productivity = 0.0;
        let produce = calculate_daily_yield(&goat, &data).unwrap();
        assert_eq!(produce.amount, 0.0);
        assert_eq!(produce.bharat_points, 0);
    }
}
