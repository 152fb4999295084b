//! Soil analysis, crop and region compatibility, and amendments.
//!
//! Everything here is a pure function over a [`Tile`] and the reference
//! tables. Nothing mutates shared state.

use farmnav_types::{Amendment, CropType, Location, SoilType, Tile};
use serde::{Deserialize, Serialize};

use crate::data::ReferenceData;

/// pH below which lime is recommended.
const PH_LOW: f64 = 6.0;
/// pH above which organic matter is recommended.
const PH_HIGH: f64 = 7.5;

/// Result of [`analyze_soil`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilAnalysis {
    /// Effective pH.
    pub ph: f64,
    /// Water retention of the soil family, in percent.
    pub water_retention: f64,
    /// Nutrient level of the tile.
    pub nutrient_level: f64,
    /// Estimated organic matter.
    pub organic_matter: f64,
    /// Estimated salinity from over-irrigation.
    pub salinity: f64,
    /// Advice, in priority order.
    pub recommendations: Vec<String>,
}

/// Inspect a tile's soil and produce advice.
///
/// A soil family missing from the reference tables is analysed with a
/// neutral pH of 7 and zero retention.
pub fn analyze_soil(tile: &Tile, data: &ReferenceData) -> SoilAnalysis {
    let profile = data.soil(tile.soil_type);
    let mut recommendations = Vec::new();

    let mut ph = profile.map_or(7.0, |p| p.ph);
    // Depleted soils acidify.
    if tile.nutrients < 30.0 {
        ph -= 0.3;
    }
    if ph < PH_LOW {
        recommendations.push("Apply lime (2 t/ha) to raise pH to optimal 6.0-7.5 range".to_owned());
    } else if ph > PH_HIGH {
        recommendations.push("Add organic matter to lower pH and improve nutrient availability".to_owned());
    }

    let water_retention = profile.map_or(0.0, |p| p.water_retention);
    if water_retention < 15.0 {
        recommendations.push("Add mulch (5 cm layer) to improve water retention".to_owned());
        recommendations.push("Consider drip irrigation to minimize water loss".to_owned());
    }

    if tile.nutrients < 40.0 {
        recommendations.push("Apply basal fertilizer: N-P-K 135:62.5:50 kg/ha".to_owned());
        recommendations.push("Consider crop rotation with legumes to fix nitrogen".to_owned());
    }

    let organic_matter = tile.nutrients * 0.5;
    if organic_matter < 30.0 {
        recommendations.push("Add farmyard manure (10 t/ha) to boost organic content".to_owned());
    }

    let salinity = (tile.moisture - 80.0).max(0.0) * 2.0;
    if salinity > 20.0 {
        recommendations.push("Reduce irrigation to prevent salt buildup".to_owned());
        recommendations.push("Improve drainage to leach excess salts".to_owned());
    }

    SoilAnalysis {
        ph,
        water_retention,
        nutrient_level: tile.nutrients,
        organic_matter,
        salinity,
        recommendations,
    }
}

/// How well a soil family suits a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilCompatibility {
    /// Whether the crop can reach full yield.
    pub compatible: bool,
    /// Explanation for the player.
    pub reason: String,
    /// Expected yield change in percent.
    pub yield_impact: i32,
}

/// Check a soil family against a crop's requirements.
///
/// Checks run in order: soil family, water retention, pH. The first failure
/// decides the reason. A crop with no requirement entry is compatible with
/// no yield impact.
pub fn soil_compatibility(soil: SoilType, crop: CropType, data: &ReferenceData) -> SoilCompatibility {
    let (Some(requirement), Some(profile)) = (data.soil_requirement(crop), data.soil(soil)) else {
        return SoilCompatibility {
            compatible: true,
            reason: format!("No soil requirements recorded for {crop}"),
            yield_impact: 0,
        };
    };

    let ideal = requirement.ideal_soils.contains(&soil);
    let retains = profile.water_retention >= requirement.min_water_retention;
    let ph_ok = requirement.ph.contains(profile.ph);

    if !ideal {
        let alternatives = join_soils(&requirement.ideal_soils, " or ");
        return SoilCompatibility {
            compatible: false,
            reason: format!(
                "{} is not ideal for {crop}. Consider {alternatives} soil instead.",
                profile.name
            ),
            yield_impact: -30,
        };
    }
    if !retains {
        return SoilCompatibility {
            compatible: false,
            reason: format!(
                "{} has insufficient water retention ({}%) for {crop}",
                profile.name, profile.water_retention
            ),
            yield_impact: -20,
        };
    }
    if !ph_ok {
        return SoilCompatibility {
            compatible: false,
            reason: format!("Soil pH ({}) is outside optimal range for {crop}", profile.ph),
            yield_impact: -15,
        };
    }
    SoilCompatibility {
        compatible: true,
        reason: format!("{} is ideal for {crop}", profile.name),
        yield_impact: 20,
    }
}

/// How well a soil family suits a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCompatibility {
    /// Whether the soil is workable in the region.
    pub compatible: bool,
    /// 90 for an ideal soil, 60 otherwise.
    pub score: u32,
    /// Summary for the player.
    pub message: String,
    /// Follow-up advice.
    pub recommendations: Vec<String>,
}

/// Score a soil choice against the region's preferred soils.
///
/// A region without a soil profile is reported as workable with a
/// baseline score.
pub fn region_soil_compatibility(location: Location, soil: SoilType, data: &ReferenceData) -> RegionCompatibility {
    let soil_name = data.soil(soil).map_or_else(|| soil.to_string(), |p| p.name.clone());
    let Some(region) = data.region(location) else {
        return RegionCompatibility {
            compatible: true,
            score: 60,
            message: format!("No soil profile recorded for {location}. {soil_name} should be workable."),
            recommendations: Vec::new(),
        };
    };

    let ideal = region.ideal_soils.contains(&soil);
    let score = if ideal { 90 } else { 60 };

    let (message, recommendations) = if ideal {
        (
            format!("Excellent match! {soil_name} is ideal for {}.", region.name),
            vec![
                "This combination is perfect for the region's climate".to_owned(),
                format!("Water needs: {}", need_level(region.moisture_multiplier, 1.2)),
                format!("Fertilizer needs: {}", need_level(region.fertilization_multiplier, 1.1)),
            ],
        )
    } else {
        let ideal_names: Vec<String> = region
            .ideal_soils
            .iter()
            .map(|s| data.soil(*s).map_or_else(|| s.to_string(), |p| p.name.clone()))
            .collect();
        (
            format!(
                "Workable but not ideal. {soil_name} can work in {}, but consider {} soil for better results.",
                region.name,
                join_soils(&region.ideal_soils, " or ")
            ),
            vec![
                "Consider soil amendments to improve compatibility".to_owned(),
                "Monitor crops closely for stress signs".to_owned(),
                format!("Ideal soils for this region: {}", ideal_names.join(", ")),
            ],
        )
    };

    RegionCompatibility {
        compatible: score >= 60,
        score,
        message,
        recommendations,
    }
}

fn need_level(multiplier: f64, high_above: f64) -> &'static str {
    if multiplier < 1.0 {
        "Low"
    } else if multiplier > high_above {
        "High"
    } else {
        "Moderate"
    }
}

fn join_soils(soils: &[SoilType], separator: &str) -> String {
    soils.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(separator)
}

/// Apply a soil amendment to a tile.
///
/// | Amendment  | Effect          |
/// |------------|-----------------|
/// | lime       | nutrients + 10  |
/// | manure     | nutrients + 30  |
/// | fertilizer | nutrients + 40  |
/// | mulch      | moisture + 15   |
pub fn apply_amendment(tile: &Tile, amendment: Amendment) -> Tile {
    let mut next = tile.clone();
    match amendment {
        Amendment::Lime => next.nutrients += 10.0,
        Amendment::Manure => next.nutrients += 30.0,
        Amendment::Fertilizer => next.nutrients += 40.0,
        Amendment::Mulch => next.moisture += 15.0,
    }
    next.clamped()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmnav_types::Position;

    use super::*;

    fn tile(soil: SoilType) -> Tile {
        Tile::new(Position::new(0, 0), soil)
    }

    #[test]
    fn sandy_soil_needs_lime_and_mulch() {
        let data = ReferenceData::builtin();
        let analysis = analyze_soil(&tile(SoilType::Sandy), &data);
        assert_eq!(analysis.ph, 5.2);
        assert_eq!(analysis.water_retention, 12.5);
        assert_eq!(analysis.organic_matter, 25.0);
        assert_eq!(analysis.salinity, 0.0);
        assert_eq!(
            analysis.recommendations,
            vec![
                "Apply lime (2 t/ha) to raise pH to optimal 6.0-7.5 range",
                "Add mulch (5 cm layer) to improve water retention",
                "Consider drip irrigation to minimize water loss",
                "Add farmyard manure (10 t/ha) to boost organic content",
            ]
        );
    }

    #[test]
    fn depletion_acidifies_and_wet_soil_turns_saline() {
        let data = ReferenceData::builtin();
        let mut t = tile(SoilType::Black);
        t.nutrients = 20.0;
        t.moisture = 95.0;
        let analysis = analyze_soil(&t, &data);
        assert!((analysis.ph - 7.2).abs() < 1e-9);
        assert_eq!(analysis.salinity, 30.0);
        assert!(analysis.recommendations.iter().any(|r| r.starts_with("Reduce irrigation")));
        assert!(analysis.recommendations.iter().any(|r| r.starts_with("Apply basal fertilizer")));
        assert!(!analysis.recommendations.iter().any(|r| r.starts_with("Apply lime")));
    }

    #[test]
    fn alluvial_rice_is_ideal() {
        let data = ReferenceData::builtin();
        let result = soil_compatibility(SoilType::Alluvial, CropType::Rice, &data);
        assert!(result.compatible);
        assert_eq!(result.yield_impact, 20);
    }

    #[test]
    fn wrong_family_is_reported_first() {
        let data = ReferenceData::builtin();
        let result = soil_compatibility(SoilType::Clay, CropType::Coffee, &data);
        assert!(!result.compatible);
        assert_eq!(result.yield_impact, -30);
        assert!(result.reason.contains("laterite"));
    }

    #[test]
    fn ph_failure_after_family_and_retention() {
        let data = ReferenceData::builtin();
        // Sandy suits bajra and retains 12.5 >= 8, but pH 5.2 is below 6.0.
        let result = soil_compatibility(SoilType::Sandy, CropType::Bajra, &data);
        assert_eq!(result.yield_impact, -15);
        // Laterite retention 18 >= 15 and pH 5.5 within 5.0..6.5.
        let coffee = soil_compatibility(SoilType::Laterite, CropType::Coffee, &data);
        assert_eq!(coffee.yield_impact, 20);
    }

    #[test]
    fn retention_failure() {
        let mut data = ReferenceData::builtin();
        if let Some(req) = data.soil_requirements.get_mut(&CropType::Wheat) {
            req.min_water_retention = 40.0;
        }
        let result = soil_compatibility(SoilType::Loamy, CropType::Wheat, &data);
        assert_eq!(result.yield_impact, -20);
    }

    #[test]
    fn unknown_requirement_fails_open() {
        let mut data = ReferenceData::builtin();
        data.soil_requirements.remove(&CropType::Apple);
        let result = soil_compatibility(SoilType::Clay, CropType::Apple, &data);
        assert!(result.compatible);
        assert_eq!(result.yield_impact, 0);
    }

    #[test]
    fn region_scores() {
        let data = ReferenceData::builtin();
        let ideal = region_soil_compatibility(Location::Karnataka, SoilType::Laterite, &data);
        assert_eq!(ideal.score, 90);
        assert!(ideal.compatible);
        assert_eq!(ideal.recommendations.get(1).unwrap(), "Water needs: High");
        assert_eq!(ideal.recommendations.get(2).unwrap(), "Fertilizer needs: Moderate");

        let workable = region_soil_compatibility(Location::Rajasthan, SoilType::Clay, &data);
        assert_eq!(workable.score, 60);
        assert!(workable.compatible);
        assert_eq!(
            workable.recommendations.get(2).unwrap(),
            "Ideal soils for this region: Sandy Soil, Loamy Soil"
        );
    }

    #[test]
    fn fertilizer_caps_at_one_hundred() {
        let mut t = tile(SoilType::Loamy);
        t.nutrients = 70.0;
        assert_eq!(apply_amendment(&t, Amendment::Fertilizer).nutrients, 100.0);
        t.nutrients = 20.0;
        assert_eq!(apply_amendment(&t, Amendment::Fertilizer).nutrients, 60.0);
    }

    #[test]
    fn amendments_touch_one_gauge() {
        let t = tile(SoilType::Red);
        let limed = apply_amendment(&t, Amendment::Lime);
        assert_eq!(limed.nutrients, 60.0);
        assert_eq!(limed.moisture, 50.0);
        let manured = apply_amendment(&t, Amendment::Manure);
        assert_eq!(manured.nutrients, 80.0);
        let mulched = apply_amendment(&t, Amendment::Mulch);
        assert_eq!(mulched.moisture, 65.0);
        assert_eq!(mulched.nutrients, 50.0);
    }
}
