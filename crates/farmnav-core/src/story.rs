//! Built-in story chapters.
//!
//! Five chapters follow Priya across India, one region and one signature
//! crop each. Every chapter has a planting target, a care objective
//! completed by a player action, a herd size target and a points target.

use farmnav_types::{CropType, Location};
use serde::{Deserialize, Serialize};

use crate::chapter::{ChapterObjective, ObjectiveKind, ObjectiveTrigger};

/// Reward for completing a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterReward {
    /// Points added when moving on to the next chapter.
    pub bharat_points: u64,
    /// Badge name.
    pub badge: String,
    /// Crops unlocked for later chapters (display only).
    pub unlocked_crops: Vec<String>,
}

/// Static content of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDefinition {
    /// Chapter number, starting at 1.
    pub id: u32,
    /// Title.
    pub title: String,
    /// Region name as shown to the player.
    pub region: String,
    /// Location driving weather and region compatibility.
    pub location: Location,
    /// Story introduction.
    pub description: String,
    /// Crop the chapter is built around.
    pub recommended_crop: CropType,
    /// Day the calendar starts on.
    pub starting_day: u32,
    /// Objectives in their initial state.
    pub objectives: Vec<ChapterObjective>,
    /// Completion reward.
    pub reward: ChapterReward,
}

fn plant(id: &str, crop: &str, target: u64) -> ChapterObjective {
    ChapterObjective::new(
        id,
        &format!("Plant {crop} on at least {target} tiles"),
        ObjectiveKind::PlantCount,
        Some(target),
    )
}

fn herd(id: &str, description: &str, target: u64) -> ChapterObjective {
    ChapterObjective::new(id, description, ObjectiveKind::LivestockCount, Some(target))
}

fn harvest(id: &str, crop: &str, target: u64) -> ChapterObjective {
    ChapterObjective::new(
        id,
        &format!("Harvest {crop} to earn {target} Bharat Points"),
        ObjectiveKind::HarvestPoints,
        Some(target),
    )
}

fn event(id: &str, description: &str, trigger: ObjectiveTrigger) -> ChapterObjective {
    ChapterObjective::new(id, description, ObjectiveKind::EventTriggered(trigger), None)
}

fn reward(bharat_points: u64, badge: &str, unlocked: &[&str]) -> ChapterReward {
    ChapterReward {
        bharat_points,
        badge: badge.to_owned(),
        unlocked_crops: unlocked.iter().map(|s| (*s).to_owned()).collect(),
    }
}

/// The five story chapters in play order.
pub fn builtin_chapters() -> Vec<ChapterDefinition> {
    vec![
        ChapterDefinition {
            id: 1,
            title: "The Spark in the Soil".to_owned(),
            region: "Rajasthan".to_owned(),
            location: Location::Rajasthan,
            description: "In Jodhpur's arid embrace, young Priya inherits a drought-scarred millet plot. \
                          Learn about sandy soil, drought awareness, and basic land preparation in the Thar Desert."
                .to_owned(),
            recommended_crop: CropType::Ragi,
            starting_day: 1,
            objectives: vec![
                plant("plant-millet", "ragi (finger millet)", 3),
                event(
                    "water-crops",
                    "Water your crops to maintain moisture levels",
                    ObjectiveTrigger::Irrigation,
                ),
                herd("add-livestock", "Add 2 cows to your farm for integrated farming", 2),
                harvest("harvest-millet", "your ragi crop", 100),
            ],
            reward: reward(100, "Soil Sentinel", &["Bajra"]),
        },
        ChapterDefinition {
            id: 2,
            title: "Sowing Dreams".to_owned(),
            region: "Punjab".to_owned(),
            location: Location::Punjab,
            description: "Shifting to Punjab's fertile doabs, Priya revives her aunt's waterlogged paddy. \
                          Master water management, planting techniques, and weather adaptation during monsoon season."
                .to_owned(),
            recommended_crop: CropType::Rice,
            starting_day: 1,
            objectives: vec![
                plant("plant-rice", "rice", 6),
                event(
                    "irrigate-crops",
                    "Use Irrigate All to manage water during monsoon",
                    ObjectiveTrigger::Irrigation,
                ),
                herd("add-livestock", "Add 4 cows total to your farm", 4),
                harvest("harvest-rice", "rice", 150),
            ],
            reward: reward(150, "Monsoon Maestro", &["Wheat"]),
        },
        ChapterDefinition {
            id: 3,
            title: "The Gentle Rain of Care".to_owned(),
            region: "Bihar".to_owned(),
            location: Location::Bihar,
            description: "Amid Bihar's alluvial plains, Priya joins a co-op battling depleted fields. \
                          Learn nutrient planning, soil enrichment, and crop rotation with wheat farming."
                .to_owned(),
            recommended_crop: CropType::Wheat,
            starting_day: 1,
            objectives: vec![
                plant("plant-wheat", "wheat", 5),
                event(
                    "fertilize-crops",
                    "Use Fertilize All to enrich your soil with N-P-K",
                    ObjectiveTrigger::Fertilization,
                ),
                herd("add-livestock", "Add 6 cows total to your farm", 6),
                harvest("harvest-wheat", "wheat", 200),
            ],
            reward: reward(200, "Earth Enricher", &["Coffee"]),
        },
        ChapterDefinition {
            id: 4,
            title: "Guardians Against the Tiny Foes".to_owned(),
            region: "Karnataka".to_owned(),
            location: Location::Karnataka,
            description: "In Coorg's hilly haze, Priya defends tribal coffee groves. \
                          Master crop monitoring, pest control with IPM, and livestock health in humid conditions."
                .to_owned(),
            recommended_crop: CropType::Coffee,
            starting_day: 1,
            objectives: vec![
                plant("plant-coffee", "coffee", 4),
                event(
                    "pest-management",
                    "Monitor and treat any pest or disease issues",
                    ObjectiveTrigger::PestControl,
                ),
                herd("add-livestock", "Add 8 cows total to your farm", 8),
                harvest("harvest-coffee", "coffee", 250),
            ],
            reward: reward(250, "Canopy Keeper", &["Apple"]),
        },
        ChapterDefinition {
            id: 5,
            title: "Watching Wonders Grow".to_owned(),
            region: "Himachal Pradesh".to_owned(),
            location: Location::Himachal,
            description: "In Kinnaur's crisp folds, Priya orchestrates an integrated orchard. \
                          Master strategic planning, full farm balance, and create a Lohri legacy with apples and livestock."
                .to_owned(),
            recommended_crop: CropType::Apple,
            starting_day: 1,
            objectives: vec![
                plant("plant-apples", "apples", 6),
                herd("integrated-farming", "Add 10 cows total for full integration", 10),
                event(
                    "farm-balance",
                    "Use all bulk actions (Irrigate, Fertilize, Harvest All)",
                    ObjectiveTrigger::FarmBalance,
                ),
                harvest("harvest-apples", "apples", 300),
            ],
            reward: reward(300, "Bharat Harmony Master", &["All Crops Unlocked"]),
        },
    ]
}
