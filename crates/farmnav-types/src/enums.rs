//! Enumeration types for the Farm Navigator simulation.
//!
//! Every enum serializes in lowercase so persisted records and UI bindings
//! use the same spelling as the reference tables (`"sandy"`, `"monsoon"`,
//! `"westbengal"`). The [`FromStr`] impls accept the same spelling and are
//! used by the console and by YAML overrides.
//!
//! [`FromStr`]: core::str::FromStr

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {input}")]
pub struct ParseEnumError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

/// Implements `as_str`, `Display`, `FromStr` and an `ALL` table for a
/// fieldless enum from a single `Variant => "name"` list.
macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The canonical lowercase name of this variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_lowercase();
                match lowered.as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        input: s.to_owned(),
                    }),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Land
// ---------------------------------------------------------------------------

/// Soil family of the farm. Chosen once per session and copied into
/// every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SoilType {
    /// Low retention, fast drainage. Suits millets.
    Sandy,
    /// River-deposited, fertile, high retention.
    Alluvial,
    /// Balanced texture and nutrients.
    Loamy,
    /// Acidic, iron-rich, well drained.
    Laterite,
    /// Very high retention, poor drainage.
    Clay,
    /// Nutrient-rich regur soil.
    Black,
    /// Iron-rich, well drained.
    Red,
}

string_enum!(SoilType, "soil type", {
    Sandy => "sandy",
    Alluvial => "alluvial",
    Loamy => "loamy",
    Laterite => "laterite",
    Clay => "clay",
    Black => "black",
    Red => "red",
});

/// A crop that can be planted on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CropType {
    /// Finger millet.
    Ragi,
    /// Paddy rice.
    Rice,
    /// Wheat.
    Wheat,
    /// Coffee.
    Coffee,
    /// Apple orchard.
    Apple,
    /// Pearl millet.
    Bajra,
}

string_enum!(CropType, "crop", {
    Ragi => "ragi",
    Rice => "rice",
    Wheat => "wheat",
    Coffee => "coffee",
    Apple => "apple",
    Bajra => "bajra",
});

/// A companion planted alongside a main crop for intercropping advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Companion {
    /// Nitrogen-fixing pulses.
    Legume,
    /// Mustard.
    Mustard,
    /// Fish raised in flooded paddies.
    Fish,
}

string_enum!(Companion, "companion", {
    Legume => "legume",
    Mustard => "mustard",
    Fish => "fish",
});

/// A soil amendment the player can apply to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Amendment {
    /// Agricultural lime.
    Lime,
    /// Farmyard manure.
    Manure,
    /// N-P-K fertilizer.
    Fertilizer,
    /// Surface mulch.
    Mulch,
}

string_enum!(Amendment, "amendment", {
    Lime => "lime",
    Manure => "manure",
    Fertilizer => "fertilizer",
    Mulch => "mulch",
});

/// Geographic region of the farm. Each region has a climate profile and a
/// preferred soil set in the reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Location {
    /// Jodhpur, Thar desert.
    Rajasthan,
    /// Punjab doabs.
    Punjab,
    /// Gangetic plains.
    Bihar,
    /// Coorg highlands.
    Karnataka,
    /// Kinnaur valley.
    Himachal,
    /// Coimbatore.
    TamilNadu,
    /// Saurashtra.
    Gujarat,
    /// Darjeeling hills.
    WestBengal,
}

string_enum!(Location, "location", {
    Rajasthan => "rajasthan",
    Punjab => "punjab",
    Bihar => "bihar",
    Karnataka => "karnataka",
    Himachal => "himachal",
    TamilNadu => "tamilnadu",
    Gujarat => "gujarat",
    WestBengal => "westbengal",
});

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Daily weather classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum WeatherCondition {
    /// Clear skies.
    Sunny,
    /// Moderate rain.
    Rainy,
    /// Overcast, possible light showers.
    Cloudy,
    /// No rain at all.
    Drought,
    /// Heavy monsoon rain.
    Monsoon,
}

string_enum!(WeatherCondition, "weather condition", {
    Sunny => "sunny",
    Rainy => "rainy",
    Cloudy => "cloudy",
    Drought => "drought",
    Monsoon => "monsoon",
});

impl WeatherCondition {
    /// Player-facing description of the condition.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sunny => "Clear skies with abundant sunshine",
            Self::Rainy => "Moderate rainfall expected",
            Self::Cloudy => "Overcast with possible light showers",
            Self::Drought => "Extremely dry conditions, water conservation critical",
            Self::Monsoon => "Heavy monsoon rains, flooding risk",
        }
    }
}

// ---------------------------------------------------------------------------
// Livestock
// ---------------------------------------------------------------------------

/// Livestock species available for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Species {
    /// Gir/Sahiwal dairy cow.
    Cow,
    /// Murrah water buffalo.
    Buffalo,
    /// Jamunapari/Beetal goat.
    Goat,
    /// Kadaknath desi chicken.
    Chicken,
}

string_enum!(Species, "species", {
    Cow => "cow",
    Buffalo => "buffalo",
    Goat => "goat",
    Chicken => "chicken",
});

/// What a livestock species produces each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ProductKind {
    /// Milk, in liters.
    Milk,
    /// Eggs.
    Eggs,
    /// Meat. No species produces it daily, so it earns no points.
    Meat,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Difficulty profile of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum GameMode {
    /// Guided chapters with softened penalties and rarer pests.
    #[default]
    Story,
    /// Free play with full penalties and no objectives.
    Sandbox,
}

string_enum!(GameMode, "game mode", {
    Story => "story",
    Sandbox => "sandbox",
});

impl GameMode {
    /// Whether this is the guided story mode.
    pub const fn is_story(self) -> bool {
        matches!(self, Self::Story)
    }
}
