//! The closed set of skai archetypes and their static info
//!
//! Every per-archetype lookup (cost, display, category) is an exhaustive
//! match, so adding an archetype is a compile-time-checked update.

use serde::{Deserialize, Serialize};

/// Entity-type tag governing cost, display, and behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkaiArchetype {
    Human,
    Tree,
    Cow,
    WaterPatch,
    Bee,
    Fish,
    Rock,
    Flower,
    House,
    Ufo,
    Road,
    Bush,
    Wolf,
    Fire,
    Unknown,
}

/// Broad grouping used by the spawn menu and sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkaiCategory {
    Nature,
    Animal,
    Structure,
    Element,
    Unknown,
}

impl SkaiArchetype {
    /// The four archetypes every fresh world can spawn
    pub const STARTERS: [SkaiArchetype; 4] = [
        SkaiArchetype::Human,
        SkaiArchetype::Tree,
        SkaiArchetype::WaterPatch,
        SkaiArchetype::Cow,
    ];

    /// Human-readable name shown in events and notifications
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Tree => "Tree",
            Self::Cow => "Cow",
            Self::WaterPatch => "Water",
            Self::Bee => "Bee",
            Self::Fish => "Fish",
            Self::Rock => "Rock",
            Self::Flower => "Flower",
            Self::House => "House",
            Self::Ufo => "UFO",
            Self::Road => "Road",
            Self::Bush => "Bush",
            Self::Wolf => "Wolf",
            Self::Fire => "Fire",
            Self::Unknown => "???",
        }
    }

    pub fn category(&self) -> SkaiCategory {
        match self {
            Self::Human | Self::Cow | Self::Bee | Self::Fish | Self::Wolf => SkaiCategory::Animal,
            Self::Tree | Self::Rock | Self::Flower | Self::Bush => SkaiCategory::Nature,
            Self::House | Self::Road => SkaiCategory::Structure,
            Self::WaterPatch | Self::Fire => SkaiCategory::Element,
            Self::Ufo | Self::Unknown => SkaiCategory::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Human => "Curious wanderers who discover new things",
            Self::Tree => "Provides shade and spawns saplings",
            Self::Cow => "Peaceful grazers that roam the land",
            Self::WaterPatch => "Essential for fish and life",
            Self::Bee => "Pollinates flowers and produces honey",
            Self::Fish => "Swims in water patches",
            Self::Rock => "Sturdy stones scattered across the land",
            Self::Flower => "Beautiful blooms that attract bees",
            Self::House => "Shelter for humans",
            Self::Ufo => "Mysterious visitor from beyond",
            Self::Road => "Connects places together",
            Self::Bush => "Small shrubs and bushes",
            Self::Wolf => "Wild hunters of the forest",
            Self::Fire => "Warm and dangerous",
            Self::Unknown => "Something mysterious...",
        }
    }

    /// Credit cost of spawning once the free allowance is exhausted
    pub fn spawn_cost(&self) -> u32 {
        match self {
            Self::Human => 5,
            Self::Tree => 3,
            Self::Cow => 5,
            Self::WaterPatch => 4,
            Self::Bee => 4,
            Self::Fish => 4,
            Self::Rock => 2,
            Self::Flower => 3,
            Self::House => 10,
            Self::Ufo => 20,
            Self::Road => 5,
            Self::Bush => 2,
            Self::Wolf => 8,
            Self::Fire => 6,
            Self::Unknown => 0,
        }
    }

    /// Wire tag used in the persisted snapshot
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::Tree => "TREE",
            Self::Cow => "COW",
            Self::WaterPatch => "WATER_PATCH",
            Self::Bee => "BEE",
            Self::Fish => "FISH",
            Self::Rock => "ROCK",
            Self::Flower => "FLOWER",
            Self::House => "HOUSE",
            Self::Ufo => "UFO",
            Self::Road => "ROAD",
            Self::Bush => "BUSH",
            Self::Wolf => "WOLF",
            Self::Fire => "FIRE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for SkaiArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HUMAN" => Ok(Self::Human),
            "TREE" => Ok(Self::Tree),
            "COW" => Ok(Self::Cow),
            "WATER_PATCH" | "WATER" => Ok(Self::WaterPatch),
            "BEE" => Ok(Self::Bee),
            "FISH" => Ok(Self::Fish),
            "ROCK" => Ok(Self::Rock),
            "FLOWER" => Ok(Self::Flower),
            "HOUSE" => Ok(Self::House),
            "UFO" => Ok(Self::Ufo),
            "ROAD" => Ok(Self::Road),
            "BUSH" => Ok(Self::Bush),
            "WOLF" => Ok(Self::Wolf),
            "FIRE" => Ok(Self::Fire),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(format!("unknown skai archetype: {other}")),
        }
    }
}
