//! The skai entity - a single simulated inhabitant of the world

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Vec2};
use crate::entity::archetype::SkaiArchetype;

/// Coarse behavioral state, tracked for archetypes that wander
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkaiMood {
    Idle,
    Moving,
    Resting,
    Curious,
}

/// A simulated entity owned exclusively by the world store
///
/// Dead entities are never stepped by the behavior system and never match
/// the discovery engine's proximity scan. No code path currently clears
/// `alive`; the flag and the DEATH event category exist for
/// forward-compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skai {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub archetype: SkaiArchetype,
    pub x: f32,
    pub y: f32,
    pub created_at: u64,
    pub alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<SkaiMood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_discovery_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_speed: Option<f32>,
}

impl Skai {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Current movement target, if both coordinates are set
    pub fn target(&self) -> Option<Vec2> {
        match (self.target_x, self.target_y) {
            (Some(x), Some(y)) => Some(Vec2::new(x, y)),
            _ => None,
        }
    }

    pub fn set_target(&mut self, target: Option<Vec2>) {
        match target {
            Some(t) => {
                self.target_x = Some(t.x);
                self.target_y = Some(t.y);
            }
            None => {
                self.target_x = None;
                self.target_y = None;
            }
        }
    }
}
