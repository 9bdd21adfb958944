//! World-state record types: events, discoveries, stats, bookmarks,
//! notifications, and ephemeral UI flags

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::clock;
use crate::core::config;
use crate::core::types::{BookmarkId, DiscoveryId, EntityId, EventId, NotificationId};
use crate::entity::archetype::SkaiArchetype;

/// Taxonomy of world-log entries
///
/// DEATH is reserved: nothing in the simulation currently emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorldEventCategory {
    Discovery,
    Spawn,
    Death,
    System,
}

/// One entry in the rolling activity ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldEvent {
    pub id: EventId,
    pub category: WorldEventCategory,
    pub message: String,
    pub created_at: u64,
    #[serde(default = "default_event_count")]
    pub count: u32,
}

fn default_event_count() -> u32 {
    1
}

/// A one-time archetype unlock awaiting (or past) its claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discovery {
    pub id: DiscoveryId,
    #[serde(rename = "type")]
    pub archetype: SkaiArchetype,
    pub discovered_at: u64,
    pub source_description: String,
    pub claimed: bool,
}

/// Aggregate world progression counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldStats {
    pub created_at: u64,
    pub last_seen_at: u64,
    pub total_spawns_used: u32,
    pub free_spawns_remaining: u32,
    pub daily_discovery_limit: u32,
    pub discoveries_today: u32,
    pub credits: u32,
    /// Day-stamp of the last daily reset; compared against today before
    /// any cap check
    pub last_discovery_reset: String,
}

impl WorldStats {
    /// Fresh stats for a newly created world
    pub fn generate(rng: &mut impl Rng, now_ms: u64) -> Self {
        Self {
            created_at: now_ms,
            last_seen_at: now_ms,
            total_spawns_used: 0,
            free_spawns_remaining: config::STARTING_FREE_SPAWNS,
            daily_discovery_limit: rng.gen_range(
                config::DAILY_DISCOVERY_LIMIT_MIN..=config::DAILY_DISCOVERY_LIMIT_MAX,
            ),
            discoveries_today: 0,
            credits: config::STARTING_CREDITS,
            last_discovery_reset: clock::day_stamp(now_ms),
        }
    }
}

/// User annotation pinned to a world position, no simulation effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: BookmarkId,
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityId>,
}

/// Ephemeral presentation flags, colocated with the store but never
/// simulation-authoritative and never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct WorldUi {
    pub is_activity_open: bool,
    pub is_new_skai_open: bool,
    pub is_spawn_menu_open: bool,
    pub is_speed_boost_active: bool,
    pub speed_multiplier: f32,
    pub speed_boost_ends_at: Option<u64>,
}

impl Default for WorldUi {
    fn default() -> Self {
        Self {
            is_activity_open: false,
            is_new_skai_open: false,
            is_spawn_menu_open: false,
            is_speed_boost_active: false,
            speed_multiplier: 1.0,
            speed_boost_ends_at: None,
        }
    }
}

/// Short-lived advisory message; expires NOTIFICATION_TTL_MS after raise
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub created_at: u64,
}
