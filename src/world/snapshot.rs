//! Persistence surface: the six-field snapshot exchanged with the
//! storage adapter
//!
//! The adapter treats the snapshot as an opaque JSON blob; the core only
//! guarantees round-trip fidelity of these six fields. UI flags and
//! notifications are ephemeral and never persisted.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::entity::archetype::SkaiArchetype;
use crate::entity::skai::Skai;
use crate::world::events::{Bookmark, Discovery, WorldEvent, WorldStats, WorldUi};
use crate::world::store::WorldStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    #[serde(default)]
    pub entities: Vec<Skai>,
    #[serde(default)]
    pub events: Vec<WorldEvent>,
    #[serde(default)]
    pub discoveries: Vec<Discovery>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default = "starter_roster")]
    pub spawnable_types: Vec<SkaiArchetype>,
    pub stats: WorldStats,
}

fn starter_roster() -> Vec<SkaiArchetype> {
    SkaiArchetype::STARTERS.to_vec()
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl WorldStore {
    /// Current persisted view of the world
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            entities: self.entities.clone(),
            events: self.events.clone(),
            discoveries: self.discoveries.clone(),
            bookmarks: self.bookmarks.clone(),
            spawnable_types: self.spawnable_types.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Replace the persisted fields from a loaded snapshot; ephemeral
    /// state (UI flags, notifications) resets
    pub fn restore(&mut self, snapshot: WorldSnapshot) {
        self.entities = snapshot.entities;
        self.events = snapshot.events;
        self.discoveries = snapshot.discoveries;
        self.bookmarks = snapshot.bookmarks;
        self.spawnable_types = snapshot.spawnable_types;
        self.stats = snapshot.stats;
        self.ui = WorldUi::default();
        self.notifications.clear();
    }
}
