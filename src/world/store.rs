//! The authoritative world state and its mutators
//!
//! The store exclusively owns every collection in the simulated world.
//! All mutators are synchronous and atomic with respect to each other:
//! the driver invokes them sequentially and nothing preempts between
//! calls, so callers never observe a half-updated view.
//!
//! Domain failures are soft refusals - an operation either performs its
//! effect and signals success, or performs no effect (optionally raising
//! a notification). Nothing in here panics or returns an error.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::clock;
use crate::core::config;
use crate::core::types::{BookmarkId, DiscoveryId, EntityId, EventId, NotificationId, Vec2};
use crate::entity::archetype::SkaiArchetype;
use crate::entity::skai::{Skai, SkaiMood};
use crate::world::events::{
    Bookmark, Discovery, Notification, WorldEvent, WorldEventCategory, WorldStats, WorldUi,
};

/// The simulated world: entities, history, progression, and UI flags
pub struct WorldStore {
    pub entities: Vec<Skai>,
    pub events: Vec<WorldEvent>,
    pub discoveries: Vec<Discovery>,
    pub stats: WorldStats,
    pub bookmarks: Vec<Bookmark>,
    pub ui: WorldUi,
    pub notifications: Vec<Notification>,
    pub spawnable_types: Vec<SkaiArchetype>,
    pub(crate) rng: ChaCha8Rng,
}

impl WorldStore {
    /// Empty store with fresh stats; call [`create_world`] for the full
    /// welcome sequence
    ///
    /// [`create_world`]: WorldStore::create_world
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Deterministic store for tests: every stochastic path draws from
    /// the seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: ChaCha8Rng) -> Self {
        let stats = WorldStats::generate(&mut rng, clock::now_ms());
        Self {
            entities: Vec::new(),
            events: Vec::new(),
            discoveries: Vec::new(),
            stats,
            bookmarks: Vec::new(),
            ui: WorldUi::default(),
            notifications: Vec::new(),
            spawnable_types: SkaiArchetype::STARTERS.to_vec(),
            rng,
        }
    }

    // === WORLD LIFECYCLE ===

    /// Wipe all collections, regenerate stats, and seed the starter world
    pub fn create_world(&mut self) {
        self.entities.clear();
        self.events.clear();
        self.discoveries.clear();
        self.bookmarks.clear();
        self.notifications.clear();
        self.stats = WorldStats::generate(&mut self.rng, clock::now_ms());
        self.spawnable_types = SkaiArchetype::STARTERS.to_vec();

        tracing::info!(
            daily_limit = self.stats.daily_discovery_limit,
            "created a fresh world"
        );
        self.register_event(
            "A new world has begun. Welcome to Idleverse!",
            WorldEventCategory::System,
        );

        self.spawn_skai(SkaiArchetype::Tree, Some(-100.0), Some(100.0));
        self.spawn_skai(SkaiArchetype::Human, Some(0.0), Some(0.0));
    }

    /// Full wipe, not a rollback
    pub fn reset_world(&mut self) {
        self.create_world();
    }

    // === ENTITIES ===

    /// Spawn a skai, consuming a free spawn if any remain, otherwise
    /// debiting credits by the archetype's cost.
    ///
    /// Refuses softly (notification, `None`) when neither resource
    /// covers the spawn.
    pub fn spawn_skai(
        &mut self,
        archetype: SkaiArchetype,
        x: Option<f32>,
        y: Option<f32>,
    ) -> Option<EntityId> {
        let cost = archetype.spawn_cost();
        if self.stats.free_spawns_remaining == 0 && self.stats.credits < cost {
            self.add_notification("Not enough spawns or credits!");
            return None;
        }

        if self.stats.free_spawns_remaining > 0 {
            self.stats.free_spawns_remaining -= 1;
        } else {
            self.stats.credits -= cost;
        }
        self.stats.total_spawns_used += 1;

        let half = config::SPAWN_AREA_HALF_EXTENT;
        let skai = Skai {
            id: EntityId::new(),
            archetype,
            x: x.unwrap_or_else(|| self.rng.gen_range(-half..half)),
            y: y.unwrap_or_else(|| self.rng.gen_range(-half..half)),
            created_at: clock::now_ms(),
            alive: true,
            mood: Some(SkaiMood::Idle),
            last_discovery_at: None,
            label: None,
            target_x: None,
            target_y: None,
            move_speed: Some(
                self.rng
                    .gen_range(config::SPAWN_SPEED_MIN..config::SPAWN_SPEED_MAX),
            ),
        };
        let id = skai.id;
        self.entities.push(skai);

        self.register_event(
            format!("Spawned a {}", archetype.display_name()),
            WorldEventCategory::Spawn,
        );
        Some(id)
    }

    /// Targeted position update; no-op if the id is unknown
    pub fn move_skai(&mut self, id: EntityId, x: f32, y: f32) {
        if let Some(skai) = self.entities.iter_mut().find(|e| e.id == id) {
            skai.x = x;
            skai.y = y;
        }
    }

    pub fn update_skai_mood(&mut self, id: EntityId, mood: SkaiMood) {
        if let Some(skai) = self.entities.iter_mut().find(|e| e.id == id) {
            skai.mood = Some(mood);
        }
    }

    pub fn update_skai_target(&mut self, id: EntityId, target_x: f32, target_y: f32) {
        if let Some(skai) = self.entities.iter_mut().find(|e| e.id == id) {
            skai.set_target(Some(Vec2::new(target_x, target_y)));
        }
    }

    /// Record that a trigger entity just produced a discovery
    pub fn stamp_last_discovery(&mut self, id: EntityId, at_ms: u64) {
        if let Some(skai) = self.entities.iter_mut().find(|e| e.id == id) {
            skai.last_discovery_at = Some(at_ms);
        }
    }

    pub fn skai(&self, id: EntityId) -> Option<&Skai> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Living entities, the only ones behavior and discovery ever see
    pub fn living(&self) -> impl Iterator<Item = &Skai> {
        self.entities.iter().filter(|e| e.alive)
    }

    // === TICKING ===

    /// Per-frame housekeeping: stamps `last_seen_at`, expires a finished
    /// speed boost, and prunes stale notifications.
    ///
    /// Does not move entities - that is the behavior stepper's job,
    /// invoked by the driver in the same tick.
    pub fn tick_world(&mut self, _delta_seconds: f32) {
        let now = clock::now_ms();
        self.stats.last_seen_at = now;

        if self.ui.is_speed_boost_active {
            let expired = self.ui.speed_boost_ends_at.is_some_and(|ends| now >= ends);
            if expired {
                self.ui.is_speed_boost_active = false;
                self.ui.speed_multiplier = 1.0;
                self.ui.speed_boost_ends_at = None;
                self.register_event("World returned to normal speed", WorldEventCategory::System);
            }
        }

        self.notifications
            .retain(|n| now.saturating_sub(n.created_at) < config::NOTIFICATION_TTL_MS);
    }

    // === EVENT LEDGER ===

    /// Append to the activity ledger, newest first.
    ///
    /// An identical message registered within the dedup window increments
    /// the existing entry's count instead of appending. The ledger holds
    /// at most EVENT_LOG_CAP entries; insertion evicts the oldest.
    pub fn register_event(&mut self, message: impl Into<String>, category: WorldEventCategory) {
        let message = message.into();
        let now = clock::now_ms();

        if let Some(recent) = self.events.iter_mut().find(|e| {
            e.message == message
                && now.saturating_sub(e.created_at) < config::EVENT_DEDUP_WINDOW_MS
        }) {
            recent.count += 1;
            return;
        }

        self.events.insert(
            0,
            WorldEvent {
                id: EventId::new(),
                category,
                message,
                created_at: now,
                count: 1,
            },
        );
        self.events.truncate(config::EVENT_LOG_CAP);
    }

    // === DISCOVERIES ===

    pub fn is_discovered(&self, archetype: SkaiArchetype) -> bool {
        self.discoveries.iter().any(|d| d.archetype == archetype)
    }

    /// Register a discovery for `archetype`.
    ///
    /// Returns false without effect when today's count has reached the
    /// daily cap (checked after the daily reset) or when the archetype
    /// already has a discovery record.
    pub fn register_discovery(
        &mut self,
        archetype: SkaiArchetype,
        source_description: impl Into<String>,
    ) -> bool {
        self.check_daily_reset();

        if self.stats.discoveries_today >= self.stats.daily_discovery_limit {
            return false;
        }
        if self.is_discovered(archetype) {
            return false;
        }

        let source_description = source_description.into();
        let name = archetype.display_name();
        let event_message = format!("New discovery: {name} ({source_description})");

        tracing::debug!(?archetype, "registered discovery");
        self.discoveries.push(Discovery {
            id: DiscoveryId::new(),
            archetype,
            discovered_at: clock::now_ms(),
            source_description,
            claimed: false,
        });
        self.stats.discoveries_today += 1;

        self.register_event(event_message, WorldEventCategory::Discovery);
        self.add_notification(format!("Discovered: {name}!"));
        true
    }

    /// Claim a discovery, adding its archetype to the spawnable roster.
    ///
    /// No-op if the id is unknown or the discovery was already claimed.
    pub fn claim_discovery(&mut self, id: DiscoveryId) {
        let Some(discovery) = self.discoveries.iter_mut().find(|d| d.id == id) else {
            return;
        };
        if discovery.claimed {
            return;
        }
        discovery.claimed = true;
        let archetype = discovery.archetype;

        self.spawnable_types.push(archetype);
        self.register_event(
            format!("{} added to spawn menu", archetype.display_name()),
            WorldEventCategory::System,
        );
        self.add_notification(format!("{} unlocked!", archetype.display_name()));
    }

    /// Zero the daily discovery counter when the calendar day has
    /// changed since the last reset.
    ///
    /// Must run before any comparison against the daily cap.
    pub fn check_daily_reset(&mut self) {
        let today = clock::today_stamp();
        if self.stats.last_discovery_reset != today {
            self.stats.discoveries_today = 0;
            self.stats.last_discovery_reset = today;
        }
    }

    // === BOOKMARKS ===

    pub fn set_bookmark(
        &mut self,
        label: impl Into<String>,
        x: f32,
        y: f32,
        entity_id: Option<EntityId>,
    ) -> BookmarkId {
        let label = label.into();
        let id = BookmarkId::new();
        self.bookmarks.push(Bookmark {
            id,
            label: label.clone(),
            x,
            y,
            entity_id,
        });
        self.add_notification(format!("Bookmark \"{label}\" created"));
        id
    }

    pub fn delete_bookmark(&mut self, id: BookmarkId) {
        self.bookmarks.retain(|b| b.id != id);
    }

    // === SPEED BOOST ===

    /// Purchase a temporary speed multiplier.
    ///
    /// Refuses softly (notification only) when credits are short. Expiry
    /// is a timestamp checked by `tick_world`, not a scheduled timer.
    pub fn apply_speed_boost(&mut self, multiplier: f32, duration_minutes: u32) {
        if self.stats.credits < config::SPEED_BOOST_COST {
            self.add_notification("Not enough credits!");
            return;
        }
        self.stats.credits -= config::SPEED_BOOST_COST;

        self.ui.is_speed_boost_active = true;
        self.ui.speed_multiplier = multiplier;
        self.ui.speed_boost_ends_at =
            Some(clock::now_ms() + u64::from(duration_minutes) * 60_000);

        self.register_event(
            format!("World speed increased {multiplier}x for {duration_minutes} minutes"),
            WorldEventCategory::System,
        );
        self.add_notification("Speed boost activated!");
    }

    // === NOTIFICATIONS ===

    /// Raise an advisory message; `tick_world` removes it after its
    /// fixed lifetime
    pub fn add_notification(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            id: NotificationId::new(),
            message: message.into(),
            created_at: clock::now_ms(),
        });
    }

    pub fn clear_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|n| n.id != id);
    }

    // === STATS & UI ===

    /// Apply a partial update to the world stats
    pub fn update_stats(&mut self, apply: impl FnOnce(&mut WorldStats)) {
        apply(&mut self.stats);
    }

    pub fn toggle_activity(&mut self) {
        self.ui.is_activity_open = !self.ui.is_activity_open;
    }

    pub fn toggle_new_skai(&mut self) {
        self.ui.is_new_skai_open = !self.ui.is_new_skai_open;
    }

    pub fn toggle_spawn_menu(&mut self) {
        self.ui.is_spawn_menu_open = !self.ui.is_spawn_menu_open;
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}
