//! Simulation tuning constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

// === SPAWN ECONOMY ===

/// Free spawns granted to a fresh world
///
/// Consumed before credits; never refilled until a world reset.
pub const STARTING_FREE_SPAWNS: u32 = 25;

/// Credit balance of a fresh world
pub const STARTING_CREDITS: u32 = 200;

/// Random spawn positions fall uniformly in this half-extent on each axis
pub const SPAWN_AREA_HALF_EXTENT: f32 = 200.0;

/// Per-entity move speed is rolled uniformly in [MIN, MAX)
pub const SPAWN_SPEED_MIN: f32 = 10.0;
pub const SPAWN_SPEED_MAX: f32 = 30.0;

// === DISCOVERY SYSTEM ===

/// Daily discovery cap is rolled uniformly in [MIN, MAX] at world creation
pub const DAILY_DISCOVERY_LIMIT_MIN: u32 = 3;
pub const DAILY_DISCOVERY_LIMIT_MAX: u32 = 10;

/// Straight-line distance within which discovery rules consider two
/// entities co-located
pub const DISCOVERY_PROXIMITY_RADIUS: f32 = 200.0;

/// A trigger entity cannot produce another discovery until this much time
/// has passed since its last one
pub const DISCOVERY_COOLDOWN_MS: u64 = 30_000;

/// Flat per-cycle chance of the UFO appearing with no trigger requirement
pub const UFO_DISCOVERY_CHANCE: f64 = 0.02;

/// Per-invocation chance that an existing tree seeds a sapling
pub const SAPLING_SPAWN_CHANCE: f64 = 0.05;

/// Saplings land within ±SAPLING_SCATTER/2 of the parent tree on each axis
pub const SAPLING_SCATTER: f32 = 120.0;

// === EVENT LEDGER ===

/// Identical messages registered within this window merge into one entry
/// with an incremented repeat count
pub const EVENT_DEDUP_WINDOW_MS: u64 = 5_000;

/// Maximum retained events, newest first; older entries are evicted
pub const EVENT_LOG_CAP: usize = 50;

// === NOTIFICATIONS & BOOSTS ===

/// Notifications expire this long after being raised, independent of
/// simulation speed
pub const NOTIFICATION_TTL_MS: u64 = 3_000;

/// Credit cost of a speed boost purchase
pub const SPEED_BOOST_COST: u32 = 20;

// === OFFLINE CATCH-UP ===

/// Gaps shorter than this are not worth simulating
pub const OFFLINE_MIN_GAP_SECONDS: u64 = 60;

/// Offline time accrues at this fraction of foreground speed
pub const OFFLINE_SPEED_FACTOR: f64 = 0.5;

/// Ceiling on compressed offline time, bounding catch-up cost
pub const MAX_OFFLINE_SECONDS: f64 = 2.0 * 60.0 * 60.0;

/// Simulated seconds advanced per catch-up step
pub const OFFLINE_STEP_SECONDS: f64 = 5.0;

/// Discovery evaluation runs every Nth catch-up step
pub const OFFLINE_DISCOVERY_STRIDE: u32 = 12;

/// Sapling growth runs every Nth catch-up step
pub const OFFLINE_SAPLING_STRIDE: u32 = 20;
