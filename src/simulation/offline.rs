//! Offline catch-up: compressed replay of the time the world was not
//! being watched
//!
//! Elapsed wall-clock time is halved and capped, then replayed as
//! fixed-size behavior steps with discovery and sapling cycles woven in
//! on coarser strides.

use crate::core::clock;
use crate::core::config;
use crate::simulation::behaviour::tick_behaviours;
use crate::simulation::discovery::{check_discoveries, maybe_spawn_saplings};
use crate::world::events::WorldEventCategory;
use crate::world::store::WorldStore;

/// Bounded replay schedule for an offline gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchUpPlan {
    /// Compressed simulated duration, after the speed factor and ceiling
    pub simulated_seconds: f64,
    /// Number of fixed-size behavior steps to replay
    pub steps: u32,
}

/// Compress an elapsed gap into a replay schedule.
///
/// Gaps under a minute are not worth simulating and yield `None`.
pub fn plan_catch_up(elapsed_seconds: u64) -> Option<CatchUpPlan> {
    if elapsed_seconds < config::OFFLINE_MIN_GAP_SECONDS {
        return None;
    }
    let simulated_seconds =
        (elapsed_seconds as f64 * config::OFFLINE_SPEED_FACTOR).min(config::MAX_OFFLINE_SECONDS);
    let steps = (simulated_seconds / config::OFFLINE_STEP_SECONDS).floor() as u32;
    Some(CatchUpPlan {
        simulated_seconds,
        steps,
    })
}

/// Run the catch-up replay for the time since `last_seen_at`.
///
/// Invoked once on cold start and once on each resume from background,
/// before normal ticking begins. Always stamps `last_seen_at` when a
/// replay ran; sub-minute gaps leave the world untouched.
pub fn simulate_offline_progress(store: &mut WorldStore) {
    let now = clock::now_ms();
    let elapsed_seconds = now.saturating_sub(store.stats.last_seen_at) / 1000;

    let Some(plan) = plan_catch_up(elapsed_seconds) else {
        return;
    };

    for step in 0..plan.steps {
        tick_behaviours(store, config::OFFLINE_STEP_SECONDS as f32);
        if step % config::OFFLINE_DISCOVERY_STRIDE == 0 {
            check_discoveries(store);
        }
        if step % config::OFFLINE_SAPLING_STRIDE == 0 {
            maybe_spawn_saplings(store);
        }
    }

    let minutes = (plan.simulated_seconds / 60.0).floor() as u64;
    let seconds = (plan.simulated_seconds % 60.0).floor() as u64;
    if minutes > 0 {
        tracing::info!(minutes, seconds, steps = plan.steps, "offline catch-up complete");
        store.register_event(
            format!("Your world continued while you were away: {minutes}m {seconds}s passed"),
            WorldEventCategory::System,
        );
    }

    store.stats.last_seen_at = now;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_gaps_are_skipped() {
        assert_eq!(plan_catch_up(0), None);
        assert_eq!(plan_catch_up(59), None);
    }

    #[test]
    fn test_compression_halves_elapsed_time() {
        let plan = plan_catch_up(600).unwrap();
        assert_eq!(plan.simulated_seconds, 300.0);
        assert_eq!(plan.steps, 60);
    }

    #[test]
    fn test_ceiling_bounds_long_gaps() {
        // ten hours away still replays at most two simulated hours
        let plan = plan_catch_up(10 * 3600).unwrap();
        assert_eq!(plan.simulated_seconds, 7200.0);
        assert_eq!(plan.steps, 1440);

        // a week away hits the same ceiling
        let week = plan_catch_up(7 * 24 * 3600).unwrap();
        assert_eq!(week, plan);
    }

    #[test]
    fn test_minimum_gap_produces_steps() {
        let plan = plan_catch_up(60).unwrap();
        assert_eq!(plan.simulated_seconds, 30.0);
        assert_eq!(plan.steps, 6);
    }
}
