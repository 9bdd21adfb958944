//! Per-archetype seek-arrive steering
//!
//! Four archetypes wander: pick a random target near the current
//! position, walk straight at it, and on arrival either rest (humans and
//! cows, by chance) or pick the next target. No steering smoothing, no
//! obstacle avoidance, no collision.

use rand::Rng;

use crate::core::types::Vec2;
use crate::entity::archetype::SkaiArchetype;
use crate::entity::skai::{Skai, SkaiMood};
use crate::world::store::WorldStore;

/// Partial update produced by one behavior step
///
/// `target` distinguishes "leave unchanged" (None) from "set" and
/// "clear" (Some(Some)/Some(None)).
#[derive(Debug, Default, PartialEq)]
pub struct SkaiUpdate {
    pub position: Option<Vec2>,
    pub mood: Option<SkaiMood>,
    pub target: Option<Option<Vec2>>,
}

/// Archetype-specific seek-arrive tuning
struct Steering {
    wander_radius: f32,
    arrive_threshold: f32,
    /// Chance of switching to RESTING on arrival; 0 means never rest
    rest_chance: f64,
    /// Fallback when the entity has no speed of its own
    default_speed: f32,
    /// Whether this archetype tracks mood at all
    tracks_mood: bool,
    /// Whether re-picking a target after arrival marks MOVING again
    mood_on_repick: bool,
}

const HUMAN_STEERING: Steering = Steering {
    wander_radius: 150.0,
    arrive_threshold: 5.0,
    rest_chance: 0.3,
    default_speed: 15.0,
    tracks_mood: true,
    mood_on_repick: true,
};

const BEE_STEERING: Steering = Steering {
    wander_radius: 100.0,
    arrive_threshold: 3.0,
    rest_chance: 0.0,
    default_speed: 25.0,
    tracks_mood: false,
    mood_on_repick: false,
};

const COW_STEERING: Steering = Steering {
    wander_radius: 80.0,
    arrive_threshold: 5.0,
    rest_chance: 0.4,
    default_speed: 10.0,
    tracks_mood: true,
    mood_on_repick: false,
};

const FISH_STEERING: Steering = Steering {
    wander_radius: 60.0,
    arrive_threshold: 3.0,
    rest_chance: 0.0,
    default_speed: 20.0,
    tracks_mood: false,
    mood_on_repick: false,
};

/// Advance one entity by one time delta.
///
/// Dead entities and archetypes without steering produce an empty
/// update.
pub fn step_skai(skai: &Skai, delta_seconds: f32, rng: &mut impl Rng) -> SkaiUpdate {
    if !skai.alive {
        return SkaiUpdate::default();
    }

    match skai.archetype {
        SkaiArchetype::Human => seek_arrive(skai, delta_seconds, rng, &HUMAN_STEERING),
        SkaiArchetype::Bee => seek_arrive(skai, delta_seconds, rng, &BEE_STEERING),
        SkaiArchetype::Cow => seek_arrive(skai, delta_seconds, rng, &COW_STEERING),
        SkaiArchetype::Fish => seek_arrive(skai, delta_seconds, rng, &FISH_STEERING),
        SkaiArchetype::Tree
        | SkaiArchetype::WaterPatch
        | SkaiArchetype::Rock
        | SkaiArchetype::Flower
        | SkaiArchetype::House
        | SkaiArchetype::Ufo
        | SkaiArchetype::Road
        | SkaiArchetype::Bush
        | SkaiArchetype::Wolf
        | SkaiArchetype::Fire
        | SkaiArchetype::Unknown => SkaiUpdate::default(),
    }
}

fn wander_target(from: Vec2, radius: f32, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        from.x + (rng.gen::<f32>() - 0.5) * radius,
        from.y + (rng.gen::<f32>() - 0.5) * radius,
    )
}

fn seek_arrive(
    skai: &Skai,
    delta_seconds: f32,
    rng: &mut impl Rng,
    steering: &Steering,
) -> SkaiUpdate {
    let mut update = SkaiUpdate::default();
    let position = skai.position();

    let target = match skai.target() {
        Some(t) => t,
        None => {
            let t = wander_target(position, steering.wander_radius, rng);
            update.target = Some(Some(t));
            if steering.tracks_mood {
                update.mood = Some(SkaiMood::Moving);
            }
            t
        }
    };

    let delta = target - position;
    let distance = delta.length();

    if distance < steering.arrive_threshold {
        if steering.rest_chance > 0.0 && rng.gen_bool(steering.rest_chance) {
            update.mood = Some(SkaiMood::Resting);
            update.target = Some(None);
        } else {
            let next = wander_target(position, steering.wander_radius, rng);
            update.target = Some(Some(next));
            if steering.tracks_mood && steering.mood_on_repick {
                update.mood = Some(SkaiMood::Moving);
            }
        }
    } else {
        let step = skai.move_speed.unwrap_or(steering.default_speed) * delta_seconds;
        update.position = Some(position + delta * (step / distance));
    }

    update
}

/// Step every living entity once and apply the updates wholesale.
///
/// This is a full-population scan; entities may overlap and no spatial
/// partitioning is used.
pub fn tick_behaviours(store: &mut WorldStore, delta_seconds: f32) {
    let WorldStore { entities, rng, .. } = store;

    for skai in entities.iter_mut() {
        if !skai.alive {
            continue;
        }
        let update = step_skai(skai, delta_seconds, rng);
        if let Some(position) = update.position {
            skai.x = position.x;
            skai.y = position.y;
        }
        if let Some(mood) = update.mood {
            skai.mood = Some(mood);
        }
        if let Some(target) = update.target {
            skai.set_target(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wanderer(archetype: SkaiArchetype) -> Skai {
        Skai {
            id: EntityId::new(),
            archetype,
            x: 0.0,
            y: 0.0,
            created_at: 0,
            alive: true,
            mood: Some(SkaiMood::Idle),
            last_discovery_at: None,
            label: None,
            target_x: None,
            target_y: None,
            move_speed: Some(15.0),
        }
    }

    #[test]
    fn test_dead_skai_is_skipped() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut skai = wanderer(SkaiArchetype::Human);
        skai.alive = false;

        let update = step_skai(&skai, 0.033, &mut rng);
        assert_eq!(update, SkaiUpdate::default());
    }

    #[test]
    fn test_static_archetypes_never_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for archetype in [SkaiArchetype::Tree, SkaiArchetype::Rock, SkaiArchetype::House] {
            let skai = wanderer(archetype);
            let update = step_skai(&skai, 1.0, &mut rng);
            assert_eq!(update, SkaiUpdate::default());
        }
    }

    #[test]
    fn test_idle_human_picks_target_and_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let skai = wanderer(SkaiArchetype::Human);

        let update = step_skai(&skai, 0.1, &mut rng);
        match update.target {
            // wander target lands within ±radius/2 of the current position
            Some(Some(target)) => {
                assert!(target.x.abs() <= 75.0);
                assert!(target.y.abs() <= 75.0);
                assert_eq!(update.mood, Some(SkaiMood::Moving));
            }
            // the fresh target can land inside the arrival threshold, in
            // which case the human may immediately rest
            Some(None) => assert_eq!(update.mood, Some(SkaiMood::Resting)),
            None => panic!("idle human must pick a target"),
        }
    }

    #[test]
    fn test_movement_steps_toward_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut skai = wanderer(SkaiArchetype::Human);
        skai.set_target(Some(Vec2::new(100.0, 0.0)));

        let update = step_skai(&skai, 1.0, &mut rng);
        let position = update.position.expect("moved");
        // speed 15 for 1s straight along +x
        assert!((position.x - 15.0).abs() < 1e-4);
        assert!(position.y.abs() < 1e-4);
        assert_eq!(update.target, None);
    }

    #[test]
    fn test_move_speed_fallback_to_archetype_default() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut skai = wanderer(SkaiArchetype::Fish);
        skai.move_speed = None;
        skai.set_target(Some(Vec2::new(0.0, 50.0)));

        let update = step_skai(&skai, 1.0, &mut rng);
        let position = update.position.expect("moved");
        assert!((position.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_arrival_resolves_to_rest_or_repick() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut skai = wanderer(SkaiArchetype::Human);
        skai.set_target(Some(Vec2::new(1.0, 0.0)));

        let mut rested = false;
        let mut repicked = false;
        for _ in 0..200 {
            let update = step_skai(&skai, 0.1, &mut rng);
            match update.target {
                Some(None) => {
                    assert_eq!(update.mood, Some(SkaiMood::Resting));
                    rested = true;
                }
                Some(Some(next)) => {
                    assert_eq!(update.mood, Some(SkaiMood::Moving));
                    assert!((next.x - skai.x).abs() <= 75.0);
                    repicked = true;
                }
                None => panic!("arrival must resolve the target"),
            }
        }
        assert!(rested, "30% rest chance should fire within 200 arrivals");
        assert!(repicked, "70% repick chance should fire within 200 arrivals");
    }

    #[test]
    fn test_fish_never_touches_mood() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut skai = wanderer(SkaiArchetype::Fish);

        for _ in 0..300 {
            let update = step_skai(&skai, 0.5, &mut rng);
            assert_eq!(update.mood, None);
            if let Some(position) = update.position {
                skai.x = position.x;
                skai.y = position.y;
            }
            if let Some(target) = update.target {
                skai.set_target(target);
            }
        }
    }

    #[test]
    fn test_tick_behaviours_moves_population() {
        let mut store = WorldStore::with_seed(11);
        store.create_world();
        let human_before = store.entities[1].position();
        let tree_before = store.entities[0].position();

        for _ in 0..30 {
            tick_behaviours(&mut store, 0.1);
        }

        let human_after = store.entities[1].position();
        let tree_after = store.entities[0].position();
        assert!(human_before.distance(&human_after) > 0.0);
        assert_eq!(tree_before, tree_after);
    }
}
