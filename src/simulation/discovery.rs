//! Rule-table-driven discovery engine and tree population growth
//!
//! Each evaluation cycle walks the rule table in order and registers at
//! most one discovery: the first rule whose probability roll, trigger
//! presence, proximity requirements, and trigger cooldown all pass.
//! A flat-chance UFO roll runs after the table when no rule fired.

use ahash::AHashMap;
use rand::Rng;

use crate::core::clock;
use crate::core::config;
use crate::core::types::Vec2;
use crate::entity::archetype::SkaiArchetype;
use crate::world::events::WorldEventCategory;
use crate::world::store::WorldStore;

/// One entry in the discovery rule table
pub struct DiscoveryRule {
    /// Archetype this rule unlocks
    pub unlocks: SkaiArchetype,
    /// Archetypes that must each have a living instance near the trigger
    pub required_nearby: &'static [SkaiArchetype],
    /// Archetype of the entity that makes the discovery
    pub trigger: SkaiArchetype,
    /// Per-cycle probability that this rule is evaluated at all
    pub chance: f64,
    /// Provenance text recorded on the discovery
    pub description: &'static str,
}

/// Table order is evaluation order; earlier rules win ties
pub const DISCOVERY_RULES: [DiscoveryRule; 9] = [
    DiscoveryRule {
        unlocks: SkaiArchetype::Fish,
        required_nearby: &[SkaiArchetype::WaterPatch],
        trigger: SkaiArchetype::Human,
        chance: 0.15,
        description: "Human discovered fish in water",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Bee,
        required_nearby: &[SkaiArchetype::Flower],
        trigger: SkaiArchetype::Human,
        chance: 0.2,
        description: "Human found bees near flowers",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Flower,
        required_nearby: &[SkaiArchetype::Tree],
        trigger: SkaiArchetype::Human,
        chance: 0.25,
        description: "Human discovered flowers in forest",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::House,
        required_nearby: &[SkaiArchetype::Tree],
        trigger: SkaiArchetype::Human,
        chance: 0.1,
        description: "Human built a house near trees",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Bush,
        required_nearby: &[SkaiArchetype::Tree],
        trigger: SkaiArchetype::Human,
        chance: 0.3,
        description: "Human found bushes near trees",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Rock,
        required_nearby: &[SkaiArchetype::Tree],
        trigger: SkaiArchetype::Human,
        chance: 0.25,
        description: "Human discovered rocks",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Wolf,
        required_nearby: &[SkaiArchetype::Tree],
        trigger: SkaiArchetype::Cow,
        chance: 0.08,
        description: "Wolves appeared near the forest",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Fire,
        required_nearby: &[SkaiArchetype::House],
        trigger: SkaiArchetype::Human,
        chance: 0.15,
        description: "Human discovered fire",
    },
    DiscoveryRule {
        unlocks: SkaiArchetype::Road,
        required_nearby: &[SkaiArchetype::House],
        trigger: SkaiArchetype::Human,
        chance: 0.12,
        description: "Human built roads",
    },
];

/// Run one discovery evaluation cycle.
///
/// Invoked on a coarse cadence by the driver, not every tick. At most
/// one rule-table discovery registers per cycle; the UFO roll is
/// independent but still subject to the daily cap inside
/// `register_discovery`.
pub fn check_discoveries(store: &mut WorldStore) {
    store.check_daily_reset();
    if store.stats.discoveries_today >= store.stats.daily_discovery_limit {
        return;
    }

    // one pass over the living population, grouped for the proximity scans
    let mut positions_by_archetype: AHashMap<SkaiArchetype, Vec<Vec2>> = AHashMap::new();
    for skai in store.living() {
        positions_by_archetype
            .entry(skai.archetype)
            .or_default()
            .push(skai.position());
    }
    let now = clock::now_ms();

    for rule in &DISCOVERY_RULES {
        if store.rng.gen::<f64>() > rule.chance {
            continue;
        }
        if store.is_discovered(rule.unlocks) {
            continue;
        }

        let triggers: Vec<_> = store
            .living()
            .filter(|e| e.archetype == rule.trigger)
            .map(|e| (e.id, e.position(), e.last_discovery_at))
            .collect();
        if triggers.is_empty() {
            continue;
        }

        for (trigger_id, trigger_pos, last_discovery_at) in triggers {
            let requirements_met = rule.required_nearby.iter().all(|required| {
                positions_by_archetype
                    .get(required)
                    .is_some_and(|positions| {
                        positions
                            .iter()
                            .any(|p| p.distance(&trigger_pos) <= config::DISCOVERY_PROXIMITY_RADIUS)
                    })
            });
            if !requirements_met {
                continue;
            }

            let cooled_down = last_discovery_at
                .map_or(true, |at| now.saturating_sub(at) > config::DISCOVERY_COOLDOWN_MS);
            if !cooled_down {
                continue;
            }

            if store.register_discovery(rule.unlocks, rule.description) {
                store.stamp_last_discovery(trigger_id, now);
                return;
            }
        }
    }

    if store.rng.gen::<f64>() < config::UFO_DISCOVERY_CHANCE
        && !store.is_discovered(SkaiArchetype::Ufo)
    {
        store.register_discovery(SkaiArchetype::Ufo, "Random mysterious appearance");
    }
}

/// Population growth: a small chance that an existing tree seeds a
/// sapling nearby.
///
/// Routes through `spawn_skai`, so saplings draw on the same spawn
/// allowance as player spawns.
pub fn maybe_spawn_saplings(store: &mut WorldStore) {
    let trees: Vec<Vec2> = store
        .living()
        .filter(|e| e.archetype == SkaiArchetype::Tree)
        .map(|e| e.position())
        .collect();
    if trees.is_empty() {
        return;
    }
    if !store.rng.gen_bool(config::SAPLING_SPAWN_CHANCE) {
        return;
    }

    let parent = trees[store.rng.gen_range(0..trees.len())];
    let x = parent.x + (store.rng.gen::<f32>() - 0.5) * config::SAPLING_SCATTER;
    let y = parent.y + (store.rng.gen::<f32>() - 0.5) * config::SAPLING_SCATTER;

    store.spawn_skai(SkaiArchetype::Tree, Some(x), Some(y));
    store.register_event("A new sapling sprouted", WorldEventCategory::Spawn);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(store: &mut WorldStore, spawns: &[(SkaiArchetype, f32, f32)]) {
        for (archetype, x, y) in spawns {
            store.spawn_skai(*archetype, Some(*x), Some(*y));
        }
    }

    #[test]
    fn test_rule_table_shape() {
        assert_eq!(DISCOVERY_RULES.len(), 9);
        assert_eq!(DISCOVERY_RULES[0].unlocks, SkaiArchetype::Fish);
        // the wolf is the only discovery a cow makes
        let wolf = DISCOVERY_RULES
            .iter()
            .find(|r| r.unlocks == SkaiArchetype::Wolf)
            .unwrap();
        assert_eq!(wolf.trigger, SkaiArchetype::Cow);
    }

    #[test]
    fn test_no_discovery_without_trigger_entities() {
        let mut store = WorldStore::with_seed(1);
        world_with(&mut store, &[(SkaiArchetype::WaterPatch, 0.0, 0.0)]);
        // no UFO either, to isolate the rule table
        for _ in 0..200 {
            check_discoveries(&mut store);
        }
        let non_ufo = store
            .discoveries
            .iter()
            .filter(|d| d.archetype != SkaiArchetype::Ufo)
            .count();
        assert_eq!(non_ufo, 0);
    }

    #[test]
    fn test_fish_discovered_near_water() {
        let mut store = WorldStore::with_seed(2);
        store.stats.daily_discovery_limit = 10;
        world_with(
            &mut store,
            &[
                (SkaiArchetype::Human, 0.0, 0.0),
                (SkaiArchetype::WaterPatch, 50.0, 0.0),
            ],
        );

        let mut found = false;
        for _ in 0..500 {
            check_discoveries(&mut store);
            if store.is_discovered(SkaiArchetype::Fish) {
                found = true;
                break;
            }
        }
        assert!(found, "15% rule should fire within 500 cycles");

        let fish = store
            .discoveries
            .iter()
            .find(|d| d.archetype == SkaiArchetype::Fish)
            .unwrap();
        assert_eq!(fish.source_description, "Human discovered fish in water");
        assert!(!fish.claimed);
        // the trigger human was stamped
        let human = store
            .entities
            .iter()
            .find(|e| e.archetype == SkaiArchetype::Human)
            .unwrap();
        assert!(human.last_discovery_at.is_some());
    }

    #[test]
    fn test_proximity_radius_excludes_distant_requirements() {
        let mut store = WorldStore::with_seed(3);
        world_with(
            &mut store,
            &[
                (SkaiArchetype::Human, 0.0, 0.0),
                (SkaiArchetype::WaterPatch, 500.0, 0.0),
            ],
        );

        for _ in 0..300 {
            check_discoveries(&mut store);
        }
        assert!(!store.is_discovered(SkaiArchetype::Fish));
    }

    #[test]
    fn test_trigger_cooldown_blocks_back_to_back_discoveries() {
        let mut store = WorldStore::with_seed(4);
        store.stats.daily_discovery_limit = 10;
        world_with(
            &mut store,
            &[
                (SkaiArchetype::Human, 0.0, 0.0),
                (SkaiArchetype::WaterPatch, 10.0, 0.0),
                (SkaiArchetype::Tree, 20.0, 0.0),
            ],
        );
        // the lone human just made a discovery
        let human_id = store
            .entities
            .iter()
            .find(|e| e.archetype == SkaiArchetype::Human)
            .unwrap()
            .id;
        store.stamp_last_discovery(human_id, clock::now_ms());

        for _ in 0..100 {
            check_discoveries(&mut store);
        }
        // only the UFO path ignores trigger cooldowns
        let non_ufo = store
            .discoveries
            .iter()
            .filter(|d| d.archetype != SkaiArchetype::Ufo)
            .count();
        assert_eq!(non_ufo, 0);
    }

    #[test]
    fn test_cycle_stops_after_first_discovery() {
        let mut store = WorldStore::with_seed(5);
        store.stats.daily_discovery_limit = 10;
        // tree next to the human satisfies FLOWER, HOUSE, BUSH, and ROCK rules
        world_with(
            &mut store,
            &[
                (SkaiArchetype::Human, 0.0, 0.0),
                (SkaiArchetype::Tree, 30.0, 0.0),
            ],
        );

        // a rule success returns before the UFO roll, so each cycle
        // registers at most one discovery
        for _ in 0..200 {
            let before = store.discoveries.len();
            check_discoveries(&mut store);
            assert!(store.discoveries.len() - before <= 1);
        }
        assert!(store.discoveries.len() >= 2, "several rules should fire over 200 cycles");
    }

    #[test]
    fn test_daily_cap_aborts_cycle() {
        let mut store = WorldStore::with_seed(6);
        store.stats.daily_discovery_limit = 1;
        store.register_discovery(SkaiArchetype::Flower, "pre-existing");
        world_with(
            &mut store,
            &[
                (SkaiArchetype::Human, 0.0, 0.0),
                (SkaiArchetype::WaterPatch, 10.0, 0.0),
            ],
        );

        for _ in 0..300 {
            check_discoveries(&mut store);
        }
        assert_eq!(store.discoveries.len(), 1);
        assert_eq!(store.stats.discoveries_today, 1);
    }

    #[test]
    fn test_saplings_sprout_near_existing_trees() {
        let mut store = WorldStore::with_seed(7);
        store.stats.free_spawns_remaining = 1000;
        world_with(&mut store, &[(SkaiArchetype::Tree, 40.0, -40.0)]);

        let mut sprouted = false;
        for _ in 0..300 {
            maybe_spawn_saplings(&mut store);
            if store.entities.len() > 1 {
                sprouted = true;
                break;
            }
        }
        assert!(sprouted, "5% chance should fire within 300 attempts");

        let sapling = &store.entities[1];
        assert_eq!(sapling.archetype, SkaiArchetype::Tree);
        assert!((sapling.x - 40.0).abs() <= 60.0);
        assert!((sapling.y + 40.0).abs() <= 60.0);
        assert!(store
            .events
            .iter()
            .any(|e| e.message == "A new sapling sprouted"));
    }

    #[test]
    fn test_no_saplings_without_trees() {
        let mut store = WorldStore::with_seed(8);
        world_with(&mut store, &[(SkaiArchetype::Human, 0.0, 0.0)]);

        for _ in 0..300 {
            maybe_spawn_saplings(&mut store);
        }
        assert_eq!(store.entities.len(), 1);
    }
}
