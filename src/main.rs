//! Idleverse - headless reference driver
//!
//! Runs offline catch-up on start, drives the simulation at 30 Hz with
//! the discovery and sapling cadences from the reference loop, and
//! persists the world snapshot to a JSON file between sessions.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use idleverse::core::error::Result;
use idleverse::entity::archetype::SkaiArchetype;
use idleverse::simulation::behaviour::tick_behaviours;
use idleverse::simulation::discovery::{check_discoveries, maybe_spawn_saplings};
use idleverse::simulation::offline::simulate_offline_progress;
use idleverse::world::snapshot::WorldSnapshot;
use idleverse::world::store::WorldStore;

/// Frame period of the reference driver
const TICK_SECONDS: f32 = 1.0 / 30.0;
/// Wall-time cadence for discovery evaluation
const DISCOVERY_PERIOD_MS: u64 = 60_000;
/// Wall-time cadence for sapling growth
const SAPLING_PERIOD_MS: u64 = 120_000;

#[derive(Parser)]
#[command(name = "idleverse", about = "Persistent idle-world simulation")]
struct Args {
    /// Path of the world save file
    #[arg(long, default_value = "idleverse_world.json")]
    save: PathBuf,

    /// Seed the world RNG for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Fast-forward this many simulated seconds and exit (skips the REPL)
    #[arg(long)]
    run_seconds: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut store = match args.seed {
        Some(seed) => WorldStore::with_seed(seed),
        None => WorldStore::new(),
    };
    load_or_create(&mut store, &args.save);

    simulate_offline_progress(&mut store);

    if let Some(seconds) = args.run_seconds {
        fast_forward(&mut store, seconds);
        save_world(&store, &args.save)?;
        return Ok(());
    }

    println!("\n=== IDLEVERSE ===");
    println!("A tiny world that keeps going while you're away");
    println!();
    println!("Commands:");
    println!("  run <seconds>   - Fast-forward the simulation");
    println!("  spawn <type>    - Spawn a skai (e.g. spawn TREE)");
    println!("  status / s      - Show world status");
    println!("  events          - Show the activity log");
    println!("  claim <n>       - Claim the nth unclaimed discovery");
    println!("  boost           - Buy a 2x speed boost for 10 minutes");
    println!("  reset           - Wipe and recreate the world");
    println!("  quit / q        - Save and exit");
    println!();

    loop {
        display_status(&store);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["quit" | "q"] => break,
            ["run", seconds] => match seconds.parse::<u64>() {
                Ok(seconds) => fast_forward(&mut store, seconds),
                Err(_) => println!("usage: run <seconds>"),
            },
            ["spawn", raw] => match raw.parse::<SkaiArchetype>() {
                Ok(archetype) => {
                    if store.spawnable_types.contains(&archetype) {
                        store.spawn_skai(archetype, None, None);
                    } else {
                        println!("{} is not unlocked yet", archetype.display_name());
                    }
                }
                Err(err) => println!("{err}"),
            },
            ["status" | "s"] => {}
            ["events"] => {
                for event in &store.events {
                    let repeat = if event.count > 1 {
                        format!(" (x{})", event.count)
                    } else {
                        String::new()
                    };
                    println!("[{:?}] {}{}", event.category, event.message, repeat);
                }
            }
            ["claim", index] => match index.parse::<usize>() {
                Ok(n) => {
                    let unclaimed: Vec<_> = store
                        .discoveries
                        .iter()
                        .filter(|d| !d.claimed)
                        .map(|d| d.id)
                        .collect();
                    match unclaimed.get(n) {
                        Some(id) => store.claim_discovery(*id),
                        None => println!("no unclaimed discovery #{n}"),
                    }
                }
                Err(_) => println!("usage: claim <n>"),
            },
            ["boost"] => store.apply_speed_boost(2.0, 10),
            ["reset"] => store.reset_world(),
            [] => {}
            _ => println!("unknown command: {}", line.trim()),
        }
    }

    save_world(&store, &args.save)?;
    tracing::info!(path = %args.save.display(), "world saved");
    Ok(())
}

/// Restore the world from disk, or create a fresh one on first run (or
/// on an unreadable save)
fn load_or_create(store: &mut WorldStore, path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(raw) => match WorldSnapshot::from_json(&raw) {
            Ok(snapshot) => {
                tracing::info!(path = %path.display(), "world loaded");
                store.restore(snapshot);
            }
            Err(err) => {
                tracing::warn!(%err, "save file unreadable, starting fresh");
                store.create_world();
            }
        },
        Err(_) => store.create_world(),
    }
}

fn save_world(store: &WorldStore, path: &Path) -> Result<()> {
    std::fs::write(path, store.snapshot().to_json()?)?;
    Ok(())
}

/// Drive the reference loop for a stretch of simulated time: 30 Hz
/// behavior ticks scaled by the speed multiplier, discovery every 60s
/// and saplings every 120s of unscaled time
fn fast_forward(store: &mut WorldStore, seconds: u64) {
    let frames = seconds * 30;
    let mut discovery_timer_ms = 0u64;
    let mut sapling_timer_ms = 0u64;
    let frame_ms = (TICK_SECONDS * 1000.0) as u64;

    for _ in 0..frames {
        let delta = TICK_SECONDS * store.ui.speed_multiplier;
        store.tick_world(delta);
        tick_behaviours(store, delta);

        discovery_timer_ms += frame_ms;
        if discovery_timer_ms > DISCOVERY_PERIOD_MS {
            check_discoveries(store);
            discovery_timer_ms = 0;
        }

        sapling_timer_ms += frame_ms;
        if sapling_timer_ms > SAPLING_PERIOD_MS {
            maybe_spawn_saplings(store);
            sapling_timer_ms = 0;
        }
    }
    tracing::info!(seconds, "fast-forward complete");
}

fn display_status(store: &WorldStore) {
    let unclaimed = store.discoveries.iter().filter(|d| !d.claimed).count();
    println!(
        "entities: {} | credits: {} | free spawns: {} | discoveries: {} ({} unclaimed) | speed: {}x",
        store.entities.len(),
        store.stats.credits,
        store.stats.free_spawns_remaining,
        store.discoveries.len(),
        unclaimed,
        store.ui.speed_multiplier,
    );
    for notification in &store.notifications {
        println!("  ! {}", notification.message);
    }
}
