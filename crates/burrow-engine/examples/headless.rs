//! Burrow headless: a full round loop with no renderer attached.
//!
//! Demonstrates:
//!   1. Building the staggered hole grid for a portrait screen
//!   2. Loading tuning from JSON (or using the defaults)
//!   3. Stepping a Playfield at 60 Hz with simulated taps
//!   4. Auditing allocation invariants and reading the counters
//!
//! Run with:
//!   RUST_LOG=burrow_engine=debug,burrow_pool=debug cargo run --example headless [tuning.json]

use burrow_core::Vec2;
use burrow_engine::{HitEvent, Playfield, PlayfieldConfig, Tuning};
use burrow_space::{SlotLayout, StaggeredGrid, Viewport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

// ─── Screen parameters ──────────────────────────────────────────

const ORTHO_SIZE: f32 = 10.0;
const ASPECT: f32 = 1125.0 / 2436.0;
const HOLE_EXTENT: f32 = 1.5;

// ─── Run parameters ─────────────────────────────────────────────

const FRAME: f32 = 1.0 / 60.0;
const SECONDS: u32 = 60;
/// Chance per frame that the simulated player taps.
const TAP_CHANCE: f64 = 0.05;
/// Chance that a tap lands on a running token rather than empty ground.
const TAP_ACCURACY: f64 = 0.6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    let viewport = Viewport::centered(ASPECT * ORTHO_SIZE * 2.0, ORTHO_SIZE * 2.0);
    let layout = SlotLayout::staggered(&StaggeredGrid::new(viewport, HOLE_EXTENT))?;
    tracing::info!(slots = layout.len(), "built hole grid");

    let mut field = Playfield::headless(PlayfieldConfig { layout, tuning })?;
    let mut player = ChaCha8Rng::seed_from_u64(field.seed() ^ 0x5eed);

    let frames = SECONDS * 60;
    for _ in 0..frames {
        let mut hits = Vec::new();
        if player.random_bool(TAP_CHANCE) {
            let running = field.active_tokens();
            let point = if !running.is_empty() && player.random_bool(TAP_ACCURACY) {
                running[player.random_range(0..running.len())].position
            } else {
                Vec2::new(
                    player.random_range(viewport.bottom_left.x..viewport.top_right.x),
                    player.random_range(viewport.bottom_left.y..viewport.top_right.y),
                )
            };
            hits.push(HitEvent { point });
        }
        let report = field.step(FRAME, &hits);
        for release in &report.releases {
            tracing::debug!(
                tick = %report.tick,
                activation = %release.activation,
                cause = ?release.cause,
                "release"
            );
        }
    }

    field.audit()?;
    let m = field.metrics();
    println!("{SECONDS}s simulated over {} ticks", field.current_tick());
    println!("  spawns:            {}", m.spawns);
    println!("  skipped spawns:    {}", m.skipped_spawns);
    println!("  natural releases:  {}", m.natural_releases);
    println!("  interruptions:     {}", m.interruptions);
    println!("  missed hits:       {}", m.missed_hits);
    println!("  still running:     {}", field.active_count());
    println!("  pool size:         {} (+{} grown)", field.tokens().len(), m.tokens_grown);
    Ok(())
}
