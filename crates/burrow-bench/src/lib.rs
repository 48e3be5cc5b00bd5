//! Benchmark profiles for the Burrow slot/token simulation.
//!
//! - [`portrait_profile`]: the staggered grid on a phone-shaped screen with
//!   default tuning
//! - [`saturated_profile`]: many slots, zero spawn interval, so every frame
//!   spawns until the grid fills
//! - [`tap_schedule`]: deterministic hit points for a run

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use burrow_core::Vec2;
use burrow_engine::{HitEvent, PlayfieldConfig, Tuning};
use burrow_space::{SlotLayout, StaggeredGrid, Viewport};

/// Staggered grid on a 1125×2436 portrait screen, default tuning.
pub fn portrait_profile(seed: u64) -> PlayfieldConfig {
    let viewport = Viewport::centered(1125.0 / 2436.0 * 20.0, 20.0);
    let layout = SlotLayout::staggered(&StaggeredGrid::new(viewport, 1.5)).unwrap();
    PlayfieldConfig {
        layout,
        tuning: Tuning {
            seed,
            ..Tuning::default()
        },
    }
}

/// `slots` slots in a row with a spawn attempted every frame.
pub fn saturated_profile(slots: u32, seed: u64) -> PlayfieldConfig {
    PlayfieldConfig {
        layout: SlotLayout::row(slots, 2.0).unwrap(),
        tuning: Tuning {
            seed,
            spawn_interval_secs: 0.0,
            prewarm_tokens: slots as usize,
            ..Tuning::default()
        },
    }
}

/// One optional hit per frame for `frames` frames.
///
/// Uses a fixed LCG so the schedule is identical across runs and does not
/// depend on the playfield's own RNG. Roughly one frame in eight carries a
/// hit somewhere inside `[-span, span]²`.
pub fn tap_schedule(frames: usize, span: f32, seed: u64) -> Vec<Option<HitEvent>> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 40) as f32 / (1u64 << 24) as f32
    };
    (0..frames)
        .map(|_| {
            if next() < 0.125 {
                Some(HitEvent {
                    point: Vec2::new((next() * 2.0 - 1.0) * span, (next() * 2.0 - 1.0) * span),
                })
            } else {
                None
            }
        })
        .collect()
}
