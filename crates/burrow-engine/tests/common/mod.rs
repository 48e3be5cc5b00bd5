//! Shared setup for the engine integration tests.

#![allow(dead_code)]

use burrow_engine::{MotionConfig, Playfield, PlayfieldConfig, Tuning};
use burrow_test_utils::fixtures::row_layout;
use burrow_test_utils::{PresenterLog, RecordingPresenter};

/// Frame length used with [`fast_tuning`].
pub const DT: f32 = 0.5;

/// Frames from spawn to natural release under [`fast_tuning`]:
/// 4 rising, 2 holding, 4 falling, plus the spawn frame.
pub const LIFETIME_FRAMES: u64 = 11;

/// Two-unit travel at speed 1 with a one-second hold, so every value a
/// token passes through is exact at [`DT`].
pub fn fast_tuning() -> Tuning {
    Tuning {
        motion: MotionConfig {
            speed: 1.0,
            rise_offset: 1.0,
            sink_offset: -1.0,
            hold_secs: 1.0,
        },
        spawn_interval_secs: 0.5,
        prewarm_tokens: 4,
        seed: 42,
        hit_half_width: 0.5,
        hit_half_height: 0.5,
    }
}

pub fn row_config(slots: u32, tuning: Tuning) -> PlayfieldConfig {
    PlayfieldConfig {
        layout: row_layout(slots),
        tuning,
    }
}

pub fn headless(slots: u32, tuning: Tuning) -> Playfield {
    Playfield::headless(row_config(slots, tuning)).unwrap()
}

pub fn recorded(slots: u32, tuning: Tuning) -> (Playfield, PresenterLog) {
    let (presenter, log) = RecordingPresenter::new();
    let field = Playfield::new(row_config(slots, tuning), Box::new(presenter)).unwrap();
    (field, log)
}
