//! Playfield configuration, validation, and error types.
//!
//! [`PlayfieldConfig`] is the builder-input for a [`Playfield`](crate::Playfield):
//! the slot layout plus a [`Tuning`] block of timing and motion constants.
//! `Tuning` deserializes from JSON with every field optional, so a tuning
//! file only needs to name what it overrides.

use burrow_core::Vec2;
use burrow_space::{SlotLayout, SpaceError};
use serde::Deserialize;
use thiserror::Error;

// ── MotionConfig ───────────────────────────────────────────────────

/// Motion constants shared by every token.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Vertical speed while rising or falling, in world units per second. Default: 3.0.
    pub speed: f32,
    /// Upper bound relative to the slot position. Default: 0.3.
    pub rise_offset: f32,
    /// Lower bound relative to the slot position. Default: -0.7.
    pub sink_offset: f32,
    /// Seconds spent at the upper bound. Default: 2.0.
    pub hold_secs: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            rise_offset: 0.3,
            sink_offset: -0.7,
            hold_secs: 2.0,
        }
    }
}

// ── Tuning ─────────────────────────────────────────────────────────

/// Timing, pooling and hit-test parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Token motion.
    pub motion: MotionConfig,
    /// Seconds between spawn attempts. Default: 0.5.
    pub spawn_interval_secs: f32,
    /// Tokens built at startup. Default: 10.
    pub prewarm_tokens: usize,
    /// RNG seed for slot selection. Default: 0.
    pub seed: u64,
    /// Half width of a token's hit region. Default: 0.4.
    pub hit_half_width: f32,
    /// Half height of a token's hit region. Default: 0.4.
    pub hit_half_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            spawn_interval_secs: 0.5,
            prewarm_tokens: 10,
            seed: 0,
            hit_half_width: 0.4,
            hit_half_height: 0.4,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning block.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Half extents of a token's hit region.
    pub fn hit_half_extents(&self) -> Vec2 {
        Vec2::new(self.hit_half_width, self.hit_half_height)
    }

    /// Check every numeric constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        if !(m.speed.is_finite() && m.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed { value: m.speed });
        }
        if !(m.rise_offset.is_finite() && m.sink_offset.is_finite())
            || m.rise_offset <= m.sink_offset
        {
            return Err(ConfigError::InvalidOffsets {
                rise: m.rise_offset,
                sink: m.sink_offset,
            });
        }
        if !(m.hold_secs.is_finite() && m.hold_secs >= 0.0) {
            return Err(ConfigError::InvalidDuration {
                name: "hold_secs",
                value: m.hold_secs,
            });
        }
        if !(self.spawn_interval_secs.is_finite() && self.spawn_interval_secs >= 0.0) {
            return Err(ConfigError::InvalidDuration {
                name: "spawn_interval_secs",
                value: self.spawn_interval_secs,
            });
        }
        let extents = self.hit_half_extents();
        if !extents.is_finite() || extents.x < 0.0 || extents.y < 0.0 {
            return Err(ConfigError::InvalidHitExtents { extents });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building or validating a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The slot layout could not be built.
    #[error("layout: {0}")]
    Layout(#[from] SpaceError),
    /// Token speed is NaN, infinite, zero, or negative.
    #[error("speed must be finite and positive, got {value}")]
    InvalidSpeed {
        /// The invalid value.
        value: f32,
    },
    /// Upper bound offset does not lie above the lower bound offset.
    #[error("rise_offset {rise} must be finite and above sink_offset {sink}")]
    InvalidOffsets {
        /// Configured rise offset.
        rise: f32,
        /// Configured sink offset.
        sink: f32,
    },
    /// A duration is NaN, infinite or negative.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDuration {
        /// Which duration.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },
    /// Hit region half extents are negative or non-finite.
    #[error("hit half extents must be finite and non-negative, got {extents}")]
    InvalidHitExtents {
        /// The configured extents.
        extents: Vec2,
    },
    /// The tuning document could not be parsed.
    #[error("tuning parse error: {0}")]
    Parse(String),
}

// ── PlayfieldConfig ────────────────────────────────────────────────

/// Everything needed to construct a [`Playfield`](crate::Playfield).
#[derive(Clone, Debug)]
pub struct PlayfieldConfig {
    /// Slot positions; fixed for the playfield's lifetime.
    pub layout: SlotLayout,
    /// Timing and motion constants.
    pub tuning: Tuning,
}

impl PlayfieldConfig {
    /// Config with default tuning.
    pub fn new(layout: SlotLayout) -> Self {
        Self {
            layout,
            tuning: Tuning::default(),
        }
    }

    /// Check structural invariants. Layouts are validated at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate()
    }
}
