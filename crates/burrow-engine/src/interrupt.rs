//! Hit resolution for external interruption events.

use burrow_core::{Activation, SlotId, Vec2};
use burrow_pool::Pool;
use indexmap::IndexMap;

use crate::token::Token;

/// A pointer or touch activation at a world-space point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitEvent {
    /// Where the hit landed.
    pub point: Vec2,
}

impl HitEvent {
    /// Hit at `(x, y)`.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            point: Vec2::new(x, y),
        }
    }
}

/// Maps a hit point to at most one running activation.
///
/// Resolution walks the slot → activation map the playfield maintains,
/// testing each running token's hit region. Where regions overlap, the
/// token drawn on top (highest depth key) wins, matching what the player
/// sees.
#[derive(Clone, Debug)]
pub struct InterruptionHandler {
    half_extents: Vec2,
}

impl InterruptionHandler {
    /// Handler using hit regions of the given half extents.
    pub fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    /// Half extents of each token's hit region.
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// The running activation under `point`, if any.
    pub fn resolve(
        &self,
        point: Vec2,
        active: &IndexMap<SlotId, Activation>,
        tokens: &Pool<Token>,
    ) -> Option<Activation> {
        active
            .values()
            .filter_map(|&activation| {
                let token = tokens.get(activation.token)?;
                if !token.matches(activation) {
                    return None;
                }
                let depth = token.depth()?;
                token
                    .hit_region(self.half_extents)
                    .contains(point)
                    .then_some((depth, activation))
            })
            .max_by_key(|&(depth, _)| depth)
            .map(|(_, activation)| activation)
    }
}
