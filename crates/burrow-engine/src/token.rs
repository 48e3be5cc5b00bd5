//! Token lifecycle state machine.
//!
//! A [`Token`] moves through `Rising → HoldingUp → Falling` and then back
//! to `Idle` when the playfield releases it. Each phase is advanced by
//! [`Token::advance`] once per frame with the frame's `dt`; there is no
//! hidden scheduler, the phase value carries all suspended state.
//!
//! Motion clamps exactly to the bound on arrival: the frame whose step
//! would reach or pass a bound snaps the position onto it, so the phase
//! test is an equality on a value the token itself wrote, never a float
//! comparison against accumulated steps.

use burrow_core::{Activation, DepthKey, SlotId, TokenId, Vec2, OFF_STAGE};
use burrow_pool::Recycle;
use burrow_space::Aabb;

use crate::config::MotionConfig;
use crate::error::LifecycleError;

/// Lifecycle phase of a token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Parked in the pool, or bound but not yet started.
    Idle,
    /// Moving up toward the upper bound.
    Rising,
    /// Waiting at the upper bound.
    HoldingUp {
        /// Seconds left before falling.
        remaining: f32,
    },
    /// Moving down toward the lower bound.
    Falling,
}

/// Vertical motion limits cached at initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionBounds {
    /// Position held during `HoldingUp`.
    pub upper: f32,
    /// Start position and `Falling` target.
    pub lower: f32,
}

/// Result of one [`Token::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// The token was idle; nothing happened.
    Inactive,
    /// The token moved to the given position.
    Moved(Vec2),
    /// The token is waiting at the upper bound.
    Held,
    /// The token reached the lower bound at the given position and must
    /// now be released.
    Finished(Vec2),
}

/// A pooled, reusable token.
#[derive(Clone, Debug)]
pub struct Token {
    id: TokenId,
    slot: Option<SlotId>,
    phase: Phase,
    position: Vec2,
    bounds: MotionBounds,
    depth: Option<DepthKey>,
    generation: u32,
}

impl Token {
    /// This token's pool key.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Slot the token is bound to, if any.
    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current world position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion bounds from the last initialization.
    pub fn bounds(&self) -> MotionBounds {
        self.bounds
    }

    /// Draw-order key, if bound.
    pub fn depth(&self) -> Option<DepthKey> {
        self.depth
    }

    /// Number of lifecycles this token has started.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether a lifecycle is running.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// The running activation, if any.
    pub fn activation(&self) -> Option<Activation> {
        self.is_active().then_some(Activation {
            token: self.id,
            generation: self.generation,
        })
    }

    /// Whether `activation` names this token's running lifecycle.
    pub fn matches(&self, activation: Activation) -> bool {
        self.activation() == Some(activation)
    }

    /// Hit region around the current position.
    pub fn hit_region(&self, half_extents: Vec2) -> Aabb {
        Aabb::centered(self.position, half_extents)
    }

    /// Bind to `slot` whose hole sits at `base`.
    ///
    /// Caches the motion bounds, moves the token to the lower bound below
    /// the hole, and assigns the slot's depth key.
    pub fn initialize(
        &mut self,
        slot: SlotId,
        base: Vec2,
        motion: &MotionConfig,
    ) -> Result<(), LifecycleError> {
        if self.is_active() {
            return Err(LifecycleError::AlreadyActive { token: self.id });
        }
        self.bounds = MotionBounds {
            upper: base.y + motion.rise_offset,
            lower: base.y + motion.sink_offset,
        };
        self.slot = Some(slot);
        self.position = base.with_y(self.bounds.lower);
        self.depth = Some(DepthKey::for_slot(slot));
        Ok(())
    }

    /// Begin rising. Returns the new activation.
    pub fn start(&mut self) -> Result<Activation, LifecycleError> {
        if self.slot.is_none() {
            return Err(LifecycleError::Unassigned { token: self.id });
        }
        if self.is_active() {
            return Err(LifecycleError::AlreadyActive { token: self.id });
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Rising;
        Ok(Activation {
            token: self.id,
            generation: self.generation,
        })
    }

    /// Advance the lifecycle by `dt` seconds.
    pub fn advance(&mut self, dt: f32, motion: &MotionConfig) -> Advance {
        let step = motion.speed * dt;
        match self.phase {
            Phase::Idle => Advance::Inactive,
            Phase::Rising => {
                if self.position.y + step < self.bounds.upper {
                    self.position.y += step;
                } else {
                    self.position.y = self.bounds.upper;
                    self.phase = Phase::HoldingUp {
                        remaining: motion.hold_secs,
                    };
                    tracing::trace!(token = %self.id, "reached upper bound");
                }
                Advance::Moved(self.position)
            }
            Phase::HoldingUp { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining > 0.0 {
                    Phase::HoldingUp { remaining }
                } else {
                    tracing::trace!(token = %self.id, "hold expired");
                    Phase::Falling
                };
                Advance::Held
            }
            Phase::Falling => {
                if self.position.y - step > self.bounds.lower {
                    self.position.y -= step;
                    Advance::Moved(self.position)
                } else {
                    self.position.y = self.bounds.lower;
                    Advance::Finished(self.position)
                }
            }
        }
    }

    /// Detach from the slot, returning it.
    pub(crate) fn take_slot(&mut self) -> Option<SlotId> {
        self.slot.take()
    }
}

impl Recycle for Token {
    type Key = TokenId;

    fn fresh(key: TokenId) -> Self {
        Token {
            id: key,
            slot: None,
            phase: Phase::Idle,
            position: OFF_STAGE,
            bounds: MotionBounds::default(),
            depth: None,
            generation: 0,
        }
    }

    /// Park off-stage. The generation survives so old activations stay stale.
    fn recycle(&mut self) {
        self.slot = None;
        self.phase = Phase::Idle;
        self.position = OFF_STAGE;
        self.depth = None;
    }
}
