//! Strongly-typed identifiers for slots, tokens, ticks and activations.

use std::fmt;

/// Identifies a slot (a hole in the playfield).
///
/// Slots are created once from the layout and numbered sequentially;
/// `SlotId(n)` is the n-th position the layout produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a pooled token.
///
/// Token IDs are assigned in construction order and never reused for a
/// different instance: the pool only grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u32);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TokenId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing frame counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Draw-order key for a token.
///
/// Derived solely from the slot index, so two tokens in overlapping
/// screen regions always draw in the same relative order, and each hole's
/// mask only clips the token sitting in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepthKey(pub i32);

impl DepthKey {
    /// The depth key owned by `slot`.
    pub fn for_slot(slot: SlotId) -> Self {
        Self(slot.0 as i32)
    }

    /// The `(back, front)` mask range a hole uses to clip only its own token.
    pub fn mask_range(self) -> (i32, i32) {
        (self.0 - 1, self.0)
    }
}

impl fmt::Display for DepthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One run of a token's lifecycle.
///
/// The generation is bumped every time the token starts a new lifecycle,
/// so an `Activation` held after the token completed (or after it was
/// recycled and handed out again) no longer matches and every operation
/// keyed by it becomes a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Activation {
    /// The token running this lifecycle.
    pub token: TokenId,
    /// Generation of the token at start time.
    pub generation: u32,
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.token, self.generation)
    }
}

/// Dense index usable as a pool key.
///
/// Pool instances are stored contiguously; a key maps to the position
/// of its instance in construction order.
pub trait PoolIndex: Copy + Eq + std::hash::Hash + fmt::Debug {
    /// Build the key for the instance at `index`.
    fn from_index(index: u32) -> Self;
    /// Position of the instance this key names.
    fn index(self) -> u32;
}

impl PoolIndex for TokenId {
    fn from_index(index: u32) -> Self {
        Self(index)
    }

    fn index(self) -> u32 {
        self.0
    }
}
