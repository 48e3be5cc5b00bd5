//! Per-step reports and cumulative counters.

use burrow_core::{Activation, SlotId, TickId};
use smallvec::SmallVec;

/// Why a token was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseCause {
    /// The lifecycle ran to completion.
    Completed,
    /// A hit interrupted the lifecycle.
    Interrupted,
}

/// One completed release sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    /// The finished activation.
    pub activation: Activation,
    /// The slot handed back.
    pub slot: SlotId,
    /// What ended it.
    pub cause: ReleaseCause,
}

/// A successful spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    /// The new activation.
    pub activation: Activation,
    /// The slot it occupies.
    pub slot: SlotId,
}

/// Everything that happened during one [`Playfield::step`](crate::Playfield::step).
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// The tick just executed.
    pub tick: TickId,
    /// Spawn made this tick, if the scheduler was due and a slot was free.
    pub spawned: Option<Spawn>,
    /// Releases in the order they happened: hits first, then completions.
    pub releases: SmallVec<[Release; 4]>,
}

impl StepReport {
    pub(crate) fn new(tick: TickId) -> Self {
        Self {
            tick,
            spawned: None,
            releases: SmallVec::new(),
        }
    }
}

/// Cumulative counters since construction or the last reset.
///
/// Every successful spawn is eventually matched by exactly one release,
/// so at any observation point
/// `spawns == natural_releases + interruptions + active tokens`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayfieldMetrics {
    /// Slots bound to a token.
    pub spawns: u64,
    /// Spawn attempts skipped because every slot was occupied.
    pub skipped_spawns: u64,
    /// Lifecycles that ran to completion.
    pub natural_releases: u64,
    /// Lifecycles ended by a hit or an explicit interrupt.
    pub interruptions: u64,
    /// Interrupts naming an activation that had already ended.
    pub stale_interruptions: u64,
    /// Hits that landed on no running token.
    pub missed_hits: u64,
    /// Ownership violations caught and reported.
    pub ownership_violations: u64,
    /// Tokens built on demand beyond the pre-warmed pool.
    pub tokens_grown: u64,
}

impl PlayfieldMetrics {
    /// Total releases of either cause.
    pub fn releases(&self) -> u64 {
        self.natural_releases + self.interruptions
    }
}
