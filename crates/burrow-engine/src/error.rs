//! Lifecycle error types.

use burrow_core::{Activation, PoolError, SlotError, SlotId, TokenId};
use thiserror::Error;

/// Ownership violations raised while binding or releasing tokens.
///
/// Every variant is a programming error. Inside
/// [`Playfield::step`](crate::Playfield::step) they are logged, counted,
/// and abort debug builds; they never stop the spawn cadence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The slot registry rejected an operation.
    #[error("slot registry: {0}")]
    Slot(#[from] SlotError),
    /// The token pool rejected an operation.
    #[error("token pool: {0}")]
    Pool(#[from] PoolError),
    /// A token was started or released without an assigned slot.
    #[error("token {token} has no assigned slot")]
    Unassigned {
        /// The unassigned token.
        token: TokenId,
    },
    /// A token was initialized or started while already running.
    #[error("token {token} is already active")]
    AlreadyActive {
        /// The running token.
        token: TokenId,
    },
    /// A slot was bound while another activation still held it.
    #[error("slot {slot} already held by activation {holder}")]
    SlotShared {
        /// The contested slot.
        slot: SlotId,
        /// The activation already holding it.
        holder: Activation,
    },
    /// The active map names a token the pool does not consider in use.
    #[error("slot {slot} maps to activation {activation} whose token is not in use")]
    Orphaned {
        /// Slot of the stale mapping.
        slot: SlotId,
        /// The stale activation.
        activation: Activation,
    },
    /// An invariant audit failed.
    #[error("audit failed: {reason}")]
    Audit {
        /// Description of the violated invariant.
        reason: String,
    },
}
