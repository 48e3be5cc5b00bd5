//! Ownership error types.
//!
//! Exhaustion (no free slot) is not an error and never appears here; it is
//! an `Option::None` at the call site. These enums cover programming
//! errors: releasing something the caller does not own.

use thiserror::Error;

use crate::id::SlotId;

/// Errors from the slot registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The slot index is past the end of the registry.
    #[error("slot {slot} out of range (registry holds {count} slots)")]
    OutOfRange {
        /// The offending slot.
        slot: SlotId,
        /// Number of slots in the registry.
        count: u32,
    },
    /// The slot was released while already free (double release).
    #[error("slot {slot} released while already free")]
    AlreadyFree {
        /// The slot released twice.
        slot: SlotId,
    },
}

/// Errors from a generic instance pool.
///
/// Keys are reported by their dense index so the error stays independent
/// of the pool's key type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The instance exists but is already in the available partition.
    #[error("pool instance {index} released while not in use")]
    NotInUse {
        /// Index of the instance.
        index: u32,
    },
    /// The key does not name any instance this pool ever built.
    #[error("pool instance {index} unknown (pool holds {len} instances)")]
    Unknown {
        /// Index of the requested instance.
        index: u32,
        /// Number of instances in the pool.
        len: u32,
    },
}
