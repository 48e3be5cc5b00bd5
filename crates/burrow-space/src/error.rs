//! Error types for layout construction.

use burrow_core::Vec2;
use thiserror::Error;

/// Errors arising from layout construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    /// The layout would contain zero slots.
    #[error("layout must contain at least one slot")]
    EmptyLayout,
    /// A slot position has a NaN or infinite component.
    #[error("slot {index} has non-finite position {position}")]
    NonFinitePosition {
        /// Index of the offending slot.
        index: usize,
        /// The position supplied.
        position: Vec2,
    },
    /// Viewport or grid parameters are unusable.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// What went wrong.
        reason: String,
    },
    /// More slots than a `SlotId` can address.
    #[error("slot count {count} exceeds u32::MAX")]
    TooManySlots {
        /// Number of slots requested.
        count: usize,
    },
}
