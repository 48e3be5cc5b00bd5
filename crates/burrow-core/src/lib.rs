//! Core types for the Burrow slot/token simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers shared by every other crate (slots, tokens, ticks,
//! activations), the [`Vec2`] world-space point, the [`Presenter`]
//! rendering seam, and the ownership error types raised when a pool
//! partition would be corrupted.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geom;
pub mod id;
pub mod traits;

pub use error::{PoolError, SlotError};
pub use geom::{Vec2, OFF_STAGE};
pub use id::{Activation, DepthKey, PoolIndex, SlotId, TickId, TokenId};
pub use traits::{NullPresenter, Presenter};
