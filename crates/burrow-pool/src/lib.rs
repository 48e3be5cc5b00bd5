//! Allocation primitives for Burrow.
//!
//! Two leaf components, both single-owner and `&mut self` driven:
//!
//! - [`Pool`]: a recycling pool of instances partitioned into *available*
//!   and *in-use*, growing on demand.
//! - [`SlotRegistry`]: the fixed set of slots with a free-index set and
//!   uniform random allocation.
//!
//! Both reject double releases with an error instead of silently
//! corrupting their partitions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod pool;
pub mod slots;

pub use pool::{Pool, Recycle};
pub use slots::SlotRegistry;
