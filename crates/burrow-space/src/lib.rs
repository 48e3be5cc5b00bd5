//! Playfield geometry for Burrow.
//!
//! Produces the ordered slot positions a playfield is built from
//! ([`SlotLayout`]) and the axis-aligned regions used to resolve a hit
//! point to a token ([`Aabb`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod layout;
pub mod region;

pub use error::SpaceError;
pub use layout::{SlotLayout, StaggeredGrid, Viewport};
pub use region::Aabb;
