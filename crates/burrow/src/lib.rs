//! Burrow: a slot/token pooling simulation loop.
//!
//! Tokens rise out of fixed slots, hold, and sink back, on a fixed spawn
//! cadence; a hit on a running token ends its lifecycle early. This facade
//! re-exports the public API of every Burrow sub-crate.
//!
//! # Quick start
//!
//! ```rust
//! use burrow::prelude::*;
//!
//! let layout = SlotLayout::row(20, 2.0).unwrap();
//! let mut field = Playfield::headless(PlayfieldConfig::new(layout)).unwrap();
//!
//! let report = field.step(1.0 / 60.0, &[]);
//! let spawn = report.spawned.unwrap();
//! assert_eq!(field.slots().free_count(), 19);
//!
//! // Tap the token where it currently sits.
//! let at = field.token(spawn.activation).unwrap().position;
//! let report = field.step(1.0 / 60.0, &[HitEvent { point: at }]);
//! assert_eq!(report.releases[0].cause, ReleaseCause::Interrupted);
//! assert_eq!(report.tick, TickId(2));
//! field.audit().unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `burrow-core` | IDs, `Vec2`, ownership errors, `Presenter` |
//! | [`space`] | `burrow-space` | Hit regions and slot layouts |
//! | [`pool`] | `burrow-pool` | Generic object pool and slot registry |
//! | [`engine`] | `burrow-engine` | Token lifecycle, scheduler and `Playfield` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and collaborator traits (`burrow-core`).
pub use burrow_core as types;

/// Hit regions, viewports and slot layouts (`burrow-space`).
///
/// [`space::SlotLayout::staggered`] builds the honeycomb hole grid.
pub use burrow_space as space;

/// Object pooling (`burrow-pool`).
///
/// [`pool::Pool`] recycles any [`pool::Recycle`] type;
/// [`pool::SlotRegistry`] hands out free slots at random.
pub use burrow_pool as pool;

/// The round loop (`burrow-engine`).
///
/// [`engine::Playfield`] owns every component and advances one frame per
/// [`engine::Playfield::step`] call.
pub use burrow_engine as engine;

/// Common imports for typical Burrow usage.
///
/// ```rust
/// use burrow::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use burrow_core::{
        Activation, DepthKey, NullPresenter, Presenter, SlotId, TickId, TokenId, Vec2, OFF_STAGE,
    };

    // Space
    pub use burrow_space::{Aabb, SlotLayout, StaggeredGrid, Viewport};

    // Engine
    pub use burrow_engine::{
        ConfigError, HitEvent, LifecycleError, Phase, Playfield, PlayfieldConfig,
        PlayfieldMetrics, ReleaseCause, StepReport, Tuning,
    };
}
