//! Round loop orchestrating Burrow playfields.
//!
//! Provides the [`Playfield`] that owns slots and tokens and drives the
//! token lifecycle, the spawn cadence and hit interruption one lockstep
//! frame at a time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod interrupt;
pub mod metrics;
pub mod playfield;
pub mod scheduler;
pub mod token;

pub use config::{ConfigError, MotionConfig, PlayfieldConfig, Tuning};
pub use error::LifecycleError;
pub use interrupt::{HitEvent, InterruptionHandler};
pub use metrics::{PlayfieldMetrics, Release, ReleaseCause, Spawn, StepReport};
pub use playfield::{Playfield, TokenView};
pub use scheduler::RoundScheduler;
pub use token::{Advance, MotionBounds, Phase, Token};
