//! Reusable layout fixtures.
//!
//! Motion constants for tests live next to the engine's config types; the
//! fixtures here only build layouts, so this crate stays free of an engine
//! dependency.

use burrow_core::Vec2;
use burrow_space::{SlotLayout, StaggeredGrid, Viewport};

/// Spacing between [`row_layout`] slots. Wide enough that hit regions of
/// neighbouring slots never overlap.
pub const ROW_SPACING: f32 = 10.0;

/// `count` slots along the x axis, [`ROW_SPACING`] apart.
///
/// # Panics
///
/// If `count` is zero.
pub fn row_layout(count: u32) -> SlotLayout {
    SlotLayout::row(count, ROW_SPACING).expect("row layout needs at least one slot")
}

/// Base position of slot `index` in a [`row_layout`].
pub fn row_position(index: u32) -> Vec2 {
    Vec2::new(index as f32 * ROW_SPACING, 0.0)
}

/// The staggered grid on a portrait 1125×2436 screen with orthographic
/// half-height 10 and one-unit holes.
pub fn portrait_layout() -> SlotLayout {
    let viewport = Viewport::centered(1125.0 / 2436.0 * 20.0, 20.0);
    SlotLayout::staggered(&StaggeredGrid::new(viewport, 1.0))
        .expect("portrait grid is valid")
}
