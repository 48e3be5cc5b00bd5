//! Slot layouts: the fixed, ordered sequence of hole positions.

use burrow_core::{SlotId, Vec2};

use crate::error::SpaceError;

/// World-space rectangle visible to the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// World position of the bottom-left screen corner.
    pub bottom_left: Vec2,
    /// World position of the top-right screen corner.
    pub top_right: Vec2,
    /// Half the visible height in world units (orthographic size).
    pub ortho_size: f32,
}

impl Viewport {
    /// Viewport centered on the origin with the given world width and height.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            bottom_left: Vec2::new(-width / 2.0, -height / 2.0),
            top_right: Vec2::new(width / 2.0, height / 2.0),
            ortho_size: height / 2.0,
        }
    }
}

/// Parameters for the staggered hole grid.
///
/// Rows alternate between a long row and a row one hole shorter, shifted
/// by half a column, so holes pack like a honeycomb. Column count comes
/// from a reference aspect ratio (the narrowest supported screen) rather
/// than the actual viewport width, which keeps the hole count identical
/// across devices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggeredGrid {
    /// Camera rectangle.
    pub viewport: Viewport,
    /// Pitch of one hole in world units.
    pub hole_extent: f32,
    /// Width / height of the reference resolution.
    pub reference_aspect: f32,
    /// Fraction of the screen height kept free at the bottom.
    pub bottom_margin: f32,
    /// Fraction of the screen height kept free at the top.
    pub top_margin: f32,
}

impl StaggeredGrid {
    /// Reference resolution the column count is computed against.
    pub const REFERENCE_RESOLUTION: (f32, f32) = (1125.0, 2436.0);

    /// Grid over `viewport` with the default reference aspect and 10% margins.
    pub fn new(viewport: Viewport, hole_extent: f32) -> Self {
        let (w, h) = Self::REFERENCE_RESOLUTION;
        Self {
            viewport,
            hole_extent,
            reference_aspect: w / h,
            bottom_margin: 0.1,
            top_margin: 0.1,
        }
    }

    fn validate(&self) -> Result<(), SpaceError> {
        let vp = &self.viewport;
        let invalid = |reason: String| Err(SpaceError::InvalidGrid { reason });
        if !vp.bottom_left.is_finite() || !vp.top_right.is_finite() {
            return invalid("viewport corners must be finite".into());
        }
        if vp.top_right.x <= vp.bottom_left.x || vp.top_right.y <= vp.bottom_left.y {
            return invalid(format!(
                "viewport top-right {} must lie above and right of bottom-left {}",
                vp.top_right, vp.bottom_left
            ));
        }
        if !(vp.ortho_size.is_finite() && vp.ortho_size > 0.0) {
            return invalid(format!("ortho_size must be positive, got {}", vp.ortho_size));
        }
        if !(self.hole_extent.is_finite() && self.hole_extent > 0.0) {
            return invalid(format!(
                "hole_extent must be positive, got {}",
                self.hole_extent
            ));
        }
        if !(self.reference_aspect.is_finite() && self.reference_aspect > 0.0) {
            return invalid(format!(
                "reference_aspect must be positive, got {}",
                self.reference_aspect
            ));
        }
        let margins_ok = (0.0..1.0).contains(&self.bottom_margin)
            && (0.0..1.0).contains(&self.top_margin)
            && self.bottom_margin + self.top_margin < 1.0;
        if !margins_ok {
            return invalid(format!(
                "margins must be in [0, 1) and sum below 1, got bottom={} top={}",
                self.bottom_margin, self.top_margin
            ));
        }
        Ok(())
    }

    /// Compute hole positions, row by row from the bottom.
    pub fn positions(&self) -> Result<Vec<Vec2>, SpaceError> {
        self.validate()?;
        let vp = &self.viewport;
        let screen_h = vp.top_right.y - vp.bottom_left.y;
        let bottom = vp.bottom_left.y + screen_h * self.bottom_margin;
        let top = vp.top_right.y - screen_h * self.top_margin;
        let left = vp.bottom_left.x;
        let width = vp.top_right.x - vp.bottom_left.x;
        let height = top - bottom;

        let rows = (height / self.hole_extent) as usize;
        let ref_width = self.reference_aspect * vp.ortho_size * 2.0;
        let even_cols = (ref_width / self.hole_extent) as usize;
        if rows == 0 || even_cols == 0 {
            return Err(SpaceError::EmptyLayout);
        }
        let odd_cols = even_cols - 1;
        if odd_cols == 0 && rows > 1 {
            tracing::warn!(rows, "staggered grid has a single column; odd rows are empty");
        }

        let dy = height / rows as f32;
        let dx = width / even_cols as f32;

        let mut out = Vec::with_capacity(rows * even_cols);
        for row in 0..rows {
            let (cols, offset_x) = if row % 2 == 0 {
                (even_cols, dx / 2.0)
            } else {
                (odd_cols, dx)
            };
            let y = bottom + dy / 2.0 + dy * row as f32;
            for col in 0..cols {
                out.push(Vec2::new(left + offset_x + dx * col as f32, y));
            }
        }
        Ok(out)
    }
}

/// The fixed, ordered slot positions of a playfield.
///
/// Index `n` of the layout is the position of `SlotId(n)`. Construction
/// rejects empty layouts and non-finite positions, so every accessor can
/// assume at least one valid slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotLayout {
    positions: Vec<Vec2>,
}

impl SlotLayout {
    /// Build a layout from explicit positions.
    pub fn from_positions(positions: Vec<Vec2>) -> Result<Self, SpaceError> {
        if positions.is_empty() {
            return Err(SpaceError::EmptyLayout);
        }
        if positions.len() > u32::MAX as usize {
            return Err(SpaceError::TooManySlots {
                count: positions.len(),
            });
        }
        if let Some((index, &position)) = positions.iter().enumerate().find(|(_, p)| !p.is_finite())
        {
            return Err(SpaceError::NonFinitePosition { index, position });
        }
        Ok(Self { positions })
    }

    /// Build the staggered hole grid.
    pub fn staggered(grid: &StaggeredGrid) -> Result<Self, SpaceError> {
        Self::from_positions(grid.positions()?)
    }

    /// Evenly spaced slots along the x axis at `y = 0`.
    pub fn row(count: u32, spacing: f32) -> Result<Self, SpaceError> {
        Self::from_positions(
            (0..count)
                .map(|i| Vec2::new(i as f32 * spacing, 0.0))
                .collect(),
        )
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always returns `false`: construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position of `slot`, if it exists.
    pub fn position(&self, slot: SlotId) -> Option<Vec2> {
        self.positions.get(slot.0 as usize).copied()
    }

    /// All positions in slot order.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Consume the layout, yielding positions in slot order.
    pub fn into_positions(self) -> Vec<Vec2> {
        self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn phone_grid() -> StaggeredGrid {
        // 5 x 10 world units, 10% margins -> usable height 8.
        StaggeredGrid::new(Viewport::centered(5.0, 10.0), 1.0)
    }

    #[test]
    fn staggered_rows_alternate_column_counts() {
        let positions = phone_grid().positions().unwrap();
        // 8 rows; reference width = 0.4618 * 10 = 4.6 -> 4 long, 3 short.
        assert_eq!(positions.len(), 4 * 4 + 4 * 3);

        let rows: Vec<f32> = {
            let mut ys: Vec<f32> = positions.iter().map(|p| p.y).collect();
            ys.dedup();
            ys
        };
        assert_eq!(rows.len(), 8);
        assert_eq!(positions.iter().filter(|p| p.y == rows[0]).count(), 4);
        assert_eq!(positions.iter().filter(|p| p.y == rows[1]).count(), 3);
    }

    #[test]
    fn first_slots_follow_half_column_offsets() {
        let positions = phone_grid().positions().unwrap();
        // dx = 5 / 4 = 1.25, dy = 1.0, bottom = -4.0.
        assert_eq!(positions[0], Vec2::new(-2.5 + 0.625, -3.5));
        assert_eq!(positions[1], Vec2::new(-2.5 + 0.625 + 1.25, -3.5));
        // First slot of the short row is shifted a full column.
        assert_eq!(positions[4], Vec2::new(-2.5 + 1.25, -2.5));
    }

    #[test]
    fn hole_larger_than_playfield_is_empty() {
        let grid = StaggeredGrid::new(Viewport::centered(5.0, 10.0), 20.0);
        assert_eq!(SlotLayout::staggered(&grid), Err(SpaceError::EmptyLayout));
    }

    #[test]
    fn bad_margins_rejected() {
        let mut grid = phone_grid();
        grid.bottom_margin = 0.6;
        grid.top_margin = 0.5;
        assert!(matches!(
            grid.positions(),
            Err(SpaceError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn inverted_viewport_rejected() {
        let mut grid = phone_grid();
        std::mem::swap(
            &mut grid.viewport.bottom_left,
            &mut grid.viewport.top_right,
        );
        let err = grid.positions().unwrap_err();
        assert!(err.to_string().contains("viewport"), "got: {err}");
    }

    #[test]
    fn from_positions_rejects_empty_and_nan() {
        assert_eq!(
            SlotLayout::from_positions(vec![]),
            Err(SpaceError::EmptyLayout)
        );
        let err = SlotLayout::from_positions(vec![Vec2::ZERO, Vec2::new(f32::NAN, 1.0)])
            .unwrap_err();
        assert!(matches!(err, SpaceError::NonFinitePosition { index: 1, .. }));
    }

    #[test]
    fn row_layout_positions() {
        let layout = SlotLayout::row(3, 2.0).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.position(SlotId(2)), Some(Vec2::new(4.0, 0.0)));
        assert_eq!(layout.position(SlotId(3)), None);
    }

    proptest! {
        #[test]
        fn staggered_positions_stay_inside_margins(
            width in 2.0f32..20.0,
            height in 4.0f32..40.0,
            hole in 0.25f32..2.0,
        ) {
            let grid = StaggeredGrid::new(Viewport::centered(width, height), hole);
            if let Ok(positions) = grid.positions() {
                let bottom = -height / 2.0 + height * 0.1;
                let top = height / 2.0 - height * 0.1;
                for p in positions {
                    prop_assert!(p.y > bottom && p.y < top);
                    prop_assert!(p.x > -width / 2.0 && p.x < width / 2.0);
                }
            }
        }
    }
}
