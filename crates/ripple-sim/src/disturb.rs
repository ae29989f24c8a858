#![forbid(unsafe_code)]

//! Impulse injection.
//!
//! A disturbance raises a small disc of cells in the current buffer by a
//! fixed amount; the next stepper pass turns the raised disc into an
//! outward-travelling ring. Impulses that would touch the edge margin are
//! dropped entirely rather than clipped, which keeps the boundary cells at
//! zero without any per-cell bounds checks in the write loop.

use ripple_core::geometry::GridSize;

use crate::field::HeightField;

/// Disc radius of an injected impulse, in cells. Doubles as the margin the
/// disc center must keep from every edge.
pub const RADIUS: i32 = 4;

/// Amplitude added to each cell inside the disc. Additions wrap, matching
/// the stepper's truncating stores.
pub const STRENGTH: i16 = 400;

/// Adds an impulse disc centered on `(x, y)` to the current buffer.
///
/// Cells strictly inside the Euclidean disc (`dx*dx + dy*dy < RADIUS*RADIUS`)
/// each gain [`STRENGTH`]. The call is a no-op when the center is out of
/// bounds or closer than [`RADIUS`] to an edge, including on grids too small
/// to hold the disc at all.
pub fn disturb(field: &mut HeightField, x: i32, y: i32) {
    let GridSize { width, height } = field.size();
    let (w, h) = (i32::from(width), i32::from(height));
    if x < RADIUS || x >= w - RADIUS || y < RADIUS || y >= h - RADIUS {
        return;
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(x, y, "impulse injected");

    // The margin check above guarantees every cell of the bounding box is
    // in bounds, and the strict distance test keeps the extremes out.
    let row = width as usize;
    let cur = field.current_mut();
    for cy in (y - RADIUS)..(y + RADIUS) {
        let line = cy as usize * row;
        for cx in (x - RADIUS)..(x + RADIUS) {
            let (dx, dy) = (cx - x, cy - y);
            if dx * dx + dy * dy < RADIUS * RADIUS {
                let i = line + cx as usize;
                cur[i] = cur[i].wrapping_add(STRENGTH);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(w: u16, h: u16) -> HeightField {
        HeightField::new(GridSize::new(w, h))
    }

    #[test]
    fn disc_is_strict_euclidean_distance() {
        let mut f = field(16, 16);
        disturb(&mut f, 8, 8);
        for y in 0..16 {
            for x in 0..16 {
                let (dx, dy) = (x - 8, y - 8);
                let expected = if dx * dx + dy * dy < 16 { 400 } else { 0 };
                assert_eq!(f.get(x, y), Some(expected), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn axis_extremes_are_outside_the_disc() {
        let mut f = field(16, 16);
        disturb(&mut f, 8, 8);
        // Distance exactly RADIUS does not qualify.
        assert_eq!(f.get(4, 8), Some(0));
        assert_eq!(f.get(12, 8), Some(0));
        assert_eq!(f.get(8, 4), Some(0));
        assert_eq!(f.get(8, 12), Some(0));
        // One cell closer does.
        assert_eq!(f.get(5, 8), Some(400));
        assert_eq!(f.get(11, 8), Some(400));
    }

    #[test]
    fn margin_violations_change_nothing() {
        for (x, y) in [(3, 8), (12, 8), (8, 3), (8, 12), (-5, 8), (8, 40)] {
            let mut f = field(16, 16);
            disturb(&mut f, x, y);
            assert!(
                f.current().iter().all(|&v| v == 0),
                "center ({x}, {y}) should have been rejected"
            );
        }
    }

    #[test]
    fn tightest_accepted_center_stays_in_bounds() {
        // On a 9x9 grid only (4, 4) passes the margin check; the disc rows
        // and columns it writes are 1..=7.
        let mut f = field(9, 9);
        disturb(&mut f, 4, 4);
        assert_eq!(f.get(4, 4), Some(400));
        for i in 0..9 {
            assert_eq!(f.get(i, 0), Some(0));
            assert_eq!(f.get(i, 8), Some(0));
            assert_eq!(f.get(0, i), Some(0));
            assert_eq!(f.get(8, i), Some(0));
        }
    }

    #[test]
    fn grids_smaller_than_the_disc_reject_everything() {
        let mut f = field(8, 8);
        for y in -2..10 {
            for x in -2..10 {
                disturb(&mut f, x, y);
            }
        }
        assert!(f.current().iter().all(|&v| v == 0));

        let mut empty = field(0, 0);
        disturb(&mut empty, 0, 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn repeated_impulses_accumulate() {
        let mut f = field(16, 16);
        disturb(&mut f, 8, 8);
        disturb(&mut f, 8, 8);
        assert_eq!(f.get(8, 8), Some(800));
    }

    #[test]
    fn accumulation_wraps_like_the_stepper() {
        let mut f = field(16, 16);
        let i = f.index(8, 8).unwrap();
        f.current_mut()[i] = 32700;
        disturb(&mut f, 8, 8);
        assert_eq!(f.get(8, 8), Some(-32436));
    }

    #[test]
    fn previous_buffer_is_untouched() {
        let mut f = field(16, 16);
        disturb(&mut f, 8, 8);
        assert!(f.previous().iter().all(|&v| v == 0));
    }
}
