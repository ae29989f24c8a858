#![forbid(unsafe_code)]

//! Wave propagation stepper.
//!
//! One step computes, for every interior cell, half the sum of its four von
//! Neumann neighbors' current amplitudes minus the cell's own previous
//! amplitude, then sheds 1/32 of the result as damping and stores it into
//! the previous buffer:
//!
//! ```text
//! val  = ((left + right + above + below) >> 1) - previous[cell]
//! val -= val >> 5
//! ```
//!
//! The halving shift is the integrator's wave-speed term and the damping
//! shift its energy drain; both are arithmetic shifts on `i32`, so negative
//! amplitudes round toward negative infinity instead of toward zero. The
//! final store truncates to `i16` and silently wraps. Edge rows and columns
//! are never written, which pins the boundary at whatever resize left there.
//!
//! The caller is expected to [`swap`](crate::field::HeightField::swap) after
//! each step so the freshly written generation becomes current.

use crate::field::HeightField;

/// Shift applied to the neighbor sum; `>> 1` halves it.
pub const WAVE_SHIFT: u32 = 1;

/// Damping shift; each step removes `val >> 5`, about 3% of the amplitude.
pub const DAMPING_SHIFT: u32 = 5;

/// Advances the field by one tick, writing the next generation into the
/// previous buffer. No-op on grids without interior cells (width or height
/// below 3).
pub fn step(field: &mut HeightField) {
    let size = field.size();
    let w = size.width as usize;
    let h = size.height as usize;
    if w < 3 || h < 3 {
        return;
    }
    let (cur, prev) = field.split_mut();
    for y in 1..h - 1 {
        let line = y * w;
        let above = line - w;
        let below = line + w;
        for x in 1..w - 1 {
            let i = line + x;
            let sum = i32::from(cur[i - 1])
                + i32::from(cur[i + 1])
                + i32::from(cur[above + x])
                + i32::from(cur[below + x]);
            let mut val = (sum >> WAVE_SHIFT) - i32::from(prev[i]);
            val -= val >> DAMPING_SHIFT;
            prev[i] = val as i16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::geometry::GridSize;
    use ripple_core::rng::Xorshift32;

    fn field(w: u16, h: u16) -> HeightField {
        HeightField::new(GridSize::new(w, h))
    }

    #[test]
    fn zero_field_stays_zero() {
        let mut f = field(12, 9);
        step(&mut f);
        assert!(f.previous().iter().all(|&v| v == 0));
        assert!(f.current().iter().all(|&v| v == 0));
    }

    #[test]
    fn unit_impulse_spreads_to_von_neumann_neighbors() {
        let mut f = field(9, 9);
        let center = f.index(4, 4).unwrap();
        f.current_mut()[center] = 400;

        step(&mut f);
        f.swap();

        // Each neighbor sees one 400 among its four inputs:
        // (400 >> 1) = 200, damped by 200 >> 5 = 6, leaving 194.
        for (x, y) in [(3, 4), (5, 4), (4, 3), (4, 5)] {
            assert_eq!(f.get(x, y), Some(194), "neighbor ({x}, {y})");
        }
        // The center's own neighbors were all zero.
        assert_eq!(f.get(4, 4), Some(0));
        // Diagonals are outside the von Neumann stencil.
        for (x, y) in [(3, 3), (5, 3), (3, 5), (5, 5)] {
            assert_eq!(f.get(x, y), Some(0), "diagonal ({x}, {y})");
        }
        // The untouched generation still carries the impulse.
        assert_eq!(f.previous()[center], 400);
    }

    #[test]
    fn edge_cells_are_never_written() {
        let mut f = field(10, 7);
        f.current_mut().fill(1000);
        // Sentinels on the edges of the generation about to be written.
        let (w, h) = (10i32, 7i32);
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    let i = f.index(x, y).unwrap();
                    f.previous_mut()[i] = i16::MIN;
                }
            }
        }

        step(&mut f);

        for y in 0..h {
            for x in 0..w {
                let i = f.index(x, y).unwrap();
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    assert_eq!(f.previous()[i], i16::MIN, "edge ({x}, {y})");
                } else {
                    assert_ne!(f.previous()[i], i16::MIN, "interior ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn halving_shift_rounds_toward_negative_infinity() {
        // A lone -1 neighbor against previous = -100:
        //   (-1 >> 1) = -1, val = -1 + 100 = 99, damped by 99 >> 5 = 3 to 96.
        // Truncating division would give -1/2 = 0, val = 100, damped to 97.
        let mut f = field(3, 3);
        let left = f.index(0, 1).unwrap();
        let center = f.index(1, 1).unwrap();
        f.current_mut()[left] = -1;
        f.previous_mut()[center] = -100;

        step(&mut f);
        assert_eq!(f.previous()[center], 96);
    }

    #[test]
    fn damping_shift_rounds_toward_negative_infinity() {
        // Neighbor sum -2 against previous = 16:
        //   val = -1 - 16 = -17, damping (-17 >> 5) = -1, result -16.
        // Truncating division damping (-17 / 32 = 0) would leave -17.
        let mut f = field(3, 3);
        for (x, y) in [(0, 1), (2, 1)] {
            let i = f.index(x, y).unwrap();
            f.current_mut()[i] = -1;
        }
        let center = f.index(1, 1).unwrap();
        f.previous_mut()[center] = 16;

        step(&mut f);
        assert_eq!(f.previous()[center], -16);
    }

    #[test]
    fn stores_truncate_and_wrap() {
        // Four saturated neighbors: sum 131068, halved 65534, damped by
        // 65534 >> 5 = 2047 down to 63487, which wraps to -2049 as i16.
        let mut f = field(3, 3);
        for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            let i = f.index(x, y).unwrap();
            f.current_mut()[i] = i16::MAX;
        }

        step(&mut f);
        assert_eq!(f.previous()[f.index(1, 1).unwrap()], -2049);
    }

    #[test]
    fn grids_without_interior_are_untouched() {
        for (w, h) in [(0, 0), (1, 1), (2, 5), (5, 2), (1, 9)] {
            let mut f = field(w, h);
            f.current_mut().fill(123);
            f.previous_mut().fill(-45);
            step(&mut f);
            assert!(f.current().iter().all(|&v| v == 123), "{w}x{h}");
            assert!(f.previous().iter().all(|&v| v == -45), "{w}x{h}");
        }
    }

    #[test]
    fn damping_drains_a_bounded_field() {
        let mut f = field(16, 12);
        let mut rng = Xorshift32::new(0xD1CE_D00D);
        let (w, h) = (16i32, 12i32);
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = f.index(x, y).unwrap();
                let v = (rng.next_u32() % 2001) as i32 - 1000;
                f.current_mut()[i] = v as i16;
                let v = (rng.next_u32() % 2001) as i32 - 1000;
                f.previous_mut()[i] = v as i16;
            }
        }
        let energy = |cells: &[i16]| -> i64 {
            cells.iter().map(|&v| i64::from(v).abs()).sum()
        };
        let before = energy(f.current()) + energy(f.previous());
        assert!(before > 0);

        for _ in 0..400 {
            step(&mut f);
            f.swap();
        }

        let after = energy(f.current()) + energy(f.previous());
        assert!(
            after <= before / 4,
            "damping too weak: {before} -> {after}"
        );
        // Edges were zero and the stepper never writes them.
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    assert_eq!(f.get(x, y), Some(0), "edge ({x}, {y})");
                }
            }
        }
    }
}
