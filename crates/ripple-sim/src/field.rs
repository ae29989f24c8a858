#![forbid(unsafe_code)]

//! Double-buffered height field.
//!
//! Two equally sized flat grids of `i16` wave amplitudes. One buffer holds
//! the state being displayed and disturbed (*current*), the other holds the
//! state one tick older (*previous*). The stepper reads current and writes
//! previous, after which [`HeightField::swap`] flips the roles by toggling a
//! flag; no cell is ever copied.
//!
//! # Invariants
//!
//! - Both buffers always have exactly `size.area()` cells.
//! - `swap` is O(1) and preserves every cell of both buffers.
//! - Edge cells are only written by [`HeightField::resize`]; the stepper
//!   skips them and the injector's margin keeps impulses away from them, so
//!   they stay at the value resize gave them (zero).

use ripple_core::geometry::GridSize;

/// Two-generation store of wave amplitudes for one grid size.
///
/// Amplitudes are fixed-point `i16` values that wrap on overflow, matching
/// the stepper's truncating arithmetic. An empty field (zero cells) is valid
/// and every operation on it is a no-op.
#[derive(Clone, Debug)]
pub struct HeightField {
    size: GridSize,
    a: Vec<i16>,
    b: Vec<i16>,
    /// Role flag: `false` means `a` is current, `true` means `b` is.
    flipped: bool,
}

impl HeightField {
    /// Creates a zeroed field with two buffers of `size.area()` cells each.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        let cells = size.area();
        Self {
            size,
            a: vec![0; cells],
            b: vec![0; cells],
            flipped: false,
        }
    }

    /// Grid size shared by both buffers.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// True when the field holds no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// True when the field already matches `size` and resize may be skipped.
    #[must_use]
    pub const fn dimensions_match(&self, size: GridSize) -> bool {
        self.size.width == size.width && self.size.height == size.height
    }

    /// Reallocates both buffers for `size` and zeroes every cell.
    ///
    /// In-flight waves are discarded; there is no attempt to rescale old
    /// amplitudes onto the new grid.
    pub fn resize(&mut self, size: GridSize) {
        let cells = size.area();
        self.size = size;
        self.a.clear();
        self.a.resize(cells, 0);
        self.b.clear();
        self.b.resize(cells, 0);
        self.flipped = false;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            width = size.width,
            height = size.height,
            cells,
            "height field resized"
        );
    }

    /// Swaps the roles of the two buffers. O(1), never copies cells.
    pub fn swap(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Cells of the current (displayed) buffer.
    #[must_use]
    pub fn current(&self) -> &[i16] {
        if self.flipped { &self.b } else { &self.a }
    }

    /// Mutable cells of the current buffer. Impulses land here.
    #[must_use]
    pub fn current_mut(&mut self) -> &mut [i16] {
        if self.flipped { &mut self.b } else { &mut self.a }
    }

    /// Cells of the previous (one tick older) buffer.
    #[must_use]
    pub fn previous(&self) -> &[i16] {
        if self.flipped { &self.a } else { &self.b }
    }

    /// Mutable cells of the previous buffer. The stepper writes here.
    #[must_use]
    pub fn previous_mut(&mut self) -> &mut [i16] {
        if self.flipped { &mut self.a } else { &mut self.b }
    }

    /// Borrows current read-only and previous mutably at the same time,
    /// exactly the pair the stepper needs.
    #[must_use]
    pub fn split_mut(&mut self) -> (&[i16], &mut [i16]) {
        if self.flipped {
            (&self.b, &mut self.a)
        } else {
            (&self.a, &mut self.b)
        }
    }

    /// Flat row-major index for `(x, y)`, `None` when out of bounds.
    #[must_use]
    pub const fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.size.index(x, y)
    }

    /// Current-buffer amplitude at `(x, y)`, `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<i16> {
        self.index(x, y).map(|i| self.current()[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u16, h: u16) -> GridSize {
        GridSize::new(w, h)
    }

    #[test]
    fn new_field_is_zeroed() {
        let field = HeightField::new(size(7, 5));
        assert_eq!(field.size().area(), 35);
        assert!(field.current().iter().all(|&v| v == 0));
        assert!(field.previous().iter().all(|&v| v == 0));
    }

    #[test]
    fn empty_field_is_valid() {
        let field = HeightField::new(GridSize::EMPTY);
        assert!(field.is_empty());
        assert!(field.current().is_empty());
        assert!(field.previous().is_empty());
        assert_eq!(field.get(0, 0), None);
    }

    #[test]
    fn swap_flips_roles_without_copying() {
        let mut field = HeightField::new(size(4, 4));
        field.current_mut()[5] = 123;
        field.previous_mut()[5] = -77;

        field.swap();
        assert_eq!(field.current()[5], -77);
        assert_eq!(field.previous()[5], 123);

        field.swap();
        assert_eq!(field.current()[5], 123);
        assert_eq!(field.previous()[5], -77);
    }

    #[test]
    fn split_mut_pairs_current_with_previous() {
        let mut field = HeightField::new(size(3, 3));
        field.current_mut()[4] = 42;
        let (cur, prev) = field.split_mut();
        assert_eq!(cur[4], 42);
        prev[4] = 9;
        assert_eq!(field.previous()[4], 9);
        assert_eq!(field.current()[4], 42);
    }

    #[test]
    fn split_mut_respects_swapped_roles() {
        let mut field = HeightField::new(size(3, 3));
        field.swap();
        let (cur, prev) = field.split_mut();
        prev[0] = 1;
        assert_eq!(cur[0], 0);
        field.swap();
        assert_eq!(field.current()[0], 1);
    }

    #[test]
    fn resize_discards_state_and_zeroes() {
        let mut field = HeightField::new(size(6, 6));
        field.current_mut().fill(500);
        field.previous_mut().fill(-500);
        field.swap();

        field.resize(size(8, 3));
        assert_eq!(field.size(), size(8, 3));
        assert_eq!(field.current().len(), 24);
        assert_eq!(field.previous().len(), 24);
        assert!(field.current().iter().all(|&v| v == 0));
        assert!(field.previous().iter().all(|&v| v == 0));
    }

    #[test]
    fn resize_to_empty_releases_cells() {
        let mut field = HeightField::new(size(6, 6));
        field.resize(GridSize::EMPTY);
        assert!(field.is_empty());
        assert!(field.current().is_empty());
    }

    #[test]
    fn dimensions_match_compares_both_axes() {
        let field = HeightField::new(size(6, 4));
        assert!(field.dimensions_match(size(6, 4)));
        assert!(!field.dimensions_match(size(4, 6)));
        assert!(!field.dimensions_match(size(6, 5)));
    }

    #[test]
    fn get_reads_current_buffer_row_major() {
        let mut field = HeightField::new(size(5, 4));
        let idx = field.index(3, 2).unwrap();
        assert_eq!(idx, 2 * 5 + 3);
        field.current_mut()[idx] = -12;
        assert_eq!(field.get(3, 2), Some(-12));
        assert_eq!(field.get(5, 2), None);
        assert_eq!(field.get(3, 4), None);
        assert_eq!(field.get(-1, 0), None);
    }
}
