#![forbid(unsafe_code)]

//! Grid geometry: simulation dimensions and the surface-to-grid downscale.
//!
//! The simulation runs on a grid deliberately coarser than the presentation
//! surface: each surface dimension is scaled by [`DOWNSCALE`] (flooring)
//! before buffers are allocated, and the presentation layer stretches the
//! rendered output back up. Cells are addressed in row-major order,
//! `(x, y) -> y * width + x`.

use crate::error::ConfigError;

/// Fixed surface-to-grid downscale factor.
///
/// Halving the resolution quarters the per-tick work; the refraction pass
/// hides the lost detail.
pub const DOWNSCALE: f32 = 0.5;

/// Simulation grid dimensions.
///
/// A `GridSize` may be empty (zero area); an empty grid is valid and simply
/// has no cells to simulate.
///
/// # Example
///
/// ```
/// use ripple_core::geometry::GridSize;
///
/// let size = GridSize::from_surface(800, 600).unwrap();
/// assert_eq!(size, GridSize::new(400, 300));
/// assert_eq!(size.index(0, 1), Some(400));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridSize {
    /// Grid width in cells.
    pub width: u16,
    /// Grid height in cells.
    pub height: u16,
}

impl GridSize {
    /// The empty grid.
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a grid size from explicit dimensions.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of cells.
    #[inline]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` if `(x, y)` addresses a cell of this grid.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Row-major flat index of `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub const fn index(self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Derive grid dimensions from a presentation surface's pixel size.
    ///
    /// Each dimension is scaled by [`DOWNSCALE`] and floored. A surface too
    /// small to produce at least one cell per axis yields an empty grid,
    /// which is not an error; negative dimensions are.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSurface`] when either dimension is negative.
    pub fn from_surface(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width < 0 || height < 0 {
            return Err(ConfigError::InvalidSurface { width, height });
        }
        let size = Self::new(scale_dim(width), scale_dim(height));
        crate::debug!(
            surface_width = width,
            surface_height = height,
            grid_width = size.width,
            grid_height = size.height,
            "derived grid size"
        );
        Ok(size)
    }
}

/// Scale one non-negative surface dimension down to a grid dimension.
fn scale_dim(surface: i32) -> u16 {
    let scaled = (surface as f32 * DOWNSCALE).floor();
    if scaled >= f32::from(u16::MAX) {
        u16::MAX
    } else {
        scaled as u16
    }
}
