#![forbid(unsafe_code)]

//! Refraction pass: height field in, displaced and shaded background out.
//!
//! For every pixel the pass reads the horizontal and vertical amplitude
//! differences around the cell (clamped to the grid at the edges), displaces
//! the background lookup by an eighth of each difference and brightens or
//! darkens the fetched color by a sixteenth of the horizontal one:
//!
//! ```text
//! x_offset = state[x-1, y] - state[x+1, y]
//! y_offset = state[x, y-1] - state[x, y+1]
//! shading  = x_offset >> 4
//! src      = (x + (x_offset >> 3), y + (y_offset >> 3))   clamped in-grid
//! out.rgb  = background[src].rgb + shading                clamped to [0, 255]
//! out.a    = 255
//! ```
//!
//! Only the horizontal difference feeds the shading term, which gives the
//! water its directional glint. A zero field degenerates to an exact copy of
//! the background. The output is fully overwritten; nothing is read from it.

use ripple_core::geometry::GridSize;

use crate::pixel::PixelBuffer;

/// Renders one frame from `state` over `background` into `output`.
///
/// `state` is the freshly stepped height buffer laid out row-major for
/// `size`.
///
/// # Panics
///
/// Panics if `state`, `background` and `output` do not all match `size`;
/// the driver keeps all three in lockstep, so a mismatch is a bug in the
/// caller.
pub fn refract(state: &[i16], size: GridSize, background: &PixelBuffer, output: &mut PixelBuffer) {
    assert_eq!(state.len(), size.area(), "state length != grid area");
    assert_eq!(background.size(), size, "background size != grid size");
    assert_eq!(output.size(), size, "output size != grid size");

    #[cfg(feature = "tracing")]
    let _span =
        tracing::debug_span!("refract", width = size.width, height = size.height).entered();

    let w = size.width as usize;
    let h = size.height as usize;
    let bg = background.data();
    let out = output.data_mut();

    for y in 0..h {
        let line = y * w;
        let above = (if y == 0 { 0 } else { y - 1 }) * w;
        let below = (if y + 1 >= h { y } else { y + 1 }) * w;
        for x in 0..w {
            let left = if x == 0 { 0 } else { x - 1 };
            let right = if x + 1 >= w { x } else { x + 1 };

            let x_offset = i32::from(state[line + left]) - i32::from(state[line + right]);
            let y_offset = i32::from(state[above + x]) - i32::from(state[below + x]);
            let shading = x_offset >> 4;

            let src_x = (x as i32 + (x_offset >> 3)).clamp(0, w as i32 - 1) as usize;
            let src_y = (y as i32 + (y_offset >> 3)).clamp(0, h as i32 - 1) as usize;
            let src = (src_y * w + src_x) * 4;
            let dst = (line + x) * 4;

            out[dst] = (i32::from(bg[src]) + shading).clamp(0, 255) as u8;
            out[dst + 1] = (i32::from(bg[src + 1]) + shading).clamp(0, 255) as u8;
            out[dst + 2] = (i32::from(bg[src + 2]) + shading).clamp(0, 255) as u8;
            out[dst + 3] = 255;
        }
    }
}
