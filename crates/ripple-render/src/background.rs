#![forbid(unsafe_code)]

//! Static background generator.
//!
//! The background is painted once per resize and then only read: the
//! refraction pass displaces and shades it but never mutates it. Layers are
//! composited in order over an opaque base, so every produced pixel ends at
//! alpha 255:
//!
//! 1. vertical linear gradient (deep night blue into teal),
//! 2. faint 1 px grid lines on both axes,
//! 3. a scatter of translucent circles,
//! 4. a large centered watermark label from an embedded 5x7 glyph face.
//!
//! Everything above the gradient is cosmetic and overridable through
//! [`BackgroundStyle`]; generation is deterministic for a fixed style and
//! seed.

use smallvec::{SmallVec, smallvec};

use ripple_core::geometry::GridSize;
use ripple_core::rng::Xorshift32;

use crate::pixel::{PackedRgba, PixelBuffer};

/// One gradient control point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis, `0.0` = top, `1.0` = bottom.
    pub at: f32,
    pub color: PackedRgba,
}

impl GradientStop {
    #[must_use]
    pub const fn new(at: f32, color: PackedRgba) -> Self {
        Self { at, color }
    }
}

/// Cosmetic parameters of the generated background.
///
/// Fields are public; start from [`BackgroundStyle::default`] and override
/// what you need. Gradient stops must be ascending by `at`. A `grid_spacing`
/// of zero disables the grid, a `circle_count` of zero the circles and an
/// empty `label` the watermark.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundStyle {
    pub gradient: SmallVec<[GradientStop; 4]>,
    pub grid_spacing: u16,
    pub grid_color: PackedRgba,
    pub circle_count: u16,
    pub circle_radius_min: f32,
    pub circle_radius_max: f32,
    pub circle_color: PackedRgba,
    pub label: String,
    pub label_color: PackedRgba,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            gradient: smallvec![
                GradientStop::new(0.0, PackedRgba::rgb(0x02, 0x06, 0x17)),
                GradientStop::new(0.5, PackedRgba::rgb(0x1e, 0x3a, 0x8a)),
                GradientStop::new(1.0, PackedRgba::rgb(0x0e, 0x74, 0x90)),
            ],
            grid_spacing: 40,
            grid_color: PackedRgba::WHITE.with_opacity(0.15),
            circle_count: 30,
            circle_radius_min: 5.0,
            circle_radius_max: 20.0,
            circle_color: PackedRgba::WHITE.with_opacity(0.1),
            label: String::from("FLUID"),
            label_color: PackedRgba::WHITE.with_opacity(0.05),
        }
    }
}

/// Paints a fresh background for `size`.
///
/// The rng drives only the circle scatter (center x, center y, radius, in
/// that order per circle); reusing a seed reproduces the buffer exactly.
#[must_use]
pub fn generate(size: GridSize, style: &BackgroundStyle, rng: &mut Xorshift32) -> PixelBuffer {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "background_generate",
        width = size.width,
        height = size.height
    )
    .entered();

    let mut buf = PixelBuffer::new(size);
    if size.is_empty() {
        return buf;
    }

    paint_gradient(&mut buf, &style.gradient);
    paint_grid(&mut buf, style.grid_spacing, style.grid_color);
    paint_circles(&mut buf, style, rng);
    paint_label(&mut buf, &style.label, style.label_color);
    buf
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
}

fn lerp_color(a: PackedRgba, b: PackedRgba, t: f32) -> PackedRgba {
    PackedRgba::rgba(
        lerp_channel(a.r(), b.r(), t),
        lerp_channel(a.g(), b.g(), t),
        lerp_channel(a.b(), b.b(), t),
        lerp_channel(a.a(), b.a(), t),
    )
}

fn sample_gradient(stops: &[GradientStop], t: f32) -> PackedRgba {
    let Some(first) = stops.first() else {
        return PackedRgba::BLACK;
    };
    if t <= first.at {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.at {
            let span = hi.at - lo.at;
            let local = if span > 0.0 { (t - lo.at) / span } else { 1.0 };
            return lerp_color(lo.color, hi.color, local);
        }
    }
    // Past the last stop.
    stops[stops.len() - 1].color
}

fn paint_gradient(buf: &mut PixelBuffer, stops: &[GradientStop]) {
    let GridSize { width, height } = buf.size();
    let denom = f32::from(height.saturating_sub(1)).max(1.0);
    for y in 0..i32::from(height) {
        let color = sample_gradient(stops, y as f32 / denom);
        for x in 0..i32::from(width) {
            buf.set(x, y, color);
        }
    }
}

fn paint_grid(buf: &mut PixelBuffer, spacing: u16, color: PackedRgba) {
    if spacing == 0 {
        return;
    }
    let GridSize { width, height } = buf.size();
    let step = i32::from(spacing);
    let mut x = 0;
    while x < i32::from(width) {
        for y in 0..i32::from(height) {
            buf.blend(x, y, color);
        }
        x += step;
    }
    let mut y = 0;
    while y < i32::from(height) {
        for x in 0..i32::from(width) {
            // Crossings get the line color twice, like two strokes would.
            buf.blend(x, y, color);
        }
        y += step;
    }
}

fn paint_circles(buf: &mut PixelBuffer, style: &BackgroundStyle, rng: &mut Xorshift32) {
    let GridSize { width, height } = buf.size();
    for _ in 0..style.circle_count {
        let cx = rng.range_f32(0.0, f32::from(width));
        let cy = rng.range_f32(0.0, f32::from(height));
        let r = rng.range_f32(style.circle_radius_min, style.circle_radius_max);
        let r2 = r * r;

        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        for y in y0.max(0)..=y1.min(i32::from(height) - 1) {
            for x in x0.max(0)..=x1.min(i32::from(width) - 1) {
                let (dx, dy) = (x as f32 - cx, y as f32 - cy);
                if dx * dx + dy * dy <= r2 {
                    buf.blend(x, y, style.circle_color);
                }
            }
        }
    }
}

/// 5x7 uppercase glyph face, one row mask per scanline, bit 4 = left column.
/// Unknown characters render as blanks and still advance the pen.
fn glyph_rows(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        _ => [0; 7],
    }
}

const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;
/// Horizontal advance per glyph, in glyph cells (5 ink + 1 gap).
const GLYPH_ADVANCE: usize = 6;

fn paint_label(buf: &mut PixelBuffer, label: &str, color: PackedRgba) {
    if label.is_empty() {
        return;
    }
    let GridSize { width, height } = buf.size();
    let glyph_count = label.chars().count();

    // The watermark height tracks the surface width, matching a bold
    // `width/6` typeface on a full-bleed canvas.
    let cell = f32::from(width) / 6.0 / GLYPH_ROWS as f32;
    let label_cells = (glyph_count * GLYPH_ADVANCE - 1) as f32;
    let x_origin = (f32::from(width) - label_cells * cell) / 2.0;
    let y_origin = (f32::from(height) - GLYPH_ROWS as f32 * cell) / 2.0;

    for (k, ch) in label.chars().enumerate() {
        let rows = glyph_rows(ch);
        let glyph_x = x_origin + (k * GLYPH_ADVANCE) as f32 * cell;
        for (row, mask) in rows.iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if mask & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                    continue;
                }
                let x0 = (glyph_x + col as f32 * cell).round() as i32;
                let x1 = (glyph_x + (col + 1) as f32 * cell).round() as i32;
                let y0 = (y_origin + row as f32 * cell).round() as i32;
                let y1 = (y_origin + (row + 1) as f32 * cell).round() as i32;
                for y in y0.max(0)..y1.min(i32::from(height)) {
                    for x in x0.max(0)..x1.min(i32::from(width)) {
                        buf.blend(x, y, color);
                    }
                }
            }
        }
    }
}
