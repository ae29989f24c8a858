#![forbid(unsafe_code)]

//! Half-block frame presentation.
//!
//! Each terminal cell shows two vertically stacked frame pixels through the
//! upper-half-block glyph: the foreground color paints the top pixel, the
//! background color the bottom one. Since a character cell is roughly twice
//! as tall as it is wide, the doubled rows come out square-ish and ripples
//! stay round. Colors are only re-emitted when they change, which keeps a
//! full repaint to a fraction of the naive byte count.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use ripple::PixelBuffer;

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// Writes `frame` to `out`, two pixel rows per terminal row, starting at
/// the terminal origin, and flushes.
///
/// The frame is expected to span `cols x 2*rows` pixels; anything beyond
/// the frame is left untouched, so a frame mid-resize paints short rather
/// than panicking.
pub fn present(
    out: &mut impl Write,
    frame: &PixelBuffer,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    let size = frame.size();
    let (w, h) = (usize::from(size.width), usize::from(size.height));
    let data = frame.data();

    let mut last_fg = None;
    let mut last_bg = None;
    for row in 0..rows {
        let top_y = usize::from(row) * 2;
        if top_y >= h {
            break;
        }
        queue!(out, MoveTo(0, row))?;
        for col in 0..cols.min(w as u16) {
            let x = usize::from(col);
            let top = pixel_color(data, w, x, top_y);
            let bottom = if top_y + 1 < h {
                pixel_color(data, w, x, top_y + 1)
            } else {
                top
            };

            if last_fg != Some(top) {
                queue!(out, SetForegroundColor(top))?;
                last_fg = Some(top);
            }
            if last_bg != Some(bottom) {
                queue!(out, SetBackgroundColor(bottom))?;
                last_bg = Some(bottom);
            }
            queue!(out, Print(UPPER_HALF_BLOCK))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

fn pixel_color(data: &[u8], width: usize, x: usize, y: usize) -> Color {
    let i = (y * width + x) * 4;
    Color::Rgb {
        r: data[i],
        g: data[i + 1],
        b: data[i + 2],
    }
}
