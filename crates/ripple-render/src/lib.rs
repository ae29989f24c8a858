#![forbid(unsafe_code)]

//! Pixel-space half of the ripple pipeline.
//!
//! [`background`] paints the static backdrop once per resize, [`refract`]
//! turns a height field plus that backdrop into a display frame every tick,
//! and [`pixel`] supplies the packed color and byte-buffer plumbing both
//! share. Height fields arrive as plain `&[i16]` slices; this crate never
//! depends on the simulation kernel.

pub mod background;
pub mod pixel;
pub mod refract;

pub use background::{BackgroundStyle, GradientStop, generate};
pub use pixel::{PackedRgba, PixelBuffer};
pub use refract::refract;
