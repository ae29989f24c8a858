#![forbid(unsafe_code)]

//! Water-surface simulation kernel.
//!
//! The model is a classic two-generation integer wave table: a pair of
//! `i16` grids ([`field::HeightField`]) holding consecutive generations of
//! surface amplitudes, a fixed-disc impulse injector ([`disturb::disturb`])
//! and a shift-based finite-difference stepper ([`physics::step`]). All
//! arithmetic is integer-only with deliberate wrap-around, so a run is
//! bit-for-bit reproducible on every platform.
//!
//! This crate knows nothing about pixels or scheduling; rendering lives in
//! `ripple-render` and frame pacing in `ripple-runtime`.

pub mod disturb;
pub mod field;
pub mod physics;

pub use disturb::{RADIUS, STRENGTH, disturb};
pub use field::HeightField;
pub use physics::{DAMPING_SHIFT, WAVE_SHIFT, step};
