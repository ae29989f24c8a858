#![forbid(unsafe_code)]

//! Ripple public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage:
//!
//! ```
//! use ripple::prelude::*;
//!
//! let mut driver = FrameDriver::new(NullScheduler);
//! driver.resize(160, 100)?;
//! driver.disturb_center();
//! let size = driver.grid_size();
//! let frame = driver.tick().unwrap();
//! assert_eq!(frame.size(), size);
//! # Ok::<(), Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use ripple_core::error::ConfigError;
pub use ripple_core::geometry::{DOWNSCALE, GridSize};
pub use ripple_core::rng::Xorshift32;

// --- Simulation re-exports -------------------------------------------------

pub use ripple_sim::{HeightField, RADIUS, STRENGTH, disturb, step};

// --- Render re-exports -----------------------------------------------------

pub use ripple_render::{BackgroundStyle, GradientStop, PackedRgba, PixelBuffer, refract};

// --- Runtime re-exports ----------------------------------------------------

pub use ripple_runtime::{
    DEFAULT_SEED, DriverState, FrameClock, FrameDriver, NullScheduler, RecordingScheduler,
    TickScheduler,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for ripple apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while presenting frames.
    Io(std::io::Error),
    /// Simulation configuration rejected.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for ripple APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BackgroundStyle, ConfigError, DriverState, Error, FrameClock, FrameDriver, GridSize,
        NullScheduler, PackedRgba, PixelBuffer, RecordingScheduler, Result, TickScheduler,
    };

    pub use crate::{core, render, runtime, sim};
}

pub use ripple_core as core;
pub use ripple_render as render;
pub use ripple_runtime as runtime;
pub use ripple_sim as sim;
