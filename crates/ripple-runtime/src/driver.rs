#![forbid(unsafe_code)]

//! Frame driver: owns the simulation state and runs the per-tick pipeline.
//!
//! The driver ties the height field, the generated background and the output
//! frame to one grid size and walks them through a small lifecycle:
//!
//! ```text
//! Uninitialized --resize--> Ready --teardown--> TornDown
//!                             |  \
//!                          (tick) resize
//! ```
//!
//! One tick is stepper → refraction → buffer swap → next tick requested.
//! Ticks never overlap: the driver is a plain `&mut` object, re-entry is
//! impossible by construction. Resize is atomic from the outside — all
//! buffers are rebuilt before the call returns, so no tick ever observes
//! mismatched sizes. `TornDown` is terminal; only the scheduler hears about
//! it (pending callback canceled).

use ripple_core::error::ConfigError;
use ripple_core::geometry::GridSize;
use ripple_core::rng::Xorshift32;
use ripple_render::background::{self, BackgroundStyle};
use ripple_render::pixel::PixelBuffer;
use ripple_render::refract::refract;
use ripple_sim::field::HeightField;
use ripple_sim::{disturb, physics};

use crate::scheduler::TickScheduler;

/// Decoration seed used by [`FrameDriver::new`] ("RIPP").
pub const DEFAULT_SEED: u32 = 0x5249_5050;

/// Lifecycle state of a [`FrameDriver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed; no surface seen yet. Ticks and impulses are no-ops.
    #[default]
    Uninitialized,
    /// Surface known, buffers built, ticking.
    Ready,
    /// Torn down; buffers released. Terminal.
    TornDown,
}

impl DriverState {
    /// Stable string form for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::TornDown => "torn_down",
        }
    }
}

/// Owns one ripple simulation end to end.
///
/// Generic over the host's [`TickScheduler`]; the driver itself never
/// blocks or measures time. All methods take `&mut self`, so a host cannot
/// interleave ticks, impulses and resizes — they serialize naturally.
#[derive(Debug)]
pub struct FrameDriver<S> {
    state: DriverState,
    size: GridSize,
    field: HeightField,
    background: PixelBuffer,
    output: PixelBuffer,
    style: BackgroundStyle,
    seed: u32,
    scheduler: S,
}

impl<S: TickScheduler> FrameDriver<S> {
    /// Driver with the default background style and seed.
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self::with_style(scheduler, BackgroundStyle::default(), DEFAULT_SEED)
    }

    /// Driver with an explicit background style and decoration seed.
    #[must_use]
    pub fn with_style(scheduler: S, style: BackgroundStyle, seed: u32) -> Self {
        Self {
            state: DriverState::Uninitialized,
            size: GridSize::EMPTY,
            field: HeightField::new(GridSize::EMPTY),
            background: PixelBuffer::new(GridSize::EMPTY),
            output: PixelBuffer::new(GridSize::EMPTY),
            style,
            seed,
            scheduler,
        }
    }

    /// Adopts a new surface size in display pixels.
    ///
    /// Recomputes the downscaled grid, rebuilds every buffer from scratch
    /// (in-flight waves are discarded), paints the background, renders the
    /// zero field so the output matches it immediately, and ensures a tick
    /// is requested. A surface too small for a single cell parks the driver
    /// dormant — buffers empty, pending tick canceled — without error.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSurface`] when a dimension is negative,
    /// [`ConfigError::TornDown`] after [`FrameDriver::teardown`]. The
    /// driver is left unchanged on error.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), ConfigError> {
        if self.state == DriverState::TornDown {
            return Err(ConfigError::TornDown);
        }
        let size = GridSize::from_surface(width, height)?;
        tracing::info!(
            width,
            height,
            grid_width = size.width,
            grid_height = size.height,
            "surface resized"
        );

        self.size = size;
        self.field = HeightField::new(size);
        let mut rng = Xorshift32::new(self.seed);
        self.background = background::generate(size, &self.style, &mut rng);
        self.output = PixelBuffer::new(size);
        refract(self.field.current(), size, &self.background, &mut self.output);
        self.state = DriverState::Ready;

        if size.is_empty() {
            tracing::debug!("surface below one cell, driver dormant");
            self.scheduler.cancel();
        } else {
            self.scheduler.request();
        }
        Ok(())
    }

    /// Runs one simulation tick and returns the fresh frame.
    ///
    /// Steps the field, refracts the just-written generation into the
    /// output, swaps the buffer roles and requests the next tick. Returns
    /// `None` without side effects when the driver is not ready or is
    /// dormant on an empty grid.
    pub fn tick(&mut self) -> Option<&PixelBuffer> {
        if self.state != DriverState::Ready || self.size.is_empty() {
            return None;
        }
        let _span = tracing::debug_span!(
            "tick",
            width = self.size.width,
            height = self.size.height
        )
        .entered();

        physics::step(&mut self.field);
        refract(
            self.field.previous(),
            self.size,
            &self.background,
            &mut self.output,
        );
        self.field.swap();
        self.scheduler.request();
        Some(&self.output)
    }

    /// Injects an impulse at grid coordinates, between ticks.
    ///
    /// Forwards to the injector while ready; its margin rules apply. A
    /// no-op in any other state.
    pub fn disturb(&mut self, x: i32, y: i32) {
        if self.state == DriverState::Ready {
            disturb(&mut self.field, x, y);
        }
    }

    /// Impulse at the grid center — the classic startup splash.
    pub fn disturb_center(&mut self) {
        let x = i32::from(self.size.width) / 2;
        let y = i32::from(self.size.height) / 2;
        self.disturb(x, y);
    }

    /// Cancels any pending tick, releases every buffer and enters the
    /// terminal state. Idempotent.
    pub fn teardown(&mut self) {
        if self.state == DriverState::TornDown {
            return;
        }
        tracing::info!(state = self.state.as_str(), "driver torn down");
        self.scheduler.cancel();
        self.size = GridSize::EMPTY;
        self.field = HeightField::new(GridSize::EMPTY);
        self.background = PixelBuffer::new(GridSize::EMPTY);
        self.output = PixelBuffer::new(GridSize::EMPTY);
        self.state = DriverState::TornDown;
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Downscaled simulation grid size.
    #[inline]
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.size
    }

    /// Last rendered frame. Matches the background until the first tick.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> &PixelBuffer {
        &self.output
    }

    /// The static backdrop for the current size.
    #[inline]
    #[must_use]
    pub const fn background(&self) -> &PixelBuffer {
        &self.background
    }

    /// The height field, for inspection.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &HeightField {
        &self.field
    }

    /// The scheduling port.
    #[inline]
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduling port, for hosts that poll it.
    #[inline]
    #[must_use]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
