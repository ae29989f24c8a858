#![forbid(unsafe_code)]

//! ripple-runtime: lifecycle driver and tick scheduling for the ripple
//! simulation.
//!
//! This crate turns the pure pieces below it into a running animation:
//!
//! - [`FrameDriver`] owns the height field, the generated background and
//!   the output frame, and walks them through resize → tick → teardown.
//! - [`TickScheduler`] is the port through which the driver asks its host
//!   for the next tick; [`FrameClock`] is a deadline-based implementation
//!   for hosts with a poll loop, [`RecordingScheduler`] one for tests.
//!
//! The runtime never blocks and never reads the clock on its own; hosts
//! decide when a requested tick actually fires.

pub mod driver;
pub mod scheduler;

pub use driver::{DEFAULT_SEED, DriverState, FrameDriver};
pub use scheduler::{FrameClock, NullScheduler, RecordingScheduler, TickScheduler};
