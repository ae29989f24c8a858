#![forbid(unsafe_code)]

//! Core: grid geometry, configuration errors, seeding, and logging support.

pub mod error;
pub mod geometry;
pub mod logging;
pub mod rng;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, warn};
