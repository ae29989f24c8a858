#![forbid(unsafe_code)]

//! Configuration errors reported at the resize boundary.
//!
//! The simulation core is a deterministic numeric kernel with defensive
//! defaults: height arithmetic wraps, pixel arithmetic clamps, and
//! out-of-range disturbances are silent no-ops. The only fallible operation
//! is (re)configuring the surface size, and the variants here are the
//! complete taxonomy for it.

use std::fmt;

/// Error raised when a resize request cannot be honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested surface dimensions are negative.
    InvalidSurface {
        /// Requested surface width in pixels.
        width: i32,
        /// Requested surface height in pixels.
        height: i32,
    },
    /// The driver has been torn down; no further reconfiguration is possible.
    TornDown,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSurface { width, height } => write!(
                f,
                "invalid surface size {width}x{height}: dimensions must be non-negative"
            ),
            Self::TornDown => write!(f, "simulation driver has been torn down"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_surface_display_names_both_dimensions() {
        let err = ConfigError::InvalidSurface {
            width: -3,
            height: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("-3x20"), "unexpected message: {msg}");
        assert!(msg.contains("non-negative"));
    }

    #[test]
    fn torn_down_display() {
        assert_eq!(
            ConfigError::TornDown.to_string(),
            "simulation driver has been torn down"
        );
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ConfigError::TornDown);
    }
}
