#![forbid(unsafe_code)]

//! Small deterministic PRNG for decorative randomness.
//!
//! Background decoration (circle placement and radii) needs cheap, seedable
//! randomness with no statistical guarantees. A xorshift32 keeps every
//! resize reproducible under a fixed seed, which the tests rely on.

/// Xorshift32 generator (period `2^32 - 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator from a seed.
    ///
    /// Zero is the one fixed point of the xorshift step, so a zero seed is
    /// replaced with an arbitrary nonzero constant.
    #[inline]
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    /// Next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform `f32` in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Keep 24 bits so the integer-to-float conversion is exact.
        (self.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Uniform `f32` in `[lo, hi)`.
    #[inline]
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}
