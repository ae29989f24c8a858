#![forbid(unsafe_code)]

//! Packed RGBA color and the byte-addressed pixel buffer.
//!
//! The buffer layout mirrors a canvas image surface: one flat `Vec<u8>` of
//! `width * height * 4` bytes in `[r, g, b, a]` order, row-major. The
//! refraction pass indexes it byte-wise for speed; everything else goes
//! through [`PackedRgba`].

use ripple_core::geometry::GridSize;

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Notes
/// -----
/// This is **straight alpha** storage (RGB channels are not pre-multiplied).
/// Compositing uses Porter-Duff **SourceOver** (`src over dst`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Channel bytes in buffer order `[r, g, b, a]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    /// Color from buffer-order channel bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        debug_assert!(denom != 0);
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `src over dst`.
    ///
    /// Stored as straight alpha, so we compute the exact rational form and
    /// round at the end (avoids accumulating rounding error across
    /// intermediate steps).
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // out_a = s_a + d_a*(1 - s_a)  (all in [0,1], scaled by 255)
        // numer_a = 255*s_a + d_a*(255 - s_a), in the "255^2 domain" so the
        // channel math below stays exact.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);

        // out_c_u8 = round( (src_c*s_a*255 + dst_c*d_a*(255 - s_a)) / numer_a )
        let r = Self::div_round_u8(
            (self.r() as u64) * s_a * 255 + (dst.r() as u64) * d_a * inv_s_a,
            numer_a,
        );
        let g = Self::div_round_u8(
            (self.g() as u64) * s_a * 255 + (dst.g() as u64) * d_a * inv_s_a,
            numer_a,
        );
        let b = Self::div_round_u8(
            (self.b() as u64) * s_a * 255 + (dst.b() as u64) * d_a * inv_s_a,
            numer_a,
        );

        Self::rgba(r, g, b, out_a)
    }

    /// Apply uniform opacity in `[0.0, 1.0]` by scaling alpha.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f32) * opacity).round().clamp(0.0, 255.0) as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

/// Row-major RGBA byte buffer for one grid size.
///
/// Always exactly `size.area() * 4` bytes. Indexing helpers return `None`
/// out of bounds; the bulk accessors hand out the raw bytes for kernels
/// that have already validated the size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: GridSize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a fully transparent (all-zero) buffer.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            data: vec![0; size.area() * 4],
        }
    }

    /// Creates a buffer with every pixel set to `color`.
    #[must_use]
    pub fn filled(size: GridSize, color: PackedRgba) -> Self {
        let mut buf = Self::new(size);
        buf.fill(color);
        buf
    }

    /// Grid size of the buffer.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// True when the buffer holds no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Raw bytes, `[r, g, b, a]` per pixel, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes.
    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of the `r` channel of `(x, y)`, `None` out of bounds.
    #[must_use]
    pub const fn byte_index(&self, x: i32, y: i32) -> Option<usize> {
        match self.size.index(x, y) {
            Some(i) => Some(i * 4),
            None => None,
        }
    }

    /// Color at `(x, y)`, `None` out of bounds.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<PackedRgba> {
        let i = self.byte_index(x, y)?;
        Some(PackedRgba::from_bytes([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    /// Overwrites the pixel at `(x, y)`; no-op out of bounds.
    pub fn set(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.byte_index(x, y) {
            self.data[i..i + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Composites `color` over the pixel at `(x, y)`; no-op out of bounds.
    pub fn blend(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.byte_index(x, y) {
            let dst = PackedRgba::from_bytes([
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ]);
            self.data[i..i + 4].copy_from_slice(&color.over(dst).to_bytes());
        }
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: PackedRgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_bytes());
        }
    }

    /// Reallocates for `size` and resets every byte to zero.
    pub fn resize(&mut self, size: GridSize) {
        self.size = size;
        self.data.clear();
        self.data.resize(size.area() * 4, 0);
    }
}
