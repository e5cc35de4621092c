//! Pixel surface: an owned, row-major `Rgba8` buffer.
//!
//! Pixel `(x, y)` lives at index `x + y * width`. Every public accessor
//! bounds-checks: reads outside the surface return a transparent color and
//! writes outside the surface are dropped. Rasterizers routinely overshoot
//! shape boundaries by a pixel, so none of this is an error.

use crate::basics::RectI;
use crate::color::{alpha_blend, Rgba8};
use crate::error::{Error, Result};

// ============================================================================
// Surface
// ============================================================================

/// An in-memory RGBA8 image that drawing operations write into.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba8>,
    alpha_blend: bool,
}

impl Surface {
    /// Create a fully transparent surface. Alpha blending is enabled.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width * height],
            alpha_blend: true,
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba8>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            alpha_blend: true,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Addressable pixels as an inclusive box, `None` for an empty surface.
    ///
    /// Dimensions beyond `i32::MAX` are clamped, since pixel coordinates
    /// are `i32`.
    pub fn clip_box(&self) -> Option<RectI> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let w = self.width.min(i32::MAX as usize) as i32;
        let h = self.height.min(i32::MAX as usize) as i32;
        Some(RectI::new(0, 0, w - 1, h - 1))
    }

    /// Whether `set_pixel` composites onto the existing pixel.
    #[inline]
    pub fn alpha_blend(&self) -> bool {
        self.alpha_blend
    }

    pub fn set_alpha_blend(&mut self, enabled: bool) {
        self.alpha_blend = enabled;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x + y * self.width)
    }

    /// Write one pixel, blending if enabled. Out-of-range writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some(i) = self.index(x, y) {
            let dst = &mut self.pixels[i];
            *dst = if self.alpha_blend {
                alpha_blend(*dst, color)
            } else {
                color
            };
        }
    }

    /// Read one pixel. Out-of-range reads return a transparent color.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.index(x, y)
            .map_or(Rgba8::TRANSPARENT, |i| self.pixels[i])
    }

    /// Set every pixel to transparent black.
    pub fn clear(&mut self) {
        self.clear_with(Rgba8::TRANSPARENT);
    }

    /// Set every pixel to `color` (no blending).
    pub fn clear_with(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Change dimensions.
    ///
    /// No-op when the size is unchanged. With `clear == false` the flat
    /// pixel prefix is kept as-is (row mapping is not preserved when the
    /// width changes) and any new tail is transparent.
    pub fn resize(&mut self, width: usize, height: usize, clear: bool) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        if clear {
            self.pixels = vec![Rgba8::TRANSPARENT; width * height];
        } else {
            self.pixels.resize(width * height, Rgba8::TRANSPARENT);
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Pixels of row `y`. Panics if `y >= height`.
    pub fn row_slice(&self, y: usize) -> &[Rgba8] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Mutable pixels of row `y`. Panics if `y >= height`.
    pub fn row_slice_mut(&mut self, y: usize) -> &mut [Rgba8] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Flatten to `[r, g, b, a, r, g, b, a, ...]` bytes for presentation.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    /// Consume the surface, returning its pixel vector.
    pub fn into_pixels(self) -> Vec<Rgba8> {
        self.pixels
    }
}

// ============================================================================
// Tests
// ============================================================================
