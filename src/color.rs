//! Color types and compositing.
//!
//! `Rgba8` is the stored pixel format: four straight (non-premultiplied)
//! 8-bit channels. `Rgba` carries the same channels normalized to `0..=1`
//! and is where blending arithmetic happens.

// ============================================================================
// Rgba (floating point)
// ============================================================================

/// Floating-point RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Composite `src` over `self` using straight alpha.
    ///
    /// `Ra = Sa + Da(1 - Sa)`, `Rc = (Sc*Sa + Dc*Da*(1 - Sa)) / Ra`.
    /// A fully transparent source leaves the destination unchanged.
    pub fn blend_over(&self, src: &Rgba) -> Rgba {
        if src.a <= 0.0 {
            return *self;
        }
        let inv = 1.0 - src.a;
        let ra = src.a + self.a * inv;
        let channel = |sc: f64, dc: f64| (sc * src.a + dc * self.a * inv) / ra;
        Rgba {
            r: channel(src.r, self.r),
            g: channel(src.g, self.g),
            b: channel(src.b, self.b),
            a: ra,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

// ============================================================================
// Rgba8
// ============================================================================

/// 8-bit RGBA color, the pixel format of [`Surface`](crate::surface::Surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_MASK: u32 = 255;

    pub const TRANSPARENT: Rgba8 = Rgba8::rgba(0, 0, 0, 0);
    pub const BLACK: Rgba8 = Rgba8::rgba(0, 0, 0, 255);
    pub const WHITE: Rgba8 = Rgba8::rgba(255, 255, 255, 255);
    pub const RED: Rgba8 = Rgba8::rgba(255, 0, 0, 255);
    pub const GREEN: Rgba8 = Rgba8::rgba(0, 128, 0, 255);
    pub const LIME: Rgba8 = Rgba8::rgba(0, 255, 0, 255);
    pub const BLUE: Rgba8 = Rgba8::rgba(0, 0, 255, 255);
    pub const YELLOW: Rgba8 = Rgba8::rgba(255, 255, 0, 255);
    pub const CYAN: Rgba8 = Rgba8::rgba(0, 255, 255, 255);
    pub const MAGENTA: Rgba8 = Rgba8::rgba(255, 0, 255, 255);
    pub const GRAY: Rgba8 = Rgba8::rgba(128, 128, 128, 255);
    pub const ORANGE: Rgba8 = Rgba8::rgba(255, 165, 0, 255);

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from integer channels. Values above 255 are truncated to 8 bits.
    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            r: r as u8,
            g: g as u8,
            b: b as u8,
            a: a as u8,
        }
    }

    pub fn new_opaque(r: u32, g: u32, b: u32) -> Self {
        Self::new(r, g, b, Self::BASE_MASK)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// The zero color returned for out-of-range reads.
    #[inline]
    pub fn transparent() -> Self {
        Self::TRANSPARENT
    }

    /// Unpack a `0xAARRGGBB` value.
    pub fn from_argb(v: u32) -> Self {
        Self::new((v >> 16) & 0xFF, (v >> 8) & 0xFF, v & 0xFF, v >> 24)
    }

    /// Pack as `0xAARRGGBB`.
    pub fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Convert to `Rgba` (f64).
    pub fn to_rgba(&self) -> Rgba {
        Rgba {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
            a: self.a as f64 / 255.0,
        }
    }

    /// Convert from `Rgba` (f64), clamping to the channel range.
    pub fn from_rgba(c: &Rgba) -> Self {
        Self {
            r: clamp_channel(c.r * 255.0),
            g: clamp_channel(c.g * 255.0),
            b: clamp_channel(c.b * 255.0),
            a: clamp_channel(c.a * 255.0),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Per-channel linear interpolation from `self` (k = 0) to `c` (k = 1).
    ///
    /// `k` is not clamped; each resulting channel is clamped to `0..=255`.
    pub fn lerp(&self, c: &Rgba8, k: f64) -> Rgba8 {
        let mix = |a: u8, b: u8| clamp_channel(a as f64 + (b as f64 - a as f64) * k);
        Rgba8 {
            r: mix(self.r, c.r),
            g: mix(self.g, c.g),
            b: mix(self.b, c.b),
            a: mix(self.a, c.a),
        }
    }
}

/// Round and clamp a channel value to `0..=255`.
#[inline]
pub fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        (v + 0.5) as u8
    }
}

/// Straight-alpha "source over destination" for 8-bit colors.
///
/// Returns `dst` unchanged when `src` is fully transparent.
pub fn alpha_blend(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match src.a {
        0 => dst,
        255 => src,
        _ => Rgba8::from_rgba(&dst.to_rgba().blend_over(&src.to_rgba())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_new_and_opaque() {
        let c = Rgba8::new_opaque(10, 20, 30);
        assert_eq!(c, Rgba8::new(10, 20, 30, 255));
        assert!(c.is_opaque());
        assert!(!c.is_transparent());
        assert!(Rgba8::transparent().is_transparent());
        assert_eq!(Rgba8::default(), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_argb_packing() {
        let c = Rgba8::from_argb(0x80FF4020);
        assert_eq!(c, Rgba8::new(0xFF, 0x40, 0x20, 0x80));
        assert_eq!(c.to_argb(), 0x80FF4020);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba8::new(0, 100, 200, 255);
        let b = Rgba8::new(255, 0, 100, 0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid, Rgba8::new(128, 50, 150, 128));
    }

    #[test]
    fn test_lerp_clamps_channels() {
        let a = Rgba8::new(200, 10, 0, 255);
        let b = Rgba8::new(250, 0, 0, 255);
        let over = a.lerp(&b, 3.0);
        assert_eq!(over.r, 255);
        assert_eq!(over.g, 0);
    }

    #[test]
    fn test_blend_transparent_source_keeps_destination() {
        let dst = Rgba8::new(12, 34, 56, 78);
        assert_eq!(alpha_blend(dst, Rgba8::new(255, 255, 255, 0)), dst);
    }

    #[test]
    fn test_blend_opaque_source_replaces() {
        let dst = Rgba8::new(12, 34, 56, 78);
        let src = Rgba8::new(1, 2, 3, 255);
        assert_eq!(alpha_blend(dst, src), src);
    }

    #[test]
    fn test_blend_half_over_opaque() {
        let dst = Rgba8::new(0, 0, 0, 255);
        let src = Rgba8::new(255, 255, 255, 128);
        let out = alpha_blend(dst, src);
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 128);
        assert_eq!(out.g, 128);
        assert_eq!(out.b, 128);
    }

    #[test]
    fn test_blend_over_transparent_destination_keeps_source_color() {
        let dst = Rgba8::TRANSPARENT;
        let src = Rgba8::new(200, 100, 50, 100);
        let out = alpha_blend(dst, src);
        assert_eq!(out, src);
    }

    #[test]
    fn test_rgba_blend_over_formula() {
        let d = Rgba::new(1.0, 0.0, 0.0, 0.5);
        let s = Rgba::new(0.0, 0.0, 1.0, 0.5);
        let r = d.blend_over(&s);
        assert!((r.a - 0.75).abs() < 1e-12);
        assert!((r.b - 0.5 / 0.75).abs() < 1e-12);
        assert!((r.r - 0.25 / 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-3.0), 0);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(127.5), 128);
        assert_eq!(clamp_channel(f64::NAN), 0);
    }
}
