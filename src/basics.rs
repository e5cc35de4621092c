//! Foundation value types and numeric helpers.
//!
//! Points, sizes and rectangles are plain `Copy` values with no identity.
//! Everything else in the crate builds on these.

use core::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Floor a double to the nearest integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Ceiling of a double as a signed integer.
#[inline]
pub fn iceil(v: f64) -> i32 {
    v.ceil() as i32
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

// ============================================================================
// Point
// ============================================================================

/// A 2-D point (or vector; the crate does not distinguish the two).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointI = PointBase<i32>;
pub type PointD = PointBase<f64>;

impl<T: Copy + Add<Output = T>> Add for PointBase<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Copy + Sub<Output = T>> Sub for PointBase<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Copy + Neg<Output = T>> Neg for PointBase<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for PointD {
    type Output = Self;
    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl PointD {
    /// Dot product with `other`.
    #[inline]
    pub fn dot(self, other: PointD) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to `other`.
    #[inline]
    pub fn distance(self, other: PointD) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalize(self) -> Option<PointD> {
        let len = self.length();
        if len <= f64::EPSILON {
            None
        } else {
            Some(Self::new(self.x / len, self.y / len))
        }
    }

    /// Round both coordinates to the nearest integer pixel.
    #[inline]
    pub fn round(self) -> PointI {
        PointI::new(iround(self.x), iround(self.y))
    }
}

impl From<PointI> for PointD {
    fn from(p: PointI) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

// ============================================================================
// Size
// ============================================================================

/// Width and height of a measured extent (text, images).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeD {
    pub width: f64,
    pub height: f64,
}

impl SizeD {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalize so that x1 <= x2 and y1 <= y2, swapping if needed.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point (x, y) is inside the rectangle, edges included.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Returns `true` if this rectangle overlaps with `r`.
    ///
    /// Touching edges count as overlap.
    pub fn overlaps(&self, r: &Self) -> bool {
        !(r.x1 > self.x2 || r.x2 < self.x1 || r.y1 > self.y2 || r.y2 < self.y1)
    }
}

impl Rect<f64> {
    /// Rectangle from an origin and a size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> PointD {
        PointD::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    #[inline]
    pub fn contains(&self, p: PointD) -> bool {
        self.hit_test(p.x, p.y)
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;
/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iround() {
        assert_eq!(iround(0.5), 1);
        assert_eq!(iround(0.49), 0);
        assert_eq!(iround(-0.5), -1);
        assert_eq!(iround(-0.49), 0);
        assert_eq!(iround(1.5), 2);
        assert_eq!(iround(-1.5), -2);
        assert_eq!(iround(0.0), 0);
    }

    #[test]
    fn test_ifloor() {
        assert_eq!(ifloor(1.7), 1);
        assert_eq!(ifloor(1.0), 1);
        assert_eq!(ifloor(-1.7), -2);
        assert_eq!(ifloor(-1.0), -1);
        assert_eq!(ifloor(0.0), 0);
    }

    #[test]
    fn test_iceil() {
        assert_eq!(iceil(1.1), 2);
        assert_eq!(iceil(1.0), 1);
        assert_eq!(iceil(-1.1), -1);
        assert_eq!(iceil(0.0), 0);
    }

    #[test]
    fn test_deg2rad() {
        let epsilon = 1e-10;
        assert!((deg2rad(180.0) - PI).abs() < epsilon);
        assert!((deg2rad(90.0) - PI / 2.0).abs() < epsilon);
        assert!((deg2rad(0.0)).abs() < epsilon);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = PointD::new(1.0, 2.0);
        let b = PointD::new(4.0, 6.0);
        assert_eq!(b - a, PointD::new(3.0, 4.0));
        assert_eq!(a + b, PointD::new(5.0, 8.0));
        assert_eq!(-a, PointD::new(-1.0, -2.0));
        assert_eq!(a * 2.0, PointD::new(2.0, 4.0));
        assert!(((b - a).length() - 5.0).abs() < 1e-12);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((a.dot(b) - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_normalize() {
        let n = PointD::new(3.0, 4.0).normalize().unwrap();
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y - 0.8).abs() < 1e-12);
        assert!(PointD::new(0.0, 0.0).normalize().is_none());
    }

    #[test]
    fn test_point_round() {
        assert_eq!(PointD::new(1.5, -1.5).round(), PointI::new(2, -2));
        assert_eq!(PointD::new(0.49, 2.51).round(), PointI::new(0, 3));
    }

    #[test]
    fn test_rect_new_and_is_valid() {
        let r = RectI::new(10, 20, 30, 40);
        assert!(r.is_valid());
        let r_invalid = RectI::new(30, 40, 10, 20);
        assert!(!r_invalid.is_valid());
    }

    #[test]
    fn test_rect_normalize() {
        let mut r = RectI::new(30, 40, 10, 20);
        r.normalize();
        assert_eq!(r, RectI::new(10, 20, 30, 40));
    }

    #[test]
    fn test_rect_hit_test() {
        let r = RectI::new(10, 20, 30, 40);
        assert!(r.hit_test(15, 25));
        assert!(r.hit_test(10, 20));
        assert!(r.hit_test(30, 40));
        assert!(!r.hit_test(5, 25));
        assert!(!r.hit_test(15, 45));
    }

    #[test]
    fn test_rect_overlaps() {
        let r1 = RectI::new(10, 20, 30, 40);
        let r2 = RectI::new(25, 35, 50, 60);
        assert!(r1.overlaps(&r2));
        assert!(r2.overlaps(&r1));

        let touching = RectI::new(30, 40, 50, 60);
        assert!(r1.overlaps(&touching));

        let r3 = RectI::new(31, 41, 50, 60);
        assert!(!r1.overlaps(&r3));
    }

    #[test]
    fn test_rect_d_dimensions() {
        let r = RectD::from_origin_size(2.0, 3.0, 10.0, 4.0);
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 4.0);
        assert_eq!(r.center(), PointD::new(7.0, 5.0));
    }
}
