//! Gradient evaluator.
//!
//! A [`Shading`] describes how a filled region is colored: a solid color,
//! a linear gradient at an angle, or a radial gradient around a center.
//! Linear gradients are fitted to the polygon being filled, so a shading
//! is [`prepare`](Shading::prepare)d once per fill call against that
//! polygon's points and the resulting [`Gradient`] answers per-pixel color
//! queries.

use tracing::debug;

use crate::basics::PointD;
use crate::color::Rgba8;
use crate::simul_eq::simul_eq_solve;
use crate::trans_affine::TransAffine;

/// Radii at or below this are treated as zero.
pub const RADIUS_EPSILON: f64 = 1e-12;

// ============================================================================
// ColorSource trait
// ============================================================================

/// Anything that can answer "what color is pixel (x, y)".
pub trait ColorSource {
    fn color_at(&self, x: i32, y: i32) -> Rgba8;
}

impl ColorSource for Rgba8 {
    #[inline]
    fn color_at(&self, _x: i32, _y: i32) -> Rgba8 {
        *self
    }
}

// ============================================================================
// Shading descriptor
// ============================================================================

/// How to color the interior of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Shading {
    /// One color everywhere.
    Solid { color: Rgba8 },
    /// `color1` at the polygon's extreme along the direction `angle`
    /// (degrees from the x axis), `color2` at the opposite extreme.
    Linear {
        angle: f64,
        color1: Rgba8,
        color2: Rgba8,
    },
    /// `color1` at `center`, `color2` at `radius` and beyond.
    Radial {
        center: PointD,
        radius: f64,
        color1: Rgba8,
        color2: Rgba8,
    },
}

impl Shading {
    pub fn solid(color: Rgba8) -> Self {
        Shading::Solid { color }
    }

    pub fn linear(angle: f64, color1: Rgba8, color2: Rgba8) -> Self {
        Shading::Linear {
            angle,
            color1,
            color2,
        }
    }

    pub fn radial(center: PointD, radius: f64, color1: Rgba8, color2: Rgba8) -> Self {
        Shading::Radial {
            center,
            radius,
            color1,
            color2,
        }
    }

    /// Fit the shading to the polygon `points` that is about to be filled.
    ///
    /// A linear gradient whose projection range is empty (all points project
    /// to the same value, or there are no points) degenerates to a solid
    /// `color1`. A radial gradient with a zero radius degenerates to a solid
    /// `color2`.
    pub fn prepare(&self, points: &[PointD]) -> Gradient {
        match *self {
            Shading::Solid { color } => Gradient::Solid(color),
            Shading::Linear {
                angle,
                color1,
                color2,
            } => prepare_linear(angle, color1, color2, points),
            Shading::Radial {
                center,
                radius,
                color1,
                color2,
            } => {
                if radius.is_nan() || radius <= RADIUS_EPSILON {
                    debug!(radius, "radial gradient collapsed to solid color");
                    Gradient::Solid(color2)
                } else {
                    Gradient::Radial {
                        center,
                        radius,
                        color1,
                        color2,
                    }
                }
            }
        }
    }
}

impl Default for Shading {
    fn default() -> Self {
        Shading::solid(Rgba8::BLACK)
    }
}

impl From<Rgba8> for Shading {
    fn from(color: Rgba8) -> Self {
        Shading::solid(color)
    }
}

fn prepare_linear(angle: f64, color1: Rgba8, color2: Rgba8, points: &[PointD]) -> Gradient {
    let direction = TransAffine::new_rotation_deg(angle).transform_2x2(PointD::new(1.0, 0.0));

    let mut min_dot = f64::INFINITY;
    let mut max_dot = f64::NEG_INFINITY;
    for p in points {
        let d = direction.dot(*p);
        min_dot = min_dot.min(d);
        max_dot = max_dot.max(d);
    }

    // k * min + b = 0, k * max + b = 1
    let solved = if min_dot < max_dot {
        simul_eq_solve(&[[min_dot, 1.0], [max_dot, 1.0]], &[0.0, 1.0])
    } else {
        None
    };

    match solved {
        Some([k, b]) => Gradient::Linear {
            axis: direction * k,
            offset: b,
            color1,
            color2,
        },
        None => {
            debug!(
                angle,
                points = points.len(),
                "linear gradient collapsed to solid color"
            );
            Gradient::Solid(color1)
        }
    }
}

// ============================================================================
// Prepared gradient
// ============================================================================

/// A shading fitted to one polygon, ready for per-pixel evaluation.
///
/// Not reusable across polygons: the linear mapping depends on the extremes
/// of the polygon it was prepared for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gradient {
    Solid(Rgba8),
    Linear {
        /// Direction scaled by the fitted slope `k`.
        axis: PointD,
        /// Fitted intercept `b`.
        offset: f64,
        color1: Rgba8,
        color2: Rgba8,
    },
    Radial {
        center: PointD,
        radius: f64,
        color1: Rgba8,
        color2: Rgba8,
    },
}

impl Gradient {
    /// Gradient parameter at a continuous position, clamped to `0..=1`.
    ///
    /// Solid gradients always report 0.
    pub fn parameter(&self, p: PointD) -> f64 {
        let mu = match *self {
            Gradient::Solid(_) => 0.0,
            Gradient::Linear { axis, offset, .. } => axis.dot(p) + offset,
            Gradient::Radial { center, radius, .. } => p.distance(center) / radius,
        };
        if mu.is_nan() {
            0.0
        } else {
            mu.clamp(0.0, 1.0)
        }
    }

    /// Color at a continuous position.
    pub fn sample(&self, p: PointD) -> Rgba8 {
        match *self {
            Gradient::Solid(c) => c,
            Gradient::Linear { color1, color2, .. } | Gradient::Radial { color1, color2, .. } => {
                color1.lerp(&color2, self.parameter(p))
            }
        }
    }
}

impl ColorSource for Gradient {
    /// Linear gradients sample at `(x + 1, y + 1)`; radial ones at `(x, y)`.
    #[inline]
    fn color_at(&self, x: i32, y: i32) -> Rgba8 {
        match self {
            Gradient::Solid(c) => *c,
            Gradient::Linear { .. } => self.sample(PointD::new(x as f64 + 1.0, y as f64 + 1.0)),
            Gradient::Radial { .. } => self.sample(PointD::new(x as f64, y as f64)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<PointD> {
        vec![
            PointD::new(0.0, 0.0),
            PointD::new(10.0, 0.0),
            PointD::new(10.0, 10.0),
            PointD::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_solid() {
        let g = Shading::solid(Rgba8::RED).prepare(&square());
        assert_eq!(g, Gradient::Solid(Rgba8::RED));
        assert_eq!(g.color_at(-100, 7), Rgba8::RED);
        assert_eq!(Rgba8::BLUE.color_at(3, 3), Rgba8::BLUE);
    }

    #[test]
    fn test_linear_boundary_values() {
        let g = Shading::linear(0.0, Rgba8::BLACK, Rgba8::WHITE).prepare(&square());
        assert_eq!(g.sample(PointD::new(0.0, 5.0)), Rgba8::BLACK);
        assert_eq!(g.sample(PointD::new(10.0, 5.0)), Rgba8::WHITE);
        assert!((g.parameter(PointD::new(5.0, 0.0)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_linear_clamps_outside_range() {
        let g = Shading::linear(0.0, Rgba8::BLACK, Rgba8::WHITE).prepare(&square());
        assert_eq!(g.sample(PointD::new(-50.0, 0.0)), Rgba8::BLACK);
        assert_eq!(g.sample(PointD::new(50.0, 0.0)), Rgba8::WHITE);
    }

    #[test]
    fn test_linear_pixel_offset() {
        let g = Shading::linear(0.0, Rgba8::BLACK, Rgba8::WHITE).prepare(&square());
        // Pixel 4 samples at x = 5, the middle of the range.
        let c = g.color_at(4, 0);
        assert_eq!(c.r, 128);
        assert_eq!(g.color_at(9, 0), Rgba8::WHITE);
    }

    #[test]
    fn test_linear_vertical_angle() {
        let g = Shading::linear(90.0, Rgba8::RED, Rgba8::BLUE).prepare(&square());
        assert_eq!(g.sample(PointD::new(3.0, 0.0)), Rgba8::RED);
        assert_eq!(g.sample(PointD::new(3.0, 10.0)), Rgba8::BLUE);
    }

    #[test]
    fn test_linear_reversed_angle() {
        let g = Shading::linear(180.0, Rgba8::RED, Rgba8::BLUE).prepare(&square());
        assert_eq!(g.sample(PointD::new(10.0, 0.0)), Rgba8::RED);
        assert_eq!(g.sample(PointD::new(0.0, 0.0)), Rgba8::BLUE);
    }

    #[test]
    fn test_linear_degenerate_collapses_to_color1() {
        // Vertical segment projected on the x axis: zero extent.
        let pts = [PointD::new(4.0, 0.0), PointD::new(4.0, 9.0)];
        let g = Shading::linear(0.0, Rgba8::GREEN, Rgba8::WHITE).prepare(&pts);
        assert_eq!(g, Gradient::Solid(Rgba8::GREEN));
        let g = Shading::linear(0.0, Rgba8::GREEN, Rgba8::WHITE).prepare(&[]);
        assert_eq!(g, Gradient::Solid(Rgba8::GREEN));
    }

    #[test]
    fn test_radial() {
        let s = Shading::radial(PointD::new(5.0, 5.0), 5.0, Rgba8::WHITE, Rgba8::BLACK);
        let g = s.prepare(&square());
        assert_eq!(g.color_at(5, 5), Rgba8::WHITE);
        assert_eq!(g.color_at(10, 5), Rgba8::BLACK);
        assert_eq!(g.color_at(20, 20), Rgba8::BLACK);
        assert!((g.parameter(PointD::new(7.5, 5.0)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_radial_zero_radius() {
        let s = Shading::radial(PointD::new(0.0, 0.0), 0.0, Rgba8::WHITE, Rgba8::BLACK);
        assert_eq!(s.prepare(&square()), Gradient::Solid(Rgba8::BLACK));
    }

    #[test]
    fn test_from_color() {
        assert_eq!(Shading::from(Rgba8::CYAN), Shading::solid(Rgba8::CYAN));
        assert_eq!(Shading::default(), Shading::solid(Rgba8::BLACK));
    }
}
