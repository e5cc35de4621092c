//! Polygons with cached edges and bounds, and a separating-axis overlap
//! test.
//!
//! [`Polygon::intersects`] first compares bounding boxes. In accurate mode
//! it then projects both polygons on the normal of every edge of either
//! polygon; a gap on any axis means no overlap. The projection test is
//! exact for convex polygons only. For concave ones it can report overlap
//! where the shapes merely share a convex region.

use crate::basics::{PointD, RectD};
use crate::bounding_rect::bounding_rect;
use crate::math::point_in_triangle;
use crate::trans_affine::TransAffine;

// ============================================================================
// Polygon
// ============================================================================

/// A closed polygon; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<PointD>,
    edges: Vec<PointD>,
    bounds: Option<RectD>,
}

impl Polygon {
    pub fn new(points: Vec<PointD>) -> Self {
        let edges = (0..points.len())
            .map(|i| points[(i + 1) % points.len()] - points[i])
            .collect();
        let bounds = bounding_rect(&points);
        Self {
            points,
            edges,
            bounds,
        }
    }

    /// Polygon from `points` after mapping each through `mtx`.
    pub fn transformed(points: &[PointD], mtx: &TransAffine) -> Self {
        Self::new(mtx.transform_all(points))
    }

    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    /// Edge vectors `p[i+1] - p[i]`, including the closing edge.
    pub fn edges(&self) -> &[PointD] {
        &self.edges
    }

    /// Axis-aligned bounds, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<RectD> {
        self.bounds
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Option<PointD> {
        self.bounds.map(|b| b.center())
    }

    /// Even-odd point containment. Vertices count as inside.
    pub fn contains_point(&self, p: PointD) -> bool {
        if self.points.contains(&p) {
            return true;
        }
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y < p.y) != (b.y < p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if x < p.x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Overlap test against `other`.
    ///
    /// With `accurate == false` only the bounding boxes are compared
    /// (touching boxes overlap). With `accurate == true` every edge normal
    /// of both polygons is tried as a separating axis; zero-length edges
    /// are skipped. The result is symmetric in its two operands.
    pub fn intersects(&self, other: &Polygon, accurate: bool) -> bool {
        let (Some(a), Some(b)) = (self.bounds, other.bounds) else {
            return false;
        };
        if !a.overlaps(&b) {
            return false;
        }
        if !accurate {
            return true;
        }

        !self
            .edges
            .iter()
            .chain(other.edges.iter())
            .filter_map(|e| PointD::new(-e.y, e.x).normalize())
            .any(|axis| {
                let (min_a, max_a) = self.project(axis);
                let (min_b, max_b) = other.project(axis);
                interval_distance(min_a, max_a, min_b, max_b) > 0.0
            })
    }

    /// `[min, max]` of the vertices' dot products with `axis`.
    fn project(&self, axis: PointD) -> (f64, f64) {
        self.points
            .iter()
            .map(|p| p.dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

/// Gap between two intervals; negative when they overlap.
#[inline]
fn interval_distance(min_a: f64, max_a: f64, min_b: f64, max_b: f64) -> f64 {
    if min_a < min_b {
        min_b - max_a
    } else {
        min_a - max_b
    }
}

// ============================================================================
// Triangle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub a: PointD,
    pub b: PointD,
    pub c: PointD,
}

impl Triangle {
    pub fn new(a: PointD, b: PointD, c: PointD) -> Self {
        Self { a, b, c }
    }

    /// Inside or on the boundary, for either winding.
    pub fn contains_point(&self, p: PointD) -> bool {
        point_in_triangle(self.a, self.b, self.c, p)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(v: &[(f64, f64)]) -> Polygon {
        Polygon::new(v.iter().map(|&(x, y)| PointD::new(x, y)).collect())
    }

    fn square(x: f64, y: f64, s: f64) -> Polygon {
        poly(&[(x, y), (x + s, y), (x + s, y + s), (x, y + s)])
    }

    #[test]
    fn test_edges_and_bounds() {
        let p = poly(&[(0.0, 0.0), (3.0, 0.0), (0.0, 2.0)]);
        assert_eq!(
            p.edges(),
            &[
                PointD::new(3.0, 0.0),
                PointD::new(-3.0, 2.0),
                PointD::new(0.0, -2.0)
            ]
        );
        assert_eq!(p.bounds(), Some(RectD::new(0.0, 0.0, 3.0, 2.0)));
        assert_eq!(p.center(), Some(PointD::new(1.5, 1.0)));
        assert!(Polygon::new(Vec::new()).bounds().is_none());
    }

    #[test]
    fn test_transformed() {
        let p = Polygon::transformed(
            &[PointD::new(0.0, 0.0), PointD::new(1.0, 0.0), PointD::new(0.0, 1.0)],
            &TransAffine::new_translation(5.0, -1.0),
        );
        assert_eq!(p.points()[1], PointD::new(6.0, -1.0));
        assert_eq!(p.bounds(), Some(RectD::new(5.0, -1.0, 6.0, 0.0)));
    }

    #[test]
    fn test_disjoint_boxes() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert!(!a.intersects(&b, false));
        assert!(!a.intersects(&b, true));
    }

    #[test]
    fn test_overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!(a.intersects(&b, false));
        assert!(a.intersects(&b, true));
        assert!(b.intersects(&a, true));
    }

    #[test]
    fn test_fast_path_is_approximate() {
        // Boxes overlap, the triangles do not.
        let a = poly(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let b = poly(&[(4.0, 4.0), (4.0, 1.0), (1.0, 4.0)]);
        assert!(a.intersects(&b, false));
        assert!(!a.intersects(&b, true));
        assert!(!b.intersects(&a, true));
    }

    #[test]
    fn test_degenerate_edges_skipped() {
        let a = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = square(1.0, 1.0, 2.0);
        assert!(a.intersects(&b, true));
        let c = square(3.0, 0.5, 1.0);
        assert!(!a.intersects(&c, true));
    }

    #[test]
    fn test_contains_point() {
        let p = poly(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert!(p.contains_point(PointD::new(2.0, 2.0)));
        assert!(p.contains_point(PointD::new(4.0, 4.0)));
        assert!(!p.contains_point(PointD::new(5.0, 2.0)));
        assert!(!p.contains_point(PointD::new(-0.1, 2.0)));
    }

    #[test]
    fn test_triangle_contains_point() {
        let t = Triangle::new(
            PointD::new(0.0, 0.0),
            PointD::new(4.0, 0.0),
            PointD::new(0.0, 4.0),
        );
        assert!(t.contains_point(PointD::new(1.0, 1.0)));
        assert!(t.contains_point(PointD::new(2.0, 2.0)));
        assert!(t.contains_point(PointD::new(0.0, 4.0)));
        assert!(!t.contains_point(PointD::new(3.0, 3.0)));
        let flipped = Triangle::new(t.a, t.c, t.b);
        assert!(flipped.contains_point(PointD::new(1.0, 1.0)));
    }
}
