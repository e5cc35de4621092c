//! Geometric math utilities.
//!
//! Orientation tests, signed areas and point-in-triangle, shared by the
//! hull builder, the triangulator and the polygon overlap tester, plus
//! circle and ellipse containment checks.
//!
//! All orientation results follow the usual mathematical convention
//! (y axis up): a positive value means a counter-clockwise turn.

use crate::basics::{PointD, RectD};

// ============================================================================
// Orientation
// ============================================================================

/// Which side of the directed line `p0 -> p1` the point `p2` lies on.
///
/// `> 0` left, `== 0` on the line, `< 0` right. The magnitude is twice the
/// signed area of the triangle `p0, p1, p2`.
#[inline]
pub fn is_left(p0: PointD, p1: PointD, p2: PointD) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}

/// Test if `p` is inside or on the boundary of triangle `a, b, c`.
///
/// Works for either winding.
#[inline]
pub fn point_in_triangle(a: PointD, b: PointD, c: PointD, p: PointD) -> bool {
    let d1 = is_left(a, b, p);
    let d2 = is_left(b, c, p);
    let d3 = is_left(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

// ============================================================================
// Areas
// ============================================================================

/// Signed area of a triangle (positive when counter-clockwise).
#[inline]
pub fn calc_triangle_area(a: PointD, b: PointD, c: PointD) -> f64 {
    is_left(a, b, c) * 0.5
}

/// Signed area of a closed polygon (shoelace formula).
///
/// The closing edge from the last point back to the first is implied.
pub fn calc_polygon_area(vertices: &[PointD]) -> f64 {
    if vertices.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut x = vertices[0].x;
    let mut y = vertices[0].y;
    let xs = x;
    let ys = y;

    for v in &vertices[1..] {
        sum += x * v.y - y * v.x;
        x = v.x;
        y = v.y;
    }
    (sum + x * ys - y * xs) * 0.5
}

// ============================================================================
// Circles and ellipses
// ============================================================================

/// Test if `p` lies strictly inside the ellipse inscribed in `bounds`.
///
/// A degenerate (zero-width or zero-height) ellipse contains nothing.
pub fn ellipse_contains(bounds: &RectD, p: PointD) -> bool {
    let rx = bounds.width().abs() * 0.5;
    let ry = bounds.height().abs() * 0.5;
    if rx == 0.0 || ry == 0.0 {
        return false;
    }
    let c = bounds.center();
    let u = (p.x - c.x) / rx;
    let v = (p.y - c.y) / ry;
    u * u + v * v < 1.0
}

/// Test if `p` is inside or on the circle.
#[inline]
pub fn circle_contains(center: PointD, radius: f64, p: PointD) -> bool {
    let d = p - center;
    d.dot(d) <= radius * radius
}

/// Test if the circle contains any corner of `rect` or its center.
pub fn circle_contains_rect(center: PointD, radius: f64, rect: &RectD) -> bool {
    [
        PointD::new(rect.x1, rect.y1),
        PointD::new(rect.x2, rect.y1),
        PointD::new(rect.x2, rect.y2),
        PointD::new(rect.x1, rect.y2),
        rect.center(),
    ]
    .into_iter()
    .any(|p| circle_contains(center, radius, p))
}

/// Test if two circles intersect. Circles touching at a single point
/// count as intersecting.
#[inline]
pub fn circle_in_circle(center_a: PointD, radius_a: f64, center_b: PointD, radius_b: f64) -> bool {
    let d = center_b - center_a;
    let r = radius_a + radius_b;
    d.dot(d) <= r * r
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> PointD {
        PointD::new(x, y)
    }

    #[test]
    fn test_is_left() {
        assert!(is_left(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 1.0)) > 0.0);
        assert!(is_left(p(0.0, 0.0), p(10.0, 0.0), p(5.0, -1.0)) < 0.0);
        assert_eq!(is_left(p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0)), 0.0);
        assert_eq!(is_left(p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)), 4.0);
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!(point_in_triangle(a, b, c, p(2.0, 2.0)));
        assert!(point_in_triangle(a, c, b, p(2.0, 2.0)));
        assert!(point_in_triangle(a, b, c, p(5.0, 0.0)));
        assert!(point_in_triangle(a, b, c, p(0.0, 0.0)));
        assert!(!point_in_triangle(a, b, c, p(6.0, 6.0)));
        assert!(!point_in_triangle(a, b, c, p(-1.0, 1.0)));
    }

    #[test]
    fn test_calc_triangle_area() {
        let area = calc_triangle_area(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!((area - 50.0).abs() < 1e-10);
        let area = calc_triangle_area(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0));
        assert!((area + 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_calc_polygon_area() {
        let ccw = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        assert!((calc_polygon_area(&ccw) - 100.0).abs() < 1e-10);
        let cw: Vec<PointD> = ccw.iter().rev().copied().collect();
        assert!((calc_polygon_area(&cw) + 100.0).abs() < 1e-10);
        assert_eq!(calc_polygon_area(&[]), 0.0);
    }

    #[test]
    fn test_ellipse_contains() {
        let bounds = RectD::new(0.0, 0.0, 20.0, 10.0);
        assert!(ellipse_contains(&bounds, p(10.0, 5.0)));
        assert!(ellipse_contains(&bounds, p(19.0, 5.0)));
        assert!(ellipse_contains(&bounds, p(10.0, 9.5)));
        assert!(!ellipse_contains(&bounds, p(20.0, 5.0)));
        assert!(!ellipse_contains(&bounds, p(1.0, 1.0)));
        assert!(!ellipse_contains(&RectD::new(0.0, 0.0, 0.0, 10.0), p(0.0, 5.0)));
    }

    #[test]
    fn test_circle_contains() {
        assert!(circle_contains(p(1.0, 1.0), 2.0, p(3.0, 1.0)));
        assert!(circle_contains(p(1.0, 1.0), 2.0, p(2.0, 2.0)));
        assert!(!circle_contains(p(1.0, 1.0), 2.0, p(3.0, 3.0)));

        let r = RectD::new(10.0, 10.0, 14.0, 14.0);
        assert!(circle_contains_rect(p(12.0, 12.0), 0.5, &r));
        assert!(circle_contains_rect(p(9.0, 9.0), 1.5, &r));
        assert!(!circle_contains_rect(p(0.0, 0.0), 5.0, &r));
    }

    #[test]
    fn test_circle_in_circle() {
        assert!(circle_in_circle(p(0.0, 0.0), 3.0, p(5.0, 0.0), 2.0));
        assert!(circle_in_circle(p(0.0, 0.0), 3.0, p(4.0, 0.0), 2.0));
        assert!(!circle_in_circle(p(0.0, 0.0), 3.0, p(3.0, 4.0), 1.9));
    }
}
