//! Convex hull by Andrew's monotone chain.
//!
//! The lower chain is built left to right, the upper chain right to left,
//! both with a stack that pops while the incoming point does not make a
//! strict left turn. Collinear boundary points are therefore dropped unless
//! they are extremal.
//!
//! The returned hull is counter-clockwise (y axis up) and closed: the first
//! vertex is repeated at the end.

use std::cmp::Ordering;

use crate::basics::PointD;
use crate::math::is_left;

/// Lexicographic `(x, y)` order used to presort hull input.
#[inline]
pub fn cmp_xy(a: &PointD, b: &PointD) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Hull of points already sorted by ascending `x`, then ascending `y`.
///
/// When every point shares one `x`, the result is the vertical segment
/// between the lowest and highest point, closed: `[min, max, min]` (or
/// `[p, p]` if all points coincide). Empty input gives an empty hull.
pub fn chain_hull(sorted: &[PointD]) -> Vec<PointD> {
    debug_assert!(
        sorted.windows(2).all(|w| cmp_xy(&w[0], &w[1]) != Ordering::Greater),
        "chain_hull input must be sorted by (x, y)"
    );

    let n = sorted.len();
    let mut hull: Vec<PointD> = Vec::with_capacity(n + 1);
    if n == 0 {
        return hull;
    }

    // Points with min x: indices minmin..=minmax.
    let minmin = 0;
    let xmin = sorted[0].x;
    let minmax = sorted
        .iter()
        .position(|p| p.x != xmin)
        .map_or(n - 1, |i| i - 1);

    if minmax == n - 1 {
        hull.push(sorted[minmin]);
        if sorted[minmax].y != sorted[minmin].y {
            hull.push(sorted[minmax]);
        }
        hull.push(sorted[minmin]);
        return hull;
    }

    // Points with max x: indices maxmin..=maxmax.
    let maxmax = n - 1;
    let xmax = sorted[n - 1].x;
    let maxmin = sorted
        .iter()
        .rposition(|p| p.x != xmax)
        .map_or(0, |i| i + 1);

    // Lower chain.
    hull.push(sorted[minmin]);
    for i in (minmax + 1)..=maxmin {
        let p = sorted[i];
        if i < maxmin && is_left(sorted[minmin], sorted[maxmin], p) >= 0.0 {
            continue;
        }
        while hull.len() >= 2 {
            let top = hull.len() - 1;
            if is_left(hull[top - 1], hull[top], p) > 0.0 {
                break;
            }
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain.
    if maxmax != maxmin {
        hull.push(sorted[maxmax]);
    }
    let bottom = hull.len();
    for i in (minmax..maxmin).rev() {
        let p = sorted[i];
        if i > minmax && is_left(sorted[maxmax], sorted[minmax], p) >= 0.0 {
            continue;
        }
        while hull.len() > bottom {
            let top = hull.len() - 1;
            if is_left(hull[top - 1], hull[top], p) > 0.0 {
                break;
            }
            hull.pop();
        }
        hull.push(p);
    }
    if minmax != minmin {
        hull.push(sorted[minmin]);
    }

    hull
}

/// Hull of an arbitrary point set.
///
/// Sorts and removes exact duplicates before running [`chain_hull`].
pub fn convex_hull(points: &[PointD]) -> Vec<PointD> {
    let mut sorted = points.to_vec();
    sorted.sort_by(cmp_xy);
    sorted.dedup_by(|a, b| cmp_xy(a, b) == Ordering::Equal);
    chain_hull(&sorted)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::calc_polygon_area;

    fn pts(v: &[(f64, f64)]) -> Vec<PointD> {
        v.iter().map(|&(x, y)| PointD::new(x, y)).collect()
    }

    #[test]
    fn test_square_with_interior_points() {
        let hull = convex_hull(&pts(&[
            (0.0, 0.0),
            (2.0, 1.0),
            (4.0, 0.0),
            (1.0, 3.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (2.0, 2.0),
        ]));
        assert_eq!(
            hull,
            pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_counter_clockwise_and_closed() {
        let hull = convex_hull(&pts(&[(3.0, 1.0), (0.0, 0.0), (5.0, 5.0), (1.0, 4.0), (2.0, 2.0)]));
        assert_eq!(hull.first(), hull.last());
        assert!(calc_polygon_area(&hull[..hull.len() - 1]) > 0.0);
        for w in hull.windows(3) {
            assert!(is_left(w[0], w[1], w[2]) > 0.0);
        }
    }

    #[test]
    fn test_triangle() {
        let hull = chain_hull(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
        assert_eq!(hull, pts(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]));
    }

    #[test]
    fn test_collinear_boundary_points_dropped() {
        let hull = convex_hull(&pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]));
        assert_eq!(
            hull,
            pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_vertical_segment() {
        let hull = chain_hull(&pts(&[(1.0, -2.0), (1.0, 0.0), (1.0, 5.0)]));
        assert_eq!(hull, pts(&[(1.0, -2.0), (1.0, 5.0), (1.0, -2.0)]));
    }

    #[test]
    fn test_single_and_empty() {
        assert!(convex_hull(&[]).is_empty());
        let p = PointD::new(3.0, 3.0);
        assert_eq!(convex_hull(&[p, p, p]), vec![p, p]);
    }

    #[test]
    fn test_all_points_inside_or_on_hull() {
        let input = pts(&[
            (0.5, 0.1),
            (3.2, 1.7),
            (-1.0, 2.5),
            (2.2, -3.3),
            (0.0, 0.0),
            (4.4, 4.1),
            (-2.7, -1.9),
            (1.1, 3.9),
        ]);
        let hull = convex_hull(&input);
        for p in &input {
            for w in hull.windows(2) {
                assert!(is_left(w[0], w[1], *p) >= -1e-9);
            }
        }
        assert!(hull.len() - 1 <= input.len());
    }
}
