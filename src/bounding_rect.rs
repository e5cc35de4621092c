//! Bounding rectangle calculation.
//!
//! Computes the axis-aligned bounding box of a point sequence.

use crate::basics::{PointD, PointI, RectD, RectI};

/// Compute the tight bounding rectangle of `points`.
///
/// Returns `None` if the slice is empty.
pub fn bounding_rect(points: &[PointD]) -> Option<RectD> {
    let (first, rest) = points.split_first()?;
    let mut r = RectD::new(first.x, first.y, first.x, first.y);
    for p in rest {
        if p.x < r.x1 {
            r.x1 = p.x;
        }
        if p.y < r.y1 {
            r.y1 = p.y;
        }
        if p.x > r.x2 {
            r.x2 = p.x;
        }
        if p.y > r.y2 {
            r.y2 = p.y;
        }
    }
    Some(r)
}

/// Integer variant of [`bounding_rect`] for rounded pixel coordinates.
pub fn bounding_rect_i(points: &[PointI]) -> Option<RectI> {
    let (first, rest) = points.split_first()?;
    let mut r = RectI::new(first.x, first.y, first.x, first.y);
    for p in rest {
        r.x1 = r.x1.min(p.x);
        r.y1 = r.y1.min(p.y);
        r.x2 = r.x2.max(p.x);
        r.y2 = r.y2.max(p.y);
    }
    Some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_rect_triangle() {
        let pts = [
            PointD::new(10.0, 20.0),
            PointD::new(50.0, 80.0),
            PointD::new(-5.0, 40.0),
        ];
        let r = bounding_rect(&pts).unwrap();
        assert_eq!(r, RectD::new(-5.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_bounding_rect_single_point() {
        let r = bounding_rect(&[PointD::new(3.0, 4.0)]).unwrap();
        assert_eq!(r, RectD::new(3.0, 4.0, 3.0, 4.0));
    }

    #[test]
    fn test_bounding_rect_empty() {
        assert!(bounding_rect(&[]).is_none());
        assert!(bounding_rect_i(&[]).is_none());
    }

    #[test]
    fn test_bounding_rect_i() {
        let pts = [PointI::new(4, -2), PointI::new(-1, 7), PointI::new(3, 3)];
        assert_eq!(bounding_rect_i(&pts).unwrap(), RectI::new(-1, -2, 4, 7));
    }
}
