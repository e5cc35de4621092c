//! Outline point generators.
//!
//! Each function returns a plain point sequence ready to hand to the
//! scanline filler or the line rasterizer. Angles are in degrees, y grows
//! downward on a surface, so increasing angles run clockwise on screen.

use bitflags::bitflags;

use crate::basics::{deg2rad, PointD, RectD, PI};

/// Segments used to approximate a full ellipse.
pub const ELLIPSE_SLICES: usize = 32;

/// Angular step between consecutive arc points, in degrees.
pub const ARC_ANGLE_STEP: f64 = 20.0;

/// Bezier samples generated per control point.
pub const BEZIER_SAMPLES_PER_CONTROL: usize = 3;

/// Largest sweep an arc walks; anything beyond one turn repeats points.
pub const MAX_ARC_SWEEP: f64 = 360.0;

// ============================================================================
// Ellipse and arc
// ============================================================================

/// Closed ellipse outline centered at `(cx, cy)` with radii `rx`, `ry`.
///
/// Produces [`ELLIPSE_SLICES`] points starting at angle 0 plus a copy of
/// the first point at the end.
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<PointD> {
    ellipse_with_slices(cx, cy, rx, ry, ELLIPSE_SLICES)
}

/// Like [`ellipse`] with an explicit slice count (at least 3).
pub fn ellipse_with_slices(cx: f64, cy: f64, rx: f64, ry: f64, slices: usize) -> Vec<PointD> {
    let slices = slices.max(3);
    let step = 2.0 * PI / slices as f64;
    let mut points: Vec<PointD> = (0..slices)
        .map(|i| {
            let t = i as f64 * step;
            PointD::new(cx + rx * t.cos(), cy + ry * t.sin())
        })
        .collect();
    points.push(points[0]);
    points
}

/// Open elliptical arc from `start_angle` sweeping `sweep_angle` degrees.
///
/// Points are spaced [`ARC_ANGLE_STEP`] degrees apart in the sweep
/// direction; the end angle itself is excluded. The sweep is capped at
/// [`MAX_ARC_SWEEP`] in either direction. A zero sweep yields no points.
pub fn arc(cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, sweep_angle: f64) -> Vec<PointD> {
    if sweep_angle == 0.0 || !sweep_angle.is_finite() {
        return Vec::new();
    }
    let sweep = sweep_angle.abs().min(MAX_ARC_SWEEP);
    let steps = (sweep / ARC_ANGLE_STEP).ceil() as usize;
    let d = ARC_ANGLE_STEP * sweep_angle.signum();
    (0..steps)
        .map(|i| {
            let a = deg2rad(start_angle + d * i as f64);
            PointD::new(cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}

// ============================================================================
// Rectangles
// ============================================================================

/// The four corners of `r`, clockwise on screen starting top-left.
pub fn rect(r: &RectD) -> Vec<PointD> {
    vec![
        PointD::new(r.x1, r.y1),
        PointD::new(r.x2, r.y1),
        PointD::new(r.x2, r.y2),
        PointD::new(r.x1, r.y2),
    ]
}

bitflags! {
    /// Which corners of a rectangle get rounded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Corners: u8 {
        const TOP_LEFT = 1 << 0;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_RIGHT = 1 << 2;
        const BOTTOM_LEFT = 1 << 3;
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        const LEFT = Self::TOP_LEFT.bits() | Self::BOTTOM_LEFT.bits();
        const RIGHT = Self::TOP_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl Default for Corners {
    fn default() -> Self {
        Self::ALL
    }
}

/// Rectangle outline, closed, with the selected `corners` replaced by a
/// quadratic bezier of the given `radius`.
///
/// A rounded corner contributes `3 * BEZIER_SAMPLES_PER_CONTROL` points and
/// a square one contributes its corner point. The radius is clamped to half
/// the shorter side.
pub fn rounded_rect(r: &RectD, radius: f64, corners: Corners) -> Vec<PointD> {
    let (l, t, rt, b) = (r.x1, r.y1, r.x2, r.y2);
    let radius = radius.max(0.0).min(r.width().abs() / 2.0).min(r.height().abs() / 2.0);

    let lr = l + radius;
    let tr = t + radius;
    let rr = rt - radius;
    let br = b - radius;

    let arcs = [
        (Corners::TOP_LEFT, [PointD::new(l, tr), PointD::new(l, t), PointD::new(lr, t)]),
        (Corners::TOP_RIGHT, [PointD::new(rr, t), PointD::new(rt, t), PointD::new(rt, tr)]),
        (Corners::BOTTOM_RIGHT, [PointD::new(rt, br), PointD::new(rt, b), PointD::new(rr, b)]),
        (Corners::BOTTOM_LEFT, [PointD::new(lr, b), PointD::new(l, b), PointD::new(l, br)]),
    ];

    let mut points = Vec::with_capacity(4 * 3 * BEZIER_SAMPLES_PER_CONTROL + 1);
    for (corner, c) in &arcs {
        if corners.contains(*corner) {
            points.extend(bezier(c, c.len() * BEZIER_SAMPLES_PER_CONTROL));
        } else {
            points.push(c[1]);
        }
    }
    points.push(points[0]);
    points
}

// ============================================================================
// Donut
// ============================================================================

/// Triangle mesh of a ring between two concentric circles.
#[derive(Debug, Clone, PartialEq)]
pub struct Donut {
    /// Closed outer ring followed by the closed inner ring.
    pub vertices: Vec<PointD>,
    /// Two triangles per slice, indexing into `vertices`.
    pub triangles: Vec<[usize; 3]>,
}

impl Donut {
    pub fn triangle_points(&self) -> impl Iterator<Item = [PointD; 3]> + '_ {
        self.triangles
            .iter()
            .map(|t| [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]])
    }
}

/// Ring centered at `(cx, cy)` built from [`ELLIPSE_SLICES`] slices.
pub fn donut(cx: f64, cy: f64, outer_radius: f64, inner_radius: f64) -> Donut {
    donut_with_slices(cx, cy, outer_radius, inner_radius, ELLIPSE_SLICES)
}

/// Like [`donut`] with an explicit slice count (at least 3).
///
/// Slice `i` joins outer points `i`, `i + 1` and inner points `i`, `i + 1`
/// with the triangles `(inner i, outer i, outer i+1)` and
/// `(inner i, outer i+1, inner i+1)`.
pub fn donut_with_slices(
    cx: f64,
    cy: f64,
    outer_radius: f64,
    inner_radius: f64,
    slices: usize,
) -> Donut {
    let slices = slices.max(3);
    let outer = ellipse_with_slices(cx, cy, outer_radius, outer_radius, slices);
    let inner = ellipse_with_slices(cx, cy, inner_radius, inner_radius, slices);
    let inner_offset = outer.len();

    let triangles = (0..slices)
        .flat_map(|i| {
            [
                [inner_offset + i, i, i + 1],
                [inner_offset + i, i + 1, inner_offset + i + 1],
            ]
        })
        .collect();

    let mut vertices = outer;
    vertices.extend(inner);
    Donut { vertices, triangles }
}

// ============================================================================
// Bezier curves
// ============================================================================

/// Sample a Bezier curve of any degree at `count` evenly spaced parameter
/// values from 0 to 1 inclusive.
///
/// The first and last samples are exactly the first and last control
/// points. Empty control input or `count == 0` yields nothing.
pub fn bezier(control: &[PointD], count: usize) -> Vec<PointD> {
    if control.is_empty() || count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![control[0]];
    }
    let last = count - 1;
    let mut work = Vec::with_capacity(control.len());
    (0..count)
        .map(|i| {
            if i == last {
                return control[control.len() - 1];
            }
            let t = i as f64 / last as f64;
            de_casteljau(control, t, &mut work)
        })
        .collect()
}

fn de_casteljau(control: &[PointD], t: f64, work: &mut Vec<PointD>) -> PointD {
    work.clear();
    work.extend_from_slice(control);
    for level in (1..work.len()).rev() {
        for j in 0..level {
            work[j] = work[j] + (work[j + 1] - work[j]) * t;
        }
    }
    work[0]
}

/// Cubic bezier through `p1` and `p4` with handles `p2`, `p3`, sampled at
/// 12 points.
pub fn cubic_bezier(p1: PointD, p2: PointD, p3: PointD, p4: PointD) -> Vec<PointD> {
    let control = [p1, p2, p3, p4];
    bezier(&control, control.len() * BEZIER_SAMPLES_PER_CONTROL)
}

/// Quadratic bezier from `p1` to `p3` with handle `p2`, sampled at 9 points.
pub fn quadratic_bezier(p1: PointD, p2: PointD, p3: PointD) -> Vec<PointD> {
    let control = [p1, p2, p3];
    bezier(&control, control.len() * BEZIER_SAMPLES_PER_CONTROL)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: PointD, b: PointD) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_ellipse_closed() {
        let e = ellipse(10.0, 20.0, 5.0, 3.0);
        assert_eq!(e.len(), ELLIPSE_SLICES + 1);
        assert_eq!(e[0], e[ELLIPSE_SLICES]);
        assert!(near(e[0], PointD::new(15.0, 20.0)));
        assert!(near(e[8], PointD::new(10.0, 23.0)));
        for p in &e {
            let u = (p.x - 10.0) / 5.0;
            let v = (p.y - 20.0) / 3.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_arc_steps() {
        let a = arc(0.0, 0.0, 1.0, 1.0, 0.0, 90.0);
        // 0, 20, 40, 60, 80
        assert_eq!(a.len(), 5);
        assert!(near(a[0], PointD::new(1.0, 0.0)));
        let last = deg2rad(80.0);
        assert!(near(a[4], PointD::new(last.cos(), last.sin())));
    }

    #[test]
    fn test_arc_negative_sweep() {
        let a = arc(0.0, 0.0, 2.0, 2.0, 90.0, -40.0);
        assert_eq!(a.len(), 2);
        assert!(near(a[0], PointD::new(0.0, 2.0)));
        let second = deg2rad(70.0);
        assert!(near(a[1], PointD::new(2.0 * second.cos(), 2.0 * second.sin())));
        assert!(arc(0.0, 0.0, 1.0, 1.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_rect() {
        let r = rect(&RectD::new(1.0, 2.0, 5.0, 7.0));
        assert_eq!(r[0], PointD::new(1.0, 2.0));
        assert_eq!(r[2], PointD::new(5.0, 7.0));
    }

    #[test]
    fn test_bezier_endpoints() {
        let p1 = PointD::new(0.0, 0.0);
        let p4 = PointD::new(10.0, 0.0);
        let c = cubic_bezier(p1, PointD::new(0.0, 10.0), PointD::new(10.0, 10.0), p4);
        assert_eq!(c.len(), 12);
        assert_eq!(c[0], p1);
        assert_eq!(c[11], p4);
        let q = quadratic_bezier(p1, PointD::new(5.0, 10.0), p4);
        assert_eq!(q.len(), 9);
        // Midpoint of a symmetric quadratic: t = 0.5 lands on index 4.
        assert!(near(q[4], PointD::new(5.0, 5.0)));
    }

    #[test]
    fn test_bezier_degenerate_input() {
        assert!(bezier(&[], 5).is_empty());
        assert!(bezier(&[PointD::new(1.0, 1.0)], 0).is_empty());
        assert_eq!(
            bezier(&[PointD::new(1.0, 1.0)], 3),
            vec![PointD::new(1.0, 1.0); 3]
        );
    }

    #[test]
    fn test_arc_sweep_capped() {
        assert_eq!(arc(0.0, 0.0, 1.0, 1.0, 0.0, 360.0).len(), 18);
        assert_eq!(arc(0.0, 0.0, 1.0, 1.0, 0.0, 1e12).len(), 18);
        assert_eq!(arc(0.0, 0.0, 1.0, 1.0, 0.0, -7200.0).len(), 18);
    }

    #[test]
    fn test_rounded_rect() {
        let r = RectD::new(0.0, 0.0, 20.0, 10.0);
        let pts = rounded_rect(&r, 3.0, Corners::ALL);
        assert_eq!(pts.len(), 4 * 9 + 1);
        assert_eq!(pts.first(), pts.last());
        assert_eq!(pts[0], PointD::new(0.0, 3.0));
        assert_eq!(pts[8], PointD::new(3.0, 0.0));
        for p in &pts {
            assert!(p.x >= 0.0 && p.x <= 20.0 && p.y >= 0.0 && p.y <= 10.0);
        }
        // Oversized radius is clamped to half the short side.
        let pts = rounded_rect(&r, 50.0, Corners::default());
        assert_eq!(pts[0], PointD::new(0.0, 5.0));
    }

    #[test]
    fn test_rounded_rect_selected_corners() {
        let r = RectD::new(0.0, 0.0, 20.0, 10.0);
        let pts = rounded_rect(&r, 3.0, Corners::TOP_RIGHT | Corners::BOTTOM_LEFT);
        assert_eq!(pts.len(), 2 * 9 + 2 + 1);
        assert_eq!(pts[0], PointD::new(0.0, 0.0));
        assert_eq!(pts[1], PointD::new(17.0, 0.0));
        assert_eq!(pts[9], PointD::new(20.0, 3.0));
        assert_eq!(pts[10], PointD::new(20.0, 10.0));
        assert_eq!(pts.first(), pts.last());

        let square = rounded_rect(&r, 3.0, Corners::empty());
        let mut expected = rect(&r);
        expected.push(expected[0]);
        assert_eq!(square, expected);
    }

    #[test]
    fn test_donut() {
        let d = donut(5.0, 5.0, 4.0, 2.0);
        assert_eq!(d.vertices.len(), 2 * (ELLIPSE_SLICES + 1));
        assert_eq!(d.triangles.len(), 2 * ELLIPSE_SLICES);
        assert!(near(d.vertices[0], PointD::new(9.0, 5.0)));
        assert!(near(d.vertices[ELLIPSE_SLICES + 1], PointD::new(7.0, 5.0)));
        assert!(d.triangles.iter().flatten().all(|&i| i < d.vertices.len()));

        // The triangles tile the ring: their areas add up to the area
        // between the two inscribed polygons.
        let ring = |r: f64| 0.5 * ELLIPSE_SLICES as f64 * r * r * (2.0 * PI / ELLIPSE_SLICES as f64).sin();
        let sum: f64 = d
            .triangle_points()
            .map(|[a, b, c]| 0.5 * ((b - a).x * (c - a).y - (c - a).x * (b - a).y).abs())
            .sum();
        assert!((sum - (ring(4.0) - ring(2.0))).abs() < 1e-9);
    }
}
