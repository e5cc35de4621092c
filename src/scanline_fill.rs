//! Even-odd scanline polygon filler.
//!
//! Each integer row `y` is sampled at its pixel-center line `y + 0.5`.
//! Polygon edges crossing that line contribute one x intersection each;
//! the sorted intersections pair up into `[x_start, x_end)` spans, and a
//! pixel is painted when its center `x + 0.5` falls inside a span.
//!
//! For an axis-aligned rectangle from `(x0, y0)` to `(x1, y1)` with integer
//! corners this paints exactly the pixels `x0..x1` by `y0..y1`: the left
//! and top edges are inside, the right and bottom edges are outside.

use std::collections::HashSet;

use crate::basics::{iceil, PointD, PointI, RectI};
use crate::bounding_rect::bounding_rect_i;
use crate::gradient::{ColorSource, Shading};
use crate::surface::Surface;

// ============================================================================
// Span iteration
// ============================================================================

/// A polygon prepared for scanline conversion.
///
/// Vertices are rounded to integer pixel coordinates and duplicate vertices
/// are dropped (first occurrence wins, order otherwise preserved).
#[derive(Debug, Clone)]
pub struct ScanlinePolygon {
    points: Vec<PointI>,
    bounds: Option<RectI>,
}

impl ScanlinePolygon {
    pub fn new(points: &[PointD]) -> Self {
        let mut seen = HashSet::with_capacity(points.len());
        let points: Vec<PointI> = points
            .iter()
            .map(|p| p.round())
            .filter(|p| seen.insert((p.x, p.y)))
            .collect();
        let bounds = if points.len() >= 3 {
            bounding_rect_i(&points)
        } else {
            None
        };
        Self { points, bounds }
    }

    /// Distinct rounded vertices.
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    /// Integer bounding box, or `None` when fewer than 3 distinct vertices
    /// remain and nothing can be filled.
    pub fn bounds(&self) -> Option<RectI> {
        self.bounds
    }

    /// Visit every filled span as `(y, x_start, x_end)` with `x_end`
    /// exclusive, restricted to rows `clip.y1..=clip.y2` and columns
    /// `clip.x1..=clip.x2`.
    pub fn for_each_span<F: FnMut(i32, i32, i32)>(&self, clip: RectI, mut span: F) {
        let Some(b) = self.bounds else {
            return;
        };
        let y_start = b.y1.saturating_sub(1).max(clip.y1);
        let y_end = b.y2.saturating_add(1).min(clip.y2);
        let x_lo = b.x1.max(clip.x1);
        let x_hi = b.x2.min(clip.x2);
        if x_lo > x_hi {
            return;
        }

        let n = self.points.len();
        let mut nodes: Vec<f64> = Vec::with_capacity(n);

        for y in y_start..=y_end {
            let yc = y as f64 + 0.5;
            nodes.clear();

            let mut j = n - 1;
            for i in 0..n {
                let pi = self.points[i];
                let pj = self.points[j];
                let (yi, yj) = (pi.y as f64, pj.y as f64);
                if (yi < yc) != (yj < yc) {
                    let t = (yc - yi) / (yj - yi);
                    nodes.push(pi.x as f64 + t * (pj.x as f64 - pi.x as f64));
                }
                j = i;
            }
            if nodes.len() < 2 {
                continue;
            }
            nodes.sort_by(|a, b| a.total_cmp(b));

            for pair in nodes.chunks_exact(2) {
                let x0 = iceil(pair[0] - 0.5).max(x_lo);
                let x1 = iceil(pair[1] - 0.5).min(x_hi.saturating_add(1));
                if x0 < x1 {
                    span(y, x0, x1);
                }
            }
        }
    }
}

// ============================================================================
// Fill entry points
// ============================================================================

/// Fill a polygon with any per-pixel color source.
///
/// Fewer than 3 distinct (rounded) vertices fills nothing.
pub fn fill_polygon_with<C: ColorSource + ?Sized>(
    surface: &mut Surface,
    points: &[PointD],
    source: &C,
) {
    let Some(clip) = surface.clip_box() else {
        return;
    };
    ScanlinePolygon::new(points).for_each_span(clip, |y, x0, x1| {
        for x in x0..x1 {
            surface.set_pixel(x, y, source.color_at(x, y));
        }
    });
}

/// Fill a polygon with a shading fitted to that polygon's points.
pub fn fill_polygon(surface: &mut Surface, points: &[PointD], shading: &Shading) {
    let gradient = shading.prepare(points);
    fill_polygon_with(surface, points, &gradient);
}

// ============================================================================
// Tests
// ============================================================================
