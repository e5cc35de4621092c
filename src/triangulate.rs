//! Ear-clipping polygon triangulation.
//!
//! Works on simple polygons of either winding. The vertex ring is walked
//! looking for an ear: three consecutive vertices forming a
//! counter-clockwise triangle that contains no other remaining vertex. The
//! ear is emitted and its middle vertex removed until two vertices remain.
//!
//! Self-intersecting input may leave no ear to clip. A retry counter
//! bounds the search, and whatever triangles were found so far are
//! returned; compare [`Triangulation::triangle_count`] against
//! `vertices().len() - 2` (or use [`Triangulation::is_complete`]) to detect
//! that.

use std::collections::HashSet;

use tracing::warn;

use crate::basics::PointD;
use crate::math::{calc_polygon_area, is_left, point_in_triangle};

/// Ears whose doubled signed area is below this are treated as flat.
pub const EAR_EPSILON: f64 = 1e-10;

/// Result of triangulating a polygon.
///
/// Triangle indices refer to [`vertices`](Self::vertices), the input with
/// exact duplicate points removed (first occurrence kept).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    vertices: Vec<PointD>,
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    pub fn vertices(&self) -> &[PointD] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flat index list, three entries per triangle.
    pub fn indices(&self) -> Vec<usize> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Triangles as point triples.
    pub fn triangle_points(&self) -> impl Iterator<Item = [PointD; 3]> + '_ {
        self.triangles
            .iter()
            .map(move |t| [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]])
    }

    /// True when every vertex was consumed, i.e. `n - 2` triangles were
    /// produced for `n >= 3` distinct vertices.
    pub fn is_complete(&self) -> bool {
        let n = self.vertices.len();
        n < 3 || self.triangles.len() == n - 2
    }
}

fn dedup_points(points: &[PointD]) -> Vec<PointD> {
    // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .copied()
        .filter(|p| seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())))
        .collect()
}

/// Triangulate a simple polygon.
///
/// Three distinct vertices always give the single triangle `[0, 1, 2]`;
/// fewer give none.
pub fn triangulate(points: &[PointD]) -> Triangulation {
    let vertices = dedup_points(points);
    let n = vertices.len();
    let mut triangles = Vec::with_capacity(n.saturating_sub(2));

    if n == 3 {
        triangles.push([0, 1, 2]);
    } else if n > 3 {
        // Working ring of vertex indices, counter-clockwise.
        let mut ring: Vec<usize> = if calc_polygon_area(&vertices) > 0.0 {
            (0..n).collect()
        } else {
            (0..n).rev().collect()
        };

        let mut nv = n;
        let mut count = 2 * nv;
        let mut v = nv - 1;
        while nv > 2 {
            if count == 0 {
                warn!(
                    vertices = n,
                    remaining = nv,
                    triangles = triangles.len(),
                    "no ear found, polygon is probably not simple"
                );
                break;
            }
            count -= 1;

            let u = if v < nv { v } else { 0 };
            v = if u + 1 < nv { u + 1 } else { 0 };
            let w = if v + 1 < nv { v + 1 } else { 0 };

            if is_ear(&vertices, &ring[..nv], u, v, w) {
                triangles.push([ring[u], ring[v], ring[w]]);
                ring.remove(v);
                nv -= 1;
                count = 2 * nv;
            }
        }
    }

    Triangulation {
        vertices,
        triangles,
    }
}

fn is_ear(vertices: &[PointD], ring: &[usize], u: usize, v: usize, w: usize) -> bool {
    let a = vertices[ring[u]];
    let b = vertices[ring[v]];
    let c = vertices[ring[w]];
    if is_left(a, b, c) < EAR_EPSILON {
        return false;
    }
    !ring
        .iter()
        .enumerate()
        .filter(|&(p, _)| p != u && p != v && p != w)
        .any(|(_, &idx)| point_in_triangle(a, b, c, vertices[idx]))
}

// ============================================================================
// Tests
// ============================================================================
