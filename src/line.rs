//! Integer line rasterizer.
//!
//! Bresenham-style stepping with an integer error accumulator. The segment
//! is walked from both ends toward the middle at once, four steps per
//! unrolled iteration, so each step emits two pixels.
//!
//! Endpoints are put into a canonical order before stepping, which makes
//! `a -> b` and `b -> a` produce exactly the same pixel set.

use crate::basics::{PointD, PointI, RectI};

// ============================================================================
// Minor-axis stepper
// ============================================================================

/// Tracks the minor-axis offset `f(k) = floor((2k*d + n) / (2n))` for
/// successive major-axis steps `k`, i.e. `k * d / n` rounded half up.
#[derive(Debug, Clone, Copy)]
struct MinorStepper {
    err: i64,
    inc: i64,
    wrap: i64,
    offset: i64,
}

impl MinorStepper {
    #[inline]
    fn new(len: i64, delta: i64) -> Self {
        Self {
            err: len,
            inc: 2 * delta,
            wrap: 2 * len,
            offset: 0,
        }
    }

    #[inline]
    fn step(&mut self) {
        self.err += self.inc;
        if self.err >= self.wrap {
            self.err -= self.wrap;
            self.offset += 1;
        }
    }
}

/// Closed form of [`MinorStepper`] at step `k`.
#[inline]
fn minor_offset(k: i64, len: i64, delta: i64) -> i64 {
    if len == 0 {
        return 0;
    }
    let num = 2 * k as i128 * delta as i128 + len as i128;
    (num / (2 * len as i128)) as i64
}

// ============================================================================
// Line rasterizer
// ============================================================================

/// Precomputed stepping parameters for one segment.
///
/// Lengths are kept in `i64` so that endpoints anywhere in the `i32` range
/// step without overflow.
#[derive(Debug, Clone, Copy)]
pub struct LineBresenham {
    start: PointI,
    end: PointI,
    ver: bool,
    len: i64,
    delta: i64,
    sx: i64,
    sy: i64,
}

impl LineBresenham {
    /// Prepare a segment between two pixel coordinates.
    pub fn new(a: PointI, b: PointI) -> Self {
        let (start, end) = if (b.x, b.y) < (a.x, a.y) { (b, a) } else { (a, b) };
        let dx = (end.x as i64 - start.x as i64).abs();
        let dy = (end.y as i64 - start.y as i64).abs();
        let ver = dy > dx;
        let (len, delta) = if ver { (dy, dx) } else { (dx, dy) };
        Self {
            start,
            end,
            ver,
            len,
            delta,
            sx: if end.x >= start.x { 1 } else { -1 },
            sy: if end.y >= start.y { 1 } else { -1 },
        }
    }

    /// True if the line is vertical-major.
    #[inline]
    pub fn is_ver(&self) -> bool {
        self.ver
    }

    /// Number of steps along the dominant axis.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> i64 {
        self.len
    }

    /// Number of pixels the segment covers.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.len as usize + 1
    }

    // Every pixel lies between the endpoints, so the casts back to i32
    // cannot truncate.
    #[inline]
    fn front(&self, k: i64, f: i64) -> (i32, i32) {
        let (x, y) = (self.start.x as i64, self.start.y as i64);
        if self.ver {
            ((x + self.sx * f) as i32, (y + self.sy * k) as i32)
        } else {
            ((x + self.sx * k) as i32, (y + self.sy * f) as i32)
        }
    }

    #[inline]
    fn back(&self, k: i64, f: i64) -> (i32, i32) {
        let (x, y) = (self.end.x as i64, self.end.y as i64);
        if self.ver {
            ((x - self.sx * f) as i32, (y - self.sy * k) as i32)
        } else {
            ((x - self.sx * k) as i32, (y - self.sy * f) as i32)
        }
    }

    #[inline]
    fn step_pair<F: FnMut(i32, i32)>(&self, k: i64, minor: &mut MinorStepper, plot: &mut F) {
        let (fx, fy) = self.front(k, minor.offset);
        plot(fx, fy);
        let (bx, by) = self.back(k, minor.offset);
        plot(bx, by);
        minor.step();
    }

    /// Pixel `j` major steps from the start, `0 <= j <= len`.
    ///
    /// Matches what [`rasterize`](Self::rasterize) emits for that step.
    #[inline]
    fn pixel_at(&self, j: i64) -> (i32, i32) {
        if j <= self.len / 2 {
            self.front(j, minor_offset(j, self.len, self.delta))
        } else {
            let k = self.len - j;
            self.back(k, minor_offset(k, self.len, self.delta))
        }
    }

    /// Emit every pixel of the segment exactly once.
    ///
    /// Pixels arrive in pairs, one from each end, not in path order.
    pub fn rasterize<F: FnMut(i32, i32)>(&self, mut plot: F) {
        if self.len == 0 {
            plot(self.start.x, self.start.y);
            return;
        }

        // Front covers major steps 0..=len/2, back covers the rest.
        let pairs = self.len - self.len / 2;
        let mut minor = MinorStepper::new(self.len, self.delta);
        let mut k = 0;

        while k + 4 <= pairs {
            self.step_pair(k, &mut minor, &mut plot);
            self.step_pair(k + 1, &mut minor, &mut plot);
            self.step_pair(k + 2, &mut minor, &mut plot);
            self.step_pair(k + 3, &mut minor, &mut plot);
            k += 4;
        }
        while k < pairs {
            self.step_pair(k, &mut minor, &mut plot);
            k += 1;
        }

        // Even length leaves the middle pixel to the front walk.
        if self.len % 2 == 0 {
            let (fx, fy) = self.front(k, minor.offset);
            plot(fx, fy);
        }
    }

    /// Emit the pixels of the segment that fall inside `clip` (edges
    /// inclusive), in path order.
    ///
    /// The pixel set is exactly that of [`rasterize`](Self::rasterize)
    /// restricted to `clip`. Only the major-axis steps that can reach the
    /// clip box are visited, so the cost is bounded by the clip size.
    pub fn rasterize_clipped<F: FnMut(i32, i32)>(&self, clip: &RectI, mut plot: F) {
        if !clip.is_valid() {
            return;
        }
        let (origin, step, lo, hi) = if self.ver {
            (self.start.y as i64, self.sy, clip.y1 as i64, clip.y2 as i64)
        } else {
            (self.start.x as i64, self.sx, clip.x1 as i64, clip.x2 as i64)
        };
        let (j0, j1) = if step > 0 {
            (lo - origin, hi - origin)
        } else {
            (origin - hi, origin - lo)
        };
        let j0 = j0.max(0);
        let j1 = j1.min(self.len);
        for j in j0..=j1 {
            let (x, y) = self.pixel_at(j);
            if clip.hit_test(x, y) {
                plot(x, y);
            }
        }
    }
}

/// Rasterize the segment `a -> b` after rounding both endpoints to the
/// nearest pixel.
pub fn rasterize_line<F: FnMut(i32, i32)>(a: PointD, b: PointD, plot: F) {
    LineBresenham::new(a.round(), b.round()).rasterize(plot);
}

/// Like [`rasterize_line`], visiting only the pixels inside `clip`.
pub fn rasterize_line_clipped<F: FnMut(i32, i32)>(a: PointD, b: PointD, clip: &RectI, plot: F) {
    LineBresenham::new(a.round(), b.round()).rasterize_clipped(clip, plot);
}

/// Collect the pixels of a segment, mainly for inspection and tests.
pub fn line_pixels(a: PointI, b: PointI) -> Vec<PointI> {
    let line = LineBresenham::new(a, b);
    let mut out = Vec::with_capacity(line.pixel_count());
    line.rasterize(|x, y| out.push(PointI::new(x, y)));
    out
}

// ============================================================================
// Tests
// ============================================================================
