//! Drawing facade over a [`Surface`].
//!
//! [`SurfaceGraphics`] owns a surface and routes every primitive through
//! the line rasterizer, the scanline filler or the resampler. All pixel
//! writes go through [`Surface::set_pixel`], so clipping and alpha blending
//! behave the same for every primitive.

use std::fmt;

use crate::basics::{iround, PointD, RectD, RectI, SizeD};
use crate::color::Rgba8;
use crate::gradient::Shading;
use crate::image_filters::ResamplingFilter;
use crate::line::rasterize_line_clipped;
use crate::resample::{Image, Resampler};
use crate::scanline_fill;
use crate::shapes::{self, Corners, ELLIPSE_SLICES};
use crate::surface::Surface;
use crate::text::{align_in_rect, Alignment, TextMeasurer};

pub struct SurfaceGraphics {
    surface: Surface,
    resampler: Resampler,
    slices: usize,
    measurer: Option<Box<dyn TextMeasurer>>,
}

impl SurfaceGraphics {
    /// Graphics over a new transparent surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_surface(Surface::new(width, height))
    }

    pub fn from_surface(surface: Surface) -> Self {
        Self {
            surface,
            resampler: Resampler::new(ResamplingFilter::Triangle),
            slices: ELLIPSE_SLICES,
            measurer: None,
        }
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn alpha_blend(&self) -> bool {
        self.surface.alpha_blend()
    }

    pub fn set_alpha_blend(&mut self, enabled: bool) {
        self.surface.set_alpha_blend(enabled);
    }

    pub fn resampling_filter(&self) -> ResamplingFilter {
        self.resampler.filter()
    }

    pub fn set_resampling_filter(&mut self, filter: ResamplingFilter) {
        self.resampler.set_filter(filter);
    }

    /// Segments used for ellipse and circle outlines and fills.
    pub fn slices(&self) -> usize {
        self.slices
    }

    /// Values below 3 are raised to 3.
    pub fn set_slices(&mut self, slices: usize) {
        self.slices = slices.max(3);
    }

    pub fn set_text_measurer<M: TextMeasurer + 'static>(&mut self, measurer: M) {
        self.measurer = Some(Box::new(measurer));
    }

    pub fn clear_text_measurer(&mut self) {
        self.measurer = None;
    }

    // ------------------------------------------------------------------------
    // Pixels
    // ------------------------------------------------------------------------

    #[inline]
    fn clip_box(&self) -> Option<RectI> {
        self.surface.clip_box()
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    pub fn clear_with(&mut self, color: Rgba8) {
        self.surface.clear_with(color);
    }

    /// Set the pixel nearest to `p`.
    pub fn set_pixel(&mut self, p: PointD, color: Rgba8) {
        let p = p.round();
        self.surface.set_pixel(p.x, p.y, color);
    }

    // ------------------------------------------------------------------------
    // Outlines
    // ------------------------------------------------------------------------

    /// Only the part of the segment that lands on the surface is walked.
    pub fn draw_line(&mut self, a: PointD, b: PointD, color: Rgba8) {
        let Some(clip) = self.clip_box() else {
            return;
        };
        let surface = &mut self.surface;
        rasterize_line_clipped(a, b, &clip, |x, y| surface.set_pixel(x, y, color));
    }

    /// Connected segments through `points`, not closed.
    pub fn draw_lines(&mut self, points: &[PointD], color: Rgba8) {
        for w in points.windows(2) {
            self.draw_line(w[0], w[1], color);
        }
    }

    /// Closed outline through `points`.
    pub fn draw_polygon(&mut self, points: &[PointD], color: Rgba8) {
        self.draw_lines(points, color);
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if points.len() > 2 && first != last {
                self.draw_line(last, first, color);
            }
        }
    }

    pub fn draw_rect(&mut self, rect: &RectD, color: Rgba8) {
        self.draw_polygon(&shapes::rect(rect), color);
    }

    /// Rectangle outline with the selected corners rounded; a non-positive
    /// radius draws the plain rectangle.
    pub fn draw_rounded_rect(&mut self, rect: &RectD, radius: f64, corners: Corners, color: Rgba8) {
        if radius <= 0.0 {
            self.draw_rect(rect, color);
            return;
        }
        self.draw_polygon(&shapes::rounded_rect(rect, radius, corners), color);
    }

    pub fn draw_ellipse(&mut self, center: PointD, rx: f64, ry: f64, color: Rgba8) {
        let points = shapes::ellipse_with_slices(center.x, center.y, rx, ry, self.slices);
        self.draw_lines(&points, color);
    }

    pub fn draw_circle(&mut self, center: PointD, radius: f64, color: Rgba8) {
        self.draw_ellipse(center, radius, radius, color);
    }

    pub fn draw_arc(
        &mut self,
        center: PointD,
        rx: f64,
        ry: f64,
        start_angle: f64,
        sweep_angle: f64,
        color: Rgba8,
    ) {
        let points = shapes::arc(center.x, center.y, rx, ry, start_angle, sweep_angle);
        self.draw_lines(&points, color);
    }

    pub fn draw_bezier(&mut self, p1: PointD, p2: PointD, p3: PointD, p4: PointD, color: Rgba8) {
        self.draw_lines(&shapes::cubic_bezier(p1, p2, p3, p4), color);
    }

    // ------------------------------------------------------------------------
    // Fills
    // ------------------------------------------------------------------------

    pub fn fill_polygon(&mut self, points: &[PointD], shading: &Shading) {
        scanline_fill::fill_polygon(&mut self.surface, points, shading);
    }

    /// Fill every pixel from the rounded top-left corner to the rounded
    /// bottom-right corner, both inclusive, clipped to the surface.
    pub fn fill_rect(&mut self, rect: &RectD, color: Rgba8) {
        let Some(clip) = self.clip_box() else {
            return;
        };
        let left = iround(rect.x1).max(clip.x1);
        let top = iround(rect.y1).max(clip.y1);
        let right = iround(rect.x2).min(clip.x2);
        let bottom = iround(rect.y2).min(clip.y2);
        for y in top..=bottom {
            for x in left..=right {
                self.surface.set_pixel(x, y, color);
            }
        }
    }

    /// Fill a rectangle with the selected corners rounded. A non-positive
    /// radius, or no selected corner, falls back to
    /// [`fill_rect`](Self::fill_rect) for solid shading.
    pub fn fill_rounded_rect(
        &mut self,
        rect: &RectD,
        radius: f64,
        corners: Corners,
        shading: &Shading,
    ) {
        if radius <= 0.0 || corners.is_empty() {
            if let Shading::Solid { color } = *shading {
                self.fill_rect(rect, color);
                return;
            }
            self.fill_polygon(&shapes::rect(rect), shading);
            return;
        }
        self.fill_polygon(&shapes::rounded_rect(rect, radius, corners), shading);
    }

    pub fn fill_ellipse(&mut self, center: PointD, rx: f64, ry: f64, shading: &Shading) {
        let points = shapes::ellipse_with_slices(center.x, center.y, rx, ry, self.slices);
        self.fill_polygon(&points, shading);
    }

    pub fn fill_circle(&mut self, center: PointD, radius: f64, shading: &Shading) {
        self.fill_ellipse(center, radius, radius, shading);
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    /// Resample `image` to the rounded size of `dest` with the configured
    /// filter and write it at the rounded origin of `dest`.
    pub fn draw_image(&mut self, image: &Image, dest: &RectD) {
        let full = RectI::new(
            0,
            0,
            image.width().min(i32::MAX as usize) as i32,
            image.height().min(i32::MAX as usize) as i32,
        );
        self.draw_image_region(image, dest, &full);
    }

    /// Like [`draw_image`](Self::draw_image) for the part of `image` in
    /// columns `source.x1..source.x2` and rows `source.y1..source.y2`.
    ///
    /// Nothing is drawn when the source region is empty or `dest` misses
    /// the surface.
    pub fn draw_image_region(&mut self, image: &Image, dest: &RectD, source: &RectI) {
        let Some(clip) = self.clip_box() else {
            return;
        };
        let x0 = iround(dest.x1);
        let y0 = iround(dest.y1);
        let w = iround(dest.width()).max(0) as usize;
        let h = iround(dest.height()).max(0) as usize;
        if w == 0 || h == 0 {
            return;
        }
        let target = RectI::new(
            x0,
            y0,
            x0.saturating_add(w as i32 - 1),
            y0.saturating_add(h as i32 - 1),
        );
        if !target.overlaps(&clip) {
            return;
        }

        let cropped;
        let image = if source.x1 <= 0
            && source.y1 <= 0
            && source.x2 as i64 >= image.width() as i64
            && source.y2 as i64 >= image.height() as i64
        {
            image
        } else {
            cropped = image.sub_image(source);
            &cropped
        };
        if image.is_empty() {
            return;
        }

        let scaled;
        let src = if image.width() == w && image.height() == h {
            image
        } else {
            scaled = self.resampler.resample(image, w, h);
            &scaled
        };

        for (r, row) in src.pixels().chunks_exact(w).enumerate() {
            for (c, &px) in row.iter().enumerate() {
                self.surface.set_pixel(x0.saturating_add(c as i32), y0.saturating_add(r as i32), px);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    /// Size of `text` per the configured measurer, `None` when no measurer
    /// is set.
    pub fn measure_text(&self, text: &str, font_size: f64) -> Option<SizeD> {
        self.measurer.as_ref().map(|m| m.measure(text, font_size))
    }

    /// Top-left corner where `text` should start to sit in `rect` with the
    /// given alignment, `None` when no measurer is set.
    pub fn text_position(
        &self,
        text: &str,
        font_size: f64,
        rect: &RectD,
        alignment: Alignment,
    ) -> Option<PointD> {
        self.measure_text(text, font_size)
            .map(|size| align_in_rect(size, rect, alignment))
    }
}

impl fmt::Debug for SurfaceGraphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceGraphics")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("resampler", &self.resampler)
            .field("slices", &self.slices)
            .field("has_measurer", &self.measurer.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
