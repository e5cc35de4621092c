//! Separable image resampler.
//!
//! Resizes an [`Image`] in two 1-D passes, horizontal then vertical. Each
//! pass builds a [`ContributorTable`]: for every destination sample, the
//! list of source samples under the filter window and their weights.
//! Downsampling widens the window by `1 / scale` so every source sample is
//! seen; upsampling uses the kernel's own radius.
//!
//! Outputs of width or height 1 skip the filter along that axis and instead
//! fold all samples together with successive 50% blends.

use tracing::{debug, trace};

use crate::basics::{iceil, ifloor, RectI};
use crate::color::{clamp_channel, Rgba8};
use crate::error::{Error, Result};
use crate::image_filters::{ImageFilterFunction, ResamplingFilter};
use crate::surface::Surface;

/// Weight sums with magnitude below this fall back to the nearest sample.
const WEIGHT_SUM_EPSILON: f64 = 1e-12;

// ============================================================================
// Image
// ============================================================================

/// An owned, row-major 2-D array of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgba8>,
}

impl Image {
    /// A fully transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// An image with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgba8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap a row-major pixel vector; its length must be `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba8>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)`. Panics when out of range.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        self.pixels[x + y * self.width]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, c: Rgba8) {
        self.pixels[x + y * self.width] = c;
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgba8> {
        self.pixels
    }

    /// Copy of the pixels in columns `x1..x2` and rows `y1..y2` of
    /// `region`, clipped to the image. An empty overlap gives an empty
    /// image.
    pub fn sub_image(&self, region: &RectI) -> Image {
        let clamp = |v: i32, hi: usize| (v.max(0) as usize).min(hi);
        let (x1, x2) = (clamp(region.x1, self.width), clamp(region.x2, self.width));
        let (y1, y2) = (clamp(region.y1, self.height), clamp(region.y2, self.height));
        if x1 >= x2 || y1 >= y2 {
            return Image::new(0, 0);
        }
        let pixels = (y1..y2)
            .flat_map(|y| self.pixels[x1 + y * self.width..x2 + y * self.width].iter().copied())
            .collect();
        Image {
            width: x2 - x1,
            height: y2 - y1,
            pixels,
        }
    }
}

impl From<Surface> for Image {
    fn from(s: Surface) -> Self {
        let (width, height) = (s.width(), s.height());
        Self {
            width,
            height,
            pixels: s.into_pixels(),
        }
    }
}

impl From<&Surface> for Image {
    fn from(s: &Surface) -> Self {
        Self {
            width: s.width(),
            height: s.height(),
            pixels: s.pixels().to_vec(),
        }
    }
}

// ============================================================================
// Contributor table
// ============================================================================

/// One source sample feeding a destination sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contributor {
    pub pixel: usize,
    pub weight: f64,
}

/// All contributions to one destination sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributorEntry {
    pub contributors: Vec<Contributor>,
    pub weight_sum: f64,
}

impl ContributorEntry {
    /// Weighted, normalized combination of the contributing samples.
    #[inline]
    fn apply<F: Fn(usize) -> Rgba8>(&self, sample: F) -> Rgba8 {
        let mut acc = [0.0f64; 4];
        for c in &self.contributors {
            let px = sample(c.pixel);
            acc[0] += px.a as f64 * c.weight;
            acc[1] += px.r as f64 * c.weight;
            acc[2] += px.g as f64 * c.weight;
            acc[3] += px.b as f64 * c.weight;
        }
        let inv = 1.0 / self.weight_sum;
        Rgba8 {
            a: clamp_channel(acc[0] * inv),
            r: clamp_channel(acc[1] * inv),
            g: clamp_channel(acc[2] * inv),
            b: clamp_channel(acc[3] * inv),
        }
    }
}

/// Per-axis filter weights mapping `src_len` samples onto `dst_len`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorTable {
    entries: Vec<ContributorEntry>,
}

impl ContributorTable {
    /// Build the table for one axis.
    ///
    /// Zero weights and source indices outside `0..src_len` are skipped. An
    /// entry whose weights cancel out (or that receives none) uses the
    /// nearest source sample alone.
    pub fn new(src_len: usize, dst_len: usize, filter: &dyn ImageFilterFunction) -> Self {
        let mut entries = Vec::with_capacity(dst_len);
        if src_len == 0 {
            return Self { entries };
        }

        let scale = dst_len as f64 / src_len as f64;
        let radius = filter.radius();
        let (width, weight_scale) = if scale < 1.0 {
            (radius / scale, scale)
        } else {
            (radius, 1.0)
        };

        for i in 0..dst_len {
            let center = (i as f64 + 0.5) / scale;
            let left = ifloor(center - width);
            let right = iceil(center + width);

            let mut entry = ContributorEntry::default();
            for j in left..=right {
                if j < 0 || j as usize >= src_len {
                    continue;
                }
                let weight = filter.weight((center - j as f64 - 0.5) * weight_scale);
                if weight == 0.0 {
                    continue;
                }
                entry.contributors.push(Contributor {
                    pixel: j as usize,
                    weight,
                });
                entry.weight_sum += weight;
            }

            if entry.weight_sum.abs() < WEIGHT_SUM_EPSILON {
                let nearest = (center.floor().max(0.0) as usize).min(src_len - 1);
                entry.contributors.clear();
                entry.contributors.push(Contributor {
                    pixel: nearest,
                    weight: 1.0,
                });
                entry.weight_sum = 1.0;
            }
            entries.push(entry);
        }

        trace!(src_len, dst_len, scale, width, "built contributor table");
        Self { entries }
    }

    pub fn entries(&self) -> &[ContributorEntry] {
        &self.entries
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ============================================================================
// Resampler
// ============================================================================

/// Image resampler using one selectable filter kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    filter: ResamplingFilter,
}

impl Resampler {
    pub fn new(filter: ResamplingFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResamplingFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ResamplingFilter) {
        self.filter = filter;
    }

    /// Resample `src` to `new_width` x `new_height`.
    ///
    /// A zero target dimension yields an empty image; an empty source yields
    /// a transparent image of the requested size.
    pub fn resample(&self, src: &Image, new_width: usize, new_height: usize) -> Image {
        debug!(
            src_width = src.width,
            src_height = src.height,
            new_width,
            new_height,
            filter = %self.filter,
            "resampling image"
        );

        if new_width == 0 || new_height == 0 {
            return Image::new(new_width, new_height);
        }
        if src.is_empty() {
            return Image::new(new_width, new_height);
        }

        let kernel = self.filter.kernel();
        match (new_width == 1, new_height == 1) {
            (true, true) => collapse_columns(&collapse_rows(src)),
            (true, false) => {
                let column = collapse_rows(src);
                if column.height == new_height {
                    column
                } else {
                    vertical_pass(&column, new_height, kernel)
                }
            }
            (false, true) => {
                let row = collapse_columns(src);
                if row.width == new_width {
                    row
                } else {
                    horizontal_pass(&row, new_width, kernel)
                }
            }
            (false, false) => {
                let work = horizontal_pass(src, new_width, kernel);
                vertical_pass(&work, new_height, kernel)
            }
        }
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(ResamplingFilter::default())
    }
}

/// Resample `src` with `filter`; shorthand for [`Resampler::resample`].
pub fn resample(src: &Image, new_width: usize, new_height: usize, filter: ResamplingFilter) -> Image {
    Resampler::new(filter).resample(src, new_width, new_height)
}

// ============================================================================
// Passes
// ============================================================================

fn horizontal_pass(src: &Image, new_width: usize, filter: &dyn ImageFilterFunction) -> Image {
    let table = ContributorTable::new(src.width, new_width, filter);
    let mut out = Image::new(new_width, src.height);
    for y in 0..src.height {
        let row = &src.pixels[y * src.width..(y + 1) * src.width];
        for (x, entry) in table.entries.iter().enumerate() {
            out.set_pixel(x, y, entry.apply(|j| row[j]));
        }
    }
    out
}

fn vertical_pass(src: &Image, new_height: usize, filter: &dyn ImageFilterFunction) -> Image {
    let table = ContributorTable::new(src.height, new_height, filter);
    let mut out = Image::new(src.width, new_height);
    for x in 0..src.width {
        for (y, entry) in table.entries.iter().enumerate() {
            out.set_pixel(x, y, entry.apply(|j| src.pixel(x, j)));
        }
    }
    out
}

/// Fold every row into one pixel, producing a `1 x height` column.
fn collapse_rows(src: &Image) -> Image {
    let pixels = (0..src.height)
        .map(|y| fold_half(src.pixels[y * src.width..(y + 1) * src.width].iter().copied()))
        .collect();
    Image {
        width: 1,
        height: src.height,
        pixels,
    }
}

/// Fold every column into one pixel, producing a `width x 1` row.
fn collapse_columns(src: &Image) -> Image {
    let pixels = (0..src.width)
        .map(|x| fold_half((0..src.height).map(|y| src.pixel(x, y))))
        .collect();
    Image {
        width: src.width,
        height: 1,
        pixels,
    }
}

/// Successive 50% blends: `lerp(lerp(lerp(p0, p1), p2), ...)`.
fn fold_half<I: Iterator<Item = Rgba8>>(mut samples: I) -> Rgba8 {
    let first = samples.next().unwrap_or_default();
    samples.fold(first, |acc, c| acc.lerp(&c, 0.5))
}

// ============================================================================
// Tests
// ============================================================================
