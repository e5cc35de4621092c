//! Image resampling filter kernels.
//!
//! Each kernel is a symmetric function of the signed distance from the
//! sampling center with finite support (its radius). [`ResamplingFilter`]
//! selects one of them by name.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// ImageFilterFunction trait
// ============================================================================

/// Trait for image filter shape functions.
pub trait ImageFilterFunction {
    /// The radius of the filter kernel.
    fn radius(&self) -> f64;

    /// Weight at non-negative distance `x` from center.
    fn calc_weight(&self, x: f64) -> f64;

    /// Weight at signed distance `x`; zero outside the support.
    #[inline]
    fn weight(&self, x: f64) -> f64 {
        let x = x.abs();
        if x > self.radius() {
            0.0
        } else {
            self.calc_weight(x)
        }
    }
}

/// Normalized sinc, `sin(pi x) / (pi x)`, with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

// ============================================================================
// Filter functions
// ============================================================================

/// Box (nearest neighbour) filter, radius 0.5.
pub struct ImageFilterBox;
impl ImageFilterFunction for ImageFilterBox {
    fn radius(&self) -> f64 {
        0.5
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x <= 0.5 {
            1.0
        } else {
            0.0
        }
    }
}

/// Triangle (bilinear) filter, radius 1.
pub struct ImageFilterTriangle;
impl ImageFilterFunction for ImageFilterTriangle {
    fn radius(&self) -> f64 {
        1.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x < 1.0 {
            1.0 - x
        } else {
            0.0
        }
    }
}

/// Hermite filter, radius 1, cubic Hermite interpolation.
pub struct ImageFilterHermite;
impl ImageFilterFunction for ImageFilterHermite {
    fn radius(&self) -> f64 {
        1.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x < 1.0 {
            (2.0 * x - 3.0) * x * x + 1.0
        } else {
            0.0
        }
    }
}

/// Bell filter, radius 1.5, piecewise quadratic.
pub struct ImageFilterBell;
impl ImageFilterFunction for ImageFilterBell {
    fn radius(&self) -> f64 {
        1.5
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x < 0.5 {
            return 0.75 - x * x;
        }
        if x < 1.5 {
            let t = x - 1.5;
            return 0.5 * t * t;
        }
        0.0
    }
}

/// Cubic B-spline filter, radius 2. Smooth, slightly blurring.
pub struct ImageFilterCubicBSpline;
impl ImageFilterFunction for ImageFilterCubicBSpline {
    fn radius(&self) -> f64 {
        2.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x < 1.0 {
            return 0.5 * x * x * x - x * x + 2.0 / 3.0;
        }
        if x < 2.0 {
            let t = 2.0 - x;
            return t * t * t / 6.0;
        }
        0.0
    }
}

/// Windowed sinc (Lanczos) filter with a configurable lobe count.
pub struct ImageFilterLanczos {
    radius: f64,
}
impl ImageFilterLanczos {
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }
}
impl ImageFilterFunction for ImageFilterLanczos {
    fn radius(&self) -> f64 {
        self.radius
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x < self.radius {
            sinc(x) * sinc(x / self.radius)
        } else {
            0.0
        }
    }
}

/// Mitchell-Netravali filter, radius 2, parameterized by `b` and `c`.
///
/// Default: b = 1/3, c = 1/3.
pub struct ImageFilterMitchell {
    p0: f64,
    p2: f64,
    p3: f64,
    q0: f64,
    q1: f64,
    q2: f64,
    q3: f64,
}
impl ImageFilterMitchell {
    pub fn new(b: f64, c: f64) -> Self {
        Self {
            p0: (6.0 - 2.0 * b) / 6.0,
            p2: (-18.0 + 12.0 * b + 6.0 * c) / 6.0,
            p3: (12.0 - 9.0 * b - 6.0 * c) / 6.0,
            q0: (8.0 * b + 24.0 * c) / 6.0,
            q1: (-12.0 * b - 48.0 * c) / 6.0,
            q2: (6.0 * b + 30.0 * c) / 6.0,
            q3: (-b - 6.0 * c) / 6.0,
        }
    }
}
impl Default for ImageFilterMitchell {
    fn default() -> Self {
        Self::new(1.0 / 3.0, 1.0 / 3.0)
    }
}
impl ImageFilterFunction for ImageFilterMitchell {
    fn radius(&self) -> f64 {
        2.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x < 1.0 {
            return self.p0 + x * x * (self.p2 + x * self.p3);
        }
        if x < 2.0 {
            return self.q0 + x * (self.q1 + x * (self.q2 + x * self.q3));
        }
        0.0
    }
}

/// Raised cosine filter, radius 1.
pub struct ImageFilterCosine;
impl ImageFilterFunction for ImageFilterCosine {
    fn radius(&self) -> f64 {
        1.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x <= 1.0 {
            ((PI * x).cos() + 1.0) * 0.5
        } else {
            0.0
        }
    }
}

/// Catmull-Rom spline filter, radius 2.
pub struct ImageFilterCatmullRom;
impl ImageFilterFunction for ImageFilterCatmullRom {
    fn radius(&self) -> f64 {
        2.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        let x2 = x * x;
        if x <= 1.0 {
            return 1.5 * x2 * x - 2.5 * x2 + 1.0;
        }
        if x <= 2.0 {
            return -0.5 * x2 * x + 2.5 * x2 - 4.0 * x + 2.0;
        }
        0.0
    }
}

/// Quadratic filter, radius 1.5.
pub struct ImageFilterQuadratic;
impl ImageFilterFunction for ImageFilterQuadratic {
    fn radius(&self) -> f64 {
        1.5
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x <= 0.5 {
            return -2.0 * x * x + 1.0;
        }
        if x <= 1.5 {
            return x * x - 2.5 * x + 1.5;
        }
        0.0
    }
}

/// Quadratic B-spline filter, radius 1.5.
pub struct ImageFilterQuadraticBSpline;
impl ImageFilterFunction for ImageFilterQuadraticBSpline {
    fn radius(&self) -> f64 {
        1.5
    }
    fn calc_weight(&self, x: f64) -> f64 {
        if x <= 0.5 {
            return -x * x + 0.75;
        }
        if x <= 1.5 {
            return 0.5 * x * x - 1.5 * x + 1.125;
        }
        0.0
    }
}

/// Cubic convolution filter, radius 3.
pub struct ImageFilterCubicConvolution;
impl ImageFilterFunction for ImageFilterCubicConvolution {
    fn radius(&self) -> f64 {
        3.0
    }
    fn calc_weight(&self, x: f64) -> f64 {
        let x2 = x * x;
        let x3 = x2 * x;
        if x <= 1.0 {
            return 4.0 / 3.0 * x3 - 7.0 / 3.0 * x2 + 1.0;
        }
        if x <= 2.0 {
            return -7.0 / 12.0 * x3 + 3.0 * x2 - 59.0 / 12.0 * x + 2.5;
        }
        if x <= 3.0 {
            return 1.0 / 12.0 * x3 - 2.0 / 3.0 * x2 + 1.75 * x - 1.5;
        }
        0.0
    }
}

// ============================================================================
// ResamplingFilter selector
// ============================================================================

static LANCZOS3: ImageFilterLanczos = ImageFilterLanczos::new(3.0);
static LANCZOS8: ImageFilterLanczos = ImageFilterLanczos::new(8.0);

/// Named resampling kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResamplingFilter {
    Box,
    #[default]
    Triangle,
    Hermite,
    Bell,
    #[cfg_attr(feature = "serde", serde(rename = "cubic_bspline"))]
    CubicBSpline,
    Lanczos3,
    Mitchell,
    Cosine,
    CatmullRom,
    Quadratic,
    #[cfg_attr(feature = "serde", serde(rename = "quadratic_bspline"))]
    QuadraticBSpline,
    CubicConvolution,
    Lanczos8,
}

impl ResamplingFilter {
    /// Every kernel, in declaration order.
    pub const ALL: [ResamplingFilter; 13] = [
        ResamplingFilter::Box,
        ResamplingFilter::Triangle,
        ResamplingFilter::Hermite,
        ResamplingFilter::Bell,
        ResamplingFilter::CubicBSpline,
        ResamplingFilter::Lanczos3,
        ResamplingFilter::Mitchell,
        ResamplingFilter::Cosine,
        ResamplingFilter::CatmullRom,
        ResamplingFilter::Quadratic,
        ResamplingFilter::QuadraticBSpline,
        ResamplingFilter::CubicConvolution,
        ResamplingFilter::Lanczos8,
    ];

    /// Lower-case identifier, as accepted by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            ResamplingFilter::Box => "box",
            ResamplingFilter::Triangle => "triangle",
            ResamplingFilter::Hermite => "hermite",
            ResamplingFilter::Bell => "bell",
            ResamplingFilter::CubicBSpline => "cubic_bspline",
            ResamplingFilter::Lanczos3 => "lanczos3",
            ResamplingFilter::Mitchell => "mitchell",
            ResamplingFilter::Cosine => "cosine",
            ResamplingFilter::CatmullRom => "catmull_rom",
            ResamplingFilter::Quadratic => "quadratic",
            ResamplingFilter::QuadraticBSpline => "quadratic_bspline",
            ResamplingFilter::CubicConvolution => "cubic_convolution",
            ResamplingFilter::Lanczos8 => "lanczos8",
        }
    }

    /// The kernel implementation behind this name.
    pub fn kernel(self) -> &'static dyn ImageFilterFunction {
        static MITCHELL: std::sync::OnceLock<ImageFilterMitchell> = std::sync::OnceLock::new();
        match self {
            ResamplingFilter::Box => &ImageFilterBox,
            ResamplingFilter::Triangle => &ImageFilterTriangle,
            ResamplingFilter::Hermite => &ImageFilterHermite,
            ResamplingFilter::Bell => &ImageFilterBell,
            ResamplingFilter::CubicBSpline => &ImageFilterCubicBSpline,
            ResamplingFilter::Lanczos3 => &LANCZOS3,
            ResamplingFilter::Mitchell => MITCHELL.get_or_init(ImageFilterMitchell::default),
            ResamplingFilter::Cosine => &ImageFilterCosine,
            ResamplingFilter::CatmullRom => &ImageFilterCatmullRom,
            ResamplingFilter::Quadratic => &ImageFilterQuadratic,
            ResamplingFilter::QuadraticBSpline => &ImageFilterQuadraticBSpline,
            ResamplingFilter::CubicConvolution => &ImageFilterCubicConvolution,
            ResamplingFilter::Lanczos8 => &LANCZOS8,
        }
    }
}

impl ImageFilterFunction for ResamplingFilter {
    fn radius(&self) -> f64 {
        self.kernel().radius()
    }
    fn calc_weight(&self, x: f64) -> f64 {
        self.kernel().calc_weight(x)
    }
}

impl fmt::Display for ResamplingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResamplingFilter {
    type Err = Error;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted || f.name().replace('_', "") == wanted)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
