//! # surface-gfx
//!
//! CPU-only 2D rendering and computational geometry on an owned RGBA pixel
//! surface.
//!
//! - Straight-alpha pixel surface with clipped reads and writes
//! - Symmetric integer line rasterization
//! - Even-odd scanline polygon filling with solid, linear and radial
//!   shading
//! - Separable image resampling with thirteen filter kernels
//! - Monotone-chain convex hull, ear-clipping triangulation and a
//!   separating-axis polygon overlap test
//!
//! ## Architecture
//!
//! Everything draws into a [`Surface`]:
//!
//! 1. **Point generators** (`shapes`) turn ellipses, arcs, bezier curves and
//!    rounded rectangles into point sequences, and rings into triangle meshes
//! 2. **Rasterizers** (`line`, `scanline_fill`) turn point sequences into
//!    pixel coordinates
//! 3. **Color sources** (`gradient`) decide the color of each pixel
//! 4. **Surface** composites the result into its pixel buffer
//!
//! [`SurfaceGraphics`] ties the stages together behind one drawing API. The
//! geometry modules (`convex_hull`, `triangulate`, `polygon`) are pure
//! functions of their inputs and do not touch a surface.
//!
//! The crate logs through `tracing` and never installs a subscriber.

// Foundation types & math
pub mod basics;
pub mod color;
pub mod error;
pub mod math;
pub mod simul_eq;
pub mod trans_affine;

// Geometry primitives
pub mod bounding_rect;
pub mod convex_hull;
pub mod polygon;
pub mod shapes;
pub mod triangulate;

// Pixel storage
pub mod surface;

// Rasterization & shading
pub mod gradient;
pub mod line;
pub mod scanline_fill;

// Image resampling
pub mod image_filters;
pub mod resample;

// Text & drawing facade
pub mod graphics;
pub mod text;

pub use basics::{PointD, PointI, RectD, RectI, SizeD};
pub use color::Rgba8;
pub use error::{Error, Result};
pub use gradient::Shading;
pub use graphics::SurfaceGraphics;
pub use image_filters::ResamplingFilter;
pub use resample::Image;
pub use surface::Surface;
