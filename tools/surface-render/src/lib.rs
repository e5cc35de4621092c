// Copyright 2025. Scene rendering and image I/O for the surface-render CLI.
//
// A scene is a JSON document describing a canvas and an ordered list of
// drawing operations, replayed onto a `SurfaceGraphics`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use surface_gfx::basics::{PointD, RectD, RectI};
use surface_gfx::shapes::Corners;
use surface_gfx::{Image, ResamplingFilter, Rgba8, Shading, Surface, SurfaceGraphics};
use tracing::{debug, info};

// ============================================================================
// Scene model
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub background: Option<Rgba8>,
    #[serde(default = "default_alpha_blend")]
    pub alpha_blend: bool,
    #[serde(default)]
    pub filter: ResamplingFilter,
    #[serde(default)]
    pub ops: Vec<Op>,
}

fn default_alpha_blend() -> bool {
    true
}

/// One drawing operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Line {
        from: PointD,
        to: PointD,
        color: Rgba8,
    },
    Polyline {
        points: Vec<PointD>,
        color: Rgba8,
    },
    Polygon {
        points: Vec<PointD>,
        color: Rgba8,
    },
    FillPolygon {
        points: Vec<PointD>,
        shading: Shading,
    },
    FillRect {
        rect: RectD,
        color: Rgba8,
    },
    RoundedRect {
        rect: RectD,
        radius: f64,
        #[serde(default)]
        corners: Corners,
        color: Rgba8,
    },
    FillRoundedRect {
        rect: RectD,
        radius: f64,
        #[serde(default)]
        corners: Corners,
        shading: Shading,
    },
    Ellipse {
        center: PointD,
        rx: f64,
        ry: f64,
        color: Rgba8,
    },
    FillEllipse {
        center: PointD,
        rx: f64,
        ry: f64,
        shading: Shading,
    },
    Arc {
        center: PointD,
        rx: f64,
        ry: f64,
        start: f64,
        sweep: f64,
        color: Rgba8,
    },
    Image {
        path: PathBuf,
        dest: RectD,
        #[serde(default)]
        source: Option<RectI>,
    },
}

impl Scene {
    pub fn from_json(text: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(text).context("invalid scene description")?;
        if scene.width == 0 || scene.height == 0 {
            bail!("scene canvas must be non-empty, got {}x{}", scene.width, scene.height);
        }
        Ok(scene)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Replay the scene. Relative image paths resolve against `base_dir`.
    pub fn render(&self, base_dir: &Path) -> Result<Surface> {
        let mut g = SurfaceGraphics::new(self.width, self.height);
        if let Some(bg) = self.background {
            g.clear_with(bg);
        }
        g.set_alpha_blend(self.alpha_blend);
        g.set_resampling_filter(self.filter);

        for (i, op) in self.ops.iter().enumerate() {
            debug!(index = i, ?op, "drawing");
            match op {
                Op::Line { from, to, color } => g.draw_line(*from, *to, *color),
                Op::Polyline { points, color } => g.draw_lines(points, *color),
                Op::Polygon { points, color } => g.draw_polygon(points, *color),
                Op::FillPolygon { points, shading } => g.fill_polygon(points, shading),
                Op::FillRect { rect, color } => g.fill_rect(rect, *color),
                Op::RoundedRect {
                    rect,
                    radius,
                    corners,
                    color,
                } => g.draw_rounded_rect(rect, *radius, *corners, *color),
                Op::FillRoundedRect {
                    rect,
                    radius,
                    corners,
                    shading,
                } => g.fill_rounded_rect(rect, *radius, *corners, shading),
                Op::Ellipse {
                    center,
                    rx,
                    ry,
                    color,
                } => g.draw_ellipse(*center, *rx, *ry, *color),
                Op::FillEllipse {
                    center,
                    rx,
                    ry,
                    shading,
                } => g.fill_ellipse(*center, *rx, *ry, shading),
                Op::Arc {
                    center,
                    rx,
                    ry,
                    start,
                    sweep,
                    color,
                } => g.draw_arc(*center, *rx, *ry, *start, *sweep, *color),
                Op::Image { path, dest, source } => {
                    let image = load_image(&base_dir.join(path))?;
                    match source {
                        Some(source) => g.draw_image_region(&image, dest, source),
                        None => g.draw_image(&image, dest),
                    }
                }
            }
        }
        info!(ops = self.ops.len(), width = self.width, height = self.height, "scene rendered");
        Ok(g.into_surface())
    }
}

// ============================================================================
// Image I/O
// ============================================================================

/// Decode any supported image file into straight-alpha RGBA pixels.
pub fn load_image(path: &Path) -> Result<Image> {
    let decoded = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    let (w, h) = decoded.dimensions();
    let pixels = decoded
        .pixels()
        .map(|p| Rgba8::new(p[0] as u32, p[1] as u32, p[2] as u32, p[3] as u32))
        .collect();
    Ok(Image::from_pixels(w as usize, h as usize, pixels)?)
}

fn write_rgba(path: &Path, width: usize, height: usize, bytes: Vec<u8>) -> Result<()> {
    let buf = image::RgbaImage::from_raw(width as u32, height as u32, bytes)
        .context("pixel buffer does not match image dimensions")?;
    buf.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn save_surface(surface: &Surface, path: &Path) -> Result<()> {
    write_rgba(path, surface.width(), surface.height(), surface.to_rgba_bytes())
}

pub fn save_image(image: &Image, path: &Path) -> Result<()> {
    let bytes = image
        .pixels()
        .iter()
        .flat_map(|c| [c.r, c.g, c.b, c.a])
        .collect();
    write_rgba(path, image.width(), image.height(), bytes)
}

/// Read a JSON array of `{"x": .., "y": ..}` points.
pub fn load_points(path: &Path) -> Result<Vec<PointD>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading points {}", path.display()))?;
    serde_json::from_str(&text).context("expected a JSON array of {\"x\", \"y\"} points")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_json(
            r#"{
                "width": 16,
                "height": 8,
                "background": {"r": 255, "g": 255, "b": 255, "a": 255},
                "filter": "lanczos3",
                "ops": [
                    {"op": "fill_rect", "rect": {"x1": 0, "y1": 0, "x2": 3, "y2": 3},
                     "color": {"r": 255, "g": 0, "b": 0, "a": 255}},
                    {"op": "fill_polygon",
                     "points": [{"x": 4, "y": 0}, {"x": 12, "y": 0}, {"x": 12, "y": 8}],
                     "shading": {"type": "linear", "angle": 0,
                                 "color1": {"r": 0, "g": 0, "b": 0, "a": 255},
                                 "color2": {"r": 0, "g": 0, "b": 255, "a": 255}}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scene.filter, ResamplingFilter::Lanczos3);
        assert!(scene.alpha_blend);
        assert_eq!(scene.ops.len(), 2);

        let surface = scene.render(Path::new(".")).unwrap();
        assert_eq!(surface.get_pixel(1, 1), Rgba8::RED);
        assert_eq!(surface.get_pixel(15, 7), Rgba8::WHITE);
        assert_ne!(surface.get_pixel(11, 2), Rgba8::WHITE);
    }

    #[test]
    fn test_rounded_rect_corners() {
        let scene = Scene::from_json(
            r#"{
                "width": 12,
                "height": 12,
                "ops": [
                    {"op": "fill_rounded_rect", "rect": {"x1": 2, "y1": 2, "x2": 9, "y2": 9},
                     "radius": 3, "corners": "BOTTOM_RIGHT",
                     "shading": {"type": "solid", "color": {"r": 255, "g": 0, "b": 0, "a": 255}}},
                    {"op": "rounded_rect", "rect": {"x1": 0, "y1": 0, "x2": 11, "y2": 11},
                     "radius": 2, "color": {"r": 0, "g": 0, "b": 255, "a": 255}}
                ]
            }"#,
        )
        .unwrap();
        match &scene.ops[1] {
            Op::RoundedRect { corners, .. } => assert_eq!(*corners, Corners::ALL),
            other => panic!("unexpected op {:?}", other),
        }
        let surface = scene.render(Path::new(".")).unwrap();
        assert_eq!(surface.get_pixel(2, 2), Rgba8::RED);
        assert_eq!(surface.get_pixel(8, 8), Rgba8::TRANSPARENT);
        assert_eq!(surface.get_pixel(5, 0), Rgba8::BLUE);
    }

    #[test]
    fn test_far_geometry_renders() {
        let scene = Scene::from_json(
            r#"{
                "width": 4,
                "height": 4,
                "ops": [
                    {"op": "line", "from": {"x": -1.5e9, "y": 1}, "to": {"x": 1.5e9, "y": 1},
                     "color": {"r": 255, "g": 0, "b": 0, "a": 255}},
                    {"op": "fill_rect", "rect": {"x1": 0, "y1": 3, "x2": 1e12, "y2": 1e12},
                     "color": {"r": 0, "g": 255, "b": 0, "a": 255}},
                    {"op": "arc", "center": {"x": 2, "y": 2}, "rx": 1, "ry": 1,
                     "start": 0, "sweep": 1e300, "color": {"r": 0, "g": 0, "b": 255, "a": 255}}
                ]
            }"#,
        )
        .unwrap();
        let surface = scene.render(Path::new(".")).unwrap();
        assert_eq!(surface.get_pixel(0, 1), Rgba8::RED);
        assert_eq!(surface.get_pixel(0, 3), Rgba8::LIME);
    }

    #[test]
    fn test_reject_empty_canvas() {
        assert!(Scene::from_json(r#"{"width": 0, "height": 4}"#).is_err());
        assert!(Scene::from_json(r#"{"width": 4}"#).is_err());
    }
}
