//! Text measurement and alignment.
//!
//! The renderer does not rasterize glyphs. It only needs the size a string
//! will occupy so it can place it inside a rectangle; that size comes from
//! a caller-supplied [`TextMeasurer`].
//!
//! With the `font` feature enabled, [`TrueTypeMeasurer`] measures text from
//! TrueType/OpenType metrics via `ttf-parser`.

use crate::basics::{PointD, RectD, SizeD};

// ============================================================================
// Measurer trait
// ============================================================================

/// Reports the extent of a string rendered at a given font size.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> SizeD;
}

impl<F: Fn(&str, f64) -> SizeD> TextMeasurer for F {
    fn measure(&self, text: &str, font_size: f64) -> SizeD {
        self(text, font_size)
    }
}

/// Every character advances by the same fraction of the font size.
///
/// Lines are split on `'\n'`; the width is that of the longest line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per character, in ems.
    pub advance: f64,
    /// Line height, in ems.
    pub line_height: f64,
}

impl MonospaceMeasurer {
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6, 1.2)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> SizeD {
        if text.is_empty() {
            return SizeD::new(0.0, 0.0);
        }
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        SizeD::new(
            widest as f64 * self.advance * font_size,
            lines as f64 * self.line_height * font_size,
        )
    }
}

// ============================================================================
// Alignment
// ============================================================================

/// Placement of a box inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alignment {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Top-left corner at which a box of `size` sits inside `rect` with the
/// given alignment. Oversized boxes overhang symmetrically when centered.
pub fn align_in_rect(size: SizeD, rect: &RectD, alignment: Alignment) -> PointD {
    let (x, y) = (rect.x1, rect.y1);
    let (w, h) = (rect.width(), rect.height());

    let left = x;
    let center = x + w / 2.0 - size.width / 2.0;
    let right = x + w - size.width;
    let top = y;
    let middle = y + h / 2.0 - size.height / 2.0;
    let bottom = y + h - size.height;

    use Alignment::*;
    match alignment {
        TopLeft => PointD::new(left, top),
        TopCenter => PointD::new(center, top),
        TopRight => PointD::new(right, top),
        MiddleLeft => PointD::new(left, middle),
        MiddleCenter => PointD::new(center, middle),
        MiddleRight => PointD::new(right, middle),
        BottomLeft => PointD::new(left, bottom),
        BottomCenter => PointD::new(center, bottom),
        BottomRight => PointD::new(right, bottom),
    }
}

// ============================================================================
// TrueType measurer
// ============================================================================

#[cfg(feature = "font")]
pub use self::truetype::TrueTypeMeasurer;

#[cfg(feature = "font")]
mod truetype {
    use super::TextMeasurer;
    use crate::basics::SizeD;
    use crate::error::{Error, Result};

    /// Measures text using the horizontal metrics of a font face.
    ///
    /// Widths sum glyph advances plus `kern` table adjustments; the height
    /// of each line is `ascender - descender + line_gap`, minus the final
    /// line gap.
    pub struct TrueTypeMeasurer {
        face_data: Vec<u8>,
        face_index: u32,
    }

    impl TrueTypeMeasurer {
        /// Create a measurer from raw TTF/OTF data. `face_index` selects
        /// the face in a collection (0 for single fonts).
        pub fn from_data(data: Vec<u8>, face_index: u32) -> Result<Self> {
            ttf_parser::Face::parse(&data, face_index)
                .map_err(|e| Error::Font(format!("failed to parse font: {e}")))?;
            Ok(Self {
                face_data: data,
                face_index,
            })
        }

        fn face(&self) -> Option<ttf_parser::Face<'_>> {
            ttf_parser::Face::parse(&self.face_data, self.face_index).ok()
        }

        fn line_width(face: &ttf_parser::Face<'_>, line: &str) -> f64 {
            let mut width = 0.0;
            let mut prev: Option<ttf_parser::GlyphId> = None;
            for ch in line.chars() {
                let Some(glyph) = face.glyph_index(ch) else {
                    prev = None;
                    continue;
                };
                width += face.glyph_hor_advance(glyph).unwrap_or(0) as f64;
                if let Some(p) = prev {
                    width += kerning(face, p, glyph);
                }
                prev = Some(glyph);
            }
            width
        }
    }

    fn kerning(face: &ttf_parser::Face<'_>, first: ttf_parser::GlyphId, second: ttf_parser::GlyphId) -> f64 {
        if let Some(kern) = face.tables().kern {
            for subtable in kern.subtables {
                if subtable.horizontal && !subtable.has_cross_stream {
                    if let Some(value) = subtable.glyphs_kerning(first, second) {
                        return value as f64;
                    }
                }
            }
        }
        0.0
    }

    impl TextMeasurer for TrueTypeMeasurer {
        fn measure(&self, text: &str, font_size: f64) -> SizeD {
            let Some(face) = self.face() else {
                return SizeD::new(0.0, 0.0);
            };
            if text.is_empty() {
                return SizeD::new(0.0, 0.0);
            }
            let scale = font_size / face.units_per_em() as f64;
            let line = (face.ascender() as f64 - face.descender() as f64) * scale;
            let gap = face.line_gap() as f64 * scale;

            let mut lines = 0usize;
            let mut widest: f64 = 0.0;
            for l in text.split('\n') {
                lines += 1;
                widest = widest.max(Self::line_width(&face, l) * scale);
            }
            SizeD::new(widest, lines as f64 * (line + gap) - gap)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_rejects_garbage() {
            let err = TrueTypeMeasurer::from_data(vec![0u8; 16], 0).err();
            assert!(matches!(err, Some(Error::Font(_))));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let m = MonospaceMeasurer::new(0.5, 1.0);
        assert_eq!(m.measure("abcd", 10.0), SizeD::new(20.0, 10.0));
        assert_eq!(m.measure("ab\nabcdef", 10.0), SizeD::new(30.0, 20.0));
        assert_eq!(m.measure("", 10.0), SizeD::new(0.0, 0.0));
    }

    #[test]
    fn test_closure_measurer() {
        let m = |text: &str, size: f64| SizeD::new(text.len() as f64 * size, size);
        assert_eq!(m.measure("xy", 3.0), SizeD::new(6.0, 3.0));
    }

    #[test]
    fn test_align_in_rect() {
        let rect = RectD::new(10.0, 20.0, 110.0, 70.0);
        let size = SizeD::new(40.0, 10.0);
        assert_eq!(align_in_rect(size, &rect, Alignment::TopLeft), PointD::new(10.0, 20.0));
        assert_eq!(align_in_rect(size, &rect, Alignment::TopCenter), PointD::new(40.0, 20.0));
        assert_eq!(align_in_rect(size, &rect, Alignment::TopRight), PointD::new(70.0, 20.0));
        assert_eq!(align_in_rect(size, &rect, Alignment::MiddleLeft), PointD::new(10.0, 40.0));
        assert_eq!(
            align_in_rect(size, &rect, Alignment::MiddleCenter),
            PointD::new(40.0, 40.0)
        );
        assert_eq!(align_in_rect(size, &rect, Alignment::MiddleRight), PointD::new(70.0, 40.0));
        assert_eq!(align_in_rect(size, &rect, Alignment::BottomLeft), PointD::new(10.0, 60.0));
        assert_eq!(
            align_in_rect(size, &rect, Alignment::BottomCenter),
            PointD::new(40.0, 60.0)
        );
        assert_eq!(align_in_rect(size, &rect, Alignment::BottomRight), PointD::new(70.0, 60.0));
    }

    #[test]
    fn test_oversized_box_overhangs() {
        let rect = RectD::new(0.0, 0.0, 10.0, 10.0);
        let p = align_in_rect(SizeD::new(20.0, 4.0), &rect, Alignment::MiddleCenter);
        assert_eq!(p, PointD::new(-5.0, 3.0));
    }
}
