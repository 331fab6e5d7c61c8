//! Glyph rasterization contract and the rasterizers shipped with the engine.

use std::path::Path;

use crate::error::{FontError, Result};
use crate::geometry::Vec2;

/// Coverage mask for one glyph at one pixel size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Top-left of the bitmap relative to the pen position on the baseline (y down).
    pub offset: Vec2,
    pub advance: f32,
    /// Row-major 8-bit coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

pub trait GlyphRasterizer {
    fn has_glyph(&self, ch: char) -> bool;
    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap;
}

/// TrueType/OpenType rasterizer backed by fontdue.
pub struct FontdueRasterizer {
    font: fontdue::Font,
}

impl FontdueRasterizer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontError::InvalidData(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        GlyphBitmap {
            width: metrics.width as u32,
            height: metrics.height as u32,
            offset: Vec2::new(
                metrics.xmin as f32,
                -(metrics.ymin as f32 + metrics.height as f32),
            ),
            advance: metrics.advance_width,
            coverage,
        }
    }
}

/// Fixed-metric rasterizer that draws every printable glyph as a solid block.
///
/// Advance is half the pixel size, blocks are 70% of the size tall. Spaces
/// and tabs produce an empty bitmap; control characters are reported missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn has_glyph(&self, ch: char) -> bool {
        !ch.is_control() || ch == '\t'
    }

    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        let advance = (px * 0.5).round();
        if ch == ' ' || ch == '\t' {
            return GlyphBitmap {
                advance,
                ..Default::default()
            };
        }
        let width = (advance as u32).saturating_sub(2).max(1);
        let height = ((px * 0.7).round() as u32).max(1);
        GlyphBitmap {
            width,
            height,
            offset: Vec2::new(1.0, -(height as f32)),
            advance,
            coverage: vec![255; (width * height) as usize],
        }
    }
}
