//! Glyph cache and atlas packing.
//!
//! Glyphs are rasterized on first use into one atlas texture, shelf-packed
//! left to right, top to bottom. Texel (0, 0) is permanently white so solid
//! geometry can share the atlas texture with text. When the atlas fills up,
//! every font's live glyphs move to its old map, the packer starts over and
//! glyphs are rasterized again as they are requested.

use hashbrown::HashMap;

use crate::backend::TextureId;
use crate::font::{GlyphBitmap, GlyphRasterizer};
use crate::geometry::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// A font at a size; what styles carry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontUsage {
    pub font: FontId,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GlyphKey {
    ch: char,
    size: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CachedGlyph {
    pub uv: Rect,
    pub size_px: Vec2,
    /// Top-left of the glyph quad relative to the text origin (top of the line).
    pub offset_px: Vec2,
    pub advance: f32,
}

struct Font {
    rasterizer: Box<dyn GlyphRasterizer>,
    y_offset: f32,
    glyphs: HashMap<GlyphKey, CachedGlyph>,
    old_glyphs: HashMap<GlyphKey, CachedGlyph>,
}

/// Shelf packer: fills rows left to right and opens a new row when one is full.
#[derive(Clone, Debug)]
pub struct ShelfPacker {
    size: u32,
    padding: u32,
    x: u32,
    y: u32,
    row_height: u32,
}

impl ShelfPacker {
    pub fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            x: 0,
            y: 0,
            row_height: 0,
        }
    }

    pub fn pack(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width > self.size || height > self.size {
            return None;
        }
        if self.x + width > self.size {
            self.y += self.row_height + self.padding;
            self.x = 0;
            self.row_height = 0;
        }
        if self.y + height > self.size {
            return None;
        }
        let pos = (self.x, self.y);
        self.x += width + self.padding;
        self.row_height = self.row_height.max(height);
        Some(pos)
    }

    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
        self.row_height = 0;
    }
}

struct Atlas {
    size: u32,
    texture: TextureId,
    packer: ShelfPacker,
    grayscale: Vec<u8>,
    pixels: Vec<u32>,
    dirty: Option<Rect>,
}

impl Atlas {
    fn new(size: u32, padding: u32, texture: TextureId) -> Self {
        let mut atlas = Self {
            size,
            texture,
            packer: ShelfPacker::new(size, padding),
            grayscale: vec![0; (size * size) as usize],
            pixels: vec![0; (size * size) as usize],
            dirty: None,
        };
        atlas.reserve_white_pixel();
        atlas
    }

    fn reserve_white_pixel(&mut self) {
        let packed = self.packer.pack(1, 1);
        debug_assert_eq!(packed, Some((0, 0)));
        self.blit(0, 0, 1, 1, &[255]);
    }

    fn clear(&mut self) {
        self.packer.reset();
        self.grayscale.fill(0);
        self.pixels.fill(0);
        self.reserve_white_pixel();
        self.dirty = Some(Rect::new(Vec2::ZERO, Vec2::splat(self.size as f32)));
    }

    fn blit(&mut self, x: u32, y: u32, width: u32, height: u32, coverage: &[u8]) {
        for row in 0..height {
            let src = (row * width) as usize;
            let dst = ((y + row) * self.size + x) as usize;
            let line = &coverage[src..src + width as usize];
            self.grayscale[dst..dst + width as usize].copy_from_slice(line);
            for (px, &alpha) in self.pixels[dst..dst + width as usize].iter_mut().zip(line) {
                *px = ((alpha as u32) << 24) | 0x00FF_FFFF;
            }
        }
        let region = Rect::new(
            Vec2::new(x as f32, y as f32),
            Vec2::new((x + width) as f32, (y + height) as f32),
        );
        self.dirty = Some(match self.dirty {
            Some(d) => Rect::new(d.min.min(region.min), d.max.max(region.max)),
            None => region,
        });
    }
}

pub struct GlyphCache {
    fonts: Vec<Font>,
    atlas: Atlas,
    repacks: u32,
}

impl GlyphCache {
    pub fn new(atlas_size: u32, padding: u32, texture: TextureId) -> Self {
        Self {
            fonts: Vec::new(),
            atlas: Atlas::new(atlas_size, padding, texture),
            repacks: 0,
        }
    }

    pub fn add_font(&mut self, rasterizer: Box<dyn GlyphRasterizer>, y_offset: f32) -> FontId {
        self.fonts.push(Font {
            rasterizer,
            y_offset,
            glyphs: HashMap::new(),
            old_glyphs: HashMap::new(),
        });
        FontId(self.fonts.len() as u32 - 1)
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn texture(&self) -> TextureId {
        self.atlas.texture
    }

    pub fn atlas_size(&self) -> u32 {
        self.atlas.size
    }

    /// UV of the center of the white texel.
    pub fn white_uv(&self) -> Vec2 {
        Vec2::splat(0.5 / self.atlas.size as f32)
    }

    /// Number of times the atlas ran out of space and was repacked.
    pub fn repack_count(&self) -> u32 {
        self.repacks
    }

    pub fn pixels(&self) -> &[u32] {
        &self.atlas.pixels
    }

    pub fn grayscale(&self) -> &[u8] {
        &self.atlas.grayscale
    }

    /// Region written since the last call, if any.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.atlas.dirty.take()
    }

    pub fn line_height(&self, font: FontUsage) -> f32 {
        font.size
    }

    pub fn glyph(&mut self, ch: char, usage: FontUsage) -> CachedGlyph {
        let key = GlyphKey {
            ch,
            size: usage.size as i32,
        };
        let font = &self.fonts[usage.font.0 as usize];
        if let Some(glyph) = font.glyphs.get(&key) {
            return *glyph;
        }

        let bitmap = Self::rasterize_with_fallback(font.rasterizer.as_ref(), ch, key.size as f32);
        let glyph = self.pack_glyph(usage, key, &bitmap);
        self.fonts[usage.font.0 as usize].glyphs.insert(key, glyph);
        glyph
    }

    /// Advance width only; answered from the old map when possible so measuring
    /// text after a repack doesn't re-rasterize.
    pub fn advance(&mut self, ch: char, usage: FontUsage) -> f32 {
        let key = GlyphKey {
            ch,
            size: usage.size as i32,
        };
        let font = &self.fonts[usage.font.0 as usize];
        if let Some(glyph) = font.glyphs.get(&key).or_else(|| font.old_glyphs.get(&key)) {
            return glyph.advance;
        }
        self.glyph(ch, usage).advance
    }

    pub fn text_width(&mut self, text: &str, usage: FontUsage) -> f32 {
        text.chars().map(|ch| self.advance(ch, usage)).sum()
    }

    fn rasterize_with_fallback(rasterizer: &dyn GlyphRasterizer, ch: char, px: f32) -> GlyphBitmap {
        if rasterizer.has_glyph(ch) {
            return rasterizer.rasterize(ch, px);
        }
        tracing::warn!(codepoint = ch as u32, "glyph missing from font, using placeholder");
        if rasterizer.has_glyph('?') {
            rasterizer.rasterize('?', px)
        } else {
            GlyphBitmap::default()
        }
    }

    fn pack_glyph(&mut self, usage: FontUsage, key: GlyphKey, bitmap: &GlyphBitmap) -> CachedGlyph {
        let y_offset = self.fonts[usage.font.0 as usize].y_offset;
        let mut glyph = CachedGlyph {
            uv: Rect::default(),
            size_px: Vec2::new(bitmap.width as f32, bitmap.height as f32),
            offset_px: Vec2::new(bitmap.offset.x, bitmap.offset.y + key.size as f32 + y_offset),
            advance: bitmap.advance.round(),
        };
        if bitmap.width == 0 || bitmap.height == 0 {
            glyph.size_px = Vec2::ZERO;
            return glyph;
        }

        let packed = match self.atlas.packer.pack(bitmap.width, bitmap.height) {
            Some(pos) => Some(pos),
            None => {
                self.repack();
                self.atlas.packer.pack(bitmap.width, bitmap.height)
            }
        };
        let Some((x, y)) = packed else {
            tracing::warn!(
                codepoint = key.ch as u32,
                width = bitmap.width,
                height = bitmap.height,
                "glyph larger than the atlas, dropping it"
            );
            glyph.size_px = Vec2::ZERO;
            return glyph;
        };

        self.atlas.blit(x, y, bitmap.width, bitmap.height, &bitmap.coverage);
        let inv = 1.0 / self.atlas.size as f32;
        let min = Vec2::new(x as f32, y as f32) * inv;
        glyph.uv = Rect::new(min, min + glyph.size_px * inv);
        glyph
    }

    fn repack(&mut self) {
        self.repacks += 1;
        tracing::warn!(repacks = self.repacks, "glyph atlas full, evicting and repacking");
        for font in &mut self.fonts {
            font.old_glyphs = std::mem::take(&mut font.glyphs);
        }
        self.atlas.clear();
    }
}
