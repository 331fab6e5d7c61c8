use super::{DrawList, Scissor};
use crate::color::Color;
use crate::geometry::{Rect, Vec2};
use crate::glyph_cache::{FontUsage, GlyphCache};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignH {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignV {
    #[default]
    Upper,
    Middle,
    Lower,
}

/// Width and height of `text` laid out with one line per `'\n'`.
pub fn measure_text(glyphs: &mut GlyphCache, text: &str, font: FontUsage) -> Vec2 {
    let mut width: f32 = 0.0;
    let mut lines = 0;
    for line in text.split('\n') {
        width = width.max(glyphs.text_width(line, font));
        lines += 1;
    }
    Vec2::new(width, lines as f32 * font.size)
}

/// Pixel x of the caret placed before codepoint `column` of `line`.
pub fn x_from_column(glyphs: &mut GlyphCache, line: &str, column: usize, font: FontUsage) -> f32 {
    line.chars().take(column).map(|ch| glyphs.advance(ch, font)).sum()
}

/// Highlight rect for columns `from..to` of line `line_index`, one pixel
/// wider on each side so an empty range still shows as a caret.
pub fn line_highlight_rect(
    glyphs: &mut GlyphCache,
    line: &str,
    line_index: usize,
    from: usize,
    to: usize,
    origin: Vec2,
    font: FontUsage,
) -> Rect {
    let top = origin.y + line_index as f32 * font.size;
    let x0 = origin.x + x_from_column(glyphs, line, from, font);
    let x1 = origin.x + x_from_column(glyphs, line, to, font);
    Rect::new(Vec2::new(x0 - 1.0, top), Vec2::new(x1 + 1.0, top + font.size))
}

impl DrawList {
    /// Draw `text` with the given alignment relative to `origin`; returns the
    /// size of the drawn block. The aligned origin snaps to whole pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        glyphs: &mut GlyphCache,
        text: &str,
        font: FontUsage,
        mut origin: Vec2,
        align_h: AlignH,
        align_v: AlignV,
        color: Color,
        scissor: Scissor,
    ) -> Vec2 {
        let size = measure_text(glyphs, text, font);
        match align_h {
            AlignH::Left => {}
            AlignH::Middle => origin.x -= size.x * 0.5,
            AlignH::Right => origin.x -= size.x,
        }
        match align_v {
            AlignV::Upper => {}
            AlignV::Middle => origin.y -= size.y * 0.5,
            AlignV::Lower => origin.y -= size.y,
        }
        origin = Vec2::new((origin.x + 0.5).floor(), (origin.y + 0.5).floor());

        let texture = glyphs.texture();
        let mut pen = origin;
        for ch in text.chars() {
            if ch == '\n' {
                pen = Vec2::new(origin.x, pen.y + font.size);
                continue;
            }
            let glyph = glyphs.glyph(ch, font);
            if glyph.size_px.x > 0.0 && glyph.size_px.y > 0.0 {
                let min = pen + glyph.offset_px;
                let rect = Rect::new(min, min + glyph.size_px);
                self.draw_sprite(rect, color, glyph.uv, texture, scissor);
            }
            pen.x += glyph.advance;
        }
        size
    }

    /// Fill the highlight rect for columns `from..to` of one text line.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_highlight(
        &mut self,
        glyphs: &mut GlyphCache,
        line: &str,
        line_index: usize,
        from: usize,
        to: usize,
        origin: Vec2,
        font: FontUsage,
        color: Color,
        scissor: Scissor,
    ) {
        let rect = line_highlight_rect(glyphs, line, line_index, from, to, origin, font);
        self.draw_rect(rect, color, scissor);
    }
}
