//! Painting laid-out boxes into the draw list.

use std::f32::consts::TAU;

use brisk_core::color::{BLACK, WHITE};
use brisk_core::draw::line_highlight_rect;
use brisk_core::{AlignH, AlignV, Backend, Color, DrawList, Rect, RectCorners, Scissor, TextureId, Vec2};

use crate::context::Ui;
use crate::tree::{BoxExt, BoxFlags, BoxId};

const SELECTION_OUTLINE: Color = Color::rgba(250, 200, 85, 240);
const TEXT_HIGHLIGHT: Color = Color::rgba(255, 255, 255, 50);
const SHADOW: Color = Color::rgba(0, 0, 0, 50);
const HUE_MARKER_OUTLINE: Color = Color::rgba(0, 0, 0, 188);
const HUE_CIRCLE_SEGMENTS: usize = 64;

/// Fill `rect` with an annulus-sliced hue/saturation wheel.
fn draw_hue_circle(draw: &mut DrawList, rect: Rect, hue: f32, saturation: f32, scissor: Scissor) {
    let radius = rect.width() * 0.5;
    let middle = rect.min + Vec2::splat(radius);
    let uv = draw.white_uv();

    // Two rings of vertices: the centre repeated per column, then the rim.
    let (first, v) = draw.add_vertices(2 * HUE_CIRCLE_SEGMENTS);
    for ring in 0..2 {
        for j in 0..HUE_CIRCLE_SEGMENTS {
            let t = j as f32 / HUE_CIRCLE_SEGMENTS as f32;
            let theta = t * TAU;
            let pos = middle + Vec2::new(theta.cos(), theta.sin()) * (radius * ring as f32);
            let color = Color::from_hsv(t, ring as f32, 1.0, 1.0);
            v[ring * HUE_CIRCLE_SEGMENTS + j] = brisk_core::Vertex::new(pos, uv, color);
        }
    }
    let n = HUE_CIRCLE_SEGMENTS as u32;
    for j in 0..n {
        let next = (j + 1) % n;
        draw.add_quad_indices_and_clip(
            first + j,
            first + next,
            first + n + next,
            first + n + j,
            TextureId::NONE,
            scissor,
        );
    }

    let angle = hue * TAU;
    let marker = middle + Vec2::new(angle.cos(), angle.sin()) * (saturation * radius);
    draw.draw_circle(marker, 6.0, 8, HUE_MARKER_OUTLINE, scissor);
    draw.draw_circle(marker, 5.0, 8, Color::from_hsv(hue, saturation, 1.0, 1.0), scissor);
}

impl<B: Backend> Ui<B> {
    /// Backgrounds, border and hover/press tint of a box, without text or
    /// children.
    pub fn draw_box_backdrop(&mut self, id: BoxId) {
        let b = self.new.get(id);
        let style = *self.new.style(id);
        let rect = Rect::from_min_size(b.computed_position, b.computed_size);
        let scissor = b.draw_scissor();
        let flags = b.flags;
        let (lazy_hovered, lazy_holding) = (b.lazy_is_hovered, b.lazy_is_holding_down);
        let draw = &mut self.draw;

        if flags.contains(BoxFlags::DRAW_TRANSPARENT_BACKGROUND) {
            draw.draw_rect_rounded(rect, style.rounding, style.transparent_bg_color, scissor);
        }
        if flags.contains(BoxFlags::DRAW_OPAQUE_BACKGROUND) {
            draw.draw_rect_rounded(rect, style.rounding, style.opaque_bg_color, scissor);
        }
        if flags.contains(BoxFlags::DRAW_BORDER) {
            draw.draw_rect_lines_rounded(rect, style.border_width, style.rounding, style.border_color, scissor);
        }
        if flags.contains(BoxFlags::CLICKABLE) {
            let hovered = lazy_hovered * (1.0 - lazy_holding);
            let glow = RectCorners::vertical(
                WHITE.with_alpha((hovered * 50.0) as u8),
                WHITE.with_alpha((hovered * 10.0) as u8),
                5.0,
            );
            draw.draw_rect_ex(rect, &glow, scissor);
            let shade = RectCorners::vertical(
                BLACK.with_alpha((lazy_holding * 100.0) as u8),
                BLACK.with_alpha((lazy_holding * 20.0) as u8),
                5.0,
            );
            draw.draw_rect_ex(rect, &shade, scissor);
        }
    }

    /// Draw a laid-out box and its subtree.
    ///
    /// Panics if [`Ui::compute_rects`] has not run on the box this frame.
    pub fn draw_box(&mut self, id: BoxId) {
        let b = self.new.get(id);
        assert!(
            b.flags.contains(BoxFlags::HAS_COMPUTED_RECTS),
            "draw_box: rects of box {:?} were not computed this frame",
            b.key
        );

        if b.flags.contains(BoxFlags::DRAW_OPAQUE_BACKGROUND) {
            let clipped = b.computed_rect_clipped;
            let shadow = Rect::new(clipped.min - Vec2::splat(5.0), clipped.max + Vec2::splat(10.0));
            self.draw
                .draw_rect_rounded2(shadow, 20.0, SHADOW, SHADOW.with_alpha(0), None);
        }

        self.draw_box_backdrop(id);

        let b = self.new.get(id);
        let style = *self.new.style(id);
        let scissor = b.draw_scissor();

        if self.selection_is_visible && self.old.selected == b.key {
            self.draw
                .draw_rect_lines_rounded(b.computed_rect_clipped, 2.0, 4.0, SELECTION_OUTLINE, scissor);
        }

        let text_origin = b.computed_position + style.text_padding;
        if b.flags.contains(BoxFlags::DRAW_TEXT) {
            self.draw.draw_text(
                &mut self.glyphs,
                &b.text,
                style.font,
                text_origin,
                AlignH::Left,
                AlignV::Upper,
                style.text_color,
                scissor,
            );
        }

        let edit = &self.widgets.edit_text;
        if edit.editing_frame == self.frame_index() && edit.draw_selection_box == Some(id) {
            let sel = edit.selection;
            let (start, end) = (sel.range[0].min(sel.range[1]), sel.range[0].max(sel.range[1]));
            let lines: Vec<&str> = b.text.split('\n').collect();
            for line_index in start.line..=end.line.min(lines.len().saturating_sub(1)) {
                let line = lines[line_index];
                let from = if line_index == start.line { start.col } else { 0 };
                let to = if line_index == end.line { end.col } else { line.chars().count() };
                self.draw.draw_text_highlight(
                    &mut self.glyphs,
                    line,
                    line_index,
                    from,
                    to,
                    text_origin,
                    style.font,
                    TEXT_HIGHLIGHT,
                    scissor,
                );
            }
            let active = sel.active();
            if let Some(line) = lines.get(active.line) {
                let caret = line_highlight_rect(
                    &mut self.glyphs,
                    line,
                    active.line,
                    active.col,
                    active.col,
                    text_origin,
                    style.font,
                );
                self.draw.draw_rect(caret, WHITE, scissor);
            }
        }

        if let BoxExt::HueCircle { hue, saturation } = b.ext {
            let rect = Rect::from_min_size(b.computed_position, b.computed_size);
            draw_hue_circle(&mut self.draw, rect, hue, saturation, scissor);
        }

        let children: Vec<BoxId> = self.new.children(id).collect();
        for child in children {
            self.draw_box(child);
        }
    }
}
