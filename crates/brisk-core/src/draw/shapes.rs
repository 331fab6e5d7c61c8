use std::f32::consts::{FRAC_PI_2, TAU};

use super::{DrawList, Scissor, Vertex};
use crate::backend::TextureId;
use crate::color::Color;
use crate::geometry::{Rect, Vec2};

const RECT_CORNER_SEGMENTS: usize = 2;
const RECT_LINES_CORNER_SEGMENTS: usize = 3;
// Miter offsets are limited to this many half-thicknesses.
const MITER_LIMIT: f32 = 4.0;

/// Per-corner parameters for rect drawing, ordered top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectCorners {
    pub color: [Color; 4],
    /// Color at the rounded outer edge; lets a rect fade out toward its border.
    pub outer_color: [Color; 4],
    pub roundness: [f32; 4],
}

impl RectCorners {
    pub fn uniform(color: Color, roundness: f32) -> Self {
        Self {
            color: [color; 4],
            outer_color: [color; 4],
            roundness: [roundness; 4],
        }
    }

    /// Vertical gradient: `top` on the upper corners, `bottom` on the lower ones.
    pub fn vertical(top: Color, bottom: Color, roundness: f32) -> Self {
        let colors = [top, top, bottom, bottom];
        Self {
            color: colors,
            outer_color: colors,
            roundness: [roundness; 4],
        }
    }

    fn inset_corners(&self, rect: &Rect) -> [Vec2; 4] {
        let r = self.roundness;
        [
            rect.min + Vec2::new(r[0], r[0]),
            Vec2::new(rect.max.x, rect.min.y) + Vec2::new(-r[1], r[1]),
            rect.max + Vec2::new(-r[2], -r[2]),
            Vec2::new(rect.min.x, rect.max.y) + Vec2::new(r[3], -r[3]),
        ]
    }
}

impl DrawList {
    pub fn draw_rect(&mut self, rect: Rect, color: Color, scissor: Scissor) {
        self.draw_rect_ex(rect, &RectCorners::uniform(color, 0.0), scissor);
    }

    pub fn draw_rect_rounded(&mut self, rect: Rect, roundness: f32, color: Color, scissor: Scissor) {
        self.draw_rect_ex(rect, &RectCorners::uniform(color, roundness), scissor);
    }

    /// Rounded rect whose color goes from `inner` in the core to `outer` at the edge.
    pub fn draw_rect_rounded2(&mut self, rect: Rect, roundness: f32, inner: Color, outer: Color, scissor: Scissor) {
        let corners = RectCorners {
            color: [inner; 4],
            outer_color: [outer; 4],
            roundness: [roundness; 4],
        };
        self.draw_rect_ex(rect, &corners, scissor);
    }

    /// Filled rect with independently rounded corners.
    ///
    /// Rects whose rounded corners overlap (inset core inverted) are skipped.
    pub fn draw_rect_ex(&mut self, rect: Rect, corners: &RectCorners, scissor: Scissor) {
        let inset = corners.inset_corners(&rect);
        if inset[0].x > inset[2].x || inset[0].y > inset[2].y {
            return;
        }
        let uv = self.white_uv();
        let none = TextureId::NONE;

        let (core, v) = self.add_vertices(12);
        for i in 0..4 {
            v[i] = Vertex::new(inset[i], uv, corners.color[i]);
        }
        let outer = corners.outer_color;
        let ring = [
            (Vec2::new(rect.min.x, inset[0].y), outer[0]),
            (Vec2::new(inset[0].x, rect.min.y), outer[0]),
            (Vec2::new(inset[1].x, rect.min.y), outer[1]),
            (Vec2::new(rect.max.x, inset[1].y), outer[1]),
            (Vec2::new(rect.max.x, inset[2].y), outer[2]),
            (Vec2::new(inset[2].x, rect.max.y), outer[2]),
            (Vec2::new(inset[3].x, rect.max.y), outer[3]),
            (Vec2::new(rect.min.x, inset[3].y), outer[3]),
        ];
        for (i, (pos, color)) in ring.into_iter().enumerate() {
            v[4 + i] = Vertex::new(pos, uv, color);
        }
        let border = core + 4;

        // edges: top, right, bottom, left
        self.add_quad_indices_and_clip(border + 1, border + 2, core + 1, core, none, scissor);
        self.add_quad_indices_and_clip(border + 3, border + 4, core + 2, core + 1, none, scissor);
        self.add_quad_indices_and_clip(border + 5, border + 6, core + 3, core + 2, none, scissor);
        self.add_quad_indices_and_clip(border + 7, border, core, core + 3, none, scissor);

        for corner in 0..4u32 {
            let radius = -corners.roundness[corner as usize];
            let start_theta = FRAC_PI_2 * corner as f32;
            let anchor = inset[corner as usize];
            let color = outer[corner as usize];

            let mut prev = border + corner * 2;
            for i in 1..=RECT_CORNER_SEGMENTS {
                let theta = start_theta + (i as f32 / (RECT_CORNER_SEGMENTS + 1) as f32) * FRAC_PI_2;
                let pos = anchor + Vec2::new(theta.cos() * radius, theta.sin() * radius);
                let (idx, v) = self.add_vertices(1);
                v[0] = Vertex::new(pos, uv, color);
                self.add_triangle_indices_and_clip(core + corner, prev, idx, none, scissor);
                prev = idx;
            }
            self.add_triangle_indices_and_clip(core + corner, prev, border + corner * 2 + 1, none, scissor);
        }

        self.add_quad_indices_and_clip(core, core + 1, core + 2, core + 3, none, scissor);
    }

    pub fn draw_rect_lines(&mut self, rect: Rect, thickness: f32, color: Color, scissor: Scissor) {
        self.draw_rect_lines_ex(rect, &RectCorners::uniform(color, 0.0), thickness, scissor);
    }

    pub fn draw_rect_lines_rounded(
        &mut self,
        rect: Rect,
        thickness: f32,
        roundness: f32,
        color: Color,
        scissor: Scissor,
    ) {
        self.draw_rect_lines_ex(rect, &RectCorners::uniform(color, roundness), thickness, scissor);
    }

    /// Stroked rect outline drawn inward from `rect` by `thickness`.
    pub fn draw_rect_lines_ex(&mut self, rect: Rect, corners: &RectCorners, thickness: f32, scissor: Scissor) {
        let inset = corners.inset_corners(&rect);
        let uv = self.white_uv();
        let none = TextureId::NONE;
        let c = corners.color;

        // Per edge (top, right, bottom, left): first outer, first inner, last outer, last inner.
        let edges = [
            (Vec2::new(inset[0].x, rect.min.y), c[0]),
            (Vec2::new(inset[0].x, rect.min.y + thickness), c[0]),
            (Vec2::new(inset[1].x, rect.min.y), c[1]),
            (Vec2::new(inset[1].x, rect.min.y + thickness), c[1]),
            (Vec2::new(rect.max.x, inset[1].y), c[1]),
            (Vec2::new(rect.max.x - thickness, inset[1].y), c[1]),
            (Vec2::new(rect.max.x, inset[2].y), c[2]),
            (Vec2::new(rect.max.x - thickness, inset[2].y), c[2]),
            (Vec2::new(inset[2].x, rect.max.y), c[2]),
            (Vec2::new(inset[2].x, rect.max.y - thickness), c[2]),
            (Vec2::new(inset[3].x, rect.max.y), c[3]),
            (Vec2::new(inset[3].x, rect.max.y - thickness), c[3]),
            (Vec2::new(rect.min.x, inset[3].y), c[3]),
            (Vec2::new(rect.min.x + thickness, inset[3].y), c[3]),
            (Vec2::new(rect.min.x, inset[0].y), c[0]),
            (Vec2::new(rect.min.x + thickness, inset[0].y), c[0]),
        ];
        let (first, v) = self.add_vertices(16);
        for (dst, (pos, color)) in v.iter_mut().zip(edges) {
            *dst = Vertex::new(pos, uv, color);
        }

        for base in (first..first + 16).step_by(4) {
            self.add_triangle_indices_and_clip(base, base + 2, base + 3, none, scissor);
            self.add_triangle_indices_and_clip(base, base + 3, base + 1, none, scissor);
        }

        for corner in 0..4u32 {
            let roundness = corners.roundness[corner as usize];
            let outer_radius = -roundness;
            let mid_radius = -(roundness - thickness);
            let start_theta = FRAC_PI_2 * corner as f32;
            let anchor = inset[corner as usize];
            let color = c[corner as usize];

            let mut prev = first + 2 + 4 * ((corner + 3) % 4);
            for i in 1..=RECT_LINES_CORNER_SEGMENTS {
                let theta = start_theta + (i as f32 / (RECT_LINES_CORNER_SEGMENTS + 1) as f32) * FRAC_PI_2;
                let dir = Vec2::new(theta.cos(), theta.sin());
                let (idx, v) = self.add_vertices(2);
                v[0] = Vertex::new(anchor + dir * outer_radius, uv, color);
                v[1] = Vertex::new(anchor + dir * mid_radius, uv, color);
                self.add_triangle_indices_and_clip(prev, idx, idx + 1, none, scissor);
                self.add_triangle_indices_and_clip(prev, idx + 1, prev + 1, none, scissor);
                prev = idx;
            }
            let next = first + 4 * corner;
            self.add_triangle_indices_and_clip(prev, next, next + 1, none, scissor);
            self.add_triangle_indices_and_clip(prev, next + 1, prev + 1, none, scissor);
        }
    }

    pub fn draw_circle(&mut self, center: Vec2, radius: f32, segments: usize, color: Color, scissor: Scissor) {
        if segments < 3 {
            return;
        }
        let uv = self.white_uv();
        let (first, v) = self.add_vertices(segments);
        for (i, dst) in v.iter_mut().enumerate() {
            let theta = (i as f32 / segments as f32) * TAU;
            let pos = center + Vec2::new(theta.cos(), theta.sin()) * radius;
            *dst = Vertex::new(pos, uv, color);
        }
        for i in 2..segments as u32 {
            self.add_triangle_indices_and_clip(first, first + i - 1, first + i, TextureId::NONE, scissor);
        }
    }

    pub fn draw_convex_polygon(&mut self, points: &[Vec2], color: Color, scissor: Scissor) {
        if points.len() < 3 {
            return;
        }
        let uv = self.white_uv();
        let (first, v) = self.add_vertices(points.len());
        for (dst, &p) in v.iter_mut().zip(points) {
            *dst = Vertex::new(p, uv, color);
        }
        for i in 2..points.len() as u32 {
            self.add_triangle_indices_and_clip(first, first + i - 1, first + i, TextureId::NONE, scissor);
        }
    }

    pub fn draw_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color, scissor: Scissor) {
        self.draw_convex_polygon(&[a, b, c], color, scissor);
    }

    /// Textured quad. Clipping shrinks the quad and its uv rect together so
    /// the visible texels stay where they were.
    pub fn draw_sprite(&mut self, mut rect: Rect, color: Color, mut uv: Rect, texture: TextureId, scissor: Scissor) {
        if let Some(s) = scissor {
            if rect.max.x < s.min.x || rect.min.x > s.max.x || rect.max.y < s.min.y || rect.min.y > s.max.y {
                return;
            }
            let uv_per_px = Vec2::new(uv.width() / rect.width(), uv.height() / rect.height());
            let min_off = s.min - rect.min;
            let max_off = s.max - rect.max;
            if min_off.x > 0.0 {
                rect.min.x = s.min.x;
                uv.min.x += min_off.x * uv_per_px.x;
            }
            if max_off.x < 0.0 {
                rect.max.x = s.max.x;
                uv.max.x += max_off.x * uv_per_px.x;
            }
            if min_off.y > 0.0 {
                rect.min.y = s.min.y;
                uv.min.y += min_off.y * uv_per_px.y;
            }
            if max_off.y < 0.0 {
                rect.max.y = s.max.y;
                uv.max.y += max_off.y * uv_per_px.y;
            }
        }

        let (first, v) = self.add_vertices(4);
        v[0] = Vertex::new(rect.min, uv.min, color);
        v[1] = Vertex::new(Vec2::new(rect.max.x, rect.min.y), Vec2::new(uv.max.x, uv.min.y), color);
        v[2] = Vertex::new(rect.max, uv.max, color);
        v[3] = Vertex::new(Vec2::new(rect.min.x, rect.max.y), Vec2::new(uv.min.x, uv.max.y), color);
        self.add_quad_indices(first, first + 1, first + 2, first + 3, texture);
    }

    pub fn draw_point(&mut self, p: Vec2, thickness: f32, color: Color, scissor: Scissor) {
        let extent = Vec2::splat(0.5 * thickness);
        self.draw_rect(Rect::new(p - extent, p + extent), color, scissor);
    }

    pub fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color, scissor: Scissor) {
        self.draw_polyline(&[a, b], thickness, color, scissor);
    }

    /// Stroke an open polyline with mitered joints and projecting caps.
    ///
    /// Each joint is offset along the sum of the adjacent segment normals so
    /// both segments keep their full thickness. Offsets are clamped to
    /// `MITER_LIMIT` half-thicknesses to keep very sharp turns bounded.
    pub fn draw_polyline(&mut self, points: &[Vec2], thickness: f32, color: Color, scissor: Scissor) {
        if points.len() < 2 {
            return;
        }
        let half = thickness * 0.5;
        let uv = self.white_uv();

        let normals: Vec<Vec2> = points
            .windows(2)
            .map(|w| (w[1] - w[0]).normalize_or_zero().perp())
            .collect();
        let start_dir = (points[1] - points[0]).normalize_or_zero();
        let last = points.len() - 1;
        let end_dir = (points[last] - points[last - 1]).normalize_or_zero();

        let mut prev: Option<(u32, u32)> = None;
        for (i, &point) in points.iter().enumerate() {
            let mut p = point;
            if i == 0 {
                p -= start_dir * half;
            }
            if i == last {
                p += end_dir * half;
            }

            let n1 = normals[if i == 0 { 0 } else { i - 1 }];
            let n2 = normals[if i == last { normals.len() - 1 } else { i }];
            let avg = n1 + n2;
            let denom = avg.dot(n1);
            let mut offset = if denom.abs() > 1e-6 { avg * (half / denom) } else { n1 * half };
            let max_len = half * MITER_LIMIT;
            let len = offset.length();
            if len > max_len {
                offset = offset * (max_len / len);
            }

            let (first, v) = self.add_vertices(2);
            v[0] = Vertex::new(p + offset, uv, color);
            v[1] = Vertex::new(p - offset, uv, color);
            if let Some((left, right)) = prev {
                self.add_quad_indices_and_clip(left, right, first + 1, first, TextureId::NONE, scissor);
            }
            prev = Some((first, first + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{RED, WHITE};

    fn list() -> DrawList {
        DrawList::new(4096, 8192, Vec2::splat(0.5 / 1024.0))
    }

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    #[test]
    fn test_rect_ex_vertex_and_index_counts() {
        let mut l = list();
        l.draw_rect_ex(rect(0.0, 0.0, 100.0, 50.0), &RectCorners::uniform(WHITE, 4.0), None);
        // 12 fixed + 2 per corner arc
        assert_eq!(l.vertices().len(), 12 + 4 * RECT_CORNER_SEGMENTS);
        // 4 edge quads + 3 triangles per corner + core quad
        assert_eq!(l.indices().len(), 4 * 6 + 4 * 3 * 3 + 6);
        assert!(l.vertices().iter().all(|v| v.uv == l.white_uv()));
    }

    #[test]
    fn test_rect_ex_rejects_inverted_core() {
        let mut l = list();
        l.draw_rect_ex(rect(0.0, 0.0, 6.0, 6.0), &RectCorners::uniform(WHITE, 4.0), None);
        assert!(l.vertices().is_empty());
    }

    #[test]
    fn test_sharp_rect_stays_inside_bounds() {
        let mut l = list();
        l.draw_rect(rect(10.0, 10.0, 20.0, 30.0), RED, None);
        for v in l.vertices() {
            assert!(v.position.x >= 10.0 - 1e-4 && v.position.x <= 20.0 + 1e-4);
            assert!(v.position.y >= 10.0 - 1e-4 && v.position.y <= 30.0 + 1e-4);
        }
    }

    #[test]
    fn test_rect_lines_counts() {
        let mut l = list();
        l.draw_rect_lines_rounded(rect(0.0, 0.0, 100.0, 40.0), 2.0, 4.0, WHITE, None);
        assert_eq!(l.vertices().len(), 16 + 4 * 2 * RECT_LINES_CORNER_SEGMENTS);
        assert_eq!(l.indices().len(), 4 * 6 + 4 * (RECT_LINES_CORNER_SEGMENTS + 1) * 6);
    }

    #[test]
    fn test_sprite_clip_adjusts_uv() {
        let mut l = list();
        let uv = rect(0.0, 0.0, 1.0, 1.0);
        let scissor = rect(5.0, 0.0, 100.0, 100.0);
        l.draw_sprite(rect(0.0, 0.0, 10.0, 10.0), WHITE, uv, TextureId(3), Some(scissor));
        let v = l.vertices();
        assert_eq!(v[0].position, Vec2::new(5.0, 0.0));
        assert_eq!(v[0].uv, Vec2::new(0.5, 0.0));
        assert_eq!(v[2].uv, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_sprite_outside_is_skipped() {
        let mut l = list();
        let scissor = rect(50.0, 50.0, 60.0, 60.0);
        l.draw_sprite(rect(0.0, 0.0, 10.0, 10.0), WHITE, rect(0.0, 0.0, 1.0, 1.0), TextureId(3), Some(scissor));
        assert!(l.indices().is_empty());
    }

    #[test]
    fn test_polyline_straight_segment() {
        let mut l = list();
        l.draw_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, WHITE, None);
        let v: Vec<Vec2> = l.vertices().iter().map(|v| v.position).collect();
        // caps project half the thickness past both ends
        assert_eq!(v.len(), 4);
        assert!((v[0].x + 1.0).abs() < 1e-5 && (v[2].x - 11.0).abs() < 1e-5);
        assert!(((v[0].y - v[1].y).abs() - 2.0).abs() < 1e-5);
        assert_eq!(l.indices().len(), 6);
    }

    #[test]
    fn test_polyline_right_angle_miter() {
        let mut l = list();
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        l.draw_polyline(&pts, 2.0, WHITE, None);
        let corner = l.vertices()[2].position;
        let other = l.vertices()[3].position;
        // a 90 degree miter puts the joint vertices at (+-1, +-1) from the point
        assert!(((corner - pts[1]).length() - 2f32.sqrt()).abs() < 1e-4);
        assert!(((other - pts[1]).length() - 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_polyline_reversal_is_clamped() {
        let mut l = list();
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.1)];
        l.draw_polyline(&pts, 2.0, WHITE, None);
        let joint = l.vertices()[2].position;
        assert!((joint - pts[1]).length() <= MITER_LIMIT + 1e-3);
    }

    #[test]
    fn test_circle_fan() {
        let mut l = list();
        l.draw_circle(Vec2::new(5.0, 5.0), 3.0, 8, WHITE, None);
        assert_eq!(l.vertices().len(), 8);
        assert_eq!(l.indices().len(), 6 * 3);
    }
}
