//! Draw-list generation.
//!
//! Every primitive ends up in [`DrawList::add_vertices`] and
//! [`DrawList::add_indices`]. Vertices and indices live in fixed-capacity
//! buffers reset each frame; consecutive indices sharing a texture form one
//! [`DrawCall`]. Paint order is submission order.

mod clip;
mod shapes;
mod text;

pub use clip::{clip_convex_polygon_to_half_space, ClipPolygon};
pub use shapes::RectCorners;
pub use text::{line_highlight_rect, measure_text, x_from_column, AlignH, AlignV};

use bytemuck::{Pod, Zeroable};

use crate::backend::{BufferId, TextureId};
use crate::color::Color;
use crate::geometry::{Rect, Vec2};

/// Buffer id the vertex data is uploaded to.
pub const VERTEX_BUFFER_ID: BufferId = BufferId(0);
/// Buffer id the index data is uploaded to.
pub const INDEX_BUFFER_ID: BufferId = BufferId(1);

/// Optional clip rectangle; `None` draws unclipped.
pub type Scissor = Option<Rect>;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec2,
    pub uv: Vec2,
    pub color: Color,
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec2, uv: Vec2, color: Color) -> Self {
        Self { position, uv, color }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
    pub texture: TextureId,
    pub first_index: u32,
    pub index_count: u32,
}

pub struct DrawList {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    max_vertices: usize,
    max_indices: usize,
    draw_calls: Vec<DrawCall>,
    active_texture: TextureId,
    white_uv: Vec2,
}

impl DrawList {
    pub fn new(max_vertices: usize, max_indices: usize, white_uv: Vec2) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            indices: Vec::with_capacity(max_indices),
            max_vertices,
            max_indices,
            draw_calls: Vec::new(),
            active_texture: TextureId::NONE,
            white_uv,
        }
    }

    /// Drop everything recorded; called at the start of each frame.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
        self.active_texture = TextureId::NONE;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    pub fn white_uv(&self) -> Vec2 {
        self.white_uv
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bump-allocate `count` vertices. Returns the index of the first one.
    ///
    /// Panics when the vertex capacity is exceeded.
    pub fn add_vertices(&mut self, count: usize) -> (u32, &mut [Vertex]) {
        let first = self.vertices.len();
        assert!(
            first + count <= self.max_vertices,
            "vertex buffer capacity exceeded ({} > {})",
            first + count,
            self.max_vertices
        );
        self.vertices.resize(first + count, Vertex::default());
        (first as u32, &mut self.vertices[first..])
    }

    /// Bump-allocate `count` indices drawn with `texture`.
    ///
    /// A texture different from the active one closes the current batch.
    /// [`TextureId::NONE`] never closes a batch.
    pub fn add_indices(&mut self, count: usize, texture: TextureId) -> &mut [u32] {
        if texture != TextureId::NONE && texture != self.active_texture {
            if self.active_texture != TextureId::NONE {
                self.finalize_batch();
            }
            self.active_texture = texture;
        }
        let first = self.indices.len();
        assert!(
            first + count <= self.max_indices,
            "index buffer capacity exceeded ({} > {})",
            first + count,
            self.max_indices
        );
        self.indices.resize(first + count, 0);
        &mut self.indices[first..]
    }

    pub fn add_triangle_indices(&mut self, a: u32, b: u32, c: u32, texture: TextureId) {
        self.add_indices(3, texture).copy_from_slice(&[a, b, c]);
    }

    pub fn add_quad_indices(&mut self, a: u32, b: u32, c: u32, d: u32, texture: TextureId) {
        self.add_indices(6, texture).copy_from_slice(&[a, b, c, a, c, d]);
    }

    pub fn add_quad_indices_and_clip(
        &mut self,
        a: u32,
        b: u32,
        c: u32,
        d: u32,
        texture: TextureId,
        scissor: Scissor,
    ) {
        self.add_triangle_indices_and_clip(a, b, c, texture, scissor);
        self.add_triangle_indices_and_clip(a, c, d, texture, scissor);
    }

    /// Emit a triangle, cut against `scissor` when it straddles its edges.
    ///
    /// Fully outside emits nothing, fully inside emits the three indices
    /// unchanged. Otherwise the clipped polygon gets fresh vertices whose
    /// color and uv are interpolated barycentrically, fan-triangulated from
    /// its first vertex.
    pub fn add_triangle_indices_and_clip(
        &mut self,
        a: u32,
        b: u32,
        c: u32,
        texture: TextureId,
        scissor: Scissor,
    ) {
        let Some(scissor) = scissor else {
            self.add_triangle_indices(a, b, c, texture);
            return;
        };
        let tri = [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ];
        let p = [tri[0].position, tri[1].position, tri[2].position];

        let min_x = p[0].x.min(p[1].x).min(p[2].x);
        let min_y = p[0].y.min(p[1].y).min(p[2].y);
        let max_x = p[0].x.max(p[1].x).max(p[2].x);
        let max_y = p[0].y.max(p[1].y).max(p[2].y);
        if min_x >= scissor.max.x || min_y >= scissor.max.y || max_x <= scissor.min.x || max_y <= scissor.min.y {
            return;
        }
        if max_x <= scissor.max.x && max_y <= scissor.max.y && min_x >= scissor.min.x && min_y >= scissor.min.y {
            self.add_triangle_indices(a, b, c, texture);
            return;
        }

        let poly = clip::clip_triangle_to_rect(p, &scissor, [min_x, min_y, max_x, max_y]);
        if poly.len() < 3 {
            return;
        }

        let (first, out) = self.add_vertices(poly.len());
        for (dst, &pos) in out.iter_mut().zip(poly.points()) {
            let (u, v, w) = clip::barycentric(p[0], p[1], p[2], pos);
            let mix = |c0: u8, c1: u8, c2: u8| {
                (c0 as f32 * u + c1 as f32 * v + c2 as f32 * w).clamp(0.0, 255.0) as u8
            };
            let color = Color::rgba(
                mix(tri[0].color.r, tri[1].color.r, tri[2].color.r),
                mix(tri[0].color.g, tri[1].color.g, tri[2].color.g),
                mix(tri[0].color.b, tri[1].color.b, tri[2].color.b),
                mix(tri[0].color.a, tri[1].color.a, tri[2].color.a),
            );
            let uv = tri[0].uv * u + tri[1].uv * v + tri[2].uv * w;
            *dst = Vertex::new(pos, uv, color);
        }

        let count = poly.len() as u32;
        let indices = self.add_indices(3 * (poly.len() - 2), texture);
        for i in 2..count {
            let at = ((i - 2) * 3) as usize;
            indices[at] = first;
            indices[at + 1] = first + i - 1;
            indices[at + 2] = first + i;
        }
    }

    /// Close the open batch, if it has any indices.
    pub fn finalize_batch(&mut self) {
        let first_index = self
            .draw_calls
            .last()
            .map(|last| last.first_index + last.index_count)
            .unwrap_or(0);
        let index_count = self.indices.len() as u32 - first_index;
        if index_count > 0 {
            self.draw_calls.push(DrawCall {
                vertex_buffer: VERTEX_BUFFER_ID,
                index_buffer: INDEX_BUFFER_ID,
                texture: self.active_texture,
                first_index,
                index_count,
            });
        }
    }
}
