//! Contract between the engine and a graphics-API-specific renderer.
//!
//! The engine writes vertices, indices and atlas texels into CPU memory it
//! owns for the duration of a frame, then hands them to the backend once at
//! frame end. A backend must not assume any buffer content survives past the
//! next `write_*` call for the same id.

use std::collections::HashMap;

use crate::geometry::Rect;

/// Maximum number of buffer ids a backend must support.
pub const MAX_BACKEND_BUFFERS: u32 = 8;

/// Buffer id, in `0..MAX_BACKEND_BUFFERS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Atlas id, either 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtlasId(pub u32);

/// Opaque texture handle returned by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

impl TextureId {
    /// "No texture": geometry drawn with it samples the atlas white pixel and
    /// never splits the current batch.
    pub const NONE: TextureId = TextureId(0);
}

pub trait Backend {
    fn create_vertex_buffer(&mut self, id: BufferId, size_bytes: usize);
    fn create_index_buffer(&mut self, id: BufferId, size_bytes: usize);
    fn destroy_buffer(&mut self, id: BufferId);

    fn create_atlas(&mut self, id: AtlasId, width: u32, height: u32) -> TextureId;
    fn destroy_atlas(&mut self, id: AtlasId);

    /// Receive this frame's buffer contents.
    fn write_buffer(&mut self, id: BufferId, bytes: &[u8]);

    /// Receive atlas texels (`0xAARRGGBB`, row-major, full atlas) along with
    /// the region that changed since the previous upload.
    fn write_atlas(&mut self, id: AtlasId, pixels: &[u32], dirty: Rect);
}

#[derive(Debug, Default)]
pub struct HeadlessBuffer {
    pub capacity: usize,
    pub is_index: bool,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct HeadlessAtlas {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
    pub uploads: u32,
}

/// In-memory backend used for tests and tooling; keeps the last contents it
/// was handed so callers can inspect them.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    buffers: HashMap<BufferId, HeadlessBuffer>,
    atlases: HashMap<AtlasId, HeadlessAtlas>,
    next_texture: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, id: BufferId) -> Option<&HeadlessBuffer> {
        self.buffers.get(&id)
    }

    pub fn atlas(&self, id: AtlasId) -> Option<&HeadlessAtlas> {
        self.atlases.get(&id)
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_atlases(&self) -> usize {
        self.atlases.len()
    }

    fn create_buffer(&mut self, id: BufferId, size_bytes: usize, is_index: bool) {
        assert!(id.0 < MAX_BACKEND_BUFFERS, "buffer id {} out of range", id.0);
        let prev = self.buffers.insert(
            id,
            HeadlessBuffer {
                capacity: size_bytes,
                is_index,
                bytes: Vec::with_capacity(size_bytes),
            },
        );
        assert!(prev.is_none(), "buffer {} created twice", id.0);
    }
}

impl Backend for HeadlessBackend {
    fn create_vertex_buffer(&mut self, id: BufferId, size_bytes: usize) {
        self.create_buffer(id, size_bytes, false);
    }

    fn create_index_buffer(&mut self, id: BufferId, size_bytes: usize) {
        self.create_buffer(id, size_bytes, true);
    }

    fn destroy_buffer(&mut self, id: BufferId) {
        self.buffers.remove(&id);
    }

    fn create_atlas(&mut self, id: AtlasId, width: u32, height: u32) -> TextureId {
        assert!(id.0 < 2, "atlas id {} out of range", id.0);
        self.next_texture += 1;
        let texture = TextureId(self.next_texture);
        self.atlases.insert(
            id,
            HeadlessAtlas {
                texture,
                width,
                height,
                pixels: vec![0; (width * height) as usize],
                uploads: 0,
            },
        );
        texture
    }

    fn destroy_atlas(&mut self, id: AtlasId) {
        self.atlases.remove(&id);
    }

    fn write_buffer(&mut self, id: BufferId, bytes: &[u8]) {
        if let Some(buf) = self.buffers.get_mut(&id) {
            assert!(bytes.len() <= buf.capacity, "buffer {} overflow", id.0);
            buf.bytes.clear();
            buf.bytes.extend_from_slice(bytes);
        }
    }

    fn write_atlas(&mut self, id: AtlasId, pixels: &[u32], _dirty: Rect) {
        if let Some(atlas) = self.atlases.get_mut(&id) {
            atlas.pixels.copy_from_slice(pixels);
            atlas.uploads += 1;
        }
    }
}
