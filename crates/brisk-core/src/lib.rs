//! brisk-core: geometry, keys, colors, glyph caching and draw-list generation
//! for the brisk immediate-mode UI.
//!
//! Nothing in here knows about boxes or widgets. The UI crate records its
//! geometry into a [`DrawList`] and hands the bytes to a [`Backend`].

pub mod backend;
pub mod color;
pub mod draw;
mod error;
pub mod font;
pub mod geometry;
pub mod glyph_cache;
mod key;

pub use backend::{AtlasId, Backend, BufferId, HeadlessBackend, TextureId, MAX_BACKEND_BUFFERS};
pub use color::Color;
pub use draw::{AlignH, AlignV, DrawCall, DrawList, RectCorners, Scissor, Vertex};
pub use error::{FontError, Result};
pub use font::{BlockRasterizer, FontdueRasterizer, GlyphBitmap, GlyphRasterizer};
pub use geometry::{lerp, Axis, Rect, Vec2};
pub use glyph_cache::{CachedGlyph, FontId, FontUsage, GlyphCache};
pub use key::{hash_key, Key, KeySeed};
