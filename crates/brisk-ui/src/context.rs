//! The [`Ui`] context: frame lifecycle, box and style stacks, persisted data.

use brisk_config::{BriskConfig, InputConfig, StyleConfig};
use brisk_core::draw::{INDEX_BUFFER_ID, VERTEX_BUFFER_ID};
use brisk_core::{
    lerp, AtlasId, Backend, DrawList, FontUsage, GlyphCache, GlyphRasterizer, Key, Vec2, Vertex,
};

use crate::clipboard::Clipboard;
use crate::input::{Input, Inputs, Outputs};
use crate::layout;
use crate::navigation;
use crate::style::{Style, StyleId};
use crate::tree::{BoxFlags, BoxId, Data, Frame, Size, UiBox};
use crate::widgets::WidgetState;

const ATLAS: AtlasId = AtlasId(0);

/// Glyphs drawn from the icon font, with stand-ins from the text font when
/// no icon font is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Check,
    ArrowDown,
    ArrowRight,
}

impl Icon {
    fn icon_font_text(self) -> &'static str {
        match self {
            Icon::Check => "A",
            Icon::ArrowDown => "D",
            Icon::ArrowRight => "F",
        }
    }

    fn fallback_text(self) -> &'static str {
        match self {
            Icon::Check => "x",
            Icon::ArrowDown => "v",
            Icon::ArrowRight => ">",
        }
    }
}

/// Immediate-mode UI context.
///
/// Call [`begin_frame`](Ui::begin_frame), declare boxes and widgets, lay out
/// and draw the roots, then [`end_frame`](Ui::end_frame). Interaction
/// queries compare the finished previous frame with the current input.
pub struct Ui<B: Backend> {
    backend: B,
    pub(crate) glyphs: GlyphCache,
    pub(crate) draw: DrawList,
    pub(crate) input_config: InputConfig,
    style_config: StyleConfig,
    base_font: FontUsage,
    icon_font: Option<FontUsage>,

    pub(crate) old: Frame,
    pub(crate) new: Frame,
    frame_index: u64,
    in_frame: bool,

    pub(crate) inputs: Inputs,
    pub(crate) outputs: Outputs,
    pub(crate) mouse_pos: Vec2,
    window_size: Vec2,

    box_stack: Vec<Option<BoxId>>,
    style_stack: Vec<StyleId>,

    /// Deepest box under the cursor, in the previous frame's tree.
    pub(crate) deepest_hovered: Option<BoxId>,
    pub(crate) selection_is_visible: bool,
    pub(crate) last_pressed_mouse_pos: Vec2,
    pub(crate) last_released_mouse_pos: Vec2,
    pub(crate) mouse_travel_distance_after_press: Vec2,
    pub(crate) time_since_pressed_lmb: f32,

    pub(crate) clipboard: Option<Box<dyn Clipboard>>,
    pub(crate) widgets: WidgetState,
}

impl<B: Backend> Ui<B> {
    /// Create the context, its GPU buffers and the glyph atlas.
    pub fn new(mut backend: B, config: &BriskConfig, font: Box<dyn GlyphRasterizer>) -> Self {
        let limits = &config.limits;
        backend.create_vertex_buffer(VERTEX_BUFFER_ID, limits.max_vertices * std::mem::size_of::<Vertex>());
        backend.create_index_buffer(INDEX_BUFFER_ID, limits.max_indices * std::mem::size_of::<u32>());
        let texture = backend.create_atlas(ATLAS, limits.atlas_size, limits.atlas_size);

        let mut glyphs = GlyphCache::new(limits.atlas_size, limits.glyph_padding, texture);
        let font = glyphs.add_font(font, 0.0);
        let draw = DrawList::new(limits.max_vertices, limits.max_indices, glyphs.white_uv());

        tracing::debug!(
            atlas_size = limits.atlas_size,
            max_vertices = limits.max_vertices,
            max_indices = limits.max_indices,
            "ui context created"
        );

        Self {
            backend,
            glyphs,
            draw,
            input_config: config.input.clone(),
            style_config: config.style.clone(),
            base_font: FontUsage {
                font,
                size: config.style.font_size,
            },
            icon_font: None,
            old: Frame::default(),
            new: Frame::default(),
            frame_index: 0,
            in_frame: false,
            inputs: Inputs::default(),
            outputs: Outputs::default(),
            mouse_pos: Vec2::ZERO,
            window_size: Vec2::ZERO,
            box_stack: vec![None],
            style_stack: Vec::new(),
            deepest_hovered: None,
            selection_is_visible: false,
            last_pressed_mouse_pos: Vec2::ZERO,
            last_released_mouse_pos: Vec2::ZERO,
            mouse_travel_distance_after_press: Vec2::ZERO,
            time_since_pressed_lmb: f32::MAX,
            clipboard: None,
            widgets: WidgetState::default(),
        }
    }

    /// Use `font` for checkbox and arrow glyphs.
    pub fn with_icon_font(mut self, font: Box<dyn GlyphRasterizer>, size: f32, y_offset: f32) -> Self {
        let font = self.glyphs.add_font(font, y_offset);
        self.icon_font = Some(FontUsage { font, size });
        self
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.clipboard = Some(clipboard);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn base_font(&self) -> FontUsage {
        self.base_font
    }

    pub fn icon(&self, icon: Icon) -> (FontUsage, &'static str) {
        match self.icon_font {
            Some(font) => (font, icon.icon_font_text()),
            None => (self.base_font, icon.fallback_text()),
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Draw list and glyph cache for explicit drawing between boxes.
    pub fn draw_context(&mut self) -> (&mut DrawList, &mut GlyphCache) {
        (&mut self.draw, &mut self.glyphs)
    }

    pub fn begin_frame(&mut self, inputs: &Inputs, window_size: Vec2) {
        assert!(!self.in_frame, "begin_frame called twice without end_frame");
        assert_eq!(self.box_stack.len(), 1, "box stack must only hold the root sentinel");
        self.in_frame = true;
        self.frame_index += 1;

        self.draw.reset();
        self.inputs = inputs.clone();
        self.outputs = Outputs::default();
        self.window_size = window_size;
        self.mouse_pos = inputs.mouse_position + Vec2::splat(0.5);

        std::mem::swap(&mut self.old, &mut self.new);
        self.new.reset(self.frame_index);
        self.new.selected_old = self.old.selected;

        self.deepest_hovered = None;
        for &root in &self.old.roots {
            if let Some(selected) = navigation::selection_movement(&self.old, &self.inputs, root) {
                // The first navigation key only reveals the selection.
                if self.selection_is_visible {
                    self.new.selected = selected;
                }
                self.selection_is_visible = true;
            }
            if let Some(hovered) = crate::interaction::deepest_hovered(&self.old, root, self.mouse_pos) {
                self.deepest_hovered = Some(hovered);
            }
        }

        if self.inputs.was_pressed(Input::MouseLeft) || self.inputs.was_pressed(Input::Escape) {
            self.selection_is_visible = false;
        }

        let style = self.new.add_style(Style::from_config(&self.style_config, self.base_font));
        self.style_stack.push(style);
    }

    /// Finish the frame: update mouse tracking, close the last batch and hand
    /// buffers and atlas to the backend.
    pub fn end_frame(&mut self) -> &Outputs {
        assert!(self.in_frame, "end_frame called without begin_frame");
        assert_eq!(
            self.box_stack.len(),
            1,
            "mismatched push_box/pop_box: {} box(es) still pushed",
            self.box_stack.len() - 1
        );

        if self.inputs.is_down(Input::MouseLeft) {
            let mut scale = 1.0;
            if self.inputs.is_down(Input::Alt) {
                scale *= self.input_config.drag_slow_factor;
            }
            if self.inputs.is_down(Input::Shift) {
                scale *= self.input_config.drag_fast_factor;
            }
            self.mouse_travel_distance_after_press += self.inputs.mouse_raw_delta * scale;
            self.last_pressed_mouse_pos = self.mouse_pos;
        } else {
            self.last_released_mouse_pos = self.mouse_pos;
            self.mouse_travel_distance_after_press = Vec2::ZERO;
        }

        self.time_since_pressed_lmb += self.inputs.frame_delta_time;
        if self.inputs.was_pressed(Input::MouseLeft) {
            self.time_since_pressed_lmb = 0.0;
        }

        self.draw.finalize_batch();

        assert_eq!(
            self.style_stack.len(),
            1,
            "mismatched push_style/pop_style: {} style(s) still pushed",
            self.style_stack.len() - 1
        );
        self.style_stack.pop();

        self.backend.write_buffer(VERTEX_BUFFER_ID, self.draw.vertex_bytes());
        self.backend.write_buffer(INDEX_BUFFER_ID, self.draw.index_bytes());
        if let Some(dirty) = self.glyphs.take_dirty() {
            self.backend.write_atlas(ATLAS, self.glyphs.pixels(), dirty);
        }

        self.outputs.draw_calls = self.draw.draw_calls().to_vec();
        tracing::debug!(
            frame = self.frame_index,
            boxes = self.new.boxes.len(),
            draw_calls = self.outputs.draw_calls.len(),
            vertices = self.draw.vertices().len(),
            indices = self.draw.indices().len(),
            "frame finished"
        );

        self.in_frame = false;
        &self.outputs
    }

    // ---- boxes ----

    /// The box for `key` in the frame being built, created on first use.
    ///
    /// A fresh box links to last frame's box with the same key, but only if
    /// that box was actually added (not merely looked up).
    pub fn box_from_key(&mut self, key: Key) -> BoxId {
        if let Some(id) = self.new.lookup(key) {
            return id;
        }
        let id = self.new.alloc(key);
        if let Some(prev) = self.old.lookup(key)
            && self.old.get(prev).flags.contains(BoxFlags::HAS_CALLED_ADD_BOX)
        {
            self.new.get_mut(id).prev_frame = Some(self.old.reference(prev));
        }
        id
    }

    /// Add a box under the current parent, or as a new root.
    ///
    /// Panics if a box with `key` was already added this frame.
    pub fn add_box(&mut self, key: Key, w: Size, h: Size, flags: BoxFlags) -> BoxId {
        let id = self.box_from_key(key);
        assert!(
            !self.new.get(id).flags.contains(BoxFlags::HAS_CALLED_ADD_BOX),
            "box with key {key:?} was already added this frame"
        );

        let parent = self.box_stack.last().copied().flatten();
        let style = self.peek_style();
        {
            let b = self.new.get_mut(id);
            b.flags = flags | BoxFlags::HAS_CALLED_ADD_BOX;
            b.size = [w, h];
            b.style = style;
        }
        match parent {
            Some(parent) => self.new.append_child(parent, id),
            None => self.new.roots.push(id),
        }

        let holding_input = self.inputs.is_down(Input::MouseLeft)
            || (self.selection_is_visible && self.inputs.is_down(Input::Enter));
        if self.old.deepest_clicking_down == key && holding_input {
            self.new.deepest_clicking_down = key;
        }

        if flags.contains(BoxFlags::CLICKABLE) && self.pressed(key, Input::MouseLeft) {
            self.new.deepest_clicking_down = key;
            if flags.contains(BoxFlags::SELECTABLE) {
                self.new.selected = key;
            }
        } else if self.old.selected == key && !self.new.selected.is_valid() {
            self.new.selected = key;
        }

        let prev = self
            .new
            .get(id)
            .prev_frame
            .and_then(|r| self.old.resolve(r))
            .map(|p| (p.lazy_is_hovered, p.lazy_is_holding_down));
        if let Some((prev_hovered, prev_holding)) = prev {
            let t = self.input_config.hover_smoothing;
            let hovered = if self.is_hovered_idle(key) { 1.0 } else { 0.0 };
            let holding = if self.is_clicking_down(key) { 1.0 } else { 0.0 };
            let b = self.new.get_mut(id);
            b.lazy_is_hovered = lerp(prev_hovered, hovered, t);
            b.lazy_is_holding_down = lerp(prev_holding, holding, t);
        }
        id
    }

    pub fn add_box_with_text(&mut self, key: Key, w: Size, h: Size, flags: BoxFlags, text: &str) -> BoxId {
        let id = self.add_box(key, w, h, flags | BoxFlags::DRAW_TEXT);
        self.new.get_mut(id).text = text.to_owned();
        id
    }

    pub fn push_box(&mut self, id: BoxId) {
        self.box_stack.push(Some(id));
    }

    /// Panics unless `id` is the box on top of the stack.
    pub fn pop_box(&mut self, id: BoxId) {
        let popped = self.box_stack.pop().flatten();
        assert_eq!(popped, Some(id), "pop_box: popped box does not match the pushed one");
        assert!(!self.box_stack.is_empty(), "pop_box: popped the root sentinel");
    }

    /// Run `f` with `id` pushed as the current parent.
    pub fn with_box<R>(&mut self, id: BoxId, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_box(id);
        let result = f(self);
        self.pop_box(id);
        result
    }

    pub fn ui_box(&self, id: BoxId) -> &UiBox {
        self.new.get(id)
    }

    pub fn ui_box_mut(&mut self, id: BoxId) -> &mut UiBox {
        self.new.get_mut(id)
    }

    /// Last frame's box with the same key, if it was added there.
    pub fn prev_frame_box(&self, id: BoxId) -> Option<&UiBox> {
        self.new.get(id).prev_frame.and_then(|r| self.old.resolve(r))
    }

    pub fn lookup(&self, key: Key) -> Option<BoxId> {
        self.new.lookup(key)
    }

    pub fn roots(&self) -> &[BoxId] {
        &self.new.roots
    }

    pub fn children(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        self.new.children(id)
    }

    pub fn box_is_a_parent_of(&self, parent: BoxId, child: BoxId) -> bool {
        self.new.is_ancestor_of(parent, child)
    }

    /// Persisted scalar for `key`, carried over from last frame on first access.
    pub fn data_from_key(&mut self, key: Key) -> &mut Data {
        let old = &self.old.data_from_key;
        self.new
            .data_from_key
            .entry(key)
            .or_insert_with(|| old.get(&key).copied().unwrap_or_default())
    }

    // ---- styles ----

    pub fn peek_style(&self) -> StyleId {
        match self.style_stack.last() {
            Some(&id) => id,
            None => panic!("no style on the stack; styles are only available between begin_frame and end_frame"),
        }
    }

    /// Copy of the current style that is not pushed, for a single box.
    pub fn make_style(&mut self) -> StyleId {
        let style = *self.style(self.peek_style());
        self.new.add_style(style)
    }

    /// Push a copy of the current style; edit it through [`Ui::style_mut`].
    pub fn push_style(&mut self) -> StyleId {
        let id = self.make_style();
        self.style_stack.push(id);
        id
    }

    /// Panics unless `id` is on top of the style stack.
    pub fn pop_style(&mut self, id: StyleId) {
        assert_eq!(self.style_stack.last(), Some(&id), "pop_style: style is not on top of the stack");
        self.style_stack.pop();
    }

    pub fn style(&self, id: StyleId) -> &Style {
        &self.new.styles[id.0 as usize]
    }

    pub fn style_mut(&mut self, id: StyleId) -> &mut Style {
        &mut self.new.styles[id.0 as usize]
    }

    /// Push an edited copy of the current style for the duration of `body`.
    pub fn with_style<R>(&mut self, edit: impl FnOnce(&mut Style), body: impl FnOnce(&mut Self) -> R) -> R {
        let id = self.push_style();
        edit(self.style_mut(id));
        let result = body(self);
        self.pop_style(id);
        result
    }

    // ---- layout and drawing ----

    /// Lay out the subtree at `id` with its top-left at `position`.
    pub fn compute_rects(&mut self, id: BoxId, position: Vec2) {
        layout::compute_rects(&mut self.new, &mut self.glyphs, id, position);
    }

    /// Lay out every root at `position` and draw it.
    pub fn layout_and_draw_roots(&mut self, position: Vec2) {
        for root in self.new.roots.clone() {
            self.compute_rects(root, position);
            self.draw_box(root);
        }
    }
}

impl<B: Backend> Drop for Ui<B> {
    fn drop(&mut self) {
        self.backend.destroy_buffer(VERTEX_BUFFER_ID);
        self.backend.destroy_buffer(INDEX_BUFFER_ID);
        self.backend.destroy_atlas(ATLAS);
    }
}
