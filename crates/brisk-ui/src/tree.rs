//! Per-frame box tree and the immediate state snapshot that goes with it.
//!
//! Two [`Frame`]s exist at any time: the one finished last frame (read only)
//! and the one being built. Boxes live in a flat vector and link to each
//! other by index. A box points at its previous-frame twin through a
//! [`BoxRef`] tagged with the generation of the frame it was taken from, so
//! a stale reference can never resolve into a recycled frame.

use bitflags::bitflags;
use brisk_core::{Key, Rect, Vec2};
use hashbrown::HashMap;

use crate::style::{Style, StyleId};

/// Index of a box in the frame that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoxId(pub(crate) u32);

impl BoxId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Generation-tagged reference into an earlier frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxRef {
    pub(crate) generation: u64,
    pub(crate) id: BoxId,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BoxFlags: u32 {
        const DRAW_BORDER = 1 << 0;
        const DRAW_TEXT = 1 << 1;
        const DRAW_TRANSPARENT_BACKGROUND = 1 << 2;
        const DRAW_OPAQUE_BACKGROUND = 1 << 3;
        const CLICKABLE = 1 << 4;
        /// Keeps the pressed look while held even after the cursor leaves.
        const PRESSING_STAYS_WITHOUT_HOVER = 1 << 5;
        /// Inset children by the style's child padding.
        const CHILD_PADDING = 1 << 6;
        /// Lay children out along X; the default axis is Y.
        const LAYOUT_IN_X = 1 << 7;
        const LAYOUT_FROM_END_X = 1 << 8;
        const LAYOUT_FROM_END_Y = 1 << 9;
        /// Can receive keyboard selection.
        const SELECTABLE = 1 << 10;
        /// Placed at the parent's origin plus `offset`, without advancing the layout cursor.
        const NO_AUTO_OFFSET = 1 << 11;
        /// Neither clipped itself nor clipping its children.
        const NO_SCISSOR = 1 << 12;
        const HAS_CALLED_ADD_BOX = 1 << 13;
        const HAS_COMPUTED_RECTS = 1 << 14;
    }
}

/// Size request for one axis.
///
/// The unexpanded size is `max(size_px, size_ratio_fit * content)`; flex
/// weights then grow or shrink it against the siblings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub size_px: f32,
    pub size_ratio_fit: f32,
    pub flex_up: f32,
    pub flex_down: f32,
}

impl Size {
    /// Exactly as large as the content.
    pub const fn fit() -> Self {
        Self {
            size_px: 0.0,
            size_ratio_fit: 1.0,
            flex_up: 0.0,
            flex_down: 0.0,
        }
    }

    pub const fn px(value: f32) -> Self {
        Self {
            size_px: value,
            size_ratio_fit: 0.0,
            flex_up: 0.0,
            flex_down: 0.0,
        }
    }

    /// Content size, growing and shrinking with weight `weight`.
    pub const fn flex(weight: f32) -> Self {
        Self {
            size_px: 0.0,
            size_ratio_fit: 1.0,
            flex_up: weight,
            flex_down: weight,
        }
    }
}

/// Small persisted per-key value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Data {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Vec2(Vec2),
}

impl Data {
    pub fn as_int(&self) -> i64 {
        match *self {
            Data::Int(v) => v,
            _ => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match *self {
            Data::Float(v) => v,
            _ => 0.0,
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(*self, Data::Bool(true))
    }

    pub fn as_vec2(&self) -> Vec2 {
        match *self {
            Data::Vec2(v) => v,
            _ => Vec2::ZERO,
        }
    }
}

/// Widget-specific data attached to a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BoxExt {
    #[default]
    None,
    /// Container of reorderable elements.
    ArrangerSet { dragging: Option<BoxId> },
    /// Hue/saturation wheel and its current pick.
    HueCircle { hue: f32, saturation: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct UiBox {
    pub key: Key,
    pub flags: BoxFlags,
    pub size: [Size; 2],
    /// Extra displacement applied by the layout (scrolling, animation).
    pub offset: Vec2,
    pub text: String,
    pub style: StyleId,
    pub ext: BoxExt,

    pub(crate) parent: Option<BoxId>,
    pub(crate) prev_sibling: Option<BoxId>,
    pub(crate) next_sibling: Option<BoxId>,
    pub(crate) first_child: Option<BoxId>,
    pub(crate) last_child: Option<BoxId>,
    pub(crate) prev_frame: Option<BoxRef>,

    /// Smoothed hover amount, 0..=1.
    pub lazy_is_hovered: f32,
    /// Smoothed held-down amount, 0..=1.
    pub lazy_is_holding_down: f32,

    pub computed_unexpanded_size: Vec2,
    pub computed_size: Vec2,
    pub computed_position: Vec2,
    pub computed_rect_clipped: Rect,
}

impl UiBox {
    fn new(key: Key) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<BoxId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<BoxId> {
        self.next_sibling
    }

    pub fn has_prev_frame(&self) -> bool {
        self.prev_frame.is_some()
    }

    /// Unclipped rect from the last layout.
    pub fn computed_rect(&self) -> Rect {
        Rect::from_min_size(self.computed_position, self.computed_size)
    }

    /// Scissor its own drawing is cut against; `NO_SCISSOR` boxes draw
    /// unclipped.
    pub fn draw_scissor(&self) -> Option<Rect> {
        if self.flags.contains(BoxFlags::NO_SCISSOR) {
            None
        } else {
            Some(self.computed_rect_clipped)
        }
    }

    pub(crate) fn layout_axis_is_x(&self) -> bool {
        self.flags.contains(BoxFlags::LAYOUT_IN_X)
    }
}

#[derive(Default)]
pub(crate) struct Frame {
    pub generation: u64,
    pub boxes: Vec<UiBox>,
    pub box_from_key: HashMap<Key, BoxId>,
    pub data_from_key: HashMap<Key, Data>,
    /// Top-level boxes in insertion order; later roots are on top.
    pub roots: Vec<BoxId>,
    pub styles: Vec<Style>,
    pub deepest_clicking_down: Key,
    pub selected: Key,
    /// The selection of the frame before this one.
    pub selected_old: Key,
    pub active_edit_text: Key,
}

impl Frame {
    /// Forget everything and start generation `generation`, keeping allocations.
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.boxes.clear();
        self.box_from_key.clear();
        self.data_from_key.clear();
        self.roots.clear();
        self.styles.clear();
        self.deepest_clicking_down = Key::INVALID;
        self.selected = Key::INVALID;
        self.selected_old = Key::INVALID;
        self.active_edit_text = Key::INVALID;
    }

    #[inline]
    pub fn get(&self, id: BoxId) -> &UiBox {
        &self.boxes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: BoxId) -> &mut UiBox {
        &mut self.boxes[id.index()]
    }

    pub fn style(&self, id: BoxId) -> &Style {
        &self.styles[self.get(id).style.0 as usize]
    }

    pub fn lookup(&self, key: Key) -> Option<BoxId> {
        self.box_from_key.get(&key).copied()
    }

    /// Resolve a reference taken from this frame; `None` if it belongs to another generation.
    pub fn resolve(&self, r: BoxRef) -> Option<&UiBox> {
        (r.generation == self.generation).then(|| self.get(r.id))
    }

    pub fn reference(&self, id: BoxId) -> BoxRef {
        BoxRef {
            generation: self.generation,
            id,
        }
    }

    /// Allocate an unlinked box.
    pub fn alloc(&mut self, key: Key) -> BoxId {
        let id = BoxId(self.boxes.len() as u32);
        self.boxes.push(UiBox::new(key));
        self.box_from_key.insert(key, id);
        id
    }

    pub fn add_style(&mut self, style: Style) -> StyleId {
        self.styles.push(style);
        StyleId(self.styles.len() as u32 - 1)
    }

    pub fn append_child(&mut self, parent: BoxId, child: BoxId) {
        let last = self.get(parent).last_child;
        {
            let c = self.get_mut(child);
            c.parent = Some(parent);
            c.prev_sibling = last;
            c.next_sibling = None;
        }
        match last {
            Some(last) => self.get_mut(last).next_sibling = Some(child),
            None => self.get_mut(parent).first_child = Some(child),
        }
        self.get_mut(parent).last_child = Some(child);
    }

    pub fn unlink_child(&mut self, child: BoxId) {
        let (parent, prev, next) = {
            let c = self.get(child);
            (c.parent, c.prev_sibling, c.next_sibling)
        };
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.get_mut(prev).next_sibling = next,
            None => self.get_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.get_mut(next).prev_sibling = prev,
            None => self.get_mut(parent).last_child = prev,
        }
        let c = self.get_mut(child);
        c.prev_sibling = None;
        c.next_sibling = None;
    }

    /// Move `child` to the end of its parent's child list (drawn last).
    pub fn move_to_back(&mut self, child: BoxId) {
        if let Some(parent) = self.get(child).parent {
            self.unlink_child(child);
            self.append_child(parent, child);
        }
    }

    pub fn children(&self, id: BoxId) -> Children<'_> {
        Children {
            frame: self,
            next: self.get(id).first_child,
        }
    }

    pub fn is_ancestor_of(&self, ancestor: BoxId, child: BoxId) -> bool {
        let mut cur = self.get(child).parent;
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.get(id).parent;
        }
        false
    }
}

pub(crate) struct Children<'a> {
    frame: &'a Frame,
    next: Option<BoxId>,
}

impl Iterator for Children<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<BoxId> {
        let id = self.next?;
        self.next = self.frame.get(id).next_sibling;
        Some(id)
    }
}
