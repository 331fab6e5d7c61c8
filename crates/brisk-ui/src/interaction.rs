//! Hover, press and click queries.
//!
//! All queries look at the previous frame's tree: the boxes of the frame
//! being built have no geometry yet.

use brisk_core::{Backend, Key, Rect, Vec2};

use crate::context::Ui;
use crate::input::Input;
use crate::tree::{BoxFlags, BoxId, Frame};

fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x >= r.min.x && p.y >= r.min.y && p.x <= r.max.x && p.y <= r.max.y
}

/// Deepest box of the tree rooted at `root` whose clipped rect holds `p`.
///
/// Descends into the first child under the point and otherwise moves on to
/// the next sibling, so later siblings never shadow earlier ones.
pub(crate) fn deepest_hovered(frame: &Frame, root: BoxId, p: Vec2) -> Option<BoxId> {
    let mut deepest = None;
    let mut cursor = Some(root);
    while let Some(id) = cursor {
        let b = frame.get(id);
        if point_in_rect(p, &b.computed_rect_clipped) {
            deepest = Some(id);
            cursor = b.first_child;
        } else {
            cursor = b.next_sibling;
        }
    }
    deepest
}

impl<B: Backend> Ui<B> {
    /// The mouse is over the box with `key` or one of its descendants.
    pub fn is_hovered(&self, key: Key) -> bool {
        let mut cursor = self.deepest_hovered;
        while let Some(id) = cursor {
            let b = self.old.get(id);
            if b.key == key {
                return true;
            }
            cursor = b.parent;
        }
        false
    }

    /// Like [`Ui::is_hovered`], but a clickable descendant under the mouse
    /// takes the hover away from its ancestors.
    pub fn is_hovered_idle(&self, key: Key) -> bool {
        let mut cursor = self.deepest_hovered;
        while let Some(id) = cursor {
            let b = self.old.get(id);
            if b.key == key {
                return true;
            }
            if b.flags.contains(BoxFlags::CLICKABLE) {
                break;
            }
            cursor = b.parent;
        }
        false
    }

    fn keyboard_activates(&self, key: Key) -> bool {
        self.old.selected == key && self.selection_is_visible && self.inputs.was_pressed(Input::Enter)
    }

    /// `button` went down over the box this frame, or the box is the visible
    /// selection and Enter went down.
    pub fn pressed(&self, key: Key, button: Input) -> bool {
        (self.is_hovered(key) && self.inputs.was_pressed(button)) || self.keyboard_activates(key)
    }

    pub fn pressed_idle(&self, key: Key, button: Input) -> bool {
        (self.is_hovered_idle(key) && self.inputs.was_pressed(button)) || self.keyboard_activates(key)
    }

    /// The box was being held and the left button (or Enter on a visible
    /// selection) was released this frame. The mouse may have left the box.
    pub fn clicked(&self, key: Key) -> bool {
        self.old.deepest_clicking_down == key
            && (self.inputs.was_released(Input::MouseLeft)
                || (self.selection_is_visible && self.inputs.was_released(Input::Enter)))
    }

    pub fn clicked_anywhere(&self) -> bool {
        self.inputs.was_released(Input::MouseLeft) || self.inputs.was_released(Input::Enter)
    }

    pub fn is_clicking_down(&self, key: Key) -> bool {
        self.old.deepest_clicking_down == key
    }

    pub fn has_moved_mouse_after_pressed(&self) -> bool {
        let d = self.input_config.double_click_distance;
        (self.mouse_pos - self.last_pressed_mouse_pos).length_squared() > d * d
    }

    pub fn double_clicked_anywhere(&self) -> bool {
        self.inputs.was_pressed(Input::MouseLeft)
            && !self.has_moved_mouse_after_pressed()
            && self.time_since_pressed_lmb < self.input_config.double_click_time
    }

    pub fn double_clicked(&self, key: Key) -> bool {
        self.is_hovered(key) && self.double_clicked_anywhere()
    }

    pub fn double_clicked_idle(&self, key: Key) -> bool {
        self.is_hovered_idle(key) && self.double_clicked_anywhere()
    }

    pub fn is_selected(&self, key: Key) -> bool {
        self.old.selected == key
    }

    pub fn selection_is_visible(&self) -> bool {
        self.selection_is_visible
    }

    pub fn did_begin_selection(&self, key: Key) -> bool {
        self.old.selected == key && self.old.selected_old != key
    }

    pub fn did_end_selection(&self, key: Key) -> bool {
        self.old.selected != key && self.old.selected_old == key
    }

    /// A text edit with `key` is consuming keyboard input this frame.
    pub fn is_edit_text_active(&self, key: Key) -> bool {
        self.new.active_edit_text == key
    }

    /// Whether a popup anchored on `key` should stay open: it stays open
    /// while it existed last frame, until the left button goes down on a
    /// box that has not been re-added yet this frame (i.e. outside the popup
    /// and everything declared before it).
    pub fn dropdown_should_keep_open(&mut self, key: Key) -> bool {
        let id = self.box_from_key(key);
        let was_open = self.new.get(id).has_prev_frame();
        if !was_open {
            return false;
        }
        if self.inputs.was_pressed(Input::MouseLeft) {
            let hovered_key = self.deepest_hovered.map(|h| self.old.get(h).key);
            let hit_declared_box = hovered_key
                .and_then(|k| self.new.lookup(k))
                .is_some_and(|h| self.new.get(h).flags.contains(BoxFlags::HAS_CALLED_ADD_BOX));
            if !hit_declared_box {
                return false;
            }
        }
        true
    }
}
