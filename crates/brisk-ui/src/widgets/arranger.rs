use brisk_core::{lerp, Backend, Key, Vec2};

use crate::context::Ui;
use crate::input::{Input, MouseCursor};
use crate::tree::{BoxExt, BoxFlags, BoxId, Size};

/// Reorder request from an arranger set: move element `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrangeRequest {
    pub from: usize,
    pub to: usize,
}

impl<B: Backend> Ui<B> {
    /// Vertical list whose children can be reordered by dragging an
    /// [`Ui::arranger`] handle inside them.
    pub fn push_arranger_set(&mut self, key: Key, w: Size, h: Size) -> BoxId {
        let id = self.add_box(key, w, h, BoxFlags::empty());
        self.push_box(id);
        self.ui_box_mut(id).ext = BoxExt::ArrangerSet { dragging: None };
        id
    }

    /// Close the set, animate the children towards their slots and report a
    /// move on the frame the drag ends.
    ///
    /// Lays the set out at the origin to learn the children's resting
    /// positions, so call it before the frame's final layout pass.
    pub fn pop_arranger_set(&mut self, id: BoxId) -> Option<ArrangeRequest> {
        self.pop_box(id);
        let dragging = match self.ui_box(id).ext {
            BoxExt::ArrangerSet { dragging } => dragging,
            _ => panic!("pop_arranger_set: box was not opened with push_arranger_set"),
        };
        let origin_y = self.prev_frame_box(id).map_or(0.0, |b| b.computed_position.y);
        let mouse_rel_y = self.mouse_pos.y - origin_y;

        self.compute_rects(id, Vec2::ZERO);

        let children: Vec<BoxId> = self.children(id).collect();
        let mut drag = None;
        if let Some(dragged) = dragging {
            let from = children.iter().position(|&c| c == dragged).unwrap_or(0);
            let passed = children
                .iter()
                .take_while(|&&c| self.ui_box(c).computed_position.y <= mouse_rel_y)
                .count();
            let to = passed.saturating_sub(1).min(children.len().saturating_sub(1));
            // Drawn last so it stays on top while moving.
            self.new.move_to_back(dragged);
            drag = Some((dragged, from, to));
        }

        let children: Vec<BoxId> = self.children(id).collect();
        let drag_delta = self.mouse_pos.y - self.last_released_mouse_pos.y;
        for (i, child) in children.into_iter().enumerate() {
            let mut t = 0.2;
            let mut offset = self.ui_box(child).computed_position.y;
            if let Some((dragged, from, to)) = drag {
                if child == dragged {
                    offset += drag_delta;
                    t = 1.0;
                } else {
                    let size = self.ui_box(dragged).computed_size.y;
                    if i >= to && i < from {
                        offset += size;
                    }
                    if i >= from && i < to {
                        offset -= size;
                    }
                }
            }
            if let Some(prev) = self.prev_frame_box(child) {
                offset = lerp(prev.offset.y, offset, t);
            }
            let b = self.ui_box_mut(child);
            b.flags |= BoxFlags::NO_AUTO_OFFSET;
            b.offset.y = offset;
        }

        match drag {
            Some((_, from, to)) if self.inputs.was_released(Input::MouseLeft) => Some(ArrangeRequest { from, to }),
            _ => None,
        }
    }

    /// Drag handle. Holding it drags the child of the enclosing arranger set
    /// that contains the handle.
    pub fn arranger(&mut self, key: Key, w: Size, h: Size) {
        let id = self.add_box_with_text(key, w, h, BoxFlags::CLICKABLE, ":");
        let holding = self.is_clicking_down(key);
        if holding || self.is_hovered(key) {
            self.outputs.cursor = MouseCursor::ResizeV;
        }
        if !holding {
            return;
        }

        let mut elem = id;
        loop {
            let parent = match self.ui_box(elem).parent() {
                Some(parent) => parent,
                None => panic!("arranger {key:?} must be inside an arranger set"),
            };
            if let BoxExt::ArrangerSet { dragging } = &mut self.ui_box_mut(parent).ext {
                *dragging = Some(elem);
                return;
            }
            elem = parent;
        }
    }
}
