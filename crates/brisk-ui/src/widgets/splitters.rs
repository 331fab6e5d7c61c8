use brisk_core::{Axis, Backend, Key, Rect, Vec2};

use crate::context::Ui;
use crate::input::{Input, MouseCursor};

/// Make every panel at least `min_width` wide, then scale the offsets so the
/// last one lands on `width`.
fn sanitize(offsets: &mut [f32], width: f32, min_width: f32) {
    let mut head = 0.0;
    for end in offsets.iter_mut() {
        *end = end.max(head + min_width);
        head = *end;
    }
    let scale = width / head;
    for end in offsets.iter_mut() {
        *end *= scale;
    }
}

/// Move splitter `index` to `split`, keeping every panel at least
/// `min_width` by pushing the neighbours on both sides.
fn drag_splitter(offsets: &mut [f32], index: usize, split: f32, width: f32, min_width: f32) {
    let panels_left = (index + 1) as f32;
    let panels_right = (offsets.len() - 1 - index) as f32;
    let split = split.max(min_width * panels_left).min(width - panels_right * min_width);
    offsets[index] = split;

    let mut head = split;
    for end in &mut offsets[index + 1..] {
        if *end < head + min_width {
            *end = head + min_width;
            head = *end;
        }
    }
    let mut head = split;
    for end in offsets[..index].iter_mut().rev() {
        if *end > head - min_width {
            *end = head - min_width;
            head = *end;
        }
    }
}

fn hovered_splitter(area: Rect, axis: Axis, offsets: &[f32], half_width: f32, p: Vec2) -> Option<usize> {
    let count = offsets.len().saturating_sub(1);
    offsets[..count].iter().position(|&end| {
        let edge = area.min[axis] + end;
        let mut r = area;
        r.min[axis] = edge - half_width;
        r.max[axis] = edge + half_width;
        p.x >= r.min.x && p.y >= r.min.y && p.x <= r.max.x && p.y <= r.max.y
    })
}

impl<B: Backend> Ui<B> {
    /// Draggable dividers between panels laid side by side along `axis`
    /// inside `area`.
    ///
    /// `panel_end_offsets[i]` is where panel `i` ends, relative to the area's
    /// start; the slice is sanitized and normalized in place every call, so
    /// any positive values can be passed initially.
    pub fn splitters(&mut self, key: Key, area: Rect, axis: Axis, panel_end_offsets: &mut [f32], min_width: f32) {
        assert!(!panel_end_offsets.is_empty(), "splitters need at least one panel");
        let width = area.max[axis] - area.min[axis];
        sanitize(panel_end_offsets, width, min_width);

        let state = &self.widgets.splitters;
        if state.holding_key == key {
            let index = state.holding_index;
            let split = if self.inputs.is_down(Input::Alt) {
                (index + 1) as f32 * (width / panel_end_offsets.len() as f32)
            } else {
                self.mouse_pos[axis] - area.min[axis]
            };
            drag_splitter(panel_end_offsets, index, split, width, min_width);
        }

        if !self.inputs.is_down(Input::MouseLeft) {
            self.widgets.splitters.holding_key = Key::INVALID;
        }

        if let Some(index) = self.splitters_find_hovered_index(area, axis, panel_end_offsets) {
            self.outputs.cursor = match axis {
                Axis::X => MouseCursor::ResizeH,
                Axis::Y => MouseCursor::ResizeV,
            };
            if self.inputs.was_pressed(Input::MouseLeft) {
                self.widgets.splitters.holding_key = key;
                self.widgets.splitters.holding_index = index;
            }
        }
    }

    /// Index of the splitter under the mouse, if any.
    pub fn splitters_find_hovered_index(&self, area: Rect, axis: Axis, panel_end_offsets: &[f32]) -> Option<usize> {
        hovered_splitter(area, axis, panel_end_offsets, self.input_config.splitter_half_width, self.mouse_pos)
    }

    /// Index of the splitter being dragged in the set `key`.
    pub fn splitters_holding_index(&self, key: Key) -> Option<usize> {
        let state = &self.widgets.splitters;
        (state.holding_key == key && key.is_valid()).then_some(state.holding_index)
    }
}
