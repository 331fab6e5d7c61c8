use brisk_core::{Axis, Backend, Key, Vec2};

use crate::context::Ui;
use crate::input::Input;
use crate::tree::{BoxFlags, BoxId, Size};

/// Takes whatever space the parent gives, regardless of content.
const FILL: Size = Size {
    size_px: 0.0,
    size_ratio_fit: 0.0,
    flex_up: 1.0,
    flex_down: 1.0,
};

fn axis_size(along: Axis, main: Size, cross: Size) -> (Size, Size) {
    match along {
        Axis::X => (main, cross),
        Axis::Y => (cross, main),
    }
}

impl<B: Backend> Ui<B> {
    /// Clipped area that scrolls its content, with scrollbars on the axes
    /// where last frame's content did not fit.
    ///
    /// An anchored axis keeps content aligned to its end (like a log view).
    /// Returns the pushed content box; close with [`Ui::pop_scroll_area`].
    pub fn push_scroll_area(
        &mut self,
        key: Key,
        w: Size,
        h: Size,
        flags: BoxFlags,
        anchor_x: bool,
        anchor_y: bool,
    ) -> BoxId {
        let content_key = key.with("content");
        let temp_keys = [key.with("view_x"), key.with("view_y")];
        let anchors = [anchor_x, anchor_y];

        let content = self.box_from_key(content_key);
        let deepest_temp = self.box_from_key(temp_keys[0]);

        let parent = self.add_box(key.with("area"), w, h, BoxFlags::LAYOUT_IN_X | flags);
        self.push_box(parent);

        let content_prev = self.prev_frame_box(content).map(|b| (b.computed_unexpanded_size, b.offset));
        let visible_prev = self.prev_frame_box(deepest_temp).map(|b| b.computed_size);
        let parent_prev_position = self.prev_frame_box(parent).map(|b| b.computed_position);

        let mut offset = Vec2::ZERO;
        // The scrollbar for axis `y` runs along `y`.
        for y in [Axis::Y, Axis::X] {
            let yi = y.index();
            let axis_key = key.with("bar").hash_int(yi as u64);
            let temp = self.add_box(temp_keys[yi], FILL, FILL, BoxFlags::empty());

            let content_len = content_prev.map_or(0.0, |(size, _)| size[y]);
            let visible_len = visible_prev.map_or(0.0, |size| size[y]);
            let rail_len = self.prev_frame_box(temp).map_or(0.0, |b| b.computed_size[y]);

            if content_len > visible_len {
                let thickness = Size::px(self.input_config.scrollbar_thickness);
                let (rw, rh) = axis_size(y, Size::flex(1.0), thickness);
                let mut rail_flags = BoxFlags::DRAW_BORDER;
                if y == Axis::X {
                    rail_flags |= BoxFlags::LAYOUT_IN_X;
                }
                if anchors[yi] {
                    rail_flags |= match y {
                        Axis::X => BoxFlags::LAYOUT_FROM_END_X,
                        Axis::Y => BoxFlags::LAYOUT_FROM_END_Y,
                    };
                }
                let rail = self.add_box(axis_key.with("rail"), rw, rh, rail_flags);
                self.push_box(rail);

                offset[y] = content_prev.map_or(0.0, |(_, o)| o[y]);
                let sign = if anchors[yi] { 1.0 } else { -1.0 };
                let distance_ratio = sign * offset[y] / content_len;
                let length_ratio = visible_len / content_len;

                let stays = BoxFlags::PRESSING_STAYS_WITHOUT_HOVER;
                let pad_before_key = axis_key.with("before");
                let bar_key = axis_key.with("thumb");
                let pad_after_key = axis_key.with("after");

                let (pw, ph) = axis_size(y, Size::px(distance_ratio * rail_len), thickness);
                self.add_box(pad_before_key, pw, ph, stays);
                let (bw, bh) = axis_size(y, Size::px(rail_len * length_ratio), thickness);
                let bar_flags = stays | BoxFlags::CLICKABLE | BoxFlags::DRAW_BORDER | BoxFlags::DRAW_TRANSPARENT_BACKGROUND;
                self.add_box(bar_key, bw, bh, bar_flags);
                let (aw, ah) = axis_size(y, Size::flex(1.0), thickness);
                self.add_box(pad_after_key, aw, ah, stays);

                self.pop_box(rail);

                if self.pressed(bar_key, Input::MouseLeft) {
                    self.widgets.scrollbar_origin_before_press = offset[y];
                }
                if self.is_clicking_down(bar_key) {
                    let moved = (self.mouse_pos[y] - self.last_released_mouse_pos[y]) / rail_len;
                    offset[y] = self.widgets.scrollbar_origin_before_press - moved * content_len;
                }
                if self.is_clicking_down(pad_before_key) || self.is_clicking_down(pad_after_key) {
                    let origin = parent_prev_position.map_or(0.0, |p| p[y]);
                    let ratio = (self.mouse_pos[y] - origin) / rail_len - 0.5 * length_ratio;
                    offset[y] = -ratio * content_len;
                    if anchors[yi] {
                        offset[y] += content_len - visible_len;
                    }
                }
                if y == Axis::Y && self.is_hovered(key.with("area")) {
                    offset[y] += self.inputs.mouse_wheel_delta * self.input_config.scroll_wheel_step;
                }

                offset[y] = if anchors[yi] {
                    offset[y].min(content_len - visible_len).max(0.0)
                } else {
                    offset[y].max(visible_len - content_len).min(0.0)
                };
            }

            self.push_box(temp);
        }

        let content = self.add_box(content_key, Size::fit(), Size::fit(), BoxFlags::empty());
        self.push_box(content);
        self.ui_box_mut(content).offset = offset;

        let deepest = self.ui_box_mut(deepest_temp);
        if anchor_x {
            deepest.flags |= BoxFlags::LAYOUT_FROM_END_X;
        }
        if anchor_y {
            deepest.flags |= BoxFlags::LAYOUT_FROM_END_Y;
        }
        content
    }

    /// Close a scroll area opened with [`Ui::push_scroll_area`].
    pub fn pop_scroll_area(&mut self, content: BoxId) {
        self.pop_box(content);
        let mut id = content;
        for _ in 0..3 {
            id = match self.ui_box(id).parent() {
                Some(parent) => parent,
                None => panic!("pop_scroll_area: {content:?} is not a scroll area content box"),
            };
            self.pop_box(id);
        }
    }
}
