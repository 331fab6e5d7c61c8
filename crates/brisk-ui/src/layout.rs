//! Layout solver.
//!
//! Three passes per axis, X before Y:
//! 1. unexpanded sizes, post-order: text or children decide the content size,
//!    the box's [`Size`](crate::Size) turns it into a request;
//! 2. expanded sizes, pre-order: a parent hands leftover space to children
//!    by their flex weights (or takes overflow back);
//! 3. rects, pre-order: positions advance along the layout axis and every
//!    box is clipped against its inherited scissor.

use brisk_core::{Axis, GlyphCache, Rect, Vec2};

use crate::tree::{BoxFlags, BoxId, Frame};

/// Lay out the subtree at `id` with its top-left at `position`.
pub(crate) fn compute_rects(frame: &mut Frame, glyphs: &mut GlyphCache, id: BoxId, position: Vec2) {
    compute_expanded_sizes(frame, glyphs, id);
    for axis in Axis::BOTH {
        compute_rects_step(frame, id, axis, position[axis], None);
    }
}

pub(crate) fn compute_expanded_sizes(frame: &mut Frame, glyphs: &mut GlyphCache, id: BoxId) {
    for axis in Axis::BOTH {
        compute_unexpanded_sizes_step(frame, glyphs, id, axis);
    }
    for axis in Axis::BOTH {
        let size = frame.get(id).computed_unexpanded_size[axis];
        compute_expanded_sizes_step(frame, id, axis, size);
    }
}

fn layout_axis(frame: &Frame, id: BoxId) -> Axis {
    if frame.get(id).layout_axis_is_x() { Axis::X } else { Axis::Y }
}

fn compute_unexpanded_sizes_step(frame: &mut Frame, glyphs: &mut GlyphCache, id: BoxId, axis: Axis) {
    let children: Vec<BoxId> = frame.children(id).collect();
    for &child in &children {
        compute_unexpanded_sizes_step(frame, glyphs, child, axis);
    }

    let b = frame.get(id);
    let style = *frame.style(id);
    let mut fitting = 0.0_f32;

    if b.flags.contains(BoxFlags::DRAW_TEXT) {
        assert!(children.is_empty(), "a box that draws text cannot have children (key {:?})", b.key);
        let text_size = match axis {
            Axis::X => glyphs.text_width(&b.text, style.font),
            Axis::Y => style.font.size,
        };
        fitting = (text_size + 0.5).floor() + 2.0 * style.text_padding[axis];
    }

    if !children.is_empty() {
        let along = layout_axis(frame, id) == axis;
        for &child in &children {
            let child_size = frame.get(child).computed_unexpanded_size[axis];
            if along {
                fitting += child_size;
            } else {
                fitting = fitting.max(child_size);
            }
        }
        if b.flags.contains(BoxFlags::CHILD_PADDING) {
            fitting += 2.0 * style.child_padding[axis];
        }
    }

    let size = b.size[axis.index()];
    let unexpanded = size.size_px.max(size.size_ratio_fit * fitting);
    frame.get_mut(id).computed_unexpanded_size[axis] = unexpanded;
}

fn compute_expanded_sizes_step(frame: &mut Frame, id: BoxId, axis: Axis, size: f32) {
    frame.get_mut(id).computed_size[axis] = size;

    let mut area = size;
    if frame.get(id).flags.contains(BoxFlags::CHILD_PADDING) {
        area -= 2.0 * frame.style(id).child_padding[axis];
    }

    let children: Vec<BoxId> = frame.children(id).collect();
    if layout_axis(frame, id) == axis {
        let leftover = area
            - children
                .iter()
                .map(|&c| frame.get(c).computed_unexpanded_size[axis])
                .sum::<f32>();
        let total_flex: f32 = children
            .iter()
            .map(|&c| {
                let s = frame.get(c).size[axis.index()];
                if leftover > 0.0 { s.flex_up } else { s.flex_down }
            })
            .sum();

        for &child in &children {
            let c = frame.get(child);
            let mut child_size = c.computed_unexpanded_size[axis];
            let s = c.size[axis.index()];
            if leftover > 0.0 {
                let share = if s.flex_up == 0.0 { 0.0 } else { leftover * s.flex_up / total_flex };
                child_size += share.min(leftover * s.flex_up);
            } else {
                let share = if s.flex_down == 0.0 { 0.0 } else { leftover * s.flex_down / total_flex };
                child_size -= (-share).min(child_size * s.flex_down);
            }
            compute_expanded_sizes_step(frame, child, axis, child_size);
        }
    } else {
        for &child in &children {
            let c = frame.get(child);
            let mut child_size = c.computed_unexpanded_size[axis];
            let s = c.size[axis.index()];
            let leftover = area - child_size;
            if leftover > 0.0 {
                child_size += leftover * s.flex_up;
            } else {
                child_size -= (-leftover).min(child_size * s.flex_down);
            }
            compute_expanded_sizes_step(frame, child, axis, child_size);
        }
    }
}

fn compute_rects_step(frame: &mut Frame, id: BoxId, axis: Axis, position: f32, scissor: Option<Rect>) {
    let child_padding = frame.style(id).child_padding[axis];
    let layout = layout_axis(frame, id);

    let b = frame.get_mut(id);
    b.flags |= BoxFlags::HAS_COMPUTED_RECTS;
    b.computed_position[axis] = position + b.offset[axis];

    let min = b.computed_position[axis];
    let max = min + b.computed_size[axis];
    let (min_clipped, max_clipped) = match scissor {
        Some(s) => (min.max(s.min[axis]), max.min(s.max[axis])),
        None => (min, max),
    };
    b.computed_rect_clipped.min[axis] = min_clipped;
    b.computed_rect_clipped.max[axis] = max_clipped;

    let from_end = match axis {
        Axis::X => b.flags.contains(BoxFlags::LAYOUT_FROM_END_X),
        Axis::Y => b.flags.contains(BoxFlags::LAYOUT_FROM_END_Y),
    };
    let direction = if from_end { -1.0 } else { 1.0 };
    let cursor_base = if from_end { max } else { min };
    let mut cursor = cursor_base;
    if b.flags.contains(BoxFlags::CHILD_PADDING) {
        cursor += direction * child_padding;
    }

    // Children only read the current axis of this rect.
    let child_scissor = if b.flags.contains(BoxFlags::NO_SCISSOR) {
        scissor
    } else {
        Some(b.computed_rect_clipped)
    };

    let children: Vec<BoxId> = frame.children(id).collect();
    for child in children {
        let c = frame.get(child);
        let mut child_position = if c.flags.contains(BoxFlags::NO_AUTO_OFFSET) { cursor_base } else { cursor };
        if from_end {
            child_position -= c.computed_size[axis];
        }
        let child_size = c.computed_size[axis];

        compute_rects_step(frame, child, axis, child_position, child_scissor);

        if axis == layout {
            cursor += direction * child_size;
        }
    }
}
