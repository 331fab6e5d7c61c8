//! Keyboard movement of the selection through the previous frame's tree.

use brisk_core::Key;

use crate::input::{Input, Inputs};
use crate::tree::{BoxFlags, BoxId, Frame};

/// Where the selection should move this frame, searching the tree under
/// `node` for the selected box.
///
/// Down or Tab moves to the next selectable box in depth-first order, Up or
/// Shift+Tab to the previous one; both wrap around at the tree's ends.
pub(crate) fn selection_movement(frame: &Frame, inputs: &Inputs, node: BoxId) -> Option<Key> {
    let b = frame.get(node);
    if b.key == frame.selected && b.parent.is_some() {
        let shift = inputs.is_down(Input::Shift);
        let tab = inputs.was_pressed_or_repeat(Input::Tab);
        if inputs.was_pressed_or_repeat(Input::Down) || (tab && !shift) {
            return step(frame, node, next_in_order).map(|id| frame.get(id).key);
        }
        if inputs.was_pressed_or_repeat(Input::Up) || (tab && shift) {
            return step(frame, node, prev_in_order).map(|id| frame.get(id).key);
        }
        return None;
    }
    frame
        .children(node)
        .find_map(|child| selection_movement(frame, inputs, child))
}

/// Walk with `advance` until a selectable box; gives up after visiting
/// every box once. Coming back around to a selectable `from` lands on it.
fn step(frame: &Frame, from: BoxId, advance: fn(&Frame, BoxId) -> Option<BoxId>) -> Option<BoxId> {
    let mut cursor = from;
    for _ in 0..frame.boxes.len() {
        cursor = advance(frame, cursor)?;
        if cursor == from {
            return frame.get(from).flags.contains(BoxFlags::SELECTABLE).then_some(from);
        }
        if frame.get(cursor).flags.contains(BoxFlags::SELECTABLE) {
            return Some(cursor);
        }
    }
    None
}

fn root_of(frame: &Frame, mut id: BoxId) -> BoxId {
    while let Some(parent) = frame.get(id).parent {
        id = parent;
    }
    id
}

fn next_in_order(frame: &Frame, id: BoxId) -> Option<BoxId> {
    if let Some(child) = frame.get(id).first_child {
        return Some(child);
    }
    let mut cursor = id;
    loop {
        let b = frame.get(cursor);
        if let Some(next) = b.next_sibling {
            return Some(next);
        }
        match b.parent {
            Some(parent) => cursor = parent,
            // Wrap around to the top of the tree.
            None => return Some(frame.get(cursor).first_child.unwrap_or(cursor)),
        }
    }
}

fn last_descendant(frame: &Frame, mut id: BoxId) -> BoxId {
    while let Some(last) = frame.get(id).last_child {
        id = last;
    }
    id
}

fn prev_in_order(frame: &Frame, id: BoxId) -> Option<BoxId> {
    let b = frame.get(id);
    if let Some(prev) = b.prev_sibling {
        return Some(last_descendant(frame, prev));
    }
    match b.parent {
        Some(parent) if frame.get(parent).parent.is_some() => Some(parent),
        _ => Some(last_descendant(frame, root_of(frame, id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root
    ///   a (selectable)
    ///     a1 (selectable)
    ///   b
    ///   c (selectable)
    fn tree() -> (Frame, [BoxId; 5]) {
        let mut frame = Frame::default();
        frame.reset(1);
        let root = frame.alloc(Key(1));
        let a = frame.alloc(Key(2));
        let a1 = frame.alloc(Key(3));
        let b = frame.alloc(Key(4));
        let c = frame.alloc(Key(5));
        frame.append_child(root, a);
        frame.append_child(a, a1);
        frame.append_child(root, b);
        frame.append_child(root, c);
        for id in [a, a1, c] {
            frame.get_mut(id).flags |= BoxFlags::SELECTABLE;
        }
        frame.roots.push(root);
        (frame, [root, a, a1, b, c])
    }

    fn pressing(input: Input) -> Inputs {
        let mut inputs = Inputs::default();
        inputs.press(input);
        inputs
    }

    #[test]
    fn test_down_visits_in_depth_first_order_and_wraps() {
        let (mut frame, [root, ..]) = tree();
        let down = pressing(Input::Down);
        let mut visited = Vec::new();
        frame.selected = Key(2);
        for _ in 0..4 {
            let next = selection_movement(&frame, &down, root).unwrap();
            visited.push(next.0);
            frame.selected = next;
        }
        assert_eq!(visited, vec![3, 5, 2, 3]);
    }

    #[test]
    fn test_shift_tab_moves_backwards() {
        let (mut frame, [root, ..]) = tree();
        let mut inputs = pressing(Input::Tab);
        inputs.press(Input::Shift);
        frame.selected = Key(5);
        assert_eq!(selection_movement(&frame, &inputs, root), Some(Key(3)));
        frame.selected = Key(3);
        assert_eq!(selection_movement(&frame, &inputs, root), Some(Key(2)));
        frame.selected = Key(2);
        assert_eq!(selection_movement(&frame, &inputs, root), Some(Key(5)));
    }

    #[test]
    fn test_no_navigation_key_means_no_movement() {
        let (mut frame, [root, ..]) = tree();
        frame.selected = Key(2);
        assert_eq!(selection_movement(&frame, &Inputs::default(), root), None);
    }

    #[test]
    fn test_root_cannot_be_the_origin() {
        let (mut frame, [root, ..]) = tree();
        frame.selected = Key(1);
        assert_eq!(selection_movement(&frame, &pressing(Input::Down), root), None);
    }

    #[test]
    fn test_single_selectable_box_lands_on_itself() {
        let mut frame = Frame::default();
        frame.reset(1);
        let root = frame.alloc(Key(1));
        let only = frame.alloc(Key(2));
        frame.append_child(root, only);
        frame.get_mut(only).flags |= BoxFlags::SELECTABLE;
        frame.selected = Key(2);
        assert_eq!(selection_movement(&frame, &pressing(Input::Down), root), Some(Key(2)));
        assert_eq!(selection_movement(&frame, &pressing(Input::Up), root), Some(Key(2)));
    }
}
