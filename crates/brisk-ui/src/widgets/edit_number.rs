use brisk_core::{Backend, Key};
use brisk_text::apply_edit;

use crate::context::Ui;
use crate::input::{Input, MouseCursor};
use crate::tree::{BoxFlags, Size};

/// Pixels of horizontal travel after which a press counts as a drag.
const DRAG_THRESHOLD: f32 = 2.0;
/// Value change per pixel of drag.
const DRAG_SPEED: f64 = 0.05;

enum Number<'a> {
    Int(&'a mut i64),
    Float(&'a mut f64),
}

impl Number<'_> {
    fn bits(&self) -> u64 {
        match self {
            Number::Int(v) => **v as u64,
            Number::Float(v) => v.to_bits(),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Number::Int(v) => **v as f64,
            Number::Float(v) => **v,
        }
    }

    fn set_f64(&mut self, value: f64) {
        match self {
            Number::Int(v) => **v = value as i64,
            Number::Float(v) => **v = value,
        }
    }

    fn to_text(&self) -> String {
        match self {
            Number::Int(v) => v.to_string(),
            Number::Float(v) => format_float(**v),
        }
    }

    /// Keep the old value when `s` does not parse.
    fn parse_from(&mut self, s: &str) {
        let s = s.trim();
        match self {
            Number::Int(v) => {
                if let Ok(parsed) = s.parse() {
                    **v = parsed;
                }
            }
            Number::Float(v) => {
                if let Ok(parsed) = s.parse() {
                    **v = parsed;
                }
            }
        }
    }
}

/// Shortest round-trip form, but with at least one decimal.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

impl<B: Backend> Ui<B> {
    /// Integer field: drag horizontally to change, click or Enter to type.
    /// Returns true when the value changed this frame.
    pub fn edit_int(&mut self, key: Key, w: Size, h: Size, value: &mut i64) -> bool {
        self.edit_number(key, w, h, Number::Int(value))
    }

    pub fn edit_float(&mut self, key: Key, w: Size, h: Size, value: &mut f32) -> bool {
        let mut wide = *value as f64;
        let edited = self.edit_number(key, w, h, Number::Float(&mut wide));
        *value = wide as f32;
        edited
    }

    pub fn edit_double(&mut self, key: Key, w: Size, h: Size, value: &mut f64) -> bool {
        self.edit_number(key, w, h, Number::Float(value))
    }

    fn edit_number(&mut self, key: Key, w: Size, h: Size, mut value: Number<'_>) -> bool {
        let before = value.bits();
        let dragging = self.is_clicking_down(key) && self.inputs.is_down(Input::MouseLeft);
        let moved = self.mouse_travel_distance_after_press.x.abs() >= DRAG_THRESHOLD;
        let value_text = value.to_text();

        let by_enter = self.pressed(key, Input::MouseLeft) && self.inputs.was_pressed(Input::Enter);
        let by_click = self.clicked(key) && !moved && self.inputs.was_released(Input::MouseLeft);
        let by_navigation = self.did_begin_selection(key) && !self.inputs.is_down(Input::MouseLeft);
        let activate = by_enter || by_click || by_navigation;

        let fresh = activate && self.widgets.edit_number.editing != key;
        if fresh {
            let state = &mut self.widgets.edit_number;
            state.editing = key;
            state.text.set(&value_text);
            state.selection.select_all(&state.text);
        }

        if self.widgets.edit_number.editing == key {
            let mut text = std::mem::take(&mut self.widgets.edit_number.text);
            let mut selection = self.widgets.edit_number.selection;
            let mut editing = true;
            let mut request = None;
            self.edit_text(key, w, h, &text, &mut editing, &mut selection, &mut request);
            apply_edit(&mut text, request.as_ref());
            value.parse_from(text.as_str());

            let state = &mut self.widgets.edit_number;
            state.text = text;
            state.selection = selection;
            if !fresh && !editing {
                state.editing = Key::INVALID;
            }
        } else {
            let flags = BoxFlags::CLICKABLE
                | BoxFlags::SELECTABLE
                | BoxFlags::DRAW_BORDER
                | BoxFlags::PRESSING_STAYS_WITHOUT_HOVER;
            self.add_box_with_text(key, w, h, flags, &value_text);

            if self.pressed(key, Input::MouseLeft) {
                self.widgets.edit_number.value_before_press = value.as_f64();
            }
            if self.is_hovered(key) {
                self.outputs.cursor = MouseCursor::ResizeH;
            }
            if dragging {
                self.outputs.lock_and_hide_cursor = true;
                let travel = self.mouse_travel_distance_after_press.x as f64;
                value.set_f64(self.widgets.edit_number.value_before_press + travel * DRAG_SPEED);
            }
        }

        value.bits() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_keeps_a_decimal() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(-0.25), "-0.25");
        assert_eq!(format_float(0.1), "0.1");
    }

    #[test]
    fn test_parse_failure_keeps_value() {
        let mut v = 7i64;
        let mut n = Number::Int(&mut v);
        n.parse_from("12a");
        assert_eq!(n.bits(), 7);
        n.parse_from(" 42 ");
        assert_eq!(v, 42);
    }

    #[test]
    fn test_drag_value_truncates_for_ints() {
        let mut v = 0i64;
        let mut n = Number::Int(&mut v);
        n.set_f64(2.0 + 31.0 * DRAG_SPEED);
        assert_eq!(v, 3);
    }
}
