use brisk_core::draw::x_from_column;
use brisk_core::{Backend, Key};
use brisk_text::movement::{self, Direction};
use brisk_text::{request_erase, request_replace_selection, selected_text, EditRequest, Selection, Text};

use crate::context::Ui;
use crate::input::{Input, MouseCursor};
use crate::tree::{BoxFlags, BoxId, Size};

impl<B: Backend> Ui<B> {
    /// Single-line text field.
    ///
    /// The caller owns `text`, `editing` and `selection`. Keyboard input
    /// while editing produces at most one [`EditRequest`] per frame in `out`,
    /// which the caller applies with [`brisk_text::apply_edit`]. Later edit
    /// keys in a frame that already produced a request are ignored.
    #[allow(clippy::too_many_arguments)]
    pub fn edit_text(
        &mut self,
        key: Key,
        w: Size,
        h: Size,
        text: &Text,
        editing: &mut bool,
        selection: &mut Selection,
        out: &mut Option<EditRequest>,
    ) -> BoxId {
        *out = None;
        let outer = self.add_box(key, w, h, BoxFlags::SELECTABLE | BoxFlags::DRAW_BORDER | BoxFlags::CLICKABLE);
        self.push_box(outer);
        let inner = self.add_box_with_text(key.with("text"), Size::fit(), Size::fit(), BoxFlags::empty(), text.as_str());

        let was_editing = *editing;
        if self.pressed(key, Input::MouseLeft) || self.did_begin_selection(key) {
            *editing = true;
        }
        if self.did_end_selection(key) {
            *editing = false;
        }
        if *editing && was_editing && self.inputs.was_pressed(Input::Enter) {
            *editing = false;
        }
        if *editing && self.inputs.was_pressed(Input::Escape) {
            *editing = false;
        }

        if *editing {
            self.widgets.edit_text.editing_frame = self.frame_index();
            self.new.active_edit_text = key;
            self.edit_text_keys(text, was_editing, selection, out);
            self.widgets.edit_text.draw_selection_box = Some(inner);
            self.widgets.edit_text.selection = *selection;
        }

        self.pop_box(outer);

        if self.is_hovered(key) {
            self.outputs.cursor = MouseCursor::IBeam;
        }
        outer
    }

    fn edit_text_keys(&mut self, text: &Text, was_editing: bool, selection: &mut Selection, out: &mut Option<EditRequest>) {
        let font = self.style(self.peek_style()).font;
        let inputs = &self.inputs;
        let ctrl = inputs.is_down(Input::Control);
        let shift = inputs.is_down(Input::Shift);
        let key_hit = |input: Input| inputs.was_pressed_or_repeat(input);

        if !was_editing || (ctrl && key_hit(Input::A)) {
            selection.select_all(text);
        }
        for (input, dir) in [(Input::Right, Direction::Right), (Input::Left, Direction::Left)] {
            if !key_hit(input) {
                continue;
            }
            // Collapsing a selection leaves the remembered x alone.
            let moves_mark = shift || selection.is_empty();
            movement::move_selection_h(selection, text, dir, shift, ctrl);
            if moves_mark {
                let active = selection.active();
                selection.cursor_x = x_from_column(&mut self.glyphs, text.line(active.line), active.col, font);
            }
        }
        if !inputs.text_input.is_empty() && out.is_none() {
            let typed: String = inputs.text_input.iter().collect();
            request_replace_selection(selection, &typed, out);
        }
        if key_hit(Input::Home) {
            movement::home(selection, shift);
        }
        if key_hit(Input::End) {
            movement::end(selection, text, shift);
        }

        let cut = ctrl && key_hit(Input::X);
        let copy = ctrl && key_hit(Input::C);
        let paste = ctrl && key_hit(Input::V);
        let backspace = key_hit(Input::Backspace);
        let delete = key_hit(Input::Delete);

        if (cut || copy) && !selection.is_empty() {
            let copied = selected_text(text, selection).to_owned();
            if let Some(clipboard) = self.clipboard.as_mut() {
                clipboard.set_text(&copied);
            }
            if cut && out.is_none() {
                request_replace_selection(selection, "", out);
            }
        }
        if paste && out.is_none() {
            let pasted = self.clipboard.as_mut().and_then(|c| c.get_text());
            if let Some(pasted) = pasted {
                request_replace_selection(selection, &pasted, out);
            }
        }
        if backspace && out.is_none() {
            request_erase(selection, text, Direction::Left, ctrl, out);
        }
        if delete && out.is_none() {
            request_erase(selection, text, Direction::Right, ctrl, out);
        }
    }
}
