use crate::mark::{Mark, Selection};
use crate::movement::{move_mark_h, Direction};
use crate::text::Text;

/// A pending replacement produced by an edit widget for the host to apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditRequest {
    pub replace_from: Mark,
    pub replace_to: Mark,
    pub replace_with: String,
}

impl EditRequest {
    /// Apply this request to `text`, returning the mark after the inserted text.
    pub fn apply(&self, text: &mut Text) -> Mark {
        tracing::trace!(
            from_line = self.replace_from.line,
            from_col = self.replace_from.col,
            to_line = self.replace_to.line,
            to_col = self.replace_to.col,
            bytes = self.replace_with.len(),
            "applying edit request"
        );
        text.replace(self.replace_from, self.replace_to, &self.replace_with)
    }
}

/// Apply an optional request; `None` leaves `text` untouched.
pub fn apply_edit(text: &mut Text, request: Option<&EditRequest>) -> Option<Mark> {
    request.map(|r| r.apply(text))
}

/// Request replacing the selected range with `with`, and move the selection
/// to a caret at the end of the inserted text.
///
/// Only one request can be issued per frame; panics when `out` is already set.
pub fn request_replace_selection(sel: &mut Selection, with: &str, out: &mut Option<EditRequest>) {
    assert!(out.is_none(), "only one edit request may be issued per frame");
    sel.fix_order();
    let from = sel.range[0];
    *out = Some(EditRequest {
        replace_from: from,
        replace_to: sel.range[1],
        replace_with: with.to_owned(),
    });

    let mut lines = with.split('\n');
    let last = lines.next_back().unwrap_or("");
    let extra_lines = lines.count();
    let col = last.chars().count();
    let caret = if extra_lines == 0 {
        Mark::new(from.line, from.col + col)
    } else {
        Mark::new(from.line + extra_lines, col)
    };
    sel.collapse_to(caret);
}

/// Backspace (`Direction::Left`) or delete (`Direction::Right`): an empty
/// selection is first widened by one step, then the range is erased.
pub fn request_erase(sel: &mut Selection, text: &Text, dir: Direction, by_word: bool, out: &mut Option<EditRequest>) {
    if sel.is_empty() {
        match dir {
            Direction::Left => move_mark_h(&mut sel.range[0], text, dir, by_word),
            Direction::Right => move_mark_h(&mut sel.range[1], text, dir, by_word),
        }
    }
    request_replace_selection(sel, "", out);
}

/// The currently selected text.
pub fn selected_text<'a>(text: &'a Text, sel: &Selection) -> &'a str {
    text.slice(sel.range[0], sel.range[1])
}
