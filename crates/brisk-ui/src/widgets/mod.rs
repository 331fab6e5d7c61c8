//! Stock widgets built from boxes.
//!
//! Each widget is a handful of `add_box` calls plus interaction queries; the
//! state a widget needs across frames lives either in the previous frame's
//! boxes or in [`WidgetState`].

mod arranger;
mod button;
mod edit_number;
mod edit_text;
mod hue_circle;
mod scroll_area;
mod splitters;

pub use arranger::ArrangeRequest;

use brisk_core::Key;
use brisk_text::{Selection, Text};

use crate::tree::BoxId;

/// Scratch state shared by the stock widgets. Only one widget of each kind
/// can be interacted with at a time, so one slot per kind is enough.
#[derive(Default)]
pub(crate) struct WidgetState {
    pub scrollbar_origin_before_press: f32,
    pub splitters: SplitterState,
    pub edit_number: EditNumberState,
    pub edit_text: EditTextDrawState,
}

#[derive(Default)]
pub(crate) struct SplitterState {
    pub holding_key: Key,
    pub holding_index: usize,
}

#[derive(Default)]
pub(crate) struct EditNumberState {
    /// The number field currently turned into a text edit.
    pub editing: Key,
    pub text: Text,
    pub selection: Selection,
    pub value_before_press: f64,
}

/// What the box painter needs to draw the active text edit's selection.
#[derive(Default)]
pub(crate) struct EditTextDrawState {
    pub editing_frame: u64,
    pub draw_selection_box: Option<BoxId>,
    pub selection: Selection,
}
