//! brisk-ui: an immediate-mode UI built from keyed boxes.
//!
//! Every frame the host declares a tree of boxes with [`Ui::add_box`] and
//! the stock widgets. Boxes are matched to last frame's boxes by [`Key`], and
//! all interaction (hover, press, click, keyboard selection) is answered
//! from that previous frame's layout. Layout runs per root with
//! [`Ui::compute_rects`], drawing with [`Ui::draw_box`], and
//! [`Ui::end_frame`] hands the vertex, index and atlas data to the
//! [`Backend`](brisk_core::Backend).
//!
//! [`Key`]: brisk_core::Key

mod clipboard;
mod context;
mod draw;
mod input;
mod interaction;
mod layout;
mod navigation;
mod style;
mod tree;
mod widgets;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, MemoryClipboard};
pub use context::{Icon, Ui};
pub use input::{Input, InputState, Inputs, MouseCursor, Outputs};
pub use style::{Style, StyleId};
pub use tree::{BoxExt, BoxFlags, BoxId, Data, Size, UiBox};
pub use widgets::ArrangeRequest;
