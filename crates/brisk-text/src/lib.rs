//! Text buffers, caret marks and edit requests for brisk's text fields.
//!
//! Widgets never mutate a [`Text`] directly. They produce at most one
//! [`EditRequest`] per frame and the host applies it, which keeps ownership
//! of the buffer with the application.

mod edit;
mod mark;
pub mod movement;
mod text;

pub use edit::{apply_edit, request_erase, request_replace_selection, selected_text, EditRequest};
pub use mark::{Mark, Selection};
pub use movement::Direction;
pub use text::Text;
