use brisk_core::{Backend, Key, Vec2};

use crate::context::{Icon, Ui};
use crate::tree::{BoxFlags, BoxId, Size};

impl<B: Backend> Ui<B> {
    /// Clickable text box. Test [`Ui::clicked`] with `key` for activation.
    pub fn button(&mut self, key: Key, w: Size, h: Size, text: &str) -> BoxId {
        let flags = BoxFlags::CLICKABLE
            | BoxFlags::SELECTABLE
            | BoxFlags::DRAW_BORDER
            | BoxFlags::DRAW_TRANSPARENT_BACKGROUND;
        self.add_box_with_text(key, w, h, flags, text)
    }

    /// Button with a trailing down-arrow, for opening a popup.
    pub fn dropdown_button(&mut self, key: Key, w: Size, h: Size, text: &str) -> BoxId {
        let flags = BoxFlags::LAYOUT_IN_X
            | BoxFlags::CLICKABLE
            | BoxFlags::SELECTABLE
            | BoxFlags::DRAW_BORDER
            | BoxFlags::DRAW_TRANSPARENT_BACKGROUND;
        let id = self.add_box(key, w, h, flags);
        self.with_box(id, |ui| {
            ui.add_box_with_text(key.with("label"), Size::flex(1.0), Size::fit(), BoxFlags::empty(), text);
            let (font, glyph) = ui.icon(Icon::ArrowDown);
            let icon = ui.add_box_with_text(key.with("icon"), Size::fit(), Size::fit(), BoxFlags::empty(), glyph);
            let style = ui.make_style();
            ui.style_mut(style).font = font;
            ui.ui_box_mut(icon).style = style;
        });
        id
    }

    /// Square toggle sized to a line of text. Returns true on the frame the
    /// value flips.
    pub fn checkbox(&mut self, key: Key, value: &mut bool) -> bool {
        let style = *self.style(self.peek_style());
        let h = style.font.size + 2.0 * style.text_padding.y;

        let outer = self.with_style(
            |s| s.child_padding = Vec2::new(5.0, 5.0),
            |ui| ui.add_box(key.with("frame"), Size::px(h), Size::px(h), BoxFlags::CHILD_PADDING),
        );

        let inner_key = key.with("check");
        let (icon_font, glyph) = self.icon(Icon::Check);
        let checked = *value;
        self.with_box(outer, |ui| {
            ui.with_style(
                |s| {
                    s.text_padding = Vec2::new(5.0, 2.0);
                    s.font = icon_font;
                },
                |ui| {
                    let flags = BoxFlags::CLICKABLE | BoxFlags::SELECTABLE | BoxFlags::DRAW_BORDER;
                    if checked {
                        ui.add_box_with_text(inner_key, Size::flex(1.0), Size::flex(1.0), flags, glyph);
                    } else {
                        ui.add_box(inner_key, Size::flex(1.0), Size::flex(1.0), flags);
                    }
                },
            );
        });

        let clicked = self.clicked(inner_key);
        if clicked {
            *value = !*value;
        }
        clicked
    }

    /// Header that toggles a bordered child area below it.
    ///
    /// When open, the child area is pushed and returned; close it with
    /// [`Ui::pop_collapsing`]. The open state is whether the child area
    /// existed last frame.
    pub fn push_collapsing(&mut self, key: Key, w: Size, h: Size, text: &str) -> Option<BoxId> {
        let child_key = key.with("content");
        let flags = BoxFlags::LAYOUT_IN_X
            | BoxFlags::CLICKABLE
            | BoxFlags::SELECTABLE
            | BoxFlags::DRAW_BORDER
            | BoxFlags::DRAW_TRANSPARENT_BACKGROUND;
        let header = self.add_box(key, Size::flex(1.0), h, flags);

        let child = self.box_from_key(child_key);
        let mut is_open = self.ui_box(child).has_prev_frame();
        if self.pressed(key, crate::input::Input::MouseLeft) {
            is_open = !is_open;
        }

        let arrow = if is_open { Icon::ArrowDown } else { Icon::ArrowRight };
        let (icon_font, glyph) = self.icon(arrow);
        self.with_box(header, |ui| {
            ui.with_style(
                |s| s.font = icon_font,
                |ui| ui.add_box_with_text(key.with("arrow"), Size::px(20.0), h, BoxFlags::empty(), glyph),
            );
            ui.add_box_with_text(key.with("label"), w, h, BoxFlags::empty(), text);
        });

        if !is_open {
            return None;
        }
        let child = self.add_box(child_key, Size::flex(1.0), Size::fit(), BoxFlags::DRAW_BORDER);
        self.push_box(child);
        Some(child)
    }

    pub fn pop_collapsing(&mut self, child: BoxId) {
        self.pop_box(child);
    }
}
