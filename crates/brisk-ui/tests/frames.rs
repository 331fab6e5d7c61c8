//! Multi-frame scenarios driven through the public API with the headless
//! backend and the block rasterizer.

use std::cell::RefCell;
use std::rc::Rc;

use brisk_config::BriskConfig;
use brisk_core::draw::{INDEX_BUFFER_ID, VERTEX_BUFFER_ID};
use brisk_core::{key, AtlasId, Backend, BlockRasterizer, BufferId, HeadlessBackend, Key, Rect, TextureId, Vec2};
use brisk_text::{apply_edit, Mark, Selection, Text};
use brisk_core::draw::x_from_column;
use brisk_ui::{ArrangeRequest, BoxFlags, Input, Inputs, MemoryClipboard, Size, Ui};

const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

fn new_ui() -> Ui<HeadlessBackend> {
    Ui::new(HeadlessBackend::new(), &BriskConfig::default(), Box::new(BlockRasterizer))
}

/// Run one frame: `build` declares boxes, then every root is laid out at the
/// origin and drawn.
fn frame<B: Backend>(ui: &mut Ui<B>, inputs: &Inputs, build: impl FnOnce(&mut Ui<B>)) {
    ui.begin_frame(inputs, WINDOW);
    build(ui);
    ui.layout_and_draw_roots(Vec2::ZERO);
    ui.end_frame();
}

fn mouse_at(x: f32, y: f32) -> Inputs {
    Inputs {
        mouse_position: Vec2::new(x, y),
        ..Inputs::default()
    }
}

#[test]
fn test_fixed_box_gets_requested_size() {
    let mut ui = new_ui();
    let k = key!();
    ui.begin_frame(&Inputs::default(), WINDOW);
    let id = ui.add_box(k, Size::px(100.0), Size::px(50.0), BoxFlags::empty());
    ui.compute_rects(id, Vec2::new(10.0, 20.0));
    let b = ui.ui_box(id);
    assert_eq!(b.computed_size, Vec2::new(100.0, 50.0));
    assert_eq!(b.computed_position, Vec2::new(10.0, 20.0));
    ui.draw_box(id);
    ui.end_frame();
}

#[test]
fn test_flex_child_fills_row() {
    let mut ui = new_ui();
    ui.begin_frame(&Inputs::default(), WINDOW);
    let row = ui.add_box(key!(), Size::px(300.0), Size::px(40.0), BoxFlags::LAYOUT_IN_X);
    let (a, b) = ui.with_box(row, |ui| {
        let a = ui.add_box(key!(), Size::px(100.0), Size::flex(1.0), BoxFlags::empty());
        let b = ui.add_box(key!(), Size::flex(1.0), Size::flex(1.0), BoxFlags::empty());
        (a, b)
    });
    ui.compute_rects(row, Vec2::ZERO);
    assert_eq!(ui.ui_box(a).computed_size.x, 100.0);
    assert_eq!(ui.ui_box(b).computed_size.x, 200.0);
    assert_eq!(ui.ui_box(b).computed_position.x, 100.0);
    assert_eq!(ui.children(row).collect::<Vec<_>>(), vec![a, b]);
    ui.end_frame();
}

#[test]
fn test_prev_frame_link_requires_add_box() {
    let mut ui = new_ui();
    let k = key!();
    let inputs = Inputs::default();

    // Only looked up, never added.
    frame(&mut ui, &inputs, |ui| {
        ui.box_from_key(k);
    });
    frame(&mut ui, &inputs, |ui| {
        let id = ui.add_box(k, Size::px(10.0), Size::px(10.0), BoxFlags::empty());
        assert!(ui.prev_frame_box(id).is_none());
    });
    frame(&mut ui, &inputs, |ui| {
        let id = ui.add_box(k, Size::px(10.0), Size::px(10.0), BoxFlags::empty());
        let prev = ui.prev_frame_box(id).expect("added last frame");
        assert_eq!(prev.computed_size, Vec2::new(10.0, 10.0));
    });
}

#[test]
#[should_panic(expected = "already added this frame")]
fn test_duplicate_key_panics() {
    let mut ui = new_ui();
    let k = Key(42);
    ui.begin_frame(&Inputs::default(), WINDOW);
    ui.add_box(k, Size::fit(), Size::fit(), BoxFlags::empty());
    ui.add_box(k, Size::fit(), Size::fit(), BoxFlags::empty());
}

#[test]
#[should_panic(expected = "mismatched push_box/pop_box")]
fn test_unpopped_box_panics_at_end_frame() {
    let mut ui = new_ui();
    ui.begin_frame(&Inputs::default(), WINDOW);
    let id = ui.add_box(key!(), Size::fit(), Size::fit(), BoxFlags::empty());
    ui.push_box(id);
    ui.end_frame();
}

#[test]
fn test_button_click_spans_press_and_release() {
    let mut ui = new_ui();
    let k = key!();
    let button = |ui: &mut Ui<HeadlessBackend>| {
        ui.button(k, Size::px(100.0), Size::px(30.0), "ok");
    };

    let mut inputs = mouse_at(10.0, 10.0);
    frame(&mut ui, &inputs, button);

    inputs.press(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.is_hovered(k));
        assert!(ui.pressed(k, Input::MouseLeft));
        assert!(!ui.clicked(k));
        button(ui);
    });

    inputs.next_frame();
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.is_clicking_down(k));
        button(ui);
    });

    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.clicked(k));
        button(ui);
    });

    inputs.next_frame();
    frame(&mut ui, &inputs, |ui| {
        assert!(!ui.clicked(k));
        assert!(!ui.is_clicking_down(k));
        button(ui);
    });
}

#[test]
fn test_release_outside_still_clicks() {
    let mut ui = new_ui();
    let k = key!();
    let button = |ui: &mut Ui<HeadlessBackend>| {
        ui.button(k, Size::px(100.0), Size::px(30.0), "ok");
    };
    let mut inputs = mouse_at(10.0, 10.0);
    frame(&mut ui, &inputs, button);
    inputs.press(Input::MouseLeft);
    frame(&mut ui, &inputs, button);

    inputs.next_frame();
    inputs.mouse_position = Vec2::new(500.0, 500.0);
    inputs.release(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(!ui.is_hovered(k));
        assert!(ui.clicked(k));
        button(ui);
    });
}

#[test]
fn test_tab_reveals_then_moves_selection() {
    let mut ui = new_ui();
    let (root, a, b) = (Key(1), Key(2), Key(3));
    let build = |ui: &mut Ui<HeadlessBackend>| {
        let id = ui.add_box(root, Size::fit(), Size::fit(), BoxFlags::empty());
        ui.with_box(id, |ui| {
            ui.button(a, Size::px(100.0), Size::px(30.0), "a");
            ui.button(b, Size::px(100.0), Size::px(30.0), "b");
        });
    };

    let mut inputs = mouse_at(10.0, 10.0);
    frame(&mut ui, &inputs, build);

    // Clicking selects, but hides the selection outline.
    inputs.press(Input::MouseLeft);
    frame(&mut ui, &inputs, build);
    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.is_selected(a));
        assert!(!ui.selection_is_visible());
        build(ui);
    });

    inputs.next_frame();
    inputs.press(Input::Tab);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.selection_is_visible());
        build(ui);
    });

    inputs.next_frame();
    inputs.release(Input::Tab);
    inputs.next_frame();
    inputs.press(Input::Tab);
    frame(&mut ui, &inputs, build);

    inputs.next_frame();
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.is_selected(b));
        assert!(ui.did_begin_selection(b));
        build(ui);
    });
}

#[test]
fn test_tab_reveals_lone_selectable_box() {
    let mut ui = new_ui();
    let (root, only) = (Key(1), Key(2));
    let build = |ui: &mut Ui<HeadlessBackend>| {
        let id = ui.add_box(root, Size::fit(), Size::fit(), BoxFlags::empty());
        ui.with_box(id, |ui| {
            ui.button(only, Size::px(100.0), Size::px(30.0), "only");
        });
    };

    let mut inputs = mouse_at(10.0, 10.0);
    frame(&mut ui, &inputs, build);
    inputs.press(Input::MouseLeft);
    frame(&mut ui, &inputs, build);
    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.is_selected(only));
        assert!(!ui.selection_is_visible());
        build(ui);
    });

    inputs.next_frame();
    inputs.press(Input::Tab);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.selection_is_visible());
        build(ui);
    });

    // Further presses keep the selection on the same box.
    inputs.next_frame();
    inputs.release(Input::Tab);
    inputs.next_frame();
    inputs.press(Input::Tab);
    frame(&mut ui, &inputs, build);
    inputs.next_frame();
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.is_selected(only));
        assert!(ui.selection_is_visible());
        build(ui);
    });
}

/// Press, release and press again on a button, with `pause` seconds between
/// the presses and the second press at `second`. Reports whether the second
/// press counted as a double click.
fn second_press_double_clicks(pause: f32, second: Vec2) -> bool {
    let mut ui = new_ui();
    let k = key!();
    let button = |ui: &mut Ui<HeadlessBackend>| {
        ui.button(k, Size::px(100.0), Size::px(30.0), "twice");
    };

    let mut inputs = mouse_at(10.0, 10.0);
    inputs.frame_delta_time = 0.05;
    frame(&mut ui, &inputs, button);

    inputs.press(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(!ui.double_clicked(k));
        button(ui);
    });

    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    inputs.frame_delta_time = pause;
    frame(&mut ui, &inputs, button);

    inputs.next_frame();
    inputs.frame_delta_time = 0.05;
    inputs.mouse_position = second;
    inputs.press(Input::MouseLeft);
    let mut double = false;
    frame(&mut ui, &inputs, |ui| {
        double = ui.double_clicked(k);
        button(ui);
    });
    double
}

#[test]
fn test_double_click_needs_quick_still_presses() {
    assert!(second_press_double_clicks(0.05, Vec2::new(10.0, 10.0)));
    assert!(second_press_double_clicks(0.05, Vec2::new(11.0, 11.0)));
    assert!(!second_press_double_clicks(0.25, Vec2::new(10.0, 10.0)));
    assert!(!second_press_double_clicks(0.05, Vec2::new(13.0, 10.0)));
}

#[test]
fn test_edit_int_drag_changes_value() {
    let mut ui = new_ui();
    let k = key!();
    let mut value = 3_i64;
    let run = |ui: &mut Ui<HeadlessBackend>, inputs: &Inputs, value: &mut i64| {
        frame(ui, inputs, |ui| {
            ui.edit_int(k, Size::px(120.0), Size::px(30.0), value);
        });
    };

    let mut inputs = mouse_at(20.0, 10.0);
    run(&mut ui, &inputs, &mut value);
    inputs.press(Input::MouseLeft);
    run(&mut ui, &inputs, &mut value);

    inputs.next_frame();
    inputs.mouse_raw_delta = Vec2::new(40.0, 0.0);
    inputs.mouse_position.x += 40.0;
    run(&mut ui, &inputs, &mut value);
    assert!(ui.outputs().lock_and_hide_cursor);

    // 40 px of travel at 0.05 per pixel.
    inputs.next_frame();
    run(&mut ui, &inputs, &mut value);
    assert_eq!(value, 5);

    // Releasing after a drag does not open the text field.
    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    run(&mut ui, &inputs, &mut value);
    inputs.next_frame();
    run(&mut ui, &inputs, &mut value);
    assert_eq!(value, 5);
    assert!(!ui.is_edit_text_active(k));
}

#[test]
fn test_arranger_drag_reorders_on_release() {
    let mut ui = new_ui();
    let set = key!();
    let rows = [Key(100), Key(101), Key(102)];
    let handles = [Key(200), Key(201), Key(202)];

    let run = |ui: &mut Ui<HeadlessBackend>, inputs: &Inputs| {
        let mut request = None;
        let mut offsets = [0.0; 3];
        frame(ui, inputs, |ui| {
            let id = ui.push_arranger_set(set, Size::px(200.0), Size::fit());
            let mut row_ids = Vec::new();
            for i in 0..3 {
                let row = ui.add_box(rows[i], Size::px(200.0), Size::px(30.0), BoxFlags::LAYOUT_IN_X);
                ui.with_box(row, |ui| ui.arranger(handles[i], Size::px(20.0), Size::px(30.0)));
                row_ids.push(row);
            }
            request = ui.pop_arranger_set(id);
            for (offset, row) in offsets.iter_mut().zip(row_ids) {
                *offset = ui.ui_box(row).offset.y;
            }
        });
        (request, offsets)
    };

    // Grab the first row's handle.
    let mut inputs = mouse_at(5.0, 15.0);
    assert_eq!(run(&mut ui, &inputs), (None, [0.0, 30.0, 60.0]));
    inputs.press(Input::MouseLeft);
    assert_eq!(run(&mut ui, &inputs).0, None);

    // Drag it over the third row: the dragged row follows the mouse, the
    // others start sliding up into the freed slot.
    inputs.next_frame();
    inputs.mouse_position.y = 75.0;
    let (request, [dragged, second, third]) = run(&mut ui, &inputs);
    assert_eq!(request, None);
    assert_eq!(dragged, 60.0);
    assert!((second - 24.0).abs() < 1e-4);
    assert!((third - 54.0).abs() < 1e-4);

    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    let (request, _) = run(&mut ui, &inputs);
    assert_eq!(request, Some(ArrangeRequest { from: 0, to: 2 }));
}

#[test]
fn test_no_scissor_box_draws_overflowing_text() {
    let glyphs_past = |flags: BoxFlags| {
        let mut ui = new_ui();
        frame(&mut ui, &Inputs::default(), |ui| {
            ui.add_box_with_text(key!(), Size::px(10.0), Size::fit(), flags, "overflowing text");
        });
        let (draw, _) = ui.draw_context();
        draw.vertices().iter().filter(|v| v.position.x > 10.0).count()
    };
    assert_eq!(glyphs_past(BoxFlags::empty()), 0);
    assert!(glyphs_past(BoxFlags::NO_SCISSOR) > 0);
}

#[test]
fn test_arrow_keys_remember_caret_x() {
    let mut ui = new_ui();
    let k = key!();
    let text = Text::new("abc");
    let mut editing = false;
    let mut selection = Selection::default();
    let mut run = |ui: &mut Ui<HeadlessBackend>, inputs: &Inputs, selection: &mut Selection| {
        let mut request = None;
        frame(ui, inputs, |ui| {
            ui.edit_text(k, Size::px(200.0), Size::px(30.0), &text, &mut editing, selection, &mut request);
        });
        assert!(request.is_none());
    };

    let mut inputs = mouse_at(20.0, 10.0);
    run(&mut ui, &inputs, &mut selection);
    inputs.press(Input::MouseLeft);
    run(&mut ui, &inputs, &mut selection);

    // Right only collapses the full selection, Left then moves the caret.
    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    inputs.press(Input::Right);
    run(&mut ui, &inputs, &mut selection);
    assert_eq!(selection.active(), Mark::new(0, 3));
    assert_eq!(selection.cursor_x, 0.0);

    inputs.next_frame();
    inputs.release(Input::Right);
    inputs.press(Input::Left);
    run(&mut ui, &inputs, &mut selection);
    assert_eq!(selection.active(), Mark::new(0, 2));
    let font = ui.base_font();
    let (_, glyphs) = ui.draw_context();
    let expected = x_from_column(glyphs, "abc", 2, font);
    assert!(expected > 0.0);
    assert_eq!(selection.cursor_x, expected);
}

#[test]
fn test_typing_replaces_selected_text() {
    let mut ui = new_ui();
    ui.set_clipboard(Box::new(MemoryClipboard::default()));
    let k = key!();
    let mut text = Text::new("abc");
    let mut editing = false;
    let mut selection = Selection::default();

    let mut inputs = mouse_at(20.0, 10.0);
    for step in 0..3 {
        match step {
            1 => inputs.press(Input::MouseLeft),
            2 => {
                inputs.next_frame();
                inputs.release(Input::MouseLeft);
                inputs.text_input.push('x');
            }
            _ => {}
        }
        let mut request = None;
        frame(&mut ui, &inputs, |ui| {
            ui.edit_text(k, Size::px(200.0), Size::px(30.0), &text, &mut editing, &mut selection, &mut request);
        });
        apply_edit(&mut text, request.as_ref());
        if step == 1 {
            assert!(editing);
            assert_eq!(selection, Selection::all(&text));
            assert!(request.is_none());
        }
    }

    assert_eq!(text.as_str(), "x");
    assert_eq!(selection.active(), Mark::new(0, 1));
    assert!(selection.is_empty());
}

#[test]
fn test_only_first_edit_key_in_a_frame_applies() {
    let mut ui = new_ui();
    let k = key!();
    let mut text = Text::new("abc");
    let mut editing = false;
    let mut selection = Selection::default();

    let mut inputs = mouse_at(20.0, 10.0);
    for step in 0..3 {
        match step {
            1 => inputs.press(Input::MouseLeft),
            2 => {
                // Typing and Backspace land in the same frame.
                inputs.next_frame();
                inputs.release(Input::MouseLeft);
                inputs.text_input.push('x');
                inputs.press(Input::Backspace);
            }
            _ => {}
        }
        let mut request = None;
        frame(&mut ui, &inputs, |ui| {
            ui.edit_text(k, Size::px(200.0), Size::px(30.0), &text, &mut editing, &mut selection, &mut request);
        });
        apply_edit(&mut text, request.as_ref());
    }

    assert_eq!(text.as_str(), "x");
    assert_eq!(selection.active(), Mark::new(0, 1));
}

#[test]
fn test_copy_paste_through_clipboard() {
    let mut ui = new_ui();
    ui.set_clipboard(Box::new(MemoryClipboard::default()));
    let k = key!();
    let mut text = Text::new("hello");
    let mut editing = false;
    let mut selection = Selection::default();

    let mut run = |ui: &mut Ui<HeadlessBackend>, inputs: &Inputs, text: &mut Text| {
        let mut request = None;
        frame(ui, inputs, |ui| {
            ui.edit_text(k, Size::px(200.0), Size::px(30.0), text, &mut editing, &mut selection, &mut request);
        });
        apply_edit(text, request.as_ref());
    };

    let mut inputs = mouse_at(20.0, 10.0);
    run(&mut ui, &inputs, &mut text);
    inputs.press(Input::MouseLeft);
    run(&mut ui, &inputs, &mut text);

    // Everything is selected after activation; copy, move to the end, paste.
    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    inputs.press(Input::Control);
    inputs.press(Input::C);
    run(&mut ui, &inputs, &mut text);

    inputs.next_frame();
    inputs.release(Input::C);
    inputs.press(Input::End);
    run(&mut ui, &inputs, &mut text);

    inputs.next_frame();
    inputs.release(Input::End);
    inputs.press(Input::V);
    run(&mut ui, &inputs, &mut text);

    assert_eq!(text.as_str(), "hellohello");
}

#[test]
fn test_scroll_wheel_offset_is_clamped() {
    let mut ui = new_ui();
    let k = key!();
    let build = |ui: &mut Ui<HeadlessBackend>| {
        let content = ui.push_scroll_area(k, Size::px(100.0), Size::px(100.0), BoxFlags::empty(), false, false);
        for i in 0..10u32 {
            ui.add_box(key!(i), Size::px(50.0), Size::px(40.0), BoxFlags::empty());
        }
        ui.pop_scroll_area(content);
        content
    };

    let mut inputs = mouse_at(50.0, 50.0);
    frame(&mut ui, &inputs, |ui| {
        let content = build(ui);
        assert_eq!(ui.ui_box(content).offset, Vec2::ZERO);
    });

    inputs.mouse_wheel_delta = -100.0;
    ui.begin_frame(&inputs, WINDOW);
    let content = build(&mut ui);
    // 400px of content in a 100px view
    assert_eq!(ui.ui_box(content).offset.y, -300.0);
    assert_eq!(ui.ui_box(content).offset.x, 0.0);
    ui.layout_and_draw_roots(Vec2::ZERO);
    ui.end_frame();

    inputs.mouse_wheel_delta = 1.0;
    ui.begin_frame(&inputs, WINDOW);
    let content = build(&mut ui);
    assert_eq!(ui.ui_box(content).offset.y, -270.0);
    ui.layout_and_draw_roots(Vec2::ZERO);
    ui.end_frame();
}

#[test]
fn test_checkbox_toggles_on_click() {
    let mut ui = new_ui();
    let k = key!();
    let mut value = false;
    let mut inputs = mouse_at(15.0, 15.0);

    frame(&mut ui, &inputs, |ui| {
        assert!(!ui.checkbox(k, &mut value));
    });
    inputs.press(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        ui.checkbox(k, &mut value);
    });
    inputs.next_frame();
    inputs.release(Input::MouseLeft);
    frame(&mut ui, &inputs, |ui| {
        assert!(ui.checkbox(k, &mut value));
    });
    assert!(value);
}

#[test]
fn test_collapsing_opens_on_press() {
    let mut ui = new_ui();
    let k = key!();
    let mut opened = Vec::new();
    let mut inputs = mouse_at(5.0, 5.0);

    for step in 0..3 {
        if step == 1 {
            inputs.press(Input::MouseLeft);
        } else if step == 2 {
            inputs.next_frame();
            inputs.release(Input::MouseLeft);
        }
        frame(&mut ui, &inputs, |ui| {
            let child = ui.push_collapsing(k, Size::fit(), Size::px(24.0), "section");
            opened.push(child.is_some());
            if let Some(child) = child {
                ui.add_box_with_text(key!(), Size::fit(), Size::fit(), BoxFlags::empty(), "body");
                ui.pop_collapsing(child);
            }
        });
    }
    assert_eq!(opened, vec![false, true, true]);
}

#[test]
fn test_end_frame_uploads_buffers() {
    let mut ui = new_ui();
    frame(&mut ui, &Inputs::default(), |ui| {
        ui.button(key!(), Size::fit(), Size::fit(), "upload");
    });

    let backend = ui.backend();
    let vertices = backend.buffer(VERTEX_BUFFER_ID).expect("vertex buffer");
    let indices = backend.buffer(INDEX_BUFFER_ID).expect("index buffer");
    assert!(!vertices.bytes.is_empty());
    assert!(!indices.bytes.is_empty());
    assert!(backend.atlas(AtlasId(0)).expect("atlas").uploads >= 1);
    assert!(!ui.outputs().draw_calls.is_empty());
}

/// Forwards to a shared headless backend so the test can look at it after
/// the context is dropped.
struct Shared(Rc<RefCell<HeadlessBackend>>);

impl Backend for Shared {
    fn create_vertex_buffer(&mut self, id: BufferId, size_bytes: usize) {
        self.0.borrow_mut().create_vertex_buffer(id, size_bytes);
    }
    fn create_index_buffer(&mut self, id: BufferId, size_bytes: usize) {
        self.0.borrow_mut().create_index_buffer(id, size_bytes);
    }
    fn destroy_buffer(&mut self, id: BufferId) {
        self.0.borrow_mut().destroy_buffer(id);
    }
    fn create_atlas(&mut self, id: AtlasId, width: u32, height: u32) -> TextureId {
        self.0.borrow_mut().create_atlas(id, width, height)
    }
    fn destroy_atlas(&mut self, id: AtlasId) {
        self.0.borrow_mut().destroy_atlas(id);
    }
    fn write_buffer(&mut self, id: BufferId, bytes: &[u8]) {
        self.0.borrow_mut().write_buffer(id, bytes);
    }
    fn write_atlas(&mut self, id: AtlasId, pixels: &[u32], dirty: Rect) {
        self.0.borrow_mut().write_atlas(id, pixels, dirty);
    }
}

#[test]
fn test_drop_releases_backend_resources() {
    let shared = Rc::new(RefCell::new(HeadlessBackend::new()));
    let ui = Ui::new(Shared(shared.clone()), &BriskConfig::default(), Box::new(BlockRasterizer));
    assert_eq!(shared.borrow().live_buffers(), 2);
    assert_eq!(shared.borrow().live_atlases(), 1);
    drop(ui);
    assert_eq!(shared.borrow().live_buffers(), 0);
    assert_eq!(shared.borrow().live_atlases(), 0);
}
