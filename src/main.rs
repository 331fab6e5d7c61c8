//! Headless brisk demo: builds a small widget panel for a few frames against
//! the in-memory backend and logs what each frame produced.

use anyhow::{Context, Result};
use brisk_config::BriskConfig;
use brisk_core::{
    key, Axis, BlockRasterizer, FontdueRasterizer, GlyphRasterizer, HeadlessBackend, Rect, Vec2,
};
use brisk_text::{apply_edit, Selection, Text};
use brisk_ui::{BoxFlags, Input, Inputs, Size, Ui};
use tracing_subscriber::EnvFilter;

const WINDOW: Vec2 = Vec2::new(1280.0, 720.0);

/// Application state the panel edits.
struct Panel {
    clicks: u32,
    enabled: bool,
    count: i64,
    scale: f32,
    name: Text,
    name_editing: bool,
    name_selection: Selection,
    columns: [f32; 3],
    rows: Vec<String>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            clicks: 0,
            enabled: true,
            count: 3,
            scale: 1.0,
            name: Text::new("brisk"),
            name_editing: false,
            name_selection: Selection::default(),
            columns: [1.0, 2.0, 3.0],
            rows: (1..=12).map(|i| format!("row {i}")).collect(),
        }
    }
}

impl Panel {
    fn build(&mut self, ui: &mut Ui<HeadlessBackend>) {
        let window = ui.add_box(
            key!(),
            Size::px(420.0),
            Size::fit(),
            BoxFlags::DRAW_OPAQUE_BACKGROUND | BoxFlags::DRAW_BORDER | BoxFlags::CHILD_PADDING,
        );
        ui.push_box(window);

        let button = key!();
        ui.button(button, Size::fit(), Size::fit(), &format!("clicked {} times", self.clicks));
        if ui.clicked(button) {
            self.clicks += 1;
        }

        ui.checkbox(key!(), &mut self.enabled);
        ui.edit_int(key!(), Size::px(120.0), Size::fit(), &mut self.count);
        ui.edit_float(key!(), Size::px(120.0), Size::fit(), &mut self.scale);

        let mut request = None;
        ui.edit_text(
            key!(),
            Size::px(200.0),
            Size::fit(),
            &self.name,
            &mut self.name_editing,
            &mut self.name_selection,
            &mut request,
        );
        apply_edit(&mut self.name, request.as_ref());

        if let Some(section) = ui.push_collapsing(key!(), Size::fit(), Size::px(28.0), "rows") {
            let content = ui.push_scroll_area(key!(), Size::flex(1.0), Size::px(160.0), BoxFlags::empty(), false, false);
            for (i, row) in self.rows.iter().enumerate() {
                ui.add_box_with_text(key!(i), Size::fit(), Size::fit(), BoxFlags::empty(), row);
            }
            ui.pop_scroll_area(content);
            ui.pop_collapsing(section);
        }

        ui.pop_box(window);

        let area = Rect::from_min_size(Vec2::new(440.0, 0.0), Vec2::new(800.0, 40.0));
        ui.splitters(key!(), area, Axis::X, &mut self.columns, 80.0);
    }
}

fn load_font(config: &BriskConfig) -> Result<Box<dyn GlyphRasterizer>> {
    match &config.demo.font {
        Some(path) => {
            let font = FontdueRasterizer::from_file(path)
                .with_context(|| format!("loading font {}", path.display()))?;
            Ok(Box::new(font))
        }
        None => {
            tracing::info!("no font configured, using block glyphs");
            Ok(Box::new(BlockRasterizer))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BriskConfig::load();
    let font = load_font(&config)?;
    let mut ui = Ui::new(HeadlessBackend::new(), &config, font);
    let mut panel = Panel::default();

    // Hover the button, then click it on the second and third frames.
    let mut inputs = Inputs {
        mouse_position: Vec2::new(30.0, 25.0),
        frame_delta_time: 1.0 / 60.0,
        ..Inputs::default()
    };
    for frame in 0..config.demo.frames {
        match frame {
            1 => inputs.press(Input::MouseLeft),
            2 => inputs.release(Input::MouseLeft),
            _ => {}
        }

        ui.begin_frame(&inputs, WINDOW);
        panel.build(&mut ui);
        ui.layout_and_draw_roots(Vec2::ZERO);
        let outputs = ui.end_frame();

        tracing::info!(
            frame,
            draw_calls = outputs.draw_calls.len(),
            cursor = ?outputs.cursor,
            clicks = panel.clicks,
            "frame built"
        );
        inputs.next_frame();
    }

    tracing::info!(
        clicks = panel.clicks,
        name = panel.name.as_str(),
        columns = ?panel.columns,
        "demo finished"
    );
    Ok(())
}
