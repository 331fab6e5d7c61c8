use brisk_config::StyleConfig;
use brisk_core::{Color, FontUsage, Vec2};

/// Visual parameters a box is drawn and measured with.
///
/// Styles are cloned onto the frame's style table when pushed and are not
/// changed after a box has been added with them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub font: FontUsage,
    pub text_color: Color,
    pub border_color: Color,
    pub opaque_bg_color: Color,
    pub transparent_bg_color: Color,
    pub text_padding: Vec2,
    pub child_padding: Vec2,
    pub border_width: f32,
    pub rounding: f32,
}

impl Style {
    pub fn from_config(config: &StyleConfig, font: FontUsage) -> Self {
        Self {
            font,
            text_color: Color::from_array(config.text_color),
            border_color: Color::from_array(config.border_color),
            opaque_bg_color: Color::from_array(config.opaque_bg_color),
            transparent_bg_color: Color::from_array(config.transparent_bg_color),
            text_padding: Vec2::from(config.text_padding),
            child_padding: Vec2::from(config.child_padding),
            border_width: config.border_width,
            rounding: config.rounding,
        }
    }
}

/// Index into the current frame's style table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleId(pub(crate) u32);

#[cfg(test)]
mod tests {
    use super::*;
    use brisk_core::FontId;

    #[test]
    fn test_style_from_default_config() {
        let font = FontUsage {
            font: FontId(0),
            size: 18.0,
        };
        let style = Style::from_config(&StyleConfig::default(), font);
        assert_eq!(style.border_color, Color::rgba(0, 0, 0, 128));
        assert_eq!(style.text_padding, Vec2::new(10.0, 5.0));
        assert_eq!(style.child_padding, Vec2::new(12.0, 12.0));
        assert_eq!(style.rounding, 4.0);
    }
}
