use bytemuck::{Pod, Zeroable};
use palette::{FromColor, Hsv, Srgb};

/// 8-bit sRGB color with straight alpha, laid out to sit directly in a vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Blend component-wise in 8-bit space, `t` in 0..=1.
    pub fn lerp(self, to: Color, t: f32) -> Color {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8;
        Color::rgba(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b), mix(self.a, to.a))
    }

    /// Build from hue, saturation, value and alpha, all in 0..=1.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32, alpha: f32) -> Color {
        let hsv: Hsv = Hsv::new(hue.rem_euclid(1.0) * 360.0, saturation, value);
        let rgb: Srgb = Srgb::from_color(hsv);
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Color::rgba(to_u8(rgb.red), to_u8(rgb.green), to_u8(rgb.blue), to_u8(alpha))
    }

    /// Hue, saturation and value in 0..=1. Achromatic colors report hue 0.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let rgb: Srgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let hsv: Hsv = Hsv::from_color(rgb);
        let hue = hsv.hue.into_positive_degrees() / 360.0;
        (hue.rem_euclid(1.0), hsv.saturation, hsv.value)
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Color::from_array(c)
    }
}

// Named colors.
pub const LIGHTGRAY: Color = Color::rgba(200, 200, 200, 255);
pub const GRAY: Color = Color::rgba(130, 130, 130, 255);
pub const DARKGRAY: Color = Color::rgba(80, 80, 80, 255);
pub const YELLOW: Color = Color::rgba(253, 249, 0, 255);
pub const GOLD: Color = Color::rgba(255, 203, 0, 255);
pub const ORANGE: Color = Color::rgba(255, 161, 0, 255);
pub const PINK: Color = Color::rgba(255, 109, 194, 255);
pub const RED: Color = Color::rgba(230, 41, 55, 255);
pub const MAROON: Color = Color::rgba(190, 33, 55, 255);
pub const GREEN: Color = Color::rgba(0, 228, 48, 255);
pub const LIME: Color = Color::rgba(0, 158, 47, 255);
pub const DARKGREEN: Color = Color::rgba(0, 117, 44, 255);
pub const SKYBLUE: Color = Color::rgba(102, 191, 255, 255);
pub const BLUE: Color = Color::rgba(0, 121, 241, 255);
pub const DARKBLUE: Color = Color::rgba(0, 82, 172, 255);
pub const PURPLE: Color = Color::rgba(200, 122, 255, 255);
pub const VIOLET: Color = Color::rgba(135, 60, 190, 255);
pub const DARKPURPLE: Color = Color::rgba(112, 31, 126, 255);
pub const BEIGE: Color = Color::rgba(211, 176, 131, 255);
pub const BROWN: Color = Color::rgba(127, 106, 79, 255);
pub const DARKBROWN: Color = Color::rgba(76, 63, 47, 255);
pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
pub const BLANK: Color = Color::rgba(0, 0, 0, 0);
pub const MAGENTA: Color = Color::rgba(255, 0, 255, 255);
