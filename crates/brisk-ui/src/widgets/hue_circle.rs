use std::f32::consts::{PI, TAU};

use brisk_core::{Backend, Key, Vec2};

use crate::context::Ui;
use crate::input::Input;
use crate::tree::{BoxExt, BoxFlags, BoxId, Size};

/// Hue and saturation picked at `p` on a wheel of `radius` around `middle`.
fn pick(middle: Vec2, radius: f32, p: Vec2) -> (f32, f32) {
    let rel = p - middle;
    let hue = ((rel.y.atan2(rel.x) + PI) / TAU + 0.5) % 1.0;
    let saturation = (rel.length() / radius).min(1.0);
    (hue, saturation)
}

impl<B: Backend> Ui<B> {
    /// Color wheel: angle picks the hue, distance from the centre the
    /// saturation. Both values are in `0..=1`.
    pub fn hue_saturation_circle(&mut self, key: Key, diameter: f32, hue: &mut f32, saturation: &mut f32) -> BoxId {
        assert!((0.0..=1.0).contains(hue), "hue {hue} out of 0..=1");
        assert!((0.0..=1.0).contains(saturation), "saturation {saturation} out of 0..=1");

        let id = self.add_box(key, Size::px(diameter), Size::px(diameter), BoxFlags::DRAW_BORDER);

        if let Some((position, size)) = self.prev_frame_box(id).map(|b| (b.computed_position, b.computed_size)) {
            let radius = size.x * 0.5;
            let middle = position + Vec2::splat(radius);
            let inside = (self.mouse_pos - middle).length() / radius < 1.0;
            let grabbed = (self.inputs.was_pressed(Input::MouseLeft) && inside) || self.is_clicking_down(key);
            if grabbed && self.inputs.is_down(Input::MouseLeft) {
                self.new.deepest_clicking_down = key;
                (*hue, *saturation) = pick(middle, radius, self.mouse_pos);
            }
        }

        self.ui_box_mut(id).ext = BoxExt::HueCircle {
            hue: *hue,
            saturation: *saturation,
        };
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_follows_wheel_angle() {
        let middle = Vec2::new(50.0, 50.0);
        let (hue, sat) = pick(middle, 50.0, Vec2::new(75.0, 50.0));
        assert!(hue.abs() < 1e-6 || (hue - 1.0).abs() < 1e-6);
        assert!((sat - 0.5).abs() < 1e-6);

        // +y is a quarter turn in screen space
        let (hue, _) = pick(middle, 50.0, Vec2::new(50.0, 60.0));
        assert!((hue - 0.25).abs() < 1e-6);

        let (_, sat) = pick(middle, 50.0, Vec2::new(200.0, 50.0));
        assert_eq!(sat, 1.0);
    }
}
