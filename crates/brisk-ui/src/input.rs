//! Per-frame input snapshot supplied by the host, and the outputs handed back.

use bitflags::bitflags;
use brisk_core::{DrawCall, Vec2};

bitflags! {
    /// Transition bits of one logical input for the current frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InputState: u8 {
        const IS_DOWN = 1 << 0;
        const WAS_PRESSED = 1 << 1;
        const WAS_PRESSED_OR_REPEAT = 1 << 2;
        const WAS_RELEASED = 1 << 3;
    }
}

/// Logical inputs the engine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    MouseLeft,
    MouseRight,
    MouseMiddle,
    Shift,
    Control,
    Alt,
    Tab,
    Escape,
    Enter,
    Delete,
    Backspace,
    A,
    C,
    V,
    X,
    Y,
    Z,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
}

impl Input {
    pub const COUNT: usize = 23;
}

#[derive(Clone, Debug, Default)]
pub struct Inputs {
    pub states: [InputState; Input::COUNT],
    /// Cursor position in window pixels.
    pub mouse_position: Vec2,
    /// Unaccelerated mouse motion this frame; keeps counting while the cursor is locked.
    pub mouse_raw_delta: Vec2,
    pub mouse_wheel_delta: f32,
    /// Text typed this frame, in order.
    pub text_input: Vec<char>,
    /// Seconds since the previous frame.
    pub frame_delta_time: f32,
}

impl Inputs {
    #[inline]
    pub fn state(&self, input: Input) -> InputState {
        self.states[input as usize]
    }

    #[inline]
    pub fn is_down(&self, input: Input) -> bool {
        self.state(input).contains(InputState::IS_DOWN)
    }

    #[inline]
    pub fn was_pressed(&self, input: Input) -> bool {
        self.state(input).contains(InputState::WAS_PRESSED)
    }

    #[inline]
    pub fn was_pressed_or_repeat(&self, input: Input) -> bool {
        self.state(input).contains(InputState::WAS_PRESSED_OR_REPEAT)
    }

    #[inline]
    pub fn was_released(&self, input: Input) -> bool {
        self.state(input).contains(InputState::WAS_RELEASED)
    }

    /// Record a press this frame.
    pub fn press(&mut self, input: Input) {
        self.states[input as usize] |= InputState::IS_DOWN | InputState::WAS_PRESSED | InputState::WAS_PRESSED_OR_REPEAT;
    }

    /// Record a key repeat for an input that is already held.
    pub fn repeat(&mut self, input: Input) {
        self.states[input as usize] |= InputState::IS_DOWN | InputState::WAS_PRESSED_OR_REPEAT;
    }

    /// Record a release this frame.
    pub fn release(&mut self, input: Input) {
        let state = &mut self.states[input as usize];
        state.remove(InputState::IS_DOWN);
        state.insert(InputState::WAS_RELEASED);
    }

    /// Prepare for the next frame: transition bits, deltas and typed text are
    /// cleared, held inputs stay down.
    pub fn next_frame(&mut self) {
        for state in &mut self.states {
            *state &= InputState::IS_DOWN;
        }
        self.mouse_raw_delta = Vec2::ZERO;
        self.mouse_wheel_delta = 0.0;
        self.text_input.clear();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseCursor {
    #[default]
    Default,
    ResizeH,
    ResizeV,
    IBeam,
}

/// What the host should do after [`crate::Ui::end_frame`].
#[derive(Clone, Debug, Default)]
pub struct Outputs {
    pub cursor: MouseCursor,
    /// Hide the cursor and keep it in place; raw deltas still arrive.
    pub lock_and_hide_cursor: bool,
    /// Submit in order.
    pub draw_calls: Vec<DrawCall>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_cycle() {
        let mut inputs = Inputs::default();
        inputs.press(Input::MouseLeft);
        assert!(inputs.is_down(Input::MouseLeft));
        assert!(inputs.was_pressed(Input::MouseLeft));
        assert!(inputs.was_pressed_or_repeat(Input::MouseLeft));

        inputs.next_frame();
        assert!(inputs.is_down(Input::MouseLeft));
        assert!(!inputs.was_pressed(Input::MouseLeft));

        inputs.release(Input::MouseLeft);
        assert!(!inputs.is_down(Input::MouseLeft));
        assert!(inputs.was_released(Input::MouseLeft));

        inputs.next_frame();
        assert_eq!(inputs.state(Input::MouseLeft), InputState::empty());
    }

    #[test]
    fn test_next_frame_clears_deltas_and_text() {
        let mut inputs = Inputs {
            mouse_raw_delta: Vec2::new(3.0, 4.0),
            mouse_wheel_delta: 1.0,
            text_input: vec!['a'],
            ..Default::default()
        };
        inputs.next_frame();
        assert_eq!(inputs.mouse_raw_delta, Vec2::ZERO);
        assert_eq!(inputs.mouse_wheel_delta, 0.0);
        assert!(inputs.text_input.is_empty());
    }

    #[test]
    fn test_all_inputs_fit_state_table() {
        assert_eq!(Input::Down as usize + 1, Input::COUNT);
    }
}
