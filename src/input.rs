use sdl3::event::Event;
use sdl3::keyboard::{Keycode, Scancode};
use sdl3::mouse::MouseButton;
use std::collections::HashMap;

/// Edge-triggered state of a single key or mouse button.
///
/// `pressed` and `released` are true only during the frame the transition
/// occurred and are cleared again on the next [`Input::begin_frame`].
/// `down` is level state and survives across frames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed: bool,
    pub released: bool,
    pub down: bool,
}

/// Per-frame snapshot of keyboard and mouse state.
///
/// All pending platform events are drained exactly once per frame (by
/// [`App::frame_start`](crate::App::frame_start)) before any update logic
/// runs, so every lookup within a frame sees the same consistent state.
/// Keys are tracked both by physical scancode and by virtual keycode.
pub struct Input {
    scankeys: HashMap<Scancode, ButtonState>,
    virtkeys: HashMap<Keycode, ButtonState>,
    mouse_buttons: HashMap<MouseButton, ButtonState>,
    mouse_window_pos: (f32, f32),
}

impl Input {
    pub fn new() -> Self {
        Self {
            scankeys: HashMap::new(),
            virtkeys: HashMap::new(),
            mouse_buttons: HashMap::new(),
            mouse_window_pos: (0.0, 0.0),
        }
    }

    /// Clears the `pressed`/`released` edges of every tracked key and
    /// button. Level state (`down`) is left untouched.
    pub(crate) fn begin_frame(&mut self) {
        for state in self.scankeys.values_mut() {
            state.pressed = false;
            state.released = false;
        }
        for state in self.virtkeys.values_mut() {
            state.pressed = false;
            state.released = false;
        }
        for state in self.mouse_buttons.values_mut() {
            state.pressed = false;
            state.released = false;
        }
    }

    pub(crate) fn handle_event(&mut self, event: &Event) {
        match event {
            Event::KeyDown {
                keycode,
                scancode,
                repeat: false,
                ..
            } => self.apply_key(*keycode, *scancode, true),
            Event::KeyUp {
                keycode,
                scancode,
                repeat: false,
                ..
            } => self.apply_key(*keycode, *scancode, false),
            Event::MouseButtonDown { mouse_btn, .. } => self.apply_mouse(*mouse_btn, true),
            Event::MouseButtonUp { mouse_btn, .. } => self.apply_mouse(*mouse_btn, false),
            Event::MouseMotion { x, y, .. } => {
                self.mouse_window_pos = ((*x) as f32, (*y) as f32);
            }
            _ => {}
        }
    }

    fn apply_key(&mut self, keycode: Option<Keycode>, scancode: Option<Scancode>, down: bool) {
        if let Some(scancode) = scancode {
            transition(self.scankeys.entry(scancode).or_default(), down);
        }
        if let Some(keycode) = keycode {
            transition(self.virtkeys.entry(keycode).or_default(), down);
        }
    }

    fn apply_mouse(&mut self, button: MouseButton, down: bool) {
        transition(self.mouse_buttons.entry(button).or_default(), down);
    }

    /// State of a physical key. Untracked keys read as all-false.
    pub fn scankey(&self, scancode: Scancode) -> ButtonState {
        self.scankeys.get(&scancode).copied().unwrap_or_default()
    }

    /// State of a virtual key. Untracked keys read as all-false.
    pub fn virtkey(&self, keycode: Keycode) -> ButtonState {
        self.virtkeys.get(&keycode).copied().unwrap_or_default()
    }

    /// State of a mouse button. Untracked buttons read as all-false.
    pub fn mouse_button(&self, button: MouseButton) -> ButtonState {
        self.mouse_buttons.get(&button).copied().unwrap_or_default()
    }

    /// Latest mouse position in window coordinates. Use
    /// [`App::mouse_pos`](crate::App::mouse_pos) for buffer coordinates.
    pub(crate) fn mouse_window_pos(&self) -> (f32, f32) {
        self.mouse_window_pos
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

fn transition(state: &mut ButtonState, down: bool) {
    if down {
        state.pressed = true;
        state.down = true;
    } else {
        state.released = true;
        state.down = false;
    }
}
