//! Platform-agnostic pointer input
//!
//! Front ends (the browser binding, tests, a native shell) translate their own
//! events into these calls; the viewer reads the accumulated state once per
//! frame and then clears the per-frame deltas.

use glam::Vec2;
use rustc_hash::FxHashSet;

/// Pointer buttons the camera controls react to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Maps a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct Input {
    pub cursor_position: Vec2,
    /// Cursor movement since the last frame.
    pub cursor_delta: Vec2,
    /// Wheel movement since the last frame; positive `y` zooms in.
    pub scroll_delta: Vec2,
    pub screen_size: Vec2,
    pub buttons: FxHashSet<PointerButton>,

    has_cursor: bool,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame deltas. Called by the viewer at the end of each tick.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        // The first event only establishes the position.
        if self.has_cursor {
            self.cursor_delta += new_pos - self.cursor_position;
        }
        self.cursor_position = new_pos;
        self.has_cursor = true;
    }

    pub fn handle_pointer_button(&mut self, button: PointerButton, pressed: bool) {
        if pressed {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    pub fn handle_wheel(&mut self, dx: f32, dy: f32) {
        self.scroll_delta += Vec2::new(dx, dy);
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: PointerButton) -> bool {
        self.buttons.contains(&button)
    }
}
