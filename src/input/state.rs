//! Raw input state

use glam::Vec2;
use std::collections::HashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Input state manager.
///
/// Event listeners push key and button transitions in; gameplay code polls
/// held, just-pressed, and just-released state. The engine clears the
/// per-frame edges at the end of each tick.
#[derive(Debug, Default)]
pub struct Input {
    /// Currently held keys
    held_keys: HashSet<KeyCode>,
    /// Keys that went down this frame
    pressed_keys: HashSet<KeyCode>,
    /// Keys that came up this frame
    released_keys: HashSet<KeyCode>,
    /// Currently held mouse buttons
    held_buttons: HashSet<MouseButton>,
    /// Mouse buttons that went down this frame
    pressed_buttons: HashSet<MouseButton>,
    /// Mouse buttons that came up this frame
    released_buttons: HashSet<MouseButton>,
    /// Current mouse position
    mouse_position: Vec2,
    /// Mouse movement since the previous position update
    mouse_delta: Vec2,
}

impl Input {
    /// Create a new input manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edge state.
    ///
    /// The engine calls this at the end of every tick; held state
    /// persists across frames.
    pub fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.released_keys.clear();
        self.pressed_buttons.clear();
        self.released_buttons.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Record a key going down
    pub fn press_key(&mut self, key: KeyCode) {
        if self.held_keys.insert(key) {
            self.pressed_keys.insert(key);
        }
    }

    /// Record a key coming up
    pub fn release_key(&mut self, key: KeyCode) {
        if self.held_keys.remove(&key) {
            self.released_keys.insert(key);
        }
    }

    /// Record a mouse button going down
    pub fn press_button(&mut self, button: MouseButton) {
        if self.held_buttons.insert(button) {
            self.pressed_buttons.insert(button);
        }
    }

    /// Record a mouse button coming up
    pub fn release_button(&mut self, button: MouseButton) {
        if self.held_buttons.remove(&button) {
            self.released_buttons.insert(button);
        }
    }

    /// Record the mouse moving to a new position
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_delta += position - self.mouse_position;
        self.mouse_position = position;
    }

    /// Whether a key is currently held
    #[must_use]
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Whether a key went down this frame
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Whether a key came up this frame
    #[must_use]
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.released_keys.contains(&key)
    }

    /// Whether a mouse button is currently held
    #[must_use]
    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// Whether a mouse button went down this frame
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Whether a mouse button came up this frame
    #[must_use]
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.released_buttons.contains(&button)
    }

    /// Current mouse position
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse movement accumulated this frame
    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_held_and_edge() {
        let mut input = Input::new();
        input.press_key(KeyCode::Space);

        assert!(input.is_key_held(KeyCode::Space));
        assert!(input.is_key_pressed(KeyCode::Space));

        input.end_frame();
        assert!(input.is_key_held(KeyCode::Space));
        assert!(!input.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        input.end_frame();

        // OS key repeat delivers another down for a key already held
        input.press_key(KeyCode::KeyW);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_release_edge() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyA);
        input.end_frame();

        input.release_key(KeyCode::KeyA);
        assert!(!input.is_key_held(KeyCode::KeyA));
        assert!(input.is_key_released(KeyCode::KeyA));

        input.end_frame();
        assert!(!input.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn test_mouse_delta_accumulates_until_end_frame() {
        let mut input = Input::new();
        input.set_mouse_position(Vec2::new(10.0, 0.0));
        input.set_mouse_position(Vec2::new(15.0, 5.0));
        assert_eq!(input.mouse_delta(), Vec2::new(15.0, 5.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(15.0, 5.0));
    }
}
