//! Built-in event listeners
//!
//! The engine wires these up at startup when configured to; together they
//! keep the input manager current and honor quit requests. Keyboard
//! listeners are created per key group so a game can subscribe to only the
//! keys it cares about.

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::{EngineEvent, EventListener, ListenerCtx};

/// Letter keys
pub const ALPHA_KEYS: [KeyCode; 26] = [
    KeyCode::KeyA,
    KeyCode::KeyB,
    KeyCode::KeyC,
    KeyCode::KeyD,
    KeyCode::KeyE,
    KeyCode::KeyF,
    KeyCode::KeyG,
    KeyCode::KeyH,
    KeyCode::KeyI,
    KeyCode::KeyJ,
    KeyCode::KeyK,
    KeyCode::KeyL,
    KeyCode::KeyM,
    KeyCode::KeyN,
    KeyCode::KeyO,
    KeyCode::KeyP,
    KeyCode::KeyQ,
    KeyCode::KeyR,
    KeyCode::KeyS,
    KeyCode::KeyT,
    KeyCode::KeyU,
    KeyCode::KeyV,
    KeyCode::KeyW,
    KeyCode::KeyX,
    KeyCode::KeyY,
    KeyCode::KeyZ,
];

/// Digit keys along the top row
pub const NUM_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Movement and control keys commonly bound by games
pub const SPECIAL_KEYS: [KeyCode; 10] = [
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::Tab,
    KeyCode::ShiftLeft,
    KeyCode::ControlLeft,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];

/// Honors [`EngineEvent::Quit`] by requesting engine shutdown.
#[derive(Debug, Default)]
pub struct QuitListener;

impl EventListener for QuitListener {
    fn name(&self) -> &str {
        "quit"
    }

    fn handle(&mut self, event: &EngineEvent, ctx: &mut ListenerCtx<'_>) {
        if matches!(event, EngineEvent::Quit) {
            log::info!("Quit requested");
            *ctx.quit_requested = true;
        }
    }
}

/// Feeds key events for a group of keys into the input manager.
#[derive(Debug)]
pub struct KeyboardListener {
    keys: &'static [KeyCode],
}

impl KeyboardListener {
    /// Listen to a specific key group
    #[must_use]
    pub fn new(keys: &'static [KeyCode]) -> Self {
        Self { keys }
    }

    /// Listen to every key
    #[must_use]
    pub fn all() -> Self {
        Self { keys: &[] }
    }

    fn watches(&self, key: KeyCode) -> bool {
        self.keys.is_empty() || self.keys.contains(&key)
    }
}

impl EventListener for KeyboardListener {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn handle(&mut self, event: &EngineEvent, ctx: &mut ListenerCtx<'_>) {
        match *event {
            EngineEvent::KeyDown(key) if self.watches(key) => {
                log::trace!("Key down: {key:?}");
                ctx.input.press_key(key);
            }
            EngineEvent::KeyUp(key) if self.watches(key) => {
                log::trace!("Key up: {key:?}");
                ctx.input.release_key(key);
            }
            _ => {}
        }
    }
}

/// Mouse buttons the built-in listener tracks
pub const MOUSE_BUTTONS: [MouseButton; 3] =
    [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Feeds mouse movement and button events into the input manager.
///
/// Only the buttons in [`MOUSE_BUTTONS`] are tracked; side and other
/// auxiliary buttons pass through untouched.
#[derive(Debug, Default)]
pub struct MouseListener;

impl EventListener for MouseListener {
    fn name(&self) -> &str {
        "mouse"
    }

    fn handle(&mut self, event: &EngineEvent, ctx: &mut ListenerCtx<'_>) {
        match *event {
            EngineEvent::MouseMoved(position) => ctx.input.set_mouse_position(position),
            EngineEvent::MouseButtonDown(button) if MOUSE_BUTTONS.contains(&button) => {
                ctx.input.press_button(button);
            }
            EngineEvent::MouseButtonUp(button) if MOUSE_BUTTONS.contains(&button) => {
                ctx.input.release_button(button);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use glam::Vec2;

    fn dispatch(listener: &mut dyn EventListener, event: &EngineEvent, input: &mut Input) -> bool {
        let mut quit = false;
        let mut ctx = ListenerCtx {
            input,
            quit_requested: &mut quit,
        };
        listener.handle(event, &mut ctx);
        quit
    }

    #[test]
    fn test_quit_listener_sets_flag() {
        let mut input = Input::new();
        let mut listener = QuitListener;
        assert!(!dispatch(
            &mut listener,
            &EngineEvent::KeyDown(KeyCode::KeyA),
            &mut input
        ));
        assert!(dispatch(&mut listener, &EngineEvent::Quit, &mut input));
    }

    #[test]
    fn test_keyboard_listener_filters_by_group() {
        let mut input = Input::new();
        let mut listener = KeyboardListener::new(&ALPHA_KEYS);

        dispatch(&mut listener, &EngineEvent::KeyDown(KeyCode::KeyA), &mut input);
        dispatch(
            &mut listener,
            &EngineEvent::KeyDown(KeyCode::Digit1),
            &mut input,
        );

        assert!(input.is_key_held(KeyCode::KeyA));
        assert!(!input.is_key_held(KeyCode::Digit1));
    }

    #[test]
    fn test_mouse_listener_tracks_position_and_buttons() {
        let mut input = Input::new();
        let mut listener = MouseListener;

        dispatch(
            &mut listener,
            &EngineEvent::MouseMoved(Vec2::new(40.0, 30.0)),
            &mut input,
        );
        dispatch(
            &mut listener,
            &EngineEvent::MouseButtonDown(MouseButton::Left),
            &mut input,
        );

        assert_eq!(input.mouse_position(), Vec2::new(40.0, 30.0));
        assert!(input.is_button_held(MouseButton::Left));
    }

    #[test]
    fn test_mouse_listener_ignores_auxiliary_buttons() {
        let mut input = Input::new();
        let mut listener = MouseListener;

        dispatch(
            &mut listener,
            &EngineEvent::MouseButtonDown(MouseButton::Back),
            &mut input,
        );
        assert!(!input.is_button_held(MouseButton::Back));
    }
}
