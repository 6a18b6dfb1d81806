//! Clickable UI widgets
//!
//! A button bundles a text label, a filled background rectangle, and an
//! axis-aligned hit area. Feeding it the mouse state each frame yields
//! enter/exit/click transitions; drawing the pieces is a renderer's job.

use glam::Vec2;
use winit::event::MouseButton;

use crate::input::Input;
use crate::physics::Collider;
use crate::transform::Transform;

use super::{Color, Geometry, Text};

/// What a button observed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Nothing changed
    None,
    /// The mouse moved onto the button
    Entered,
    /// The mouse moved off the button
    Exited,
    /// The left mouse button went down over the button
    Clicked,
}

/// A clickable labeled rectangle.
#[derive(Debug, Clone)]
pub struct Button {
    /// Label drawn over the background
    pub text: Text,
    /// Hit area and background width
    pub width: f32,
    /// Hit area and background height
    pub height: f32,
    /// Background color at rest
    pub background: Color,
    /// Background color while the mouse is over the button
    pub hover_background: Color,
    hovered: bool,
}

impl Button {
    /// Create a button with the stock grey background
    #[must_use]
    pub fn new(label: impl Into<String>, font: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            text: Text::new(label, font),
            width,
            height,
            background: Color::from_hex(0xAAAA_AAFF),
            hover_background: Color::from_hex(0x7777_77FF),
            hovered: false,
        }
    }

    /// Copy with different rest and hover backgrounds
    #[must_use]
    pub fn with_backgrounds(mut self, rest: Color, hover: Color) -> Self {
        self.background = rest;
        self.hover_background = hover;
        self
    }

    /// Whether the mouse was over the button at the last update
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Background for the current hover state
    #[must_use]
    pub fn current_background(&self) -> Color {
        if self.hovered {
            self.hover_background
        } else {
            self.background
        }
    }

    /// The background rectangle, ready to draw
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::rectangle(self.width, self.height, self.current_background())
    }

    /// Whether a world-space point falls on the button placed at `world`
    #[must_use]
    pub fn contains(&self, world: &Transform, point: Vec2) -> bool {
        Collider::aabb(self.width, self.height).contains_point(world, point)
    }

    /// Observe the mouse for one frame.
    ///
    /// A click fires on the left button's press edge while the mouse is
    /// over the button and takes precedence over an enter on the same
    /// frame.
    pub fn update(&mut self, world: &Transform, input: &Input) -> ButtonEvent {
        let inside = self.contains(world, input.mouse_position());
        let was_hovered = self.hovered;
        self.hovered = inside;

        if inside && input.is_button_pressed(MouseButton::Left) {
            return ButtonEvent::Clicked;
        }
        match (was_hovered, inside) {
            (false, true) => ButtonEvent::Entered,
            (true, false) => ButtonEvent::Exited,
            _ => ButtonEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button_at_origin() -> (Button, Transform) {
        (
            Button::new("Play", "default", 100.0, 40.0),
            Transform::default(),
        )
    }

    #[test]
    fn test_hover_transitions_swap_background() {
        let (mut button, world) = button_at_origin();
        let mut input = Input::new();

        input.set_mouse_position(Vec2::new(10.0, 5.0));
        assert_eq!(button.update(&world, &input), ButtonEvent::Entered);
        assert_eq!(button.current_background(), button.hover_background);
        assert_eq!(button.update(&world, &input), ButtonEvent::None);

        input.set_mouse_position(Vec2::new(200.0, 5.0));
        assert_eq!(button.update(&world, &input), ButtonEvent::Exited);
        assert_eq!(button.current_background(), button.background);
    }

    #[test]
    fn test_click_fires_on_press_edge_inside() {
        let (mut button, world) = button_at_origin();
        let mut input = Input::new();
        input.set_mouse_position(Vec2::new(0.0, 0.0));
        button.update(&world, &input);

        input.press_button(MouseButton::Left);
        assert_eq!(button.update(&world, &input), ButtonEvent::Clicked);

        // Held, not re-pressed: no repeat click
        input.end_frame();
        assert_eq!(button.update(&world, &input), ButtonEvent::None);
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let (mut button, world) = button_at_origin();
        let mut input = Input::new();
        input.set_mouse_position(Vec2::new(300.0, 300.0));
        input.press_button(MouseButton::Left);

        assert_eq!(button.update(&world, &input), ButtonEvent::None);
        assert!(!button.is_hovered());
    }
}
