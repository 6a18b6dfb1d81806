//! Player controllers
//!
//! Controllers turn input axes into per-frame movement deltas for a node's
//! transform. Movement scales by delta time against a 60 Hz reference so
//! speed settings read as units per frame.

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::input::{Axis, Input};

/// Free movement along both axes.
#[derive(Debug, Clone)]
pub struct PlayerController8Way {
    /// Left/right axis, positive toward +x
    pub horizontal: Axis,
    /// Up/down axis, positive toward +y (down the screen)
    pub vertical: Axis,
    /// Movement speed in units per frame
    pub speed: f32,
}

impl PlayerController8Way {
    /// Create a controller over four direction keys
    #[must_use]
    pub fn new(up: KeyCode, down: KeyCode, left: KeyCode, right: KeyCode, speed: f32) -> Self {
        Self {
            horizontal: Axis::new(right, left),
            vertical: Axis::new(down, up),
            speed,
        }
    }

    /// WASD movement at the given speed
    #[must_use]
    pub fn wasd(speed: f32) -> Self {
        Self::new(
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            speed,
        )
    }

    /// Advance the axes and return this frame's movement delta
    pub fn update(&mut self, input: &Input, dt: f32) -> Vec2 {
        self.horizontal.update(input, dt);
        self.vertical.update(input, dt);
        Vec2::new(self.horizontal.value(), self.vertical.value()) * self.speed * dt * 60.0
    }
}

/// Horizontal movement plus a height-limited jump.
#[derive(Debug, Clone)]
pub struct PlayerControllerSidescroller {
    /// Left/right axis, positive toward +x
    pub horizontal: Axis,
    /// Key that starts a jump
    pub jump_key: KeyCode,
    /// Movement speed in units per frame
    pub speed: f32,
    /// Upward movement per frame while jumping
    pub jump_strength: f32,
    /// Total height of one jump
    pub jump_height: f32,
    jump_remaining: f32,
}

impl PlayerControllerSidescroller {
    /// Create a sidescroller controller
    #[must_use]
    pub fn new(
        left: KeyCode,
        right: KeyCode,
        jump: KeyCode,
        speed: f32,
        jump_strength: f32,
        jump_height: f32,
    ) -> Self {
        Self {
            horizontal: Axis::new(right, left),
            jump_key: jump,
            speed,
            jump_strength,
            jump_height,
            jump_remaining: 0.0,
        }
    }

    /// Whether a jump is still rising
    #[must_use]
    pub fn is_jumping(&self) -> bool {
        self.jump_remaining > 0.0
    }

    /// Cut the current jump short, e.g. on a head bump
    pub fn cancel_jump(&mut self) {
        self.jump_remaining = 0.0;
    }

    /// Advance the controller and return this frame's movement delta.
    ///
    /// Pressing the jump key while not already jumping starts a jump; the
    /// controller then rises by up to `jump_strength` per frame until the
    /// jump height is spent. Falling back down is gravity's job.
    pub fn update(&mut self, input: &Input, dt: f32) -> Vec2 {
        self.horizontal.update(input, dt);
        let dx = self.horizontal.value() * self.speed * dt * 60.0;

        if input.is_key_pressed(self.jump_key) && !self.is_jumping() {
            self.jump_remaining = self.jump_height;
        }
        let mut dy = 0.0;
        if self.is_jumping() {
            let rise = (self.jump_strength * dt * 60.0).min(self.jump_remaining);
            self.jump_remaining -= rise;
            dy = -rise;
        }
        Vec2::new(dx, dy)
    }
}
