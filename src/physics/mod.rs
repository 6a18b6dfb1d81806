//! Collision and kinematics subsystem
//!
//! Provides gravity/drag configuration, rigidbody state, collider shapes,
//! and the pairwise collision sweep over the scene tree.

mod collider;
mod collision;
mod rigidbody;

pub use collider::{Collider, ColliderShape};
pub use collision::{CollisionHit, CollisionTest, Contact, sweep, test_collision};
pub use rigidbody::Rigidbody;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gravity direction presets, in radians.
///
/// Angles follow screen space: positive x is right, positive y is down.
pub mod grav_dir {
    use std::f32::consts::PI;

    /// Toward positive x
    pub const RIGHT: f32 = 0.0;
    /// Toward positive y (down the screen)
    pub const DOWN: f32 = PI * 0.5;
    /// Toward negative x
    pub const LEFT: f32 = PI;
    /// Toward negative y
    pub const UP: f32 = PI * 1.5;
}

/// Global physics configuration.
///
/// Gravity is stored in polar form (strength plus direction in radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Gravity strength
    pub gravity_strength: f32,
    /// Gravity direction in radians
    pub gravity_direction: f32,
    /// Drag factor applied against velocity
    pub drag: f32,
}

impl PhysicsSettings {
    /// Create settings with the given gravity strength and direction
    #[must_use]
    pub fn new(strength: f32, direction: f32) -> Self {
        Self {
            gravity_strength: strength,
            gravity_direction: direction,
            drag: 0.0,
        }
    }

    /// Gravity as a cartesian vector
    #[must_use]
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(
            self.gravity_strength * self.gravity_direction.cos(),
            self.gravity_strength * self.gravity_direction.sin(),
        )
    }

    /// Set gravity from a cartesian vector
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity_direction = gravity.y.atan2(gravity.x);
        self.gravity_strength = gravity.length();
    }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self::new(1.0, grav_dir::DOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gravity_points_down() {
        let settings = PhysicsSettings::default();
        let g = settings.gravity();
        assert!(g.x.abs() < 1e-6);
        assert!((g.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cartesian_round_trip() {
        let mut settings = PhysicsSettings::default();
        settings.set_gravity(Vec2::new(3.0, 4.0));
        assert!((settings.gravity_strength - 5.0).abs() < 1e-5);
        let g = settings.gravity();
        assert!((g - Vec2::new(3.0, 4.0)).length() < 1e-4);
    }
}
