//! 2D transform component
//!
//! Positions and rotations accumulate additively through the scene tree and
//! scales multiply; world-space queries live on [`crate::scene::SceneTree`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, rotation, and scale of a scene node.
///
/// Rotation is stored in degrees and kept in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec2,
    /// Rotation in degrees
    rotation: f32,
    /// Scale factor relative to the parent
    pub scale: Vec2,
}

impl Transform {
    /// Create an identity transform
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform with just a position
    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the rotation in degrees
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Get the rotation in radians
    #[must_use]
    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }

    /// Set the rotation in degrees, wrapping into `[0, 360)`
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(degrees);
    }

    /// Set the position
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    /// Set the scale
    pub fn set_scale(&mut self, x: f32, y: f32) {
        self.scale = Vec2::new(x, y);
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotate by a delta in degrees
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(self.rotation + degrees);
    }

    /// Multiply the scale by a factor
    pub fn scale_by(&mut self, factor: Vec2) {
        self.scale *= factor;
    }

    /// Combine with another transform: positions and rotations add,
    /// scales multiply.
    #[must_use]
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + other.position,
            rotation: wrap_degrees(self.rotation + other.rotation),
            scale: self.scale * other.scale,
        }
    }

    /// The transform that undoes this one under [`compose`](Self::compose)
    #[must_use]
    pub fn inverse(&self) -> Transform {
        Transform {
            position: -self.position,
            rotation: wrap_degrees(-self.rotation),
            scale: Vec2::new(1.0 / self.scale.x, 1.0 / self.scale.y),
        }
    }

    /// This transform as seen from `camera`'s frame
    #[must_use]
    pub fn relative_to(&self, camera: &Transform) -> Transform {
        camera.inverse().compose(self)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

fn wrap_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
