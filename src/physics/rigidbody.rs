//! Rigidbody kinematic state

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kinematic state attached to a scene node.
///
/// Holds mass, velocity, acceleration, and how strongly gravity scales for
/// this body. Collision resolution reads and damps the velocity; moving the
/// body is otherwise up to gameplay code (see the controller module).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rigidbody {
    /// Mass of the body
    mass: f32,
    /// Velocity in units per frame
    velocity: Vec2,
    /// Acceleration in units per frame squared
    acceleration: Vec2,
    /// How strongly global gravity affects this body
    pub gravity_scale: f32,
}

impl Rigidbody {
    /// Create a rigidbody with the given mass.
    ///
    /// Non-positive masses are clamped to a small epsilon so force
    /// application stays finite.
    #[must_use]
    pub fn new(mass: f32) -> Self {
        Self {
            mass: mass.max(f32::EPSILON),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }

    /// Get the mass
    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass, clamped to stay positive
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(f32::EPSILON);
    }

    /// Get the velocity
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Set the velocity from cartesian components
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Set the velocity from polar strength and direction (radians)
    pub fn set_velocity_polar(&mut self, strength: f32, direction: f32) {
        self.velocity = Vec2::new(direction.cos(), direction.sin()) * strength;
    }

    /// Velocity magnitude
    #[must_use]
    pub fn velocity_strength(&self) -> f32 {
        self.velocity.length()
    }

    /// Velocity direction in radians
    #[must_use]
    pub fn velocity_direction(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x)
    }

    /// Get the acceleration
    #[must_use]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Set the acceleration from cartesian components
    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    /// Set the acceleration from polar strength and direction (radians)
    pub fn set_acceleration_polar(&mut self, strength: f32, direction: f32) {
        self.acceleration = Vec2::new(direction.cos(), direction.sin()) * strength;
    }

    /// Apply an instantaneous force: velocity changes by force / mass
    pub fn apply_force(&mut self, force: Vec2) {
        self.velocity += force / self.mass;
    }

    /// Apply an instantaneous force in polar form
    pub fn apply_force_polar(&mut self, strength: f32, angle: f32) {
        self.apply_force(Vec2::new(angle.cos(), angle.sin()) * strength);
    }
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self::new(1.0)
    }
}
