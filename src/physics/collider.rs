//! Collider shapes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Collision shape, sized in local units before transform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Circle centered on the node
    Circle {
        /// Radius of the circle
        radius: f32,
    },
    /// Axis-aligned box centered on the node
    Aabb {
        /// Full width of the box
        width: f32,
        /// Full height of the box
        height: f32,
    },
}

impl ColliderShape {
    /// Scaled radius for circles: the radius times the average of the
    /// transform's axis scales. Boxes return half the scaled diagonal.
    #[must_use]
    pub fn scaled_radius(&self, transform: &Transform) -> f32 {
        match *self {
            Self::Circle { radius } => radius * (transform.scale.x + transform.scale.y) * 0.5,
            Self::Aabb { width, height } => {
                let w = width * transform.scale.x * 0.5;
                let h = height * transform.scale.y * 0.5;
                (w * w + h * h).sqrt()
            }
        }
    }

    /// Scaled full extents (width, height)
    #[must_use]
    pub fn scaled_extents(&self, transform: &Transform) -> Vec2 {
        match *self {
            Self::Circle { .. } => Vec2::splat(self.scaled_radius(transform) * 2.0),
            Self::Aabb { width, height } => {
                Vec2::new(width * transform.scale.x, height * transform.scale.y)
            }
        }
    }
}

/// Collider attached to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Shape of the collider
    pub shape: ColliderShape,
    /// Triggers report collisions but are never separated
    pub trigger: bool,
}

impl Collider {
    /// Create a circle collider
    #[must_use]
    pub fn circle(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            trigger: false,
        }
    }

    /// Create an axis-aligned box collider
    #[must_use]
    pub fn aabb(width: f32, height: f32) -> Self {
        Self {
            shape: ColliderShape::Aabb { width, height },
            trigger: false,
        }
    }

    /// Mark this collider as a trigger
    #[must_use]
    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Whether a world-space point is inside the collider placed at the
    /// given world transform.
    #[must_use]
    pub fn contains_point(&self, world: &Transform, point: Vec2) -> bool {
        let local = point - world.position;
        match self.shape {
            ColliderShape::Circle { .. } => {
                let r = self.shape.scaled_radius(world);
                local.length_squared() <= r * r
            }
            ColliderShape::Aabb { .. } => {
                let half = self.shape.scaled_extents(world) * 0.5;
                local.x.abs() <= half.x && local.y.abs() <= half.y
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains_point() {
        let c = Collider::circle(2.0);
        let world = Transform::from_position(Vec2::new(10.0, 10.0));
        assert!(c.contains_point(&world, Vec2::new(11.0, 10.0)));
        assert!(c.contains_point(&world, Vec2::new(10.0, 12.0)));
        assert!(!c.contains_point(&world, Vec2::new(13.0, 10.0)));
    }

    #[test]
    fn test_circle_scale_averages_axes() {
        let c = Collider::circle(1.0);
        let mut world = Transform::new();
        world.set_scale(2.0, 4.0);
        // scaled radius = 1.0 * (2 + 4) / 2 = 3
        assert!((c.shape.scaled_radius(&world) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_contains_point_scaled() {
        let c = Collider::aabb(2.0, 4.0);
        let mut world = Transform::from_position(Vec2::new(0.0, 0.0));
        world.set_scale(2.0, 1.0);
        assert!(c.contains_point(&world, Vec2::new(1.9, 0.0)));
        assert!(!c.contains_point(&world, Vec2::new(2.1, 0.0)));
        assert!(c.contains_point(&world, Vec2::new(0.0, 1.9)));
        assert!(!c.contains_point(&world, Vec2::new(0.0, 2.1)));
    }
}
