//! Camera view

use glam::Vec2;

use crate::transform::Transform;

/// A movable view over the world.
///
/// The camera carries a transform like any scene node; points convert
/// between world space and view space through it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    /// Camera placement in the world
    pub transform: Transform,
}

impl Camera {
    /// Create a camera at the origin
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at a position
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            transform: Transform::from_position(position),
        }
    }

    /// Convert a world-space point into view space
    #[must_use]
    pub fn world_to_view(&self, point: Vec2) -> Vec2 {
        (point - self.transform.position) * self.transform.scale
    }

    /// Convert a view-space point back into world space
    #[must_use]
    pub fn view_to_world(&self, point: Vec2) -> Vec2 {
        point / self.transform.scale + self.transform.position
    }

    /// A transform as seen by this camera
    #[must_use]
    pub fn view_transform(&self, world: &Transform) -> Transform {
        world.relative_to(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_round_trip() {
        let mut camera = Camera::at(Vec2::new(100.0, 50.0));
        camera.transform.set_scale(2.0, 2.0);

        let world = Vec2::new(110.0, 60.0);
        let view = camera.world_to_view(world);
        assert_eq!(view, Vec2::new(20.0, 20.0));
        assert_eq!(camera.view_to_world(view), world);
    }

    #[test]
    fn test_view_transform_subtracts_camera() {
        let camera = Camera::at(Vec2::new(10.0, 0.0));
        let node = Transform::from_position(Vec2::new(25.0, 5.0));
        let view = camera.view_transform(&node);
        assert_eq!(view.position, Vec2::new(15.0, 5.0));
    }
}
