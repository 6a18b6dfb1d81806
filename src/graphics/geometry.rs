//! Drawable geometry primitives

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Color;

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a rectangle
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Center point of the rectangle
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Whether a point falls inside the rectangle
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.w
            && point.y >= self.y
            && point.y < self.y + self.h
    }
}

/// Shape of a geometry primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A single point
    Point,
    /// A line from the node's position to an endpoint offset
    Line {
        /// Endpoint offset from the node position
        end: Vec2,
    },
    /// A rectangle centered on the node
    Rectangle {
        /// Full width
        width: f32,
        /// Full height
        height: f32,
    },
}

/// A drawable primitive attached to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Draw color
    pub color: Color,
    /// Whether closed shapes are filled or outlined
    pub fill: bool,
    /// The shape to draw
    pub shape: Shape,
}

impl Geometry {
    /// A filled rectangle
    #[must_use]
    pub fn rectangle(width: f32, height: f32, color: Color) -> Self {
        Self {
            color,
            fill: true,
            shape: Shape::Rectangle { width, height },
        }
    }

    /// A line segment
    #[must_use]
    pub fn line(end: Vec2, color: Color) -> Self {
        Self {
            color,
            fill: false,
            shape: Shape::Line { end },
        }
    }

    /// A single point
    #[must_use]
    pub fn point(color: Color) -> Self {
        Self {
            color,
            fill: true,
            shape: Shape::Point,
        }
    }

    /// Copy as an outline instead of a fill
    #[must_use]
    pub fn outlined(mut self) -> Self {
        self.fill = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert_eq!(r.center(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_geometry_builders() {
        let g = Geometry::rectangle(4.0, 2.0, Color::RED).outlined();
        assert!(!g.fill);
        assert!(matches!(
            g.shape,
            Shape::Rectangle {
                width: 4.0,
                height: 2.0
            }
        ));
    }
}
