//! CPU-side graphics data
//!
//! Colors, shapes, sprites, animations, cameras, text, and UI widgets as
//! plain data with their arithmetic. No rendering backend lives here; a
//! renderer consumes these types.

mod animation;
mod camera;
mod color;
mod geometry;
mod sprite;
mod text;
mod ui;

pub use animation::Animation;
pub use camera::Camera;
pub use color::Color;
pub use geometry::{Geometry, Rect, Shape};
pub use sprite::{Sprite, UniformSpritesheet};
pub use text::{FontCache, Text};
pub use ui::{Button, ButtonEvent};
