//! Sprites and spritesheets

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Rect;

/// A single image drawn at a node's transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Path to the source image
    pub path: PathBuf,
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
}

impl Sprite {
    /// Create a sprite from a path and pixel size
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }
}

/// A spritesheet whose frames sit in a uniform grid.
///
/// Frames number left to right, top to bottom, starting at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformSpritesheet {
    /// Backing image
    pub sprite: Sprite,
    /// Width of one frame in pixels
    pub frame_width: u32,
    /// Height of one frame in pixels
    pub frame_height: u32,
}

impl UniformSpritesheet {
    /// Create a spritesheet over an image with a fixed frame size
    #[must_use]
    pub fn new(sprite: Sprite, frame_width: u32, frame_height: u32) -> Self {
        Self {
            sprite,
            frame_width: frame_width.max(1),
            frame_height: frame_height.max(1),
        }
    }

    /// Frames per row
    #[must_use]
    pub fn columns(&self) -> u32 {
        (self.sprite.width / self.frame_width).max(1)
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> u32 {
        (self.sprite.height / self.frame_height).max(1)
    }

    /// Total frame count
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.columns() * self.rows()
    }

    /// Source rectangle of one frame, wrapping out-of-range indices
    #[must_use]
    pub fn frame_rect(&self, frame: u32) -> Rect {
        let frame = frame % self.frame_count();
        let col = frame % self.columns();
        let row = frame / self.columns();
        Rect::new(
            (col * self.frame_width) as f32,
            (row * self.frame_height) as f32,
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }
}
