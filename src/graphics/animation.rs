//! Frame animation over a spritesheet

use serde::{Deserialize, Serialize};

use super::{Rect, UniformSpritesheet};

/// Plays through a spritesheet's frames at a fixed rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Frames being animated
    pub sheet: UniformSpritesheet,
    /// Frames per second
    pub fps: f32,
    /// Whether playback wraps at the end or holds the last frame
    pub looping: bool,
    elapsed: f32,
}

impl Animation {
    /// Create a looping animation
    #[must_use]
    pub fn new(sheet: UniformSpritesheet, fps: f32) -> Self {
        Self {
            sheet,
            fps: fps.max(0.0),
            looping: true,
            elapsed: 0.0,
        }
    }

    /// Copy that stops on the final frame instead of wrapping
    #[must_use]
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    /// Advance playback by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        if self.looping && self.fps > 0.0 {
            let duration = self.sheet.frame_count() as f32 / self.fps;
            if self.elapsed >= duration {
                self.elapsed %= duration;
            }
        }
    }

    /// Restart playback from the first frame
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Index of the current frame
    #[must_use]
    pub fn current_frame(&self) -> u32 {
        if self.fps <= 0.0 {
            return 0;
        }
        let frame = (self.elapsed * self.fps) as u32;
        if self.looping {
            frame % self.sheet.frame_count()
        } else {
            frame.min(self.sheet.frame_count() - 1)
        }
    }

    /// Source rectangle of the current frame
    #[must_use]
    pub fn current_rect(&self) -> Rect {
        self.sheet.frame_rect(self.current_frame())
    }

    /// Whether a non-looping animation has reached its last frame
    #[must_use]
    pub fn finished(&self) -> bool {
        !self.looping
            && self.fps > 0.0
            && self.elapsed * self.fps >= self.sheet.frame_count() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Sprite;

    fn anim() -> Animation {
        let sheet = UniformSpritesheet::new(Sprite::new("run.png", 64, 16), 16, 16);
        Animation::new(sheet, 4.0)
    }

    #[test]
    fn test_advance_steps_frames() {
        let mut a = anim();
        assert_eq!(a.current_frame(), 0);
        a.advance(0.25);
        assert_eq!(a.current_frame(), 1);
        a.advance(0.5);
        assert_eq!(a.current_frame(), 3);
    }

    #[test]
    fn test_looping_wraps() {
        let mut a = anim();
        a.advance(1.1);
        assert_eq!(a.current_frame(), 0);
        assert!(!a.finished());
    }

    #[test]
    fn test_once_holds_last_frame() {
        let mut a = anim().once();
        a.advance(10.0);
        assert_eq!(a.current_frame(), 3);
        assert!(a.finished());
    }
}
