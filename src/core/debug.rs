//! Debug and statistics module

use std::collections::VecDeque;
use std::time::Duration;

use crate::scene::SceneTree;

/// Frame statistics over a sliding window.
#[derive(Debug)]
pub struct FrameStats {
    /// Frame time history for averaging
    frame_times: VecDeque<Duration>,
    /// Maximum samples to keep
    max_samples: usize,
    /// Total frames recorded
    total_frames: u64,
}

impl FrameStats {
    const DEFAULT_WINDOW: usize = 120;

    /// Create a tracker with the default two-second window at 60 Hz
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(Self::DEFAULT_WINDOW),
            max_samples: Self::DEFAULT_WINDOW,
            total_frames: 0,
        }
    }

    /// Record a frame with the given delta time
    pub fn record_frame(&mut self, delta: Duration) {
        self.total_frames += 1;
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta);
    }

    /// Frames per second over the window
    #[must_use]
    pub fn fps(&self) -> f32 {
        let total: Duration = self.frame_times.iter().sum();
        let secs = total.as_secs_f32();
        if secs > 0.0 {
            self.frame_times.len() as f32 / secs
        } else {
            0.0
        }
    }

    /// Average frame time in milliseconds
    #[must_use]
    pub fn avg_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: Duration = self.frame_times.iter().sum();
        total.as_secs_f32() * 1000.0 / self.frame_times.len() as f32
    }

    /// Shortest frame in the window, in milliseconds
    #[must_use]
    pub fn min_frame_time_ms(&self) -> f32 {
        self.frame_times
            .iter()
            .min()
            .map_or(0.0, |d| d.as_secs_f32() * 1000.0)
    }

    /// Longest frame in the window, in milliseconds
    #[must_use]
    pub fn max_frame_time_ms(&self) -> f32 {
        self.frame_times
            .iter()
            .max()
            .map_or(0.0, |d| d.as_secs_f32() * 1000.0)
    }

    /// Total frames recorded since creation
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// One-line summary for overlays and logs
    #[must_use]
    pub fn format_stats(&self) -> String {
        format!(
            "FPS: {:.1} | Frame: {:.2}ms (min: {:.2}, max: {:.2})",
            self.fps(),
            self.avg_frame_time_ms(),
            self.min_frame_time_ms(),
            self.max_frame_time_ms()
        )
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug information gathered each frame.
#[derive(Debug, Default)]
pub struct DebugInfo {
    /// Whether debugging output is enabled
    pub enabled: bool,
    /// Frame statistics
    pub frame_stats: FrameStats,
    /// Custom debug lines, cleared each frame
    custom_lines: Vec<String>,
}

impl DebugInfo {
    /// Create debug info, initially disabled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle debugging output
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Add a custom debug line for this frame
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.custom_lines.push(line.into());
    }

    /// Record a frame
    pub fn record_frame(&mut self, delta: Duration) {
        self.frame_stats.record_frame(delta);
    }

    /// Log the frame summary, custom lines, and the scene tree dump.
    ///
    /// Does nothing while disabled. Custom lines are consumed.
    pub fn log_overlay(&mut self, scene: &SceneTree) {
        if !self.enabled {
            self.custom_lines.clear();
            return;
        }
        log::debug!("{}", self.frame_stats.format_stats());
        for line in self.custom_lines.drain(..) {
            log::debug!("{line}");
        }
        log::debug!("Scene tree:\n{}", scene.format_tree());
    }
}
