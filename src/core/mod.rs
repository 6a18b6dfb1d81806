//! Core engine module
//!
//! Contains the main Engine struct, configuration, frame timing, and debug
//! statistics.

mod debug;
mod engine;
mod time;

pub use debug::{DebugInfo, FrameStats};
pub use engine::{ENGINE_VERSION, Engine, EngineConfig};
pub use time::Time;
