//! Input handling module
//!
//! Tracks raw key and mouse state fed in by the event listeners, and
//! provides smoothed virtual axes on top of it.

mod axis;
mod state;

pub use axis::Axis;
pub use state::Input;
