//! A 2D game engine built in Rust
//!
//! This engine provides:
//! - A scene tree of game objects with cascading lifecycles
//! - Game state management with clean lifecycle hooks
//! - 2D collision detection and resolution
//! - Event-driven input handling with winit key types
//! - Audio playback with rodio
//! - Parsing and emission of Doxygen navigation data

pub mod audio;
pub mod controller;
pub mod core;
pub mod events;
pub mod gamestate;
pub mod graphics;
pub mod input;
pub mod navdata;
pub mod physics;
pub mod scene;
pub mod transform;
pub mod version;

// Re-exports for convenience
pub use glam;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::audio::{AudioManager, TrackKind};
    pub use crate::controller::{PlayerController8Way, PlayerControllerSidescroller};
    pub use crate::core::{DebugInfo, ENGINE_VERSION, Engine, EngineConfig, FrameStats, Time};
    pub use crate::events::{EngineEvent, EventListener, EventQueue, ListenerCtx};
    pub use crate::gamestate::{GameState, GameStateManager, StateContext};
    pub use crate::graphics::{Camera, Color, Geometry, Rect, Shape, Sprite};
    pub use crate::input::{Axis, Input};
    pub use crate::physics::{Collider, PhysicsSettings, Rigidbody};
    pub use crate::scene::{NodeId, SceneTree};
    pub use crate::transform::Transform;
    pub use crate::version::{Tier, Version};
    pub use glam::Vec2;
    pub use winit::keyboard::KeyCode;
}
