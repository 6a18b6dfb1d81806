//! Core Engine struct and per-frame tick

use crate::audio::AudioManager;
use crate::core::debug::DebugInfo;
use crate::core::time::Time;
use crate::events::{
    ALPHA_KEYS, EngineEvent, EventListener, EventQueue, KeyboardListener, ListenerCtx,
    MouseListener, NUM_KEYS, QuitListener, SPECIAL_KEYS,
};
use crate::gamestate::{GameState, GameStateManager, StateContext};
use crate::input::Input;
use crate::physics::{self, PhysicsSettings};
use crate::scene::SceneTree;
use crate::version::{Tier, Version};

/// Version of the running engine.
pub const ENGINE_VERSION: Version = Version::new(0, 1, 0, Tier::PreAlpha);

/// Engine configuration.
///
/// Selects which subsystems the engine wires up at creation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine title, used in logs
    pub title: String,
    /// Register the quit and mouse listeners
    pub create_event_listeners: bool,
    /// Register keyboard listeners for the letter keys
    pub keys_alpha: bool,
    /// Register keyboard listeners for the digit keys
    pub keys_num: bool,
    /// Register keyboard listeners for movement and control keys
    pub keys_special: bool,
    /// Open an audio output device
    pub create_audio: bool,
    /// Start with debugging output enabled
    pub debugging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("Engine"),
            create_event_listeners: false,
            keys_alpha: false,
            keys_num: false,
            keys_special: false,
            create_audio: false,
            debugging: false,
        }
    }
}

impl EngineConfig {
    /// Everything on: listeners for all key groups, audio, debugging
    #[must_use]
    pub fn all() -> Self {
        Self {
            create_event_listeners: true,
            keys_alpha: true,
            keys_num: true,
            keys_special: true,
            create_audio: true,
            debugging: true,
            ..Default::default()
        }
    }

    /// Set the engine title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Register the built-in quit, mouse, and keyboard listeners
    #[must_use]
    pub fn with_event_listeners(mut self, alpha: bool, num: bool, special: bool) -> Self {
        self.create_event_listeners = true;
        self.keys_alpha = alpha;
        self.keys_num = num;
        self.keys_special = special;
        self
    }

    /// Open an audio output device at engine creation
    #[must_use]
    pub fn with_audio(mut self) -> Self {
        self.create_audio = true;
        self
    }

    /// Start with debugging output enabled
    #[must_use]
    pub fn with_debugging(mut self) -> Self {
        self.debugging = true;
        self
    }

    fn log_flags(&self) {
        log::info!("Creating engine '{}' with the following flags:", self.title);
        let mut any = false;
        for (on, name) in [
            (self.create_event_listeners, "EVENT_LISTENERS"),
            (self.keys_alpha, "KEYS_ALPHA"),
            (self.keys_num, "KEYS_NUM"),
            (self.keys_special, "KEYS_SPECIAL"),
            (self.create_audio, "AUDIO"),
            (self.debugging, "DEBUGGING"),
        ] {
            if on {
                log::info!("  {name}");
                any = true;
            }
        }
        if !any {
            log::info!("  NONE");
        }
        if !self.create_event_listeners
            && (self.keys_alpha || self.keys_num || self.keys_special)
        {
            log::warn!("Key groups only take effect with event listeners enabled");
        }
    }
}

/// The engine: owns every subsystem and advances them one frame per tick.
///
/// Running `tick` in a loop is the caller's concern; the engine itself
/// schedules nothing.
pub struct Engine {
    config: EngineConfig,
    /// Frame time tracking
    pub time: Time,
    /// Input state fed by the event listeners
    pub input: Input,
    /// Frame-delayed event queue
    pub events: EventQueue,
    listeners: Vec<Box<dyn EventListener>>,
    /// Scene tree shared by all game states
    pub scene: SceneTree,
    /// Loaded game states
    pub states: GameStateManager,
    /// Global physics configuration
    pub physics: PhysicsSettings,
    /// Audio output, if configured and a device was available
    pub audio: Option<AudioManager>,
    /// Frame statistics and debug output
    pub debug: DebugInfo,
    running: bool,
}

impl Engine {
    /// Create an engine with the given configuration.
    ///
    /// Initializes the log facade on first use. A configured audio device
    /// that fails to open is logged and left absent rather than failing
    /// engine creation.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let _ = env_logger::try_init();
        config.log_flags();
        log::info!("Engine version {ENGINE_VERSION}");

        let mut listeners: Vec<Box<dyn EventListener>> = Vec::new();
        if config.create_event_listeners {
            listeners.push(Box::new(QuitListener));
            listeners.push(Box::new(MouseListener));
            if config.keys_alpha {
                listeners.push(Box::new(KeyboardListener::new(&ALPHA_KEYS)));
            }
            if config.keys_num {
                listeners.push(Box::new(KeyboardListener::new(&NUM_KEYS)));
            }
            if config.keys_special {
                listeners.push(Box::new(KeyboardListener::new(&SPECIAL_KEYS)));
            }
        }

        let audio = if config.create_audio {
            match AudioManager::new() {
                Ok(manager) => Some(manager),
                Err(e) => {
                    log::warn!("Audio unavailable: {e}");
                    None
                }
            }
        } else {
            None
        };

        let mut debug = DebugInfo::new();
        debug.enabled = config.debugging;

        Self {
            config,
            time: Time::new(),
            input: Input::new(),
            events: EventQueue::new(),
            listeners,
            scene: SceneTree::new(),
            states: GameStateManager::new(),
            physics: PhysicsSettings::default(),
            audio,
            debug,
            running: true,
        }
    }

    /// The engine's configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the engine is still running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request shutdown at the end of the current tick
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Queue an event for next frame's dispatch
    pub fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    /// Register an additional event listener
    pub fn add_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Load a game state, returning its slot index
    pub fn load_state(&mut self, state: Box<dyn GameState>, active: bool) -> usize {
        self.states.load(state, active)
    }

    /// Make one loaded state the only active state
    pub fn set_current_state(&mut self, index: usize) {
        let mut ctx = StateContext {
            dt: self.time.delta_seconds(),
            input: &self.input,
            scene: &mut self.scene,
            events: &mut self.events,
            audio: self.audio.as_mut(),
        };
        self.states.set_current(index, &mut ctx);
    }

    /// Remove every loaded state, firing their unload hooks
    pub fn unload_all_states(&mut self) {
        let mut ctx = StateContext {
            dt: self.time.delta_seconds(),
            input: &self.input,
            scene: &mut self.scene,
            events: &mut self.events,
            audio: self.audio.as_mut(),
        };
        self.states.unload_all(&mut ctx);
    }

    /// Advance the engine by one frame.
    ///
    /// Order per frame: advance time, dispatch last frame's events to the
    /// listeners, update active states, run the collision sweep, reap
    /// ended nodes, clear input edges.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        self.time.update();
        self.debug.record_frame(self.time.delta());

        self.events.begin_frame();
        let mut quit_requested = false;
        for event in self.events.current() {
            for listener in &mut self.listeners {
                let mut ctx = ListenerCtx {
                    input: &mut self.input,
                    quit_requested: &mut quit_requested,
                };
                listener.handle(event, &mut ctx);
            }
        }

        let mut ctx = StateContext {
            dt: self.time.delta_seconds(),
            input: &self.input,
            scene: &mut self.scene,
            events: &mut self.events,
            audio: self.audio.as_mut(),
        };
        self.states.update(&mut ctx);

        for hit in physics::sweep(&mut self.scene) {
            self.events.push(EngineEvent::Collision {
                a: hit.a,
                b: hit.b,
                contact_a: hit.contact_a,
                contact_b: hit.contact_b,
            });
        }

        self.scene.reap();
        if let Some(audio) = &mut self.audio {
            audio.cleanup_finished();
        }
        self.debug.log_overlay(&self.scene);
        self.input.end_frame();

        if quit_requested {
            self.quit();
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Collider, Rigidbody};
    use crate::transform::Transform;
    use glam::Vec2;
    use winit::keyboard::KeyCode;

    fn listening_engine() -> Engine {
        Engine::new(
            EngineConfig::default()
                .with_title("test")
                .with_event_listeners(true, true, true),
        )
    }

    #[test]
    fn test_quit_event_stops_engine() {
        let mut engine = listening_engine();
        assert!(engine.is_running());

        engine.push_event(EngineEvent::Quit);
        engine.tick();
        assert!(!engine.is_running());

        // Further ticks are no-ops
        engine.tick();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_key_events_reach_input() {
        let mut engine = listening_engine();
        engine.push_event(EngineEvent::KeyDown(KeyCode::KeyA));
        engine.tick();
        assert!(engine.input.is_key_held(KeyCode::KeyA));

        engine.push_event(EngineEvent::KeyUp(KeyCode::KeyA));
        engine.tick();
        assert!(!engine.input.is_key_held(KeyCode::KeyA));
    }

    #[test]
    fn test_state_updates_each_tick() {
        struct Counter(std::rc::Rc<std::cell::Cell<u32>>);
        impl GameState for Counter {
            fn name(&self) -> &str {
                "counter"
            }
            fn on_update(&mut self, _ctx: &mut StateContext<'_>) {
                self.0.set(self.0.get() + 1);
            }
        }

        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut engine = Engine::new(EngineConfig::default());
        engine.load_state(Box::new(Counter(count.clone())), true);

        engine.tick();
        engine.tick();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_collision_surfaces_as_event() {
        let mut engine = Engine::new(EngineConfig::default());

        for (name, x) in [("a", 0.0), ("b", 1.0)] {
            let id = engine.scene.spawn(name);
            let node = engine.scene.node_mut(id).unwrap();
            node.transform = Some(Transform::from_position(Vec2::new(x, 0.0)));
            node.collider = Some(Collider::circle(1.0));
            node.rigidbody = Some(Rigidbody::default());
        }

        engine.tick();
        assert_eq!(engine.events.pending_count(), 1);

        engine.tick();
        // The pair was separated last tick, so no new collision
        assert_eq!(engine.events.pending_count(), 0);
    }

    #[test]
    fn test_ended_nodes_reaped_during_tick() {
        let mut engine = Engine::new(EngineConfig::default());
        let id = engine.scene.spawn("doomed");
        engine.scene.end(id);

        engine.tick();
        assert!(engine.scene.node(id).is_none());
    }
}
