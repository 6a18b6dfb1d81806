//! Game state management
//!
//! Games are organized into named states (menus, levels, overlays). Several
//! states can be loaded and active at once; making one state "current"
//! deactivates every other. States receive clean lifecycle hooks and a
//! per-frame context exposing the engine surfaces they may touch.

use crate::audio::AudioManager;
use crate::events::{EngineEvent, EventQueue};
use crate::input::Input;
use crate::scene::SceneTree;

/// Per-frame context handed to state hooks.
pub struct StateContext<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Input state manager
    pub input: &'a Input,
    /// Scene tree shared by all states
    pub scene: &'a mut SceneTree,
    /// Event queue for pushing next-frame events
    pub events: &'a mut EventQueue,
    /// Audio output, when the engine was configured with one
    pub audio: Option<&'a mut AudioManager>,
}

/// A game state with a lifecycle.
///
/// The lifecycle is:
///
/// 1. `on_start()` runs once, the first frame the state updates while active
/// 2. `on_activate()` / `on_deactivate()` bracket activity changes
/// 3. `on_update()` runs each frame while active
/// 4. `on_unload()` runs once when the state is removed from the manager
pub trait GameState {
    /// State name for lookup and logging
    fn name(&self) -> &str;

    /// Called once before the state's first update
    fn on_start(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called when the state becomes active
    fn on_activate(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called each frame while the state is active
    fn on_update(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called when the state stops being active
    fn on_deactivate(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called when the state is removed from the manager
    fn on_unload(&mut self, _ctx: &mut StateContext<'_>) {}
}

struct StateSlot {
    state: Box<dyn GameState>,
    active: bool,
    started: bool,
}

/// Owns the loaded game states and drives their lifecycles.
#[derive(Default)]
pub struct GameStateManager {
    slots: Vec<StateSlot>,
}

impl GameStateManager {
    /// Create an empty manager
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of loaded states
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no states are loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Load a state, returning its slot index.
    ///
    /// Inactive states sit loaded but do not update until activated.
    pub fn load(&mut self, state: Box<dyn GameState>, active: bool) -> usize {
        log::info!("Loading game state '{}'", state.name());
        self.slots.push(StateSlot {
            state,
            active,
            started: false,
        });
        self.slots.len() - 1
    }

    /// Slot index of the state with the given name
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.state.name() == name)
    }

    /// Borrow the state in a slot
    #[must_use]
    pub fn state(&self, index: usize) -> Option<&dyn GameState> {
        self.slots.get(index).map(|s| s.state.as_ref())
    }

    /// Mutably borrow the state in a slot
    #[must_use]
    pub fn state_mut(&mut self, index: usize) -> Option<&mut dyn GameState> {
        match self.slots.get_mut(index) {
            Some(s) => Some(s.state.as_mut()),
            None => None,
        }
    }

    /// Borrow a state by name
    #[must_use]
    pub fn state_by_name(&self, name: &str) -> Option<&dyn GameState> {
        self.index_of(name).and_then(|i| self.state(i))
    }

    /// Whether the state in a slot is active
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.active)
    }

    /// Names of all loaded states, in slot order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.state.name()).collect()
    }

    /// Activate or deactivate one state, firing the matching hook
    pub fn set_active(&mut self, index: usize, active: bool, ctx: &mut StateContext<'_>) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.active == active {
            return;
        }
        slot.active = active;
        if active {
            log::debug!("Activating game state '{}'", slot.state.name());
            slot.state.on_activate(ctx);
        } else {
            log::debug!("Deactivating game state '{}'", slot.state.name());
            slot.state.on_deactivate(ctx);
        }
    }

    /// Make one state the only active state.
    ///
    /// Every other active state is deactivated first, then the target is
    /// activated and a [`EngineEvent::StateChanged`] is pushed.
    pub fn set_current(&mut self, index: usize, ctx: &mut StateContext<'_>) {
        if index >= self.slots.len() {
            log::warn!("set_current: no state in slot {index}");
            return;
        }
        let others: Vec<usize> = (0..self.slots.len()).filter(|i| *i != index).collect();
        for other in others {
            self.set_active(other, false, ctx);
        }
        self.set_active(index, true, ctx);
        ctx.events.push(EngineEvent::StateChanged {
            name: self.slots[index].state.name().to_string(),
        });
    }

    /// Remove one state, firing `on_unload`
    pub fn unload(&mut self, index: usize, ctx: &mut StateContext<'_>) {
        if index >= self.slots.len() {
            return;
        }
        let mut slot = self.slots.remove(index);
        log::info!("Unloading game state '{}'", slot.state.name());
        if slot.active {
            slot.state.on_deactivate(ctx);
        }
        slot.state.on_unload(ctx);
    }

    /// Remove every state, firing hooks in slot order
    pub fn unload_all(&mut self, ctx: &mut StateContext<'_>) {
        while !self.slots.is_empty() {
            self.unload(0, ctx);
        }
    }

    /// Update every active state in slot order.
    ///
    /// A state updating for the first time gets `on_start` before its
    /// first `on_update`.
    pub fn update(&mut self, ctx: &mut StateContext<'_>) {
        for i in 0..self.slots.len() {
            if !self.slots[i].active {
                continue;
            }
            if !self.slots[i].started {
                self.slots[i].started = true;
                self.slots[i].state.on_start(ctx);
            }
            self.slots[i].state.on_update(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Journal(Rc<RefCell<Vec<String>>>);

    struct Recorder {
        name: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, journal: &Journal) -> Box<Self> {
            Box::new(Self {
                name,
                journal: journal.0.clone(),
            })
        }

        fn log(&self, hook: &str) {
            self.journal.borrow_mut().push(format!("{}:{hook}", self.name));
        }
    }

    impl GameState for Recorder {
        fn name(&self) -> &str {
            self.name
        }
        fn on_start(&mut self, _ctx: &mut StateContext<'_>) {
            self.log("start");
        }
        fn on_activate(&mut self, _ctx: &mut StateContext<'_>) {
            self.log("activate");
        }
        fn on_update(&mut self, _ctx: &mut StateContext<'_>) {
            self.log("update");
        }
        fn on_deactivate(&mut self, _ctx: &mut StateContext<'_>) {
            self.log("deactivate");
        }
        fn on_unload(&mut self, _ctx: &mut StateContext<'_>) {
            self.log("unload");
        }
    }

    fn with_ctx<R>(f: impl FnOnce(&mut StateContext<'_>) -> R) -> R {
        let input = Input::new();
        let mut scene = SceneTree::new();
        let mut events = EventQueue::new();
        let mut ctx = StateContext {
            dt: 1.0 / 60.0,
            input: &input,
            scene: &mut scene,
            events: &mut events,
            audio: None,
        };
        f(&mut ctx)
    }

    #[test]
    fn test_first_update_runs_start_once() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new();
        manager.load(Recorder::new("level", &journal), true);

        with_ctx(|ctx| {
            manager.update(ctx);
            manager.update(ctx);
        });

        assert_eq!(
            *journal.0.borrow(),
            vec!["level:start", "level:update", "level:update"]
        );
    }

    #[test]
    fn test_inactive_states_do_not_update() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new();
        manager.load(Recorder::new("paused", &journal), false);

        with_ctx(|ctx| manager.update(ctx));
        assert!(journal.0.borrow().is_empty());
    }

    #[test]
    fn test_set_current_deactivates_others() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new();
        manager.load(Recorder::new("menu", &journal), true);
        let level = manager.load(Recorder::new("level", &journal), false);
        manager.load(Recorder::new("hud", &journal), true);

        with_ctx(|ctx| {
            manager.set_current(level, ctx);
            assert_eq!(ctx.events.pending_count(), 1);
        });

        assert!(!manager.is_active(0));
        assert!(manager.is_active(level));
        assert!(!manager.is_active(2));
        assert_eq!(
            *journal.0.borrow(),
            vec!["menu:deactivate", "hud:deactivate", "level:activate"]
        );
    }

    #[test]
    fn test_unload_all_fires_hooks() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new();
        manager.load(Recorder::new("a", &journal), true);
        manager.load(Recorder::new("b", &journal), false);

        with_ctx(|ctx| manager.unload_all(ctx));

        assert!(manager.is_empty());
        assert_eq!(
            *journal.0.borrow(),
            vec!["a:deactivate", "a:unload", "b:unload"]
        );
    }

    #[test]
    fn test_index_of_finds_by_name() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new();
        manager.load(Recorder::new("menu", &journal), true);
        manager.load(Recorder::new("level", &journal), false);

        assert_eq!(manager.index_of("level"), Some(1));
        assert_eq!(manager.index_of("missing"), None);
    }

    #[test]
    fn test_state_accessors_reach_the_loaded_state() {
        let journal = Journal::default();
        let mut manager = GameStateManager::new();
        let menu = manager.load(Recorder::new("menu", &journal), true);

        assert_eq!(manager.state(menu).map(GameState::name), Some("menu"));
        assert!(manager.state(7).is_none());
        assert_eq!(
            manager.state_by_name("menu").map(GameState::name),
            Some("menu")
        );
        assert!(manager.state_mut(menu).is_some());
    }
}
