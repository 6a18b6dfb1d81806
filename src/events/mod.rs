//! Event queue and listener dispatch
//!
//! Engine events queue up during one frame and are dispatched to every
//! registered listener in order during the next. Listeners feed the input
//! manager, request shutdown, or react to gameplay events without coupling
//! to the systems that produced them.

mod listeners;

pub use listeners::{
    ALPHA_KEYS, KeyboardListener, MOUSE_BUTTONS, MouseListener, NUM_KEYS, QuitListener,
    SPECIAL_KEYS,
};

use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::input::Input;
use crate::physics::Contact;
use crate::scene::NodeId;

/// Events for inter-system communication.
///
/// The `#[non_exhaustive]` attribute allows adding new variants without
/// breaking downstream code that uses wildcard patterns.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum EngineEvent {
    /// Request to shut the engine down
    Quit,
    /// A key went down
    KeyDown(KeyCode),
    /// A key came back up
    KeyUp(KeyCode),
    /// The mouse moved to a new position
    MouseMoved(Vec2),
    /// A mouse button went down
    MouseButtonDown(MouseButton),
    /// A mouse button came back up
    MouseButtonUp(MouseButton),
    /// Two scene nodes collided
    Collision {
        /// First node of the pair
        a: NodeId,
        /// Second node of the pair
        b: NodeId,
        /// Contact for the first node
        contact_a: Contact,
        /// Contact for the second node
        contact_b: Contact,
    },
    /// The current game state changed
    StateChanged {
        /// Name of the newly current state
        name: String,
    },
}

/// Mutable engine surfaces a listener may touch while handling an event.
pub struct ListenerCtx<'a> {
    /// Input state manager
    pub input: &'a mut Input,
    /// Set to request engine shutdown
    pub quit_requested: &'a mut bool,
}

/// A handler dispatched for every event of every frame.
///
/// Listeners run in registration order and each sees each event exactly
/// once per frame.
pub trait EventListener {
    /// Name used in logs
    fn name(&self) -> &str;

    /// React to a single event
    fn handle(&mut self, event: &EngineEvent, ctx: &mut ListenerCtx<'_>);
}

/// Frame-delayed event queue.
///
/// Any system may push at any time during a tick; the engine promotes the
/// queued events to the current frame at the next tick's start and hands
/// them out as a slice. Everyone dispatching against a frame therefore
/// sees the same events in the same order, and an event pushed while
/// handling another can never be observed in the frame that produced it.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Events queued for the next frame
    incoming: Vec<EngineEvent>,
    /// The frame being dispatched
    current: Vec<EngineEvent>,
}

impl EventQueue {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next frame
    #[inline]
    pub fn push(&mut self, event: EngineEvent) {
        self.incoming.push(event);
    }

    /// Start a new frame.
    ///
    /// Everything queued since the previous call becomes the current
    /// frame; whatever was current is discarded. The engine calls this
    /// once at the top of every tick.
    pub fn begin_frame(&mut self) {
        self.current.clear();
        std::mem::swap(&mut self.current, &mut self.incoming);
    }

    /// The current frame's events, in push order
    #[must_use]
    #[inline]
    pub fn current(&self) -> &[EngineEvent] {
        &self.current
    }

    /// Whether the current frame has no events
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Number of events in the current frame
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Number of events queued for the next frame
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.incoming.len()
    }

    /// Drop everything, queued and current.
    ///
    /// Useful for state transitions.
    pub fn clear(&mut self) {
        self.incoming.clear();
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_surfaces_on_the_following_frame() {
        let mut queue = EventQueue::new();

        // A key arrives mid-frame; gameplay must not see it yet
        queue.push(EngineEvent::KeyDown(KeyCode::Space));
        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 1);

        queue.begin_frame();
        assert!(matches!(
            queue.current(),
            [EngineEvent::KeyDown(KeyCode::Space)]
        ));
    }

    #[test]
    fn test_reaction_pushed_during_dispatch_waits_a_frame() {
        let mut queue = EventQueue::new();
        queue.push(EngineEvent::KeyDown(KeyCode::Escape));
        queue.begin_frame();

        // A listener reacting to the key press requests a quit
        for event in queue.current().to_vec() {
            if matches!(event, EngineEvent::KeyDown(KeyCode::Escape)) {
                queue.push(EngineEvent::Quit);
            }
        }
        assert_eq!(queue.len(), 1, "the reaction is not visible this frame");

        queue.begin_frame();
        assert!(matches!(queue.current(), [EngineEvent::Quit]));
    }

    #[test]
    fn test_begin_frame_discards_the_previous_frame() {
        let mut queue = EventQueue::new();
        queue.push(EngineEvent::MouseButtonDown(MouseButton::Left));
        queue.begin_frame();
        assert_eq!(queue.len(), 1);

        // Nothing new arrived; last frame's click must not replay
        queue.begin_frame();
        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_clear_drops_queued_and_current() {
        let mut queue = EventQueue::new();
        queue.push(EngineEvent::StateChanged {
            name: "level".to_string(),
        });
        queue.begin_frame();
        queue.push(EngineEvent::Quit);

        // A state transition throws away everything in flight
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }
}
