//! Minimal demo game
//!
//! Spawns a single controllable square and runs the engine loop for a
//! few seconds of simulated play.

use aspen::prelude::*;

struct DemoState {
    player: Option<NodeId>,
    controller: PlayerController8Way,
    square: Geometry,
}

impl DemoState {
    fn new() -> Self {
        Self {
            player: None,
            controller: PlayerController8Way::wasd(4.0),
            square: Geometry::rectangle(32.0, 32.0, Color::BLACK),
        }
    }
}

impl GameState for DemoState {
    fn name(&self) -> &str {
        "Demo"
    }

    fn on_start(&mut self, ctx: &mut StateContext<'_>) {
        let root = ctx.scene.root();
        let player = ctx.scene.spawn_child(root, "Player");
        if let Some(node) = ctx.scene.node_mut(player) {
            node.transform = Some(Transform::from_position(Vec2::new(64.0, 64.0)));
            node.collider = Some(Collider::aabb(32.0, 32.0));
            node.rigidbody = Some(Rigidbody::default());
        }
        self.player = Some(player);
        log::info!("demo started with shape {:?}", self.square.shape);
    }

    fn on_update(&mut self, ctx: &mut StateContext<'_>) {
        let motion = self.controller.update(ctx.input, ctx.dt);
        if let Some(player) = self.player
            && let Some(node) = ctx.scene.node_mut(player)
            && let Some(transform) = node.transform.as_mut()
        {
            transform.translate(motion);
        }
    }
}

fn main() {
    let mut engine = Engine::new(EngineConfig::all().with_title("Aspen Demo"));
    let demo = engine.load_state(Box::new(DemoState::new()), false);
    engine.set_current_state(demo);

    // Headless run, bounded at a few hundred frames
    let mut frames = 0u32;
    while engine.is_running() {
        engine.tick();
        frames += 1;
        if frames >= 300 {
            engine.push_event(EngineEvent::Quit);
        }
    }
}
