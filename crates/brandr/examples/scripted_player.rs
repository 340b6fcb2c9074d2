//! Scripted player — a script walks a character into a wall, and a button
//! click during play flips its direction.
//!
//! Shows the full tick: scripts, collision, physics, buttons. Stopping the
//! loop restores the authored scene.

use brandr::diag::init_logger;
use brandr::prelude::*;

/// Pushes its owner along `direction` while grounded.
struct Walker {
    direction: f32,
}

impl Script for Walker {
    fn name(&self) -> &str {
        "Walker"
    }

    fn start(&mut self, ctx: &mut ScriptContext<'_>) {
        log::info!("{} starts walking", ctx.owner_name());
    }

    fn update(&mut self, ctx: &mut ScriptContext<'_>, _delta_time: f32) {
        // The turn-around button flips the controller's walk speed.
        if let Some(controller) = ctx.scene.get::<CharacterController>(ctx.owner) {
            self.direction = controller.walk_speed.signum();
        }
        let grounded = ctx.body().is_some_and(RigidBody::is_grounded);
        if let Some(controller) = ctx.scene.get_mut::<CharacterController>(ctx.owner) {
            controller.set_moving(grounded);
        }
        if grounded {
            if let Err(err) = ctx.add_velocity(Vec2::new(self.direction * 0.05, 0.0)) {
                log::warn!("{err}");
            }
        }
    }
}

fn turn_around(_button: ObjectId, scene: &mut Scene) {
    let Some(player) = scene.object_by_name("player") else {
        return;
    };
    if let Some(controller) = scene.get_mut::<CharacterController>(player) {
        controller.walk_speed = -controller.walk_speed;
        log::info!("Turned around");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let mut scene = Scene::new("walkway");

    let floor = scene.create_object("floor", None)?;
    scene.insert(floor, Transform::from_xy(0.0, -1.0));
    scene.insert(floor, BoxCollider::new(20.0, 1.0));

    let wall = scene.create_object("wall", None)?;
    scene.insert(wall, Transform::from_xy(4.0, 2.0));
    scene.insert(wall, BoxCollider::new(1.0, 6.0));

    let player = scene.create_object("player", None)?;
    scene.insert(player, Transform::from_xy(0.0, -0.02));
    scene.insert(player, BoxCollider::new(1.0, 1.0));
    scene.insert(player, RigidBody::new());
    scene.insert(player, CharacterController::new(0.2, 0.1));
    scene.insert(player, ScriptComponent::new("Walker"));

    let ui = scene.create_object("turn-around button", None)?;
    scene.insert(ui, Transform::from_xy(-8.0, 8.0));
    scene.insert(ui, Button::new(2.0, 1.0).on_left_click(turn_around));

    let mut registry = ScriptRegistry::new();
    registry.register("Walker", || Box::new(Walker { direction: 1.0 }));

    let clock = ManualClock::new();
    let mut game = GameLoop::new(registry).with_clock(clock.clone());
    let mut ctx = SimulationContext::new(scene, EngineConfig::default().with_env_overrides());

    game.start(&mut ctx);
    for tick in 1..=240 {
        // Click the button once, halfway through.
        if tick == 120 {
            ctx.pointer.move_to(Vec2::new(-8.0, 8.0));
            ctx.pointer.press(MouseButton::Left);
        } else {
            ctx.pointer.release(MouseButton::Left);
        }

        clock.advance_ms(16);
        game.update(&mut ctx);

        if tick % 20 == 0 {
            let x = ctx.scene.true_position(player).unwrap_or_default().x;
            let touching_wall = ctx
                .scene
                .get::<BoxCollider>(player)
                .is_some_and(|c| c.is_colliding_static(Side::Right));
            log::info!("tick {tick:>3}: x = {x:>7.3}  against wall = {touching_wall}");
        }
    }

    println!("{}", ctx.profiler.to_json()?);
    game.stop(&mut ctx);
    log::info!(
        "After stop the player is back at {:?}",
        ctx.scene.true_position(player)
    );
    Ok(())
}
