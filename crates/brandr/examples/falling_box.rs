//! Falling box — a crate dropped onto a floor, stepped headlessly.
//!
//! Pass a JSON config path to try another integrator:
//!
//! ```text
//! cargo run --example falling_box -- config.json
//! BRANDR_PHYSICS_SYSTEM=Verlet cargo run --example falling_box
//! ```

use brandr::diag::init_logger;
use brandr::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    }
    .with_env_overrides();

    let mut scene = Scene::new("falling box");

    let floor = scene.create_object("floor", None)?;
    scene.insert(floor, Transform::from_xy(0.0, -5.0));
    scene.insert(floor, BoxCollider::new(40.0, 2.0));

    let crate_id = scene.create_object("crate", None)?;
    scene.insert(crate_id, Transform::from_xy(0.0, 4.0));
    scene.insert(crate_id, BoxCollider::new(1.0, 1.0));
    scene.insert(crate_id, RigidBody::new().with_terminal_velocity(0.5));

    let clock = ManualClock::new();
    let mut game = GameLoop::new(ScriptRegistry::new()).with_clock(clock.clone());
    let mut ctx = SimulationContext::new(scene, config);

    game.start(&mut ctx);
    for tick in 1..=120 {
        clock.advance_ms(16);
        game.update(&mut ctx);

        if tick % 10 == 0 {
            let position = ctx.scene.true_position(crate_id).unwrap_or_default();
            let body = ctx.scene.require::<RigidBody>(crate_id)?;
            log::info!(
                "tick {tick:>3}: y = {:>8.3}  velocity = {:>7.3}  grounded = {}",
                position.y,
                body.velocity().y,
                body.is_grounded()
            );
        }
    }

    log::info!(
        "{} frames, {:.0} fps average over {:?}",
        game.frames_counted(),
        game.average_fps(),
        game.time_elapsed()
    );
    game.stop(&mut ctx);
    Ok(())
}
