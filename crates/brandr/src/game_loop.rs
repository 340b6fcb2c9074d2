//! # GameLoop — Play Sessions
//!
//! The loop is a small state machine over a [`SimulationContext`]:
//!
//! ```text
//!            start()               pause()
//! Stopped ───────────▶ Running ◀──────────▶ Paused
//!    ▲                    │      unpause()     │
//!    └──── stop() ────────┴────────────────────┘
//! ```
//!
//! `start()` snapshots the scene and instantiates one script per
//! [`ScriptComponent`]. `stop()` drops the scripts and puts the snapshot
//! back, so nothing done during play survives it.
//!
//! ## One tick
//!
//! [`GameLoop::update`] runs, in order:
//!
//! 1. delta time since the previous tick (milliseconds)
//! 2. `update` on every active script, in discovery order, each timed into
//!    the profiler
//! 3. the collision pass
//! 4. `calculate_physics` for every body, then `apply_physics` for every body
//! 5. button polling: at most one left and one right click per press
//!
//! Everything happens synchronously inside the call.

use std::time::Duration;

use crate::collision::{AabbCollisionPass, CollisionPass};
use crate::components::{Button, ScriptComponent};
use crate::config::EngineConfig;
use crate::context::SimulationContext;
use crate::ecs::ObjectId;
use crate::input::MouseButton;
use crate::physics::{self, IntegrationScheme};
use crate::scene::Scene;
use crate::script::{Script, ScriptContext, ScriptRegistry};
use crate::time::{self, Clock, SystemClock};

struct ScriptInstance {
    owner: ObjectId,
    script: Box<dyn Script>,
    /// Profiler key: `"<script>-on-<object>"`.
    process: String,
}

/// Drives scripts, collision and physics for one play session at a time.
pub struct GameLoop {
    clock: Box<dyn Clock>,
    registry: ScriptRegistry,
    collision: Box<dyn CollisionPass>,
    instances: Vec<ScriptInstance>,
    started: bool,
    /// Clock reading when the current pause began.
    paused_at: Option<Duration>,
    start_time: Duration,
    paused_total: Duration,
    last_frame: Duration,
    delta_time: f32,
    frames_counted: u64,
    /// Physics system name `scheme` was resolved from.
    physics_system: String,
    scheme: IntegrationScheme,
    left_clicked: bool,
    right_clicked: bool,
    snapshot: Option<Scene>,
}

impl GameLoop {
    /// A loop on the system clock with the bundled AABB collision pass.
    pub fn new(registry: ScriptRegistry) -> Self {
        Self {
            clock: Box::new(SystemClock::new()),
            registry,
            collision: Box::new(AabbCollisionPass),
            instances: Vec::new(),
            started: false,
            paused_at: None,
            start_time: Duration::ZERO,
            paused_total: Duration::ZERO,
            last_frame: Duration::ZERO,
            delta_time: 0.0,
            frames_counted: 0,
            physics_system: String::new(),
            scheme: IntegrationScheme::default(),
            left_clicked: false,
            right_clicked: false,
            snapshot: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_collision_pass(mut self, pass: impl CollisionPass + 'static) -> Self {
        self.collision = Box::new(pass);
        self
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ScriptRegistry {
        &mut self.registry
    }

    // ── State transitions ────────────────────────────────────────────

    /// Begin a play session on `ctx.scene`.
    ///
    /// Does nothing if a session is already running.
    pub fn start(&mut self, ctx: &mut SimulationContext) {
        if self.started {
            log::warn!("GameLoop::start called while already started; ignoring");
            return;
        }

        let now = self.clock.now();
        self.start_time = now;
        self.last_frame = now;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.delta_time = 0.0;
        self.frames_counted = 0;
        self.left_clicked = false;
        self.right_clicked = false;
        self.resolve_scheme(&ctx.config);
        self.snapshot = Some(ctx.scene.clone());

        self.instantiate_scripts(&ctx.scene);

        for instance in &mut self.instances {
            if !ctx.profiler.add_process(&instance.process) {
                log::warn!(
                    "Profiler process '{}' is shared by several script instances; \
                     their samples are merged",
                    instance.process
                );
            }
            let mut script_ctx = ScriptContext {
                owner: instance.owner,
                scene: &mut ctx.scene,
                pointer: &ctx.pointer,
            };
            instance.script.awake(&mut script_ctx);
            instance.script.start(&mut script_ctx);
        }

        self.started = true;
        log::info!(
            "Started scene '{}' with {} script(s), {} physics",
            ctx.scene.name(),
            self.instances.len(),
            self.scheme
        );
    }

    fn instantiate_scripts(&mut self, scene: &Scene) {
        self.instances.clear();
        for owner in scene.objects_with::<ScriptComponent>() {
            let Some(component) = scene.get::<ScriptComponent>(owner) else {
                continue;
            };
            let tag = component.attached_script();
            match self.registry.instantiate(tag) {
                Some(script) => {
                    let process = format!("{}-on-{}", script.name(), scene.object_name(owner));
                    log::debug!("Attached script {process}");
                    self.instances.push(ScriptInstance {
                        owner,
                        script,
                        process,
                    });
                }
                None => log::warn!(
                    "No script registered for '{}' on '{}'; skipping",
                    tag,
                    scene.object_name(owner)
                ),
            }
        }
    }

    fn resolve_scheme(&mut self, config: &EngineConfig) {
        self.scheme = config.integration_scheme();
        self.physics_system.clone_from(&config.physics_system);
        log::debug!("Physics system '{}' resolved to {}", self.physics_system, self.scheme);
    }

    /// Run one tick. Does nothing while stopped or paused.
    ///
    /// The physics system is re-read from `ctx.config` every tick, so a
    /// change takes effect on the next physics step.
    pub fn update(&mut self, ctx: &mut SimulationContext) {
        if !self.started || self.is_paused() {
            return;
        }

        self.frames_counted += 1;
        ctx.profiler.record_frame();

        let now = self.clock.now();
        self.delta_time = time::as_millis_f32(now.saturating_sub(self.last_frame));
        self.last_frame = now;
        let delta_time = self.delta_time;

        for instance in &mut self.instances {
            let running = ctx.scene.is_active(instance.owner)
                && ctx
                    .scene
                    .get::<ScriptComponent>(instance.owner)
                    .is_some_and(|c| c.active);
            if !running {
                continue;
            }

            #[cfg(feature = "diagnostics")]
            let started_at = std::time::Instant::now();

            let mut script_ctx = ScriptContext {
                owner: instance.owner,
                scene: &mut ctx.scene,
                pointer: &ctx.pointer,
            };
            instance.script.update(&mut script_ctx, delta_time);

            #[cfg(feature = "diagnostics")]
            ctx.profiler
                .add_sample(&instance.process, started_at.elapsed());
        }

        self.collision.detect(&mut ctx.scene);
        if ctx.config.physics_system != self.physics_system {
            self.resolve_scheme(&ctx.config);
        }
        physics::step_physics(&mut ctx.scene, self.scheme, delta_time);
        self.poll_buttons(ctx);
    }

    /// Freeze elapsed-time accounting. Only has an effect while running.
    pub fn pause(&mut self) {
        if self.started && self.paused_at.is_none() {
            self.paused_at = Some(self.clock.now());
            log::info!("Paused");
        }
    }

    /// Resume after [`pause`](Self::pause). The paused interval is excluded
    /// from elapsed time and from the next delta time.
    pub fn unpause(&mut self) {
        if !self.started {
            return;
        }
        if let Some(paused_at) = self.paused_at.take() {
            let now = self.clock.now();
            self.paused_total += now.saturating_sub(paused_at);
            self.last_frame = now;
            log::info!("Unpaused");
        }
    }

    /// End the play session: drop scripts and their profiler entries, and
    /// restore the scene as it was at [`start`](Self::start).
    pub fn stop(&mut self, ctx: &mut SimulationContext) {
        if !self.started {
            return;
        }

        for instance in self.instances.drain(..) {
            ctx.profiler.remove_process(&instance.process);
        }
        if let Some(snapshot) = self.snapshot.take() {
            ctx.scene = snapshot;
        }

        log::info!(
            "Stopped after {} frame(s), {:.1} ms",
            self.frames_counted,
            time::as_millis_f32(self.time_elapsed())
        );

        self.started = false;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.frames_counted = 0;
        self.delta_time = 0.0;
        self.left_clicked = false;
        self.right_clicked = false;
    }

    // ── Buttons ──────────────────────────────────────────────────────

    /// The hovered button on the highest layer. Ties go to the most
    /// recently created object.
    fn top_level_button(ctx: &SimulationContext) -> Option<(ObjectId, Button)> {
        let pointer = ctx.pointer.position();
        ctx.scene
            .objects_with::<Button>()
            .into_iter()
            .filter(|&id| ctx.scene.is_active(id))
            .filter_map(|id| {
                let button = ctx.scene.get::<Button>(id)?;
                let position = ctx.scene.true_position(id)?;
                (button.active && button.edges_at(position).contains(pointer))
                    .then(|| (id, button.clone()))
            })
            .max_by_key(|(_, button)| button.active_layer)
    }

    fn poll_buttons(&mut self, ctx: &mut SimulationContext) {
        let left_held = ctx.pointer.is_held(MouseButton::Left);
        let right_held = ctx.pointer.is_held(MouseButton::Right);

        if !left_held {
            self.left_clicked = false;
        }
        if !right_held {
            self.right_clicked = false;
        }
        if !(left_held && !self.left_clicked) && !(right_held && !self.right_clicked) {
            return;
        }

        let Some((owner, button)) = Self::top_level_button(ctx) else {
            return;
        };

        if left_held && !self.left_clicked {
            if let Some(action) = button.on_left_click {
                self.left_clicked = true;
                log::debug!("Left click on '{}'", ctx.scene.object_name(owner));
                action(owner, &mut ctx.scene);
            }
        }
        if right_held && !self.right_clicked {
            if let Some(action) = button.on_right_click {
                self.right_clicked = true;
                log::debug!("Right click on '{}'", ctx.scene.object_name(owner));
                action(owner, &mut ctx.scene);
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.started && self.paused_at.is_some()
    }

    /// Play time since [`start`](Self::start), excluding paused intervals.
    /// Frozen while paused; zero while stopped.
    pub fn time_elapsed(&self) -> Duration {
        if !self.started {
            return Duration::ZERO;
        }
        let end = self.paused_at.unwrap_or_else(|| self.clock.now());
        end.saturating_sub(self.start_time)
            .saturating_sub(self.paused_total)
    }

    /// Milliseconds between the two most recent ticks.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn frames_counted(&self) -> u64 {
        self.frames_counted
    }

    /// Frames per second averaged over the whole session.
    pub fn average_fps(&self) -> f32 {
        let elapsed_ms = time::as_millis_f32(self.time_elapsed());
        if elapsed_ms <= 0.0 {
            return 0.0;
        }
        self.frames_counted as f32 / elapsed_ms * 1000.0
    }

    pub fn script_count(&self) -> usize {
        self.instances.len()
    }

    pub fn integration_scheme(&self) -> IntegrationScheme {
        self.scheme
    }
}
