//! Context — everything a play session reads and writes.
//!
//! [`SimulationContext`] bundles the active [`Scene`], the engine config, the
//! profiler and the pointer state. The [`GameLoop`](crate::game_loop::GameLoop)
//! takes it by `&mut` on every call; nothing lives in globals.

use crate::config::EngineConfig;
use crate::input::PointerState;
use crate::profiler::Profiler;
use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub scene: Scene,
    pub config: EngineConfig,
    pub profiler: Profiler,
    pub pointer: PointerState,
}

impl SimulationContext {
    pub fn new(scene: Scene, config: EngineConfig) -> Self {
        let profiler = Profiler::new(config.profiler_history);
        Self {
            scene,
            config,
            profiler,
            pointer: PointerState::new(),
        }
    }

    /// Replace the active scene, returning the previous one.
    pub fn load_scene(&mut self, scene: Scene) -> Scene {
        log::info!("Loading scene '{}'", scene.name());
        std::mem::replace(&mut self.scene, scene)
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new(Scene::default(), EngineConfig::default())
    }
}
