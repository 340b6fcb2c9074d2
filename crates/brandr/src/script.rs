//! # Scripts — Per-Object Behavior During Play
//!
//! A [`ScriptComponent`](crate::components::ScriptComponent) only names a
//! script tag. When play starts, the game loop looks each tag up in the
//! [`ScriptRegistry`] and builds a fresh [`Script`] instance for the owning
//! object:
//!
//! ```ignore
//! let mut registry = ScriptRegistry::new();
//! registry.register("Mover", || Box::new(Mover::default()));
//! ```
//!
//! Instances live only for the play session. Stopping the loop drops them.

use std::collections::HashMap;
use std::fmt;

use crate::components::{BoxCollider, RigidBody};
use crate::ecs::ObjectId;
use crate::error::SceneError;
use crate::input::PointerState;
use crate::math::Vec2;
use crate::scene::Scene;

/// What a script sees while it runs: its owner and the scene around it.
pub struct ScriptContext<'a> {
    pub owner: ObjectId,
    pub scene: &'a mut Scene,
    pub pointer: &'a PointerState,
}

impl ScriptContext<'_> {
    pub fn owner_name(&self) -> &str {
        self.scene.object_name(self.owner)
    }

    pub fn position(&self) -> Option<Vec2> {
        self.scene.true_position(self.owner)
    }

    pub fn body(&self) -> Option<&RigidBody> {
        self.scene.get::<RigidBody>(self.owner)
    }

    pub fn body_mut(&mut self) -> Option<&mut RigidBody> {
        self.scene.get_mut::<RigidBody>(self.owner)
    }

    pub fn collider(&self) -> Option<&BoxCollider> {
        self.scene.get::<BoxCollider>(self.owner)
    }

    /// Push the owner's rigid body.
    pub fn add_force(&mut self, direction: Vec2, power: f32) -> Result<(), SceneError> {
        self.scene.add_force(self.owner, direction, power)
    }

    /// Add velocity to the owner's rigid body, respecting static walls.
    pub fn add_velocity(&mut self, velocity: Vec2) -> Result<Vec2, SceneError> {
        self.scene.add_velocity(self.owner, velocity)
    }
}

/// Behavior attached to a GameObject for the duration of a play session.
pub trait Script {
    /// Script type name, used in profiler keys and logs.
    fn name(&self) -> &str;

    /// Called once when the instance is created, before [`start`](Self::start).
    fn awake(&mut self, _ctx: &mut ScriptContext<'_>) {}

    fn start(&mut self, _ctx: &mut ScriptContext<'_>) {}

    /// Called once per tick. `delta_time` is in milliseconds.
    fn update(&mut self, ctx: &mut ScriptContext<'_>, delta_time: f32);
}

pub type ScriptFactory = Box<dyn Fn() -> Box<dyn Script>>;

/// Maps script tags to factories.
#[derive(Default)]
pub struct ScriptRegistry {
    factories: HashMap<String, ScriptFactory>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `tag`, replacing any previous one.
    pub fn register(&mut self, tag: &str, factory: impl Fn() -> Box<dyn Script> + 'static) {
        if self
            .factories
            .insert(tag.to_string(), Box::new(factory))
            .is_some()
        {
            log::debug!("Script '{tag}' re-registered");
        }
    }

    /// Register a script type built with `Default`.
    pub fn register_default<S: Script + Default + 'static>(&mut self, tag: &str) {
        self.register(tag, || Box::new(S::default()));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    pub fn instantiate(&self, tag: &str) -> Option<Box<dyn Script>> {
        self.factories.get(tag).map(|factory| factory())
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
