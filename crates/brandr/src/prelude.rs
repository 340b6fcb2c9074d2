//! Convenience re-exports — `use brandr::prelude::*` for the common items.

pub use crate::collision::{AabbCollisionPass, CollisionPass};
pub use crate::components::{
    BoxCollider, Button, ButtonAction, CharacterController, EdgeContact, RigidBody,
    ScriptComponent, Side, Transform,
};
pub use crate::config::EngineConfig;
pub use crate::context::SimulationContext;
pub use crate::ecs::{Component, ObjectId};
pub use crate::error::{ConfigError, SceneError};
pub use crate::game_loop::GameLoop;
pub use crate::input::{MouseButton, PointerState};
pub use crate::math::{Edges, Vec2};
pub use crate::physics::IntegrationScheme;
pub use crate::profiler::Profiler;
pub use crate::scene::{GameObject, Scene};
pub use crate::script::{Script, ScriptContext, ScriptRegistry};
pub use crate::time::{Clock, ManualClock, SystemClock};
