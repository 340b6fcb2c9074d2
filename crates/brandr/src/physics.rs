//! # Physics Step
//!
//! Integrates every active [`RigidBody`] in two sweeps:
//!
//! ```text
//! collision pass (already run)
//!   → calculate_physics for every body   (forces, acceleration)
//!   → apply_physics for every body       (move transforms)
//! ```
//!
//! All bodies finish calculating before any of them moves, so the order
//! objects were created in never changes the forces one of them sees. Each
//! body is copied out of its table for the duration of its phase so it can
//! read and move its siblings through the [`Scene`].
//!
//! Static bodies are never integrated.

use std::fmt;
use std::str::FromStr;

use crate::components::{RigidBody, Transform};
use crate::ecs::ObjectId;
use crate::error::ConfigError;
use crate::scene::Scene;

/// Which integrator turns acceleration into displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationScheme {
    #[default]
    Euler,
    Verlet,
    /// Bodies accumulate forces but never accelerate or move.
    Disabled,
}

impl FromStr for IntegrationScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Euler" => Ok(IntegrationScheme::Euler),
            "Verlet" => Ok(IntegrationScheme::Verlet),
            other => Err(ConfigError::UnknownPhysicsSystem(other.to_string())),
        }
    }
}

impl fmt::Display for IntegrationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationScheme::Euler => write!(f, "Euler"),
            IntegrationScheme::Verlet => write!(f, "Verlet"),
            IntegrationScheme::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Bodies that take part in this tick: active, dynamic, with a transform.
fn simulated_bodies(scene: &Scene) -> Vec<ObjectId> {
    scene
        .objects_with::<RigidBody>()
        .into_iter()
        .filter(|&id| scene.is_active(id))
        .filter(|&id| scene.get::<RigidBody>(id).is_some_and(|b| !b.is_static()))
        .filter(|&id| {
            let has_transform = scene.has::<Transform>(id);
            if !has_transform {
                log::warn!(
                    "Skipping rigid body on '{}' ({}): no Transform",
                    scene.object_name(id),
                    id
                );
            }
            has_transform
        })
        .collect()
}

/// Run both physics phases for every simulated body. Returns how many bodies
/// were stepped.
///
/// The collision pass must have run for this tick already.
pub fn step_physics(scene: &mut Scene, scheme: IntegrationScheme, delta_time: f32) -> usize {
    let bodies = simulated_bodies(scene);

    for &id in &bodies {
        with_body(scene, id, |body, scene| {
            body.calculate_physics(id, scene, scheme)
        });
    }

    let mut moved = 0usize;
    for &id in &bodies {
        if with_body(scene, id, |body, scene| {
            body.apply_physics(id, scene, scheme, delta_time)
        }) == Some(true)
        {
            moved += 1;
        }
    }

    log::trace!(
        "Physics step ({scheme}, dt={delta_time}ms): {} bodies, {moved} moved",
        bodies.len()
    );
    bodies.len()
}

/// Copy the body out, run `f` with the scene free for sibling access, and
/// write the body back.
fn with_body<R>(
    scene: &mut Scene,
    id: ObjectId,
    f: impl FnOnce(&mut RigidBody, &mut Scene) -> R,
) -> Option<R> {
    let mut body = *scene.get::<RigidBody>(id)?;
    let result = f(&mut body, scene);
    if let Some(slot) = scene.get_mut::<RigidBody>(id) {
        *slot = body;
    }
    Some(result)
}
