//! # Components
//!
//! Plain data attached to GameObjects. Each type has one
//! [`ComponentTable`](crate::ecs::ComponentTable) in the
//! [`Scene`](crate::scene::Scene).
//!
//! - [`Transform`] — local position, scale and rotation
//! - [`BoxCollider`] — collision box and per-edge contact state
//! - [`RigidBody`] — force accumulation and integration
//! - [`CharacterController`] — movement intent read by physics
//! - [`ScriptComponent`] — which script an object runs during play
//! - [`Button`] — clickable area with left/right click actions

pub mod button;
pub mod collider;
pub mod controller;
pub mod rigid_body;
pub mod script;
pub mod transform;

pub use button::{Button, ButtonAction};
pub use collider::{BoxCollider, EdgeContact, Side};
pub use controller::CharacterController;
pub use rigid_body::RigidBody;
pub use script::ScriptComponent;
pub use transform::Transform;
