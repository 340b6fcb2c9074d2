//! # Scene Storage
//!
//! GameObjects are plain ids; their data lives in one [`ComponentTable`] per
//! component type, owned by the [`Scene`](crate::scene::Scene).
//!
//! - [`entity`] — Generational [`ObjectId`]s
//! - [`storage`] — Index-addressed [`ComponentTable`]
//!
//! The [`Component`] trait ties a type to its table so the scene can offer a
//! single generic `get::<T>()` / `insert()` API.

pub mod entity;
pub mod storage;

pub use entity::ObjectId;
pub use storage::ComponentTable;

use crate::scene::Scene;

/// A type that can be attached to a GameObject.
///
/// Every component type has exactly one table in the [`Scene`]; implementors
/// just point at it.
pub trait Component: Sized + 'static {
    /// Display name, used in logs and error messages.
    const NAME: &'static str;

    fn table(scene: &Scene) -> &ComponentTable<Self>;
    fn table_mut(scene: &mut Scene) -> &mut ComponentTable<Self>;
}
