//! # Scene — GameObjects and Their Components
//!
//! A [`Scene`] owns every GameObject and one [`ComponentTable`] per component
//! type. Sibling lookups ("the collider on the same object as this body") are
//! a table index, never a pointer chase.
//!
//! ## Hierarchy
//!
//! Objects can be parented at creation. A [`Transform`] is local to its
//! parent, so an object's *true* position is the sum of the local positions
//! along its parent chain:
//!
//! ```text
//! root   (10, 0)                 true = (10, 0)
//! └─ arm  (2, 1)                 true = (12, 1)
//!    └─ hand (0, -1)             true = (12, 0)
//! ```
//!
//! Deleting an object deletes its whole subtree.
//!
//! Scenes are `Clone`. The game loop snapshots the scene on start and
//! restores the snapshot on stop.

use crate::components::{
    BoxCollider, Button, CharacterController, RigidBody, ScriptComponent, Transform,
};
use crate::ecs::entity::IdAllocator;
use crate::ecs::{Component, ComponentTable, ObjectId};
use crate::error::SceneError;
use crate::math::Vec2;

/// Hierarchy node data for one GameObject.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    name: String,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    /// Inactive objects keep their components but are skipped by scripts,
    /// physics, collision and button polling.
    pub active: bool,
}

impl GameObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }
}

/// A set of GameObjects and their components.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    ids: IdAllocator,
    objects: ComponentTable<GameObject>,
    /// Live objects in creation order.
    order: Vec<ObjectId>,
    transforms: ComponentTable<Transform>,
    colliders: ComponentTable<BoxCollider>,
    bodies: ComponentTable<RigidBody>,
    controllers: ComponentTable<CharacterController>,
    scripts: ComponentTable<ScriptComponent>,
    buttons: ComponentTable<Button>,
}

macro_rules! scene_components {
    ($($ty:ident => $field:ident),* $(,)?) => {
        $(
            impl Component for $ty {
                const NAME: &'static str = stringify!($ty);

                fn table(scene: &Scene) -> &ComponentTable<Self> {
                    &scene.$field
                }

                fn table_mut(scene: &mut Scene) -> &mut ComponentTable<Self> {
                    &mut scene.$field
                }
            }
        )*

        impl Scene {
            fn remove_components(&mut self, id: ObjectId) {
                $( self.$field.remove(id); )*
            }
        }
    };
}

scene_components! {
    Transform => transforms,
    BoxCollider => colliders,
    RigidBody => bodies,
    CharacterController => controllers,
    ScriptComponent => scripts,
    Button => buttons,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ids: IdAllocator::new(),
            objects: ComponentTable::new(),
            order: Vec::new(),
            transforms: ComponentTable::new(),
            colliders: ComponentTable::new(),
            bodies: ComponentTable::new(),
            controllers: ComponentTable::new(),
            scripts: ComponentTable::new(),
            buttons: ComponentTable::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Objects ──────────────────────────────────────────────────────

    /// Create a GameObject, optionally as the last child of `parent`.
    ///
    /// Fails only if `parent` is given and no longer exists.
    pub fn create_object(
        &mut self,
        name: &str,
        parent: Option<ObjectId>,
    ) -> Result<ObjectId, SceneError> {
        if let Some(parent) = parent {
            if !self.is_alive(parent) {
                return Err(SceneError::DeadObject(parent));
            }
        }

        let id = self.ids.allocate();
        self.objects.insert(
            id,
            GameObject {
                name: name.to_string(),
                parent,
                children: Vec::new(),
                active: true,
            },
        );
        self.order.push(id);
        if let Some(parent_obj) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent_obj.children.push(id);
        }
        Ok(id)
    }

    /// Delete an object and all its descendants.
    ///
    /// Returns `false` if the object was already gone.
    pub fn delete_object(&mut self, id: ObjectId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        if let Some(parent) = self.objects.get(id).and_then(GameObject::parent) {
            if let Some(parent_obj) = self.objects.get_mut(parent) {
                parent_obj.children.retain(|&c| c != id);
            }
        }

        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            if let Some(obj) = self.objects.get(doomed[i]) {
                doomed.extend_from_slice(&obj.children);
            }
            i += 1;
        }

        for &dead in &doomed {
            self.remove_components(dead);
            self.objects.remove(dead);
            self.ids.free(dead);
        }
        self.order.retain(|o| !doomed.contains(o));
        debug_assert_eq!(self.ids.alive_count(), self.order.len());
        log::debug!("Deleted {} object(s) rooted at {}", doomed.len(), id);
        true
    }

    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.ids.is_alive(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        if !self.is_alive(id) {
            return None;
        }
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        if !self.is_alive(id) {
            return None;
        }
        self.objects.get_mut(id)
    }

    /// First object with the given name, in creation order.
    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.objects.get(id).is_some_and(|o| o.name == name))
    }

    /// Name of an object, or `""` if it does not exist.
    pub fn object_name(&self, id: ObjectId) -> &str {
        self.object(id).map_or("", GameObject::name)
    }

    /// Whether the object exists and is active.
    pub fn is_active(&self, id: ObjectId) -> bool {
        self.object(id).is_some_and(|o| o.active)
    }

    /// All live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.order.iter().copied()
    }

    /// Live objects carrying a `T`, in creation order.
    pub fn objects_with<T: Component>(&self) -> Vec<ObjectId> {
        let table = T::table(self);
        self.order
            .iter()
            .copied()
            .filter(|&id| table.contains(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach a component, replacing any existing one of the same type.
    /// Returns the replaced component.
    ///
    /// # Panics
    ///
    /// Panics if the object does not exist.
    pub fn insert<T: Component>(&mut self, id: ObjectId, component: T) -> Option<T> {
        assert!(
            self.is_alive(id),
            "Cannot insert component `{}` on dead object {:?}",
            T::NAME,
            id
        );
        T::table_mut(self).insert(id, component)
    }

    pub fn remove<T: Component>(&mut self, id: ObjectId) -> Option<T> {
        if !self.is_alive(id) {
            return None;
        }
        T::table_mut(self).remove(id)
    }

    /// Returns `None` if the object is dead or has no `T`.
    pub fn get<T: Component>(&self, id: ObjectId) -> Option<&T> {
        if !self.is_alive(id) {
            return None;
        }
        T::table(self).get(id)
    }

    pub fn get_mut<T: Component>(&mut self, id: ObjectId) -> Option<&mut T> {
        if !self.is_alive(id) {
            return None;
        }
        T::table_mut(self).get_mut(id)
    }

    pub fn has<T: Component>(&self, id: ObjectId) -> bool {
        self.get::<T>(id).is_some()
    }

    /// Like [`get`](Self::get), but says why the component is unavailable.
    pub fn require<T: Component>(&self, id: ObjectId) -> Result<&T, SceneError> {
        if !self.is_alive(id) {
            return Err(SceneError::DeadObject(id));
        }
        T::table(self).get(id).ok_or(SceneError::MissingComponent {
            object: id,
            component: T::NAME,
        })
    }

    pub fn require_mut<T: Component>(&mut self, id: ObjectId) -> Result<&mut T, SceneError> {
        if !self.is_alive(id) {
            return Err(SceneError::DeadObject(id));
        }
        T::table_mut(self)
            .get_mut(id)
            .ok_or(SceneError::MissingComponent {
                object: id,
                component: T::NAME,
            })
    }

    // ── Positions ────────────────────────────────────────────────────

    /// World position of an object: its local position plus that of every
    /// ancestor. Ancestors without a [`Transform`] contribute nothing.
    ///
    /// Returns `None` if the object itself has no transform.
    pub fn true_position(&self, id: ObjectId) -> Option<Vec2> {
        let own = self.get::<Transform>(id)?.position;
        Some(own + self.parent_offset(id))
    }

    /// Move an object so its world position becomes `position`.
    ///
    /// Returns `false` if the object has no transform.
    pub fn set_true_position(&mut self, id: ObjectId, position: Vec2) -> bool {
        let offset = self.parent_offset(id);
        match self.get_mut::<Transform>(id) {
            Some(transform) => {
                transform.position = position - offset;
                true
            }
            None => false,
        }
    }

    fn parent_offset(&self, id: ObjectId) -> Vec2 {
        let mut offset = Vec2::ZERO;
        let mut cursor = self.object(id).and_then(GameObject::parent);
        while let Some(ancestor) = cursor {
            if let Some(t) = self.transforms.get(ancestor) {
                offset += t.position;
            }
            cursor = self.object(ancestor).and_then(GameObject::parent);
        }
        offset
    }

    // ── Body shortcuts ───────────────────────────────────────────────

    /// [`RigidBody::add_force`] on the object's body.
    pub fn add_force(&mut self, id: ObjectId, direction: Vec2, power: f32) -> Result<(), SceneError> {
        self.require_mut::<RigidBody>(id)?.add_force(direction, power);
        Ok(())
    }

    /// [`RigidBody::add_velocity`] on the object's body, gated by its sibling
    /// collider when there is one.
    pub fn add_velocity(&mut self, id: ObjectId, velocity: Vec2) -> Result<Vec2, SceneError> {
        self.require::<RigidBody>(id)?;
        let collider = self.colliders.get(id);
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(SceneError::MissingComponent {
                object: id,
                component: RigidBody::NAME,
            })?;
        Ok(body.add_velocity(velocity, collider))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
