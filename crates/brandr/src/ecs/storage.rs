//! # ComponentTable — Index-Addressed Component Storage
//!
//! One table per component type, owned by the [`Scene`](crate::scene::Scene).
//! Slot `i` holds the component of the object whose [`ObjectId::index`] is
//! `i`, so looking up a sibling component is a bounds check and a vector
//! index. Scenes hold at most a few thousand objects, so the holes left by
//! objects without the component cost less than a hash lookup would.

use super::entity::ObjectId;

/// Sparse storage for a single component type.
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    slots: Vec<Option<T>>,
}

impl<T> ComponentTable<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Insert or replace the component for `id`. Returns the old value.
    pub fn insert(&mut self, id: ObjectId, value: T) -> Option<T> {
        let idx = id.index as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx].replace(value)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        self.slots.get_mut(id.index as usize).and_then(Option::take)
    }

    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.slots.get(id.index as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.slots.get_mut(id.index as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate `(slot index, component)` pairs in slot order.
    ///
    /// Indices carry no generation; callers that need a live [`ObjectId`]
    /// resolve it through the scene.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|c| (idx as u32, c)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
