//! # ObjectId — Handles for GameObjects
//!
//! A GameObject is identified by an [`ObjectId`]: a slot index plus a
//! generation counter. Deleting an object frees its slot; the next object
//! created in that slot gets a bumped generation, so any handle still holding
//! the old generation stops resolving instead of silently pointing at the new
//! occupant.
//!
//! ```text
//! ObjectId { index: 3, generation: 0 }  ← "crate", deleted
//! ObjectId { index: 3, generation: 1 }  ← "enemy", reuses slot 3
//! ```
//!
//! Component tables are addressed by `index` alone, which is what makes
//! sibling lookups in the physics pass a plain vector index.

use std::fmt;

/// A lightweight handle to a GameObject in a [`Scene`](crate::scene::Scene).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ObjectId {
    /// Slot index. Stable for the lifetime of the object.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Hands out [`ObjectId`]s and recycles freed slots.
///
/// `generations[i]` is the live generation of slot `i`. A slot is alive when
/// it is not on the free list and the handle's generation matches.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ObjectId {
        match self.free.pop() {
            Some(index) => {
                self.alive[index as usize] = true;
                ObjectId {
                    index,
                    generation: self.generations[index as usize],
                }
            }
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                self.alive.push(true);
                ObjectId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Free a slot. Returns `false` for stale or already-freed handles.
    pub fn free(&mut self, id: ObjectId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index as usize;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.alive[idx] = false;
        self.free.push(id.index);
        true
    }

    pub fn is_alive(&self, id: ObjectId) -> bool {
        let idx = id.index as usize;
        idx < self.generations.len() && self.alive[idx] && self.generations[idx] == id.generation
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_sequential() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_eq!((a.index, a.generation), (0, 0));
        assert_eq!((b.index, b.generation), (1, 0));
        assert_eq!(ids.alive_count(), 2);
    }

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        assert!(ids.free(a));
        let b = ids.allocate();
        assert_eq!(b.index, a.index);
        assert_eq!(b.generation, 1);
        assert!(!ids.is_alive(a));
        assert!(ids.is_alive(b));
    }

    #[test]
    fn double_free_is_rejected() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        assert!(ids.free(a));
        assert!(!ids.free(a));
        assert_eq!(ids.alive_count(), 0);
    }
}
