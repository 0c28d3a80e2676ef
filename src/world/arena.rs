//! Stable-handle storage for agents, nodes and groups
//!
//! Handles are indices into a slot vector and are never reused, so a stale
//! handle resolves to "deleted" instead of aliasing a newer object.

use std::marker::PhantomData;

use crate::core::types::{AgentId, GroupId, NodeId};

/// Conversion between a typed handle and its slot index
pub trait ArenaId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! arena_id {
    ($($id:ty),*) => {
        $(impl ArenaId for $id {
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        })*
    };
}

arena_id!(AgentId, NodeId, GroupId);

#[derive(Debug, Clone)]
enum Slot<T> {
    Live(T),
    /// Temporarily moved out while the object runs its own update
    CheckedOut,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Arena<I, T> {
    slots: Vec<Slot<T>>,
    live: usize,
    _id: PhantomData<I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            _id: PhantomData,
        }
    }

    pub fn insert(&mut self, value: T) -> I {
        self.insert_with(|_| value)
    }

    /// Insert a value that needs to know its own handle
    pub fn insert_with(&mut self, build: impl FnOnce(I) -> T) -> I {
        let id = I::from_index(self.slots.len());
        self.slots.push(Slot::Live(build(id)));
        self.live += 1;
        id
    }

    pub fn get(&self, id: I) -> Option<&T> {
        match self.slots.get(id.index()) {
            Some(Slot::Live(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Live(value)) => Some(value),
            _ => None,
        }
    }

    /// True until the object is removed, including while it is checked out
    pub fn is_alive(&self, id: I) -> bool {
        matches!(
            self.slots.get(id.index()),
            Some(Slot::Live(_)) | Some(Slot::CheckedOut)
        )
    }

    /// Mark the slot dead and hand back the value if it was stored
    pub fn remove(&mut self, id: I) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        match std::mem::replace(slot, Slot::Dead) {
            Slot::Live(value) => {
                self.live -= 1;
                Some(value)
            }
            Slot::CheckedOut => {
                self.live -= 1;
                None
            }
            Slot::Dead => None,
        }
    }

    /// Move a live value out of its slot; the handle stays alive
    pub fn check_out(&mut self, id: I) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        match std::mem::replace(slot, Slot::CheckedOut) {
            Slot::Live(value) => Some(value),
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Put a checked-out value back. Returns false (and drops the value)
    /// when the slot was removed in the meantime.
    pub fn check_in(&mut self, id: I, value: T) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) if matches!(slot, Slot::CheckedOut) => {
                *slot = Slot::Live(value);
                true
            }
            _ => false,
        }
    }

    /// Handles of all living objects in insertion order
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !matches!(slot, Slot::Dead))
            .map(|(index, _)| I::from_index(index))
    }

    /// Stored values in insertion order; checked-out values are skipped
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Live(value) => Some((I::from_index(index), value)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_not_reused() {
        let mut arena: Arena<NodeId, &str> = Arena::new();
        let a = arena.insert("a");
        assert_eq!(arena.remove(a), Some("a"));
        let b = arena.insert("b");
        assert_ne!(a, b);
        assert!(!arena.is_alive(a));
        assert!(arena.get(a).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_check_out_keeps_handle_alive() {
        let mut arena: Arena<AgentId, u32> = Arena::new();
        let id = arena.insert(7);
        let value = arena.check_out(id).unwrap();
        assert!(arena.is_alive(id));
        assert!(arena.get(id).is_none());
        assert!(arena.check_out(id).is_none());
        assert!(arena.check_in(id, value + 1));
        assert_eq!(arena.get(id), Some(&8));
    }

    #[test]
    fn test_removed_while_checked_out_drops_value() {
        let mut arena: Arena<AgentId, u32> = Arena::new();
        let id = arena.insert(1);
        let value = arena.check_out(id).unwrap();
        assert_eq!(arena.remove(id), None);
        assert!(!arena.check_in(id, value));
        assert!(!arena.is_alive(id));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_ids_in_insertion_order() {
        let mut arena: Arena<GroupId, char> = Arena::new();
        let ids: Vec<_> = "abcd".chars().map(|c| arena.insert(c)).collect();
        arena.remove(ids[1]);
        let _ = arena.check_out(ids[2]);
        let alive: Vec<_> = arena.ids().collect();
        assert_eq!(alive, vec![ids[0], ids[2], ids[3]]);
        let stored: Vec<_> = arena.iter().map(|(_, c)| *c).collect();
        assert_eq!(stored, vec!['a', 'd']);
    }

    #[test]
    fn test_insert_with_sees_own_handle() {
        let mut arena: Arena<GroupId, GroupId> = Arena::new();
        let id = arena.insert_with(|id| id);
        assert_eq!(arena.get(id), Some(&id));
    }
}
