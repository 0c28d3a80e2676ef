//! Registries of discoverable objects with deferred updates
//!
//! Registrations and removals requested during a tick only become visible
//! after the next `flush`, which the world runs at the start of every tick.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directory<I> {
    entries: Vec<I>,
    pending_add: Vec<I>,
    pending_remove: Vec<I>,
}

impl<I: Copy + PartialEq> Directory<I> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
        }
    }

    pub fn register(&mut self, id: I) {
        self.pending_add.push(id);
    }

    pub fn unregister(&mut self, id: I) {
        self.pending_remove.push(id);
    }

    /// Apply queued registrations, then queued removals
    pub fn flush(&mut self) {
        for id in self.pending_add.drain(..) {
            if !self.entries.contains(&id) {
                self.entries.push(id);
            }
        }
        let removed = std::mem::take(&mut self.pending_remove);
        self.entries.retain(|id| !removed.contains(id));
    }

    pub fn contains(&self, id: I) -> bool {
        self.entries.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.entries.iter().copied()
    }

    /// Entry closest to `point`. `position_of` returns `None` for deleted
    /// objects, which sort after every live one.
    pub fn nearest(&self, point: Vec2, position_of: impl Fn(I) -> Option<Vec2>) -> Option<I> {
        self.entries.iter().copied().min_by_key(|id| match position_of(*id) {
            Some(position) => (false, OrderedFloat(position.distance(&point))),
            None => (true, OrderedFloat(0.0)),
        })
    }
}

impl<I: Copy + PartialEq> Default for Directory<I> {
    fn default() -> Self {
        Self::new()
    }
}
