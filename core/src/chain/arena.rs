//! Handle-keyed node storage

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use super::{Handle, Links, Node, NodeStore, NodeStoreMut};

/// Records keyed by their stable handle
///
/// Removing a record frees its slot for good; handles are never reissued by
/// the allocators that feed an arena.
#[derive(Debug, Clone)]
pub struct Arena<H, T> {
    slots: HashMap<H, T>,
}

impl<H, T> Default for Arena<H, T> {
    fn default() -> Self {
        Arena {
            slots: HashMap::new(),
        }
    }
}

impl<H: Handle, T> Arena<H, T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under `handle`, returning any record it replaced
    pub fn insert(&mut self, handle: H, record: T) -> Option<T> {
        self.slots.insert(handle, record)
    }

    /// Record stored under `handle`
    pub fn get(&self, handle: H) -> Option<&T> {
        self.slots.get(&handle)
    }

    /// Mutable record stored under `handle`
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.slots.get_mut(&handle)
    }

    /// Drop the record stored under `handle`
    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.slots.remove(&handle)
    }

    /// Whether a record is stored under `handle`
    pub fn contains(&self, handle: H) -> bool {
        self.slots.contains_key(&handle)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<H: Handle, T> Index<H> for Arena<H, T> {
    type Output = T;

    fn index(&self, handle: H) -> &T {
        self.slots
            .get(&handle)
            .unwrap_or_else(|| panic!("{} is not held by this arena", handle))
    }
}

impl<H: Handle, T> IndexMut<H> for Arena<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut T {
        self.slots
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("{} is not held by this arena", handle))
    }
}

impl<H: Handle, T: Node<H>> NodeStore<H> for Arena<H, T> {
    fn links(&self, node: H) -> &Links<H> {
        self[node].links()
    }

    fn same_value(&self, a: H, b: H) -> bool {
        self[a].same_value(&self[b])
    }
}

impl<H: Handle, T: Node<H>> NodeStoreMut<H> for Arena<H, T> {
    fn links_mut(&mut self, node: H) -> &mut Links<H> {
        self[node].links_mut()
    }
}
