//! Doubly-linked chains over arena-held nodes
//!
//! A [`Chain`] threads nodes that live somewhere else together into an ordered
//! sequence. It never owns node storage; every operation receives the store
//! holding the nodes and addresses them by handle. The same chain engine
//! therefore serves table columns, table rows, both facets of a cross-linked
//! cell, and the plain nodes of a [`NodeList`].
//!
//! Each node caches its zero-based position in [`Links::index`]. Adjacency is
//! authoritative; the index is recomputed by the chain after every structural
//! edit, and only over the span the edit could have affected.

mod arena;
pub mod list;

pub use arena::Arena;
pub use list::{ListNode, NodeList};

use std::fmt::{Debug, Display};
use std::hash::Hash;
use log::trace;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Handle used to address a node inside its store
pub trait Handle: Copy + Eq + Hash + Debug + Display {}

impl<T: Copy + Eq + Hash + Debug + Display> Handle for T {}

/// Chain error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Position outside `[0, len)`
    #[error("Index {index} is out of range for a chain of {len} nodes")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Chain length at the time of the call
        len: usize,
    },

    /// Node is not linked into this chain
    #[error("Node {0} is not a member of this chain")]
    NotMember(String),

    /// Links disagree with each other or with the cached count
    #[error("Chain is corrupted: {0}")]
    Corrupted(String),
}

/// Chain result type
pub type ChainResult<T> = Result<T, ChainError>;

/// Neighbour links and cached position of one node on one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links<H> {
    prev: Option<H>,
    next: Option<H>,
    index: usize,
}

impl<H> Default for Links<H> {
    fn default() -> Self {
        Links {
            prev: None,
            next: None,
            index: 0,
        }
    }
}

impl<H: Copy> Links<H> {
    /// Predecessor on the chain
    pub fn prev(&self) -> Option<H> {
        self.prev
    }

    /// Successor on the chain
    pub fn next(&self) -> Option<H> {
        self.next
    }

    /// Cached zero-based position on the chain
    pub fn index(&self) -> usize {
        self.index
    }

    fn detach(&mut self) {
        self.prev = None;
        self.next = None;
        self.index = 0;
    }
}

/// A record that sits on exactly one chain
pub trait Node<H> {
    /// Stable identity of the node
    fn id(&self) -> H;

    /// Links of the node
    fn links(&self) -> &Links<H>;

    /// Mutable links of the node
    fn links_mut(&mut self) -> &mut Links<H>;

    /// Domain equality used by membership scans
    fn same_value(&self, other: &Self) -> bool;
}

/// Read access to the links of nodes addressed by handle
pub trait NodeStore<H: Handle> {
    /// Links of `node`
    ///
    /// Implementations may panic if `node` is not held by the store. Chains only
    /// ever hold handles of live nodes.
    fn links(&self, node: H) -> &Links<H>;

    /// Domain equality of two nodes
    fn same_value(&self, a: H, b: H) -> bool;

    /// Predecessor of `node`
    fn prev(&self, node: H) -> Option<H> {
        self.links(node).prev
    }

    /// Successor of `node`
    fn next(&self, node: H) -> Option<H> {
        self.links(node).next
    }

    /// Cached position of `node`
    fn position(&self, node: H) -> usize {
        self.links(node).index
    }
}

impl<H: Handle, S: NodeStore<H> + ?Sized> NodeStore<H> for &S {
    fn links(&self, node: H) -> &Links<H> {
        (**self).links(node)
    }

    fn same_value(&self, a: H, b: H) -> bool {
        (**self).same_value(a, b)
    }
}

/// Write access to node links
pub trait NodeStoreMut<H: Handle>: NodeStore<H> {
    /// Mutable links of `node`
    fn links_mut(&mut self, node: H) -> &mut Links<H>;

    /// Set the index of `node` from its predecessor, or to 0 at the head
    ///
    /// The predecessor must already carry its correct index.
    fn recompute_index(&mut self, node: H) {
        let index = match self.prev(node) {
            Some(prev) => self.position(prev) + 1,
            None => 0,
        };
        self.links_mut(node).index = index;
    }
}

/// Ordered doubly-linked sequence of nodes held by an external store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain<H> {
    first: Option<H>,
    last: Option<H>,
    len: usize,
}

impl<H> Default for Chain<H> {
    fn default() -> Self {
        Chain {
            first: None,
            last: None,
            len: 0,
        }
    }
}

impl<H: Handle> Chain<H> {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Head of the chain
    pub fn first(&self) -> Option<H> {
        self.first
    }

    /// Tail of the chain
    pub fn last(&self) -> Option<H> {
        self.last
    }

    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the chain has no nodes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fail with [`ChainError::IndexOutOfRange`] unless `index < len`
    pub fn check_index(&self, index: usize) -> ChainResult<()> {
        if index >= self.len {
            return Err(ChainError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Link `item` after the current tail
    pub fn append<S: NodeStoreMut<H> + ?Sized>(&mut self, store: &mut S, item: H) {
        {
            let links = store.links_mut(item);
            links.prev = self.last;
            links.next = None;
        }
        match self.last {
            Some(last) => store.links_mut(last).next = Some(item),
            None => self.first = Some(item),
        }
        self.last = Some(item);
        self.len += 1;
        store.recompute_index(item);
        trace!("appended {} at {}", item, self.len - 1);
    }

    /// Handle of the node at `index`, walking forward from the head
    pub fn node_at<S: NodeStore<H> + ?Sized>(&self, store: &S, index: usize) -> ChainResult<H> {
        self.check_index(index)?;
        let mut current = self.first;
        for _ in 0..index {
            current = current.and_then(|node| store.next(node));
        }
        current.ok_or_else(|| {
            ChainError::Corrupted(format!("chain ended before position {}", index))
        })
    }

    /// Splice `item` in front of the node currently at `index`
    ///
    /// Indices are recomputed from the insertion point to the tail. Use
    /// [`Chain::append`] to add after the tail.
    pub fn insert<S: NodeStoreMut<H> + ?Sized>(
        &mut self,
        store: &mut S,
        index: usize,
        item: H,
    ) -> ChainResult<()> {
        let target = self.node_at(store, index)?;
        self.link_before(store, item, target);
        self.len += 1;
        Self::reindex(store, Some(item), usize::MAX);
        trace!("inserted {} at {}", item, index);
        Ok(())
    }

    /// Unlink `node` and recompute the indices of its former successors
    ///
    /// Fails with [`ChainError::NotMember`] unless `node` is linked into this
    /// chain; a node on another chain of the same store is left untouched.
    pub fn remove<S: NodeStoreMut<H> + ?Sized>(&mut self, store: &mut S, node: H) -> ChainResult<()> {
        if !self.holds(store, node) {
            return Err(ChainError::NotMember(node.to_string()));
        }
        let next = self.unlink(store, node);
        self.len -= 1;
        Self::reindex(store, next, usize::MAX);
        trace!("removed {}, {} nodes left", node, self.len);
        Ok(())
    }

    /// Unlink the node at `index` and return its handle
    pub fn remove_at<S: NodeStoreMut<H> + ?Sized>(&mut self, store: &mut S, index: usize) -> ChainResult<H> {
        let node = self.node_at(store, index)?;
        self.remove(store, node)?;
        Ok(node)
    }

    /// Unlink the first node whose value equals `probe`'s value
    ///
    /// Returns the removed handle, or `None` when no node matches.
    pub fn remove_value<S: NodeStoreMut<H> + ?Sized>(
        &mut self,
        store: &mut S,
        probe: H,
    ) -> ChainResult<Option<H>> {
        let found = self.iter(store).find(|&node| store.same_value(node, probe));
        match found {
            Some(node) => {
                self.remove(store, node)?;
                Ok(Some(node))
            }
            None => Ok(None),
        }
    }

    /// Move the node at `from` so that it ends up at position `to`
    ///
    /// Only the nodes whose position lies between `from` and `to` (inclusive)
    /// have their index recomputed.
    pub fn move_to<S: NodeStoreMut<H> + ?Sized>(
        &mut self,
        store: &mut S,
        from: usize,
        to: usize,
    ) -> ChainResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let moving = self.node_at(store, from)?;
        let anchor = self.node_at(store, to)?;
        let successor = self.unlink(store, moving);

        let start = if from < to {
            self.link_after(store, moving, anchor);
            successor
        } else {
            self.link_before(store, moving, anchor);
            Some(moving)
        };
        Self::reindex(store, start, from.abs_diff(to) + 1);
        trace!("moved {} from {} to {}", moving, from, to);
        Ok(())
    }

    /// Position of the first node matching `predicate`
    pub fn position<S, F>(&self, store: &S, mut predicate: F) -> Option<usize>
    where
        S: NodeStore<H> + ?Sized,
        F: FnMut(H) -> bool,
    {
        self.iter(store).position(|node| predicate(node))
    }

    /// Position of the first node whose value equals `probe`'s value
    pub fn index_of<S: NodeStore<H> + ?Sized>(&self, store: &S, probe: H) -> Option<usize> {
        self.position(store, |node| store.same_value(node, probe))
    }

    /// Whether any node's value equals `probe`'s value
    pub fn contains<S: NodeStore<H> + ?Sized>(&self, store: &S, probe: H) -> bool {
        self.index_of(store, probe).is_some()
    }

    /// Walk the chain from head to tail
    pub fn iter<'a, S: NodeStore<H> + ?Sized>(&self, store: &'a S) -> ChainIter<H, &'a S> {
        self.walk(store)
    }

    /// Walk the chain from head to tail through a store view taken by value
    pub fn walk<S: NodeStore<H>>(&self, store: S) -> ChainIter<H, S> {
        ChainIter {
            store,
            next: self.first,
            remaining: self.len,
        }
    }

    /// Materialize the chain order
    pub fn to_vec<S: NodeStore<H> + ?Sized>(&self, store: &S) -> Vec<H> {
        self.iter(store).collect()
    }

    /// Forget every member without touching the store
    pub fn clear(&mut self) {
        self.first = None;
        self.last = None;
        self.len = 0;
    }

    /// Check link symmetry, count and index contiguity
    pub fn verify<S: NodeStore<H> + ?Sized>(&self, store: &S) -> ChainResult<()> {
        let mut expected_prev = None;
        let mut current = self.first;
        let mut position = 0;

        while let Some(node) = current {
            if position >= self.len {
                return Err(ChainError::Corrupted(format!(
                    "more than {} nodes reachable from the head",
                    self.len
                )));
            }
            let links = store.links(node);
            if links.prev != expected_prev {
                return Err(ChainError::Corrupted(format!(
                    "{} points back to {:?}, expected {:?}",
                    node, links.prev, expected_prev
                )));
            }
            if links.index != position {
                return Err(ChainError::Corrupted(format!(
                    "{} caches index {} at position {}",
                    node, links.index, position
                )));
            }
            expected_prev = Some(node);
            current = links.next;
            position += 1;
        }

        if position != self.len {
            return Err(ChainError::Corrupted(format!(
                "{} nodes reachable, {} counted",
                position, self.len
            )));
        }
        if self.last != expected_prev {
            return Err(ChainError::Corrupted(format!(
                "tail is {:?}, walk ended at {:?}",
                self.last, expected_prev
            )));
        }
        Ok(())
    }

    /// Whether walking back from `node` reaches this chain's head within `len` steps
    fn holds<S: NodeStore<H> + ?Sized>(&self, store: &S, node: H) -> bool {
        let mut current = node;
        for _ in 0..self.len {
            match store.prev(current) {
                Some(prev) => current = prev,
                None => return self.first == Some(current),
            }
        }
        false
    }

    fn link_before<S: NodeStoreMut<H> + ?Sized>(&mut self, store: &mut S, item: H, target: H) {
        let prev = store.prev(target);
        {
            let links = store.links_mut(item);
            links.prev = prev;
            links.next = Some(target);
        }
        store.links_mut(target).prev = Some(item);
        match prev {
            Some(prev) => store.links_mut(prev).next = Some(item),
            None => self.first = Some(item),
        }
    }

    fn link_after<S: NodeStoreMut<H> + ?Sized>(&mut self, store: &mut S, item: H, target: H) {
        let next = store.next(target);
        {
            let links = store.links_mut(item);
            links.prev = Some(target);
            links.next = next;
        }
        store.links_mut(target).next = Some(item);
        match next {
            Some(next) => store.links_mut(next).prev = Some(item),
            None => self.last = Some(item),
        }
    }

    /// Splice `node` out and return its former successor. The count is left
    /// to the caller.
    fn unlink<S: NodeStoreMut<H> + ?Sized>(&mut self, store: &mut S, node: H) -> Option<H> {
        let Links { prev, next, .. } = *store.links(node);
        match prev {
            Some(prev) => store.links_mut(prev).next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => store.links_mut(next).prev = prev,
            None => self.last = prev,
        }
        store.links_mut(node).detach();
        next
    }

    fn reindex<S: NodeStoreMut<H> + ?Sized>(store: &mut S, start: Option<H>, limit: usize) {
        let mut current = start;
        let mut remaining = limit;
        while let Some(node) = current {
            if remaining == 0 {
                break;
            }
            store.recompute_index(node);
            remaining -= 1;
            current = store.next(node);
        }
    }
}

/// Forward iterator over chain handles
#[derive(Debug, Clone)]
pub struct ChainIter<H, S> {
    store: S,
    next: Option<H>,
    remaining: usize,
}

impl<H: Handle, S: NodeStore<H>> Iterator for ChainIter<H, S> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.next?;
        self.next = NodeStore::next(&self.store, node);
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
