//! Self-contained list of plain value nodes
//!
//! [`NodeList`] owns both the arena of its nodes and the chain threading them,
//! which makes it the simplest user of the chain engine: one value per node,
//! value equality for membership scans.

use super::{Arena, Chain, ChainError, ChainResult, Links, Node};
use crate::id::{IdAllocator, NodeId};

/// A plain node carrying one value
#[derive(Debug, Clone)]
pub struct ListNode<T> {
    id: NodeId,
    value: T,
    links: Links<NodeId>,
}

impl<T> ListNode<T> {
    /// Create a detached node
    pub fn new(id: NodeId, value: T) -> Self {
        ListNode {
            id,
            value,
            links: Links::default(),
        }
    }

    /// Identity of the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Payload of the node
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Cached position of the node in its list
    pub fn index(&self) -> usize {
        self.links.index()
    }
}

impl<T: PartialEq> Node<NodeId> for ListNode<T> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn links(&self) -> &Links<NodeId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<NodeId> {
        &mut self.links
    }

    fn same_value(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Ordered list of values with positional editing
#[derive(Debug, Clone)]
pub struct NodeList<T> {
    nodes: Arena<NodeId, ListNode<T>>,
    chain: Chain<NodeId>,
    ids: IdAllocator,
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        NodeList {
            nodes: Arena::new(),
            chain: Chain::new(),
            ids: IdAllocator::new(),
        }
    }
}

impl<T: PartialEq> NodeList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Append `value` and return the id of its node
    pub fn push(&mut self, value: T) -> NodeId {
        let id = self.alloc(value);
        self.chain.append(&mut self.nodes, id);
        id
    }

    /// Insert `value` in front of the value at `index`
    pub fn insert(&mut self, index: usize, value: T) -> ChainResult<NodeId> {
        self.chain.check_index(index)?;
        let id = self.alloc(value);
        self.chain.insert(&mut self.nodes, index, id)?;
        Ok(id)
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> ChainResult<&T> {
        let id = self.chain.node_at(&self.nodes, index)?;
        Ok(self.nodes[id].value())
    }

    /// Node stored under `id`
    pub fn node(&self, id: NodeId) -> Option<&ListNode<T>> {
        self.nodes.get(id)
    }

    /// First value
    pub fn first(&self) -> Option<&T> {
        self.chain.first().map(|id| self.nodes[id].value())
    }

    /// Last value
    pub fn last(&self) -> Option<&T> {
        self.chain.last().map(|id| self.nodes[id].value())
    }

    /// Remove and return the value at `index`
    pub fn remove_at(&mut self, index: usize) -> ChainResult<T> {
        let id = self.chain.remove_at(&mut self.nodes, index)?;
        self.take(id)
    }

    /// Remove the first value equal to `value`
    pub fn remove(&mut self, value: &T) -> ChainResult<bool> {
        match self.index_of(value) {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move the value at `from` to position `to`
    pub fn move_to(&mut self, from: usize, to: usize) -> ChainResult<()> {
        self.chain.move_to(&mut self.nodes, from, to)
    }

    /// Position of the first value equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.chain
            .position(&self.nodes, |id| self.nodes[id].value() == value)
    }

    /// Whether the list holds a value equal to `value`
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Values in list order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes().map(ListNode::value)
    }

    /// Nodes in list order
    pub fn nodes(&self) -> impl Iterator<Item = &ListNode<T>> + '_ {
        self.chain.iter(&self.nodes).map(move |id| &self.nodes[id])
    }

    /// Values in list order, cloned
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.chain.clear();
        self.nodes.clear();
    }

    /// Check list integrity
    pub fn verify(&self) -> ChainResult<()> {
        self.chain.verify(&self.nodes)
    }

    fn alloc(&mut self, value: T) -> NodeId {
        let id = self.ids.allocate();
        self.nodes.insert(id, ListNode::new(id, value));
        id
    }

    fn take(&mut self, id: NodeId) -> ChainResult<T> {
        self.nodes
            .remove(id)
            .map(|node| node.value)
            .ok_or_else(|| ChainError::Corrupted(format!("{} unlinked but not stored", id)))
    }
}

impl<T: PartialEq> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = NodeList::new();
        list.extend(iter);
        list
    }
}

impl<T: PartialEq> Extend<T> for NodeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
