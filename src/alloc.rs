//! Node storage for [`RedBlackTree`](crate::tree::RedBlackTree).
//!
//! [`NodeArena`] owns every node of a tree in one flat `Vec`. Nodes are
//! addressed by [`NodeId`] and are never freed individually, so handles stay
//! valid until the arena drops. Dropping the arena releases nodes one after
//! another, without recursing through child links, so arbitrarily deep
//! trees tear down in constant stack space.

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

use crate::node::{Node, NodeId};

/// Arena holding every node of one tree.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes allocated so far.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node has been allocated.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes the arena can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Store `node` and return its handle.
    ///
    /// Exhausting memory here goes through the global allocator's
    /// out-of-memory handler, like any other `Vec` growth.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Make sure the next [`alloc`](Self::alloc) cannot reallocate.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the backing buffer cannot grow.
    /// The arena is left unchanged in that case.
    pub(crate) fn try_reserve_one(&mut self) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(1)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }
}

// INVARIANT: a `NodeId` is only produced by `alloc` on the arena it indexes
// into, and nodes are never removed, so the index is always in bounds.
impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    #[expect(
        clippy::indexing_slicing,
        reason = "INVARIANT: ids are minted by this arena and never invalidated"
    )]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    #[expect(
        clippy::indexing_slicing,
        reason = "INVARIANT: ids are minted by this arena and never invalidated"
    )]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

// ============================================================================
//  Tests
// ============================================================================
