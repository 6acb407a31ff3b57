//! Filepath: src/tree.rs
//! `RedBlackTree` - the unsynchronized balancing core.
//!
//! This module owns the node graph and every algorithm that touches it:
//! descent, leaf attachment, rotation (`rotate`), the post-insert fixup
//! walk (`fixup`) and the structural audit (`validate`).
//!
//! `RedBlackTree` takes `&mut self` to insert and has no locking of its own.
//! Concurrent callers go through [`OrderedIndex`](crate::OrderedIndex),
//! which wraps it in a single reader/writer gate.

use std::fmt as StdFmt;

use crate::alloc::NodeArena;
use crate::node::{Color, Node, NodeId, Side};
use crate::tracing_helpers::{debug_log, trace_log, warn_log};

mod fixup;
mod rotate;
mod validate;



pub use validate::{InvariantViolation, TreeStats};

// ============================================================================
//  InsertError
// ============================================================================

/// Errors that can occur during [`RedBlackTree::try_insert`].
///
/// A duplicate key is not an error; it is reported as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// Memory for the new node, its key or its value could not be reserved.
    /// The tree is unchanged.
    AllocationFailed,
}

impl StdFmt::Display for InsertError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::AllocationFailed => write!(f, "memory allocation failed"),
        }
    }
}

impl std::error::Error for InsertError {}

// ============================================================================
//  Descent
// ============================================================================

/// Outcome of walking from the root toward a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descent {
    /// The key is stored at this node.
    Found(NodeId),

    /// The key is absent. A new node belongs on `side` of `parent`,
    /// or becomes the root when `parent` is `None`.
    Vacant {
        parent: Option<NodeId>,
        side: Side,
        depth: usize,
    },
}

// ============================================================================
//  RedBlackTree
// ============================================================================

/// An ordered map from byte strings to byte strings, balanced as a
/// red-black tree.
///
/// Keys compare lexicographically by unsigned byte, with a strict prefix
/// ordering first (the ordering of `[u8]`). Entries are never removed and an
/// existing key is never overwritten.
///
/// # Example
///
/// ```rust
/// use rbindex::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert!(tree.insert(b"b", b"2"));
/// assert!(tree.insert(b"a", b"1"));
/// assert!(!tree.insert(b"a", b"other"));
///
/// assert_eq!(tree.find(b"a"), Some(&b"1"[..]));
/// assert_eq!(tree.find(b"c"), None);
/// ```
#[derive(Default)]
pub struct RedBlackTree {
    /// Storage for every node; owns the whole graph.
    nodes: NodeArena,

    /// Handle of the root node, `None` while empty.
    root: Option<NodeId>,

    /// Number of entries.
    count: usize,
}

impl StdFmt::Debug for RedBlackTree {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("RedBlackTree")
            .field("root", &self.root)
            .field("count", &self.count)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl RedBlackTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
            count: 0,
        }
    }

    /// Create an empty tree whose arena can hold `capacity` nodes before
    /// growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: None,
            count: 0,
        }
    }

    /// Number of entries in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Check if the tree holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of nodes the tree can hold before its arena grows.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn find(&self, key: &[u8]) -> Option<&[u8]> {
        match self.descend(key) {
            Descent::Found(id) => Some(self.nodes[id].value()),
            Descent::Vacant { .. } => None,
        }
    }

    /// Check if `key` is present.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        matches!(self.descend(key), Descent::Found(_))
    }

    /// Insert `key` with `value`.
    ///
    /// Returns `false` and leaves the tree untouched if `key` is already
    /// present; the stored value is not replaced. Running out of memory
    /// aborts through the global allocator, like any other collection.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> bool {
        match self.descend(key) {
            Descent::Found(_) => {
                debug_log!(key_len = key.len(), "insert rejected: duplicate key");
                false
            }
            Descent::Vacant {
                parent,
                side,
                depth,
            } => {
                self.attach(parent, side, depth, key.into(), value.into());
                true
            }
        }
    }

    /// Insert `key` with `value`, reporting allocation failure instead of
    /// aborting.
    ///
    /// All memory the new entry needs is reserved before the tree is
    /// touched, so an error leaves the tree exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::AllocationFailed`] if the node slot, the key
    /// copy or the value copy cannot be allocated.
    pub fn try_insert(&mut self, key: &[u8], value: &[u8]) -> Result<bool, InsertError> {
        let Descent::Vacant {
            parent,
            side,
            depth,
        } = self.descend(key)
        else {
            return Ok(false);
        };

        let reserved = self
            .nodes
            .try_reserve_one()
            .and_then(|()| try_copy(key))
            .and_then(|key| try_copy(value).map(|value| (key, value)));

        match reserved {
            Ok((key, value)) => {
                self.attach(parent, side, depth, key, value);
                Ok(true)
            }
            Err(_) => {
                warn_log!(
                    key_len = key.len(),
                    value_len = value.len(),
                    len = self.count,
                    "try_insert: allocation failed"
                );
                Err(InsertError::AllocationFailed)
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    #[must_use]
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        max
    }

    // ========================================================================
    //  Internals
    // ========================================================================

    /// Walk from the root toward `key`.
    fn descend(&self, key: &[u8]) -> Descent {
        let mut parent: Option<NodeId> = None;
        let mut side = Side::Left;
        let mut current = self.root;
        let mut depth = 0;

        while let Some(id) = current {
            let node = &self.nodes[id];
            side = match key.cmp(node.key()) {
                std::cmp::Ordering::Equal => return Descent::Found(id),
                std::cmp::Ordering::Less => Side::Left,
                std::cmp::Ordering::Greater => Side::Right,
            };
            parent = Some(id);
            current = node.child(side);
            depth += 1;
        }

        Descent::Vacant {
            parent,
            side,
            depth,
        }
    }

    /// Link a new node at a vacant position and rebalance.
    fn attach(
        &mut self,
        parent: Option<NodeId>,
        side: Side,
        depth: usize,
        key: Box<[u8]>,
        value: Box<[u8]>,
    ) {
        let Some(parent) = parent else {
            // First entry: black root, nothing to fix.
            let root = self.nodes.alloc(Node::new(key, value, None, Color::Black));
            self.root = Some(root);
            self.count += 1;
            debug_log!(root = %root, "created root");
            return;
        };

        trace_log!(parent = %parent, side = ?side, depth, key_len = key.len(), "attach leaf");
        let _ = depth;

        let id = self
            .nodes
            .alloc(Node::new(key, value, Some(parent), Color::Red));
        *self.nodes[parent].child_mut(side) = Some(id);
        self.count += 1;

        self.insert_fixup(id);
    }
}

/// Copy `bytes` into a fresh boxed slice without aborting on OOM.
fn try_copy(bytes: &[u8]) -> Result<Box<[u8]>, std::collections::TryReserveError> {
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(buf.into_boxed_slice())
}

// ============================================================================
//  Tests
// ============================================================================
