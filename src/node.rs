//! Node representation for [`RedBlackTree`](crate::tree::RedBlackTree).
//!
//! Nodes never hold pointers to each other. Every link is a [`NodeId`]
//! handle into the tree's [`NodeArena`](crate::alloc::NodeArena), so a
//! parent link can be followed upward during fixup without ever keeping a
//! node alive or creating a reference cycle.

use std::fmt as StdFmt;

/// Stable handle to a node in a [`NodeArena`](crate::alloc::NodeArena).
///
/// Handles are minted only by the arena and stay valid for the arena's
/// whole lifetime, since nodes are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl StdFmt::Display for NodeId {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Balancing tag carried by every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Freshly inserted nodes start red.
    Red,
    /// The root and all absent children count as black.
    Black,
}

impl Color {
    /// Check if this is [`Color::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Check if this is [`Color::Black`].
    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

/// Side of a parent a child hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A single key/value entry plus its links.
///
/// Key and value are fixed at construction. Only `color` and the three
/// links change afterwards, during rotation and fixup.
pub struct Node {
    key: Box<[u8]>,
    value: Box<[u8]>,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// Non-owning upward link. `None` iff the node is the root.
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) const fn new(
        key: Box<[u8]>,
        value: Box<[u8]>,
        parent: Option<NodeId>,
        color: Color,
    ) -> Self {
        Self {
            key,
            value,
            color,
            left: None,
            right: None,
            parent,
        }
    }

    /// The node's key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The node's value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The node's current color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl StdFmt::Debug for Node {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("Node")
            .field("key_len", &self.key.len())
            .field("value_len", &self.value.len())
            .field("color", &self.color)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("parent", &self.parent)
            .finish()
    }
}
