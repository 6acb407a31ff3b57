//! Structural audit of a [`RedBlackTree`].
//!
//! Nothing on the insert or lookup path calls this. It is an explicit,
//! O(n) check for tests and diagnostics that walks the whole graph with an
//! explicit stack and reports the first broken rule it finds.

use std::fmt as StdFmt;

use super::RedBlackTree;
use crate::node::NodeId;

/// Shape summary returned by a successful [`RedBlackTree::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Number of reachable entries.
    pub len: usize,
    /// Nodes on the longest root-to-leaf path.
    pub height: usize,
    /// Black nodes on every root-to-nil path.
    pub black_height: usize,
}

/// A broken red-black or linkage rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot {
        /// The offending root.
        root: NodeId,
    },

    /// A red node has a red child.
    RedRedEdge {
        /// The red parent.
        parent: NodeId,
        /// Its red child.
        child: NodeId,
    },

    /// Two root-to-nil paths carry different numbers of black nodes.
    BlackHeightMismatch {
        /// Black count of the first path seen.
        expected: usize,
        /// Black count of the diverging path.
        found: usize,
        /// Last node on the diverging path.
        at: NodeId,
    },

    /// A key sits outside the range its ancestors allow, or equals one.
    OrderViolation {
        /// The misplaced node.
        node: NodeId,
    },

    /// A child's parent link does not point back at its parent, or the root
    /// has a parent.
    BrokenParentLink {
        /// The node whose parent link is wrong.
        node: NodeId,
    },

    /// The entry counter disagrees with the number of reachable nodes.
    CountMismatch {
        /// Value of the counter.
        counted: usize,
        /// Nodes reachable from the root.
        reachable: usize,
    },
}

impl StdFmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::RedRoot { root } => write!(f, "root {root} is red"),

            Self::RedRedEdge { parent, child } => {
                write!(f, "red node {parent} has red child {child}")
            }

            Self::BlackHeightMismatch {
                expected,
                found,
                at,
            } => write!(
                f,
                "black height {found} below {at} differs from {expected}"
            ),

            Self::OrderViolation { node } => write!(f, "key of {node} is out of order"),

            Self::BrokenParentLink { node } => write!(f, "parent link of {node} is broken"),

            Self::CountMismatch { counted, reachable } => write!(
                f,
                "len is {counted} but {reachable} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// One pending node in the audit walk.
struct Frame<'a> {
    id: NodeId,
    /// Exclusive lower bound inherited from ancestors.
    lower: Option<&'a [u8]>,
    /// Exclusive upper bound inherited from ancestors.
    upper: Option<&'a [u8]>,
    /// Black nodes above this one.
    blacks: usize,
    depth: usize,
}

impl RedBlackTree {
    /// Check every structural rule of the tree.
    ///
    /// Verifies key order, key uniqueness, a black root, no red-red edges,
    /// uniform black height, parent links that mirror child links, and that
    /// [`len`](Self::len) matches the reachable node count.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<TreeStats, InvariantViolation> {
        let Some(root) = self.root else {
            return if self.count == 0 {
                Ok(TreeStats::default())
            } else {
                Err(InvariantViolation::CountMismatch {
                    counted: self.count,
                    reachable: 0,
                })
            };
        };

        if self.nodes[root].color.is_red() {
            return Err(InvariantViolation::RedRoot { root });
        }
        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink { node: root });
        }

        let mut stats = TreeStats::default();
        let mut black_height: Option<usize> = None;
        let mut stack = vec![Frame {
            id: root,
            lower: None,
            upper: None,
            blacks: 0,
            depth: 1,
        }];

        while let Some(frame) = stack.pop() {
            let Some(node) = self.nodes.get(frame.id) else {
                return Err(InvariantViolation::BrokenParentLink { node: frame.id });
            };
            stats.len += 1;
            if stats.len > self.nodes.len() {
                // More visits than nodes: the links form a cycle.
                return Err(InvariantViolation::BrokenParentLink { node: frame.id });
            }
            stats.height = stats.height.max(frame.depth);

            let key = node.key();
            if frame.lower.is_some_and(|lo| key <= lo) || frame.upper.is_some_and(|hi| key >= hi) {
                return Err(InvariantViolation::OrderViolation { node: frame.id });
            }

            let blacks = frame.blacks + usize::from(node.color.is_black());

            for (child, lower, upper) in [
                (node.left, frame.lower, Some(key)),
                (node.right, Some(key), frame.upper),
            ] {
                let Some(child) = child else {
                    // Nil position: close off this path's black count.
                    match black_height {
                        None => black_height = Some(blacks),
                        Some(expected) if expected != blacks => {
                            return Err(InvariantViolation::BlackHeightMismatch {
                                expected,
                                found: blacks,
                                at: frame.id,
                            });
                        }
                        Some(_) => {}
                    }
                    continue;
                };

                let Some(child_node) = self.nodes.get(child) else {
                    return Err(InvariantViolation::BrokenParentLink { node: child });
                };
                if child_node.parent != Some(frame.id) {
                    return Err(InvariantViolation::BrokenParentLink { node: child });
                }
                if node.color.is_red() && child_node.color.is_red() {
                    return Err(InvariantViolation::RedRedEdge {
                        parent: frame.id,
                        child,
                    });
                }

                stack.push(Frame {
                    id: child,
                    lower,
                    upper,
                    blacks,
                    depth: frame.depth + 1,
                });
            }
        }

        if stats.len != self.count {
            return Err(InvariantViolation::CountMismatch {
                counted: self.count,
                reachable: stats.len,
            });
        }

        stats.black_height = black_height.unwrap_or(0);
        Ok(stats)
    }
}
