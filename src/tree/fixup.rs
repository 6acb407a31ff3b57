//! Post-insert rebalancing.
//!
//! A new node is attached red, which can only break one rule: a red node
//! under a red parent. The walk below climbs from the new node and resolves
//! that with recoloring (red uncle) or at most two rotations (black or
//! absent uncle). Cases are written for a parent on side `side` of the
//! grandparent; the mirrored case is the same code with `side` flipped.

use super::RedBlackTree;
use crate::node::{Color, NodeId, Side};
use crate::tracing_helpers::trace_log;

impl RedBlackTree {
    /// Restore the red-black rules after `node` was attached as a red leaf.
    pub(super) fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color.is_black() {
                break;
            }
            // A red node is never the root, so the grandparent exists.
            let Some(grand) = self.nodes[parent].parent else {
                break;
            };

            let side = if self.nodes[grand].left == Some(parent) {
                Side::Left
            } else {
                Side::Right
            };
            let uncle = self.nodes[grand].child(side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.nodes[u].color.is_red()) {
                trace_log!(node = %node, grand = %grand, "fixup: red uncle, recolor");
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                self.nodes[grand].color = Color::Red;
                node = grand;
                continue;
            }

            // Inner child: rotate it into the outer position first. The old
            // parent becomes the cursor, and `node` its parent.
            let parent = if self.nodes[parent].child(side.opposite()) == Some(node) {
                trace_log!(node = %node, parent = %parent, "fixup: inner child, pre-rotate");
                self.rotate(parent, side);
                let lifted = node;
                node = parent;
                lifted
            } else {
                parent
            };

            trace_log!(node = %node, grand = %grand, "fixup: outer child, rotate grandparent");
            self.nodes[parent].color = Color::Black;
            self.nodes[grand].color = Color::Red;
            self.rotate(grand, side.opposite());
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }
}
