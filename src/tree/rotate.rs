//! Left and right rotations.
//!
//! ```text
//!        N                          P
//!       / \     rotate_left(N)     / \
//!      a   P    ------------->    N   c
//!         / \   <-------------   / \
//!        b   c  rotate_right(P) a   b
//! ```
//!
//! Both run in constant time and preserve in-order key order.

use super::RedBlackTree;
use crate::node::{NodeId, Side};
use crate::tracing_helpers::trace_log;

impl RedBlackTree {
    /// Rotate the subtree rooted at `node` toward `dir`.
    ///
    /// The child on the opposite side (the pivot) takes `node`'s place under
    /// its former parent, or becomes the root. The pivot's `dir`-side subtree
    /// moves under `node`. Returns the pivot.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no child opposite `dir`. Fixup only rotates
    /// toward a red child it has just inspected, so this is unreachable.
    pub(super) fn rotate(&mut self, node: NodeId, dir: Side) -> NodeId {
        let lifted = dir.opposite();
        let Some(pivot) = self.nodes[node].child(lifted) else {
            unreachable!("rotation of {node} toward {dir:?} without a {lifted:?} child");
        };
        trace_log!(node = %node, pivot = %pivot, dir = ?dir, "rotate");

        // Pivot's inner subtree changes parent.
        let inner = self.nodes[pivot].child(dir);
        *self.nodes[node].child_mut(lifted) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }

        // Pivot takes node's slot.
        let parent = self.nodes[node].parent;
        self.nodes[pivot].parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(p) if self.nodes[p].left == Some(node) => self.nodes[p].left = Some(pivot),
            Some(p) => self.nodes[p].right = Some(pivot),
        }

        *self.nodes[pivot].child_mut(dir) = Some(node);
        self.nodes[node].parent = Some(pivot);

        pivot
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Fail fast in tests")]
mod tests {
    use super::*;
    use crate::node::{Color, Node};

    /// Build the left-hand shape of the module diagram, all black, rooted at N.
    ///
    /// Returns `(tree, [n, p, a, b, c])`.
    fn diagram() -> (RedBlackTree, [NodeId; 5]) {
        let mut tree = RedBlackTree::new();
        let mut alloc = |key: &[u8]| {
            tree.nodes
                .alloc(Node::new(key.into(), key.into(), None, Color::Black))
        };
        let n = alloc(b"b");
        let p = alloc(b"d");
        let a = alloc(b"a");
        let b = alloc(b"c");
        let c = alloc(b"e");

        let link = |tree: &mut RedBlackTree, parent: NodeId, side: Side, child: NodeId| {
            *tree.nodes[parent].child_mut(side) = Some(child);
            tree.nodes[child].parent = Some(parent);
        };
        link(&mut tree, n, Side::Left, a);
        link(&mut tree, n, Side::Right, p);
        link(&mut tree, p, Side::Left, b);
        link(&mut tree, p, Side::Right, c);
        tree.root = Some(n);
        tree.count = 5;

        (tree, [n, p, a, b, c])
    }

    fn in_order(tree: &RedBlackTree) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut cur = tree.root;
        while cur.is_some() || !stack.is_empty() {
            while let Some(id) = cur {
                stack.push(id);
                cur = tree.nodes[id].left;
            }
            let id = stack.pop().unwrap();
            out.push(tree.nodes[id].key().to_vec());
            cur = tree.nodes[id].right;
        }
        out
    }

    #[test]
    fn test_rotate_left_at_root() {
        let (mut tree, [n, p, a, b, c]) = diagram();
        let before = in_order(&tree);

        let pivot = tree.rotate(n, Side::Left);

        assert_eq!(pivot, p);
        assert_eq!(tree.root, Some(p));
        assert!(tree.nodes[p].parent.is_none());
        assert_eq!(tree.nodes[p].left, Some(n));
        assert_eq!(tree.nodes[p].right, Some(c));
        assert_eq!(tree.nodes[n].parent, Some(p));
        assert_eq!(tree.nodes[n].left, Some(a));
        assert_eq!(tree.nodes[n].right, Some(b));
        assert_eq!(tree.nodes[b].parent, Some(n));
        assert_eq!(in_order(&tree), before);
    }

    #[test]
    fn test_rotate_right_undoes_rotate_left() {
        let (mut tree, [n, p, a, b, c]) = diagram();

        tree.rotate(n, Side::Left);
        let pivot = tree.rotate(p, Side::Right);

        assert_eq!(pivot, n);
        assert_eq!(tree.root, Some(n));
        assert_eq!(tree.nodes[n].left, Some(a));
        assert_eq!(tree.nodes[n].right, Some(p));
        assert_eq!(tree.nodes[p].left, Some(b));
        assert_eq!(tree.nodes[p].right, Some(c));
        assert_eq!(tree.nodes[b].parent, Some(p));
        assert_eq!(tree.nodes[p].parent, Some(n));
    }

    #[test]
    fn test_rotate_below_root_relinks_parent() {
        let (mut tree, [n, p, _a, b, c]) = diagram();
        let before = in_order(&tree);

        // Rotate the right subtree; n keeps its place but gets a new right child.
        let pivot = tree.rotate(p, Side::Right);

        assert_eq!(pivot, b);
        assert_eq!(tree.root, Some(n));
        assert_eq!(tree.nodes[n].right, Some(b));
        assert_eq!(tree.nodes[b].parent, Some(n));
        assert_eq!(tree.nodes[b].right, Some(p));
        assert_eq!(tree.nodes[p].parent, Some(b));
        assert!(tree.nodes[p].left.is_none());
        assert_eq!(tree.nodes[p].right, Some(c));
        assert_eq!(in_order(&tree), before);
    }

    #[test]
    #[should_panic(expected = "rotation of")]
    fn test_rotate_without_pivot_panics() {
        let (mut tree, [_n, _p, a, _b, _c]) = diagram();

        tree.rotate(a, Side::Left);
    }
}
