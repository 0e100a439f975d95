//! In-order navigation over the tree's structural links.
//!
//! Ordered iteration is derived from the tree shape alone: the successor
//! of a node is the leftmost node of its right subtree, or else the first
//! ancestor reached from a left child. The predecessor is the mirror image.

use super::node::{NodeId, Side};
use super::rbtree::Tree;

impl<K, V, C> Tree<K, V, C> {
    /// The node with the smallest key in the subtree at `id`.
    #[inline]
    pub(crate) fn minimum(&self, id: NodeId) -> NodeId {
        self.extreme(id, Side::Left)
    }

    /// The node with the largest key in the subtree at `id`.
    #[inline]
    pub(crate) fn maximum(&self, id: NodeId) -> NodeId {
        self.extreme(id, Side::Right)
    }

    /// The node with the smallest key, or `None` if the tree is empty.
    pub(crate) fn first(&self) -> Option<NodeId> {
        self.root().map(|root| self.minimum(root))
    }

    /// The node with the largest key, or `None` if the tree is empty.
    pub(crate) fn last(&self) -> Option<NodeId> {
        self.root().map(|root| self.maximum(root))
    }

    /// The next node in key order, or `None` past the largest key.
    #[inline]
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// The previous node in key order, or `None` before the smallest key.
    #[inline]
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    /// Steps one position toward `side` in key order.
    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = id;
        let mut parent = self.node(id).parent;
        while let Some(ancestor) = parent {
            if self.child(ancestor, side) != Some(current) {
                break;
            }
            current = ancestor;
            parent = self.node(ancestor).parent;
        }
        parent
    }
}
