//! Red-black tree core: search, rotations, fixups, clone and teardown.
//!
//! # Invariants
//!
//! After every public operation of the owning map returns:
//!
//! 1. In-order traversal visits keys in strictly increasing order under the
//!    comparator, so no two stored keys are equivalent.
//! 2. The root is black, a red node never has a red child, and every path
//!    from a node down to a null child crosses the same number of black
//!    nodes. Null children count as black.
//! 3. `length` equals the number of nodes reachable from `root`.
//! 4. Every child links back to its parent and the root has no parent.
//!
//! The fixups are written once against a [`Side`] and run for both
//! mirror images.

use super::node::{Arena, Color, Node, NodeHandle, NodeId, Side};
use crate::compare::Compare;
use crate::error::InvariantViolation;

// =============================================================================
// Tree Definition
// =============================================================================

pub(crate) struct Tree<K, V, C> {
    arena: Arena<K, V>,
    root: Option<NodeId>,
    length: usize,
    comparator: C,
}

impl<K, V, C> Tree<K, V, C> {
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            length: 0,
            comparator,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub(crate) const fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.arena.get(id)
    }

    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.arena.get(id);
        (&node.key, &node.value)
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, id: NodeId) -> (&K, &mut V) {
        let node = self.arena.get_mut(id);
        (&node.key, &mut node.value)
    }

    #[inline]
    pub(crate) fn handle(&self, id: NodeId) -> NodeHandle {
        self.arena.handle(id)
    }

    #[inline]
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Option<NodeId> {
        self.arena.resolve(handle)
    }

    // -------------------------------------------------------------------------
    // Link helpers
    // -------------------------------------------------------------------------

    #[inline]
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).parent
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.arena.get(id).child(side)
    }

    #[inline]
    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.arena.get_mut(id).parent = parent;
    }

    #[inline]
    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        self.arena.get_mut(id).set_child(side, child);
    }

    /// Null counts as black.
    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.arena.get(id).is_red())
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.arena.get(id).color
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena.get_mut(id).color = color;
    }

    /// Which side of `parent` holds `child`.
    #[inline]
    fn side_of(&self, child: Option<NodeId>, parent: NodeId) -> Side {
        if self.child(parent, Side::Left) == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referenced `old` (its parent, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(Some(old), parent);
                self.set_child(parent, side, new);
            }
        }
    }

    /// Puts the subtree `replacement` where `target` hangs.
    fn transplant(&mut self, target: NodeId, replacement: Option<NodeId>) {
        let parent = self.parent(target);
        self.replace_child(parent, target, replacement);
        if let Some(replacement) = replacement {
            self.set_parent(replacement, parent);
        }
    }

    // -------------------------------------------------------------------------
    // Rotation
    // -------------------------------------------------------------------------

    /// Rotates `pivot` down toward `direction`.
    ///
    /// `rotate(x, Side::Left)` is the classical left rotation: the right
    /// child of `x` takes its place and `x` becomes that child's left child.
    /// The key set and in-order sequence are unchanged.
    fn rotate(&mut self, pivot: NodeId, direction: Side) {
        let Some(lifted) = self.child(pivot, direction.opposite()) else {
            unreachable!("rotation needs a child opposite the rotation direction")
        };

        let inner = self.child(lifted, direction);
        self.set_child(pivot, direction.opposite(), inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(pivot));
        }

        let parent = self.parent(pivot);
        self.set_parent(lifted, parent);
        self.replace_child(parent, pivot, Some(lifted));

        self.set_child(lifted, direction, Some(pivot));
        self.set_parent(pivot, Some(lifted));
    }

    // -------------------------------------------------------------------------
    // Deletion
    // -------------------------------------------------------------------------

    /// Unlinks `target`, rebalances, and returns its entry.
    ///
    /// Nodes are relinked rather than having their entries swapped, so every
    /// other node keeps its identity.
    pub(crate) fn remove(&mut self, target: NodeId) -> (K, V) {
        let (left, right, parent) = {
            let node = self.arena.get(target);
            (node.left, node.right, node.parent)
        };

        let mut removed_color = self.color(target);
        let replacement;
        let replacement_parent;

        match (left, right) {
            (None, _) => {
                replacement = right;
                replacement_parent = parent;
                self.transplant(target, right);
            }
            (Some(left), None) => {
                replacement = Some(left);
                replacement_parent = parent;
                self.transplant(target, Some(left));
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                removed_color = self.color(successor);
                replacement = self.child(successor, Side::Right);

                if self.parent(successor) == Some(target) {
                    replacement_parent = Some(successor);
                } else {
                    replacement_parent = self.parent(successor);
                    self.transplant(successor, replacement);
                    self.set_child(successor, Side::Right, Some(right));
                    self.set_parent(right, Some(successor));
                }

                self.transplant(target, Some(successor));
                self.set_child(successor, Side::Left, Some(left));
                self.set_parent(left, Some(successor));
                let target_color = self.color(target);
                self.set_color(successor, target_color);
            }
        }

        let node = self.arena.release(target);
        self.length -= 1;

        if removed_color == Color::Black {
            self.remove_fixup(replacement, replacement_parent);
        }

        (node.key, node.value)
    }

    /// Restores the black height after a black node left the path through
    /// `node`. `node` may be null, so its parent is passed explicitly.
    fn remove_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.root && !self.is_red(node) {
            let Some(current_parent) = parent else {
                break;
            };
            let side = self.side_of(node, current_parent);
            let mut sibling = self.sibling_of(current_parent, side);

            if self.arena.get(sibling).is_red() {
                self.set_color(sibling, Color::Black);
                self.set_color(current_parent, Color::Red);
                self.rotate(current_parent, side);
                sibling = self.sibling_of(current_parent, side);
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                node = Some(current_parent);
                parent = self.parent(current_parent);
                continue;
            }

            if !self.is_red(far) {
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.sibling_of(current_parent, side);
            }

            let parent_color = self.color(current_parent);
            self.set_color(sibling, parent_color);
            self.set_color(current_parent, Color::Black);
            if let Some(far) = self.child(sibling, side.opposite()) {
                self.set_color(far, Color::Black);
            }
            self.rotate(current_parent, side);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// The child of `parent` opposite `side`. A black-height deficit on
    /// `side` guarantees it exists.
    fn sibling_of(&self, parent: NodeId, side: Side) -> NodeId {
        match self.child(parent, side.opposite()) {
            Some(sibling) => sibling,
            None => unreachable!("black-height deficit without a sibling"),
        }
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Releases every node, leaving an empty tree. Returns how many nodes
    /// were released.
    pub(crate) fn clear(&mut self) -> usize {
        let root = self.root.take();
        self.length = 0;
        self.teardown_subtree(root)
    }

    /// Releases the subtree under `root` in post-order, children first.
    fn teardown_subtree(&mut self, root: Option<NodeId>) -> usize {
        let Some(root) = root else {
            return 0;
        };

        // Pre-order with the right child popped first; reversed it is a
        // post-order.
        let mut stack = vec![root];
        let mut order = Vec::new();
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = self.arena.get(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }

        for &id in order.iter().rev() {
            self.arena.release(id);
        }
        order.len()
    }

    /// Consumes the tree, yielding its entries in order.
    pub(crate) fn into_sorted_entries(mut self) -> Vec<(K, V)> {
        let order = self.in_order_ids();
        order
            .into_iter()
            .map(|id| {
                let node = self.arena.release(id);
                (node.key, node.value)
            })
            .collect()
    }

    /// Mutable access to every value, in key order.
    pub(crate) fn entries_mut_in_order(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.in_order_ids();
        self.arena.entries_mut(&order)
    }

    fn in_order_ids(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.length);
        let mut current = self.first();
        while let Some(id) = current {
            order.push(id);
            current = self.successor(id);
        }
        order
    }
}

// =============================================================================
// Search and Insertion
// =============================================================================

impl<K, V, C: Compare<K>> Tree<K, V, C> {
    /// Finds the node whose key is equivalent to `key`.
    pub(crate) fn search(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.arena.get(id);
            if self.comparator.less(key, &node.key) {
                current = node.left;
            } else if self.comparator.less(&node.key, key) {
                current = node.right;
            } else {
                return Some(id);
            }
        }
        None
    }

    /// Inserts `key` unless an equivalent key is present.
    ///
    /// Returns the node holding the key and whether it was created.
    /// `make_value` runs only when a node is created.
    pub(crate) fn insert_with<F>(&mut self, key: K, make_value: F) -> (NodeId, bool)
    where
        F: FnOnce() -> V,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.arena.get(id);
            side = if self.comparator.less(&key, &node.key) {
                Side::Left
            } else if self.comparator.less(&node.key, &key) {
                Side::Right
            } else {
                return (id, false);
            };
            parent = Some(id);
            current = node.child(side);
        }

        let mut node = Node::new(key, make_value(), Color::Red);
        node.parent = parent;
        let id = self.arena.allocate(node);
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.set_child(parent, side, Some(id)),
        }
        self.length += 1;

        self.insert_fixup(id);
        (id, true)
    }

    /// Removes red-red violations upward from a freshly inserted red node.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.parent(node) {
            if !self.arena.get(parent).is_red() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.parent(parent) else {
                break;
            };
            let side = self.side_of(Some(parent), grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.child(parent, side.opposite()) == Some(node) {
                // Inner grandchild: turn it into the outer case.
                self.rotate(parent, side);
                (node, parent) = (parent, node);
            }
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            debug_assert_eq!(self.parent(node), Some(parent));
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Checks every structural invariant listed in the module docs.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return if self.length == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::Length {
                    recorded: self.length,
                    reachable: 0,
                })
            };
        };

        let root_node = self.arena.get(root);
        if root_node.parent.is_some() {
            return Err(InvariantViolation::RootHasParent);
        }
        if root_node.is_red() {
            return Err(InvariantViolation::RedRoot);
        }

        let (_, reachable) = self.validate_subtree(root)?;
        if reachable != self.length {
            return Err(InvariantViolation::Length {
                recorded: self.length,
                reachable,
            });
        }

        let mut current = self.first();
        while let Some(id) = current {
            current = self.successor(id);
            if let Some(next) = current {
                if !self
                    .comparator
                    .less(&self.arena.get(id).key, &self.arena.get(next).key)
                {
                    return Err(InvariantViolation::Ordering);
                }
            }
        }
        Ok(())
    }

    /// Returns the black height and node count of the subtree at `id`.
    fn validate_subtree(&self, id: NodeId) -> Result<(usize, usize), InvariantViolation> {
        let node = self.arena.get(id);
        let mut heights = [0, 0];
        let mut count = 1;

        for (height, side) in heights.iter_mut().zip([Side::Left, Side::Right]) {
            let Some(child) = node.child(side) else {
                continue;
            };
            if self.parent(child) != Some(id) {
                return Err(InvariantViolation::BrokenParentLink);
            }
            if node.is_red() && self.arena.get(child).is_red() {
                return Err(InvariantViolation::RedRed);
            }
            let (child_height, child_count) = self.validate_subtree(child)?;
            *height = child_height;
            count += child_count;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeight { left, right });
        }
        Ok((left + usize::from(!node.is_red()), count))
    }
}

// =============================================================================
// Cloning
// =============================================================================

impl<K: Clone, V: Clone, C> Tree<K, V, C> {
    /// Deep-copies the subtree of `source` rooted at `source_root` into this
    /// tree's arena, preserving shape and colors. Returns the copy's root,
    /// which is left without a parent.
    fn clone_subtree(&mut self, source: &Self, source_root: Option<NodeId>) -> Option<NodeId> {
        let source_root = source_root?;
        let root = self.copy_node(source, source_root, None);

        let mut stack = vec![(source_root, root)];
        while let Some((original, copy)) = stack.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(original_child) = source.child(original, side) {
                    let child_copy = self.copy_node(source, original_child, Some(copy));
                    self.set_child(copy, side, Some(child_copy));
                    stack.push((original_child, child_copy));
                }
            }
        }
        Some(root)
    }

    fn copy_node(&mut self, source: &Self, id: NodeId, parent: Option<NodeId>) -> NodeId {
        let original = source.arena.get(id);
        let mut node = Node::new(original.key.clone(), original.value.clone(), original.color);
        node.parent = parent;
        self.arena.allocate(node)
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for Tree<K, V, C> {
    fn clone(&self) -> Self {
        let mut tree = Self::new(self.comparator.clone());
        tree.root = tree.clone_subtree(self, self.root);
        tree.length = self.length;
        tree
    }

    /// Tears down the current content, then copies `source` into the same
    /// arena. Handles into the old content stay stale.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.comparator.clone_from(&source.comparator);
        self.root = self.clone_subtree(source, source.root);
        self.length = source.length;
    }
}

// =============================================================================
// Tests
// =============================================================================
