//! Iterators over the entries of an [`RbMap`](super::RbMap).
//!
//! The borrowing iterator walks the tree with successor and predecessor
//! steps from both ends, so it needs no allocation. The mutable and owning
//! iterators collect their entries up front into an O(N) buffer.

use std::iter::FusedIterator;

use crate::tree::{NodeId, Tree};

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// An iterator over key-value pairs of an [`RbMap`](super::RbMap), in key
/// order.
pub struct RbMapIterator<'a, K, V, C> {
    tree: &'a Tree<K, V, C>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V, C> RbMapIterator<'a, K, V, C> {
    pub(crate) fn new(tree: &'a Tree<K, V, C>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V, C> Iterator for RbMapIterator<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.successor(id);
        self.remaining -= 1;
        Some(self.tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for RbMapIterator<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.predecessor(id);
        self.remaining -= 1;
        Some(self.tree.entry(id))
    }
}

impl<K, V, C> ExactSizeIterator for RbMapIterator<'_, K, V, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, C> FusedIterator for RbMapIterator<'_, K, V, C> {}

impl<K, V, C> Clone for RbMapIterator<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Mutable Iterator
// =============================================================================

/// An iterator over keys and mutable values of an [`RbMap`](super::RbMap),
/// in key order.
///
/// The reference pairs are collected when the iterator is created, which
/// allocates O(N).
pub struct RbMapIterMut<'a, K, V> {
    entries: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> RbMapIterMut<'a, K, V> {
    pub(crate) fn new<C>(tree: &'a mut Tree<K, V, C>) -> Self {
        Self {
            entries: tree.entries_mut_in_order().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for RbMapIterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for RbMapIterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for RbMapIterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FusedIterator for RbMapIterMut<'_, K, V> {}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over key-value pairs of an [`RbMap`](super::RbMap),
/// in key order.
///
/// Every entry is moved out of the tree into a buffer when the iterator is
/// created, which allocates O(N). Entries not consumed are dropped with the
/// iterator.
pub struct RbMapIntoIterator<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> RbMapIntoIterator<K, V> {
    pub(crate) fn new<C>(tree: Tree<K, V, C>) -> Self {
        Self {
            entries: tree.into_sorted_entries().into_iter(),
        }
    }
}

impl<K, V> Iterator for RbMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for RbMapIntoIterator<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for RbMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FusedIterator for RbMapIntoIterator<K, V> {}
