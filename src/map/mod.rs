//! Ordered map based on a red-black tree.
//!
//! This module provides [`RbMap`], a mutable ordered map with unique keys
//! and checked cursors.
//!
//! # Overview
//!
//! - O(log N) find, insert, erase
//! - O(1) len and `is_empty`
//! - O(1) amortized cursor steps, O(log N) worst case
//! - Entries are visited in key order, from either end
//!
//! Keys are ordered by a [`Compare`] predicate chosen at construction;
//! [`NaturalOrder`] (the key's [`Ord`]) is the default.
//!
//! # Examples
//!
//! ```rust
//! use rbmap::RbMap;
//!
//! let mut map = RbMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.insert(key, key.to_string());
//! }
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &7, &8, &9]);
//!
//! let position = map.find(&3);
//! assert_eq!(map.erase(position), Ok((3, "3".to_string())));
//! assert_eq!(map.count(&3), 0);
//! assert_eq!(map.len(), 6);
//! ```

mod cursor;
mod iter;

pub use cursor::{Cursor, Position};
pub use iter::{RbMapIntoIterator, RbMapIterMut, RbMapIterator};

use std::fmt;
use std::hash::{Hash, Hasher};

use self::cursor::MapId;
use crate::compare::{Compare, NaturalOrder};
use crate::error::{InvalidOperation, InvariantViolation, MapError};
use crate::tree::{NodeId, Tree};

// =============================================================================
// RbMap Definition
// =============================================================================

/// An ordered map with unique keys, backed by a red-black tree.
///
/// Positions ([`Position`]) returned by [`find`](Self::find),
/// [`insert`](Self::insert), [`begin`](Self::begin) and
/// [`end`](Self::end) stay usable across unrelated mutations. A position
/// becomes stale only when its own entry is erased, or when the map is
/// cleared or overwritten by [`Clone::clone_from`].
///
/// # Time Complexity
///
/// | Operation                   | Complexity |
/// |-----------------------------|------------|
/// | `new`                       | O(1)       |
/// | `find`/`get`/`at`/`count`   | O(log N)   |
/// | `insert`                    | O(log N)   |
/// | `get_or_insert_default`     | O(log N)   |
/// | `erase`/`remove`            | O(log N)   |
/// | `begin`/`first_key_value`   | O(log N)   |
/// | `end`                       | O(1)       |
/// | `len`/`is_empty`            | O(1)       |
/// | `clear`/`clone`             | O(N)       |
///
/// # Examples
///
/// ```rust
/// use rbmap::{RbMap, ReverseOrder};
///
/// let mut map = RbMap::with_comparator(ReverseOrder);
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// let (position, inserted) = map.insert(1, "uno");
/// assert!(!inserted);
/// assert_eq!(map.entry_at(position), Ok((&1, &"one")));
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&2, &1]);
/// ```
pub struct RbMap<K, V, C = NaturalOrder> {
    tree: Tree<K, V, C>,
    id: MapId,
}

impl<K, V> RbMap<K, V> {
    /// Creates an empty map ordered by the keys' [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::RbMap;
    ///
    /// let map: RbMap<i32, String> = RbMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RbMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::with_comparator(|left: &i32, right: &i32| left.abs() < right.abs());
    /// map.insert(-3, "minus three");
    /// let (_, inserted) = map.insert(3, "three");
    /// assert!(!inserted);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::new(comparator),
            id: MapId::fresh(),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Returns the comparator that orders this map's keys.
    #[inline]
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Removes every entry. Every position into this map other than
    /// [`end`](Self::end) becomes stale.
    ///
    /// Entries are dropped, but their arena slots are kept so that old
    /// positions can still be recognized as stale. Later insertions reuse
    /// those slots, so the arena stays at the map's peak size instead of
    /// shrinking. Drop the map or replace it with a new one to give the
    /// memory back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::RbMap;
    ///
    /// let mut map: RbMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let released = self.tree.clear();
        tracing::debug!(released, "cleared map");
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    fn position_of(&self, node: Option<NodeId>) -> Position {
        Position::new(self.id, node.map(|id| self.tree.handle(id)))
    }

    /// Checks that `position` belongs to this map and still exists.
    /// `Ok(None)` is the end position.
    fn locate(&self, position: Position) -> Result<Option<NodeId>, MapError> {
        match position.handle_for(self.id)? {
            None => Ok(None),
            Some(handle) => self
                .tree
                .resolve(handle)
                .map(Some)
                .ok_or_else(|| InvalidOperation::StaleCursor.into()),
        }
    }

    /// The position of the entry with the smallest key, or
    /// [`end`](Self::end) if the map is empty.
    pub fn begin(&self) -> Position {
        self.position_of(self.tree.first())
    }

    /// The one-past-the-end position.
    pub fn end(&self) -> Position {
        self.position_of(None)
    }

    /// The position after `position` in key order.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::AdvancePastEnd`] if `position` is the end
    /// position; [`InvalidOperation::Unbound`],
    /// [`InvalidOperation::ForeignCursor`] or
    /// [`InvalidOperation::StaleCursor`] if it is not a live position of this
    /// map.
    pub fn next_position(&self, position: Position) -> Result<Position, MapError> {
        let id = self
            .locate(position)?
            .ok_or(InvalidOperation::AdvancePastEnd)?;
        Ok(self.position_of(self.tree.successor(id)))
    }

    /// The position before `position` in key order. Before the end position
    /// is the entry with the largest key.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::RetreatPastBegin`] if `position` is the first
    /// entry, or the end position of an empty map; ownership errors as for
    /// [`next_position`](Self::next_position).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::{InvalidOperation, MapError, RbMap};
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(
    ///     map.prev_position(map.end()),
    ///     Err(MapError::InvalidOperation(InvalidOperation::RetreatPastBegin))
    /// );
    ///
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// let last = map.prev_position(map.end()).unwrap();
    /// assert_eq!(map.entry_at(last), Ok((&2, &())));
    /// ```
    pub fn prev_position(&self, position: Position) -> Result<Position, MapError> {
        let previous = match self.locate(position)? {
            None => self.tree.last(),
            Some(id) => self.tree.predecessor(id),
        };
        previous
            .map(|id| self.position_of(Some(id)))
            .ok_or_else(|| InvalidOperation::RetreatPastBegin.into())
    }

    /// The key and value at `position`.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::DereferenceEnd`] at the end position; ownership
    /// errors as for [`next_position`](Self::next_position).
    pub fn entry_at(&self, position: Position) -> Result<(&K, &V), MapError> {
        let id = self
            .locate(position)?
            .ok_or(InvalidOperation::DereferenceEnd)?;
        Ok(self.tree.entry(id))
    }

    /// The key and a mutable value at `position`.
    ///
    /// # Errors
    ///
    /// As for [`entry_at`](Self::entry_at).
    pub fn entry_at_mut(&mut self, position: Position) -> Result<(&K, &mut V), MapError> {
        let id = self
            .locate(position)?
            .ok_or(InvalidOperation::DereferenceEnd)?;
        Ok(self.tree.entry_mut(id))
    }

    /// Removes the entry at `position` and returns it.
    ///
    /// Only positions naming this entry become stale; every other position
    /// into the map stays valid. The entry's slot is kept for reuse, as
    /// described for [`clear`](Self::clear).
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::EraseEnd`] at the end position;
    /// [`InvalidOperation::Unbound`], [`InvalidOperation::ForeignCursor`] or
    /// [`InvalidOperation::StaleCursor`] if `position` is not a live position
    /// of this map. The map is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::{InvalidOperation, MapError, RbMap};
    ///
    /// let mut map: RbMap<i32, &str> = [(1, "a"), (2, "b")].into();
    /// let other: RbMap<i32, &str> = [(1, "a")].into();
    ///
    /// assert_eq!(
    ///     map.erase(other.begin()),
    ///     Err(MapError::InvalidOperation(InvalidOperation::ForeignCursor))
    /// );
    /// assert_eq!(map.erase(map.begin()), Ok((1, "a")));
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<(K, V), MapError> {
        let id = self.locate(position)?.ok_or(InvalidOperation::EraseEnd)?;
        let entry = self.tree.remove(id);
        tracing::trace!(len = self.len(), "erased entry");
        Ok(entry)
    }

    /// A read-only cursor at `position`. The position is checked when the
    /// cursor is used, not here.
    pub fn cursor(&self, position: Position) -> Cursor<&Self> {
        Cursor::new(self, position)
    }

    /// A read-write cursor at `position`.
    pub fn cursor_mut(&mut self, position: Position) -> Cursor<&mut Self> {
        Cursor::new(self, position)
    }

    /// A read-only cursor at [`begin`](Self::begin).
    pub fn cursor_front(&self) -> Cursor<&Self> {
        self.cursor(self.begin())
    }

    /// A read-write cursor at [`begin`](Self::begin).
    pub fn cursor_front_mut(&mut self) -> Cursor<&mut Self> {
        let position = self.begin();
        self.cursor_mut(position)
    }

    // -------------------------------------------------------------------------
    // Ordered access and iteration
    // -------------------------------------------------------------------------

    /// The entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|id| self.tree.entry(id))
    }

    /// The entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|id| self.tree.entry(id))
    }

    /// Returns an iterator over entries in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::RbMap;
    ///
    /// let map: RbMap<i32, char> = [(2, 'b'), (1, 'a')].into();
    /// let entries: Vec<(&i32, &char)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b')]);
    /// assert_eq!(map.iter().next_back(), Some((&2, &'b')));
    /// ```
    pub fn iter(&self) -> RbMapIterator<'_, K, V, C> {
        RbMapIterator::new(&self.tree)
    }

    /// Returns an iterator over entries in key order with mutable values.
    ///
    /// Unlike [`iter`](Self::iter), this collects one reference pair per
    /// entry before yielding the first, so it allocates O(N).
    pub fn iter_mut(&mut self) -> RbMapIterMut<'_, K, V> {
        RbMapIterMut::new(&mut self.tree)
    }

    /// Returns an iterator over keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable values in key order. Allocates
    /// O(N) up front, like [`iter_mut`](Self::iter_mut).
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.iter_mut().map(|(_, value)| value)
    }
}

impl<K, V, C: Compare<K>> RbMap<K, V, C> {
    /// The position of `key`'s entry, or [`end`](Self::end) if absent.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn find(&self, key: &K) -> Position {
        self.position_of(self.tree.search(key))
    }

    /// The number of entries with a key equivalent to `key`: 0 or 1.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns `true` if the map holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.search(key).is_some()
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.search(key).map(|id| self.tree.entry(id).1)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.tree.search(key)?;
        Some(self.tree.entry_mut(id).1)
    }

    /// Returns the value for `key`, which must be present.
    ///
    /// Unlike [`get_or_insert_default`](Self::get_or_insert_default) this
    /// never inserts.
    ///
    /// # Errors
    ///
    /// [`MapError::MissingKey`] if the map has no entry for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::{MapError, RbMap};
    ///
    /// let map: RbMap<&str, i32> = [("a", 1)].into();
    /// assert_eq!(map.at(&"a"), Ok(&1));
    /// assert_eq!(map.at(&"b"), Err(MapError::MissingKey));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, MapError> {
        self.get(key).ok_or(MapError::MissingKey)
    }

    /// Mutable variant of [`at`](Self::at).
    ///
    /// # Errors
    ///
    /// [`MapError::MissingKey`] if the map has no entry for `key`.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, MapError> {
        self.get_mut(key).ok_or(MapError::MissingKey)
    }

    /// Returns the value for `key`, first inserting `V::default()` if the key
    /// is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::RbMap;
    ///
    /// let mut counts: RbMap<char, usize> = RbMap::new();
    /// for letter in "abracadabra".chars() {
    ///     *counts.get_or_insert_default(letter) += 1;
    /// }
    /// assert_eq!(counts.get(&'a'), Some(&5));
    /// assert_eq!(counts.len(), 5);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the value for `key`, first inserting `make_value()` if the key
    /// is absent. `make_value` is not called when the key is present.
    pub fn get_or_insert_with<F>(&mut self, key: K, make_value: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (id, inserted) = self.tree.insert_with(key, make_value);
        if inserted {
            tracing::trace!(len = self.len(), "inserted entry on access");
        }
        self.tree.entry_mut(id).1
    }

    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// Returns the position of the entry holding `key` and whether it was
    /// inserted. An existing entry keeps its value and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// let (first, inserted) = map.insert(7, "seven");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.insert(7, "SEVEN");
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// assert_eq!(map.get(&7), Some(&"seven"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let (id, inserted) = self.tree.insert_with(key, || value);
        tracing::trace!(inserted, len = self.len(), "insert");
        (self.position_of(Some(id)), inserted)
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.tree.search(key)?;
        let (_, value) = self.tree.remove(id);
        tracing::trace!(len = self.len(), "removed entry");
        Some(value)
    }

    /// Verifies the red-black tree invariants: key order, coloring, black
    /// height, parent links and the entry count.
    ///
    /// Every operation preserves them; this is a diagnostic for tests and
    /// for comparators suspected of not being strict weak orderings.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for RbMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

/// Deep copies. The copy is a distinct map: positions from the original are
/// foreign to it.
impl<K: Clone, V: Clone, C: Clone> Clone for RbMap<K, V, C> {
    fn clone(&self) -> Self {
        let tree = self.tree.clone();
        tracing::debug!(len = tree.len(), "cloned map");
        Self {
            tree,
            id: MapId::fresh(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
        tracing::debug!(len = self.len(), "cloned map into existing map");
    }
}

impl<K, V, C> FromIterator<(K, V)> for RbMap<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Inserts each pair; for repeated keys the first value wins.
impl<K, V, C: Compare<K>> Extend<(K, V)> for RbMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Moves every entry into a buffer in key order before yielding the first.
impl<K, V, C> IntoIterator for RbMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = RbMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        RbMapIntoIterator::new(self.tree)
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = RbMapIterator<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut RbMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = RbMapIterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Maps are equal when they hold equal entries in the same order.
impl<K: PartialEq, V: PartialEq, C> PartialEq for RbMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RbMap<K, V, C> {}

/// Hashes the length, then every entry in key order, so equal maps hash
/// equally regardless of insertion order.
impl<K: Hash, V: Hash, C> Hash for RbMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for RbMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for RbMap<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct RbMapVisitor<K, V, C> {
    marker: std::marker::PhantomData<fn() -> RbMap<K, V, C>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for RbMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Compare<K> + Default,
{
    type Value = RbMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = RbMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for RbMap<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RbMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::compare::ReverseOrder;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_empty() {
        let map: RbMap<String, i32> = RbMap::new();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "{}");
    }

    #[rstest]
    fn test_serialize_in_key_order() {
        let map: RbMap<String, i32> = [
            ("c".to_string(), 3),
            ("a".to_string(), 1),
            ("b".to_string(), 2),
        ]
        .into();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);
    }

    #[rstest]
    fn test_serialize_follows_comparator() {
        let mut map = RbMap::with_comparator(ReverseOrder);
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }

    #[rstest]
    fn test_roundtrip() {
        let original: RbMap<String, Vec<i32>> = (0..50)
            .map(|index| (format!("key{index:02}"), vec![index; 2]))
            .collect();
        let json = serde_json::to_string(&original).unwrap();
        let restored: RbMap<String, Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
        assert_eq!(restored.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_deserialize_keeps_first_duplicate() {
        let json = r#"{"key":1,"key":2}"#;
        let map: RbMap<String, i32> = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"key".to_string()), Some(&1));
    }
}
