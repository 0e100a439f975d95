//! Positions and cursors over an [`RbMap`].
//!
//! A [`Position`] is a detached place in a map's key order: either an
//! entry or the one-past-the-end position. It borrows nothing, so it can be
//! kept across mutations of the map and handed back later, for example to
//! [`RbMap::erase`]. Every use goes through the map, which checks that the
//! position belongs to it and that its entry still exists.
//!
//! A [`Cursor`] pairs a position with a reference to its map. `Cursor<&RbMap>`
//! reads; `Cursor<&mut RbMap>` can also write values and remove entries. Both
//! share one movement implementation.
//!
//! # Examples
//!
//! ```rust
//! use rbmap::RbMap;
//!
//! let mut map = RbMap::new();
//! for key in [2, 1, 3] {
//!     map.insert(key, key * 100);
//! }
//!
//! let mut cursor = map.cursor_front();
//! assert_eq!(cursor.entry(), Ok((&1, &100)));
//! cursor.move_next().unwrap();
//! assert_eq!(cursor.key(), Ok(&2));
//!
//! let mut cursor = map.cursor_mut(map.end());
//! cursor.move_prev().unwrap();
//! *cursor.value_mut().unwrap() += 1;
//! assert_eq!(map.get(&3), Some(&301));
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use super::RbMap;
use crate::error::{InvalidOperation, MapError};
use crate::tree::NodeHandle;

// =============================================================================
// Map Identity
// =============================================================================

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identity given to every map instance, clones included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MapId(u64);

impl MapId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_MAP_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

// =============================================================================
// Position
// =============================================================================

/// A detached position in a map: an entry, or one past the last entry.
///
/// `Position::default()` is bound to no map; every operation on it fails
/// with [`InvalidOperation::Unbound`]. A position whose entry has been
/// erased (or whose map was cleared) fails with
/// [`InvalidOperation::StaleCursor`].
///
/// Two positions are equal when they belong to the same map and name the
/// same entry, or are both that map's end position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    owner: Option<MapId>,
    node: Option<NodeHandle>,
}

impl Position {
    pub(crate) const fn new(owner: MapId, node: Option<NodeHandle>) -> Self {
        Self {
            owner: Some(owner),
            node,
        }
    }

    /// Returns `true` if this position was produced by some map.
    #[inline]
    pub const fn is_bound(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns `true` if this is a map's one-past-the-end position.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.owner.is_some() && self.node.is_none()
    }

    /// Checks ownership and returns the node handle, `None` meaning end.
    pub(crate) fn handle_for(self, map: MapId) -> Result<Option<NodeHandle>, MapError> {
        match self.owner {
            None => Err(InvalidOperation::Unbound.into()),
            Some(owner) if owner != map => Err(InvalidOperation::ForeignCursor.into()),
            Some(_) => Ok(self.node),
        }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A [`Position`] bound to a map reference.
///
/// `M` is `&RbMap` for a read-only cursor or `&mut RbMap` for a cursor that
/// can also modify values and remove entries.
pub struct Cursor<M> {
    map: M,
    position: Position,
}

impl<M> Cursor<M> {
    pub(crate) const fn new(map: M, position: Position) -> Self {
        Self { map, position }
    }

    /// The detached position this cursor is at.
    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.position.is_end()
    }
}

impl<K, V, C, M> Cursor<M>
where
    M: Deref<Target = RbMap<K, V, C>>,
{
    /// The map this cursor walks.
    pub fn map<'s>(&'s self) -> &'s RbMap<K, V, C>
    where
        K: 's,
        V: 's,
        C: 's,
    {
        &self.map
    }

    /// The key at the cursor.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::DereferenceEnd`] at the end position, or any
    /// error [`RbMap::entry_at`] reports for the position.
    pub fn key<'s>(&'s self) -> Result<&'s K, MapError>
    where
        K: 's,
        V: 's,
        C: 's,
    {
        self.entry().map(|(key, _)| key)
    }

    /// The value at the cursor.
    ///
    /// # Errors
    ///
    /// As for [`Cursor::key`].
    pub fn value<'s>(&'s self) -> Result<&'s V, MapError>
    where
        K: 's,
        V: 's,
        C: 's,
    {
        self.entry().map(|(_, value)| value)
    }

    /// The key and value at the cursor.
    ///
    /// # Errors
    ///
    /// As for [`Cursor::key`].
    pub fn entry<'s>(&'s self) -> Result<(&'s K, &'s V), MapError>
    where
        K: 's,
        V: 's,
        C: 's,
    {
        self.map.entry_at(self.position)
    }

    /// Moves to the next entry in key order, or to the end position after
    /// the last entry.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::AdvancePastEnd`] at the end position. The cursor
    /// does not move on error.
    pub fn move_next(&mut self) -> Result<(), MapError> {
        self.position = self.map.next_position(self.position)?;
        Ok(())
    }

    /// Moves to the previous entry in key order. From the end position this
    /// is the last entry.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::RetreatPastBegin`] at the first entry, or at the
    /// end position of an empty map. The cursor does not move on error.
    pub fn move_prev(&mut self) -> Result<(), MapError> {
        self.position = self.map.prev_position(self.position)?;
        Ok(())
    }
}

impl<K, V, C, M> Cursor<M>
where
    M: DerefMut<Target = RbMap<K, V, C>>,
{
    /// Mutable access to the value at the cursor.
    ///
    /// # Errors
    ///
    /// As for [`Cursor::key`].
    pub fn value_mut<'s>(&'s mut self) -> Result<&'s mut V, MapError>
    where
        K: 's,
        V: 's,
        C: 's,
    {
        self.map
            .entry_at_mut(self.position)
            .map(|(_, value)| value)
    }

    /// Removes the entry at the cursor and moves to its successor.
    ///
    /// # Errors
    ///
    /// [`InvalidOperation::EraseEnd`] at the end position, or any error
    /// [`RbMap::erase`] reports for the position. Nothing is removed on
    /// error.
    pub fn remove_current(&mut self) -> Result<(K, V), MapError> {
        let next = match self.map.next_position(self.position) {
            Err(MapError::InvalidOperation(InvalidOperation::AdvancePastEnd)) => {
                return Err(InvalidOperation::EraseEnd.into());
            }
            other => other?,
        };
        let entry = self.map.erase(self.position)?;
        self.position = next;
        Ok(entry)
    }
}

impl<M: Clone> Clone for Cursor<M> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            position: self.position,
        }
    }
}

impl<M: Copy> Copy for Cursor<M> {}

impl<M, N> PartialEq<Cursor<N>> for Cursor<M> {
    fn eq(&self, other: &Cursor<N>) -> bool {
        self.position == other.position
    }
}

impl<M> fmt::Debug for Cursor<M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
