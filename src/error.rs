//! Error types for map operations.
//!
//! Lookups that may legitimately miss ([`RbMap::get`], [`RbMap::find`],
//! [`RbMap::count`]) report absence through `Option`, the end position or
//! zero. Errors are reserved for the two conditions a caller can violate:
//! asking for a value that must exist, and misusing a cursor.
//!
//! [`RbMap::get`]: crate::RbMap::get
//! [`RbMap::find`]: crate::RbMap::find
//! [`RbMap::count`]: crate::RbMap::count

use thiserror::Error;

/// Errors returned by fallible [`RbMap`](crate::RbMap) operations.
///
/// # Examples
///
/// ```rust
/// use rbmap::{MapError, RbMap};
///
/// let map: RbMap<i32, &str> = RbMap::new();
/// assert_eq!(map.at(&1), Err(MapError::MissingKey));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MapError {
    /// The requested key has no entry.
    #[error("key not found in map")]
    MissingKey,
    /// A cursor was used in a way its position does not allow.
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),
}

impl MapError {
    /// Returns the cursor misuse kind, if this is an invalid-operation error.
    #[must_use]
    pub const fn invalid_operation(&self) -> Option<InvalidOperation> {
        match self {
            Self::MissingKey => None,
            Self::InvalidOperation(kind) => Some(*kind),
        }
    }
}

/// The ways a [`Position`](crate::Position) can be misused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidOperation {
    /// The position was default-constructed and never bound to a map.
    #[error("cursor is not bound to any map")]
    Unbound,
    /// The position was produced by a different map instance.
    #[error("cursor belongs to a different map")]
    ForeignCursor,
    /// The entry the position referred to has been erased or cleared.
    #[error("cursor refers to an entry that no longer exists")]
    StaleCursor,
    /// The end position has no entry to read.
    #[error("cannot dereference the end position")]
    DereferenceEnd,
    /// There is nothing after the end position.
    #[error("cannot advance past the end position")]
    AdvancePastEnd,
    /// There is nothing before the first entry (or the map is empty).
    #[error("cannot retreat before the first entry")]
    RetreatPastBegin,
    /// The end position has no entry to erase.
    #[error("cannot erase the end position")]
    EraseEnd,
}

/// A broken red-black tree invariant, reported by
/// [`RbMap::check_invariants`](crate::RbMap::check_invariants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvariantViolation {
    /// The root node is red.
    #[error("root node is red")]
    RedRoot,
    /// The root node has a parent link.
    #[error("root node has a parent")]
    RootHasParent,
    /// A child does not link back to its parent.
    #[error("child node does not link back to its parent")]
    BrokenParentLink,
    /// A red node has a red child.
    #[error("red node has a red child")]
    RedRed,
    /// Two paths from the same node reach null through different numbers
    /// of black nodes.
    #[error("black height mismatch: {left} on the left, {right} on the right")]
    BlackHeight {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// An in-order neighbour is not strictly greater than its predecessor.
    #[error("keys are not strictly increasing in order")]
    Ordering,
    /// The stored entry count differs from the number of reachable nodes.
    #[error("length is {recorded} but {reachable} nodes are reachable")]
    Length {
        /// The count maintained by the map.
        recorded: usize,
        /// The number of nodes found by walking the tree.
        reachable: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_missing_key_display() {
        assert_eq!(MapError::MissingKey.to_string(), "key not found in map");
    }

    #[rstest]
    #[case(InvalidOperation::Unbound, "cursor is not bound to any map")]
    #[case(InvalidOperation::ForeignCursor, "cursor belongs to a different map")]
    #[case(InvalidOperation::DereferenceEnd, "cannot dereference the end position")]
    #[case(InvalidOperation::EraseEnd, "cannot erase the end position")]
    fn test_invalid_operation_display(#[case] kind: InvalidOperation, #[case] message: &str) {
        assert_eq!(
            MapError::from(kind).to_string(),
            format!("invalid operation: {message}")
        );
    }

    #[rstest]
    fn test_invalid_operation_accessor() {
        let error = MapError::from(InvalidOperation::StaleCursor);
        assert_eq!(error.invalid_operation(), Some(InvalidOperation::StaleCursor));
        assert_eq!(MapError::MissingKey.invalid_operation(), None);
    }

    #[rstest]
    fn test_invariant_violation_display() {
        let violation = InvariantViolation::Length {
            recorded: 3,
            reachable: 2,
        };
        assert_eq!(violation.to_string(), "length is 3 but 2 nodes are reachable");
    }
}
