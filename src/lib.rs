//! # rbmap
//!
//! An ordered map with unique keys, implemented as a red-black tree.
//!
//! ## Overview
//!
//! - **[`RbMap`]**: insert, lookup and erase in O(log N), in-order traversal
//!   from both ends
//! - **Positions and cursors**: [`Position`] is a detached place in the key
//!   order; [`Cursor`] binds one to a map. Misuse (stepping past either end,
//!   dereferencing the end, using a position of another map or of an erased
//!   entry) is reported as [`InvalidOperation`] instead of being undefined
//! - **Comparators**: any [`Compare`] implementation, including plain
//!   closures, orders the keys; [`NaturalOrder`] is the default
//! - **Deep copies**: [`Clone`] produces an independent map with the same
//!   shape
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`RbMap`] as a map in key order
//!
//! ## Logging
//!
//! Structural operations emit [`tracing`](https://docs.rs/tracing) events:
//! `trace` for insertions and removals, `debug` for clearing and cloning.
//! No subscriber is installed by this crate.
//!
//! ## Example
//!
//! ```rust
//! use rbmap::prelude::*;
//!
//! let mut map = RbMap::new();
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! assert_eq!(map.at(&1), Ok(&"one"));
//! assert_eq!(map.at(&3), Err(MapError::MissingKey));
//! assert_eq!(format!("{map}"), "{1: one, 2: two}");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use rbmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Compare, NaturalOrder, ReverseOrder};
    pub use crate::error::{InvalidOperation, MapError};
    pub use crate::map::{Cursor, Position, RbMap};
}

pub mod compare;
pub mod error;
mod map;
mod tree;

pub use compare::{Compare, NaturalOrder, ReverseOrder};
pub use error::{InvalidOperation, InvariantViolation, MapError};
pub use map::{Cursor, Position, RbMap, RbMapIntoIterator, RbMapIterMut, RbMapIterator};
