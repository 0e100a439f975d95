//! The red-black tree underneath [`RbMap`](crate::RbMap).
//!
//! [`Tree`] owns the node arena and implements search, rotations, the
//! insertion and deletion fixups, subtree cloning and teardown. The
//! traversal half (minimum, maximum, successor, predecessor) lives in
//! `traversal` as a second `impl` block over the same type.

mod node;
mod rbtree;
mod traversal;

pub(crate) use self::node::{NodeHandle, NodeId};
pub(crate) use self::rbtree::Tree;
