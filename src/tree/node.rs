//! Nodes and the arena that owns them.
//!
//! Every node of a tree lives in one [`Arena`]. Structural links are arena
//! indices, so the parent link is a plain back reference that never takes
//! part in ownership. Each slot carries a generation that is bumped when
//! its node is released, which lets detached handles notice that the node
//! they name is gone.

// =============================================================================
// Color and Side
// =============================================================================

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A child side. Mirror-image cases of the balancing algorithms are
/// written once and instantiated for both sides.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a slot in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    const fn index(self) -> usize {
        self.0
    }
}

/// A node identity that stays checkable after the node is released.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeHandle {
    id: NodeId,
    generation: u32,
}

// =============================================================================
// Node
// =============================================================================

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Creates a detached node with the given color.
    pub(crate) const fn new(key: K, value: V, color: Color) -> Self {
        Self {
            key,
            value,
            color,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

// =============================================================================
// Arena
// =============================================================================

struct Slot<K, V> {
    generation: u32,
    node: Option<Node<K, V>>,
}

/// Slot storage with a free list. Vacant slots are reused before the
/// backing vector grows.
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `node` and returns its index.
    pub(crate) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()].node = Some(node);
            id
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId(self.slots.len() - 1)
        }
    }

    /// Removes the node at `id`, invalidating every handle to it.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K, V> {
        let slot = &mut self.slots[id.index()];
        let Some(node) = slot.node.take() else {
            unreachable!("released a vacant slot {}", id.index())
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id);
        node
    }

    /// Number of slots, occupied or vacant.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id.index()].node {
            Some(node) => node,
            None => unreachable!("vacant slot {} is linked into the tree", id.index()),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id.index()].node {
            Some(node) => node,
            None => unreachable!("vacant slot {} is linked into the tree", id.index()),
        }
    }

    /// Returns a generation-tagged handle for a live node.
    pub(crate) fn handle(&self, id: NodeId) -> NodeHandle {
        NodeHandle {
            id,
            generation: self.slots[id.index()].generation,
        }
    }

    /// Maps a handle back to its node, or `None` if the node was released.
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Option<NodeId> {
        self.slots
            .get(handle.id.index())
            .filter(|slot| slot.generation == handle.generation && slot.node.is_some())
            .map(|_| handle.id)
    }

    /// Splits out mutable access to the listed nodes, in the listed order.
    ///
    /// Every id in `order` must be live and appear at most once.
    pub(crate) fn entries_mut(&mut self, order: &[NodeId]) -> Vec<(&K, &mut V)> {
        let mut nodes: Vec<Option<&mut Node<K, V>>> =
            self.slots.iter_mut().map(|slot| slot.node.as_mut()).collect();
        order
            .iter()
            .map(|id| match nodes[id.index()].take() {
                Some(node) => (&node.key, &mut node.value),
                None => unreachable!("node {} listed twice or vacant", id.index()),
            })
            .collect()
    }
}
