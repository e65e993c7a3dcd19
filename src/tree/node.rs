//! Arena records for the red-black tree.
//!
//! Nodes live in a `Vec` of slots and link to each other by index. The
//! reserved index [`NIL`] stands for every leaf and for "past the end", so
//! no sentinel object exists and rotations stay O(1) index rewrites.
//! Freed slots are chained into a free list and handed out again by the
//! next insertion.

/// Index of a node inside the tree's arena.
pub(crate) type NodeIndex = usize;

/// The shared black leaf and end marker. Never a valid slot index.
pub(crate) const NIL: NodeIndex = usize::MAX;

/// The color of a red-black node. Leaves are always black.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// A red node; never has a red child.
    Red,
    /// A black node; counted by black-height.
    Black,
}

/// Internal node structure for the Red-Black Tree.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) color: Color,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
}

impl<T> Node<T> {
    /// Creates a new red leaf hanging under `parent`.
    pub(crate) const fn new_red(value: T, parent: NodeIndex) -> Self {
        Self {
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        }
    }
}

/// One arena cell: either a live node or a link in the free list.
#[derive(Clone, Debug)]
pub(crate) enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: NodeIndex },
}

impl<T> Slot<T> {
    pub(crate) const fn as_node(&self) -> Option<&Node<T>> {
        match self {
            Self::Occupied(node) => Some(node),
            Self::Vacant { .. } => None,
        }
    }
}

/// Node storage plus the link-only navigation shared by the tree and its
/// iterators.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: NodeIndex,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NIL,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NIL,
        }
    }

    /// Stores `node` in a recycled slot if one is free, otherwise at the end.
    pub(crate) fn allocate(&mut self, node: Node<T>) -> NodeIndex {
        if self.free_head == NIL {
            self.slots.push(Slot::Occupied(node));
            return self.slots.len() - 1;
        }
        let index = self.free_head;
        self.free_head = match self.slots[index] {
            Slot::Vacant { next_free } => next_free,
            Slot::Occupied(_) => unreachable!("free list points at a live node"),
        };
        self.slots[index] = Slot::Occupied(node);
        index
    }

    /// Frees the slot at `index` and returns its payload.
    pub(crate) fn release(&mut self, index: NodeIndex) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.slots[index], vacant) {
            Slot::Occupied(node) => {
                self.free_head = index;
                node.value
            }
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = NIL;
    }

    pub(crate) fn is_live(&self, index: NodeIndex) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.as_node().is_some())
    }

    pub(crate) fn get(&self, index: NodeIndex) -> Option<&Node<T>> {
        self.slots.get(index).and_then(Slot::as_node)
    }

    pub(crate) fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node<T>> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// The live node at `index`. Links inside a consistent tree always
    /// point at live nodes, so anything else is a corrupted tree.
    pub(crate) fn node(&self, index: NodeIndex) -> &Node<T> {
        match &self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to a vacant arena slot"),
        }
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node<T> {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to a vacant arena slot"),
        }
    }

    pub(crate) fn color(&self, index: NodeIndex) -> Color {
        if index == NIL {
            Color::Black
        } else {
            self.node(index).color
        }
    }

    pub(crate) fn set_color(&mut self, index: NodeIndex, color: Color) {
        if index != NIL {
            self.node_mut(index).color = color;
        }
    }

    pub(crate) fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).parent
    }

    pub(crate) fn set_parent(&mut self, index: NodeIndex, parent: NodeIndex) {
        if index != NIL {
            self.node_mut(index).parent = parent;
        }
    }

    pub(crate) fn left(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).left
    }

    pub(crate) fn right(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).right
    }

    /// Leftmost node of the subtree rooted at `index`.
    pub(crate) fn minimum(&self, mut index: NodeIndex) -> NodeIndex {
        if index == NIL {
            return NIL;
        }
        while self.left(index) != NIL {
            index = self.left(index);
        }
        index
    }

    /// Rightmost node of the subtree rooted at `index`.
    pub(crate) fn maximum(&self, mut index: NodeIndex) -> NodeIndex {
        if index == NIL {
            return NIL;
        }
        while self.right(index) != NIL {
            index = self.right(index);
        }
        index
    }

    /// In-order successor; [`NIL`] after the maximum.
    pub(crate) fn successor(&self, mut index: NodeIndex) -> NodeIndex {
        if index == NIL {
            return NIL;
        }
        if self.right(index) != NIL {
            return self.minimum(self.right(index));
        }
        let mut parent = self.parent(index);
        while parent != NIL && index == self.right(parent) {
            index = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// In-order predecessor; [`NIL`] before the minimum.
    ///
    /// Stepping back from the end marker needs the maximum, which only the
    /// tree knows; callers handle that case before getting here.
    pub(crate) fn predecessor(&self, mut index: NodeIndex) -> NodeIndex {
        if index == NIL {
            return NIL;
        }
        if self.left(index) != NIL {
            return self.maximum(self.left(index));
        }
        let mut parent = self.parent(index);
        while parent != NIL && index == self.left(parent) {
            index = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Slot indices of the subtree rooted at `root`, in key order.
    pub(crate) fn in_order(&self, root: NodeIndex, length: usize) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(length);
        let mut current = self.minimum(root);
        while current != NIL {
            order.push(current);
            current = self.successor(current);
        }
        order
    }

    /// Mutable references to every payload, in key order.
    pub(crate) fn values_in_order_mut(&mut self, root: NodeIndex, length: usize) -> Vec<&mut T> {
        let order = self.in_order(root, length);
        let mut values: Vec<Option<&mut T>> = self
            .slots
            .iter_mut()
            .map(|slot| match slot {
                Slot::Occupied(node) => Some(&mut node.value),
                Slot::Vacant { .. } => None,
            })
            .collect();
        order
            .into_iter()
            .filter_map(|index| values[index].take())
            .collect()
    }

    /// Consumes the arena, returning every payload in key order.
    pub(crate) fn into_values_in_order(self, root: NodeIndex, length: usize) -> Vec<T> {
        let order = self.in_order(root, length);
        let mut values: Vec<Option<T>> = self
            .slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Occupied(node) => Some(node.value),
                Slot::Vacant { .. } => None,
            })
            .collect();
        order
            .into_iter()
            .filter_map(|index| values[index].take())
            .collect()
    }
}
