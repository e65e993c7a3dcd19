//! Mutable red-black tree over an index arena.
//!
//! This module provides [`RedBlackTree`], the ordered engine behind
//! [`OrderedMap`](crate::map::OrderedMap) and
//! [`OrderedSet`](crate::set::OrderedSet).
//!
//! # Overview
//!
//! - O(log N) insert, erase, find, `lower_bound`, `upper_bound`
//! - O(1) amortized insert when given a correct position hint
//! - O(1) `len`, `is_empty`, `last` and stepping back from the end
//! - Duplicate keys are rejected: this is a *unique* associative container
//!
//! The tree stores whole values `T`; a [`KeyOf`] policy picks the key out of
//! each value and a [`Compare`] value orders keys. Keys are never compared
//! with `==`: equality is `!less(a, b) && !less(b, a)`.
//!
//! # Internal Structure
//!
//! Nodes are slots of an arena addressed by index. Parent, left and right
//! links are indices, and a reserved index plays the black sentinel leaf
//! and the past-the-end marker. The tree maintains the following
//! invariants between public operations:
//! 1. Every node is either red or black
//! 2. All leaves (NIL) are black
//! 3. Red nodes have only black children
//! 4. Every path from a node to a descendant leaf has the same number of black nodes
//! 5. The root is black
//!
//! The maximum node is cached so that `end()` can step backwards in O(1).
//!
//! # Examples
//!
//! ```rust
//! use rbcollections::compare::{Identity, Less};
//! use rbcollections::tree::RedBlackTree;
//!
//! let mut tree: RedBlackTree<i32, Identity, Less> = RedBlackTree::new();
//! for key in [13, 17, 8, 11, 15, 22, 1, 25, 6, 27] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.erase(&13), 1);
//! assert_eq!(tree.root(), Some(&15));
//! assert_eq!(tree.len(), 9);
//! assert!(tree.check_invariants().is_ok());
//! ```

mod iter;
mod node;

pub use iter::{Cursor, IntoIter, Iter, Position, Range};
pub use node::Color;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

use smallvec::SmallVec;

use crate::compare::{Compare, KeyOf, Less};
use node::{Arena, NIL, Node, NodeIndex};

/// Inline depth of the explicit stack used by deep copies. A red-black tree
/// of height 64 holds far more nodes than memory allows.
const COPY_STACK_INLINE: usize = 64;

/// Which child of a node a link goes through.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

impl Side {
    const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Where a new leaf would be attached: under `parent`, on `side`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Vacancy {
    parent: NodeIndex,
    side: Side,
}

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// An ordered, duplicate-free collection backed by a red-black tree.
///
/// `T` is the stored value, `X` the [`KeyOf`] policy that extracts the key
/// and `C` the [`Compare`] policy that orders keys.
///
/// # Time Complexity
///
/// | Operation          | Complexity        |
/// |--------------------|-------------------|
/// | `new`              | O(1)              |
/// | `insert`           | O(log N)          |
/// | `insert_with_hint` | O(1) amortized*   |
/// | `erase`            | O(log N)          |
/// | `find`             | O(log N)          |
/// | `lower_bound`      | O(log N)          |
/// | `begin`            | O(log N)          |
/// | `last`             | O(1)              |
/// | `len`              | O(1)              |
/// | `clone`            | O(N)              |
///
/// \* when the hint is correct, O(log N) otherwise.
pub struct RedBlackTree<T, X, C = Less> {
    arena: Arena<T>,
    root: NodeIndex,
    /// The in-order maximum, kept in sync by every insert and erase.
    max_node_hint: NodeIndex,
    length: usize,
    compare: C,
    extract: PhantomData<X>,
}

impl<T, X, C> RedBlackTree<T, X, C> {
    /// Creates an empty tree ordered by `compare`.
    #[must_use]
    pub const fn with_comparator(compare: C) -> Self {
        Self {
            arena: Arena::new(),
            root: NIL,
            max_node_hint: NIL,
            length: 0,
            compare,
            extract: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The largest number of elements the arena can address.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        // never reaches NIL, which stays free as the sentinel index
        let slot_size = std::mem::size_of::<node::Slot<T>>();
        isize::MAX as usize / if slot_size == 0 { 1 } else { slot_size }
    }

    /// Returns the comparator.
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        &self.compare
    }

    /// The value stored at the root, if any.
    #[must_use]
    pub fn root(&self) -> Option<&T> {
        self.arena.get(self.root).map(|node| &node.value)
    }

    /// The color of the root; `None` for an empty tree.
    #[must_use]
    pub fn root_color(&self) -> Option<Color> {
        self.arena.get(self.root).map(|node| node.color)
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Position of the smallest element, or `end()` when empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        Position::new(self.arena.minimum(self.root))
    }

    /// The past-the-end position.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::end()
    }

    /// The position after `position`. Stays at `end()` once there.
    #[must_use]
    pub fn next_position(&self, position: Position) -> Position {
        if self.arena.is_live(position.node) {
            Position::new(self.arena.successor(position.node))
        } else {
            self.end()
        }
    }

    /// The position before `position`. `prev_position(end())` is the last
    /// element; stepping back from `begin()` gives `end()`.
    #[must_use]
    pub fn prev_position(&self, position: Position) -> Position {
        if position.is_end() {
            Position::new(self.max_node_hint)
        } else if self.arena.is_live(position.node) {
            Position::new(self.arena.predecessor(position.node))
        } else {
            self.end()
        }
    }

    /// The element at `position`; `None` for `end()` or an erased slot.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        self.arena.get(position.node).map(|node| &node.value)
    }

    /// Mutable access to the element at `position`. Callers must not change
    /// the element's key.
    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.arena.get_mut(position.node).map(|node| &mut node.value)
    }

    /// The element at a position obtained from this tree and not erased
    /// since.
    pub(crate) fn live(&self, position: Position) -> &T {
        &self.arena.node(position.node).value
    }

    pub(crate) fn live_mut(&mut self, position: Position) -> &mut T {
        &mut self.arena.node_mut(position.node).value
    }

    /// The smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// The largest element, read from the cached maximum.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.arena.get(self.max_node_hint).map(|node| &node.value)
    }

    // -------------------------------------------------------------------------
    // Iteration
    // -------------------------------------------------------------------------

    /// Iterates over the elements in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(
            &self.arena,
            self.arena.minimum(self.root),
            self.max_node_hint,
            self.length,
        )
    }

    /// A cursor on the first element (or on the end when empty).
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor_at(self.begin())
    }

    /// A cursor on the end position.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        self.cursor_at(self.end())
    }

    /// A cursor on `position`. A stale position yields a cursor on the end.
    #[must_use]
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, T> {
        let node = if self.arena.is_live(position.node) {
            position.node
        } else {
            NIL
        };
        Cursor::new(&self.arena, self.root, self.max_node_hint, node)
    }

    /// Mutable references to every element in key order.
    pub(crate) fn values_in_order_mut(&mut self) -> Vec<&mut T> {
        self.arena.values_in_order_mut(self.root, self.length)
    }

    // -------------------------------------------------------------------------
    // Erasure
    // -------------------------------------------------------------------------

    /// Removes every element.
    pub fn clear(&mut self) {
        if self.length > 0 {
            log::trace!("tearing down red-black tree of {} nodes", self.length);
        }
        self.arena.clear();
        self.root = NIL;
        self.max_node_hint = NIL;
        self.length = 0;
    }

    /// Exchanges the contents of two trees in O(1). Positions follow their
    /// elements into the other tree.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Removes the element at `position` and returns the position after it.
    ///
    /// Erasing `end()` (or a stale position) does nothing and returns
    /// `end()`. Only positions naming the erased element are invalidated.
    pub fn erase_at(&mut self, position: Position) -> Position {
        self.take_at(position)
            .map_or_else(|| self.end(), |(_, next)| next)
    }

    /// Removes the element at `position`, returning it together with the
    /// position after it.
    pub fn take_at(&mut self, position: Position) -> Option<(T, Position)> {
        if !self.arena.is_live(position.node) {
            return None;
        }
        let next = self.arena.successor(position.node);
        let value = self.remove_node(position.node);
        Some((value, Position::new(next)))
    }

    /// Removes the half-open range `[first, last)` and returns `last`.
    ///
    /// A range spanning the whole tree is cleared in one step.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        if first == self.begin() && last.is_end() {
            self.clear();
            return last;
        }
        let mut current = first;
        while current != last && !current.is_end() {
            current = self.erase_at(current);
        }
        last
    }

    // -------------------------------------------------------------------------
    // Rotations
    // -------------------------------------------------------------------------

    fn child(&self, index: NodeIndex, side: Side) -> NodeIndex {
        match side {
            Side::Left => self.arena.left(index),
            Side::Right => self.arena.right(index),
        }
    }

    fn side_of(&self, parent: NodeIndex, child: NodeIndex) -> Side {
        if self.arena.left(parent) == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points `parent`'s link that held `old` at `new`; the root link when
    /// `parent` is NIL.
    fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == NIL {
            self.root = new;
        } else if self.arena.left(parent) == old {
            self.arena.node_mut(parent).left = new;
        } else {
            self.arena.node_mut(parent).right = new;
        }
    }

    /// Rotates the tree to the left around `node`.
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     =>     x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    ///
    /// No-op when `node` or its right child is NIL.
    fn rotate_left(&mut self, node: NodeIndex) {
        if node == NIL {
            return;
        }
        let pivot = self.arena.right(node);
        if pivot == NIL {
            return;
        }
        let inner = self.arena.left(pivot);
        self.arena.node_mut(node).right = inner;
        self.arena.set_parent(inner, node);
        let parent = self.arena.parent(node);
        self.arena.node_mut(pivot).parent = parent;
        self.replace_child(parent, node, pivot);
        self.arena.node_mut(pivot).left = node;
        self.arena.node_mut(node).parent = pivot;
    }

    /// Rotates the tree to the right around `node`; mirror of
    /// [`Self::rotate_left`].
    fn rotate_right(&mut self, node: NodeIndex) {
        if node == NIL {
            return;
        }
        let pivot = self.arena.left(node);
        if pivot == NIL {
            return;
        }
        let inner = self.arena.right(pivot);
        self.arena.node_mut(node).left = inner;
        self.arena.set_parent(inner, node);
        let parent = self.arena.parent(node);
        self.arena.node_mut(pivot).parent = parent;
        self.replace_child(parent, node, pivot);
        self.arena.node_mut(pivot).right = node;
        self.arena.node_mut(node).parent = pivot;
    }

    /// Rotates so that `node` moves down towards `side`.
    fn rotate(&mut self, node: NodeIndex, side: Side) {
        match side {
            Side::Left => self.rotate_left(node),
            Side::Right => self.rotate_right(node),
        }
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Links a new red leaf at `vacancy`, rebalances and returns its position.
    pub(crate) fn attach(&mut self, vacancy: Vacancy, value: T) -> Position {
        let Vacancy { parent, side } = vacancy;
        let index = self.arena.allocate(Node::new_red(value, parent));
        if parent == NIL {
            self.root = index;
        } else {
            match side {
                Side::Left => self.arena.node_mut(parent).left = index,
                Side::Right => self.arena.node_mut(parent).right = index,
            }
        }
        // Only a right child of the maximum can become the new maximum.
        if self.max_node_hint == NIL || (parent == self.max_node_hint && side == Side::Right) {
            self.max_node_hint = index;
        }
        self.insert_fixup(index);
        self.length += 1;
        Position::new(index)
    }

    /// Restores the red-black invariants after linking the red leaf `node`.
    fn insert_fixup(&mut self, mut node: NodeIndex) {
        while self.arena.color(self.arena.parent(node)) == Color::Red {
            let parent = self.arena.parent(node);
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.arena.parent(parent);
            let side = self.side_of(grandparent, parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.arena.color(uncle) == Color::Red {
                self.arena.set_color(parent, Color::Black);
                self.arena.set_color(uncle, Color::Black);
                self.arena.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                // inner grandchild: straighten the zigzag first
                node = parent;
                self.rotate(node, side);
            }
            let parent = self.arena.parent(node);
            let grandparent = self.arena.parent(parent);
            self.arena.set_color(parent, Color::Black);
            self.arena.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }
        let root = self.root;
        self.arena.set_color(root, Color::Black);
    }

    // -------------------------------------------------------------------------
    // Deletion
    // -------------------------------------------------------------------------

    /// Replaces the subtree at `old` with the subtree at `new`.
    fn transplant(&mut self, old: NodeIndex, new: NodeIndex) {
        let parent = self.arena.parent(old);
        self.replace_child(parent, old, new);
        self.arena.set_parent(new, parent);
    }

    /// Unlinks `target`, rebalances, then frees its slot.
    ///
    /// With two children the in-order successor is relinked into `target`'s
    /// place (taking over its color), so every other element keeps its slot
    /// and its positions stay valid.
    fn remove_node(&mut self, target: NodeIndex) -> T {
        if target == self.max_node_hint {
            self.max_node_hint = self.arena.predecessor(target);
        }

        let mut removed_color = self.arena.color(target);
        let replacement;
        let replacement_parent;

        if self.arena.left(target) == NIL {
            replacement = self.arena.right(target);
            replacement_parent = self.arena.parent(target);
            self.transplant(target, replacement);
        } else if self.arena.right(target) == NIL {
            replacement = self.arena.left(target);
            replacement_parent = self.arena.parent(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.arena.minimum(self.arena.right(target));
            removed_color = self.arena.color(successor);
            replacement = self.arena.right(successor);
            if self.arena.parent(successor) == target {
                replacement_parent = successor;
            } else {
                replacement_parent = self.arena.parent(successor);
                self.transplant(successor, replacement);
                let right = self.arena.right(target);
                self.arena.node_mut(successor).right = right;
                self.arena.set_parent(right, successor);
            }
            self.transplant(target, successor);
            let left = self.arena.left(target);
            self.arena.node_mut(successor).left = left;
            self.arena.set_parent(left, successor);
            let color = self.arena.color(target);
            self.arena.set_color(successor, color);
        }

        if removed_color == Color::Black {
            self.erase_fixup(replacement, replacement_parent);
        }
        self.length -= 1;
        self.arena.release(target)
    }

    /// Absorbs the extra black left on the path through `node` after a black
    /// node was unlinked. `node` may be NIL, so its parent is passed along.
    fn erase_fixup(&mut self, mut node: NodeIndex, mut parent: NodeIndex) {
        while node != self.root && self.arena.color(node) == Color::Black {
            let side = self.side_of(parent, node);
            let mut sibling = self.child(parent, side.opposite());

            if self.arena.color(sibling) == Color::Red {
                self.arena.set_color(sibling, Color::Black);
                self.arena.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, side.opposite());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if self.arena.color(near) == Color::Black && self.arena.color(far) == Color::Black {
                self.arena.set_color(sibling, Color::Red);
                node = parent;
                parent = self.arena.parent(node);
                continue;
            }

            if self.arena.color(far) == Color::Black {
                self.arena.set_color(near, Color::Black);
                self.arena.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.child(parent, side.opposite());
            }

            let parent_color = self.arena.color(parent);
            self.arena.set_color(sibling, parent_color);
            self.arena.set_color(parent, Color::Black);
            let far = self.child(sibling, side.opposite());
            self.arena.set_color(far, Color::Black);
            self.rotate(parent, side);
            node = self.root;
        }
        self.arena.set_color(node, Color::Black);
    }
}

impl<T, X, C: Default> RedBlackTree<T, X, C> {
    /// Creates an empty tree with the default comparator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::compare::{Identity, Less};
    /// use rbcollections::tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, Identity, Less> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, X, C> RedBlackTree<T, X, C>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
{
    fn key_at(&self, index: NodeIndex) -> &X::Key {
        X::key(&self.arena.node(index).value)
    }

    fn key_less(&self, left: &X::Key, right: &X::Key) -> bool {
        <C as Compare<X::Key>>::less(&self.compare, left, right)
    }

    /// Orders a borrowed lookup key against the key stored at `index`.
    fn probe<Q>(&self, index: NodeIndex, key: &Q) -> Ordering
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let stored: &Q = self.key_at(index).borrow();
        <C as Compare<Q>>::ordering(&self.compare, key, stored)
    }

    /// Finds the node holding `key`, or the vacancy where it would go.
    pub(crate) fn locate(&self, key: &X::Key) -> Result<NodeIndex, Vacancy> {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while current != NIL {
            let current_key = self.key_at(current);
            parent = current;
            if self.compare.less(key, current_key) {
                side = Side::Left;
                current = self.arena.left(current);
            } else if self.compare.less(current_key, key) {
                side = Side::Right;
                current = self.arena.right(current);
            } else {
                return Ok(current);
            }
        }
        Err(Vacancy { parent, side })
    }

    /// Inserts `value` unless an equivalent key is present.
    ///
    /// Returns the position of the element with that key and whether the
    /// insertion took place. An existing element is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::compare::{Identity, Less};
    /// use rbcollections::tree::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<i32, Identity, Less> = RedBlackTree::new();
    /// let (position, inserted) = tree.insert(7);
    /// assert!(inserted);
    /// assert_eq!(tree.insert(7), (position, false));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        match self.locate(X::key(&value)) {
            Ok(existing) => (Position::new(existing), false),
            Err(vacancy) => (self.attach(vacancy, value), true),
        }
    }

    /// Inserts `value` using `hint` as a guess for where it belongs.
    ///
    /// If the key sorts immediately before `hint` (or after the last element
    /// when `hint` is `end()`), the node is linked without a search.
    /// Otherwise this falls back to [`Self::insert`]. Either way the result
    /// is the position of the element holding the key.
    pub fn insert_with_hint(&mut self, hint: Position, value: T) -> Position {
        match self.hinted_vacancy(hint, X::key(&value)) {
            Some(vacancy) => self.attach(vacancy, value),
            None => self.insert(value).0,
        }
    }

    fn hinted_vacancy(&self, hint: Position, key: &X::Key) -> Option<Vacancy> {
        if self.length == 0 {
            return None;
        }
        if hint.is_end() {
            let last = self.max_node_hint;
            return self.compare.less(self.key_at(last), key).then_some(Vacancy {
                parent: last,
                side: Side::Right,
            });
        }
        if !self.arena.is_live(hint.node) || !self.compare.less(key, self.key_at(hint.node)) {
            return None;
        }
        let before = self.arena.predecessor(hint.node);
        if before == NIL {
            // hint is the minimum, so its left link is free
            return Some(Vacancy {
                parent: hint.node,
                side: Side::Left,
            });
        }
        if !self.compare.less(self.key_at(before), key) {
            return None;
        }
        if self.arena.right(before) == NIL {
            Some(Vacancy {
                parent: before,
                side: Side::Right,
            })
        } else {
            Some(Vacancy {
                parent: hint.node,
                side: Side::Left,
            })
        }
    }

    /// Position of the element whose key is equivalent to `key`, or `end()`.
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut current = self.root;
        while current != NIL {
            match self.probe(current, key) {
                Ordering::Less => current = self.arena.left(current),
                Ordering::Greater => current = self.arena.right(current),
                Ordering::Equal => return Position::new(current),
            }
        }
        self.end()
    }

    /// Returns `true` if an element with an equivalent key exists.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        !self.find(key).is_end()
    }

    /// Number of elements with an equivalent key: 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        usize::from(self.contains(key))
    }

    /// Position of the first element whose key is not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut candidate = NIL;
        let mut current = self.root;
        while current != NIL {
            if self.probe(current, key) == Ordering::Greater {
                current = self.arena.right(current);
            } else {
                candidate = current;
                current = self.arena.left(current);
            }
        }
        Position::new(candidate)
    }

    /// Position of the first element whose key is greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let mut candidate = NIL;
        let mut current = self.root;
        while current != NIL {
            if self.probe(current, key) == Ordering::Less {
                candidate = current;
                current = self.arena.left(current);
            } else {
                current = self.arena.right(current);
            }
        }
        Position::new(candidate)
    }

    /// `(lower_bound(key), upper_bound(key))`; spans at most one element.
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Removes the element with an equivalent key. Returns how many
    /// elements were removed (0 or 1); a missing key is not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::compare::{Identity, Less};
    /// use rbcollections::tree::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<i32, Identity, Less> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(tree.erase(&2), 1);
    /// assert_eq!(tree.erase(&2), 0);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.take(key).map_or(0, |_| 1)
    }

    /// Removes and returns the element with an equivalent key.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let position = self.find(key);
        self.take_at(position).map(|(value, _)| value)
    }

    /// Iterates over the elements whose keys fall within `bounds`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::compare::{Identity, Less};
    /// use rbcollections::tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, Identity, Less> = (1..=9).collect();
    /// let middle: Vec<i32> = tree.range(3..6).copied().collect();
    /// assert_eq!(middle, vec![3, 4, 5]);
    /// let tail: Vec<i32> = tree.range(7..).rev().copied().collect();
    /// assert_eq!(tail, vec![9, 8, 7]);
    /// ```
    pub fn range<Q, R>(&self, bounds: R) -> Range<'_, T>
    where
        X::Key: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        let front = match bounds.start_bound() {
            Bound::Included(key) => self.lower_bound(key),
            Bound::Excluded(key) => self.upper_bound(key),
            Bound::Unbounded => self.begin(),
        };
        let stop = match bounds.end_bound() {
            Bound::Included(key) => self.upper_bound(key),
            Bound::Excluded(key) => self.lower_bound(key),
            Bound::Unbounded => self.end(),
        };
        if front == stop || front.is_end() {
            return Range::empty(&self.arena);
        }
        // An inverted range puts `stop` at or before `front`.
        if !stop.is_end() && !self.key_less(self.key_at(front.node), self.key_at(stop.node)) {
            return Range::empty(&self.arena);
        }
        let back = self.prev_position(stop);
        Range::new(&self.arena, front.node, back.node)
    }

    /// Checks every structural invariant and returns the black-height of
    /// the root (leaves excluded).
    ///
    /// This walks the whole tree and is meant for tests and debugging.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if self.root == NIL {
            if self.length != 0 || self.max_node_hint != NIL {
                return Err(InvariantViolation::LengthMismatch {
                    expected: self.length,
                    counted: 0,
                });
            }
            return Ok(0);
        }
        if self.arena.parent(self.root) != NIL {
            return Err(InvariantViolation::BrokenParentLink {
                position: Position::new(self.root),
            });
        }
        if self.arena.color(self.root) == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        let black_height = self.subtree_black_height(self.root)?;

        let mut counted = 0;
        let mut previous = NIL;
        let mut current = self.arena.minimum(self.root);
        while current != NIL {
            if previous != NIL && !self.compare.less(self.key_at(previous), self.key_at(current)) {
                return Err(InvariantViolation::OutOfOrder {
                    position: Position::new(current),
                });
            }
            counted += 1;
            previous = current;
            current = self.arena.successor(current);
        }
        if counted != self.length {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.length,
                counted,
            });
        }
        if previous != self.max_node_hint {
            return Err(InvariantViolation::StaleMaximum);
        }
        Ok(black_height)
    }

    fn subtree_black_height(&self, index: NodeIndex) -> Result<usize, InvariantViolation> {
        if index == NIL {
            return Ok(0);
        }
        let node = self.arena.node(index);
        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            if self.arena.parent(child) != index {
                return Err(InvariantViolation::BrokenParentLink {
                    position: Position::new(child),
                });
            }
            if node.color == Color::Red && self.arena.color(child) == Color::Red {
                return Err(InvariantViolation::RedChildOfRed {
                    position: Position::new(child),
                });
            }
        }
        let left = self.subtree_black_height(node.left)?;
        let right = self.subtree_black_height(node.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                position: Position::new(index),
                left,
                right,
            });
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

// =============================================================================
// Invariant Violations
// =============================================================================

/// A broken red-black or search-tree rule, reported by
/// [`RedBlackTree::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot,
    /// A red node has a red child at `position`.
    RedChildOfRed {
        /// The red child.
        position: Position,
    },
    /// The two subtrees of a node have different black-heights.
    BlackHeightMismatch {
        /// The unbalanced node.
        position: Position,
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
    /// In-order traversal is not strictly increasing at `position`.
    OutOfOrder {
        /// The first element not greater than its predecessor.
        position: Position,
    },
    /// A child's parent link does not point back at its parent.
    BrokenParentLink {
        /// The node with the wrong parent link.
        position: Position,
    },
    /// The cached maximum is not the last element.
    StaleMaximum,
    /// The stored length differs from the number of reachable nodes.
    LengthMismatch {
        /// The stored length.
        expected: usize,
        /// The number of nodes reached by traversal.
        counted: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root is red"),
            Self::RedChildOfRed { position } => {
                write!(formatter, "red node has red child at {position:?}")
            }
            Self::BlackHeightMismatch {
                position,
                left,
                right,
            } => write!(
                formatter,
                "black-height mismatch at {position:?}: left {left}, right {right}"
            ),
            Self::OutOfOrder { position } => {
                write!(formatter, "keys out of order at {position:?}")
            }
            Self::BrokenParentLink { position } => {
                write!(formatter, "broken parent link at {position:?}")
            }
            Self::StaleMaximum => write!(formatter, "cached maximum is stale"),
            Self::LengthMismatch { expected, counted } => write!(
                formatter,
                "length is {expected} but {counted} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, X, C: Default> Default for RedBlackTree<T, X, C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy: rebuilds an isomorphic tree (same shape and colors) in a
/// fresh, compact arena using an explicit pre-order stack.
impl<T: Clone, X, C: Clone> Clone for RedBlackTree<T, X, C> {
    fn clone(&self) -> Self {
        let mut arena = Arena::with_capacity(self.length);
        let mut root = NIL;
        let mut max_node_hint = NIL;
        let mut pending: SmallVec<[(NodeIndex, NodeIndex, Side); COPY_STACK_INLINE]> =
            SmallVec::new();
        if self.root != NIL {
            pending.push((self.root, NIL, Side::Left));
        }

        while let Some((source, parent, side)) = pending.pop() {
            let node = self.arena.node(source);
            let index = arena.allocate(Node {
                value: node.value.clone(),
                color: node.color,
                parent,
                left: NIL,
                right: NIL,
            });
            if parent == NIL {
                root = index;
            } else {
                match side {
                    Side::Left => arena.node_mut(parent).left = index,
                    Side::Right => arena.node_mut(parent).right = index,
                }
            }
            if source == self.max_node_hint {
                max_node_hint = index;
            }
            if node.right != NIL {
                pending.push((node.right, index, Side::Right));
            }
            if node.left != NIL {
                pending.push((node.left, index, Side::Left));
            }
        }

        Self {
            arena,
            root,
            max_node_hint,
            length: self.length,
            compare: self.compare.clone(),
            extract: PhantomData,
        }
    }
}

impl<T, X, C> Extend<T> for RedBlackTree<T, X, C>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, X, C> FromIterator<T> for RedBlackTree<T, X, C>
where
    X: KeyOf<T>,
    C: Compare<X::Key> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, X, C> IntoIterator for RedBlackTree<T, X, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.arena.into_values_in_order(self.root, self.length))
    }
}

impl<'a, T, X, C> IntoIterator for &'a RedBlackTree<T, X, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Element-wise equality in key order.
impl<T: PartialEq, X, C> PartialEq for RedBlackTree<T, X, C> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq, X, C> Eq for RedBlackTree<T, X, C> {}

/// Lexicographic comparison of the elements in key order.
impl<T: PartialOrd, X, C> PartialOrd for RedBlackTree<T, X, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, X, C> Ord for RedBlackTree<T, X, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, X, C> Hash for RedBlackTree<T, X, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, X, C> fmt::Debug for RedBlackTree<T, X, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
