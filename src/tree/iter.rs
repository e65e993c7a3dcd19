//! Positions, cursors and iterators over a [`RedBlackTree`].
//!
//! All traversal is stackless: each step follows parent/child links through
//! the in-order successor or predecessor. Stepping back from the end uses
//! the maximum the tree keeps cached, so `prev(end())` is O(1).
//!
//! [`RedBlackTree`]: super::RedBlackTree

use std::iter::FusedIterator;

use super::node::{Arena, NIL, NodeIndex};

/// A handle to one element of a tree, or to the past-the-end position.
///
/// A `Position` is `Copy` and holds no borrow, so it can be handed back to
/// mutating calls such as `erase_at` or `insert_with_hint`. Two positions
/// are equal iff they name the same node.
///
/// Erasing an element invalidates positions naming that element and no
/// others. Using an invalidated position is a logic error: it never causes
/// memory unsafety, but it may resolve to `None` or to an unrelated element
/// that later reused the slot. Positions are only meaningful for the tree
/// that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub(crate) node: NodeIndex,
}

impl Position {
    pub(crate) const fn new(node: NodeIndex) -> Self {
        Self { node }
    }

    /// The past-the-end position shared by every tree.
    #[must_use]
    pub const fn end() -> Self {
        Self { node: NIL }
    }

    /// Returns `true` if this is the past-the-end position.
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.node == NIL
    }
}

/// A read-only bidirectional cursor over a tree.
///
/// The cursor sits either on an element or on the "ghost" end position
/// between the maximum and the minimum. Moving forward from the end wraps
/// to the first element, and moving backward from the end lands on the
/// last one.
///
/// # Examples
///
/// ```rust
/// use rbcollections::set::OrderedSet;
///
/// let set: OrderedSet<i32> = [10, 20, 30].into_iter().collect();
/// let mut cursor = set.cursor_end();
/// cursor.move_prev();
/// assert_eq!(cursor.current(), Some(&30));
/// cursor.move_prev();
/// assert_eq!(cursor.current(), Some(&20));
/// cursor.move_next();
/// cursor.move_next();
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, T> {
    arena: &'a Arena<T>,
    root: NodeIndex,
    last: NodeIndex,
    node: NodeIndex,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) const fn new(
        arena: &'a Arena<T>,
        root: NodeIndex,
        last: NodeIndex,
        node: NodeIndex,
    ) -> Self {
        Self {
            arena,
            root,
            last,
            node,
        }
    }

    /// The element under the cursor, or `None` at the end position.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.arena.get(self.node).map(|node| &node.value)
    }

    /// The position the cursor is on.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.node)
    }

    /// Returns `true` if the cursor is on the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node == NIL
    }

    /// Moves to the in-order successor.
    pub fn move_next(&mut self) {
        self.node = if self.node == NIL {
            self.arena.minimum(self.root)
        } else {
            self.arena.successor(self.node)
        };
    }

    /// Moves to the in-order predecessor.
    pub fn move_prev(&mut self) {
        self.node = if self.node == NIL {
            self.last
        } else {
            self.arena.predecessor(self.node)
        };
    }

    /// The element after the cursor, without moving.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut probe = self.clone();
        probe.move_next();
        probe.current()
    }

    /// The element before the cursor, without moving.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut probe = self.clone();
        probe.move_prev();
        probe.current()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.node == other.node
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_tuple("Cursor")
            .field(&self.current())
            .finish()
    }
}

/// An iterator over the elements of a tree, in key order.
///
/// Created by `iter()`. Iterating with `.rev()` walks from the maximum down.
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    front: NodeIndex,
    back: NodeIndex,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) const fn new(
        arena: &'a Arena<T>,
        front: NodeIndex,
        back: NodeIndex,
        remaining: usize,
    ) -> Self {
        Self {
            arena,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.front);
        self.remaining -= 1;
        self.front = self.arena.successor(self.front);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.back);
        self.remaining -= 1;
        self.back = self.arena.predecessor(self.back);
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// An iterator over a contiguous key range of a tree.
///
/// Created by `range()`.
pub struct Range<'a, T> {
    arena: &'a Arena<T>,
    front: NodeIndex,
    back: NodeIndex,
    exhausted: bool,
}

impl<'a, T> Range<'a, T> {
    pub(crate) const fn new(arena: &'a Arena<T>, front: NodeIndex, back: NodeIndex) -> Self {
        Self {
            arena,
            front,
            back,
            exhausted: front == NIL || back == NIL,
        }
    }

    pub(crate) const fn empty(arena: &'a Arena<T>) -> Self {
        Self::new(arena, NIL, NIL)
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let node = self.arena.node(self.front);
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.front = self.arena.successor(self.front);
        }
        Some(&node.value)
    }
}

impl<T> DoubleEndedIterator for Range<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let node = self.arena.node(self.back);
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.back = self.arena.predecessor(self.back);
        }
        Some(&node.value)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

/// An owning iterator over the elements of a tree, in key order.
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.values.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RedBlackTree;
    use crate::compare::{Identity, Less};
    use rstest::rstest;

    type IntTree = RedBlackTree<i32, Identity, Less>;

    fn tree_of(values: &[i32]) -> IntTree {
        values.iter().copied().collect()
    }

    #[rstest]
    fn test_iter_is_sorted_and_exact() {
        let tree = tree_of(&[5, 3, 8, 1, 4]);
        let iter = tree.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
    }

    #[rstest]
    fn test_iter_rev_matches_forward_reversed() {
        let tree = tree_of(&[13, 17, 8, 11, 15, 22, 1, 25, 6, 27]);
        let mut forward: Vec<i32> = tree.iter().copied().collect();
        forward.reverse();
        let backward: Vec<i32> = tree.iter().rev().copied().collect();
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn test_iter_meets_in_the_middle() {
        let tree = tree_of(&[1, 2, 3, 4]);
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_cursor_wraps_through_end() {
        let tree = tree_of(&[1, 2]);
        let mut cursor = tree.cursor_end();
        assert!(cursor.is_end());
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&1));
        assert_eq!(cursor.peek_prev(), None);
        assert_eq!(cursor.peek_next(), Some(&2));
        cursor.move_prev();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&2));
    }

    #[rstest]
    fn test_cursor_equality_is_node_identity() {
        let tree = tree_of(&[1, 2, 3]);
        let mut first = tree.cursor_front();
        let second = tree.cursor_at(tree.find(&2));
        assert_ne!(first, second);
        first.move_next();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_position_end() {
        assert!(Position::end().is_end());
        let tree = tree_of(&[]);
        assert_eq!(tree.begin(), Position::end());
    }

    #[rstest]
    fn test_into_iter_owned_sorted() {
        let tree = tree_of(&[3, 1, 2]);
        let owned: Vec<i32> = tree.into_iter().rev().collect();
        assert_eq!(owned, vec![3, 2, 1]);
    }
}
