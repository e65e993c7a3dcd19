//! Ordered set of unique elements.
//!
//! [`OrderedSet`] is the [`RedBlackTree`] with the identity key policy: each
//! element is its own key. On top of the tree's positional API it offers the
//! sorted-merge set algebra ([`union`](OrderedSet::union),
//! [`intersection`](OrderedSet::intersection),
//! [`difference`](OrderedSet::difference),
//! [`symmetric_difference`](OrderedSet::symmetric_difference)) as lazy
//! iterators.
//!
//! # Examples
//!
//! ```rust
//! use rbcollections::set::OrderedSet;
//!
//! let mut set: OrderedSet<i32> = [1, 2, 3, 4, 5].into_iter().collect();
//! let second = set.next_position(set.begin());
//! set.erase_range(second, set.end());
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FusedIterator, Peekable};
use std::ops::RangeBounds;

use crate::compare::{Compare, Identity, Less};
use crate::tree::{Cursor, IntoIter, InvariantViolation, Iter, Position, Range, RedBlackTree};

/// A sorted set of unique elements, backed by a red-black tree.
///
/// # Time Complexity
///
/// | Operation      | Complexity   |
/// |----------------|--------------|
/// | `insert`       | O(log N)     |
/// | `contains`     | O(log N)     |
/// | `remove`       | O(log N)     |
/// | `union` etc.   | O(N + M)     |
/// | `len`          | O(1)         |
pub struct OrderedSet<T, C = Less> {
    tree: RedBlackTree<T, Identity, C>,
}

impl<T> OrderedSet<T> {
    /// Creates an empty set ordered by [`Less`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Less)
    }
}

impl<T, C> OrderedSet<T, C> {
    /// Creates an empty set ordered by `compare`.
    #[must_use]
    pub const fn with_comparator(compare: C) -> Self {
        Self {
            tree: RedBlackTree::with_comparator(compare),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The largest number of elements the set can hold.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Returns the comparator.
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        self.tree.key_comp()
    }

    /// Returns the comparator; elements are their own keys, so this is
    /// [`OrderedSet::key_comp`].
    #[must_use]
    pub const fn value_comp(&self) -> &C {
        self.tree.key_comp()
    }

    /// Position of the smallest element, or `end()` when empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// The past-the-end position.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.tree.end()
    }

    /// The position after `position`.
    #[must_use]
    pub fn next_position(&self, position: Position) -> Position {
        self.tree.next_position(position)
    }

    /// The position before `position`.
    #[must_use]
    pub fn prev_position(&self, position: Position) -> Position {
        self.tree.prev_position(position)
    }

    /// The element at `position`.
    #[must_use]
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.tree.get(position)
    }

    /// A cursor on the first element.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.tree.cursor_front()
    }

    /// A cursor on the end position.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        self.tree.cursor_end()
    }

    /// A cursor on `position`.
    #[must_use]
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, T> {
        self.tree.cursor_at(position)
    }

    /// The smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// The largest element, in O(1).
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Iterates over the elements in order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Removes the element at `position`, returning the position after it.
    pub fn erase_at(&mut self, position: Position) -> Position {
        self.tree.erase_at(position)
    }

    /// Removes `[first, last)` and returns `last`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.tree.erase_range(first, last)
    }
}

impl<T, C> OrderedSet<T, C>
where
    C: Compare<T>,
{
    /// Adds `value` unless an equivalent element is present.
    ///
    /// Returns the position of the element and whether it was inserted.
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        self.tree.insert(value)
    }

    /// Adds `value` using `hint` as a guess of where it belongs.
    pub fn insert_with_hint(&mut self, hint: Position, value: T) -> Position {
        self.tree.insert_with_hint(hint, value)
    }

    /// Returns `true` if an equivalent element is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(value)
    }

    /// Returns the stored element equivalent to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(value))
    }

    /// Position of the element equivalent to `value`, or `end()`.
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(value)
    }

    /// 0 or 1.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count(value)
    }

    /// Position of the first element not less than `value`.
    pub fn lower_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.lower_bound(value)
    }

    /// Position of the first element greater than `value`.
    pub fn upper_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.upper_bound(value)
    }

    /// `(lower_bound(value), upper_bound(value))`.
    pub fn equal_range<Q>(&self, value: &Q) -> (Position, Position)
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.equal_range(value)
    }

    /// Iterates over the elements within `bounds`.
    pub fn range<Q, R>(&self, bounds: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        self.tree.range(bounds)
    }

    /// Removes the element equivalent to `value`; returns 0 or 1.
    pub fn erase<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase(value)
    }

    /// Removes the element equivalent to `value`; returns whether it was
    /// present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase(value) == 1
    }

    /// Removes and returns the element equivalent to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.take(value)
    }

    /// Elements in `self` or `other`, in order, each once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::set::OrderedSet;
    ///
    /// let left: OrderedSet<i32> = [1, 3, 5].into_iter().collect();
    /// let right: OrderedSet<i32> = [2, 3, 4].into_iter().collect();
    /// let union: Vec<i32> = left.union(&right).copied().collect();
    /// assert_eq!(union, vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, T, C> {
        Union {
            merge: MergeIter::new(self, other),
        }
    }

    /// Elements in both `self` and `other`.
    pub fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, T, C> {
        Intersection {
            merge: MergeIter::new(self, other),
        }
    }

    /// Elements in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, T, C> {
        Difference {
            merge: MergeIter::new(self, other),
        }
    }

    /// Elements in exactly one of `self` and `other`.
    pub fn symmetric_difference<'a>(&'a self, other: &'a Self) -> SymmetricDifference<'a, T, C> {
        SymmetricDifference {
            merge: MergeIter::new(self, other),
        }
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.difference(other).next().is_none()
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the sets share no element.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }

    /// Checks the red-black invariants of the backing tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.tree.check_invariants()
    }
}

// =============================================================================
// Set Algebra
// =============================================================================

/// Walks two sorted sets in lockstep, pairing up equivalent elements.
struct MergeIter<'a, T, C> {
    left: Peekable<Iter<'a, T>>,
    right: Peekable<Iter<'a, T>>,
    compare: &'a C,
}

impl<'a, T, C: Compare<T>> MergeIter<'a, T, C> {
    fn new(left: &'a OrderedSet<T, C>, right: &'a OrderedSet<T, C>) -> Self {
        Self {
            left: left.iter().peekable(),
            right: right.iter().peekable(),
            compare: left.key_comp(),
        }
    }

    /// The next element from either side; both sides when equivalent.
    fn next_pair(&mut self) -> Option<(Option<&'a T>, Option<&'a T>)> {
        let order = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(left), Some(right)) => self.compare.ordering(*left, *right),
        };
        Some(match order {
            Ordering::Less => (self.left.next(), None),
            Ordering::Greater => (None, self.right.next()),
            Ordering::Equal => (self.left.next(), self.right.next()),
        })
    }
}

impl<T, C> Clone for MergeIter<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            compare: self.compare,
        }
    }
}

/// Lazy union of two [`OrderedSet`]s.
pub struct Union<'a, T, C> {
    merge: MergeIter<'a, T, C>,
}

impl<'a, T, C: Compare<T>> Iterator for Union<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (left, right) = self.merge.next_pair()?;
        left.or(right)
    }
}

impl<T, C: Compare<T>> FusedIterator for Union<'_, T, C> {}

/// Lazy intersection of two [`OrderedSet`]s.
pub struct Intersection<'a, T, C> {
    merge: MergeIter<'a, T, C>,
}

impl<'a, T, C: Compare<T>> Iterator for Intersection<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let (Some(left), Some(_)) = self.merge.next_pair()? {
                return Some(left);
            }
        }
    }
}

impl<T, C: Compare<T>> FusedIterator for Intersection<'_, T, C> {}

/// Lazy difference of two [`OrderedSet`]s.
pub struct Difference<'a, T, C> {
    merge: MergeIter<'a, T, C>,
}

impl<'a, T, C: Compare<T>> Iterator for Difference<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let (Some(left), None) = self.merge.next_pair()? {
                return Some(left);
            }
        }
    }
}

impl<T, C: Compare<T>> FusedIterator for Difference<'_, T, C> {}

/// Lazy symmetric difference of two [`OrderedSet`]s.
pub struct SymmetricDifference<'a, T, C> {
    merge: MergeIter<'a, T, C>,
}

impl<'a, T, C: Compare<T>> Iterator for SymmetricDifference<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.merge.next_pair()? {
                (Some(only), None) | (None, Some(only)) => return Some(only),
                _ => {}
            }
        }
    }
}

impl<T, C: Compare<T>> FusedIterator for SymmetricDifference<'_, T, C> {}

impl<T, C> Clone for Union<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            merge: self.merge.clone(),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for OrderedSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for OrderedSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T, C> FromIterator<T> for OrderedSet<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<T, C> Extend<T> for OrderedSet<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<T, C> IntoIterator for OrderedSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, C> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for OrderedSet<T, C> {}

impl<T: PartialOrd, C> PartialOrd for OrderedSet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord, C> Ord for OrderedSet<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<T: Hash, C> Hash for OrderedSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(OrderedSet<String>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for OrderedSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedSetVisitor<T, C> {
    element_marker: std::marker::PhantomData<T>,
    compare_marker: std::marker::PhantomData<C>,
}

#[cfg(feature = "serde")]
impl<T, C> OrderedSetVisitor<T, C> {
    const fn new() -> Self {
        Self {
            element_marker: std::marker::PhantomData,
            compare_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for OrderedSetVisitor<T, C>
where
    T: serde::Deserialize<'de>,
    C: Compare<T> + Default,
{
    type Value = OrderedSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = OrderedSet::with_comparator(C::default());
        while let Some(element) = seq.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for OrderedSet<T, C>
where
    T: serde::Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
