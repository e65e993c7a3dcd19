//! Ordered associative map.
//!
//! This module provides [`OrderedMap`], a sorted key-value map with unique
//! keys built on the mutable [`RedBlackTree`].
//!
//! # Overview
//!
//! `OrderedMap` stores `(K, V)` pairs ordered by key. Unlike
//! [`BTreeMap`](std::collections::BTreeMap) it exposes the tree's positional
//! API: stable [`Position`] handles, O(1) hinted insertion and erase-by-position
//! returning the successor.
//!
//! - O(log N) `get`, `insert`, `remove`, bound queries
//! - O(1) `len`, `last_key_value`
//! - Inserting an existing key leaves the stored pair untouched
//!
//! # Examples
//!
//! ```rust
//! use rbcollections::map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert('a', 1);
//! map.insert('b', 2);
//! map.insert('c', 3);
//!
//! assert_eq!(map[&'b'], 2);
//! assert_eq!(map.len(), 3);
//!
//! *map.get_or_insert_default('d') += 4;
//! assert_eq!(map.get(&'d'), Some(&4));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Index, RangeBounds};

use crate::compare::{Compare, First, Less, ValueCompare};
use crate::error::OutOfRangeError;
use crate::tree::{self, Cursor, InvariantViolation, Position, RedBlackTree, Vacancy};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// A sorted map with unique keys, backed by a red-black tree.
///
/// `C` orders keys; it defaults to [`Less`] (ascending `Ord`). Any
/// `Fn(&K, &K) -> bool` strict weak ordering works too, passed through
/// [`OrderedMap::with_comparator`].
///
/// # Time Complexity
///
/// | Operation          | Complexity      |
/// |--------------------|-----------------|
/// | `new`              | O(1)            |
/// | `get`              | O(log N)        |
/// | `insert`           | O(log N)        |
/// | `insert_with_hint` | O(1) amortized* |
/// | `remove`           | O(log N)        |
/// | `erase_at`         | O(log N)        |
/// | `len`              | O(1)            |
/// | `iter`             | O(1) + O(N)     |
///
/// \* when the hint is correct.
///
/// # Examples
///
/// ```rust
/// use rbcollections::map::OrderedMap;
///
/// let map: OrderedMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")]
///     .into_iter()
///     .collect();
/// let keys: Vec<i32> = map.keys().copied().collect();
/// assert_eq!(keys, vec![1, 2, 3]);
/// assert_eq!(format!("{map}"), "{1: one, 2: two, 3: three}");
/// ```
pub struct OrderedMap<K, V, C = Less> {
    tree: RedBlackTree<(K, V), First, C>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map ordered by [`Less`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Less)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::compare::Greater;
    /// use rbcollections::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::with_comparator(Greater);
    /// map.insert(1, "low");
    /// map.insert(9, "high");
    /// assert_eq!(map.first_key_value(), Some((&9, &"high")));
    /// ```
    #[must_use]
    pub const fn with_comparator(compare: C) -> Self {
        Self {
            tree: RedBlackTree::with_comparator(compare),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The largest number of entries the map can hold.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Returns the key comparator.
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        self.tree.key_comp()
    }

    /// Returns the comparator lifted to `(key, value)` pairs; it compares
    /// first components only.
    #[must_use]
    pub fn value_comp(&self) -> ValueCompare<C, First>
    where
        C: Clone,
    {
        ValueCompare::new(self.tree.key_comp().clone())
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Position of the smallest key, or `end()` when empty.
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

    /// The position before `position`; `prev_position(end())` is the last
    /// entry.
    #[must_use]
    pub fn prev_position(&self, position: Position) -> Position {
        self.tree.prev_position(position)
    }

    /// The entry at `position`.
    #[must_use]
    pub fn get_at(&self, position: Position) -> Option<(&K, &V)> {
        self.tree.get(position).map(|(key, value)| (key, value))
    }

    /// The value at `position`, mutably.
    pub fn get_at_mut(&mut self, position: Position) -> Option<&mut V> {
        self.tree.get_mut(position).map(|(_, value)| value)
    }

    /// A cursor on the first entry.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, (K, V)> {
        self.tree.cursor_front()
    }

    /// A cursor on the end position.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, (K, V)> {
        self.tree.cursor_end()
    }

    /// A cursor on `position`.
    #[must_use]
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, (K, V)> {
        self.tree.cursor_at(position)
    }

    /// The entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(key, value)| (key, value))
    }

    /// The entry with the largest key, in O(1).
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(key, value)| (key, value))
    }

    // -------------------------------------------------------------------------
    // Iteration
    // -------------------------------------------------------------------------

    /// Iterates over entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Iterates over entries in key order with mutable values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::map::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// for (_, value) in map.iter_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 20]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.tree.values_in_order_mut().into_iter(),
        }
    }

    /// Iterates over keys in order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over values in key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Iterates over mutable values in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Calls `function` on every entry in key order with a mutable value.
    pub fn for_each_mut<F>(&mut self, mut function: F)
    where
        F: FnMut(&K, &mut V),
    {
        for (key, value) in self.iter_mut() {
            function(key, value);
        }
    }

    // -------------------------------------------------------------------------
    // Erasure
    // -------------------------------------------------------------------------

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Removes the entry at `position`, returning the position after it.
    /// Erasing `end()` does nothing.
    pub fn erase_at(&mut self, position: Position) -> Position {
        self.tree.erase_at(position)
    }

    /// Removes `[first, last)` and returns `last`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.tree.erase_range(first, last)
    }
}

impl<K, V, C> OrderedMap<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts `key` with `value` if the key is absent.
    ///
    /// Returns the position of the entry holding `key` and whether the
    /// insertion happened. An existing entry keeps its value; use
    /// [`OrderedMap::insert_or_assign`] or the entry API to overwrite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert(1, "one").1);
    /// assert!(!map.insert(1, "uno").1);
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        self.tree.insert((key, value))
    }

    /// Inserts `value` under `key`, replacing and returning any previous
    /// value.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Inserts `key` with `value` using `hint` as a guess of where it
    /// belongs; see [`RedBlackTree::insert_with_hint`].
    pub fn insert_with_hint(&mut self, hint: Position, key: K, value: V) -> Position {
        self.tree.insert_with_hint(hint, (key, value))
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.get(self.tree.find(key)).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        let position = self.tree.find(key);
        self.tree.get_mut(position).map(|(_, value)| value)
    }

    /// Returns the stored key and the value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree
            .get(self.tree.find(key))
            .map(|(key, value)| (key, value))
    }

    /// Bounds-checked access to the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when no entry has an equivalent key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::map::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [(1, 10)].into_iter().collect();
    /// assert_eq!(map.at(&1), Ok(&10));
    /// assert!(map.at(&2).is_err());
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, OutOfRangeError>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.get(key)
            .ok_or_else(|| OutOfRangeError::missing("OrderedMap::at", self.len()))
    }

    /// Returns `true` if the map has an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.contains(key)
    }

    /// Position of the entry for `key`, or `end()`.
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.find(key)
    }

    /// Number of entries for `key`: 0 or 1.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.count(key)
    }

    /// Position of the first entry whose key is not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.lower_bound(key)
    }

    /// Position of the first entry whose key is greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.upper_bound(key)
    }

    /// `(lower_bound(key), upper_bound(key))`.
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.equal_range(key)
    }

    /// Iterates over the entries whose keys fall within `bounds`.
    pub fn range<Q, R>(&self, bounds: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
        R: RangeBounds<Q>,
    {
        Range {
            inner: self.tree.range(bounds),
        }
    }

    /// Removes the entry for `key`; returns how many entries were removed.
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.erase(key)
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.take(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        Q: ?Sized,
    {
        self.tree.take(key)
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// A vacant entry remembers where the key belongs, so inserting through
    /// it skips the second search.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::map::OrderedMap;
    ///
    /// let mut counts: OrderedMap<char, usize> = OrderedMap::new();
    /// for character in "hello".chars() {
    ///     counts.entry(character).and_modify(|count| *count += 1).or_insert(1);
    /// }
    /// assert_eq!(counts.get(&'l'), Some(&2));
    /// assert_eq!(counts.get(&'h'), Some(&1));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.tree.locate(&key) {
            Ok(index) => Entry::Occupied(OccupiedEntry {
                map: self,
                position: Position::new(index),
            }),
            Err(vacancy) => Entry::Vacant(VacantEntry {
                map: self,
                key,
                vacancy,
            }),
        }
    }

    /// Returns the value for `key`, inserting `V::default()` first when the
    /// key is absent. Unlike indexing, this may grow the map.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
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
// Entry API
// =============================================================================

/// A view into a single entry of an [`OrderedMap`], occupied or vacant.
pub enum Entry<'a, K, V, C> {
    /// The key is present.
    Occupied(OccupiedEntry<'a, K, V, C>),
    /// The key is absent.
    Vacant(VacantEntry<'a, K, V, C>),
}

/// An entry whose key is present.
pub struct OccupiedEntry<'a, K, V, C> {
    map: &'a mut OrderedMap<K, V, C>,
    position: Position,
}

/// An entry whose key is absent, remembering where it would be linked.
pub struct VacantEntry<'a, K, V, C> {
    map: &'a mut OrderedMap<K, V, C>,
    key: K,
    vacancy: Vacancy,
}

impl<'a, K, V, C> Entry<'a, K, V, C> {
    /// The entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Self::Occupied(entry) => entry.key(),
            Self::Vacant(entry) => entry.key(),
        }
    }

    /// Inserts `default` if vacant; returns the value either way.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Self::Occupied(entry) => entry.into_mut(),
            Self::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Self::Occupied(entry) => entry.into_mut(),
            Self::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Inserts `V::default()` if vacant.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Applies `function` to the value if occupied.
    #[must_use]
    pub fn and_modify<F>(self, function: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Self::Occupied(mut entry) => {
                function(entry.get_mut());
                Self::Occupied(entry)
            }
            Self::Vacant(entry) => Self::Vacant(entry),
        }
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// The stored key.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.map.tree.live(self.position).0
    }

    /// The entry's position in the map.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The stored value.
    #[must_use]
    pub fn get(&self) -> &V {
        &self.map.tree.live(self.position).1
    }

    /// The stored value, mutably.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.tree.live_mut(self.position).1
    }

    /// Converts into a mutable reference bound to the map's borrow.
    #[must_use]
    pub fn into_mut(self) -> &'a mut V {
        let map = self.map;
        &mut map.tree.live_mut(self.position).1
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry, returning the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        match self.map.tree.take_at(self.position) {
            Some((entry, _)) => entry,
            None => unreachable!("occupied entry points at a live node"),
        }
    }
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// The key that would be inserted.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Takes back ownership of the key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Links `key` with `value` at the remembered vacancy and returns the
    /// new value.
    pub fn insert(self, value: V) -> &'a mut V {
        let map = self.map;
        let position = map.tree.attach(self.vacancy, (self.key, value));
        &mut map.tree.live_mut(position).1
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`], in key order.
pub struct Iter<'a, K, V> {
    inner: tree::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// A mutable iterator over the entries of an [`OrderedMap`]. Keys stay
/// immutable.
pub struct IterMut<'a, K, V> {
    inner: std::vec::IntoIter<&'a mut (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (&*key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (&*key, value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of an [`OrderedMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`], in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an [`OrderedMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An iterator over a key range of an [`OrderedMap`].
pub struct Range<'a, K, V> {
    inner: tree::Range<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

/// An owning iterator over the entries of an [`OrderedMap`], in key order.
pub struct IntoIter<K, V> {
    inner: tree::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for OrderedMap<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K, V, C> Extend<(K, V)> for OrderedMap<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut OrderedMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Read-only subscript.
///
/// # Panics
///
/// Panics if the key is not present; use [`OrderedMap::get_or_insert_default`]
/// for the inserting subscript.
impl<K, V, C, Q> Index<&Q> for OrderedMap<K, V, C>
where
    K: Borrow<Q>,
    C: Compare<K> + Compare<Q>,
    Q: ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("OrderedMap::index: no entry found for key"),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for OrderedMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C> Ord for OrderedMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: Hash, V: Hash, C> Hash for OrderedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for OrderedMap<K, V, C> {
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

static_assertions::assert_impl_all!(OrderedMap<i32, String>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for OrderedMap<K, V, C>
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
struct OrderedMapVisitor<K, V, C> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
    compare_marker: std::marker::PhantomData<C>,
}

#[cfg(feature = "serde")]
impl<K, V, C> OrderedMapVisitor<K, V, C> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
            compare_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for OrderedMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Compare<K> + Default,
{
    type Value = OrderedMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Unique insertion: the first occurrence of a duplicate key wins.
        let mut map = OrderedMap::with_comparator(C::default());
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for OrderedMap<K, V, C>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_sorted() {
        let map: OrderedMap<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }

    #[rstest]
    fn test_deserialize_first_duplicate_wins() {
        let json = r#"{"k":1,"k":2}"#;
        let map: OrderedMap<String, i32> = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&1));
    }

    #[rstest]
    fn test_roundtrip() {
        let original: OrderedMap<String, i32> =
            (0..20).map(|index| (format!("key{index:02}"), index)).collect();
        let json = serde_json::to_string(&original).unwrap();
        let restored: OrderedMap<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
