//! Key-comparison and key-extraction policies.
//!
//! The tree never calls `<` or `==` on keys. Ordering comes from a
//! [`Compare`] value supplied at construction, and key equality is derived
//! from it as mutual non-precedence: `!less(a, b) && !less(b, a)`.
//!
//! Which part of a stored value is the key is fixed at the type level by a
//! [`KeyOf`] policy: [`Identity`] for sets, [`First`] for maps storing
//! `(key, value)` pairs.
//!
//! # Examples
//!
//! ```rust
//! use rbcollections::compare::{Compare, Greater, Less};
//!
//! assert!(Less.less(&1, &2));
//! assert!(Greater.less(&2, &1));
//! assert!(Less.equivalent(&3, &3));
//!
//! // Any `Fn(&K, &K) -> bool` is a comparator.
//! let by_length = |left: &&str, right: &&str| left.len() < right.len();
//! assert!(by_length.less(&"ab", &"abc"));
//! assert!(by_length.equivalent(&"ab", &"cd"));
//! ```

use std::cmp::Ordering;

/// A strict weak ordering over keys.
///
/// Implementations must be irreflexive, asymmetric and transitive, and the
/// induced equivalence must be transitive too. A comparator that breaks
/// these rules leaves the containers in an unspecified (but memory-safe)
/// state; nothing is checked at runtime.
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `left` is ordered strictly before `right`.
    fn less(&self, left: &K, right: &K) -> bool;

    /// Returns `true` if neither key precedes the other.
    #[inline]
    fn equivalent(&self, left: &K, right: &K) -> bool {
        !self.less(left, right) && !self.less(right, left)
    }

    /// Three-way comparison derived from [`Compare::less`].
    #[inline]
    fn ordering(&self, left: &K, right: &K) -> Ordering {
        if self.less(left, right) {
            Ordering::Less
        } else if self.less(right, left) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Ascending order through [`Ord`]; the default comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        left < right
    }
}

/// Descending order through [`Ord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Greater;

impl<K: Ord + ?Sized> Compare<K> for Greater {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        left > right
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}

/// Maps a stored value to the key it is ordered by.
pub trait KeyOf<T> {
    /// The key type.
    type Key: ?Sized;

    /// Borrows the key out of a stored value.
    fn key(value: &T) -> &Self::Key;
}

/// The value is its own key (sets).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    #[inline]
    fn key(value: &T) -> &T {
        value
    }
}

/// The first component of a pair is the key (maps).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct First;

impl<K, V> KeyOf<(K, V)> for First {
    type Key = K;

    #[inline]
    fn key(value: &(K, V)) -> &K {
        &value.0
    }
}

/// Lifts a key comparator to whole stored values.
///
/// For maps this orders `(key, value)` pairs by key only, which is what
/// `value_comp()` hands out.
///
/// # Examples
///
/// ```rust
/// use rbcollections::compare::{First, Less, ValueCompare};
///
/// let compare: ValueCompare<Less, First> = ValueCompare::new(Less);
/// assert!(compare.less(&(1, "z"), &(2, "a")));
/// assert!(!compare.less(&(2, "a"), &(2, "z")));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueCompare<C, X> {
    compare: C,
    extract: std::marker::PhantomData<X>,
}

impl<C, X> ValueCompare<C, X> {
    /// Wraps a key comparator.
    #[must_use]
    pub const fn new(compare: C) -> Self {
        Self {
            compare,
            extract: std::marker::PhantomData,
        }
    }

    /// Returns the wrapped key comparator.
    #[must_use]
    pub const fn key_compare(&self) -> &C {
        &self.compare
    }

    /// Orders two stored values by their extracted keys.
    pub fn less<T>(&self, left: &T, right: &T) -> bool
    where
        X: KeyOf<T>,
        C: Compare<X::Key>,
    {
        self.compare.less(X::key(left), X::key(right))
    }
}
