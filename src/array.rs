//! Growable contiguous array with explicit capacity management.
//!
//! [`DynamicArray`] tracks its capacity itself instead of leaving growth to
//! the backing allocation, so the growth policy is exact and observable:
//!
//! - `push_back` on a full array grows to `max(1, capacity * 2)`
//! - multi-element inserts grow to `max(required, capacity * 2)`
//! - `reserve(n)` grows to exactly `n` and never shrinks
//! - `clear`, `truncate` and shrinking `resize` keep the capacity
//!
//! Requests beyond [`DynamicArray::max_size`] fail with [`LengthError`]
//! before anything is allocated. Every reallocation moves the elements to a
//! new buffer, so it invalidates all outstanding references (the borrow
//! checker enforces this).
//!
//! # Examples
//!
//! ```rust
//! use rbcollections::array::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! array.reserve(32).unwrap();
//! assert!(array.capacity() >= 32);
//! assert_eq!(array.len(), 0);
//!
//! for value in 0..40 {
//!     array.push_back(value);
//! }
//! assert_eq!(array.capacity(), 64);
//! assert_eq!(array.at(39), Ok(&39));
//! assert!(array.at(40).is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds};
use std::slice::SliceIndex;

use crate::error::{LengthError, OutOfRangeError};

/// A contiguous growable array with an observable doubling growth policy.
///
/// # Time Complexity
///
/// | Operation      | Complexity       |
/// |----------------|------------------|
/// | `push_back`    | O(1) amortized   |
/// | `pop_back`     | O(1)             |
/// | `at` / index   | O(1)             |
/// | `insert`       | O(N)             |
/// | `erase`        | O(N)             |
/// | `reserve`      | O(N) on growth   |
/// | `clone`        | O(N)             |
pub struct DynamicArray<T> {
    buffer: Vec<T>,
    /// Logical capacity; the backing allocation is at least this large.
    capacity: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with zero capacity. Does not allocate.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            capacity: 0,
        }
    }

    /// Creates an empty array able to hold `capacity` elements without
    /// reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the allocation size overflows, like [`Vec::with_capacity`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of elements the array can hold before it must reallocate.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The largest element count a single buffer can represent.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        let element_size = std::mem::size_of::<T>();
        isize::MAX as usize / if element_size == 0 { 1 } else { element_size }
    }

    /// The elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// The elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    // -------------------------------------------------------------------------
    // Capacity
    // -------------------------------------------------------------------------

    fn length_error(&self, operation: &'static str, requested: usize) -> LengthError {
        LengthError {
            operation,
            requested,
            max_size: self.max_size(),
        }
    }

    /// Moves the elements into a fresh buffer of `new_capacity`.
    fn reallocate(&mut self, new_capacity: usize) {
        log::trace!(
            "DynamicArray reallocating: capacity {} -> {} ({} elements)",
            self.capacity,
            new_capacity,
            self.buffer.len()
        );
        let mut buffer = Vec::with_capacity(new_capacity);
        buffer.append(&mut self.buffer);
        self.buffer = buffer;
        self.capacity = new_capacity;
    }

    /// Ensures room for `required` elements, growing geometrically.
    fn grow_to_fit(&mut self, operation: &'static str, required: usize) -> Result<(), LengthError> {
        if required <= self.capacity {
            return Ok(());
        }
        let max_size = self.max_size();
        if required > max_size {
            return Err(self.length_error(operation, required));
        }
        let doubled = self.capacity.saturating_mul(2).min(max_size);
        self.reallocate(required.max(doubled));
        Ok(())
    }

    /// Grows the capacity to at least `capacity`. Never shrinks and never
    /// changes the length.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if `capacity` exceeds [`Self::max_size`]; the
    /// array is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), LengthError> {
        if capacity > self.max_size() {
            return Err(self.length_error("DynamicArray::reserve", capacity));
        }
        if capacity > self.capacity {
            self.reallocate(capacity);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRangeError> {
        let length = self.len();
        self.buffer
            .get(index)
            .ok_or_else(|| OutOfRangeError::index("DynamicArray::at", index, length))
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRangeError> {
        let length = self.len();
        self.buffer
            .get_mut(index)
            .ok_or_else(|| OutOfRangeError::index("DynamicArray::at_mut", index, length))
    }

    /// The first element.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.buffer.first()
    }

    /// The first element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.buffer.first_mut()
    }

    /// The last element.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.buffer.last()
    }

    /// The last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.buffer.last_mut()
    }

    // -------------------------------------------------------------------------
    // Modification
    // -------------------------------------------------------------------------

    /// Appends `value`, doubling the capacity when full.
    ///
    /// # Panics
    ///
    /// Panics if the array already holds [`Self::max_size`] elements.
    pub fn push_back(&mut self, value: T) {
        let required = self.len() + 1;
        if let Err(error) = self.grow_to_fit("DynamicArray::push_back", required) {
            panic!("{error}");
        }
        self.buffer.push(value);
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when the array is empty.
    pub fn pop_back(&mut self) -> Result<T, OutOfRangeError> {
        self.buffer
            .pop()
            .ok_or_else(|| OutOfRangeError::missing("DynamicArray::pop_back", 0))
    }

    /// Inserts `value` at `index`, shifting later elements right. Returns
    /// `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`, or if the array already holds
    /// [`Self::max_size`] elements.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.check_insert_index(index);
        let required = self.len() + 1;
        if let Err(error) = self.grow_to_fit("DynamicArray::insert", required) {
            panic!("{error}");
        }
        self.buffer.insert(index, value);
        index
    }

    /// Inserts `count` copies of `value` at `index`. Returns `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if the resulting length would exceed
    /// [`Self::max_size`]; the array is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) -> Result<usize, LengthError>
    where
        T: Clone,
    {
        self.check_insert_index(index);
        let required = self
            .len()
            .checked_add(count)
            .ok_or_else(|| self.length_error("DynamicArray::insert_n", usize::MAX))?;
        self.grow_to_fit("DynamicArray::insert_n", required)?;
        self.buffer
            .splice(index..index, std::iter::repeat_n(value, count));
        Ok(index)
    }

    /// Inserts every item of `iter` at `index`, in order. Returns `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if the resulting length would exceed
    /// [`Self::max_size`]; the array is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, LengthError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_insert_index(index);
        let values: Vec<T> = iter.into_iter().collect();
        let required = self.len() + values.len();
        self.grow_to_fit("DynamicArray::insert_iter", required)?;
        self.buffer.splice(index..index, values);
        Ok(index)
    }

    fn check_insert_index(&self, index: usize) {
        let length = self.len();
        assert!(
            index <= length,
            "DynamicArray::insert: index (is {index}) should be <= len (is {length})"
        );
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> T {
        self.buffer.remove(index)
    }

    /// Removes the elements in `range` and returns the index of the first
    /// element after them (the range start).
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or decreasing.
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        self.buffer.drain(range);
        start
    }

    /// Replaces the contents with the items of `iter`.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if `iter` yields more than
    /// [`Self::max_size`] items; the array is unchanged.
    pub fn assign<I>(&mut self, iter: I) -> Result<(), LengthError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = iter.into_iter().collect();
        self.grow_to_fit("DynamicArray::assign", values.len())?;
        self.buffer.clear();
        self.buffer.extend(values);
        Ok(())
    }

    /// Replaces the contents with `count` copies of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if `count` exceeds [`Self::max_size`]; the
    /// array is unchanged.
    pub fn assign_fill(&mut self, count: usize, value: T) -> Result<(), LengthError>
    where
        T: Clone,
    {
        self.grow_to_fit("DynamicArray::assign_fill", count)?;
        self.buffer.clear();
        self.buffer.resize(count, value);
        Ok(())
    }

    /// Resizes to `length`, filling new slots with clones of `value` or
    /// dropping the excess. Shrinking keeps the capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if `length` exceeds [`Self::max_size`]; the
    /// array is unchanged.
    pub fn resize(&mut self, length: usize, value: T) -> Result<(), LengthError>
    where
        T: Clone,
    {
        self.grow_to_fit("DynamicArray::resize", length)?;
        self.buffer.resize(length, value);
        Ok(())
    }

    /// Resizes to `length`, filling new slots with the results of `function`.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if `length` exceeds [`Self::max_size`]; the
    /// array is unchanged.
    pub fn resize_with<F>(&mut self, length: usize, function: F) -> Result<(), LengthError>
    where
        F: FnMut() -> T,
    {
        self.grow_to_fit("DynamicArray::resize_with", length)?;
        self.buffer.resize_with(length, function);
        Ok(())
    }

    /// Shortens to `length` elements; no effect if already shorter.
    pub fn truncate(&mut self, length: usize) {
        self.buffer.truncate(length);
    }

    /// Removes every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Exchanges contents and capacities with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Creates an array of `count` copies of `value` with capacity `count`.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] if `count` exceeds the maximum size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbcollections::array::DynamicArray;
    ///
    /// let array = DynamicArray::from_elem(3, 'x').unwrap();
    /// assert_eq!(array.as_slice(), &['x', 'x', 'x']);
    /// assert_eq!(array.capacity(), 3);
    /// ```
    pub fn from_elem(count: usize, value: T) -> Result<Self, LengthError> {
        let mut array = Self::new();
        array.reserve(count).map_err(|error| LengthError {
            operation: "DynamicArray::from_elem",
            ..error
        })?;
        array.buffer.resize(count, value);
        Ok(array)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for DynamicArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Copies keep the source capacity.
impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut buffer = Vec::with_capacity(self.capacity);
        buffer.extend(self.buffer.iter().cloned());
        Self {
            buffer,
            capacity: self.capacity,
        }
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynamicArray<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.buffer[index]
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynamicArray<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.buffer[index]
    }
}

/// Takes over the vector's elements; capacity equals the length.
impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(buffer: Vec<T>) -> Self {
        let capacity = buffer.len();
        Self { buffer, capacity }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.iter_mut()
    }
}

/// Element-wise; capacity does not take part.
impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.buffer.partial_cmp(&other.buffer)
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.buffer.cmp(&other.buffer)
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buffer.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.buffer.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

static_assertions::assert_impl_all!(DynamicArray<String>: Send, Sync, Clone, Default);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for DynamicArray<T> {
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
struct DynamicArrayVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> DynamicArrayVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::de::Visitor<'de> for DynamicArrayVisitor<T> {
    type Value = DynamicArray<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(DynamicArray::from(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for DynamicArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(DynamicArrayVisitor::new())
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
    fn test_roundtrip() {
        let array: DynamicArray<i32> = [3, 1, 2].into_iter().collect();
        let json = serde_json::to_string(&array).unwrap();
        assert_eq!(json, "[3,1,2]");
        let restored: DynamicArray<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, array);
        assert_eq!(restored.capacity(), 3);
    }
}
