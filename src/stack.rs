//! LIFO adapter over any back-insertable sequence.
//!
//! [`Stack`] owns a container implementing [`BackSequence`] and exposes only
//! the top of it. The default container is [`DynamicArray`]; [`Vec`] and
//! [`VecDeque`] work as drop-in replacements.
//!
//! # Examples
//!
//! ```rust
//! use rbcollections::stack::Stack;
//!
//! let mut stack = Stack::new();
//! stack.push(1);
//! stack.push(2);
//! assert_eq!(stack.top(), Some(&2));
//! assert_eq!(stack.pop(), Ok(2));
//! assert_eq!(stack.pop(), Ok(1));
//! assert!(stack.pop().is_err());
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::array::DynamicArray;
use crate::error::OutOfRangeError;

/// A sequence that supports access, insertion and removal at its back.
pub trait BackSequence<T> {
    /// The last element.
    fn back(&self) -> Option<&T>;

    /// The last element, mutably.
    fn back_mut(&mut self) -> Option<&mut T>;

    /// Appends `value` at the back.
    fn push_back(&mut self, value: T);

    /// Removes and returns the last element.
    fn pop_back(&mut self) -> Option<T>;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> BackSequence<T> for DynamicArray<T> {
    fn back(&self) -> Option<&T> {
        Self::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        Self::back_mut(self)
    }

    fn push_back(&mut self, value: T) {
        Self::push_back(self, value);
    }

    fn pop_back(&mut self) -> Option<T> {
        Self::pop_back(self).ok()
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T> BackSequence<T> for Vec<T> {
    fn back(&self) -> Option<&T> {
        self.last()
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    fn push_back(&mut self, value: T) {
        self.push(value);
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T> BackSequence<T> for VecDeque<T> {
    fn back(&self) -> Option<&T> {
        Self::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        Self::back_mut(self)
    }

    fn push_back(&mut self, value: T) {
        Self::push_back(self, value);
    }

    fn pop_back(&mut self) -> Option<T> {
        Self::pop_back(self)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

/// A last-in first-out stack over the container `S`.
pub struct Stack<T, S = DynamicArray<T>> {
    container: S,
    element: PhantomData<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack over a [`DynamicArray`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::from_container(DynamicArray::new())
    }
}

impl<T, S> Stack<T, S> {
    /// Wraps an existing container; its back becomes the top.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::VecDeque;
    /// use rbcollections::stack::Stack;
    ///
    /// let stack = Stack::from_container(VecDeque::from([1, 2, 3]));
    /// assert_eq!(stack.top(), Some(&3));
    /// ```
    #[must_use]
    pub const fn from_container(container: S) -> Self {
        Self {
            container,
            element: PhantomData,
        }
    }

    /// Unwraps the underlying container.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.container
    }
}

impl<T, S: BackSequence<T>> Stack<T, S> {
    /// The top element.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.container.back()
    }

    /// The top element, mutably.
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.container.back_mut()
    }

    /// Pushes `value` on top.
    pub fn push(&mut self, value: T) {
        self.container.push_back(value);
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when the stack is empty.
    pub fn pop(&mut self) -> Result<T, OutOfRangeError> {
        self.container
            .pop_back()
            .ok_or_else(|| OutOfRangeError::missing("Stack::pop", 0))
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Returns `true` if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, S: Default> Default for Stack<T, S> {
    fn default() -> Self {
        Self::from_container(S::default())
    }
}

impl<T, S: Clone> Clone for Stack<T, S> {
    fn clone(&self) -> Self {
        Self::from_container(self.container.clone())
    }
}

impl<T, S: BackSequence<T>> Extend<T> for Stack<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, S: BackSequence<T> + Default> FromIterator<T> for Stack<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::default();
        stack.extend(iter);
        stack
    }
}

/// Comparisons delegate to the containers, bottom to top.
impl<T, S: PartialEq> PartialEq for Stack<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container
    }
}

impl<T, S: Eq> Eq for Stack<T, S> {}

impl<T, S: PartialOrd> PartialOrd for Stack<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.container.partial_cmp(&other.container)
    }
}

impl<T, S: Ord> Ord for Stack<T, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.container.cmp(&other.container)
    }
}

impl<T, S: Hash> Hash for Stack<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container.hash(state);
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Stack<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Stack").field(&self.container).finish()
    }
}

static_assertions::assert_impl_all!(Stack<i32>: Send, Sync, Clone);
