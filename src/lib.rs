//! # rbcollections
//!
//! Classic mutable containers with the semantics and complexity guarantees
//! of a standard container library, built without `unsafe`.
//!
//! ## Overview
//!
//! - **Red-Black Tree**: an arena-backed self-balancing search tree with
//!   stable positions, stackless bidirectional iteration and hinted insertion
//! - **Ordered Map / Set**: unique-key associative containers over the tree,
//!   parameterized by a comparator
//! - **Dynamic Array**: a contiguous growable buffer with an explicit,
//!   observable capacity policy
//! - **Stack**: a LIFO adapter over any back-insertable sequence
//!
//! ## Feature Flags
//!
//! - `tree`: the red-black tree, `OrderedMap` and `OrderedSet`
//! - `array`: `DynamicArray` and `Stack`
//! - `serde`: `Serialize`/`Deserialize` for the map, set and array
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use rbcollections::prelude::*;
//!
//! let mut scores: OrderedMap<&str, u32> = OrderedMap::new();
//! scores.insert("carol", 7);
//! scores.insert("alice", 9);
//! *scores.get_or_insert_default("bob") += 3;
//! assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec!["alice", "bob", "carol"]);
//!
//! let mut history: Stack<u32> = Stack::new();
//! for (_, score) in &scores {
//!     history.push(*score);
//! }
//! assert_eq!(history.pop(), Ok(7));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the containers, their comparators and the error types.
///
/// # Usage
///
/// ```rust
/// use rbcollections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;

    #[cfg(feature = "tree")]
    pub use crate::compare::{Compare, Greater, Less};
    #[cfg(feature = "tree")]
    pub use crate::map::OrderedMap;
    #[cfg(feature = "tree")]
    pub use crate::set::OrderedSet;
    #[cfg(feature = "tree")]
    pub use crate::tree::{Position, RedBlackTree};

    #[cfg(feature = "array")]
    pub use crate::array::DynamicArray;
    #[cfg(feature = "array")]
    pub use crate::stack::{BackSequence, Stack};
}

pub mod error;

#[cfg(feature = "tree")]
pub mod compare;

#[cfg(feature = "tree")]
pub mod tree;

#[cfg(feature = "tree")]
pub mod map;

#[cfg(feature = "tree")]
pub mod set;

#[cfg(feature = "array")]
pub mod array;

#[cfg(feature = "array")]
pub mod stack;
