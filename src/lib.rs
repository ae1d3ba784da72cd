//! # conseq
//!
//! Recursive sequence operations over a persistent cons list, built from
//! first principles.
//!
//! ## Overview
//!
//! This library implements a small set of list-manipulation primitives
//! (append, concatenate, filter, count, map, left fold, right fold, and
//! reverse) as explicit traversals of an immutable singly-linked
//! sequence, rather than as wrappers around the standard library's
//! iterator adapters. It includes:
//!
//! - **`Sequence<T>`**: an immutable cons list with structural sharing,
//!   O(1) prepend and O(1) length
//! - **Sequence operations**: the eight primitives as total methods on
//!   `Sequence<T>`
//! - **Dynamic values**: a heterogeneous [`Value`](value::Value) element
//!   type for sequences that mix booleans, integers, text, and nested
//!   sequences
//! - **Checked operations**: the [`ops`] module, where every operation
//!   validates its argument and reports
//!   [`NotASequence`](error::SequenceError) instead of assuming
//!   well-typed input
//!
//! ## Feature Flags
//!
//! - `arc`: share sequences across threads by switching the internal
//!   reference counter from `Rc` to `Arc`
//! - `serde`: Serialize/Deserialize support for `Sequence` and `Value`
//!
//! ## Example
//!
//! ```rust
//! use conseq::prelude::*;
//! use conseq::sequence;
//!
//! let numbers = sequence![1, 2, 3, 4];
//!
//! let evens = numbers.filter(|element| element % 2 == 0);
//! assert_eq!(evens, sequence![2, 4]);
//!
//! let total = numbers.fold_left(0, |element, accumulator| accumulator + element);
//! assert_eq!(total, 10);
//!
//! assert_eq!(numbers.reverse(), sequence![4, 3, 2, 1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use conseq::prelude::*;
/// ```
pub mod prelude {

    pub use crate::error::*;

    pub use crate::ops;

    pub use crate::sequence::*;

    pub use crate::value::*;
}

pub mod error;

pub mod ops;

pub mod sequence;

pub mod value;
