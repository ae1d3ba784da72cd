//! Persistent (immutable) sequence type.
//!
//! This module provides [`Sequence`], an immutable singly-linked cons list
//! that uses structural sharing to make prepending and tail access cheap.
//!
//! # Structural Sharing
//!
//! Every operation returns a new sequence and leaves its inputs untouched.
//! A sequence built by prepending shares all existing cells with the
//! original, so `cons` is O(1) in time and additional space.
//!
//! # Examples
//!
//! ```rust
//! use conseq::sequence;
//! use conseq::sequence::Sequence;
//!
//! let list = Sequence::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! // The original is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//!
//! // The macro builds in reading order
//! assert_eq!(list, sequence![1, 2, 3]);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod list;

pub use list::Sequence;
pub use list::SequenceIntoIterator;
pub use list::SequenceIterator;

// =============================================================================
// Construction Macro
// =============================================================================

/// Constructs a [`Sequence`](crate::sequence::Sequence) from its elements,
/// in reading order.
///
/// # Examples
///
/// ```rust
/// use conseq::sequence;
/// use conseq::sequence::Sequence;
///
/// let list = sequence![1, 2, 3];
/// assert_eq!(list, Sequence::from_slice(&[1, 2, 3]));
///
/// let empty: Sequence<i32> = sequence![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! sequence {
    () => { $crate::sequence::Sequence::new() };

    ( $($element:expr),+ $(,)? ) => {{
        let mut sequence = $crate::sequence::Sequence::new();
        $(
            sequence = sequence.cons($element);
        )+
        sequence.reverse()
    }};
}

// =============================================================================
// Tests
// =============================================================================
