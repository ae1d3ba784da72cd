//! Persistent (immutable) singly-linked sequence.
//!
//! This module provides [`Sequence`], a cons list in the Lisp tradition:
//! either the empty sequence, or a cell holding one element and the rest of
//! the sequence. It provides:
//!
//! - O(1) prepend (`cons`)
//! - O(1) head and tail access
//! - O(1) length
//! - O(n) traversing operations (`append`, `filter`, `map`, folds, `reverse`)
//!
//! All operations return new sequences without modifying the original, and
//! structural sharing keeps that cheap:
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```
//!
//! The traversing operations deliberately walk the cell structure with
//! explicit loops and an output buffer instead of delegating to iterator
//! adapters; the algorithms stay visible, and none of them grow the call
//! stack with the input.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::ReferenceCounter;

/// Internal cell structure for the sequence.
///
/// Each cell contains an element and an optional reference to the next cell.
/// Using a reference counter enables structural sharing between sequences.
struct Node<T> {
    /// The element stored in this cell.
    element: T,
    /// Reference to the next cell (if any).
    next: Option<ReferenceCounter<Self>>,
}

impl<T> Drop for Node<T> {
    // Dropping a cell must not recurse down the chain. Unlink uniquely
    // owned cells in a loop; the first shared cell belongs to another
    // sequence and stays.
    fn drop(&mut self) {
        let mut current = self.next.take();
        while let Some(node) = current {
            match ReferenceCounter::try_unwrap(node) {
                Ok(mut inner) => current = inner.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// A persistent (immutable) singly-linked sequence.
///
/// A `Sequence<T>` is either empty or a cell holding a head element and the
/// rest of the sequence. Cells are reference-counted, so sequences share
/// structure instead of copying it.
///
/// # Time Complexity
///
/// | Operation    | Complexity |
/// |--------------|------------|
/// | `new`        | O(1)       |
/// | `cons`       | O(1)       |
/// | `head`       | O(1)       |
/// | `tail`       | O(1)       |
/// | `len`        | O(1)       |
/// | `get`        | O(n)       |
/// | `append`     | O(n)       |
/// | `filter`     | O(n)       |
/// | `map`        | O(n)       |
/// | `fold_left`  | O(n)       |
/// | `fold_right` | O(n)       |
/// | `reverse`    | O(n)       |
///
/// # Examples
///
/// ```rust
/// use conseq::sequence::Sequence;
///
/// let list = Sequence::singleton(42);
/// assert_eq!(list.head(), Some(&42));
/// ```
#[derive(Clone)]
pub struct Sequence<T> {
    /// Reference to the head cell (if any). `None` is the empty sequence.
    head: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> Sequence<T> {
    /// Creates a new empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list: Sequence<i32> = Sequence::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a sequence containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::singleton(42);
    /// assert_eq!(list.head(), Some(&42));
    /// assert_eq!(list.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a sequence from a `Vec`, consuming it from the back so the
    /// resulting order matches the `Vec`'s order.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        if length == 0 {
            return Self::new();
        }

        let mut head: Option<ReferenceCounter<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(ReferenceCounter::new(Node {
                element,
                next: head,
            }));
        }

        Self { head, length }
    }

    /// Prepends an element to the front of the sequence.
    ///
    /// The new sequence shares every existing cell with the original.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(ReferenceCounter::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::new().cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    ///
    /// let empty: Sequence<i32> = Sequence::new();
    /// assert_eq!(empty.head(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the sequence without its first element; the empty sequence
    /// stays empty.
    ///
    /// The result shares structure with the original.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::new().cons(3).cons(2).cons(1);
    /// let tail = list.tail();
    /// assert_eq!(tail.head(), Some(&2));
    /// assert_eq!(tail.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Decomposes the sequence into its head and tail.
    ///
    /// Returns `None` if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::new().cons(2).cons(1);
    /// if let Some((head, tail)) = list.uncons() {
    ///     assert_eq!(*head, 1);
    ///     assert_eq!(tail.head(), Some(&2));
    /// }
    /// ```
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length.saturating_sub(1),
            };
            (&node.element, tail)
        })
    }

    /// Returns a reference to the element at the given index, or `None` if
    /// the index is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `index`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.get(0), Some(&1));
    /// assert_eq!(list.get(2), Some(&3));
    /// assert_eq!(list.get(10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let mut current = &self.head;
        let mut remaining = index;

        while let Some(node) = current {
            if remaining == 0 {
                return Some(&node.element);
            }
            remaining -= 1;
            current = &node.next;
        }
        None
    }

    /// Returns the number of elements in the sequence.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::new().cons(3).cons(2).cons(1);
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> SequenceIterator<'_, T> {
        SequenceIterator {
            current: self.head.as_ref(),
        }
    }

    /// Applies a transform to every element, producing a new sequence of
    /// the results in the same order.
    ///
    /// The empty sequence maps to the empty sequence, and the result always
    /// has the same length as the input.
    ///
    /// # Arguments
    ///
    /// * `transform` - A function applied to each element in order
    ///
    /// # Complexity
    ///
    /// O(n) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::from_slice(&[1, 2, 3]);
    /// let doubled = list.map(|element| element * 2);
    /// assert_eq!(doubled, Sequence::from_slice(&[2, 4, 6]));
    ///
    /// let labels = list.map(|element| format!("#{element}"));
    /// assert_eq!(labels.head(), Some(&"#1".to_string()));
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, mut transform: F) -> Sequence<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut transformed = Vec::with_capacity(self.len());
        for element in self {
            transformed.push(transform(element));
        }
        Sequence::build_from_vec(transformed)
    }

    /// Reduces the sequence left to right.
    ///
    /// The first element is combined with `initial`, and each subsequent
    /// element is combined with the prior result. The empty sequence
    /// returns `initial` unchanged.
    ///
    /// The combining function receives the element first and the running
    /// accumulator second; [`fold_right`](Self::fold_right) uses the same
    /// argument order, so the two directions are interchangeable exactly
    /// when the combine is insensitive to processing order.
    ///
    /// # Arguments
    ///
    /// * `initial` - The starting accumulator value
    /// * `combine` - Merges one element into the accumulator
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::from_slice(&[1, 2, 3]);
    /// let total = list.fold_left(0, |element, accumulator| accumulator + element);
    /// assert_eq!(total, 6);
    ///
    /// // Left to right: "1", then "12", then "123"
    /// let rendered = list.fold_left(String::new(), |element, accumulator| {
    ///     format!("{accumulator}{element}")
    /// });
    /// assert_eq!(rendered, "123");
    /// ```
    pub fn fold_left<A, F>(&self, initial: A, mut combine: F) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        let mut accumulator = initial;
        for element in self {
            accumulator = combine(element, accumulator);
        }
        accumulator
    }
}

impl<T: Clone> Sequence<T> {
    /// Creates a sequence from a slice, preserving order.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `slice.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::from_slice(&[1, 2, 3]);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        let length = slice.len();
        if length == 0 {
            return Self::new();
        }

        // Build back to front so each cell links to the already-built rest.
        let mut head: Option<ReferenceCounter<Node<T>>> = None;
        for element in slice.iter().rev() {
            head = Some(ReferenceCounter::new(Node {
                element: element.clone(),
                next: head,
            }));
        }

        Self { head, length }
    }

    /// Appends another sequence to this one.
    ///
    /// Returns a new sequence containing every element of `self` followed
    /// by every element of `other`. If either side is empty the other side
    /// is returned as-is. `other` is never rebuilt: the result's tail
    /// shares its cells.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `self.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let front = Sequence::from_slice(&[1, 2]);
    /// let back = Sequence::from_slice(&[3, 4]);
    /// let combined = front.append(&back);
    /// assert_eq!(combined, Sequence::from_slice(&[1, 2, 3, 4]));
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        // Buffer the left side, then cons its elements back to front onto
        // the shared right side.
        let mut buffered = Vec::with_capacity(self.len());
        for element in self {
            buffered.push(element.clone());
        }

        let mut result = other.clone();
        while let Some(element) = buffered.pop() {
            result = result.cons(element);
        }
        result
    }

    /// Keeps exactly the elements for which the predicate returns `true`,
    /// in their original order.
    ///
    /// The empty sequence filters to the empty sequence.
    ///
    /// # Arguments
    ///
    /// * `predicate` - Returns `true` for elements to keep
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::from_slice(&[1, 2, 3, 4]);
    /// let evens = list.filter(|element| element % 2 == 0);
    /// assert_eq!(evens, Sequence::from_slice(&[2, 4]));
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut kept = Vec::new();
        for element in self {
            if predicate(element) {
                kept.push(element.clone());
            }
        }
        Self::build_from_vec(kept)
    }

    /// Reduces the sequence right to left.
    ///
    /// The last element is combined with `initial` first, and the first
    /// element's combination produces the final result. The empty sequence
    /// returns `initial` unchanged.
    ///
    /// Implemented by reversing the sequence and folding left over the
    /// reversal. The combining function receives the element first and the
    /// accumulator second, the same order as
    /// [`fold_left`](Self::fold_left); that shared order is what makes the
    /// reversal strategy produce the right-to-left result for every
    /// combine, including order-sensitive ones.
    ///
    /// # Arguments
    ///
    /// * `initial` - The starting accumulator value
    /// * `combine` - Merges one element into the accumulator
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::from_slice(&[1, 2, 3]);
    ///
    /// // Right to left: "3", then "32", then "321"
    /// let rendered = list.fold_right(String::new(), |element, accumulator| {
    ///     format!("{accumulator}{element}")
    /// });
    /// assert_eq!(rendered, "321");
    ///
    /// // Rebuilding with cons reconstructs the sequence unchanged
    /// let rebuilt = list.fold_right(Sequence::new(), |element, accumulator| {
    ///     accumulator.cons(element.clone())
    /// });
    /// assert_eq!(rebuilt, list);
    /// ```
    pub fn fold_right<A, F>(&self, initial: A, combine: F) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        self.reverse().fold_left(initial, combine)
    }

    /// Returns a new sequence with the elements in opposite order.
    ///
    /// Each element is peeled off the input and prepended to an
    /// accumulator sequence, so a single pass produces the exact reversal.
    ///
    /// # Complexity
    ///
    /// O(n) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let list = Sequence::from_slice(&[1, 2, 3]);
    /// let reversed = list.reverse();
    /// assert_eq!(reversed, Sequence::from_slice(&[3, 2, 1]));
    ///
    /// // Reversing twice restores the original
    /// assert_eq!(reversed.reverse(), list);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut result = Self::new();
        for element in self {
            result = result.cons(element.clone());
        }
        result
    }
}

// =============================================================================
// Specialized Methods for Nested Sequences
// =============================================================================

impl<T: Clone> Sequence<Sequence<T>> {
    /// Flattens a sequence of sequences by one level.
    ///
    /// The result contains, in order, every element of every inner
    /// sequence; empty inner sequences contribute nothing. Relative order
    /// is preserved both within and across the inner sequences.
    ///
    /// # Complexity
    ///
    /// O(n) where n is the total number of inner elements
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::sequence::Sequence;
    ///
    /// let nested = Sequence::from_slice(&[
    ///     Sequence::from_slice(&[1, 2]),
    ///     Sequence::new(),
    ///     Sequence::from_slice(&[3]),
    /// ]);
    /// assert_eq!(nested.concat(), Sequence::from_slice(&[1, 2, 3]));
    /// ```
    #[must_use]
    pub fn concat(&self) -> Sequence<T> {
        let mut flattened = Vec::new();
        for inner in self {
            for element in inner {
                flattened.push(element.clone());
            }
        }
        Sequence::build_from_vec(flattened)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`Sequence`].
pub struct SequenceIterator<'a, T> {
    current: Option<&'a ReferenceCounter<Node<T>>>,
}

impl<'a, T> Iterator for SequenceIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The remaining length is not tracked here; only bound it from below.
        (0, None)
    }
}

/// An owning iterator over elements of a [`Sequence`].
pub struct SequenceIntoIterator<T> {
    sequence: Sequence<T>,
}

impl<T: Clone> Iterator for SequenceIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((head, tail)) = self.sequence.uncons() {
            let element = head.clone();
            self.sequence = tail;
            Some(element)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.length, Some(self.sequence.length))
    }
}

impl<T: Clone> ExactSizeIterator for SequenceIntoIterator<T> {
    fn len(&self) -> usize {
        self.sequence.length
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Sequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        Self::build_from_vec(elements)
    }
}

impl<T: Clone> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = SequenceIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SequenceIntoIterator { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = SequenceIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Sequence<T> {}

/// Hashes the length first, then each element in order, so equal sequences
/// hash equally and order changes the hash.
impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Sequence<T> {
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

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Sequence<T> {
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
struct SequenceVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> SequenceVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for SequenceVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = Sequence<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
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
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Sequence<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SequenceVisitor::new())
    }
}

// =============================================================================
// Thread-Safety Guarantees
// =============================================================================

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Sequence<i32>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Sequence<String>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Sequence<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Sequence<String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Serde Tests
// =============================================================================
