//! Dynamically typed values for the fallible operation layer.
//!
//! [`Value`] is a closed set of runtime-tagged values: booleans, integers,
//! text, and sequences of further values. The [`ops`](crate::ops) module
//! operates on `Value` arguments and reports a
//! [`SequenceError`](crate::error::SequenceError) when an argument that
//! must be a sequence turns out to be something else. [`ValueKind`] names
//! the runtime tag, mainly so error messages can say what was found.
//!
//! # Examples
//!
//! ```rust
//! use conseq::value::{Value, ValueKind};
//!
//! let number = Value::from(42);
//! assert_eq!(number.kind(), ValueKind::Integer);
//! assert!(!number.is_sequence());
//!
//! let letters = Value::sequence([Value::from("a"), Value::from("b")]);
//! assert_eq!(letters.kind(), ValueKind::Sequence);
//! assert_eq!(letters.as_sequence().map(|sequence| sequence.len()), Some(2));
//! ```

use std::fmt;

use crate::sequence::Sequence;

// =============================================================================
// Value Kind
// =============================================================================

/// The runtime tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A boolean.
    Boolean,
    /// A signed 64-bit integer.
    Integer,
    /// An owned text string.
    Text,
    /// A sequence of values.
    Sequence,
}

impl ValueKind {
    /// Returns the lowercase name of the kind, as used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

// =============================================================================
// Value
// =============================================================================

/// A dynamically typed value.
///
/// Sequences are heterogeneous: one sequence may hold booleans, integers,
/// text, and nested sequences side by side.
///
/// # Examples
///
/// ```rust
/// use conseq::value::Value;
///
/// let mixed = Value::sequence([
///     Value::from(true),
///     Value::from(7),
///     Value::from("seven"),
/// ]);
/// assert!(mixed.is_sequence());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean.
    Boolean(bool),
    /// A signed 64-bit integer.
    Integer(i64),
    /// An owned text string.
    Text(String),
    /// A sequence of further values.
    Sequence(Sequence<Value>),
}

impl Value {
    /// Builds a sequence value from its elements, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::value::Value;
    ///
    /// let numbers = Value::sequence([Value::from(1), Value::from(2)]);
    /// assert_eq!(numbers.as_sequence().map(|sequence| sequence.len()), Some(2));
    /// ```
    #[must_use]
    pub fn sequence<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Sequence(elements.into_iter().collect())
    }

    /// Returns the runtime tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
            Self::Sequence(_) => ValueKind::Sequence,
        }
    }

    /// Returns `true` if this value is a sequence.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Borrows the underlying sequence, or returns `None` for any other
    /// kind of value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conseq::value::Value;
    ///
    /// let letters = Value::sequence([Value::from("a")]);
    /// assert!(letters.as_sequence().is_some());
    /// assert!(Value::from(42).as_sequence().is_none());
    /// ```
    #[must_use]
    pub const fn as_sequence(&self) -> Option<&Sequence<Self>> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    #[inline]
    fn from(boolean: bool) -> Self {
        Self::Boolean(boolean)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(integer: i64) -> Self {
        Self::Integer(integer)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Sequence<Value>> for Value {
    #[inline]
    fn from(sequence: Sequence<Value>) -> Self {
        Self::Sequence(sequence)
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(boolean) => write!(formatter, "{boolean}"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Text(text) => formatter.write_str(text),
            Self::Sequence(sequence) => write!(formatter, "{sequence}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
