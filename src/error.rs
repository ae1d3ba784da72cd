//! Error types for the fallible operation layer.
//!
//! Every operation in [`ops`](crate::ops) requires one or more of its
//! arguments to be a sequence. When such an argument is some other kind of
//! value, the operation returns [`SequenceError::NotASequence`] carrying a
//! [`NotASequenceError`] that names the operation, the offending argument,
//! and the kind that was actually found.

use crate::value::ValueKind;

/// Represents an argument that was required to be a sequence but was not.
///
/// Every fallible operation validates its sequence arguments before doing
/// any work; this error identifies exactly which argument of which
/// operation failed that check, and what kind of value was found instead.
///
/// # Examples
///
/// ```rust
/// use conseq::error::NotASequenceError;
/// use conseq::value::ValueKind;
///
/// let error = NotASequenceError {
///     operation: "append",
///     argument: "second",
///     found: ValueKind::Integer,
/// };
/// assert_eq!(
///     format!("{}", error),
///     "`append`: expected a sequence for `second`, found integer"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotASequenceError {
    /// The name of the operation that rejected its argument.
    pub operation: &'static str,
    /// The name of the rejected argument.
    pub argument: &'static str,
    /// The kind of value that was actually passed.
    pub found: ValueKind,
}

impl std::fmt::Display for NotASequenceError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "`{}`: expected a sequence for `{}`, found {}",
            self.operation, self.argument, self.found
        )
    }
}

impl std::error::Error for NotASequenceError {}

/// Represents errors that can occur in the fallible operation layer.
///
/// This enum provides a unified error type for all sequence-operation
/// errors. Currently, it only contains `NotASequence`, but it is designed
/// to be extensible for future error types.
///
/// # Examples
///
/// ```rust
/// use conseq::error::{NotASequenceError, SequenceError};
/// use conseq::value::ValueKind;
///
/// let error = SequenceError::NotASequence(NotASequenceError {
///     operation: "count",
///     argument: "sequence",
///     found: ValueKind::Text,
/// });
/// println!("{}", error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// An argument that must be a sequence was some other kind of value.
    NotASequence(NotASequenceError),
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotASequence(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for SequenceError {}
