//! Fallible sequence operations over dynamically typed values.
//!
//! Each operation here takes [`Value`] arguments, checks that every
//! argument required to be a sequence actually is one, and only then runs
//! the corresponding [`Sequence`](crate::sequence::Sequence) algorithm.
//! A non-sequence argument produces
//! [`SequenceError::NotASequence`](crate::error::SequenceError) naming the
//! operation, the argument, and the kind that was found; no operation ever
//! coerces a scalar into a one-element sequence.
//!
//! # Examples
//!
//! ```rust
//! use conseq::ops;
//! use conseq::value::Value;
//!
//! let numbers = Value::sequence([Value::from(1), Value::from(2)]);
//! assert_eq!(ops::count(&numbers).unwrap(), 2);
//!
//! let error = ops::count(&Value::from(42)).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "`count`: expected a sequence for `sequence`, found integer"
//! );
//! ```

use crate::error::{NotASequenceError, SequenceError};
use crate::sequence::Sequence;
use crate::value::Value;

// =============================================================================
// Argument Validation
// =============================================================================

/// Borrows the sequence inside `value`, or reports which operation found
/// which kind in its place.
fn expect_sequence<'a>(
    operation: &'static str,
    argument: &'static str,
    value: &'a Value,
) -> Result<&'a Sequence<Value>, SequenceError> {
    value.as_sequence().ok_or_else(|| {
        SequenceError::NotASequence(NotASequenceError {
            operation,
            argument,
            found: value.kind(),
        })
    })
}

// =============================================================================
// Operations
// =============================================================================

/// Joins two sequences end to end.
///
/// Returns a sequence holding every element of `first` followed by every
/// element of `second`. Appending an empty sequence on either side yields
/// the other side unchanged.
///
/// Both arguments must be sequences. They are checked in order, so when
/// both are scalars the error names `first`.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `first` or `second` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let front = Value::sequence([Value::from(1), Value::from(2)]);
/// let back = Value::sequence([Value::from(3)]);
/// let combined = ops::append(&front, &back).unwrap();
/// assert_eq!(
///     combined,
///     Value::sequence([Value::from(1), Value::from(2), Value::from(3)])
/// );
///
/// let error = ops::append(&front, &Value::from(3)).unwrap_err();
/// assert_eq!(
///     error.to_string(),
///     "`append`: expected a sequence for `second`, found integer"
/// );
/// ```
pub fn append(first: &Value, second: &Value) -> Result<Value, SequenceError> {
    let first_elements = expect_sequence("append", "first", first)?;
    let second_elements = expect_sequence("append", "second", second)?;
    Ok(Value::Sequence(first_elements.append(second_elements)))
}

/// Flattens a sequence of sequences by one level.
///
/// The result contains, in order, every element of every inner sequence.
/// Empty inner sequences contribute nothing, and an empty outer sequence
/// flattens to the empty sequence. Only one level is removed: elements of
/// the inner sequences are carried over as they are, nested or not.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `nested` is not a sequence.
///
/// # Panics
///
/// Panics if an element of `nested` is not itself a sequence. The argument
/// is a sequence of sequences by contract; a scalar among its elements is
/// a structural violation, not a recoverable condition.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let nested = Value::sequence([
///     Value::sequence([Value::from(1), Value::from(2)]),
///     Value::sequence([]),
///     Value::sequence([Value::from(3)]),
/// ]);
/// let flattened = ops::concatenate(&nested).unwrap();
/// assert_eq!(
///     flattened,
///     Value::sequence([Value::from(1), Value::from(2), Value::from(3)])
/// );
/// ```
pub fn concatenate(nested: &Value) -> Result<Value, SequenceError> {
    let outer = expect_sequence("concatenate", "nested", nested)?;

    let mut inner_sequences = Vec::with_capacity(outer.len());
    for element in outer {
        let Some(inner) = element.as_sequence() else {
            panic!(
                "`concatenate`: every element of `nested` must be a sequence, found {}",
                element.kind()
            );
        };
        inner_sequences.push(inner.clone());
    }

    let nested_sequences: Sequence<Sequence<Value>> = inner_sequences.into_iter().collect();
    Ok(Value::Sequence(nested_sequences.concat()))
}

/// Keeps exactly the elements for which the predicate returns `true`, in
/// their original order.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `sequence` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let mixed = Value::sequence([Value::from(1), Value::from("two"), Value::from(3)]);
/// let integers = ops::filter(&mixed, |element| {
///     matches!(element, Value::Integer(_))
/// })
/// .unwrap();
/// assert_eq!(integers, Value::sequence([Value::from(1), Value::from(3)]));
/// ```
pub fn filter<P>(sequence: &Value, predicate: P) -> Result<Value, SequenceError>
where
    P: FnMut(&Value) -> bool,
{
    let elements = expect_sequence("filter", "sequence", sequence)?;
    Ok(Value::Sequence(elements.filter(predicate)))
}

/// Counts the elements of a sequence.
///
/// The count is computed by walking the sequence cell by cell with a
/// running total. The empty sequence counts zero, and nested sequences
/// count as one element each.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `sequence` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let letters = Value::sequence([Value::from("a"), Value::from("b")]);
/// assert_eq!(ops::count(&letters).unwrap(), 2);
/// assert_eq!(ops::count(&Value::sequence([])).unwrap(), 0);
/// ```
pub fn count(sequence: &Value) -> Result<usize, SequenceError> {
    let elements = expect_sequence("count", "sequence", sequence)?;

    let mut total = 0;
    for _element in elements {
        total += 1;
    }
    Ok(total)
}

/// Applies a transform to every element, producing a new sequence of the
/// results in the same order.
///
/// The result always has as many elements as the input.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `sequence` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let numbers = Value::sequence([Value::from(1), Value::from(2)]);
/// let doubled = ops::map(&numbers, |element| match element {
///     Value::Integer(number) => Value::Integer(number * 2),
///     other => other.clone(),
/// })
/// .unwrap();
/// assert_eq!(doubled, Value::sequence([Value::from(2), Value::from(4)]));
/// ```
pub fn map<F>(sequence: &Value, transform: F) -> Result<Value, SequenceError>
where
    F: FnMut(&Value) -> Value,
{
    let elements = expect_sequence("map", "sequence", sequence)?;
    Ok(Value::Sequence(elements.map(transform)))
}

/// Reduces a sequence left to right.
///
/// The first element is combined with `initial`, each later element with
/// the prior result. The combining function receives the element first and
/// the accumulator second; [`fold_right`] uses the same order.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `sequence` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let numbers = Value::sequence([Value::from(1), Value::from(2), Value::from(3)]);
/// let rendered = ops::fold_left(&numbers, String::new(), |element, accumulator| {
///     format!("{accumulator}{element}")
/// })
/// .unwrap();
/// assert_eq!(rendered, "123");
/// ```
pub fn fold_left<A, F>(sequence: &Value, initial: A, combine: F) -> Result<A, SequenceError>
where
    F: FnMut(&Value, A) -> A,
{
    let elements = expect_sequence("fold_left", "sequence", sequence)?;
    Ok(elements.fold_left(initial, combine))
}

/// Reduces a sequence right to left.
///
/// The last element is combined with `initial` first. The combining
/// function receives the element first and the accumulator second, the
/// same order as [`fold_left`], so the two directions differ only in
/// which end they start from.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `sequence` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let numbers = Value::sequence([Value::from(1), Value::from(2), Value::from(3)]);
/// let rendered = ops::fold_right(&numbers, String::new(), |element, accumulator| {
///     format!("{accumulator}{element}")
/// })
/// .unwrap();
/// assert_eq!(rendered, "321");
/// ```
pub fn fold_right<A, F>(sequence: &Value, initial: A, combine: F) -> Result<A, SequenceError>
where
    F: FnMut(&Value, A) -> A,
{
    let elements = expect_sequence("fold_right", "sequence", sequence)?;
    Ok(elements.fold_right(initial, combine))
}

/// Returns a sequence with the elements in opposite order.
///
/// Reversing the empty sequence or a single-element sequence returns it
/// unchanged; reversing twice restores the original.
///
/// # Errors
///
/// Returns [`SequenceError::NotASequence`] if `sequence` is not a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use conseq::ops;
/// use conseq::value::Value;
///
/// let numbers = Value::sequence([Value::from(1), Value::from(2), Value::from(3)]);
/// let reversed = ops::reverse(&numbers).unwrap();
/// assert_eq!(
///     reversed,
///     Value::sequence([Value::from(3), Value::from(2), Value::from(1)])
/// );
/// ```
pub fn reverse(sequence: &Value) -> Result<Value, SequenceError> {
    let elements = expect_sequence("reverse", "sequence", sequence)?;
    Ok(Value::Sequence(elements.reverse()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers(values: &[i64]) -> Value {
        Value::sequence(values.iter().map(|&number| Value::from(number)))
    }

    // =========================================================================
    // append Tests
    // =========================================================================

    #[rstest]
    fn test_append_joins_in_order() {
        let combined = append(&numbers(&[1, 2]), &numbers(&[3, 4])).unwrap();
        assert_eq!(combined, numbers(&[1, 2, 3, 4]));
    }

    #[rstest]
    fn test_append_empty_left_yields_right() {
        let combined = append(&numbers(&[]), &numbers(&[1, 2])).unwrap();
        assert_eq!(combined, numbers(&[1, 2]));
    }

    #[rstest]
    fn test_append_empty_right_yields_left() {
        let combined = append(&numbers(&[1, 2]), &numbers(&[])).unwrap();
        assert_eq!(combined, numbers(&[1, 2]));
    }

    #[rstest]
    fn test_append_rejects_non_sequence_first() {
        let error = append(&Value::from(1), &numbers(&[2])).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`append`: expected a sequence for `first`, found integer"
        );
    }

    #[rstest]
    fn test_append_rejects_non_sequence_second() {
        let error = append(&numbers(&[1]), &Value::from("tail")).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`append`: expected a sequence for `second`, found text"
        );
    }

    #[rstest]
    fn test_append_reports_first_when_both_are_scalars() {
        let error = append(&Value::from(true), &Value::from(1)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`append`: expected a sequence for `first`, found boolean"
        );
    }

    // =========================================================================
    // concatenate Tests
    // =========================================================================

    #[rstest]
    fn test_concatenate_flattens_one_level() {
        let nested = Value::sequence([numbers(&[1, 2]), numbers(&[]), numbers(&[3])]);
        assert_eq!(concatenate(&nested).unwrap(), numbers(&[1, 2, 3]));
    }

    #[rstest]
    fn test_concatenate_empty_outer() {
        assert_eq!(concatenate(&Value::sequence([])).unwrap(), numbers(&[]));
    }

    #[rstest]
    fn test_concatenate_removes_only_one_level() {
        let doubly_nested = Value::sequence([Value::sequence([numbers(&[1])])]);
        assert_eq!(
            concatenate(&doubly_nested).unwrap(),
            Value::sequence([numbers(&[1])])
        );
    }

    #[rstest]
    fn test_concatenate_rejects_non_sequence() {
        let error = concatenate(&Value::from(1)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`concatenate`: expected a sequence for `nested`, found integer"
        );
    }

    #[rstest]
    #[should_panic(expected = "every element of `nested` must be a sequence")]
    fn test_concatenate_panics_on_scalar_element() {
        let malformed = Value::sequence([numbers(&[1]), Value::from(2)]);
        let _ = concatenate(&malformed);
    }

    // =========================================================================
    // filter Tests
    // =========================================================================

    #[rstest]
    fn test_filter_keeps_matching_elements() {
        let kept = filter(&numbers(&[1, 2, 3, 4]), |element| {
            matches!(element, Value::Integer(number) if number % 2 == 0)
        })
        .unwrap();
        assert_eq!(kept, numbers(&[2, 4]));
    }

    #[rstest]
    fn test_filter_keeps_nothing() {
        let kept = filter(&numbers(&[1, 3]), |_| false).unwrap();
        assert_eq!(kept, numbers(&[]));
    }

    #[rstest]
    fn test_filter_keeps_everything() {
        let kept = filter(&numbers(&[1, 3]), |_| true).unwrap();
        assert_eq!(kept, numbers(&[1, 3]));
    }

    #[rstest]
    fn test_filter_by_kind_on_mixed_sequence() {
        let mixed = Value::sequence([
            Value::from(1),
            Value::from("two"),
            Value::from(true),
            Value::from(3),
        ]);
        let integers = filter(&mixed, |element| matches!(element, Value::Integer(_))).unwrap();
        assert_eq!(integers, numbers(&[1, 3]));
    }

    #[rstest]
    fn test_filter_rejects_non_sequence() {
        let error = filter(&Value::from("letters"), |_| true).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`filter`: expected a sequence for `sequence`, found text"
        );
    }

    // =========================================================================
    // count Tests
    // =========================================================================

    #[rstest]
    #[case(numbers(&[]), 0)]
    #[case(numbers(&[1]), 1)]
    #[case(numbers(&[1, 2, 3]), 3)]
    fn test_count(#[case] sequence: Value, #[case] expected: usize) {
        assert_eq!(count(&sequence).unwrap(), expected);
    }

    #[rstest]
    fn test_count_nested_sequences_count_once() {
        let nested = Value::sequence([numbers(&[1, 2, 3]), numbers(&[4, 5])]);
        assert_eq!(count(&nested).unwrap(), 2);
    }

    #[rstest]
    fn test_count_rejects_non_sequence() {
        let error = count(&Value::from(42)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`count`: expected a sequence for `sequence`, found integer"
        );
    }

    // =========================================================================
    // map Tests
    // =========================================================================

    #[rstest]
    fn test_map_transforms_in_order() {
        let doubled = map(&numbers(&[1, 2, 3]), |element| match element {
            Value::Integer(number) => Value::Integer(number * 2),
            other => other.clone(),
        })
        .unwrap();
        assert_eq!(doubled, numbers(&[2, 4, 6]));
    }

    #[rstest]
    fn test_map_empty() {
        let mapped = map(&numbers(&[]), |element| element.clone()).unwrap();
        assert_eq!(mapped, numbers(&[]));
    }

    #[rstest]
    fn test_map_preserves_length() {
        let mapped = map(&numbers(&[1, 2, 3]), |_| Value::from("x")).unwrap();
        assert_eq!(count(&mapped).unwrap(), 3);
    }

    #[rstest]
    fn test_map_can_change_kinds() {
        let rendered = map(&numbers(&[1, 2]), |element| {
            Value::from(format!("#{element}"))
        })
        .unwrap();
        assert_eq!(
            rendered,
            Value::sequence([Value::from("#1"), Value::from("#2")])
        );
    }

    #[rstest]
    fn test_map_rejects_non_sequence() {
        let error = map(&Value::from(false), |element| element.clone()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`map`: expected a sequence for `sequence`, found boolean"
        );
    }

    // =========================================================================
    // fold Tests
    // =========================================================================

    #[rstest]
    fn test_fold_left_runs_left_to_right() {
        let rendered = fold_left(&numbers(&[1, 2, 3]), String::new(), |element, accumulator| {
            format!("{accumulator}{element}")
        })
        .unwrap();
        assert_eq!(rendered, "123");
    }

    #[rstest]
    fn test_fold_right_runs_right_to_left() {
        let rendered = fold_right(&numbers(&[1, 2, 3]), String::new(), |element, accumulator| {
            format!("{accumulator}{element}")
        })
        .unwrap();
        assert_eq!(rendered, "321");
    }

    #[rstest]
    fn test_fold_left_empty_returns_initial() {
        let result = fold_left(&numbers(&[]), 41, |_, accumulator| accumulator + 1).unwrap();
        assert_eq!(result, 41);
    }

    #[rstest]
    fn test_fold_right_empty_returns_initial() {
        let result = fold_right(&numbers(&[]), 41, |_, accumulator| accumulator + 1).unwrap();
        assert_eq!(result, 41);
    }

    #[rstest]
    fn test_folds_agree_for_commutative_combine() {
        let sequence = numbers(&[1, 2, 3, 4]);
        let combine = |element: &Value, accumulator: i64| match element {
            Value::Integer(number) => accumulator + number,
            _ => accumulator,
        };
        assert_eq!(
            fold_left(&sequence, 0, combine).unwrap(),
            fold_right(&sequence, 0, combine).unwrap()
        );
    }

    #[rstest]
    fn test_fold_left_rejects_non_sequence() {
        let error = fold_left(&Value::from(1), 0, |_, accumulator: i64| accumulator).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`fold_left`: expected a sequence for `sequence`, found integer"
        );
    }

    #[rstest]
    fn test_fold_right_rejects_non_sequence() {
        let error = fold_right(&Value::from(1), 0, |_, accumulator: i64| accumulator).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`fold_right`: expected a sequence for `sequence`, found integer"
        );
    }

    // =========================================================================
    // reverse Tests
    // =========================================================================

    #[rstest]
    fn test_reverse() {
        assert_eq!(reverse(&numbers(&[1, 2, 3])).unwrap(), numbers(&[3, 2, 1]));
    }

    #[rstest]
    fn test_reverse_empty() {
        assert_eq!(reverse(&numbers(&[])).unwrap(), numbers(&[]));
    }

    #[rstest]
    fn test_reverse_singleton() {
        assert_eq!(reverse(&numbers(&[7])).unwrap(), numbers(&[7]));
    }

    #[rstest]
    fn test_reverse_twice_restores_original() {
        let original = numbers(&[1, 2, 3]);
        let twice = reverse(&reverse(&original).unwrap()).unwrap();
        assert_eq!(twice, original);
    }

    #[rstest]
    fn test_reverse_rejects_non_sequence() {
        let error = reverse(&Value::from("backwards")).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`reverse`: expected a sequence for `sequence`, found text"
        );
    }

    // =========================================================================
    // Cross-Operation Tests
    // =========================================================================

    #[rstest]
    fn test_operations_leave_inputs_untouched() {
        let original = numbers(&[1, 2, 3]);
        let _ = reverse(&original).unwrap();
        let _ = filter(&original, |_| false).unwrap();
        let _ = map(&original, |_| Value::from(0)).unwrap();
        assert_eq!(original, numbers(&[1, 2, 3]));
    }

    #[rstest]
    fn test_count_of_append_is_sum_of_counts() {
        let first = numbers(&[1, 2]);
        let second = numbers(&[3, 4, 5]);
        let combined = append(&first, &second).unwrap();
        assert_eq!(
            count(&combined).unwrap(),
            count(&first).unwrap() + count(&second).unwrap()
        );
    }
}
