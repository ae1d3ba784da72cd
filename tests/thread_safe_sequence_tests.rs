//! Integration tests for thread-safe sequences.
//!
//! With the `arc` feature enabled the internal reference counter is
//! atomic, so sequences and dynamic values can be shared across threads
//! and every operation can run against the same sequence concurrently.

#![cfg(feature = "arc")]

use conseq::ops;
use conseq::sequence::Sequence;
use conseq::value::Value;
use rstest::rstest;
use std::sync::Arc;
use std::thread;

// =============================================================================
// Structural Sharing Across Threads
// =============================================================================

#[rstest]
fn test_cross_thread_structural_sharing() {
    let original = Arc::new(Sequence::new().cons(3).cons(2).cons(1));

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let sequence_clone = Arc::clone(&original);
            thread::spawn(move || {
                // Each thread derives its own version by prepending
                let extended = sequence_clone.cons(index * 10);
                assert_eq!(extended.head(), Some(&(index * 10)));
                assert_eq!(extended.len(), 4);
                assert_eq!(sequence_clone.len(), 3);
                extended
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for (index, sequence) in results.iter().enumerate() {
        let expected = i32::try_from(index).unwrap() * 10;
        assert_eq!(sequence.head(), Some(&expected));
    }

    // Original should still be unchanged
    assert_eq!(original.len(), 3);
    assert_eq!(original.head(), Some(&1));
}

#[rstest]
fn test_operations_run_concurrently_over_one_sequence() {
    let shared: Arc<Sequence<i64>> = Arc::new((1..=1_000).collect());

    let map_handle = {
        let sequence = Arc::clone(&shared);
        thread::spawn(move || sequence.map(|element| element * 2).len())
    };
    let filter_handle = {
        let sequence = Arc::clone(&shared);
        thread::spawn(move || sequence.filter(|element| element % 2 == 0).len())
    };
    let fold_handle = {
        let sequence = Arc::clone(&shared);
        thread::spawn(move || {
            sequence.fold_left(0, |element, accumulator| accumulator + element)
        })
    };
    let reverse_handle = {
        let sequence = Arc::clone(&shared);
        thread::spawn(move || sequence.reverse().head().copied())
    };

    assert_eq!(map_handle.join().expect("Thread panicked"), 1_000);
    assert_eq!(filter_handle.join().expect("Thread panicked"), 500);
    assert_eq!(fold_handle.join().expect("Thread panicked"), 500_500);
    assert_eq!(reverse_handle.join().expect("Thread panicked"), Some(1_000));

    // The shared input is untouched
    assert_eq!(shared.len(), 1_000);
    assert_eq!(shared.head(), Some(&1));
}

#[rstest]
fn test_folds_agree_across_threads() {
    let shared: Arc<Sequence<i64>> = Arc::new((1..=100).collect());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sequence = Arc::clone(&shared);
            thread::spawn(move || {
                let left = sequence.fold_left(0, |element, accumulator| accumulator + element);
                let right = sequence.fold_right(0, |element, accumulator| accumulator + element);
                (left, right)
            })
        })
        .collect();

    for handle in handles {
        let (left, right) = handle.join().expect("Thread panicked");
        assert_eq!(left, 5_050);
        assert_eq!(right, 5_050);
    }
}

// =============================================================================
// Dynamic Values Across Threads
// =============================================================================

#[rstest]
fn test_value_operations_across_threads() {
    let shared = Arc::new(Value::sequence(
        (1..=100).map(Value::from).collect::<Vec<_>>(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let value = Arc::clone(&shared);
            thread::spawn(move || {
                assert_eq!(ops::count(&value).unwrap(), 100);
                let reversed = ops::reverse(&value).unwrap();
                assert_eq!(ops::count(&reversed).unwrap(), 100);
                ops::fold_left(&value, 0i64, |element, accumulator| match element {
                    Value::Integer(number) => accumulator + number,
                    _ => accumulator,
                })
                .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Thread panicked"), 5_050);
    }
}

// =============================================================================
// Stress Tests
// =============================================================================

#[rstest]
fn test_high_contention_cons_operations() {
    let base = Arc::new(Sequence::<i32>::new());

    // Many threads concurrently derive sequences from the same base
    let handles: Vec<_> = (0..100)
        .map(|index| {
            let sequence = Arc::clone(&base);
            thread::spawn(move || {
                let derived = sequence.cons(index);
                assert_eq!(derived.head(), Some(&index));
                assert_eq!(derived.len(), 1);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Original should still be empty
    assert!(base.is_empty());
}

#[rstest]
fn test_concurrent_drops_of_shared_tails() {
    let base: Arc<Sequence<i32>> = Arc::new((0..10_000).collect());

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let sequence = Arc::clone(&base);
            thread::spawn(move || {
                let derived = sequence.cons(index);
                drop(derived);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(base.len(), 10_000);
    assert_eq!(base.head(), Some(&0));
}
