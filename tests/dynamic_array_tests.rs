#![cfg(feature = "array")]
//! Unit tests for DynamicArray.

use rbcollections::array::DynamicArray;
use rbcollections::error::{ContainerError, LengthError};
use rstest::rstest;

// =============================================================================
// Capacity Tests
// =============================================================================

#[rstest]
fn test_reserve_then_fill_scenario() {
    let mut array: DynamicArray<i32> = DynamicArray::new();
    array.reserve(32).unwrap();
    assert!(array.capacity() >= 32);
    assert_eq!(array.len(), 0);
    for value in 0..32 {
        array.push_back(value);
    }
    assert_eq!(array.capacity(), 32);
    array.push_back(32);
    assert_eq!(array.capacity(), 64);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(3, 4)]
#[case(5, 8)]
#[case(17, 32)]
fn test_capacity_after_pushes(#[case] pushes: usize, #[case] expected: usize) {
    let mut array = DynamicArray::new();
    for value in 0..pushes {
        array.push_back(value);
    }
    assert_eq!(array.capacity(), expected);
}

#[rstest]
fn test_with_capacity_then_from_vec() {
    let array: DynamicArray<u8> = DynamicArray::with_capacity(10);
    assert_eq!(array.capacity(), 10);
    let converted = DynamicArray::from(vec![1, 2, 3]);
    assert_eq!(converted.capacity(), 3);
}

#[rstest]
fn test_length_error_converts_into_container_error() {
    fn fill(array: &mut DynamicArray<u64>) -> Result<(), ContainerError> {
        array.resize(usize::MAX, 0)?;
        Ok(())
    }
    let mut array = DynamicArray::new();
    let error = fill(&mut array).unwrap_err();
    assert_eq!(
        error,
        ContainerError::Length(LengthError {
            operation: "DynamicArray::resize",
            requested: usize::MAX,
            max_size: array.max_size(),
        })
    );
    assert!(array.is_empty());
}

// =============================================================================
// Modifier Tests
// =============================================================================

#[rstest]
fn test_insert_n_in_middle() {
    let mut array: DynamicArray<char> = "ad".chars().collect();
    let index = array.insert_n(1, 2, 'x').unwrap();
    assert_eq!(index, 1);
    assert_eq!(array.as_slice(), &['a', 'x', 'x', 'd']);
}

#[rstest]
fn test_erase_then_insert_restores() {
    let mut array: DynamicArray<i32> = (1..=5).collect();
    let removed = array.erase(2);
    array.insert(2, removed);
    assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5]);
}

#[rstest]
fn test_pop_back_until_empty() {
    let mut array: DynamicArray<i32> = (1..=3).collect();
    let mut popped = Vec::new();
    while let Ok(value) = array.pop_back() {
        popped.push(value);
    }
    assert_eq!(popped, vec![3, 2, 1]);
    assert_eq!(array.capacity(), 3);
}

#[rstest]
fn test_slice_methods_through_deref() {
    let mut array: DynamicArray<i32> = [4, 1, 3].into_iter().collect();
    array.sort_unstable();
    assert_eq!(array.first(), Some(&1));
    assert!(array.contains(&4));
    assert_eq!(&array[1..], &[3, 4]);
}

#[rstest]
fn test_at_mut_edits() {
    let mut array: DynamicArray<String> = ["a", "b"].iter().map(ToString::to_string).collect();
    array.at_mut(1).unwrap().push('!');
    assert_eq!(array[1], "b!");
    assert!(array.at_mut(2).is_err());
}

#[rstest]
fn test_owned_and_borrowed_iteration() {
    let mut array: DynamicArray<i32> = (1..=3).collect();
    for value in &mut array {
        *value *= 10;
    }
    let borrowed: Vec<&i32> = (&array).into_iter().collect();
    assert_eq!(borrowed, vec![&10, &20, &30]);
    let owned: Vec<i32> = array.into_iter().collect();
    assert_eq!(owned, vec![10, 20, 30]);
}
