#![cfg(feature = "array")]
//! Unit tests for Stack.

use std::collections::VecDeque;

use rbcollections::array::DynamicArray;
use rbcollections::stack::{BackSequence, Stack};
use rstest::rstest;

#[rstest]
fn test_push_pop_scenario() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(stack.pop(), Ok(3));
    assert_eq!(stack.top(), Some(&2));
    assert_eq!(stack.len(), 2);
}

#[rstest]
fn test_pop_empty_reports_operation() {
    let mut stack: Stack<i32> = Stack::new();
    let error = stack.pop().unwrap_err();
    assert_eq!(error.operation, "Stack::pop");
    assert_eq!(error.length, 0);
}

#[rstest]
fn test_top_of_empty_is_none() {
    let stack: Stack<char, Vec<char>> = Stack::default();
    assert_eq!(stack.top(), None);
    assert!(stack.is_empty());
}

#[rstest]
fn test_default_container_grows_like_dynamic_array() {
    let stack: Stack<i32> = (0..5).collect();
    let container: DynamicArray<i32> = stack.into_inner();
    assert_eq!(container.capacity(), 8);
    assert_eq!(container.as_slice(), &[0, 1, 2, 3, 4]);
}

#[rstest]
#[case(vec![1, 2, 3], Some(3))]
#[case(vec![], None)]
fn test_from_container_top(#[case] values: Vec<i32>, #[case] expected: Option<i32>) {
    let stack = Stack::from_container(VecDeque::from(values));
    assert_eq!(stack.top().copied(), expected);
}

#[rstest]
fn test_generic_over_containers() {
    fn drain<S: BackSequence<i32>>(mut stack: Stack<i32, S>) -> Vec<i32> {
        let mut popped = Vec::new();
        while let Ok(value) = stack.pop() {
            popped.push(value);
        }
        popped
    }

    let values = [1, 2, 3];
    let on_array: Stack<i32> = values.into_iter().collect();
    let on_vec: Stack<i32, Vec<i32>> = values.into_iter().collect();
    let on_deque: Stack<i32, VecDeque<i32>> = values.into_iter().collect();
    assert_eq!(drain(on_array), vec![3, 2, 1]);
    assert_eq!(drain(on_vec), vec![3, 2, 1]);
    assert_eq!(drain(on_deque), vec![3, 2, 1]);
}

#[rstest]
fn test_clone_is_independent() {
    let mut original: Stack<String> = Stack::new();
    original.push("base".to_string());
    let mut copy = original.clone();
    copy.push("extra".to_string());
    assert_eq!(original.len(), 1);
    assert_eq!(copy.len(), 2);
    assert!(original < copy);
}
