#![cfg(feature = "tree")]
//! Property-based tests for OrderedSet.
//!
//! Set algebra is checked against `BTreeSet`, whose iterators produce the
//! same ascending order.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rbcollections::set::OrderedSet;

fn values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-40..40i32, 0..60)
}

fn both(values: &[i32]) -> (OrderedSet<i32>, BTreeSet<i32>) {
    (values.iter().copied().collect(), values.iter().copied().collect())
}

// =============================================================================
// Set Algebra Laws
// =============================================================================

proptest! {
    /// Law: union matches BTreeSet::union.
    #[test]
    fn prop_union_matches_btreeset(left in values(), right in values()) {
        let (set_left, oracle_left) = both(&left);
        let (set_right, oracle_right) = both(&right);
        prop_assert!(set_left.union(&set_right).eq(oracle_left.union(&oracle_right)));
    }

    /// Law: intersection matches BTreeSet::intersection.
    #[test]
    fn prop_intersection_matches_btreeset(left in values(), right in values()) {
        let (set_left, oracle_left) = both(&left);
        let (set_right, oracle_right) = both(&right);
        prop_assert!(
            set_left.intersection(&set_right).eq(oracle_left.intersection(&oracle_right))
        );
    }

    /// Law: difference matches BTreeSet::difference.
    #[test]
    fn prop_difference_matches_btreeset(left in values(), right in values()) {
        let (set_left, oracle_left) = both(&left);
        let (set_right, oracle_right) = both(&right);
        prop_assert!(set_left.difference(&set_right).eq(oracle_left.difference(&oracle_right)));
    }

    /// Law: symmetric difference matches BTreeSet::symmetric_difference.
    #[test]
    fn prop_symmetric_difference_matches_btreeset(left in values(), right in values()) {
        let (set_left, oracle_left) = both(&left);
        let (set_right, oracle_right) = both(&right);
        prop_assert!(
            set_left
                .symmetric_difference(&set_right)
                .eq(oracle_left.symmetric_difference(&oracle_right))
        );
    }

    /// Law: subset, superset and disjointness agree with the oracle.
    #[test]
    fn prop_relations_match_btreeset(left in values(), right in values()) {
        let (set_left, oracle_left) = both(&left);
        let (set_right, oracle_right) = both(&right);
        prop_assert_eq!(set_left.is_subset(&set_right), oracle_left.is_subset(&oracle_right));
        prop_assert_eq!(set_left.is_superset(&set_right), oracle_left.is_superset(&oracle_right));
        prop_assert_eq!(set_left.is_disjoint(&set_right), oracle_left.is_disjoint(&oracle_right));
    }
}

// =============================================================================
// Positional Laws
// =============================================================================

proptest! {
    /// Law: erasing [lower_bound(low), lower_bound(high)) removes exactly
    /// the elements in low..high.
    #[test]
    fn prop_erase_range_matches_retain(input in values(), low in -50..50i32, span in 0..60i32) {
        let high = low + span;
        let (mut set, mut oracle) = both(&input);
        let first = set.lower_bound(&low);
        let last = set.lower_bound(&high);
        let returned = set.erase_range(first, last);
        oracle.retain(|value| !(low..high).contains(value));
        prop_assert!(set.iter().eq(oracle.iter()));
        prop_assert_eq!(set.get_at(returned), oracle.range(high..).next());
        prop_assert!(set.check_invariants().is_ok());
    }

    /// Law: relational operators agree with BTreeSet's lexicographic order.
    #[test]
    fn prop_ordering_matches_btreeset(left in values(), right in values()) {
        let (set_left, oracle_left) = both(&left);
        let (set_right, oracle_right) = both(&right);
        prop_assert_eq!(set_left.cmp(&set_right), oracle_left.cmp(&oracle_right));
        prop_assert_eq!(set_left == set_right, oracle_left == oracle_right);
    }
}
