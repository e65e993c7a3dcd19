#![cfg(feature = "tree")]
//! Property-based tests for OrderedMap.
//!
//! `BTreeMap` serves as the oracle for every observable result.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rbcollections::map::OrderedMap;

fn entries() -> impl Strategy<Value = Vec<(i16, i32)>> {
    prop::collection::vec((any::<i16>(), any::<i32>()), 0..120)
}

// =============================================================================
// Construction Laws
// =============================================================================

proptest! {
    /// Law: building from pairs keeps the first value seen for each key.
    #[test]
    fn prop_from_iter_keeps_first_occurrence(pairs in entries()) {
        let map: OrderedMap<i16, i32> = pairs.iter().copied().collect();
        let mut oracle = BTreeMap::new();
        for (key, value) in &pairs {
            oracle.entry(*key).or_insert(*value);
        }
        prop_assert!(map.iter().eq(oracle.iter()));
        prop_assert!(map.check_invariants().is_ok());
    }

    /// Law: insert_or_assign behaves like BTreeMap::insert.
    #[test]
    fn prop_insert_or_assign_matches_btreemap(pairs in entries()) {
        let mut map = OrderedMap::new();
        let mut oracle = BTreeMap::new();
        for (key, value) in pairs {
            prop_assert_eq!(map.insert_or_assign(key, value), oracle.insert(key, value));
        }
        prop_assert_eq!(map.len(), oracle.len());
        prop_assert!(map.iter().eq(oracle.iter()));
    }

    /// Law: keys come out strictly increasing.
    #[test]
    fn prop_keys_strictly_increasing(pairs in entries()) {
        let map: OrderedMap<i16, i32> = pairs.into_iter().collect();
        let keys: Vec<i16> = map.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

// =============================================================================
// Lookup and Removal Laws
// =============================================================================

proptest! {
    /// Law: removal agrees with the oracle and preserves the invariants.
    #[test]
    fn prop_remove_matches_btreemap(
        pairs in entries(),
        removals in prop::collection::vec(any::<i16>(), 0..60)
    ) {
        let mut map: OrderedMap<i16, i32> = pairs.iter().copied().collect();
        let mut oracle: BTreeMap<i16, i32> = BTreeMap::new();
        for (key, value) in &pairs {
            oracle.entry(*key).or_insert(*value);
        }
        for key in &removals {
            prop_assert_eq!(map.remove(key), oracle.remove(key));
            prop_assert!(map.check_invariants().is_ok());
        }
        prop_assert!(map.iter().eq(oracle.iter()));
    }

    /// Law: count is 1 for present keys and 0 otherwise.
    #[test]
    fn prop_count_is_zero_or_one(pairs in entries(), probe in any::<i16>()) {
        let map: OrderedMap<i16, i32> = pairs.iter().copied().collect();
        let present = pairs.iter().any(|(key, _)| *key == probe);
        prop_assert_eq!(map.count(&probe), usize::from(present));
        prop_assert_eq!(map.contains_key(&probe), present);
    }

    /// Law: range agrees with BTreeMap::range for half-open bounds.
    #[test]
    fn prop_range_matches_btreemap(pairs in entries(), low in any::<i16>(), span in 0..2000i16) {
        let high = low.saturating_add(span);
        let map: OrderedMap<i16, i32> = pairs.iter().copied().collect();
        let oracle: BTreeMap<i16, i32> = map.iter().map(|(key, value)| (*key, *value)).collect();
        prop_assert!(map.range(low..high).eq(oracle.range(low..high)));
    }

    /// Law: equal_range spans at most one element.
    #[test]
    fn prop_equal_range_width(pairs in entries(), probe in any::<i16>()) {
        let map: OrderedMap<i16, i32> = pairs.into_iter().collect();
        let (first, last) = map.equal_range(&probe);
        if map.contains_key(&probe) {
            prop_assert_eq!(map.next_position(first), last);
        } else {
            prop_assert_eq!(first, last);
        }
    }
}

// =============================================================================
// Entry Laws
// =============================================================================

proptest! {
    /// Law: counting through the entry API matches a BTreeMap tally.
    #[test]
    fn prop_entry_tally(words in prop::collection::vec(0..20u8, 0..200)) {
        let mut map: OrderedMap<u8, usize> = OrderedMap::new();
        let mut oracle: BTreeMap<u8, usize> = BTreeMap::new();
        for word in words {
            *map.entry(word).or_insert(0) += 1;
            *oracle.entry(word).or_insert(0) += 1;
        }
        prop_assert!(map.iter().eq(oracle.iter()));
    }
}
