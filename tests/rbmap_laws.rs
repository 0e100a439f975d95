//! Property-based tests for RbMap.
//!
//! Random operation sequences are replayed against both an `RbMap` and a
//! `BTreeMap` model. After every step the two must agree, and the red-black
//! invariants must hold.

use proptest::prelude::*;
use rbmap::{RbMap, ReverseOrder};
use std::collections::BTreeMap;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Operation {
    Insert(u8, i32),
    Erase(u8),
    IndexAccess(u8),
    EraseFirst,
    EraseLast,
    Clear,
}

/// Small keys so that sequences hit duplicates and erase present keys.
fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        6 => (any::<u8>(), any::<i32>()).prop_map(|(key, value)| Operation::Insert(key, value)),
        4 => any::<u8>().prop_map(Operation::Erase),
        2 => any::<u8>().prop_map(Operation::IndexAccess),
        1 => Just(Operation::EraseFirst),
        1 => Just(Operation::EraseLast),
        1 => Just(Operation::Clear),
    ]
}

fn arbitrary_map(max_size: usize) -> impl Strategy<Value = RbMap<i32, i32>> {
    prop::collection::vec((any::<i32>(), any::<i32>()), 0..max_size)
        .prop_map(|entries| entries.into_iter().collect::<RbMap<i32, i32>>())
}

fn apply(map: &mut RbMap<u8, i32>, model: &mut BTreeMap<u8, i32>, operation: &Operation) {
    match *operation {
        Operation::Insert(key, value) => {
            let expected = !model.contains_key(&key);
            model.entry(key).or_insert(value);
            let (position, inserted) = map.insert(key, value);
            assert_eq!(inserted, expected);
            assert_eq!(map.entry_at(position), Ok((&key, &model[&key])));
        }
        Operation::Erase(key) => {
            let position = map.find(&key);
            match model.remove(&key) {
                Some(value) => assert_eq!(map.erase(position), Ok((key, value))),
                None => assert!(position.is_end()),
            }
        }
        Operation::IndexAccess(key) => {
            let expected = *model.entry(key).or_default();
            assert_eq!(*map.get_or_insert_default(key), expected);
        }
        Operation::EraseFirst => {
            let begin = map.begin();
            match model.pop_first() {
                Some(entry) => assert_eq!(map.erase(begin), Ok(entry)),
                None => assert!(map.erase(begin).is_err()),
            }
        }
        Operation::EraseLast => {
            let last = map.prev_position(map.end());
            match model.pop_last() {
                Some(entry) => assert_eq!(map.erase(last.unwrap()), Ok(entry)),
                None => assert!(last.is_err()),
            }
        }
        Operation::Clear => {
            map.clear();
            model.clear();
        }
    }
}

// =============================================================================
// Model Laws
// =============================================================================

proptest! {
    /// Law: every operation sequence leaves the map equal to the model and
    /// the tree balanced.
    #[test]
    fn prop_matches_btreemap_model(operations in prop::collection::vec(operation(), 0..200)) {
        let mut map = RbMap::new();
        let mut model = BTreeMap::new();

        for operation in &operations {
            apply(&mut map, &mut model, operation);
            prop_assert_eq!(map.check_invariants(), Ok(()));
            prop_assert_eq!(map.len(), model.len());
        }

        let entries: Vec<(u8, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
        let expected: Vec<(u8, i32)> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }

    /// Law: a full cursor walk visits exactly `len` entries in strictly
    /// increasing order, forwards and backwards.
    #[test]
    fn prop_cursor_walk_is_sorted(map in arbitrary_map(100)) {
        let mut cursor = map.cursor_front();
        let mut forward = Vec::new();
        while let Ok(key) = cursor.key() {
            forward.push(*key);
            cursor.move_next().unwrap();
        }
        prop_assert!(forward.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(forward.len(), map.len());

        let mut backward: Vec<i32> = map.iter().rev().map(|(key, _)| *key).collect();
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    /// Law: len equals successful inserts minus successful erases.
    #[test]
    fn prop_len_counts_successful_operations(
        inserted in prop::collection::vec(any::<i16>(), 0..100),
        erased in prop::collection::vec(any::<i16>(), 0..100)
    ) {
        let mut map = RbMap::new();
        let mut balance = 0_usize;
        for key in inserted {
            if map.insert(key, ()).1 {
                balance += 1;
            }
        }
        for key in erased {
            if map.erase(map.find(&key)).is_ok() {
                balance -= 1;
            }
        }
        prop_assert_eq!(map.len(), balance);
        prop_assert_eq!(map.iter().count(), balance);
    }
}

// =============================================================================
// Lookup Laws
// =============================================================================

proptest! {
    /// Law: a duplicate insert changes nothing and points at the existing
    /// entry.
    #[test]
    fn prop_duplicate_insert_is_identity(map in arbitrary_map(50), value: i32) {
        let mut map = map;
        if let Some((&key, &original)) = map.first_key_value() {
            let before = map.clone();
            let existing = map.find(&key);
            let (position, inserted) = map.insert(key, value);
            prop_assert!(!inserted);
            prop_assert_eq!(position, existing);
            prop_assert_eq!(map.get(&key), Some(&original));
            prop_assert_eq!(map, before);
        }
    }

    /// Law: after erasing a key, lookup gives end and count gives zero.
    #[test]
    fn prop_erase_lookup_consistency(map in arbitrary_map(50), index: prop::sample::Index) {
        let mut map = map;
        prop_assume!(!map.is_empty());
        let key = *map.keys().nth(index.index(map.len())).unwrap();
        let before = map.len();

        map.erase(map.find(&key)).unwrap();

        prop_assert_eq!(map.find(&key), map.end());
        prop_assert_eq!(map.count(&key), 0);
        prop_assert_eq!(map.len(), before - 1);
        prop_assert_eq!(map.check_invariants(), Ok(()));
    }

    /// Law: value-at fails exactly when the key is absent.
    #[test]
    fn prop_at_agrees_with_get(map in arbitrary_map(50), key: i32) {
        prop_assert_eq!(map.at(&key).ok(), map.get(&key));
    }
}

// =============================================================================
// Copy Laws
// =============================================================================

proptest! {
    /// Law: mutating a clone leaves the original untouched.
    #[test]
    fn prop_clone_is_deep(map in arbitrary_map(50), extra in prop::collection::vec(any::<i32>(), 1..20)) {
        let snapshot: Vec<(i32, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
        let mut copy = map.clone();
        for key in extra {
            copy.insert(key, 0);
            copy.remove(&key.wrapping_add(1));
        }
        for value in copy.values_mut() {
            *value = value.wrapping_add(1);
        }

        let after: Vec<(i32, i32)> = map.iter().map(|(key, value)| (*key, *value)).collect();
        prop_assert_eq!(snapshot, after);
        prop_assert_eq!(copy.check_invariants(), Ok(()));
    }

    /// Law: a reverse-ordered map yields the same entries in reverse.
    #[test]
    fn prop_reverse_order_reverses(map in arbitrary_map(50)) {
        let reversed: RbMap<i32, i32, ReverseOrder> =
            map.iter().map(|(key, value)| (*key, *value)).collect();
        let forward: Vec<(&i32, &i32)> = map.iter().collect();
        let mut backward: Vec<(&i32, &i32)> = reversed.iter().collect();
        backward.reverse();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(reversed.check_invariants(), Ok(()));
    }
}
