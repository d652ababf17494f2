//! Integration tests for the sorted set
//!
//! Ordering, uniqueness, and teardown through the public API.

use cards_foundation::{AddKey, SortedSet};
use proptest::prelude::*;

fn key(s: &str) -> Box<[u8]> {
    s.as_bytes().into()
}

fn keys_of<T>(set: &SortedSet<T>) -> Vec<Vec<u8>> {
    let mut keys = Vec::new();
    set.apply(|key, _| keys.push(key.to_vec()));
    keys
}

// =============================================================================
// Basic behavior
// =============================================================================

#[test]
fn empty_set() {
    let set: SortedSet<()> = SortedSet::with_seed(1);
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(set.lookup(b"anything").is_none());
    assert_eq!(set.iter().count(), 0);
}

#[test]
fn lookup_returns_stored_key_and_data() {
    let mut set = SortedSet::with_seed(7);
    set.add_key(key("berries"), 2).unwrap();
    set.add_key(key("scone"), 1).unwrap();

    let entry = set.lookup(b"scone").unwrap();
    assert_eq!(entry.key, b"scone");
    assert_eq!(*entry.data, 1);
    assert!(set.contains(b"berries"));
    assert!(!set.contains(b"berrie"));
}

#[test]
fn lookup_mut_updates_data() {
    let mut set = SortedSet::with_seed(7);
    set.add_key(key("count"), 1).unwrap();
    *set.lookup_mut(b"count").unwrap() += 41;
    assert_eq!(set.lookup(b"count").map(|e| *e.data), Some(42));
}

#[test]
fn duplicate_hands_back_key_and_data() {
    let mut set = SortedSet::with_seed(3);
    assert!(set.add_key(key("tea"), "first").unwrap().is_unique());
    let outcome = set.add_key(key("tea"), "second").unwrap();
    assert_eq!(
        outcome,
        AddKey::Duplicate {
            key: key("tea"),
            data: "second"
        }
    );
    assert_eq!(set.len(), 1);
    assert_eq!(*set.lookup(b"tea").unwrap().data, "first");
}

#[test]
fn prefix_keys_sort_first() {
    for order in [["card", "cards", "car"], ["cards", "car", "card"]] {
        let mut set = SortedSet::with_seed(11);
        for k in order {
            set.add_key(key(k), ()).unwrap();
        }
        assert_eq!(
            keys_of(&set),
            vec![b"car".to_vec(), b"card".to_vec(), b"cards".to_vec()]
        );
    }
}

#[test]
fn empty_key_sorts_before_everything() {
    let mut set = SortedSet::with_seed(5);
    set.add_key(key("a"), ()).unwrap();
    set.add_key(key(""), ()).unwrap();
    assert_eq!(keys_of(&set), vec![b"".to_vec(), b"a".to_vec()]);
    assert!(set.contains(b""));
}

#[test]
fn bytes_compare_unsigned() {
    let mut set = SortedSet::with_seed(5);
    set.add_key(Box::from(&b"\xff"[..]), ()).unwrap();
    set.add_key(Box::from(&b"\x01"[..]), ()).unwrap();
    set.add_key(Box::from(&b"\x7f"[..]), ()).unwrap();
    assert_eq!(
        keys_of(&set),
        vec![b"\x01".to_vec(), b"\x7f".to_vec(), b"\xff".to_vec()]
    );
}

#[test]
fn apply_and_destroy_hands_over_keys_in_order() {
    let mut set = SortedSet::with_seed(9);
    for (i, k) in ["pear", "apple", "fig"].into_iter().enumerate() {
        set.add_key(key(k), i).unwrap();
    }
    let mut seen = Vec::new();
    set.apply_and_destroy(|key, data| seen.push((key, data)));
    assert_eq!(seen, vec![(key("apple"), 1), (key("fig"), 2), (key("pear"), 0)]);
}

#[test]
fn into_keys_keeps_keys_only() {
    let mut set = SortedSet::with_seed(9);
    set.add_key(key("b"), vec![1, 2, 3]).unwrap();
    set.add_key(key("a"), vec![]).unwrap();
    assert_eq!(set.into_keys(), vec![key("a"), key("b")]);
}

#[test]
fn dot_dump_lists_every_level() {
    let mut set = SortedSet::with_seed(2);
    for k in ["x", "y", "z"] {
        set.add_key(key(k), ()).unwrap();
    }
    let dot = set.to_dot();
    assert!(dot.starts_with("digraph dump {\n"));
    assert!(dot.contains("\"root 0\" -> \"x 0\""));
    assert!(dot.contains("\"z 0\" -> \"tail 0\""));
    for level in 0..set.levels() {
        assert!(dot.contains(&format!("\"root {level}\"")));
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn traversal_is_strictly_ascending(
        keys in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..12), 0..200),
        seed in any::<u64>(),
    ) {
        let mut set = SortedSet::with_seed(seed);
        for k in &keys {
            set.add_key(k.clone().into_boxed_slice(), ()).unwrap();
        }
        let traversed = keys_of(&set);
        prop_assert!(traversed.windows(2).all(|w| w[0] < w[1]));

        let mut expected = keys.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(traversed, expected);
    }

    #[test]
    fn re_adding_is_always_duplicate(
        keys in prop::collection::btree_set("[a-z]{0,6}", 1..60),
        seed in any::<u64>(),
    ) {
        let mut set = SortedSet::with_seed(seed);
        for (i, k) in keys.iter().enumerate() {
            prop_assert!(set.add_key(key(k), i).unwrap().is_unique());
        }
        let len = set.len();
        for (i, k) in keys.iter().enumerate() {
            let outcome = set.add_key(key(k), usize::MAX).unwrap();
            prop_assert!(!outcome.is_unique());
            prop_assert_eq!(set.len(), len);
            prop_assert_eq!(set.lookup(k.as_bytes()).map(|e| *e.data), Some(i));
        }
    }
}
