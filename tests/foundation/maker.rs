//! Integration tests for the sorted set maker
//!
//! The maker must build a set indistinguishable from incremental inserts.

use cards_foundation::{SortedSet, SortedSetMaker};
use proptest::prelude::*;

fn build_both(keys: &[String]) -> (SortedSet<usize>, SortedSet<usize>) {
    let mut maker = SortedSetMaker::new(keys.len()).unwrap();
    let mut incremental = SortedSet::with_seed(17);
    for (i, key) in keys.iter().enumerate() {
        let complete = maker.add_key(key.as_bytes().into(), i);
        assert_eq!(complete, i + 1 == keys.len());
        incremental.add_key(key.as_bytes().into(), i).unwrap();
    }
    (maker.finalize(), incremental)
}

fn entries(set: &SortedSet<usize>) -> Vec<(Vec<u8>, usize)> {
    set.iter().map(|e| (e.key.to_vec(), *e.data)).collect()
}

#[test]
fn single_key() {
    let (made, _) = build_both(&["only".to_string()]);
    assert_eq!(made.len(), 1);
    assert_eq!(made.levels(), 1);
    assert_eq!(made.lookup(b"only").map(|e| *e.data), Some(0));
}

#[test]
fn made_set_accepts_further_inserts() {
    let keys: Vec<String> = (0..10).map(|i| format!("k{i:02}")).collect();
    let (mut made, _) = build_both(&keys);
    assert!(made.add_key(b"k05a".as_slice().into(), 99).unwrap().is_unique());
    assert!(!made.add_key(b"k05".as_slice().into(), 0).unwrap().is_unique());
    assert_eq!(made.len(), 11);
    let found: Vec<Vec<u8>> = made.iter().map(|e| e.key.to_vec()).collect();
    assert!(found.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unfinished_maker_returns_keys() {
    let mut maker = SortedSetMaker::new(4).unwrap();
    maker.add_key(b"a".as_slice().into(), ());
    maker.add_key(b"b".as_slice().into(), ());
    assert!(!maker.is_complete());
    let keys = maker.into_keys();
    assert_eq!(keys, vec![Box::<[u8]>::from(&b"a"[..]), Box::from(&b"b"[..])]);
}

#[test]
#[should_panic(expected = "ascending")]
fn out_of_order_key_panics() {
    let mut maker = SortedSetMaker::new(2).unwrap();
    maker.add_key(b"b".as_slice().into(), ());
    maker.add_key(b"a".as_slice().into(), ());
}

proptest! {
    #[test]
    fn maker_matches_incremental(
        keys in prop::collection::btree_set("[a-z0-9]{0,8}", 0..300),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (made, incremental) = build_both(&keys);

        prop_assert_eq!(made.len(), incremental.len());
        prop_assert_eq!(entries(&made), entries(&incremental));
        for key in &keys {
            prop_assert_eq!(
                made.lookup(key.as_bytes()).map(|e| *e.data),
                incremental.lookup(key.as_bytes()).map(|e| *e.data)
            );
        }
        prop_assert!(made.lookup(b"not-a-generated-key").is_none());
    }
}
