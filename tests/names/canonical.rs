//! Canonical key collisions

use cards_foundation::Handle;
use cards_names::{NameSet, NameType, canonicalize};
use proptest::prelude::*;
use unicode_normalization::UnicodeNormalization;

#[test]
fn case_variants_collide() {
    let mut names = NameSet::new();
    assert!(names.add("Ancient Scone", NameType::Card, Handle::new(1, 0)).unwrap());
    assert!(!names.add("ANCIENT SCONE", NameType::Card, Handle::new(2, 0)).unwrap());
    assert!(!names.add("ancient scone", NameType::Ability, Handle::new(3, 0)).unwrap());
    assert_eq!(names.len(), 1);

    let name = names.lookup(b"aNcIeNt sCoNe").unwrap();
    assert_eq!(name.display(), "Ancient Scone");
    assert_eq!(name.owner(), Handle::new(1, 0));
}

#[test]
fn composed_and_decomposed_spellings_collide() {
    let mut names = NameSet::new();
    assert!(names.add("\u{c9}toile", NameType::Subtype, Handle::new(1, 0)).unwrap());
    assert!(!names.add("E\u{301}toile", NameType::Subtype, Handle::new(2, 0)).unwrap());
    assert!(names.lookup("e\u{301}TOILE".as_bytes()).is_some());
}

#[test]
fn non_utf8_bytes_name_nothing() {
    let mut names = NameSet::new();
    names.add("scone", NameType::Card, Handle::new(1, 0)).unwrap();
    assert!(names.lookup(b"sc\xffone").is_none());
}

fn mixed_case(word: &str, mask: &[bool]) -> String {
    word.chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn any_casing_finds_the_same_name(
        word in "[a-z\u{e0}-\u{ef} ]{1,20}",
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let mut names = NameSet::new();
        prop_assert!(names.add(&word, NameType::Card, Handle::new(9, 0)).unwrap());

        let variant = mixed_case(&word, &mask);
        prop_assert!(!names.add(&variant, NameType::Card, Handle::new(10, 0)).unwrap());
        let found = names.lookup(variant.as_bytes()).map(|n| n.owner());
        prop_assert_eq!(found, Some(Handle::new(9, 0)));
    }

    #[test]
    fn normalization_form_never_matters(word in "([a-zA-Z][\u{300}-\u{308}]{0,2}){1,12}") {
        let decomposed: String = word.nfd().collect();
        let composed: String = word.nfc().collect();
        prop_assert_eq!(canonicalize(&decomposed), canonicalize(&composed));
    }
}
