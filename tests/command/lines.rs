//! Complete and partial command lines

use cards_command::{Keyword, ParticleKind, ParticleValue};

use crate::{kinds, lex_chunks, names, rendered};

#[test]
fn unknown_word() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"word\n"]);
    assert_eq!(consumed, 5);
    assert_eq!(rendered(&particles), vec!["KEYWORD<word>", "'\\n'"]);
    assert_eq!(particles[0].keyword, None);
}

#[test]
fn two_lines_in_two_chunks() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"SAY\n", b"berries\n"]);
    assert_eq!(consumed, 12);
    assert_eq!(
        rendered(&particles),
        vec!["KEYWORD<SAY>", "'\\n'", "KEYWORD<berries>", "'\\n'"]
    );
    assert_eq!(particles[0].keyword, Some(Keyword::Say));
    assert_eq!(particles[2].keyword, None);
}

#[test]
fn misplaced_parens_become_errors() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"(LOOK) )SAY DO(\n"]);
    assert_eq!(consumed, 16);
    assert_eq!(
        kinds(&particles),
        vec![
            ParticleKind::BeginNest,
            ParticleKind::Keyword,
            ParticleKind::EndNest,
            ParticleKind::Error,
            ParticleKind::Keyword,
            ParticleKind::Error,
            ParticleKind::BeginNest,
            ParticleKind::End,
        ]
    );
    assert_eq!(particles[1].keyword, Some(Keyword::Look));
    assert_eq!(particles[3].bytes(), b")");
    assert_eq!(particles[4].keyword, Some(Keyword::Say));
    assert_eq!(particles[5].bytes(), b"DO");
    assert_eq!(
        particles[5].error_text.as_deref(),
        Some("'(' (U+0028) in keyword")
    );
}

#[test]
fn name_split_over_three_chunks() {
    let names = names();
    let (particles, consumed) =
        lex_chunks(&names, &[b"\"The big", b" bucket h", b"ere.\""]);
    assert_eq!(consumed, 22);
    assert_eq!(particles.len(), 1);
    assert_eq!(particles[0].kind, ParticleKind::Name);
    assert_eq!(particles[0].bytes(), b"The big bucket here.");
    assert!(particles[0].name.is_some());
}

#[test]
fn keyword_split_mid_word() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"LOOK cute", b"st thing\n"]);
    assert_eq!(consumed, 18);
    assert_eq!(
        rendered(&particles),
        vec!["KEYWORD<LOOK>", "KEYWORD<cutest>", "KEYWORD<thing>", "'\\n'"]
    );

    let (particles, consumed) = lex_chunks(&names, &[b"cut", b"est", b"erest\n"]);
    assert_eq!(consumed, 12);
    assert_eq!(rendered(&particles), vec!["KEYWORD<cutesterest>", "'\\n'"]);
}

#[test]
fn number_split_over_three_chunks() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"56", b"72", b"16\n"]);
    assert_eq!(consumed, 7);
    assert_eq!(rendered(&particles), vec!["NUMBER<567216>", "'\\n'"]);
}

#[test]
fn matched_and_unmatched_names() {
    let names = names();
    let (particles, consumed) =
        lex_chunks(&names, &[b"\"scone\" \"'another'\" 32", b" 56\n"]);
    assert_eq!(consumed, 26);
    assert_eq!(
        rendered(&particles),
        vec![
            "NAME<scone>",
            "NAME<'another'>",
            "NUMBER<32>",
            "NUMBER<56>",
            "'\\n'"
        ]
    );
    assert_eq!(particles[0].value, ParticleValue::Shared("scone"));
    assert!(particles[0].name.is_some());
    assert!(particles[1].name.is_none());
}

#[test]
fn emoji_name_whole_and_split() {
    let names = names();
    let line = "\"\u{1f600}\"\n".as_bytes();
    let (whole, consumed) = lex_chunks(&names, &[line]);
    assert_eq!(consumed, 7);
    assert_eq!(whole[0].kind, ParticleKind::Name);
    assert!(whole[0].name.is_some());

    let (split, consumed) = lex_chunks(&names, &[&line[..2], &line[2..4], &line[4..]]);
    assert_eq!(consumed, 7);
    assert_eq!(split, whole);
}

#[test]
fn nul_in_name_is_an_error() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"\"na\x00me\"\n"]);
    assert_eq!(consumed, 8);
    assert_eq!(kinds(&particles), vec![ParticleKind::Error, ParticleKind::End]);
    assert_eq!(particles[0].bytes(), b"\"na\x00me\"");
    assert_eq!(
        particles[0].error_text.as_deref(),
        Some("'\\0' (U+0000) in name")
    );
}

#[test]
fn escaped_quote_stays_in_name() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"SAY \"a \\\"b\\\\\"\n"]);
    assert_eq!(consumed, 14);
    assert_eq!(particles[1].bytes(), b"a \"b\\");
}

#[test]
fn unfinished_token_is_left_for_the_caller() {
    let names = names();
    let (particles, consumed) = lex_chunks(&names, &[b"SAY (LOOK \"The big"]);
    assert_eq!(consumed, 10);
    assert_eq!(
        kinds(&particles),
        vec![
            ParticleKind::Keyword,
            ParticleKind::BeginNest,
            ParticleKind::Keyword
        ]
    );
}
