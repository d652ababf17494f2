//! Chunk-boundary and consumption properties

use cards_command::ParticleKind;
use proptest::prelude::*;

use crate::{lex_chunks, names};

fn split_at_all(input: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (input.len() + 1)).collect();
    cuts.sort_unstable();
    let mut pieces = Vec::new();
    let mut from = 0;
    for cut in cuts {
        pieces.push(input[from..cut].to_vec());
        from = cut;
    }
    pieces.push(input[from..].to_vec());
    pieces
}

fn starts_token(byte: u8) -> bool {
    byte == b'"' || byte.is_ascii_alphanumeric() || b"!?-*+/".contains(&byte)
}

/// Input drawn mostly from bytes the lexer cares about.
fn lexer_bytes() -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        4 => prop::sample::select(b" \t\r\n()\"\\aZ9!-".to_vec()),
        1 => any::<u8>(),
    ];
    prop::collection::vec(byte, 0..200)
}

#[test]
fn byte_at_a_time_matches_whole() {
    let names = names();
    let line = b"SAY (LOOK \"The big bucket here.\") 12 \"\\\"x\\\"\" ?!\n";
    let pieces: Vec<&[u8]> = line.chunks(1).collect();
    assert_eq!(lex_chunks(&names, &pieces), lex_chunks(&names, &[line]));
}

#[test]
fn empty_chunks_are_ignored() {
    let names = names();
    let chunks: [&[u8]; 5] = [b"", b"LO", b"", b"OK\n", b""];
    let (particles, consumed) = lex_chunks(&names, &chunks);
    assert_eq!(consumed, 5);
    assert_eq!(particles[0].kind, ParticleKind::Keyword);
}

proptest! {
    #[test]
    fn splits_never_change_the_result(
        input in lexer_bytes(),
        cuts in prop::collection::vec(any::<usize>(), 0..10),
    ) {
        let names = names();
        let pieces = split_at_all(&input, &cuts);
        let chunks: Vec<&[u8]> = pieces.iter().map(Vec::as_slice).collect();
        prop_assert_eq!(lex_chunks(&names, &chunks), lex_chunks(&names, &[input.as_slice()]));
    }

    #[test]
    fn unconsumed_tail_starts_a_token(input in lexer_bytes()) {
        let names = names();
        let (_, consumed) = lex_chunks(&names, &[input.as_slice()]);
        prop_assert!(consumed <= input.len());
        if consumed < input.len() {
            prop_assert!(starts_token(input[consumed]));
        }
    }

    #[test]
    fn every_line_feed_outside_names_ends_a_line(
        words in prop::collection::vec("[a-z0-9]{1,5}", 1..10),
    ) {
        let names = names();
        let line = words.join("\n") + "\n";
        let (particles, consumed) = lex_chunks(&names, &[line.as_bytes()]);
        prop_assert_eq!(consumed, line.len());
        let ends = particles.iter().filter(|p| p.kind == ParticleKind::End).count();
        prop_assert_eq!(ends, words.len());
    }
}
