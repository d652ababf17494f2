//! Key canonicalization.
//!
//! A name key is the lowercase form of the spelling, normalized to Unicode
//! canonical composition (NFC). No locale-specific collation is applied.

use unicode_normalization::UnicodeNormalization;

/// Returns the canonical key for `spelling`.
#[must_use]
pub fn canonicalize(spelling: &str) -> String {
    spelling.to_lowercase().nfc().collect()
}

/// Returns the canonical key for raw input bytes.
///
/// Bytes that are not valid UTF-8 cannot name anything and yield `None`.
#[must_use]
pub fn canonicalize_bytes(bytes: &[u8]) -> Option<String> {
    std::str::from_utf8(bytes).ok().map(canonicalize)
}
