//! The command keyword table.
//!
//! A fixed, sorted table of the verbs the server understands. Bare words are
//! matched ASCII case-insensitively; a match yields the keyword and the
//! offset of its canonical upper-case spelling in the table.

use std::cmp::Ordering;
use std::fmt;

/// A recognized command keyword.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    /// `EXIT`
    Exit,
    /// `LOOK`
    Look,
    /// `SAY`
    Say,
    /// `SHUTDOWN`
    Shutdown,
}

impl Keyword {
    /// Every keyword, in table order.
    pub const ALL: [Self; 4] = [Self::Exit, Self::Look, Self::Say, Self::Shutdown];

    /// Returns the canonical spelling.
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Exit => "EXIT",
            Self::Look => "LOOK",
            Self::Say => "SAY",
            Self::Shutdown => "SHUTDOWN",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// A successful table lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeywordMatch {
    /// The keyword that matched.
    pub keyword: Keyword,
    /// Offset of the canonical spelling, for [`spelling`].
    pub offset: usize,
}

// Sorted by spelling; `lookup` binary-searches it.
static TABLE: [(&str, Keyword); 4] = [
    ("EXIT", Keyword::Exit),
    ("LOOK", Keyword::Look),
    ("SAY", Keyword::Say),
    ("SHUTDOWN", Keyword::Shutdown),
];

fn compare(spelling: &str, bytes: &[u8]) -> Ordering {
    spelling
        .bytes()
        .cmp(bytes.iter().map(u8::to_ascii_uppercase))
}

/// Looks up a bare word.
#[must_use]
pub fn lookup(bytes: &[u8]) -> Option<KeywordMatch> {
    TABLE
        .binary_search_by(|(spelling, _)| compare(spelling, bytes))
        .ok()
        .map(|offset| KeywordMatch {
            keyword: TABLE[offset].1,
            offset,
        })
}

/// Returns the canonical spelling stored at `offset`.
///
/// # Panics
///
/// Panics if `offset` did not come from [`lookup`].
#[must_use]
pub fn spelling(offset: usize) -> &'static str {
    TABLE[offset].0
}
