//! Particles produced by the lexer.
//!
//! A particle is one classified token and its payload. Matched keywords and
//! names borrow their canonical spelling; everything else owns a copy of the
//! bytes it was lexed from, so no particle refers back into the input.

use std::borrow::Cow;
use std::fmt;

use cards_names::Name;

use crate::keyword::Keyword;

/// The kind of a [`Particle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// End of a command line (`\n`).
    End,
    /// A bare word, matched against the keyword table or not.
    Keyword,
    /// A run of ASCII digits.
    Number,
    /// A quoted name.
    Name,
    /// `(`
    BeginNest,
    /// `)`
    EndNest,
    /// A malformed byte sequence.
    Error,
}

/// The payload of a [`Particle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticleValue<'n> {
    /// No payload.
    Empty,
    /// A keyword's canonical spelling from the static table.
    Static(&'static str),
    /// A registered name's display form.
    Shared(&'n str),
    /// Bytes copied out of the input.
    Owned(Box<[u8]>),
}

impl ParticleValue<'_> {
    /// Returns the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Static(s) => s.as_bytes(),
            Self::Shared(s) => s.as_bytes(),
            Self::Owned(bytes) => bytes,
        }
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Returns the payload as text, replacing invalid UTF-8.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

/// A classified token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Particle<'n> {
    /// What was lexed.
    pub kind: ParticleKind,
    /// The token's payload.
    pub value: ParticleValue<'n>,
    /// The matched keyword, for [`ParticleKind::Keyword`] particles only.
    pub keyword: Option<Keyword>,
    /// The registered name, for [`ParticleKind::Name`] particles only.
    pub name: Option<&'n Name>,
    /// Diagnostic text for [`ParticleKind::Error`] particles, when enabled.
    pub error_text: Option<String>,
}

impl<'n> Particle<'n> {
    fn bare(kind: ParticleKind, value: ParticleValue<'n>) -> Self {
        Self {
            kind,
            value,
            keyword: None,
            name: None,
            error_text: None,
        }
    }

    /// Creates an end-of-line particle.
    #[must_use]
    pub fn end() -> Self {
        Self::bare(ParticleKind::End, ParticleValue::Empty)
    }

    /// Creates a `(` particle.
    #[must_use]
    pub fn begin_nest() -> Self {
        Self::bare(ParticleKind::BeginNest, ParticleValue::Empty)
    }

    /// Creates a `)` particle.
    #[must_use]
    pub fn end_nest() -> Self {
        Self::bare(ParticleKind::EndNest, ParticleValue::Empty)
    }

    /// Creates a keyword particle from a table match.
    #[must_use]
    pub fn matched_keyword(keyword: Keyword, spelling: &'static str) -> Self {
        Self {
            keyword: Some(keyword),
            ..Self::bare(ParticleKind::Keyword, ParticleValue::Static(spelling))
        }
    }

    /// Creates a keyword particle for a word the table does not know.
    #[must_use]
    pub fn unmatched_keyword(bytes: Box<[u8]>) -> Self {
        Self::bare(ParticleKind::Keyword, ParticleValue::Owned(bytes))
    }

    /// Creates a number particle.
    #[must_use]
    pub fn number(digits: Box<[u8]>) -> Self {
        Self::bare(ParticleKind::Number, ParticleValue::Owned(digits))
    }

    /// Creates a name particle for a registered name.
    #[must_use]
    pub fn matched_name(name: &'n Name) -> Self {
        Self {
            name: Some(name),
            ..Self::bare(ParticleKind::Name, ParticleValue::Shared(name.display()))
        }
    }

    /// Creates a name particle for a name that is not registered.
    #[must_use]
    pub fn unmatched_name(bytes: Box<[u8]>) -> Self {
        Self::bare(ParticleKind::Name, ParticleValue::Owned(bytes))
    }

    /// Creates an error particle.
    #[must_use]
    pub fn error(bytes: Box<[u8]>, text: Option<String>) -> Self {
        Self {
            error_text: text,
            ..Self::bare(ParticleKind::Error, ParticleValue::Owned(bytes))
        }
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns true for [`ParticleKind::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ParticleKind::Error
    }
}

impl fmt::Display for Particle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.to_str_lossy();
        match self.kind {
            ParticleKind::End => f.write_str("'\\n'"),
            ParticleKind::Keyword => write!(f, "KEYWORD<{value}>"),
            ParticleKind::Number => write!(f, "NUMBER<{value}>"),
            ParticleKind::Name => write!(f, "NAME<{value}>"),
            ParticleKind::BeginNest => f.write_str("'('"),
            ParticleKind::EndNest => f.write_str("')'"),
            ParticleKind::Error => match &self.error_text {
                Some(text) => write!(f, "ERROR<{}>: {text}", value.escape_debug()),
                None => write!(f, "ERROR<{}>", value.escape_debug()),
            },
        }
    }
}
