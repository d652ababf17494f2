//! The chunked command lexer.
//!
//! [`Lexer::lex`] scans a list of chunks from the start, appending one
//! particle per completed token. It returns the number of bytes that belong
//! to completed tokens. When a token runs into the end of the stream the
//! call stops at that token's first byte and emits nothing for it; the
//! caller keeps the unconsumed tail and offers it again, followed by new
//! bytes, on the next call. No state survives between calls.
//!
//! Lexical errors never stop a scan. Each becomes one
//! [`ParticleKind::Error`](crate::ParticleKind::Error) particle and scanning
//! resumes at the recovery point of the rule that failed. An error whose
//! recovery point lies past the end of the stream is unfinished like any
//! other token.

use std::borrow::Cow;

use cards_foundation::{Error, ErrorContext, Result, bytes};
use cards_names::NameSet;
use tracing::{debug, trace};

use crate::buffer::ParticleBuffer;
use crate::config::LexerConfig;
use crate::cursor::Cursor;
use crate::keyword;
use crate::particle::Particle;

/// What one scanning step produced.
enum Step<'n> {
    /// Whitespace was consumed.
    Skip,
    /// A token was completed.
    Emit(Particle<'n>),
    /// The stream ended inside a token.
    Incomplete,
}

/// Which bare-token rule is scanning, for diagnostics.
#[derive(Copy, Clone)]
enum Bare {
    Number,
    Keyword,
}

impl Bare {
    fn accepts(self, byte: u8) -> bool {
        match self {
            Self::Number => byte.is_ascii_digit(),
            Self::Keyword => is_keyword_byte(byte),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Keyword => "keyword",
        }
    }
}

/// Returns true for bytes that may start a keyword.
fn is_keyword_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || matches!(byte, b'!' | b'?' | b'-' | b'*' | b'+' | b'/')
}

/// Returns true for bytes that may continue a keyword.
fn is_keyword_byte(byte: u8) -> bool {
    is_keyword_start(byte) || byte.is_ascii_digit()
}

/// Bytes that end a number or keyword.
fn is_bare_stop(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b')')
}

/// Bytes that end error recovery inside a number or keyword.
fn is_recovery_stop(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'(' | b')')
}

/// Bytes that may not appear inside a quoted name.
fn is_forbidden_in_name(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\r' | 0x0b | 0x0c)
}

/// Describes the code point starting at `cursor` for diagnostics.
///
/// Up to four bytes are read across chunk boundaries. A byte that does not
/// begin a valid UTF-8 sequence is shown in hex.
fn describe(cursor: &Cursor<'_>) -> String {
    let mut buf = [0u8; 4];
    let n = cursor.lookahead(&mut buf);
    let decoded = buf[..n]
        .utf8_chunks()
        .next()
        .and_then(|chunk| chunk.valid().chars().next());
    match decoded {
        Some(c) => format!("{c:?} (U+{:04X})", u32::from(c)),
        None => format!("byte 0x{:02x}", buf[0]),
    }
}

/// A lexer bound to a name set.
#[derive(Clone, Debug)]
pub struct Lexer<'n> {
    names: &'n NameSet,
    config: LexerConfig,
}

impl<'n> Lexer<'n> {
    /// Creates a lexer that resolves quoted names against `names`.
    #[must_use]
    pub fn new(names: &'n NameSet) -> Self {
        Self::with_config(names, LexerConfig::default())
    }

    /// Creates a lexer with the given configuration.
    #[must_use]
    pub fn with_config(names: &'n NameSet, config: LexerConfig) -> Self {
        Self { names, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Returns the name set quoted names are resolved against.
    #[must_use]
    pub fn names(&self) -> &'n NameSet {
        self.names
    }

    /// Lexes `chunks` as one stream, appending particles to `buffer`.
    ///
    /// Returns the number of bytes consumed: either the total offered, or
    /// the offset of the first byte of a trailing token that could not be
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a token could not be copied or the
    /// buffer could not grow. Particles appended before the failure stay in
    /// the buffer.
    pub fn lex(&self, chunks: &[&[u8]], buffer: &mut ParticleBuffer<'n>) -> Result<usize> {
        let mut cursor = Cursor::new(chunks);
        let before = buffer.len();

        let consumed = loop {
            if cursor.is_at_end() {
                break cursor.position();
            }
            let start = cursor;
            let step = self
                .step(&mut cursor)
                .map_err(|error| at(error, start.position()))?;
            match step {
                Step::Skip => {}
                Step::Emit(particle) => buffer
                    .add(particle)
                    .map_err(|error| at(error, start.position()))?,
                Step::Incomplete => break start.position(),
            }
        };

        debug!(
            chunks = chunks.len(),
            offered = cursor.position(),
            consumed,
            particles = buffer.len() - before,
            "lexed input"
        );
        Ok(consumed)
    }

    fn step(&self, cursor: &mut Cursor<'_>) -> Result<Step<'n>> {
        let Some(byte) = cursor.peek() else {
            return Ok(Step::Incomplete);
        };
        match byte {
            b' ' | b'\r' | b'\t' => {
                cursor.advance();
                Ok(Step::Skip)
            }
            b'\n' => {
                cursor.advance();
                Ok(Step::Emit(Particle::end()))
            }
            b'(' => {
                cursor.advance();
                Ok(Step::Emit(Particle::begin_nest()))
            }
            b')' => self.end_nest(cursor),
            b'"' => self.name(cursor),
            b if b.is_ascii_digit() => self.bare(cursor, Bare::Number),
            b if is_keyword_start(b) => self.bare(cursor, Bare::Keyword),
            _ => {
                let text = self.diagnose(|| format!("unexpected {}", describe(cursor)));
                let start = *cursor;
                cursor.advance();
                error_step(cursor, &start, text)
            }
        }
    }

    fn end_nest(&self, cursor: &mut Cursor<'_>) -> Result<Step<'n>> {
        let start = *cursor;
        cursor.advance();
        match cursor.peek() {
            None | Some(b' ' | b'\n' | b')') => Ok(Step::Emit(Particle::end_nest())),
            Some(_) => {
                let text = self.diagnose(|| format!("')' followed by {}", describe(cursor)));
                error_step(cursor, &start, text)
            }
        }
    }

    fn bare(&self, cursor: &mut Cursor<'_>, rule: Bare) -> Result<Step<'n>> {
        let start = *cursor;
        cursor.advance();
        loop {
            match cursor.peek() {
                None => return Ok(Step::Incomplete),
                Some(b) if rule.accepts(b) => cursor.advance(),
                Some(b) if is_bare_stop(b) => break,
                Some(_) => {
                    let text =
                        self.diagnose(|| format!("{} in {}", describe(cursor), rule.label()));
                    loop {
                        match cursor.peek() {
                            None => return Ok(Step::Incomplete),
                            Some(b) if is_recovery_stop(b) => break,
                            Some(_) => cursor.advance(),
                        }
                    }
                    return error_step(cursor, &start, text);
                }
            }
        }

        let particle = match rule {
            Bare::Number => Particle::number(cursor.copy_since(&start)?),
            Bare::Keyword => {
                let word = cursor.bytes_since(&start)?;
                match keyword::lookup(&word) {
                    Some(found) => {
                        Particle::matched_keyword(found.keyword, keyword::spelling(found.offset))
                    }
                    None => Particle::unmatched_keyword(into_boxed(word)?),
                }
            }
        };
        Ok(Step::Emit(particle))
    }

    fn name(&self, cursor: &mut Cursor<'_>) -> Result<Step<'n>> {
        let start = *cursor;
        cursor.advance();
        let mut value = Vec::new();
        loop {
            let Some(byte) = cursor.peek() else {
                return Ok(Step::Incomplete);
            };
            if is_forbidden_in_name(byte) {
                let text = self.diagnose(|| format!("{} in name", describe(cursor)));
                loop {
                    match cursor.bump() {
                        None => return Ok(Step::Incomplete),
                        Some(b'"') => break,
                        Some(_) => {}
                    }
                }
                return error_step(cursor, &start, text);
            }
            cursor.advance();
            match byte {
                b'"' => break,
                b'\\' => {
                    let Some(escaped) = cursor.peek() else {
                        return Ok(Step::Incomplete);
                    };
                    if !is_forbidden_in_name(escaped) {
                        cursor.advance();
                        bytes::try_extend(&mut value, &[escaped])?;
                    }
                }
                _ => bytes::try_extend(&mut value, &[byte])?,
            }
        }

        let particle = match self.names.lookup(&value) {
            Some(name) => Particle::matched_name(name),
            None => Particle::unmatched_name(value.into_boxed_slice()),
        };
        Ok(Step::Emit(particle))
    }

    fn diagnose(&self, text: impl FnOnce() -> String) -> Option<String> {
        self.config.diagnostics.then(text)
    }
}

fn error_step<'n>(
    cursor: &Cursor<'_>,
    start: &Cursor<'_>,
    text: Option<String>,
) -> Result<Step<'n>> {
    let bytes = cursor.copy_since(start)?;
    trace!(
        offset = start.position(),
        len = bytes.len(),
        text = text.as_deref().unwrap_or_default(),
        "lexical error"
    );
    Ok(Step::Emit(Particle::error(bytes, text)))
}

fn into_boxed(bytes: Cow<'_, [u8]>) -> Result<Box<[u8]>> {
    match bytes {
        Cow::Borrowed(slice) => bytes::try_copy(slice),
        Cow::Owned(vec) => Ok(vec.into_boxed_slice()),
    }
}

fn at(error: Error, offset: usize) -> Error {
    error.with_context(ErrorContext::new().with_operation("lex").with_offset(offset))
}

/// Lexes `chunks` against `names` with the default configuration.
///
/// # Errors
///
/// Returns an allocation error; see [`Lexer::lex`].
pub fn lex<'n>(
    chunks: &[&[u8]],
    names: &'n NameSet,
    buffer: &mut ParticleBuffer<'n>,
) -> Result<usize> {
    Lexer::new(names).lex(chunks, buffer)
}
