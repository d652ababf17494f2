//! A read position across a list of input chunks.
//!
//! The lexer sees its input as one logical stream even though the bytes live
//! in separate caller-owned slices. A [`Cursor`] is a `(chunk, offset)` pair
//! plus the absolute stream position. Empty chunks are stepped over, so the
//! offset always indexes a real byte unless the cursor is at end of stream.

use std::borrow::Cow;

use cards_foundation::{Result, bytes};

/// A position in a chunked byte stream.
///
/// Cursors are `Copy`; saving one marks a token start.
#[derive(Copy, Clone, Debug)]
pub struct Cursor<'c> {
    chunks: &'c [&'c [u8]],
    chunk: usize,
    offset: usize,
    position: usize,
}

impl<'c> Cursor<'c> {
    /// Creates a cursor at the start of `chunks`.
    #[must_use]
    pub fn new(chunks: &'c [&'c [u8]]) -> Self {
        let mut cursor = Self {
            chunks,
            chunk: 0,
            offset: 0,
            position: 0,
        };
        cursor.skip_exhausted();
        cursor
    }

    fn skip_exhausted(&mut self) {
        while self
            .chunks
            .get(self.chunk)
            .is_some_and(|chunk| self.offset == chunk.len())
        {
            self.chunk += 1;
            self.offset = 0;
        }
    }

    /// Returns the byte under the cursor, or `None` at end of stream.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.chunks
            .get(self.chunk)
            .and_then(|chunk| chunk.get(self.offset))
            .copied()
    }

    /// Moves past the current byte. Does nothing at end of stream.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        self.offset += 1;
        self.position += 1;
        self.skip_exhausted();
    }

    /// Returns the current byte and moves past it.
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.advance();
        Some(byte)
    }

    /// Returns true once every byte of every chunk has been passed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.chunk >= self.chunks.len()
    }

    /// Returns the absolute byte offset from the start of the first chunk.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the index of the chunk under the cursor.
    #[must_use]
    pub fn chunk_index(&self) -> usize {
        self.chunk
    }

    /// Returns the offset within the current chunk.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the bytes between `start` and this cursor.
    ///
    /// Bytes that lie in one chunk are borrowed; a span that crosses a chunk
    /// boundary is copied.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if a crossing span could not be copied.
    pub fn bytes_since(&self, start: &Cursor<'c>) -> Result<Cow<'c, [u8]>> {
        debug_assert!(start.position <= self.position);
        let len = self.position - start.position;
        let Some(first) = self.chunks.get(start.chunk).map(|c| &c[start.offset..]) else {
            return Ok(Cow::Borrowed(&[]));
        };
        if first.len() >= len {
            return Ok(Cow::Borrowed(&first[..len]));
        }

        let mut out = bytes::try_with_capacity(len)?;
        out.extend_from_slice(first);
        let mut remaining = len - first.len();
        for chunk in &self.chunks[start.chunk + 1..] {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(chunk.len());
            out.extend_from_slice(&chunk[..take]);
            remaining -= take;
        }
        Ok(Cow::Owned(out))
    }

    /// Returns an owned copy of the bytes between `start` and this cursor.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the copy could not be made.
    pub fn copy_since(&self, start: &Cursor<'c>) -> Result<Box<[u8]>> {
        match self.bytes_since(start)? {
            Cow::Borrowed(slice) => bytes::try_copy(slice),
            Cow::Owned(vec) => Ok(vec.into_boxed_slice()),
        }
    }

    /// Copies up to `out.len()` upcoming bytes into `out` without moving.
    ///
    /// Returns how many bytes were available.
    pub fn lookahead(&self, out: &mut [u8]) -> usize {
        let mut ahead = *self;
        let mut filled = 0;
        while filled < out.len() {
            let Some(byte) = ahead.bump() else {
                break;
            };
            out[filled] = byte;
            filled += 1;
        }
        filled
    }
}
