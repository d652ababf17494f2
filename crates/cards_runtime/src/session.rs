//! Per-connection command sessions.
//!
//! The lexer keeps no state between calls, so whoever reads from the
//! connection must hold on to any trailing bytes the lexer did not consume
//! and offer them again ahead of the next read. [`CommandSession`] does
//! that bookkeeping. The retained tail and the new bytes are passed to the
//! lexer as two chunks; they are never concatenated.

use cards_command::buffer::DEFAULT_GROW_INCREMENT;
use cards_command::{Lexer, LexerConfig, Particle, ParticleBuffer};
use cards_foundation::{Error, Result, bytes};
use cards_names::NameSet;
use tracing::{debug, warn};

/// Default bound on the retained tail, in bytes.
pub const DEFAULT_MAX_PENDING: usize = 64 * 1024;

/// Configuration for a [`CommandSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Largest unconsumed tail the session will hold between feeds.
    pub max_pending: usize,
    /// Options passed to the lexer.
    pub lexer: LexerConfig,
    /// Growth increment of the particle buffer. Must be positive.
    pub particle_increment: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_pending: DEFAULT_MAX_PENDING,
            lexer: LexerConfig::default(),
            particle_increment: DEFAULT_GROW_INCREMENT,
        }
    }
}

impl SessionConfig {
    /// Sets the bound on the retained tail.
    #[must_use]
    pub fn with_max_pending(mut self, max_pending: usize) -> Self {
        self.max_pending = max_pending;
        self
    }

    /// Sets the lexer options.
    #[must_use]
    pub fn with_lexer(mut self, lexer: LexerConfig) -> Self {
        self.lexer = lexer;
        self
    }

    /// Sets the particle buffer growth increment.
    #[must_use]
    pub fn with_particle_increment(mut self, increment: usize) -> Self {
        self.particle_increment = increment;
        self
    }
}

/// Lexing state for one connection.
pub struct CommandSession<'n> {
    lexer: Lexer<'n>,
    buffer: ParticleBuffer<'n>,
    pending: Vec<u8>,
    max_pending: usize,
    last_consumed: usize,
}

impl<'n> CommandSession<'n> {
    /// Creates a session that resolves names against `names`.
    #[must_use]
    pub fn new(names: &'n NameSet) -> Self {
        Self::with_config(names, SessionConfig::default())
    }

    /// Creates a session with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.particle_increment` is zero.
    #[must_use]
    pub fn with_config(names: &'n NameSet, config: SessionConfig) -> Self {
        Self {
            lexer: Lexer::with_config(names, config.lexer),
            buffer: ParticleBuffer::with_increment(config.particle_increment),
            pending: Vec::new(),
            max_pending: config.max_pending,
            last_consumed: 0,
        }
    }

    /// Lexes newly received bytes after whatever was left over last time.
    ///
    /// Returns the particles completed by this feed. They stay valid until
    /// the next call.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if lexing or retaining the tail fails,
    /// and [`PendingOverflow`](cards_foundation::ErrorKind::PendingOverflow)
    /// if the unconsumed tail grows past the configured bound.
    ///
    /// On any error the retained tail is discarded along with `input`, so
    /// the next feed starts a fresh stream. Particles appended before an
    /// allocation failure stay readable through [`particles`](Self::particles).
    pub fn feed(&mut self, input: &[u8]) -> Result<&[Particle<'n>]> {
        self.buffer.free_all();
        let offered = self.pending.len() + input.len();
        let chunks: [&[u8]; 2] = [&self.pending, input];
        let lexed = self.lexer.lex(&chunks, &mut self.buffer);
        let retained = lexed.and_then(|consumed| self.retain(consumed, input).map(|()| consumed));
        let consumed = match retained {
            Ok(consumed) => consumed,
            Err(error) => {
                let dropped = self.pending.len() + input.len();
                self.pending.clear();
                self.last_consumed = 0;
                warn!(dropped, %error, "discarding command stream after failed feed");
                return Err(error);
            }
        };
        self.last_consumed = consumed;

        if self.pending.len() > self.max_pending {
            let pending = self.pending.len();
            self.pending.clear();
            warn!(pending, limit = self.max_pending, "discarding oversized command tail");
            return Err(Error::pending_overflow(self.max_pending, pending));
        }

        debug!(
            offered,
            consumed,
            pending = self.pending.len(),
            particles = self.buffer.len(),
            "fed command session"
        );
        Ok(self.buffer.particles())
    }

    /// Keeps the bytes after the first `consumed` of `[pending, input]`.
    fn retain(&mut self, consumed: usize, input: &[u8]) -> Result<()> {
        if consumed >= self.pending.len() {
            let from = consumed - self.pending.len();
            self.pending.clear();
            bytes::try_extend(&mut self.pending, &input[from..])
        } else {
            self.pending.drain(..consumed);
            bytes::try_extend(&mut self.pending, input)
        }
    }

    /// Returns the particles from the last feed.
    #[must_use]
    pub fn particles(&self) -> &[Particle<'n>] {
        self.buffer.particles()
    }

    /// Returns the bytes waiting for the rest of their token.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Returns true if an unfinished token is being held.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns how many of the bytes offered to the last feed were consumed,
    /// counting the retained tail that was offered with them.
    #[must_use]
    pub fn last_consumed(&self) -> usize {
        self.last_consumed
    }

    /// Returns the lexer.
    #[must_use]
    pub fn lexer(&self) -> &Lexer<'n> {
        &self.lexer
    }

    /// Drops any retained tail and the last particles.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.buffer.free_all();
        self.last_consumed = 0;
    }
}

impl std::fmt::Debug for CommandSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSession")
            .field("pending", &self.pending.len())
            .field("max_pending", &self.max_pending)
            .field("particles", &self.buffer.len())
            .finish_non_exhaustive()
    }
}
