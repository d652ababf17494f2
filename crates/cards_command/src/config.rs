//! Lexer configuration.

/// Options for a [`Lexer`](crate::Lexer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Attach diagnostic text to error particles.
    ///
    /// Defaults to on in debug builds and off in release builds.
    pub diagnostics: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            diagnostics: cfg!(debug_assertions),
        }
    }
}

impl LexerConfig {
    /// Sets whether error particles carry diagnostic text.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
