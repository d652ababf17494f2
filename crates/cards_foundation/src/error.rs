//! Error types for the cards front end.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Only conditions that must abort an operation are modelled here. Lexical
//! errors become `Error` particles and duplicate keys are ordinary results;
//! neither ever shows up as an [`Error`].

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for cards operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a pending-overflow error.
    #[must_use]
    pub fn pending_overflow(limit: usize, pending: usize) -> Self {
        Self::new(ErrorKind::PendingOverflow { limit, pending })
    }

    /// Creates an I/O error from any displayable cause.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a line editor error.
    #[must_use]
    pub fn editor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Editor(message.into()))
    }

    /// Returns true if this error is an allocation failure.
    #[must_use]
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::AllocationFailed(_))
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Self::new(ErrorKind::AllocationFailed(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Memory could not be reserved. Fatal to the operation in progress.
    #[error("allocation failed: {0}")]
    AllocationFailed(#[source] TryReserveError),

    /// The unconsumed tail held between lexer calls grew past its bound.
    #[error("pending input overflow: {pending} bytes held, limit is {limit}")]
    PendingOverflow {
        /// The configured limit in bytes.
        limit: usize,
        /// The number of bytes that would have been held.
        pending: usize,
    },

    /// Reading or writing a stream failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// The interactive line editor failed.
    #[error("editor error: {0}")]
    Editor(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was running, e.g. `lex` or `name_set.compile`.
    pub operation: Option<String>,
    /// Byte offset into the logical input stream, when one applies.
    pub offset: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the byte offset.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(offset) = self.offset {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at byte {offset}")?;
        }
        Ok(())
    }
}
