//! Runtime pieces that sit around the command lexer.
//!
//! This crate provides:
//! - [`CommandSession`] - Per-connection lexing that keeps the unconsumed
//!   tail between reads
//! - [`Repl`] - An interactive shell that lexes each entered line
//! - [`logging::init`] - Subscriber setup for binaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod demo;
pub mod editor;
pub mod logging;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::{CommandSession, SessionConfig};
