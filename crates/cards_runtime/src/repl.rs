//! The interactive lexer shell.
//!
//! Each entered line, plus its newline, is fed to a [`CommandSession`]. The
//! completed particles are printed one per line, followed by the number of
//! bytes consumed. A token left open at the end of a line (an unclosed
//! quote, say) is carried into the next line and the prompt changes to show
//! it.

use std::io::{self, Write};

use cards_command::{Keyword, Particle, ParticleKind};
use cards_foundation::{Error, Result};
use cards_names::NameSet;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{CommandSession, SessionConfig};

/// The interactive shell.
pub struct Repl<'n, E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Lexing state carried between lines.
    session: CommandSession<'n>,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Prompt shown while a token is still open.
    continuation_prompt: String,
}

impl<'n> Repl<'n, RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialise.
    pub fn new(names: &'n NameSet) -> Result<Self> {
        let mut editor = RustylineEditor::new()?;
        editor.set_names(names.iter().map(|name| name.display().to_owned()).collect());
        Ok(Self::with_editor(editor, CommandSession::new(names)))
    }
}

impl<'n, E: LineEditor> Repl<'n, E> {
    /// Creates a shell over the given editor and session.
    pub fn with_editor(editor: E, session: CommandSession<'n>) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "cards> ".to_string(),
            continuation_prompt: "  ...> ".to_string(),
        }
    }

    /// Replaces the session with a fresh one using `config`.
    #[must_use]
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.session = CommandSession::with_config(self.session.lexer().names(), config);
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &CommandSession<'n> {
        &self.session
    }

    /// Runs the shell on stdout until EOF or an `EXIT`/`SHUTDOWN` command.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor or stdout fails.
    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        self.run_with(&mut stdout.lock())
    }

    /// Runs the shell, writing output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor or `out` fails.
    pub fn run_with<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.show_banner {
            writeln!(out, "cards lexer shell {}", env!("CARGO_PKG_VERSION")).map_err(io_error)?;
            writeln!(out, "Type commands; Ctrl+D or EXIT leaves.").map_err(io_error)?;
        }

        loop {
            let prompt = if self.session.has_pending() {
                &self.continuation_prompt
            } else {
                &self.prompt
            };
            match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history(&line);
                    }
                    match self.lex_line(&line) {
                        Ok(report) => {
                            for entry in &report.lines {
                                writeln!(out, "{entry}").map_err(io_error)?;
                            }
                            if report.exit {
                                break;
                            }
                        }
                        Err(e) => writeln!(out, "error: {e}").map_err(io_error)?,
                    }
                }
                ReadResult::Interrupted => {
                    self.session.reset();
                    writeln!(out).map_err(io_error)?;
                }
                ReadResult::Eof => break,
            }
        }
        Ok(())
    }

    /// Lexes one entered line and renders the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the input.
    pub fn lex_line(&mut self, line: &str) -> Result<LineReport> {
        let mut input = Vec::with_capacity(line.len() + 1);
        input.extend_from_slice(line.as_bytes());
        input.push(b'\n');

        let particles = self.session.feed(&input)?;
        let exit = particles.first().is_some_and(is_exit);
        let mut lines: Vec<String> = particles.iter().map(ToString::to_string).collect();
        lines.push(format!("consumed {} bytes", self.session.last_consumed()));
        Ok(LineReport { lines, exit })
    }
}

/// What [`Repl::lex_line`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// Rendered particles, then the consumed byte count.
    pub lines: Vec<String>,
    /// True if the line asked the shell to stop.
    pub exit: bool,
}

fn is_exit(particle: &Particle<'_>) -> bool {
    particle.kind == ParticleKind::Keyword
        && matches!(particle.keyword, Some(Keyword::Exit | Keyword::Shutdown))
}

fn io_error(error: io::Error) -> Error {
    Error::io(error.to_string())
}
