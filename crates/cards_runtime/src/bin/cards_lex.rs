//! Interactive lexer shell.
//!
//! Lexes each entered line against a small demo name set and prints the
//! resulting particles. Set `RUST_LOG=cards_command=trace` to see every
//! lexical error as it is recovered.

use std::process::ExitCode;

use cards_runtime::{Repl, demo, logging};

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run() -> cards_foundation::Result<()> {
    let names = demo::names()?;
    let mut repl = Repl::new(&names)?;
    repl.run()
}
