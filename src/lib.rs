//! Cards - text-command front end for a multiplayer card game server
//!
//! This crate re-exports all layers of the front end for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: cards_runtime    - Command sessions, logging, lexer shell
//! Layer 2: cards_command    - Particles, keyword table, chunked lexer
//! Layer 1: cards_names      - Canonicalized two-phase name set
//! Layer 0: cards_foundation - Errors, handles, sorted skip-list set
//! ```

pub use cards_command as command;
pub use cards_foundation as foundation;
pub use cards_names as names;
pub use cards_runtime as runtime;
