//! Command lexing for the cards server.
//!
//! Player input arrives from the network as byte chunks that need not line
//! up with token boundaries. The [`Lexer`] scans an ordered list of chunks as
//! one logical stream and appends [`Particle`]s to a [`ParticleBuffer`],
//! resolving bare words against the [`Keyword`] table and quoted names
//! against a [`NameSet`](cards_names::NameSet).
//!
//! # Example
//!
//! ```
//! use cards_command::{ParticleBuffer, ParticleKind, lex};
//! use cards_names::NameSet;
//!
//! let names = NameSet::new();
//! let mut buffer = ParticleBuffer::new();
//! let chunks: [&[u8]; 2] = [b"SAY hel", b"lo\n"];
//! let consumed = lex(&chunks, &names, &mut buffer).unwrap();
//!
//! assert_eq!(consumed, 10);
//! let kinds: Vec<_> = buffer.iter().map(|p| p.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [ParticleKind::Keyword, ParticleKind::Keyword, ParticleKind::End]
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod keyword;
pub mod lexer;
pub mod particle;


pub use buffer::ParticleBuffer;
pub use config::LexerConfig;
pub use keyword::{Keyword, KeywordMatch};
pub use lexer::{Lexer, lex};
pub use particle::{Particle, ParticleKind, ParticleValue};
