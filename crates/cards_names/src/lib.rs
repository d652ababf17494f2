//! Name registry consulted by the command lexer.
//!
//! Card, ability, subtype, and player names are registered once by the
//! loader and looked up continuously afterwards. Every key is canonicalized
//! (lowercased, then NFC-normalized) so case variants and differently
//! composed spellings of one name collide.
//!
//! # Modules
//!
//! - [`canonical`] - Key canonicalization
//! - [`name`] - The [`Name`] record and its [`NameType`] tag
//! - [`compiled`] - The immutable hash built by [`NameSet::compile`]
//! - [`name_set`] - The two-phase [`NameSet`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canonical;
pub mod compiled;
pub mod name;
pub mod name_set;

pub use canonical::{canonicalize, canonicalize_bytes};
pub use compiled::{CompiledHash, HashInputs};
pub use name::{Name, NameType};
pub use name_set::{CompileOutcome, NameSet, NameSetConfig};
