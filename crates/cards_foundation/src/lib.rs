//! Core types and ordered collections for the cards server.
//!
//! This crate provides:
//! - [`Error`] - Error type shared by every layer, with allocation failure
//!   surfaced as a value instead of an abort
//! - [`Handle`] - Generational handles for objects owned elsewhere
//! - [`SortedSet`] - An ordered, unique-key skip list over byte-string keys
//! - [`SortedSetMaker`] - Deterministic O(n) bulk construction of a
//!   [`SortedSet`] from pre-sorted keys

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bytes;
pub mod error;
pub mod handle;
pub mod sorted_set;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use handle::Handle;
pub use sorted_set::{AddKey, Entry, SortedSet, SortedSetMaker};
