//! The two-phase name set.
//!
//! New names land in an uncompiled [`SortedSet`]. [`NameSet::compile`]
//! moves everything into a [`CompiledHash`]; if the hash cannot be built the
//! same entries are rebuilt into a balanced sorted set in O(n) with a
//! [`SortedSetMaker`], so nothing is lost. Lookups consult the compiled
//! table first and the uncompiled set second. A canonical key is held by at
//! most one of the two phases.

use std::mem;

use cards_foundation::{AddKey, Handle, Result, SortedSet, SortedSetMaker};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::canonical::{canonicalize, canonicalize_bytes};
use crate::compiled::CompiledHash;
use crate::name::{Name, NameType};

/// Configuration for a [`NameSet`].
#[derive(Clone, Debug, Default)]
pub struct NameSetConfig {
    /// Largest number of keys the compiled hash will accept. A compile that
    /// would exceed it falls back to a rebuilt sorted set. `None` means no
    /// limit.
    pub compiled_key_limit: Option<usize>,
}

impl NameSetConfig {
    /// Sets the compiled key limit.
    #[must_use]
    pub fn with_compiled_key_limit(mut self, limit: usize) -> Self {
        self.compiled_key_limit = Some(limit);
        self
    }
}

/// What [`NameSet::compile`] ended up doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Every name now lives in the compiled hash.
    Compiled {
        /// Number of names in the hash.
        keys: usize,
    },
    /// The hash could not be built; every name lives in a rebuilt sorted
    /// set instead.
    Rebuilt {
        /// Number of names in the rebuilt set.
        keys: usize,
    },
}

/// Pre-reserved destination for a compile.
enum Migration {
    Hash(CompiledHash<Name>),
    Rebuild(SortedSetMaker<Name>),
}

impl Migration {
    fn push(&mut self, key: Box<[u8]>, name: Name) {
        match self {
            Self::Hash(hash) => hash.insert(key, name),
            Self::Rebuild(maker) => {
                maker.add_key(key, name);
            }
        }
    }
}

/// A canonicalized registry of names.
pub struct NameSet {
    uncompiled: SortedSet<Name>,
    compiled: Option<CompiledHash<Name>>,
    config: NameSetConfig,
}

impl NameSet {
    /// Creates an empty name set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NameSetConfig::default())
    }

    /// Creates an empty name set with the given configuration.
    #[must_use]
    pub fn with_config(config: NameSetConfig) -> Self {
        Self {
            uncompiled: SortedSet::new(),
            compiled: None,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NameSetConfig {
        &self.config
    }

    /// Registers `spelling`.
    ///
    /// Returns `false` if a name with the same canonical key already exists
    /// in either phase, even when the raw spelling differs.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the name could not be stored.
    pub fn add(&mut self, spelling: &str, kind: NameType, owner: Handle) -> Result<bool> {
        let key = canonicalize(spelling);
        if self
            .compiled
            .as_ref()
            .is_some_and(|hash| hash.contains(key.as_bytes()))
        {
            return Ok(false);
        }

        let display: String = spelling.nfc().collect();
        let stored_key: Box<[u8]> = key.as_bytes().into();
        let name = Name::new(key, display, kind, owner);
        match self.uncompiled.add_key(stored_key, name)? {
            AddKey::Unique => Ok(true),
            AddKey::Duplicate { .. } => Ok(false),
        }
    }

    /// Looks up a name from raw input bytes.
    #[must_use]
    pub fn lookup(&self, bytes: &[u8]) -> Option<&Name> {
        let key = canonicalize_bytes(bytes)?;
        self.lookup_key(key.as_bytes())
    }

    /// Looks up a name from a spelling.
    #[must_use]
    pub fn lookup_str(&self, spelling: &str) -> Option<&Name> {
        self.lookup_key(canonicalize(spelling).as_bytes())
    }

    fn lookup_key(&self, key: &[u8]) -> Option<&Name> {
        if let Some((_, name)) = self.compiled.as_ref().and_then(|hash| hash.lookup(key)) {
            return Some(name);
        }
        self.uncompiled.lookup(key).map(|entry| entry.data)
    }

    /// Moves every name into the compiled hash.
    ///
    /// Names compiled earlier are merged with everything added since. If the
    /// hash cannot be built, all names are rebuilt into the uncompiled set
    /// with evenly spaced levels and the compiled phase is left empty.
    ///
    /// All storage for the destination is reserved before any name is
    /// moved.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if neither destination can be reserved.
    /// Every name stays where it was when that happens.
    pub fn compile(&mut self) -> Result<CompileOutcome> {
        let old_len = self.compiled.as_ref().map_or(0, CompiledHash::len);
        let new_len = self.uncompiled.len();
        let total = old_len + new_len;

        let mut previous = Vec::new();
        previous.try_reserve_exact(old_len)?;

        let mut target = match CompiledHash::with_capacity(total, self.config.compiled_key_limit) {
            Some(hash) => Migration::Hash(hash),
            None => {
                warn!(keys = total, "name hash build failed, rebuilding sorted set");
                Migration::Rebuild(SortedSetMaker::new(total)?)
            }
        };

        debug!(previous = old_len, added = new_len, "compiling name set");

        if let Some(hash) = self.compiled.take() {
            hash.drain_sorted_into(&mut previous);
        }
        let added = mem::take(&mut self.uncompiled);

        // Both sides are ascending and disjoint, so one merge feeds the
        // maker in key order.
        let mut previous = previous.into_iter().peekable();
        for (key, name) in added {
            while let Some((old_key, old_name)) = previous.next_if(|(old, _)| *old < key) {
                target.push(old_key, old_name);
            }
            target.push(key, name);
        }
        for (key, name) in previous {
            target.push(key, name);
        }

        match target {
            Migration::Hash(hash) => {
                let keys = hash.len();
                self.compiled = Some(hash);
                debug!(keys, "name set compiled");
                Ok(CompileOutcome::Compiled { keys })
            }
            Migration::Rebuild(maker) => {
                self.uncompiled = maker.finalize();
                Ok(CompileOutcome::Rebuilt { keys: total })
            }
        }
    }

    /// Calls `f` on every name: compiled names first, then uncompiled names
    /// in canonical key order.
    pub fn apply<F>(&self, mut f: F)
    where
        F: FnMut(&Name),
    {
        for name in self.iter() {
            f(name);
        }
    }

    /// Iterates over every name in both phases.
    pub fn iter(&self) -> impl Iterator<Item = &Name> {
        self.compiled
            .iter()
            .flat_map(CompiledHash::values)
            .chain(self.uncompiled.iter().map(|entry| entry.data))
    }

    /// Returns the total number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled_len() + self.uncompiled_len()
    }

    /// Returns true if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a compiled hash is present.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Returns the number of names in the compiled hash.
    #[must_use]
    pub fn compiled_len(&self) -> usize {
        self.compiled.as_ref().map_or(0, CompiledHash::len)
    }

    /// Returns the number of names waiting in the uncompiled set.
    #[must_use]
    pub fn uncompiled_len(&self) -> usize {
        self.uncompiled.len()
    }
}

impl Default for NameSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NameSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameSet")
            .field("compiled", &self.compiled_len())
            .field("uncompiled", &self.uncompiled_len())
            .finish()
    }
}
