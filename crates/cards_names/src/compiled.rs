//! The immutable compiled half of a name set.
//!
//! [`HashInputs`] collects keys with their data; [`CompiledHash::build`]
//! consumes them into a read-only table. A build can fail, in which case the
//! inputs come back untouched so the caller can put them somewhere else.

use rustc_hash::FxHashMap;

use cards_foundation::Result;

/// Keys and data waiting to be compiled.
///
/// Entries keep the order they were added in.
#[derive(Debug)]
pub struct HashInputs<T> {
    entries: Vec<(Box<[u8]>, T)>,
}

impl<T> HashInputs<T> {
    /// Creates an empty input list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Ensures room for at least `minimum` entries in total.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the memory cannot be reserved.
    pub fn at_least(&mut self, minimum: usize) -> Result<()> {
        self.entries
            .try_reserve(minimum.saturating_sub(self.entries.len()))?;
        Ok(())
    }

    /// Appends an entry without copying the key.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the entry cannot be stored.
    pub fn add(&mut self, key: Box<[u8]>, data: T) -> Result<()> {
        self.entries.try_reserve(1)?;
        self.entries.push((key, data));
        Ok(())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the inputs, handing each entry to `f` in insertion order.
    pub fn apply_and_destroy<F>(self, mut f: F)
    where
        F: FnMut(Box<[u8]>, T),
    {
        for (key, data) in self.entries {
            f(key, data);
        }
    }
}

impl<T> Default for HashInputs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for HashInputs<T> {
    type Item = (Box<[u8]>, T);
    type IntoIter = std::vec::IntoIter<(Box<[u8]>, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A read-only table from byte keys to data.
#[derive(Debug)]
pub struct CompiledHash<T> {
    table: FxHashMap<Box<[u8]>, T>,
}

impl<T> CompiledHash<T> {
    /// Builds a table from `inputs`, consuming them on success.
    ///
    /// Fails when `limit` is set and the inputs exceed it, or when the table
    /// cannot be allocated. On failure the inputs are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the original inputs if the table could not be built.
    pub fn build(
        inputs: HashInputs<T>,
        limit: Option<usize>,
    ) -> std::result::Result<Self, HashInputs<T>> {
        let Some(mut hash) = Self::with_capacity(inputs.len(), limit) else {
            return Err(inputs);
        };
        for (key, data) in inputs {
            hash.insert(key, data);
        }
        Ok(hash)
    }

    /// Reserves an empty table for exactly `keys` entries.
    ///
    /// Returns `None` when `limit` is set and `keys` exceeds it, or when the
    /// table cannot be allocated. Up to `keys` inserts never allocate.
    #[must_use]
    pub fn with_capacity(keys: usize, limit: Option<usize>) -> Option<Self> {
        if limit.is_some_and(|limit| keys > limit) {
            return None;
        }
        let mut table = FxHashMap::default();
        table.try_reserve(keys).ok()?;
        Some(Self { table })
    }

    /// Adds an entry. Stays within the reserved capacity as long as no more
    /// than the reserved number of keys are inserted.
    pub(crate) fn insert(&mut self, key: Box<[u8]>, data: T) {
        let previous = self.table.insert(key, data);
        debug_assert!(previous.is_none(), "duplicate key in hash inputs");
    }

    /// Finds `key`, returning the stored key and its data.
    #[must_use]
    pub fn lookup(&self, key: &[u8]) -> Option<(&[u8], &T)> {
        self.table.get_key_value(key).map(|(k, v)| (&**k, v))
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.table.contains_key(key)
    }

    /// Calls `f` on every entry, in no particular order.
    pub fn apply<F>(&self, mut f: F)
    where
        F: FnMut(&[u8], &T),
    {
        for (key, data) in &self.table {
            f(key, data);
        }
    }

    /// Iterates over the data, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.table.values()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Moves every entry into `out` in ascending key order.
    ///
    /// `out` must already have room for [`len`](Self::len) more entries.
    pub(crate) fn drain_sorted_into(self, out: &mut Vec<(Box<[u8]>, T)>) {
        debug_assert!(out.capacity() - out.len() >= self.table.len());
        let start = out.len();
        out.extend(self.table);
        out[start..].sort_unstable_by(|a, b| a.0.cmp(&b.0));
    }
}
