//! Ordered unique-key set over byte-string keys, backed by a skip list.
//!
//! Keys are compared byte-wise; a key that is a strict prefix of another
//! sorts first. Level 0 links every node in ascending order, and a node
//! present at level `L` is present at every level below it.
//!
//! Nodes live in an arena and link to each other by index. The head is its
//! own type holding only the top-level forward links, so traversal starts
//! from a head position rather than from a keyless node.
//!
//! Two construction paths produce equivalent sets:
//! - [`SortedSet::add_key`] picks each new node's height by fair coin
//!   flips, giving expected O(log n) inserts.
//! - [`SortedSetMaker`] takes keys already in ascending order and assigns
//!   heights at power-of-two landmarks, building the whole set in O(n).

mod maker;

pub use maker::SortedSetMaker;

use std::cmp::Ordering;
use std::fmt::{self, Write as _};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;

/// Index of a node in the arena.
type NodeId = usize;

/// Forward links out of the head, one per level.
#[derive(Clone, Debug)]
struct Head {
    next: Vec<Option<NodeId>>,
}

impl Head {
    /// A head with no levels. An empty set allocates nothing.
    fn empty() -> Self {
        Self { next: Vec::new() }
    }

    fn with_levels(levels: usize) -> Result<Self> {
        let mut next = Vec::new();
        next.try_reserve_exact(levels)?;
        next.resize(levels, None);
        Ok(Self { next })
    }

    fn levels(&self) -> usize {
        self.next.len()
    }

    /// First node in key order.
    fn first(&self) -> Option<NodeId> {
        self.next.first().copied().flatten()
    }
}

/// A keyed node with a tower of forward links.
#[derive(Clone, Debug)]
struct Node<T> {
    key: Box<[u8]>,
    data: T,
    next: Vec<Option<NodeId>>,
}

/// A position a traversal can stand on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Link {
    Head,
    Node(NodeId),
}

/// Outcome of [`SortedSet::add_key`].
#[derive(Debug, PartialEq, Eq)]
pub enum AddKey<T> {
    /// The key was not present and the set took ownership of it.
    Unique,
    /// An equal key was already present. The set is unchanged and the
    /// rejected key and data are handed back to the caller.
    Duplicate {
        /// The rejected key.
        key: Box<[u8]>,
        /// The rejected data.
        data: T,
    },
}

impl<T> AddKey<T> {
    /// Returns true if the key was inserted.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Unique)
    }
}

/// A borrowed view of one stored key and its data.
#[derive(Debug, PartialEq, Eq)]
pub struct Entry<'a, T> {
    /// The stored key.
    pub key: &'a [u8],
    /// The data associated with the key.
    pub data: &'a T,
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

/// An ordered set of unique byte-string keys, each carrying data.
///
/// Single-owner and unsynchronised; wrap it externally if it must be shared.
pub struct SortedSet<T> {
    head: Head,
    nodes: Vec<Node<T>>,
    rng: ChaCha8Rng,
}

impl<T> SortedSet<T> {
    /// Creates an empty set with coin flips seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates an empty set whose node heights are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            head: Head::empty(),
            nodes: Vec::new(),
            rng,
        }
    }

    /// Assembles a set from a fully linked head and arena.
    fn from_parts(head: Head, nodes: Vec<Node<T>>) -> Self {
        Self {
            head,
            nodes,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Returns the number of keys in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of levels currently in use by the head. An empty
    /// set has none.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.head.levels()
    }

    fn next(&self, at: Link, level: usize) -> Option<NodeId> {
        match at {
            Link::Head => self.head.next[level],
            Link::Node(id) => self.nodes[id].next[level],
        }
    }

    fn set_next(&mut self, at: Link, level: usize, to: Option<NodeId>) {
        match at {
            Link::Head => self.head.next[level] = to,
            Link::Node(id) => self.nodes[id].next[level] = to,
        }
    }

    /// Height of a new node: one level, plus one more per winning flip.
    fn random_height(&mut self) -> usize {
        let mut height = 1;
        while self.rng.r#gen::<bool>() {
            height += 1;
        }
        height
    }

    /// Walks from the top level down to level 0.
    ///
    /// Returns the node holding `key` if one exists, otherwise records in
    /// `update[level]` the last position at each level whose key is less
    /// than `key`. The descent always continues to level 0 before it can
    /// conclude the key is absent, so a duplicate is caught at whichever
    /// level first reaches it.
    fn descend(&self, key: &[u8], mut update: Option<&mut [Link]>) -> Option<NodeId> {
        let mut at = Link::Head;
        for level in (0..self.levels()).rev() {
            while let Some(next) = self.next(at, level) {
                match self.nodes[next].key.as_ref().cmp(key) {
                    Ordering::Less => at = Link::Node(next),
                    Ordering::Equal => return Some(next),
                    Ordering::Greater => break,
                }
            }
            if let Some(update) = update.as_deref_mut() {
                update[level] = at;
            }
        }
        None
    }

    /// Adds `key` with `data`.
    ///
    /// On [`AddKey::Unique`] the set owns the key. On
    /// [`AddKey::Duplicate`] the set is unchanged and the key and data are
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the node or its links cannot be
    /// reserved. The set is unchanged in that case.
    pub fn add_key(&mut self, key: Box<[u8]>, data: T) -> Result<AddKey<T>> {
        let levels = self.levels();
        let mut update = Vec::new();
        update.try_reserve_exact(levels)?;
        update.resize(levels, Link::Head);

        if self.descend(&key, Some(update.as_mut_slice())).is_some() {
            return Ok(AddKey::Duplicate { key, data });
        }

        let height = self.random_height();
        let mut next = Vec::new();
        next.try_reserve_exact(height)?;
        self.nodes.try_reserve(1)?;
        if height > levels {
            self.head.next.try_reserve(height - levels)?;
        }

        let id = self.nodes.len();
        for level in 0..height {
            if level < levels {
                next.push(self.next(update[level], level));
                self.set_next(update[level], level, Some(id));
            } else {
                next.push(None);
                self.head.next.push(Some(id));
            }
        }
        self.nodes.push(Node { key, data, next });

        Ok(AddKey::Unique)
    }

    /// Finds `key`. The borrow stays valid until the set is mutated or
    /// dropped.
    #[must_use]
    pub fn lookup(&self, key: &[u8]) -> Option<Entry<'_, T>> {
        self.descend(key, None).map(|id| {
            let node = &self.nodes[id];
            Entry {
                key: &node.key,
                data: &node.data,
            }
        })
    }

    /// Finds `key` and returns its data mutably.
    pub fn lookup_mut(&mut self, key: &[u8]) -> Option<&mut T> {
        self.descend(key, None).map(|id| &mut self.nodes[id].data)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.descend(key, None).is_some()
    }

    /// Calls `f` on every entry in ascending key order.
    pub fn apply<F>(&self, mut f: F)
    where
        F: FnMut(&[u8], &T),
    {
        for entry in self.iter() {
            f(entry.key, entry.data);
        }
    }

    /// Consumes the set, handing each key and its data to `f` in ascending
    /// order while the structure is reclaimed in the same pass.
    pub fn apply_and_destroy<F>(self, mut f: F)
    where
        F: FnMut(Box<[u8]>, T),
    {
        for (key, data) in self {
            f(key, data);
        }
    }

    /// Consumes the set and returns its keys in ascending order, dropping
    /// the data and the link structure.
    #[must_use]
    pub fn into_keys(self) -> Vec<Box<[u8]>> {
        self.into_iter().map(|(key, _)| key).collect()
    }

    /// Returns an iterator over entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            set: self,
            at: self.head.first(),
            remaining: self.len(),
        }
    }

    /// Renders every level's links as a Graphviz digraph.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph dump {\n");
        for level in 0..self.levels() {
            let _ = writeln!(out, "\"root {level}\"");
            let _ = writeln!(out, "\"tail {level}\"");
            let mut from = format!("root {level}");
            let mut at = self.head.next[level];
            while let Some(id) = at {
                let to = format!("{} {level}", String::from_utf8_lossy(&self.nodes[id].key));
                let _ = writeln!(out, "\"{from}\" -> \"{to}\"");
                from = to;
                at = self.nodes[id].next[level];
            }
            let _ = writeln!(out, "\"{from}\" -> \"tail {level}\"");
        }
        out.push('}');
        out.push('\n');
        out
    }
}

impl<T> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|e| (String::from_utf8_lossy(e.key), e.data)),
            )
            .finish()
    }
}

/// Borrowing iterator over a [`SortedSet`] in ascending key order.
pub struct Iter<'a, T> {
    set: &'a SortedSet<T>,
    at: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = Entry<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.set.nodes[self.at?];
        self.at = node.next[0];
        self.remaining -= 1;
        Some(Entry {
            key: &node.key,
            data: &node.data,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a SortedSet<T> {
    type Item = Entry<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consuming iterator over a [`SortedSet`] in ascending key order.
pub struct IntoIter<T> {
    slots: Vec<Option<(Box<[u8]>, T, Option<NodeId>)>>,
    at: Option<NodeId>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (Box<[u8]>, T);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, data, next) = self.slots[self.at?].take()?;
        self.at = next;
        Some((key, data))
    }
}

impl<T> IntoIterator for SortedSet<T> {
    type Item = (Box<[u8]>, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let at = self.head.first();
        let slots = self
            .nodes
            .into_iter()
            .map(|node| Some((node.key, node.data, node.next[0])))
            .collect();
        IntoIter { slots, at }
    }
}
