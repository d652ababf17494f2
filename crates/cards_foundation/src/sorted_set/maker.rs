//! Bulk construction of a [`SortedSet`] from pre-sorted keys.
//!
//! With `n` keys expected, the set gets `bit_length(n)` levels. The key at
//! insertion index `i` (zero-based) is linked into level `k` exactly when
//! `i + 1` is a multiple of `2^k`, so each level holds every other node of
//! the level beneath it. Each insertion only touches the current tail of
//! the levels it joins, so the whole build is O(n).
//!
//! Heights depend only on the index, so every node's links are allocated
//! up front by [`SortedSetMaker::new`]. Adding keys never allocates.

use super::{Head, Node, NodeId, SortedSet};
use crate::error::Result;

/// A one-shot builder producing a [`SortedSet`] with evenly spaced levels.
///
/// Keys must arrive in strictly ascending byte order, and exactly
/// `expected` of them must be added before [`finalize`](Self::finalize).
pub struct SortedSetMaker<T> {
    expected: usize,
    head: Head,
    nodes: Vec<Node<T>>,
    /// Link towers for the nodes not yet added, indexed by insertion index.
    towers: Vec<Vec<Option<NodeId>>>,
    /// Last node linked at each level.
    tails: Vec<Option<NodeId>>,
}

impl<T> SortedSetMaker<T> {
    /// Creates a maker that will hold exactly `expected` keys.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the node arena or the link towers
    /// cannot be reserved. Nothing is kept in that case.
    pub fn new(expected: usize) -> Result<Self> {
        let levels = Self::levels_for(expected);
        let head = Head::with_levels(levels)?;

        let mut tails = Vec::new();
        tails.try_reserve_exact(levels)?;
        tails.resize(levels, None);

        let mut nodes = Vec::new();
        nodes.try_reserve_exact(expected)?;

        let mut towers = Vec::new();
        towers.try_reserve_exact(expected)?;
        for index in 0..expected {
            let height = Self::height_at(index, levels);
            let mut tower = Vec::new();
            tower.try_reserve_exact(height)?;
            tower.resize(height, None);
            towers.push(tower);
        }

        Ok(Self {
            expected,
            head,
            nodes,
            towers,
            tails,
        })
    }

    /// Number of levels a perfectly balanced set of `n` keys needs.
    fn levels_for(n: usize) -> usize {
        let bits = (usize::BITS - n.leading_zeros()) as usize;
        bits.max(1)
    }

    /// Height of the node at zero-based insertion `index`.
    fn height_at(index: usize, levels: usize) -> usize {
        let landmark = (index + 1).trailing_zeros() as usize + 1;
        landmark.min(levels)
    }

    /// Returns the number of keys the finished set will hold.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Returns the number of keys added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no keys have been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true once `expected` keys have been added.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.nodes.len() == self.expected
    }

    /// Appends the next key in ascending order.
    ///
    /// Returns `true` when this key completes the maker.
    ///
    /// # Panics
    ///
    /// Panics if the maker is already complete, or if `key` does not sort
    /// strictly after the previously added key.
    pub fn add_key(&mut self, key: Box<[u8]>, data: T) -> bool {
        assert!(
            !self.is_complete(),
            "add_key called on a complete SortedSetMaker ({} keys)",
            self.expected
        );
        if let Some(last) = self.nodes.last() {
            assert!(
                *last.key < *key,
                "SortedSetMaker keys must be strictly ascending"
            );
        }

        let id = self.nodes.len();
        let next = std::mem::take(&mut self.towers[id]);
        for level in 0..next.len() {
            match self.tails[level] {
                Some(tail) => self.nodes[tail].next[level] = Some(id),
                None => self.head.next[level] = Some(id),
            }
            self.tails[level] = Some(id);
        }
        self.nodes.push(Node { key, data, next });

        self.is_complete()
    }

    /// Turns the completed maker into its [`SortedSet`].
    ///
    /// # Panics
    ///
    /// Panics if fewer than `expected` keys were added.
    #[must_use]
    pub fn finalize(self) -> SortedSet<T> {
        assert!(
            self.is_complete(),
            "SortedSetMaker finalized with {} of {} keys",
            self.nodes.len(),
            self.expected
        );
        SortedSet::from_parts(self.head, self.nodes)
    }

    /// Discards the partial structure and hands back the keys added so far,
    /// in ascending order.
    #[must_use]
    pub fn into_keys(self) -> Vec<Box<[u8]>> {
        self.nodes.into_iter().map(|node| node.key).collect()
    }
}
